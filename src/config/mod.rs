//! TOML manifest loading for the bootstrap kit.
pub mod links;
pub mod toml_loader;
pub mod tools;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use links::Link;
pub use tools::{Tool, ToolAction};

/// All loaded configuration for a provisioning run.
#[derive(Debug)]
pub struct Config {
    /// Root directory of the bootstrap kit.
    pub root: PathBuf,
    pub tools: Vec<Tool>,
    pub links: Vec<Link>,
}

impl Config {
    /// Load all manifests from the kit's conf/ directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any manifest fails to parse or validate.
    pub fn load(root: &Path) -> Result<Self> {
        let conf = root.join("conf");

        let tools = tools::load(&conf.join("tools.toml")).context("loading tools.toml")?;
        let links = links::load(&conf.join("links.toml")).context("loading links.toml")?;

        Ok(Self {
            root: root.to_path_buf(),
            tools,
            links,
        })
    }

    /// Directory containing the dotfiles that links point at.
    #[must_use]
    pub fn dotfiles_dir(&self) -> PathBuf {
        self.root.join("dotfiles")
    }

    /// Check the loaded configuration for problems worth warning about.
    ///
    /// These are not errors: the provisioner still runs and the affected
    /// steps skip themselves individually.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen_tools = HashSet::new();
        for tool in &self.tools {
            if !seen_tools.insert(tool.name.as_str()) {
                warnings.push(format!("duplicate tool entry: {}", tool.name));
            }
        }

        let mut seen_sources = HashSet::new();
        let dotfiles = self.dotfiles_dir();
        for link in &self.links {
            if !seen_sources.insert(link.source.as_str()) {
                warnings.push(format!("duplicate link entry: {}", link.source));
            }
            if !dotfiles.join(&link.source).exists() {
                warnings.push(format!("link source missing: dotfiles/{}", link.source));
            }
        }

        warnings
    }
}
