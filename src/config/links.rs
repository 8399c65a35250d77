//! Dotfile link manifest loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::toml_loader;
use crate::error::ConfigError;

/// A dotfile to link: source (in dotfiles/) → target (in $HOME).
#[derive(Debug, Clone)]
pub struct Link {
    /// Relative path under the kit's dotfiles/ directory.
    pub source: String,
    /// Explicit target path relative to `$HOME`; derived by convention when absent.
    pub target: Option<String>,
}

/// A single entry in the links list — either a plain source path or a
/// structured `{ source, target }` pair for an explicit target override.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinkEntry {
    /// Plain string: `"zshrc"` — target is derived by convention.
    Simple(String),
    /// Structured: `{ source = "foo", target = ".bar" }` — explicit target.
    WithTarget { source: String, target: String },
}

#[derive(Debug, Deserialize)]
struct LinksFile {
    #[serde(default)]
    links: Vec<LinkEntry>,
}

/// Load links from `links.toml`. A missing file yields an empty list.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load(path: &Path) -> Result<Vec<Link>, ConfigError> {
    let file: LinksFile = match toml_loader::load_file(path)? {
        Some(file) => file,
        None => return Ok(Vec::new()),
    };

    Ok(file
        .links
        .into_iter()
        .map(|entry| match entry {
            LinkEntry::Simple(source) => Link {
                source,
                target: None,
            },
            LinkEntry::WithTarget { source, target } => Link {
                source,
                target: Some(target),
            },
        })
        .collect())
}

/// Compute the target path in `$HOME` for a link.
///
/// Sources like `"zshrc"` map to `$HOME/.zshrc`; `"config/nvim"` maps to
/// `$HOME/.config/nvim`. An explicit target overrides the convention.
pub fn target_path(home: &Path, link: &Link) -> PathBuf {
    match &link.target {
        Some(target) => home.join(target),
        None => home.join(format!(".{}", link.source)),
    }
}
