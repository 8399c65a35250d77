//! Tool manifest loading.
//!
//! `conf/tools.toml` declares the tools the provisioner may install:
//!
//! ```toml
//! [[tools]]
//! name = "starship"
//! repo = "starship/starship"
//! prompt = "Install the starship prompt?"
//!
//! [[tools]]
//! name = "tmux"
//! package = "tmux"
//!
//! [[tools]]
//! name = "rustup"
//! bin = "rustup"
//! script = "https://sh.rustup.rs"
//! ```

use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;

/// One installable tool: detection predicate plus install action.
#[derive(Debug, Clone)]
pub struct Tool {
    /// Step name shown in prompts and the summary.
    pub name: String,
    /// Command probed on PATH to decide whether the tool is already present.
    pub bin: String,
    /// How to install the tool when it is absent.
    pub action: ToolAction,
    /// Confirmation prompt override; a default is derived from the name.
    pub prompt: Option<String>,
}

/// The install action a tool entry declares (exactly one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAction {
    /// Install through the detected OS package manager.
    Package(String),
    /// Download the latest GitHub release binary into `~/.local/bin`.
    GithubRelease {
        /// `owner/name` repository.
        repo: String,
        /// Exact asset name override; auto-detected per platform when absent.
        asset: Option<String>,
    },
    /// Fetch an installer script over HTTPS and run it through `sh`.
    Script(String),
}

/// Raw manifest entry before action validation.
#[derive(Debug, Deserialize)]
struct ToolEntry {
    name: String,
    bin: Option<String>,
    package: Option<String>,
    repo: Option<String>,
    asset: Option<String>,
    script: Option<String>,
    prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolsFile {
    #[serde(default)]
    tools: Vec<ToolEntry>,
}

/// Load tools from `tools.toml`. A missing file yields an empty list.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or an entry declares zero
/// or more than one install action.
pub fn load(path: &Path) -> Result<Vec<Tool>, ConfigError> {
    let file: ToolsFile = match toml_loader::load_file(path)? {
        Some(file) => file,
        None => return Ok(Vec::new()),
    };

    file.tools.into_iter().map(Tool::try_from).collect()
}

impl TryFrom<ToolEntry> for Tool {
    type Error = ConfigError;

    fn try_from(entry: ToolEntry) -> Result<Self, ConfigError> {
        let declared = [
            entry.package.is_some(),
            entry.repo.is_some(),
            entry.script.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if declared == 0 {
            return Err(ConfigError::MissingAction { tool: entry.name });
        }
        if declared > 1 {
            return Err(ConfigError::AmbiguousAction { tool: entry.name });
        }

        let action = if let Some(package) = entry.package {
            ToolAction::Package(package)
        } else if let Some(repo) = entry.repo {
            ToolAction::GithubRelease {
                repo,
                asset: entry.asset,
            }
        } else if let Some(script) = entry.script {
            ToolAction::Script(script)
        } else {
            // declared == 1 guarantees one of the branches above matched.
            return Err(ConfigError::MissingAction { tool: entry.name });
        };

        let bin = entry.bin.unwrap_or_else(|| entry.name.clone());
        Ok(Self {
            name: entry.name,
            bin,
            action,
            prompt: entry.prompt,
        })
    }
}
