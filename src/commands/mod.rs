pub mod provision;
pub mod status;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Logger;
use crate::platform::Platform;

/// Shared state produced by the common command setup sequence.
///
/// Platform detection runs first and is the only fatal gate: an unsupported
/// OS or architecture aborts here, before any filesystem mutation.
#[derive(Debug)]
pub struct CommandSetup {
    pub platform: Platform,
    pub config: Config,
}

impl CommandSetup {
    /// Detect the platform, resolve the kit root, and load all manifests.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform is unsupported, the root directory
    /// cannot be determined, or any manifest fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let platform = Platform::detect()?;
        log.debug(&format!("platform: {}/{}", platform.os, platform.arch));

        let root = resolve_root(global)?;
        log.stage("Loading configuration");
        let config = Config::load(&root)?;
        log.info(&format!(
            "loaded {} tools, {} links",
            config.tools.len(),
            config.links.len()
        ));

        for warning in config.validate() {
            log.warn(&warning);
        }

        Ok(Self { platform, config })
    }
}

/// Resolve the bootstrap kit root directory from CLI arguments, the
/// `BOOTSTRAP_ROOT` environment variable, or the current directory.
///
/// # Errors
///
/// Returns an error if no candidate contains a `conf/` directory.
pub fn resolve_root(global: &GlobalOpts) -> Result<std::path::PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("BOOTSTRAP_ROOT") {
        return Ok(std::path::PathBuf::from(root));
    }

    let cwd = std::env::current_dir()?;
    if cwd.join("conf").exists() {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine kit root. Use --root or set BOOTSTRAP_ROOT")
}
