use anyhow::Result;
use std::path::Path;

use crate::capability::{Capabilities, ToolStatus};
use crate::cli::{GlobalOpts, StatusOpts};
use crate::config::{Config, links};
use crate::exec::Executor;
use crate::logging::Logger;
use crate::resources::symlink::LinkResource;
use crate::resources::{Resource as _, ResourceState};

use super::CommandSetup;

/// Run the status command: a read-only report of every configured step.
///
/// Never prompts and never mutates the filesystem.
///
/// # Errors
///
/// Returns an error if platform detection, root resolution, or
/// configuration loading fails.
pub fn run(global: &GlobalOpts, _opts: &StatusOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let executor = crate::exec::SystemExecutor;
    let home = crate::steps::home_dir()?;
    report(&setup.config, &executor, &home, log)
}

/// Produce the per-step state report.
///
/// Split out from [`run`] so tests can drive it with an injected executor
/// and home directory.
///
/// # Errors
///
/// Returns an error if a link's state cannot be determined.
pub fn report(config: &Config, executor: &dyn Executor, home: &Path, log: &Logger) -> Result<()> {
    let capabilities = Capabilities::new(executor);

    if !config.tools.is_empty() {
        log.stage("Tools");
        for tool in &config.tools {
            match capabilities.status(&tool.bin) {
                ToolStatus::Present => log.info(&format!("✓ {} ({})", tool.name, tool.bin)),
                ToolStatus::Absent => log.info(&format!("○ {}: not installed", tool.name)),
            }
        }
    }

    if !config.links.is_empty() {
        log.stage("Dotfiles");
        for link in &config.links {
            let source = config.dotfiles_dir().join(&link.source);
            let target = links::target_path(home, link);
            let resource = LinkResource::new(source, target.clone());
            match resource.current_state()? {
                ResourceState::Correct => log.info(&format!("✓ {}", target.display())),
                ResourceState::Missing => {
                    log.info(&format!("○ {}: not linked", target.display()));
                }
                ResourceState::Incorrect { current } => {
                    log.info(&format!("✗ {}: {current}", target.display()));
                }
                ResourceState::Invalid { reason } => {
                    log.info(&format!("✗ {}: {reason}", target.display()));
                }
            }
        }
    }

    Ok(())
}
