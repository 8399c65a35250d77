//! Tool installation steps.

use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::capability::ToolStatus;
use crate::config::{Tool, ToolAction};
use crate::resources::Applicable as _;
use crate::resources::ResourceChange;
use crate::resources::package::PackageResource;
use crate::resources::release::ReleaseBinary;
use crate::resources::script::InstallerScript;

/// Install one configured tool.
///
/// The detection predicate (`bin` on PATH) decides whether there is
/// anything to do at all; actual installation is always gated by the
/// confirmation prompt.
pub struct InstallTool {
    tool: Tool,
}

impl InstallTool {
    #[must_use]
    pub const fn new(tool: Tool) -> Self {
        Self { tool }
    }

    fn prompt_text(&self) -> String {
        self.tool
            .prompt
            .clone()
            .unwrap_or_else(|| format!("Install {}?", self.tool.name))
    }
}

impl Step for InstallTool {
    fn name(&self) -> &str {
        &self.tool.name
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        if ctx.capabilities.status(&self.tool.bin) == ToolStatus::Present {
            ctx.log
                .debug(&format!("{} already on PATH", self.tool.bin));
            return Ok(StepResult::AlreadySatisfied);
        }

        // Prerequisite gates come before dry-run and the prompt, so the
        // user is never asked about work that cannot happen.
        match &self.tool.action {
            ToolAction::Package(_) if ctx.package_manager().is_none() => {
                return Ok(StepResult::Skipped(
                    "no supported package manager found".to_string(),
                ));
            }
            ToolAction::Script(_) if !ctx.executor.which("sh") => {
                return Ok(StepResult::Skipped("sh is not available".to_string()));
            }
            _ => {}
        }

        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("would install {}", self.tool.name));
            return Ok(StepResult::DryRun);
        }

        if !ctx.confirm.confirm(&self.prompt_text())? {
            return Ok(StepResult::Declined);
        }

        let change = match &self.tool.action {
            ToolAction::Package(package) => match ctx.package_manager() {
                Some(manager) => {
                    PackageResource::new(package.clone(), manager, ctx.executor).apply()?
                }
                None => {
                    return Ok(StepResult::Skipped(
                        "no supported package manager found".to_string(),
                    ));
                }
            },
            ToolAction::GithubRelease { repo, asset } => ReleaseBinary::new(
                self.tool.bin.clone(),
                repo.clone(),
                asset.clone(),
                ctx.bin_dir(),
                ctx.platform,
                ctx.fetcher,
            )
            .apply()?,
            ToolAction::Script(url) => {
                InstallerScript::new(self.tool.name.clone(), url.clone(), ctx.fetcher, ctx.executor)
                    .apply()?
            }
        };

        match change {
            ResourceChange::Applied => {
                ctx.log.info(&format!("installed {}", self.tool.name));
                Ok(StepResult::Changed)
            }
            ResourceChange::AlreadyCorrect => Ok(StepResult::AlreadySatisfied),
            ResourceChange::Skipped { reason } => Ok(StepResult::Skipped(reason)),
        }
    }
}
