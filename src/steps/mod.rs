//! Named, confirmable steps that orchestrate resource changes.
//!
//! Each configured tool and dotfile link becomes one step. Steps run
//! strictly sequentially, and a failing step is recorded and stepped over
//! so the rest of the run still happens.
pub mod context;
pub mod links;
pub mod tools;

pub use context::{Context, home_dir};

use anyhow::Result;

use crate::config::Config;
use crate::logging::StepStatus;

/// A named, executable step.
pub trait Step {
    /// Human-readable step name.
    fn name(&self) -> &str;

    /// Whether this step applies to the current platform/configuration.
    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails, such as when downloads fail or
    /// external commands exit non-zero. Errors fail this step only; the
    /// caller continues with the remaining steps.
    fn run(&self, ctx: &Context) -> Result<StepResult>;
}

/// Outcome of a successfully executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The step changed something.
    Changed,
    /// Everything the step would do was already in place.
    AlreadySatisfied,
    /// A prerequisite was unavailable; nothing was attempted.
    Skipped(String),
    /// The user declined the confirmation prompt.
    Declined,
    /// Dry-run mode; the step only reported what it would do.
    DryRun,
}

/// The complete set of steps for a provisioning run.
///
/// Tool steps come first so that dotfiles (plugin configs, prompt themes)
/// land after the binaries they configure exist.
#[must_use]
pub fn all_steps(config: &Config) -> Vec<Box<dyn Step>> {
    let mut steps: Vec<Box<dyn Step>> = Vec::new();
    for tool in &config.tools {
        steps.push(Box::new(tools::InstallTool::new(tool.clone())));
    }
    for link in &config.links {
        steps.push(Box::new(links::LinkFile::new(link.clone())));
    }
    steps
}

/// Execute a step, recording the result in the logger.
///
/// Failures are recorded and swallowed here: one broken download must not
/// stop the independent steps after it.
pub fn execute(step: &dyn Step, ctx: &Context) {
    if !step.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping step: {} (not applicable)", step.name()));
        ctx.log
            .record_step(step.name(), StepStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(step.name());

    match step.run(ctx) {
        Ok(StepResult::Changed) => {
            ctx.log.record_step(step.name(), StepStatus::Ok, None);
        }
        Ok(StepResult::AlreadySatisfied) => {
            ctx.log
                .record_step(step.name(), StepStatus::Ok, Some("already satisfied"));
        }
        Ok(StepResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_step(step.name(), StepStatus::Skipped, Some(&reason));
        }
        Ok(StepResult::Declined) => {
            ctx.log.info("declined");
            ctx.log.record_step(step.name(), StepStatus::Declined, None);
        }
        Ok(StepResult::DryRun) => {
            ctx.log.record_step(step.name(), StepStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", step.name()));
            ctx.log
                .record_step(step.name(), StepStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}
