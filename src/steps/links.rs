//! Dotfile link steps.

use anyhow::Result;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{Context, Step, StepResult};
use crate::config::links::{self, Link};
use crate::resources::symlink::LinkResource;
use crate::resources::{Applicable as _, Resource as _, ResourceState};

/// Link one dotfile from the kit into `$HOME`.
///
/// A correct existing link is left alone without prompting; a divergent
/// file is only replaced after confirmation, and then only after it has
/// been moved to a timestamped backup.
pub struct LinkFile {
    link: Link,
    name: String,
}

impl LinkFile {
    #[must_use]
    pub fn new(link: Link) -> Self {
        let name = format!("link {}", link.source);
        Self { link, name }
    }
}

impl Step for LinkFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let source = ctx.dotfiles_dir().join(&self.link.source);
        let target = links::target_path(&ctx.home, &self.link);
        let resource = LinkResource::new(source.clone(), target.clone());

        match resource.current_state()? {
            ResourceState::Correct => {
                ctx.log
                    .debug(&format!("ok: {} (already linked)", target.display()));
                Ok(StepResult::AlreadySatisfied)
            }
            ResourceState::Invalid { reason } => Ok(StepResult::Skipped(reason)),
            ResourceState::Missing => {
                if ctx.dry_run {
                    ctx.log.dry_run(&format!(
                        "would link {} -> {}",
                        target.display(),
                        source.display()
                    ));
                    return Ok(StepResult::DryRun);
                }
                resource.apply()?;
                ctx.log.debug(&format!(
                    "linked {} -> {}",
                    target.display(),
                    source.display()
                ));
                Ok(StepResult::Changed)
            }
            ResourceState::Incorrect { current } => {
                if ctx.dry_run {
                    ctx.log.dry_run(&format!(
                        "would back up {} ({current}) and link to {}",
                        target.display(),
                        source.display()
                    ));
                    return Ok(StepResult::DryRun);
                }
                let prompt = format!(
                    "{} is in the way ({current}); back it up and replace with a link?",
                    target.display()
                );
                if !ctx.confirm.confirm(&prompt)? {
                    return Ok(StepResult::Declined);
                }
                let backup = resource.apply_with_backup(unix_now())?;
                ctx.log.info(&format!(
                    "backed up {} to {}",
                    target.display(),
                    backup.display()
                ));
                Ok(StepResult::Changed)
            }
        }
    }
}

/// Current Unix time in seconds, used for backup names.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
