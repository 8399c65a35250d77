use anyhow::Result;

use crate::cli::{GlobalOpts, ProvisionOpts};
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::net::HttpFetcher;
use crate::prompt::{AssumeYes, Confirm, TerminalConfirm};
use crate::steps::{self, Context, Step};

use super::CommandSetup;

/// Run the provision command.
///
/// Steps that fail are recorded in the summary and do not stop the run;
/// the exit code stays zero so a partially-declined or partially-failed
/// run still reads as "completed". Only setup failures (unsupported
/// platform, unreadable manifests) abort with an error.
///
/// # Errors
///
/// Returns an error if platform detection, root resolution, or
/// configuration loading fails.
pub fn run(global: &GlobalOpts, opts: &ProvisionOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    let executor = SystemExecutor;
    let fetcher = HttpFetcher::new();
    let assume_yes = AssumeYes;
    let terminal = TerminalConfirm;
    let confirm: &dyn Confirm = if global.yes { &assume_yes } else { &terminal };
    let home = steps::home_dir()?;

    let ctx = Context::new(
        &setup.config,
        &setup.platform,
        log,
        &executor,
        confirm,
        &fetcher,
        home,
        global.dry_run,
    );

    let all = steps::all_steps(&setup.config);
    let to_run = filter_steps(&all, &opts.skip, &opts.only);

    for step in to_run {
        steps::execute(step, &ctx);
    }

    log.print_summary();

    let failures = log.failure_count();
    if failures > 0 {
        log.warn(&format!("{failures} step(s) failed; see summary above"));
    }
    Ok(())
}

/// Apply `--skip` / `--only` filtering to the step list.
///
/// `--only` wins when both are given; matching is case-insensitive
/// substring containment on the step name.
fn filter_steps<'s>(
    all: &'s [Box<dyn Step>],
    skip: &[String],
    only: &[String],
) -> Vec<&'s dyn Step> {
    all.iter()
        .filter(|step| {
            let name = step.name().to_lowercase();
            if !only.is_empty() {
                return only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !skip.is_empty() {
                return !skip.iter().any(|s| name.contains(&s.to_lowercase()));
            }
            true
        })
        .map(AsRef::as_ref)
        .collect()
}
