//! Structured logger with dry-run awareness and summary collection.

use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Step execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct StepEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: StepStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step completed successfully (or was already satisfied).
    Ok,
    /// Step does not apply to the current platform or configuration.
    NotApplicable,
    /// Step was skipped because a prerequisite is unavailable.
    Skipped,
    /// The user declined the step's confirmation prompt. Not an error.
    Declined,
    /// Step ran in dry-run mode; no changes were applied.
    DryRun,
    /// Step encountered an error and could not complete.
    Failed,
}

/// Initialise the global tracing subscriber for console output.
///
/// `RUST_LOG` overrides the default level; `--verbose` lowers it to debug.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Logger façade over tracing that also records per-step summary entries.
#[derive(Debug, Default)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
}

impl Logger {
    /// Create a new logger with no recorded steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "bootstrap::stage", "==> {msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "bootstrap::dry_run", "[dry run] {msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a clone of all recorded step entries.
    #[must_use]
    pub fn entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Number of recorded steps that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.status == StepStatus::Failed)
            .count()
    }

    /// Print the summary of all recorded steps.
    pub fn print_summary(&self) {
        let steps = self.entries();
        if steps.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut ok = 0u32;
        let mut not_applicable = 0u32;
        let mut skipped = 0u32;
        let mut declined = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for step in &steps {
            let (icon, color) = match step.status {
                StepStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                StepStatus::NotApplicable => {
                    not_applicable += 1;
                    ("·", "\x1b[2m")
                }
                StepStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                StepStatus::Declined => {
                    declined += 1;
                    ("−", "\x1b[33m")
                }
                StepStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[33m")
                }
                StepStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = match &step.message {
                Some(msg) => format!(" ({msg})"),
                None => String::new(),
            };
            println!("  {color}{icon} {}{suffix}\x1b[0m", step.name);
        }

        println!();
        let total = ok + not_applicable + skipped + declined + dry_run + failed;
        println!(
            "  {total} steps: \x1b[32m{ok} ok\x1b[0m, {not_applicable} n/a, \
             \x1b[33m{skipped} skipped\x1b[0m, {declined} declined, \
             {dry_run} dry-run, \x1b[31m{failed} failed\x1b[0m"
        );
    }
}
