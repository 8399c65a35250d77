use std::cell::OnceCell;
use std::path::PathBuf;

use anyhow::Result;

use crate::capability::Capabilities;
use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Logger;
use crate::net::Fetcher;
use crate::platform::Platform;
use crate::prompt::Confirm;
use crate::resources::package::PackageManager;

/// Shared context for step execution.
///
/// The run is strictly sequential, so everything is threaded through as
/// plain borrows; the only interior mutability is the capability cache and
/// the memoised package manager lookup.
pub struct Context<'a> {
    /// Configuration loaded from the kit's TOML manifests.
    pub config: &'a Config,
    /// Detected platform information.
    pub platform: &'a Platform,
    /// Logger for output and step recording.
    pub log: &'a Logger,
    /// Command executor (for testing or real system calls).
    pub executor: &'a dyn Executor,
    /// Confirmation prompt abstraction.
    pub confirm: &'a dyn Confirm,
    /// HTTP fetcher for release lookups and script downloads.
    pub fetcher: &'a dyn Fetcher,
    /// Per-run cache of tool availability.
    pub capabilities: Capabilities<'a>,
    /// User's home directory path.
    pub home: PathBuf,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    package_manager: OnceCell<Option<PackageManager>>,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("platform", &self.platform)
            .field("home", &self.home)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> Context<'a> {
    /// Create a new context for step execution.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &'a Config,
        platform: &'a Platform,
        log: &'a Logger,
        executor: &'a dyn Executor,
        confirm: &'a dyn Confirm,
        fetcher: &'a dyn Fetcher,
        home: PathBuf,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            platform,
            log,
            executor,
            confirm,
            fetcher,
            capabilities: Capabilities::new(executor),
            home,
            dry_run,
            package_manager: OnceCell::new(),
        }
    }

    /// Directory containing the kit's dotfiles.
    #[must_use]
    pub fn dotfiles_dir(&self) -> PathBuf {
        self.config.dotfiles_dir()
    }

    /// Directory release binaries are installed into.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join(".local/bin")
    }

    /// The system's package manager, detected once per run.
    pub fn package_manager(&self) -> Option<PackageManager> {
        *self
            .package_manager
            .get_or_init(|| PackageManager::detect(self.executor))
    }
}

/// Resolve the user's home directory from the environment.
///
/// # Errors
///
/// Returns an error if the `HOME` environment variable is not set.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))
}
