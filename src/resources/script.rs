//! Installer script resource.
//!
//! Fetches an installer script over HTTPS and runs it through `sh`. The
//! script's own effects are opaque to the engine, so this resource is only
//! [`Applicable`]; presence detection happens at the step level via the
//! capability cache.

use anyhow::{Context as _, Result};

use super::{Applicable, ResourceChange};
use crate::exec::Executor;
use crate::net::Fetcher;

/// An installer script fetched over HTTPS and executed with `sh`.
pub struct InstallerScript<'a> {
    /// Name of the tool the script installs (for messages only).
    pub name: String,
    /// HTTPS URL of the script.
    pub url: String,
    fetcher: &'a dyn Fetcher,
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for InstallerScript<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerScript")
            .field("name", &self.name)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl<'a> InstallerScript<'a> {
    /// Create a new installer script resource.
    #[must_use]
    pub const fn new(
        name: String,
        url: String,
        fetcher: &'a dyn Fetcher,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            name,
            url,
            fetcher,
            executor,
        }
    }
}

impl Applicable for InstallerScript<'_> {
    fn description(&self) -> String {
        format!("{} (script {})", self.name, self.url)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let body = self
            .fetcher
            .get_text(&self.url)
            .with_context(|| format!("downloading installer script {}", self.url))?;
        self.executor
            .run("sh", &["-c", &body])
            .with_context(|| format!("running installer script for {}", self.name))?;
        Ok(ResourceChange::Applied)
    }
}
