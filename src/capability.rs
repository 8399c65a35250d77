//! Per-run cache of tool availability.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::exec::Executor;

/// Whether a tool is available on PATH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Present,
    Absent,
}

/// Caching lookup of tool availability.
///
/// Each name is probed through the executor at most once per run; every
/// subsequent query for the same name is answered from the cache. The run is
/// single-threaded, so a `RefCell` is all the interior mutability needed.
pub struct Capabilities<'a> {
    executor: &'a dyn Executor,
    cache: RefCell<HashMap<String, ToolStatus>>,
}

impl std::fmt::Debug for Capabilities<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<'a> Capabilities<'a> {
    /// Create an empty cache backed by `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn Executor) -> Self {
        Self {
            executor,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Look up (and memoise) the availability of `name`.
    pub fn status(&self, name: &str) -> ToolStatus {
        if let Some(status) = self.cache.borrow().get(name) {
            return *status;
        }
        let status = if self.executor.which(name) {
            ToolStatus::Present
        } else {
            ToolStatus::Absent
        };
        self.cache.borrow_mut().insert(name.to_string(), status);
        status
    }
}
