//! OS package installation resource.

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Debian/Ubuntu (apt-get).
    Apt,
    /// Fedora (dnf).
    Dnf,
    /// Arch Linux (pacman).
    Pacman,
    /// macOS (Homebrew).
    Brew,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apt => write!(f, "apt"),
            Self::Dnf => write!(f, "dnf"),
            Self::Pacman => write!(f, "pacman"),
            Self::Brew => write!(f, "brew"),
        }
    }
}

impl PackageManager {
    /// Detect the first available package manager on this system.
    pub fn detect(executor: &dyn Executor) -> Option<Self> {
        if executor.which("apt-get") {
            Some(Self::Apt)
        } else if executor.which("dnf") {
            Some(Self::Dnf)
        } else if executor.which("pacman") {
            Some(Self::Pacman)
        } else if executor.which("brew") {
            Some(Self::Brew)
        } else {
            None
        }
    }
}

/// A system package resource that can be checked and installed.
pub struct PackageResource<'a> {
    /// Package name as the manager knows it.
    pub name: String,
    /// Package manager to use.
    pub manager: PackageManager,
    /// Executor for running package manager commands.
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for PackageResource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageResource")
            .field("name", &self.name)
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

impl<'a> PackageResource<'a> {
    /// Create a new package resource.
    #[must_use]
    pub const fn new(name: String, manager: PackageManager, executor: &'a dyn Executor) -> Self {
        Self {
            name,
            manager,
            executor,
        }
    }
}

impl Applicable for PackageResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.name, self.manager)
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.manager {
            PackageManager::Apt => {
                self.executor
                    .run("sudo", &["apt-get", "install", "-y", &self.name])?;
            }
            PackageManager::Dnf => {
                self.executor
                    .run("sudo", &["dnf", "install", "-y", &self.name])?;
            }
            PackageManager::Pacman => {
                self.executor.run(
                    "sudo",
                    &["pacman", "-S", "--needed", "--noconfirm", &self.name],
                )?;
            }
            PackageManager::Brew => {
                self.executor.run("brew", &["install", &self.name])?;
            }
        }
        Ok(ResourceChange::Applied)
    }
}

impl Resource for PackageResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let result = match self.manager {
            PackageManager::Apt => self.executor.run_unchecked("dpkg", &["-s", &self.name])?,
            PackageManager::Dnf => self.executor.run_unchecked("rpm", &["-q", &self.name])?,
            PackageManager::Pacman => {
                self.executor.run_unchecked("pacman", &["-Q", &self.name])?
            }
            PackageManager::Brew => self.executor.run_unchecked("brew", &["list", &self.name])?,
        };
        if result.success {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
