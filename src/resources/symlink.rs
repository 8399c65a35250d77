//! Dotfile symlink resource with backup-then-link semantics.
//!
//! The destination is never silently overwritten: an existing divergent file
//! is first renamed to a uniquely-timestamped backup path, and callers are
//! expected to confirm with the user before invoking
//! [`LinkResource::apply_with_backup`].

use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A symlink resource that can be checked and applied.
#[derive(Debug, Clone)]
pub struct LinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl LinkResource {
    /// Create a new link resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Move the existing target aside to a timestamped backup, then link.
    ///
    /// Returns the backup path. `now` is the Unix-seconds timestamp used for
    /// the backup name; a counter suffix disambiguates same-second reruns.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename or the symlink creation fails.
    pub fn apply_with_backup(&self, now: u64) -> Result<PathBuf> {
        let backup = backup_destination(&self.target, now);
        std::fs::rename(&self.target, &backup).with_context(|| {
            format!(
                "backing up {} to {}",
                self.target.display(),
                backup.display()
            )
        })?;
        create_symlink(&self.source, &self.target)
            .with_context(|| format!("create link: {}", self.target.display()))?;
        Ok(backup)
    }
}

impl Applicable for LinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    /// Create the symlink at a currently-unoccupied target.
    ///
    /// Refuses to touch an existing target; callers must go through
    /// [`LinkResource::apply_with_backup`] for that case so nothing is ever
    /// silently overwritten.
    fn apply(&self) -> Result<ResourceChange> {
        if self.target.symlink_metadata().is_ok() {
            bail!(
                "refusing to replace {} without a backup",
                self.target.display()
            );
        }

        ensure_parent_dir(&self.target)?;
        create_symlink(&self.source, &self.target)
            .with_context(|| format!("create link: {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for LinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        match std::fs::read_link(&self.target) {
            Ok(existing) => {
                if existing == self.source {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Incorrect {
                        current: format!("points to {}", existing.display()),
                    })
                }
            }
            Err(_) => match self.target.symlink_metadata() {
                Ok(meta) if meta.is_dir() => Ok(ResourceState::Incorrect {
                    current: "existing directory".to_string(),
                }),
                Ok(_) => Ok(ResourceState::Incorrect {
                    current: "existing file".to_string(),
                }),
                Err(_) => Ok(ResourceState::Missing),
            },
        }
    }
}

/// Compute a backup path for `target` that does not exist yet.
///
/// The base name is `<target>.bak.<now>`; when that path is already taken
/// (rerun within the same second) a `-N` counter is appended until a free
/// name is found, so every backup of a run is unique.
#[must_use]
pub fn backup_destination(target: &Path, now: u64) -> PathBuf {
    let base = append_suffix(target, &format!(".bak.{now}"));
    if base.symlink_metadata().is_err() {
        return base;
    }
    let mut counter = 1u32;
    loop {
        let candidate = append_suffix(target, &format!(".bak.{now}-{counter}"));
        if candidate.symlink_metadata().is_err() {
            return candidate;
        }
        counter += 1;
    }
}

/// Append `suffix` to the final path component.
fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map_or_else(
        || std::ffi::OsString::from("backup"),
        std::ffi::OsStr::to_os_string,
    );
    name.push(suffix);
    path.with_file_name(name)
}

/// Create the parent directory of `path` if it does not exist.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `source`.
fn create_symlink(source: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(source, link).with_context(|| {
        format!(
            "creating symlink {} -> {}",
            link.display(),
            source.display()
        )
    })?;
    Ok(())
}
