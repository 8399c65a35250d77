//! Domain-specific error types for the bootstrap engine.
//!
//! Internal modules return typed errors ([`ConfigError`], [`PlatformError`],
//! [`ResourceError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.

use thiserror::Error;

/// Errors that arise from platform detection.
///
/// These are the only fatal errors in the engine: the run aborts before any
/// filesystem mutation when the host platform cannot be provisioned.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The host operating system is not supported.
    #[error("Unsupported operating system '{0}': must be linux or macos")]
    UnsupportedOs(String),

    /// The host CPU architecture is not supported.
    #[error("Unsupported architecture '{0}': must be x86_64 or aarch64")]
    UnsupportedArch(String),
}

/// Errors that arise from manifest loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A tool entry declares no install action.
    #[error("Tool '{tool}' has no action: set one of package, repo, or script")]
    MissingAction {
        /// Name of the offending tool entry.
        tool: String,
    },

    /// A tool entry declares more than one install action.
    #[error("Tool '{tool}' has multiple actions: set only one of package, repo, or script")]
    AmbiguousAction {
        /// Name of the offending tool entry.
        tool: String,
    },

    /// The TOML file contains a syntax error that prevents parsing.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax { file: String, message: String },

    /// An I/O error occurred while reading a manifest file.
    #[error("IO error reading manifest {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from resource operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No release asset matched the host platform.
    #[error("No release asset for this platform in {repo} {tag}")]
    AssetNotFound {
        /// GitHub `owner/repo` the release belongs to.
        repo: String,
        /// Release tag that was inspected.
        tag: String,
    },

    /// A downloaded asset did not match its published checksum.
    #[error("Checksum mismatch for {asset}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Name of the downloaded asset.
        asset: String,
        /// Digest published in the release's checksums file.
        expected: String,
        /// Digest computed from the downloaded bytes.
        actual: String,
    },
}
