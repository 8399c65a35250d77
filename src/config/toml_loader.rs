//! Shared TOML manifest loading.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Parse the TOML file at `path` into `T`.
///
/// A missing file yields `None` so callers can fall back to an empty
/// manifest section; any other I/O or syntax problem is an error.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file exists but cannot be read and
/// [`ConfigError::InvalidSyntax`] when it does not parse.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::InvalidSyntax {
            file: path.display().to_string(),
            message: e.to_string(),
        })
}
