use std::fmt;

use crate::error::PlatformError;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::MacOs => write!(f, "macos"),
        }
    }
}

/// Detected CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86_64 => write!(f, "x86_64"),
            Arch::Aarch64 => write!(f, "aarch64"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Detect the current platform.
    ///
    /// # Errors
    ///
    /// Returns an error when the host OS or architecture is not one the
    /// engine can provision. This is checked before any filesystem mutation.
    pub fn detect() -> Result<Self, PlatformError> {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Build a platform from raw OS/arch identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::UnsupportedOs`] or
    /// [`PlatformError::UnsupportedArch`] for identifiers outside the
    /// supported set.
    pub fn from_parts(os: &str, arch: &str) -> Result<Self, PlatformError> {
        let os = match os {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            other => return Err(PlatformError::UnsupportedOs(other.to_string())),
        };
        let arch = match arch {
            "x86_64" => Arch::X86_64,
            "aarch64" => Arch::Aarch64,
            other => return Err(PlatformError::UnsupportedArch(other.to_string())),
        };
        Ok(Self { os, arch })
    }

    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Substrings that identify a release asset built for this platform.
    fn asset_patterns(&self) -> &'static [&'static str] {
        match (self.os, self.arch) {
            (Os::Linux, Arch::X86_64) => &[
                "linux_x86_64",
                "linux-x86_64",
                "linux-x64",
                "linux-amd64",
                "linux_amd64",
                "x86_64-linux",
                "x86_64-unknown-linux-gnu",
                "x86_64-unknown-linux-musl",
            ],
            (Os::Linux, Arch::Aarch64) => &[
                "linux_arm64",
                "linux-arm64",
                "linux-aarch64",
                "linux_aarch64",
                "aarch64-linux",
                "aarch64-unknown-linux-gnu",
                "aarch64-unknown-linux-musl",
            ],
            (Os::MacOs, Arch::X86_64) => &[
                "darwin_x86_64",
                "darwin-x86_64",
                "darwin-x64",
                "darwin-amd64",
                "macos-x64",
                "macos-x86_64",
                "x86_64-apple-darwin",
                "osx-x64",
            ],
            (Os::MacOs, Arch::Aarch64) => &[
                "darwin_arm64",
                "darwin-arm64",
                "macos-arm64",
                "aarch64-apple-darwin",
                "apple-silicon",
            ],
        }
    }

    /// Check whether a release asset name targets this platform.
    ///
    /// Matching is case-insensitive substring containment against the
    /// platform's known naming conventions.
    pub fn matches_asset(&self, asset_name: &str) -> bool {
        let asset_name = asset_name.to_lowercase();
        self.asset_patterns()
            .iter()
            .any(|pattern| asset_name.contains(pattern))
    }
}
