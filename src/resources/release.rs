//! GitHub release binary resource.
//!
//! Looks up the latest release of a repository, downloads the asset built
//! for the host platform, verifies it against the release's published
//! checksums when available, and places the binary in the user's bin
//! directory. Downloads are staged to a `.new` sibling and renamed into
//! place so an interrupted transfer never leaves a corrupt binary.

use anyhow::{Context as _, Result, bail};
use sha2::{Digest, Sha256};
use std::io::Read as _;
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::ResourceError;
use crate::net::Fetcher;
use crate::net::github::{self, Asset, Release};
use crate::platform::Platform;

/// A binary installed from the latest GitHub release of a repository.
pub struct ReleaseBinary<'a> {
    /// Binary filename placed in `bin_dir` (also used to find it in archives).
    pub bin: String,
    /// `owner/name` repository.
    pub repo: String,
    /// Exact asset name override; auto-detected per platform when absent.
    pub asset: Option<String>,
    /// Destination directory, conventionally `$HOME/.local/bin`.
    pub bin_dir: PathBuf,
    platform: &'a Platform,
    fetcher: &'a dyn Fetcher,
}

impl std::fmt::Debug for ReleaseBinary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseBinary")
            .field("bin", &self.bin)
            .field("repo", &self.repo)
            .field("asset", &self.asset)
            .field("bin_dir", &self.bin_dir)
            .finish_non_exhaustive()
    }
}

impl<'a> ReleaseBinary<'a> {
    /// Create a new release binary resource.
    #[must_use]
    pub const fn new(
        bin: String,
        repo: String,
        asset: Option<String>,
        bin_dir: PathBuf,
        platform: &'a Platform,
        fetcher: &'a dyn Fetcher,
    ) -> Self {
        Self {
            bin,
            repo,
            asset,
            bin_dir,
            platform,
            fetcher,
        }
    }

    fn dest(&self) -> PathBuf {
        self.bin_dir.join(&self.bin)
    }
}

impl Applicable for ReleaseBinary<'_> {
    fn description(&self) -> String {
        format!("{} (github:{})", self.bin, self.repo)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let release = github::latest_release(self.fetcher, &self.repo)
            .with_context(|| format!("looking up latest release of {}", self.repo))?;

        let asset = github::pick_asset(&release, self.platform, self.asset.as_deref())
            .ok_or_else(|| ResourceError::AssetNotFound {
                repo: self.repo.clone(),
                tag: release.tag_name.clone(),
            })?;

        tracing::debug!("downloading {} {}", asset.name, release.tag_name);
        let data = self
            .fetcher
            .get_bytes(&asset.browser_download_url)
            .with_context(|| format!("downloading {}", asset.name))?;

        verify_checksum(self.fetcher, &release, asset, &data)?;

        let payload = match ArchiveType::detect(&asset.name) {
            ArchiveType::TarGz => extract_binary_from_tar_gz(&data, &self.bin)
                .with_context(|| format!("extracting {} from {}", self.bin, asset.name))?,
            ArchiveType::Raw => data,
            ArchiveType::Unsupported => {
                bail!("unsupported archive format: {}", asset.name)
            }
        };

        std::fs::create_dir_all(&self.bin_dir)
            .with_context(|| format!("create bin dir: {}", self.bin_dir.display()))?;

        let staged = self.bin_dir.join(format!("{}.new", self.bin));
        std::fs::write(&staged, &payload)
            .with_context(|| format!("staging {}", staged.display()))?;
        make_executable(&staged)?;
        std::fs::rename(&staged, self.dest())
            .with_context(|| format!("installing {}", self.dest().display()))?;

        Ok(ResourceChange::Applied)
    }
}

impl Resource for ReleaseBinary<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.dest().is_file() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}

/// Release asset container formats the resource understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveType {
    TarGz,
    Raw,
    Unsupported,
}

impl ArchiveType {
    fn detect(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Self::TarGz
        } else if lower.ends_with(".zip")
            || lower.ends_with(".tar.xz")
            || lower.ends_with(".tar.bz2")
        {
            Self::Unsupported
        } else {
            Self::Raw
        }
    }
}

/// Pull the named binary out of a gzipped tarball.
///
/// Falls back to the archive's single regular file when no entry matches
/// `bin` by filename.
fn extract_binary_from_tar_gz(data: &[u8], bin: &str) -> Result<Vec<u8>> {
    let decoder = flate2::read::GzDecoder::new(std::io::Cursor::new(data));
    let mut archive = tar::Archive::new(decoder);

    let mut files: Vec<(PathBuf, Vec<u8>)> = Vec::new();
    for entry in archive.entries().context("reading archive entries")? {
        let mut entry = entry.context("reading archive entry")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path().context("reading entry path")?.to_path_buf();
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .with_context(|| format!("reading entry {}", path.display()))?;
        files.push((path, content));
    }

    if let Some((_, content)) = files
        .iter()
        .find(|(path, _)| path.file_name().is_some_and(|name| name == bin))
    {
        return Ok(content.clone());
    }
    if files.len() == 1 {
        if let Some((_, content)) = files.into_iter().next() {
            return Ok(content);
        }
    }
    bail!("archive does not contain a file named '{bin}'")
}

/// Verify `data` against the release's published checksums file.
///
/// Verification is skipped (with a log message) when the release publishes
/// no checksums, the checksums cannot be downloaded, or the file has no
/// entry for this asset. A present-but-mismatching entry is an error.
fn verify_checksum(
    fetcher: &dyn Fetcher,
    release: &Release,
    asset: &Asset,
    data: &[u8],
) -> Result<()> {
    let Some(sums) = github::checksum_asset(release) else {
        tracing::debug!("no checksums published for {}", release.tag_name);
        return Ok(());
    };

    let text = match fetcher.get_text(&sums.browser_download_url) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("could not download checksums; skipping verification: {e:#}");
            return Ok(());
        }
    };

    let Some(expected) = text
        .lines()
        .find(|line| line.contains(&asset.name))
        .and_then(|line| line.split_whitespace().next())
    else {
        tracing::debug!("no checksum entry for {}", asset.name);
        return Ok(());
    };

    let actual = sha256_hex(data);
    if !expected.eq_ignore_ascii_case(&actual) {
        return Err(ResourceError::ChecksumMismatch {
            asset: asset.name.clone(),
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    Ok(())
}

/// Compute the lowercase hex SHA-256 digest of `data`.
fn sha256_hex(data: &[u8]) -> String {
    use std::fmt::Write as _;

    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for byte in &digest {
        // write! to a String is infallible; unwrap_or(()) makes that explicit.
        write!(hex, "{byte:02x}").unwrap_or(());
    }
    hex
}

/// Set the executable bits on a freshly staged binary.
fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let meta = std::fs::metadata(path)
            .with_context(|| format!("reading metadata: {}", path.display()))?;
        let mut perms = meta.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("setting permissions: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Fetcher stub answering from fixed url → body tables.
    #[derive(Debug, Default)]
    struct ScriptedFetcher {
        texts: HashMap<String, String>,
        bytes: HashMap<String, Vec<u8>>,
    }

    impl ScriptedFetcher {
        fn with_text(mut self, url: &str, body: &str) -> Self {
            self.texts.insert(url.to_string(), body.to_string());
            self
        }

        fn with_bytes(mut self, url: &str, body: Vec<u8>) -> Self {
            self.bytes.insert(url.to_string(), body);
            self
        }
    }

    impl Fetcher for ScriptedFetcher {
        fn get_text(&self, url: &str) -> Result<String> {
            self.texts
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no scripted text for {url}"))
        }

        fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.bytes
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no scripted bytes for {url}"))
        }
    }

    const API_URL: &str = "https://api.github.com/repos/owner/tool/releases/latest";

    fn release_json(assets: &str) -> String {
        format!(r#"{{"tag_name": "v1.0.0", "assets": [{assets}]}}"#)
    }

    fn linux_platform() -> Platform {
        Platform::from_parts("linux", "x86_64").expect("linux/x86_64 is supported")
    }

    fn tar_gz_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let gz = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        let mut builder = tar::Builder::new(gz);
        for (path, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn current_state_correct_when_binary_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tool"), b"binary").unwrap();
        let platform = linux_platform();
        let fetcher = ScriptedFetcher::default();
        let resource = ReleaseBinary::new(
            "tool".to_string(),
            "owner/tool".to_string(),
            None,
            dir.path().to_path_buf(),
            &platform,
            &fetcher,
        );
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn current_state_missing_when_binary_absent() {
        let dir = tempfile::tempdir().unwrap();
        let platform = linux_platform();
        let fetcher = ScriptedFetcher::default();
        let resource = ReleaseBinary::new(
            "tool".to_string(),
            "owner/tool".to_string(),
            None,
            dir.path().to_path_buf(),
            &platform,
            &fetcher,
        );
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn apply_installs_raw_asset() {
        let dir = tempfile::tempdir().unwrap();
        let platform = linux_platform();
        let fetcher = ScriptedFetcher::default()
            .with_text(
                API_URL,
                &release_json(
                    r#"{"name": "tool-linux-x86_64", "browser_download_url": "https://dl/tool"}"#,
                ),
            )
            .with_bytes("https://dl/tool", b"#!binary".to_vec());

        let resource = ReleaseBinary::new(
            "tool".to_string(),
            "owner/tool".to_string(),
            None,
            dir.path().to_path_buf(),
            &platform,
            &fetcher,
        );
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);

        let dest = dir.path().join("tool");
        assert_eq!(std::fs::read(&dest).unwrap(), b"#!binary");
        assert!(
            !dir.path().join("tool.new").exists(),
            "staging file should be renamed away"
        );
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&dest).unwrap().permissions().mode();
            assert!(mode & 0o100 != 0, "binary should have executable bit set");
        }
    }

    #[test]
    fn apply_extracts_tar_gz_asset() {
        let dir = tempfile::tempdir().unwrap();
        let platform = linux_platform();
        let archive = tar_gz_with(&[
            ("tool-1.0.0/README.md", b"docs".as_slice()),
            ("tool-1.0.0/tool", b"#!elf".as_slice()),
        ]);
        let fetcher = ScriptedFetcher::default()
            .with_text(
                API_URL,
                &release_json(
                    r#"{"name": "tool-x86_64-unknown-linux-gnu.tar.gz", "browser_download_url": "https://dl/tool.tar.gz"}"#,
                ),
            )
            .with_bytes("https://dl/tool.tar.gz", archive);

        let resource = ReleaseBinary::new(
            "tool".to_string(),
            "owner/tool".to_string(),
            None,
            dir.path().to_path_buf(),
            &platform,
            &fetcher,
        );
        resource.apply().unwrap();
        assert_eq!(std::fs::read(dir.path().join("tool")).unwrap(), b"#!elf");
    }

    #[test]
    fn apply_verifies_published_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let platform = linux_platform();
        let payload = b"#!binary".to_vec();
        let digest = sha256_hex(&payload);
        let fetcher = ScriptedFetcher::default()
            .with_text(
                API_URL,
                &release_json(
                    r#"{"name": "tool-linux-x86_64", "browser_download_url": "https://dl/tool"},
                       {"name": "checksums.sha256", "browser_download_url": "https://dl/sums"}"#,
                ),
            )
            .with_text(
                "https://dl/sums",
                &format!("{digest}  tool-linux-x86_64\n"),
            )
            .with_bytes("https://dl/tool", payload);

        let resource = ReleaseBinary::new(
            "tool".to_string(),
            "owner/tool".to_string(),
            None,
            dir.path().to_path_buf(),
            &platform,
            &fetcher,
        );
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
    }

    #[test]
    fn apply_rejects_checksum_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let platform = linux_platform();
        let fetcher = ScriptedFetcher::default()
            .with_text(
                API_URL,
                &release_json(
                    r#"{"name": "tool-linux-x86_64", "browser_download_url": "https://dl/tool"},
                       {"name": "checksums.sha256", "browser_download_url": "https://dl/sums"}"#,
                ),
            )
            .with_text(
                "https://dl/sums",
                &format!("{}  tool-linux-x86_64\n", "a".repeat(64)),
            )
            .with_bytes("https://dl/tool", b"#!binary".to_vec());

        let resource = ReleaseBinary::new(
            "tool".to_string(),
            "owner/tool".to_string(),
            None,
            dir.path().to_path_buf(),
            &platform,
            &fetcher,
        );
        let err = resource.apply().unwrap_err();
        assert!(
            err.to_string().contains("Checksum mismatch"),
            "expected checksum error, got: {err:#}"
        );
        assert!(
            !dir.path().join("tool").exists(),
            "binary must not be installed on checksum failure"
        );
    }

    #[test]
    fn apply_fails_when_no_asset_matches() {
        let dir = tempfile::tempdir().unwrap();
        let platform = linux_platform();
        let fetcher = ScriptedFetcher::default().with_text(
            API_URL,
            &release_json(
                r#"{"name": "tool-windows-x64.zip", "browser_download_url": "https://dl/win"}"#,
            ),
        );

        let resource = ReleaseBinary::new(
            "tool".to_string(),
            "owner/tool".to_string(),
            None,
            dir.path().to_path_buf(),
            &platform,
            &fetcher,
        );
        let err = resource.apply().unwrap_err();
        assert!(
            err.to_string().contains("No release asset"),
            "expected asset error, got: {err:#}"
        );
    }

    #[test]
    fn extract_finds_binary_by_name() {
        let archive = tar_gz_with(&[
            ("pkg/doc.txt", b"doc".as_slice()),
            ("pkg/bin/tool", b"#!elf".as_slice()),
        ]);
        let content = extract_binary_from_tar_gz(&archive, "tool").unwrap();
        assert_eq!(content, b"#!elf");
    }

    #[test]
    fn extract_falls_back_to_single_file() {
        let archive = tar_gz_with(&[("something-else", b"#!elf".as_slice())]);
        let content = extract_binary_from_tar_gz(&archive, "tool").unwrap();
        assert_eq!(content, b"#!elf");
    }

    #[test]
    fn extract_fails_on_ambiguous_archive() {
        let archive = tar_gz_with(&[
            ("a", b"aa".as_slice()),
            ("b", b"bb".as_slice()),
        ]);
        assert!(extract_binary_from_tar_gz(&archive, "tool").is_err());
    }

    #[test]
    fn archive_type_detection() {
        assert_eq!(ArchiveType::detect("tool.tar.gz"), ArchiveType::TarGz);
        assert_eq!(ArchiveType::detect("tool.TGZ"), ArchiveType::TarGz);
        assert_eq!(ArchiveType::detect("tool.zip"), ArchiveType::Unsupported);
        assert_eq!(ArchiveType::detect("tool.tar.xz"), ArchiveType::Unsupported);
        assert_eq!(ArchiveType::detect("tool"), ArchiveType::Raw);
    }

    #[test]
    fn sha256_known_value() {
        // SHA-256 of the empty input.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_known_content() {
        // echo -n "hello world" | sha256sum
        assert_eq!(
            sha256_hex(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
