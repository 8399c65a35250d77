//! GitHub releases API: latest-tag lookup and asset selection.

use anyhow::{Context as _, Result};
use serde::Deserialize;

use super::Fetcher;
use crate::platform::Platform;

/// A GitHub release as returned by the releases API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A downloadable asset attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub browser_download_url: String,
}

/// Fetch the latest release of `repo` (an `owner/name` pair).
///
/// # Errors
///
/// Returns an error if the API request fails or the response is not a
/// release document.
pub fn latest_release(fetcher: &dyn Fetcher, repo: &str) -> Result<Release> {
    let url = format!("https://api.github.com/repos/{repo}/releases/latest");
    let body = fetcher.get_text(&url)?;
    serde_json::from_str(&body).with_context(|| format!("parsing release metadata for {repo}"))
}

/// Select the release asset to download.
///
/// With an explicit `override_name` the asset is matched by exact name.
/// Otherwise the first asset whose name targets `platform` wins, ignoring
/// checksum/signature companions.
pub fn pick_asset<'r>(
    release: &'r Release,
    platform: &Platform,
    override_name: Option<&str>,
) -> Option<&'r Asset> {
    if let Some(name) = override_name {
        return release.assets.iter().find(|a| a.name == name);
    }
    release
        .assets
        .iter()
        .filter(|a| !is_metadata_asset(&a.name))
        .find(|a| platform.matches_asset(&a.name))
}

/// Find the release's published checksums file, if any.
pub fn checksum_asset(release: &Release) -> Option<&Asset> {
    release.assets.iter().find(|a| {
        let name = a.name.to_lowercase();
        name.contains("checksums") || name.ends_with(".sha256") || name.ends_with(".sha256sum")
    })
}

/// Companion files that are never the binary itself.
fn is_metadata_asset(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("checksums")
        || [
            ".sha256",
            ".sha256sum",
            ".sig",
            ".asc",
            ".pem",
            ".sbom",
            ".txt",
            ".json",
        ]
        .iter()
        .any(|ext| name.ends_with(ext))
}
