// src/artifacts.rs

//! Checksum reconciliation for release assets
//!
//! A release may ship a `sha256sum.txt` manifest next to its payloads.
//! Digests listed there are trusted verbatim, so covered payloads are
//! never downloaded; payloads the manifest misses are streamed through
//! SHA-256 instead. Assets with unrecognized extensions are ignored.

use crate::error::{Error, Result};
use crate::package::Artifact;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Manifest asset name, as produced by `sha256sum * > sha256sum.txt`
const MANIFEST_FILENAME: &str = "sha256sum.txt";

/// Asset name suffixes treated as index payloads
const PAYLOAD_EXTENSIONS: [&str; 3] = [".whl", ".gz", ".bz2"];

/// A release asset descriptor from the GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    pub updated_at: DateTime<Utc>,
    pub uploader: Uploader,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Uploader {
    pub login: String,
}

/// Fetches asset content over HTTP
///
/// The two methods match the two ways assets are consumed: manifests are
/// small text files read in full, payloads are only ever streamed into a
/// digest.
pub trait AssetFetcher {
    /// Fetch a small text asset
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Stream an asset body and return its hex SHA-256 digest
    fn fetch_sha256(&self, url: &str) -> Result<String>;
}

/// Parse a checksum manifest: whitespace-separated `<digest> <filename>`
/// lines, blank lines allowed. Extra fields on a line are ignored; a line
/// with fewer than two fields stops the run.
fn parse_manifest(text: &str) -> Result<HashMap<String, String>> {
    let mut digests = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(digest), Some(filename)) = (fields.next(), fields.next()) else {
            return Err(Error::ParseError(format!(
                "Malformed checksum manifest line: {:?}",
                line
            )));
        };
        digests.insert(filename.to_string(), digest.to_string());
    }
    Ok(digests)
}

/// Resolve one release's assets into artifacts with digests
///
/// Payload order is preserved. Manifest or payload fetch failures abort
/// the run; there is nothing sensible to publish for a release whose
/// digests cannot be resolved.
pub fn create_artifacts<F: AssetFetcher>(
    fetcher: &F,
    assets: &[ReleaseAsset],
) -> Result<Vec<Artifact>> {
    let mut manifest: HashMap<String, String> = HashMap::new();
    let mut payloads: Vec<&ReleaseAsset> = Vec::new();

    for asset in assets {
        if asset.name == MANIFEST_FILENAME {
            let text = fetcher.fetch_text(&asset.browser_download_url)?;
            manifest = parse_manifest(&text)?;
        } else if PAYLOAD_EXTENSIONS.iter().any(|ext| asset.name.ends_with(ext)) {
            payloads.push(asset);
        } else {
            debug!("Ignoring asset: {}", asset.name);
        }
    }

    let mut artifacts = Vec::with_capacity(payloads.len());
    for asset in payloads {
        let sha256 = match manifest.get(&asset.name) {
            Some(digest) => digest.clone(),
            None => {
                debug!("Hashing {} (not covered by manifest)", asset.name);
                fetcher.fetch_sha256(&asset.browser_download_url)?
            }
        };
        artifacts.push(Artifact {
            filename: asset.name.clone(),
            url: asset.browser_download_url.clone(),
            sha256,
            uploaded_at: asset.updated_at,
            uploaded_by: asset.uploader.login.clone(),
        });
    }
    Ok(artifacts)
}
