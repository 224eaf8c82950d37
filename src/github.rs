// src/github.rs

//! GitHub API client
//!
//! Wraps reqwest with the headers GitHub wants, lists releases one page
//! at a time, and fetches release assets. Connection failures are
//! retried; an HTTP error status is returned immediately.

use crate::artifacts::{AssetFetcher, ReleaseAsset};
use crate::error::{Error, Result};
use crate::package::Repository;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::VecDeque;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, warn};

/// GitHub REST API endpoint
const GITHUB_API: &str = "https://api.github.com";

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum retry attempts for failed requests
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds
const RETRY_DELAY_MS: u64 = 1000;

/// Buffer size for streaming downloads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// Releases fetched per API page
const RELEASES_PER_PAGE: usize = 100;

/// One release from the GitHub API, reduced to what the index needs
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// HTTP client wrapper for the GitHub API
pub struct GithubClient {
    client: Client,
    api_base: String,
    max_retries: u32,
}

impl GithubClient {
    /// Create a new client authenticating with the given token
    pub fn new(token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::InitError(format!("Token is not a valid header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("ghpypi/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: GITHUB_API.to_string(),
            max_retries: MAX_RETRIES,
        })
    }

    /// Iterate over all releases of a repository, fetching pages on demand
    pub fn releases<'a>(&'a self, repository: &'a Repository) -> ReleasePages<'a> {
        ReleasePages {
            client: self,
            repository,
            page: 0,
            buffered: VecDeque::new(),
            done: false,
        }
    }

    /// Fetch one page of releases with retry support
    fn fetch_release_page(&self, repository: &Repository, page: u32) -> Result<Vec<Release>> {
        let url = format!(
            "{}/repos/{}/releases?per_page={}&page={}",
            self.api_base, repository, RELEASES_PER_PAGE, page
        );
        debug!("Fetching {}", url);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(&url).send() {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(Error::DownloadError(format!(
                            "HTTP {} from {}",
                            response.status(),
                            url
                        )));
                    }

                    return response.json().map_err(|e| {
                        Error::DownloadError(format!("Failed to parse release JSON: {e}"))
                    });
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(Error::DownloadError(format!(
                            "Failed to fetch releases after {attempt} attempts: {e}"
                        )));
                    }
                    warn!("Release fetch attempt {} failed: {}, retrying...", attempt, e);
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
                }
            }
        }
    }
}

impl AssetFetcher for GithubClient {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::DownloadError(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .map_err(|e| Error::DownloadError(format!("Failed to read response: {}", e)))
    }

    /// Stream the asset body through SHA-256 in fixed-size chunks, never
    /// buffering the whole response in memory
    fn fetch_sha256(&self, url: &str) -> Result<String> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::DownloadError(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let mut hasher = Sha256::new();
        let mut buffer = [0u8; STREAM_BUFFER_SIZE];
        loop {
            let bytes_read = response
                .read(&mut buffer)
                .map_err(|e| Error::IoError(format!("Failed to read response: {e}")))?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hex::encode(hasher.finalize()))
    }
}

/// Lazy iterator over a repository's releases
///
/// The pipeline walks releases one page at a time, so a repository with
/// thousands of releases never gets materialized as one list.
pub struct ReleasePages<'a> {
    client: &'a GithubClient,
    repository: &'a Repository,
    page: u32,
    buffered: VecDeque<Release>,
    done: bool,
}

impl Iterator for ReleasePages<'_> {
    type Item = Result<Release>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(release) = self.buffered.pop_front() {
                return Some(Ok(release));
            }
            if self.done {
                return None;
            }

            self.page += 1;
            match self.client.fetch_release_page(self.repository, self.page) {
                Ok(releases) => {
                    // A short page is the last one
                    if releases.len() < RELEASES_PER_PAGE {
                        self.done = true;
                    }
                    self.buffered.extend(releases);
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
