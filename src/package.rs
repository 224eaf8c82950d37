// src/package.rs

//! Package records and grouping
//!
//! An `Artifact` is a release asset with a resolved digest; a `Package` is
//! an artifact that parsed cleanly into a canonical project name and a
//! version. Packages are value types: equality and hashing are structural
//! so a `HashSet` deduplicates re-discovered assets.

use crate::error::{Error, Result};
use crate::filename;
use crate::version::PackageVersion;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// Characters that survive URL paths and hrefs untouched
static SAFE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.+-]+$").unwrap());

static NAME_SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// A GitHub repository in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A release asset with its download URL and resolved SHA-256 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Artifact {
    pub filename: String,
    pub url: String,
    pub sha256: String,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
}

/// An artifact that parsed into a canonical project name and a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    pub name: String,
    pub version: PackageVersion,
    pub filename: String,
    pub url: String,
    pub sha256: String,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
}

impl Ord for Package {
    fn cmp(&self, other: &Self) -> Ordering {
        // The reversed-filename tie-break keeps files with the same
        // extension adjacent when name and version are equal, so wheels
        // and tarballs of one release list together.
        self.name
            .cmp(&other.name)
            .then_with(|| self.version.cmp(&other.version))
            .then_with(|| self.filename.bytes().rev().cmp(other.filename.bytes().rev()))
    }
}

impl PartialOrd for Package {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.version,
            self.uploaded_at.format("%Y-%m-%d %H:%M:%S"),
            self.uploaded_by
        )
    }
}

/// Canonical project name: separator runs collapse to `-`, lowercased
pub fn canonicalize_name(name: &str) -> String {
    NAME_SEPARATORS_RE.replace_all(name, "-").to_lowercase()
}

/// Build a `Package` from an artifact
///
/// The filename is checked for URL safety before any parsing; artifacts
/// whose name cannot be guessed fail with an invalid-filename error. An
/// artifact without a version gets `"0"`.
pub fn create_package(artifact: Artifact) -> Result<Package> {
    if !SAFE_FILENAME_RE.is_match(&artifact.filename) || artifact.filename.contains("..") {
        return Err(Error::UnsafeFilename(artifact.filename));
    }

    let (name, version) = filename::guess_name_version(&artifact.filename)?;
    Ok(Package {
        name: canonicalize_name(&name),
        version: PackageVersion::parse(version.as_deref().unwrap_or("0")),
        filename: artifact.filename,
        url: artifact.url,
        sha256: artifact.sha256,
        uploaded_at: artifact.uploaded_at,
        uploaded_by: artifact.uploaded_by,
    })
}

/// Group artifacts into packages by canonical name
///
/// Artifacts with invalid or unsafe filenames are logged and skipped;
/// one bad asset never aborts the batch.
pub fn create_packages(
    artifacts: impl IntoIterator<Item = Artifact>,
) -> HashMap<String, HashSet<Package>> {
    let mut packages: HashMap<String, HashSet<Package>> = HashMap::new();
    for artifact in artifacts {
        match create_package(artifact) {
            Ok(package) => {
                packages
                    .entry(package.name.clone())
                    .or_default()
                    .insert(package);
            }
            Err(e) => warn!("Skipping artifact: {}", e),
        }
    }
    packages
}
