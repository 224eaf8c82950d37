// src/index.rs

//! Sorted package listings and the legacy JSON API documents
//!
//! `sort_packages` turns the accumulated name-to-set mapping into a
//! deterministic listing; `get_package_json` builds the per-project
//! document served at `pypi/{name}/json`.

use crate::package::Package;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Per-project document of the legacy JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageJson {
    pub info: PackageInfo,
    pub releases: BTreeMap<String, Vec<ReleaseFile>>,
    pub urls: Vec<ReleaseFile>,
}

/// Name and latest version of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
}

/// One downloadable file of a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFile {
    pub filename: String,
    pub url: String,
    pub digests: Digests,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digests {
    pub sha256: String,
}

/// Sort each package group once and key the result deterministically
pub fn sort_packages(
    packages: HashMap<String, HashSet<Package>>,
) -> BTreeMap<String, Vec<Package>> {
    packages
        .into_iter()
        .map(|(name, files)| {
            let mut files: Vec<Package> = files.into_iter().collect();
            files.sort();
            (name, files)
        })
        .collect()
}

/// Build the JSON API document for one project
///
/// `files` must already be sorted; the last element is the latest
/// version, and `urls` lists that version's files. Returns `None` for an
/// empty slice.
pub fn get_package_json(files: &[Package]) -> Option<PackageJson> {
    let latest = files.last()?;

    let mut releases: BTreeMap<String, Vec<ReleaseFile>> = BTreeMap::new();
    for package in files {
        releases
            .entry(package.version.to_string())
            .or_default()
            .push(release_file(package));
    }

    Some(PackageJson {
        info: PackageInfo {
            name: latest.name.clone(),
            version: latest.version.to_string(),
        },
        urls: releases[&latest.version.to_string()].clone(),
        releases,
    })
}

fn release_file(package: &Package) -> ReleaseFile {
    ReleaseFile {
        filename: package.filename.clone(),
        url: package.url.clone(),
        digests: Digests {
            sha256: package.sha256.clone(),
        },
    }
}
