// src/filename.rs

//! Artifact filename parsing
//!
//! Guesses a package name and version from a release asset filename.
//! Wheel filenames follow a fixed grammar and are parsed exactly; anything
//! else goes through a best-effort dash-splitting heuristic inherited from
//! the indexes this tool replaces.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Wheel filename grammar: name-version[-build]-python-abi-platform.whl
static WHEEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[^-]+)-(?P<version>\d+[^-]*)(?:-(?P<build>\d+[^-]*))?-(?P<python>\w+\d+(?:\.\w+\d+)*)-(?P<abi>\w+)-(?P<platform>\w+(?:\.\w+)*)\.whl$",
    )
    .unwrap()
});

/// Strip the trailing extension from an artifact filename, whatever it is.
/// A stem still ending in `.tar` loses that too, so `pkg.tar.gz`,
/// `pkg.tar.bz2` and `pkg.tar.xz` all resolve to `pkg`. Returns `None`
/// when the filename has no extension at all.
pub fn strip_extension(filename: &str) -> Option<&str> {
    let (stem, _) = filename.rsplit_once('.')?;
    Some(stem.strip_suffix(".tar").unwrap_or(stem))
}

/// Split a bare stem into name and version on dashes.
///
/// With two or more dashes, every part containing both a dot and a digit
/// re-splits the stem at that part, scanning right to left with no early
/// exit; the final winner is therefore the leftmost such part, and the
/// first part is never consumed. Platform-suffixed legacy names come out
/// wrong on purpose: published indexes already depend on these splits.
fn split_stem(stem: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = stem.split('-').collect();
    match parts.len() {
        1 => (stem.to_string(), None),
        2 => (parts[0].to_string(), Some(parts[1].to_string())),
        _ => {
            let mut name = stem.to_string();
            let mut version = None;
            for i in (1..parts.len()).rev() {
                let part = parts[i];
                if part.contains('.') && part.chars().any(|c| c.is_ascii_digit()) {
                    name = parts[..i].join("-");
                    version = Some(parts[i..].join("-"));
                }
            }
            (name, version)
        }
    }
}

/// Guess the package name and version encoded in an asset filename
///
/// Wheels that do not match the wheel grammar are rejected outright; for
/// other files the version may come back `None` when the stem carries no
/// recognizable one.
pub fn guess_name_version(filename: &str) -> Result<(String, Option<String>)> {
    let (name, version) = if filename.ends_with(".whl") {
        let caps = WHEEL_RE
            .captures(filename)
            .ok_or_else(|| Error::InvalidFilename(filename.to_string()))?;
        (caps["name"].to_string(), Some(caps["version"].to_string()))
    } else {
        let stem = strip_extension(filename)
            .ok_or_else(|| Error::InvalidFilename(filename.to_string()))?;
        split_stem(stem)
    };

    if name.is_empty() {
        return Err(Error::InvalidFilename(filename.to_string()));
    }
    Ok((name, version))
}
