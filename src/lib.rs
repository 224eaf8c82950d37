// src/lib.rs

//! ghpypi
//!
//! Static PyPI-compatible package index generator fed by GitHub release
//! assets. Scans the releases of configured repositories, reconciles
//! SHA-256 digests from checksum manifests, and renders a PEP 503
//! "simple" index plus per-project JSON documents.
//!
//! # Architecture
//!
//! - Pure parsing core: filenames, versions, and repository lists parse
//!   without touching the network
//! - Lazy release listing: GitHub API pages are fetched as they are consumed
//! - Digest reconciliation: checksum manifests are trusted, uncovered
//!   payloads are downloaded and hashed
//! - Static output: every page is written atomically, safe to serve mid-build

pub mod artifacts;
mod error;
pub mod filename;
pub mod github;
pub mod index;
pub mod package;
pub mod render;
pub mod repos;
pub mod token;
pub mod version;

pub use error::{Error, Result};
pub use package::{Artifact, Package, Repository};
pub use version::PackageVersion;
