// src/error.rs

//! Error types for the ghpypi index generator.
//!
//! Two variants are recoverable per artifact and only ever logged
//! (`InvalidFilename`, `UnsafeFilename`); everything else aborts the run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Asset filename does not follow any recognized artifact naming scheme
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Asset filename contains characters unfit for a URL path, or `..`
    #[error("Unsafe filename: {0}")]
    UnsafeFilename(String),

    /// Line in the repository list is not `owner/name`
    #[error("Invalid repository line: {0}")]
    InvalidRepository(String),

    /// No GitHub token from flag, stdin, or environment
    #[error("No GitHub token provided (use --token, --token-stdin, or GITHUB_TOKEN)")]
    MissingToken,

    /// HTTP client construction failed
    #[error("Initialization error: {0}")]
    InitError(String),

    /// Network fetch failed or returned a non-success status
    #[error("Download error: {0}")]
    DownloadError(String),

    /// Response body or manifest could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Filesystem operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
