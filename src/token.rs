// src/token.rs

//! GitHub token resolution
//!
//! Precedence: the explicit `--token` flag, then the first line of stdin
//! when `--token-stdin` was given, then `GITHUB_TOKEN`. Candidates are
//! trimmed; a blank one falls through to the next source.

use crate::error::{Error, Result};
use std::env;
use std::io::{self, BufRead};

/// Pick the first non-blank token candidate, in precedence order
pub fn resolve_token(
    flag: Option<&str>,
    stdin_line: Option<&str>,
    env_value: Option<&str>,
) -> Result<String> {
    for candidate in [flag, stdin_line, env_value].into_iter().flatten() {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
    Err(Error::MissingToken)
}

/// Resolve the GitHub token from the CLI flags and the environment
pub fn github_token(flag: Option<&str>, from_stdin: bool) -> Result<String> {
    let stdin_line = if from_stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::IoError(format!("Failed to read token from stdin: {e}")))?;
        Some(line)
    } else {
        None
    };
    let env_value = env::var("GITHUB_TOKEN").ok();

    resolve_token(flag, stdin_line.as_deref(), env_value.as_deref())
}
