// src/repos.rs

//! Repository list file parsing
//!
//! The input file names one GitHub repository per line as `owner/name`.
//! Blank lines and `#` comments are skipped; anything else is a hard
//! error, so a typo cannot silently drop a repository from the index.

use crate::error::{Error, Result};
use crate::package::Repository;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load the repository list from a file
pub fn load_repositories(path: &Path) -> Result<Vec<Repository>> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_repositories(&text)
}

fn parse_repositories(text: &str) -> Result<Vec<Repository>> {
    let mut repositories = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((owner, name)) = line.split_once('/') else {
            return Err(Error::InvalidRepository(line.to_string()));
        };
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(Error::InvalidRepository(line.to_string()));
        }

        let repository = Repository::new(owner, name);
        info!("Found repository: {}", repository);
        repositories.push(repository);
    }
    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_repositories() {
        let text = "\
# repositories to index
ocf/ghpypi

asottile/dumb-init
";
        let repositories = parse_repositories(text).unwrap();
        assert_eq!(
            repositories,
            vec![
                Repository::new("ocf", "ghpypi"),
                Repository::new("asottile", "dumb-init"),
            ]
        );
    }

    #[test]
    fn test_parse_repositories_trims_lines() {
        let repositories = parse_repositories("  ocf/ghpypi  \n").unwrap();
        assert_eq!(repositories, vec![Repository::new("ocf", "ghpypi")]);
    }

    #[test]
    fn test_parse_repositories_empty_input() {
        assert_eq!(parse_repositories("").unwrap(), vec![]);
        assert_eq!(parse_repositories("\n# nothing here\n").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_repositories_invalid_lines() {
        let cases = [
            "some invalid data",
            "; this is invalid",
            "foo/bar/asdf",
            "baz/",
            "bat",
            "/battery",
        ];
        for line in cases {
            let result = parse_repositories(line);
            assert!(
                matches!(result, Err(Error::InvalidRepository(_))),
                "{:?} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_load_repositories_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ocf/ghpypi").unwrap();
        file.flush().unwrap();

        let repositories = load_repositories(file.path()).unwrap();
        assert_eq!(repositories, vec![Repository::new("ocf", "ghpypi")]);
    }

    #[test]
    fn test_load_repositories_missing_file() {
        let result = load_repositories(Path::new("/nonexistent/repositories.txt"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
