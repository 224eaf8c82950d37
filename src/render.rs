// src/render.rs

//! Static site rendering
//!
//! Writes the PEP 503 "simple" pages, the per-project JSON documents,
//! and the landing page. Every file goes through a temp-file-then-rename
//! write so an interrupted run cannot leave a torn index behind.

use crate::error::{Error, Result};
use crate::index;
use crate::package::Package;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Render the whole site into the output directory
///
/// Layout: `index.html` (landing page with latest versions),
/// `simple/index.html` (project list), `simple/{name}/index.html`
/// (file links with digest fragments), `pypi/{name}/json`.
pub fn build_site(
    packages: &BTreeMap<String, Vec<Package>>,
    output: &Path,
    title: &str,
) -> Result<()> {
    let simple = output.join("simple");
    ensure_dir(&simple)?;

    atomic_write(&output.join("index.html"), &render_home_page(title, packages))?;
    atomic_write(&simple.join("index.html"), &render_simple_index(title, packages))?;

    for (name, files) in packages {
        info!("Processing {} with {} files", name, files.len());

        let project_dir = simple.join(name);
        ensure_dir(&project_dir)?;
        atomic_write(
            &project_dir.join("index.html"),
            &render_package_page(title, name, files),
        )?;

        if let Some(document) = index::get_package_json(files) {
            let json_dir = output.join("pypi").join(name);
            ensure_dir(&json_dir)?;
            let json = serde_json::to_string_pretty(&document).map_err(|e| {
                Error::ParseError(format!("Failed to serialize JSON for {}: {e}", name))
            })?;
            atomic_write(&json_dir.join("json"), &json)?;
        }
    }

    info!("Wrote index for {} packages to {}", packages.len(), output.display());
    Ok(())
}

/// Landing page: every package with its latest version
fn render_home_page(title: &str, packages: &BTreeMap<String, Vec<Package>>) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    page.push_str("  <meta charset=\"utf-8\"/>\n");
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("  <h1>{}</h1>\n", escape_html(title)));
    for (name, files) in packages {
        if let Some(latest) = files.last() {
            page.push_str(&format!(
                "  <a href=\"simple/{name}/\">{name}</a> {version}<br/>\n",
                name = escape_html(name),
                version = escape_html(&latest.version.to_string()),
            ));
        }
    }
    page.push_str("</body>\n</html>\n");
    page
}

/// Project list page of the simple index
fn render_simple_index(title: &str, packages: &BTreeMap<String, Vec<Package>>) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    page.push_str("  <meta name=\"api-version\" value=\"2\"/>\n");
    page.push_str("</head>\n<body>\n");
    for name in packages.keys() {
        page.push_str(&format!(
            "  <a href=\"{name}/\">{name}</a><br/>\n",
            name = escape_html(name),
        ));
    }
    page.push_str("</body>\n</html>\n");
    page
}

/// Per-project page: one anchor per file, digest carried in the URL
/// fragment so installers can verify downloads
fn render_package_page(title: &str, name: &str, files: &[Package]) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str(&format!(
        "  <title>{} - {}</title>\n",
        escape_html(name),
        escape_html(title)
    ));
    page.push_str("  <meta name=\"api-version\" value=\"2\"/>\n");
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("  <h1>{}</h1>\n", escape_html(name)));
    for file in files {
        page.push_str(&format!(
            "  <a href=\"{url}#sha256={digest}\">{filename}</a> ({details})<br/>\n",
            url = escape_html(&file.url),
            digest = escape_html(&file.sha256),
            filename = escape_html(&file.filename),
            details = escape_html(&file.to_string()),
        ));
    }
    page.push_str("</body>\n</html>\n");
    page
}

/// Minimal HTML escaping for text and attribute positions
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::IoError(format!("Failed to create directory {}: {e}", path.display())))
}

/// Write a file via a temp file in the same directory plus a rename
fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::IoError(format!("No parent directory for {}", path.display())))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        Error::IoError(format!("Failed to create temp file in {}: {e}", dir.display()))
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|e| Error::IoError(format!("Failed to write {}: {e}", path.display())))?;
    file.persist(path)
        .map_err(|e| Error::IoError(format!("Failed to move temp file to {}: {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::sort_packages;
    use crate::package::{create_packages, Artifact};
    use chrono::{TimeZone, Utc};

    fn artifact(filename: &str) -> Artifact {
        Artifact {
            filename: filename.to_string(),
            url: format!("https://example.com/{}", filename),
            sha256: "0".repeat(64),
            uploaded_at: Utc.with_ymd_and_hms(2021, 12, 25, 6, 22, 19).unwrap(),
            uploaded_by: "github-actions[bot]".to_string(),
        }
    }

    fn site() -> BTreeMap<String, Vec<Package>> {
        sort_packages(create_packages(
            [
                "ghpypi-1.0.0-py3-none-any.whl",
                "ghpypi-1.0.0.tar.gz",
                "ghpypi-1.0.1-py3-none-any.whl",
                "ghpypi-1.0.1.tar.gz",
                "dumb_init-1.2.0-py2.py3-none-manylinux1_x86_64.whl",
            ]
            .into_iter()
            .map(artifact),
        ))
    }

    #[test]
    fn test_build_site_layout() {
        let output = tempfile::tempdir().unwrap();
        build_site(&site(), output.path(), "My Private PyPI").unwrap();

        for relative in [
            "index.html",
            "simple/index.html",
            "simple/ghpypi/index.html",
            "simple/dumb-init/index.html",
            "pypi/ghpypi/json",
            "pypi/dumb-init/json",
        ] {
            assert!(output.path().join(relative).is_file(), "{} missing", relative);
        }
    }

    #[test]
    fn test_project_list_links_to_projects() {
        let output = tempfile::tempdir().unwrap();
        build_site(&site(), output.path(), "My Private PyPI").unwrap();

        let listing = fs::read_to_string(output.path().join("simple/index.html")).unwrap();
        assert!(listing.contains("<a href=\"dumb-init/\">dumb-init</a>"));
        assert!(listing.contains("<a href=\"ghpypi/\">ghpypi</a>"));
    }

    #[test]
    fn test_package_page_carries_digest_fragments() {
        let output = tempfile::tempdir().unwrap();
        build_site(&site(), output.path(), "My Private PyPI").unwrap();

        let page = fs::read_to_string(output.path().join("simple/ghpypi/index.html")).unwrap();
        assert!(page.contains(&format!(
            "https://example.com/ghpypi-1.0.1.tar.gz#sha256={}",
            "0".repeat(64)
        )));
        assert!(page.contains("1.0.1, 2021-12-25 06:22:19, github-actions[bot]"));
    }

    #[test]
    fn test_home_page_shows_latest_versions() {
        let output = tempfile::tempdir().unwrap();
        build_site(&site(), output.path(), "My Private PyPI").unwrap();

        let home = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(home.contains("<a href=\"simple/ghpypi/\">ghpypi</a> 1.0.1"));
        assert!(home.contains("<a href=\"simple/dumb-init/\">dumb-init</a> 1.2.0"));
    }

    #[test]
    fn test_json_document_content() {
        let output = tempfile::tempdir().unwrap();
        build_site(&site(), output.path(), "My Private PyPI").unwrap();

        let json = fs::read_to_string(output.path().join("pypi/ghpypi/json")).unwrap();
        let document: crate::index::PackageJson = serde_json::from_str(&json).unwrap();
        assert_eq!(document.info.version, "1.0.1");
        assert_eq!(document.urls.len(), 2);
    }

    #[test]
    fn test_titles_are_escaped() {
        let output = tempfile::tempdir().unwrap();
        build_site(&site(), output.path(), "<Fancy> & \"Private\"").unwrap();

        let home = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(home.contains("&lt;Fancy&gt; &amp; &quot;Private&quot;"));
        assert!(!home.contains("<Fancy>"));
    }

    #[test]
    fn test_atomic_write_replaces_existing_files() {
        let output = tempfile::tempdir().unwrap();
        let path = output.path().join("index.html");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_build_site_is_idempotent() {
        let output = tempfile::tempdir().unwrap();
        build_site(&site(), output.path(), "My Private PyPI").unwrap();
        let first = fs::read_to_string(output.path().join("simple/ghpypi/index.html")).unwrap();

        build_site(&site(), output.path(), "My Private PyPI").unwrap();
        let second = fs::read_to_string(output.path().join("simple/ghpypi/index.html")).unwrap();
        assert_eq!(first, second);
    }
}
