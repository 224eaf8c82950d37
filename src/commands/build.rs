// src/commands/build.rs
//! Index build command

use anyhow::Result;
use ghpypi::artifacts::create_artifacts;
use ghpypi::github::GithubClient;
use ghpypi::index::sort_packages;
use ghpypi::package::{create_packages, Package};
use ghpypi::render::build_site;
use ghpypi::repos::load_repositories;
use ghpypi::token::github_token;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Build the static index from every configured repository
pub fn cmd_build(
    repositories: &Path,
    output: &Path,
    token: Option<&str>,
    token_stdin: bool,
    title: &str,
) -> Result<()> {
    info!("Building index from {}", repositories.display());

    let token = github_token(token, token_stdin)?;
    let repositories = load_repositories(repositories)?;
    let client = GithubClient::new(&token)?;

    let mut packages: HashMap<String, HashSet<Package>> = HashMap::new();
    for repository in &repositories {
        info!("Fetching releases for {}", repository);
        for release in client.releases(repository) {
            let release = release?;
            if release.assets.is_empty() {
                continue;
            }
            let artifacts = create_artifacts(&client, &release.assets)?;
            for (name, files) in create_packages(artifacts) {
                packages.entry(name).or_default().extend(files);
            }
        }
    }

    let packages = sort_packages(packages);
    build_site(&packages, output, title)?;

    let file_count: usize = packages.values().map(Vec::len).sum();
    println!(
        "Generated index for {} packages ({} files) at {}",
        packages.len(),
        file_count,
        output.display()
    );
    Ok(())
}
