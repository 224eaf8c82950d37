// src/cli.rs
//! CLI definitions for the ghpypi index generator
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghpypi")]
#[command(author = "ghpypi Contributors")]
#[command(version)]
#[command(about = "Static PyPI-compatible package index generator fed by GitHub release assets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the static index from the configured repositories
    Build {
        /// File listing GitHub repositories, one owner/name per line
        #[arg(long, value_name = "PATH")]
        repositories: PathBuf,

        /// Directory to write the generated index into
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// GitHub API token
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,

        /// Read the GitHub API token from the first line of stdin
        #[arg(long, conflicts_with = "token")]
        token_stdin: bool,

        /// Title shown on the generated index pages
        #[arg(long, default_value = "My Private PyPI")]
        title: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}
