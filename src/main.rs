// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Build {
            repositories,
            output,
            token,
            token_stdin,
            title,
        }) => commands::cmd_build(&repositories, &output, token.as_deref(), token_stdin, &title),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "ghpypi", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("ghpypi v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'ghpypi --help' for usage information");
            Ok(())
        }
    }
}
