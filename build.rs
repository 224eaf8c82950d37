// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("ghpypi")
        .version(env!("CARGO_PKG_VERSION"))
        .author("ghpypi Contributors")
        .about("Static PyPI-compatible package index generator fed by GitHub release assets")
        .subcommand_required(false)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("build")
                .about("Build the static index from the configured repositories")
                .arg(
                    Arg::new("repositories")
                        .long("repositories")
                        .value_name("PATH")
                        .required(true)
                        .help("File listing GitHub repositories, one owner/name per line"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_name("PATH")
                        .required(true)
                        .help("Directory to write the generated index into"),
                )
                .arg(
                    Arg::new("token")
                        .long("token")
                        .value_name("TOKEN")
                        .help("GitHub API token"),
                )
                .arg(
                    Arg::new("token_stdin")
                        .long("token-stdin")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("token")
                        .help("Read the GitHub API token from the first line of stdin"),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .default_value("My Private PyPI")
                        .help("Title shown on the generated index pages"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("ghpypi.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
