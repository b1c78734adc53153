//! caretup CLI - upgrade and normalize Cargo dependency requirements

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use caretup::util::Shell;
use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    // Set up logging; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("caretup=debug")
        } else if cli.quiet {
            EnvFilter::new("caretup=error")
        } else {
            EnvFilter::new("caretup=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(shell.use_color())
        .with_target(false)
        .without_time()
        .init();

    commands::upgrade::execute(cli, &shell)
}
