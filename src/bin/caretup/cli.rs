//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use caretup::util::shell::ColorChoice;

/// caretup - upgrade Cargo dependencies and normalize them to caret ranges
///
/// Runs `cargo upgrade` and `cargo update`, then rewrites every dependency
/// version in Cargo.toml to its minimal caret requirement.
#[derive(Parser)]
#[command(name = "caretup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to Cargo.toml (defaults to the nearest one upward from the current directory)
    #[arg(long, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Additional configuration file, applied over global and project config
    #[arg(long, value_name = "PATH", env = "CARETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the global config.toml (defaults to ~/.caretup)
    #[arg(long, value_name = "DIR", env = "CARETUP_HOME", hide = true)]
    pub home: Option<PathBuf>,

    /// Do not run the external upgrade commands
    #[arg(long)]
    pub skip_upgrade: bool,

    /// Show what would change without writing Cargo.toml
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,
}
