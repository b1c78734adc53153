//! External upgrade step.
//!
//! Runs the configured package-manager commands (by default `cargo upgrade`
//! followed by `cargo update`) before the manifest is normalized. Their exit
//! status is reported but never fatal: upgrade tools exit non-zero for
//! advisory reasons too, and normalization must run either way.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use crate::util::config::{Config, DEFAULT_UPGRADE_COMMANDS};
use crate::util::process::{find_executable, ProcessBuilder};

/// Options for the upgrade step.
#[derive(Debug, Clone)]
pub struct UpgradeOptions {
    /// Shell command lines, run in order
    pub commands: Vec<String>,

    /// Directory the commands run in (the manifest's directory)
    pub cwd: Option<PathBuf>,
}

impl Default for UpgradeOptions {
    fn default() -> Self {
        UpgradeOptions {
            commands: DEFAULT_UPGRADE_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cwd: None,
        }
    }
}

impl UpgradeOptions {
    /// Build options from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        UpgradeOptions {
            commands: config.upgrade_commands(),
            cwd: None,
        }
    }

    /// Run the commands in `cwd`.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// How a single upgrade command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Exited unsuccessfully; `None` if terminated by a signal
    Failed(Option<i32>),
    /// Could not be started at all
    SpawnFailed(String),
}

impl CommandStatus {
    fn from_exit(status: ExitStatus) -> Self {
        if status.success() {
            CommandStatus::Success
        } else {
            CommandStatus::Failed(status.code())
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CommandStatus::Success)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Success => write!(f, "succeeded"),
            CommandStatus::Failed(Some(code)) => write!(f, "exited with code {}", code),
            CommandStatus::Failed(None) => write!(f, "was terminated by a signal"),
            CommandStatus::SpawnFailed(err) => write!(f, "could not be started: {}", err),
        }
    }
}

/// Outcome of one upgrade command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub command: String,
    pub status: CommandStatus,
}

/// Run every upgrade command in order, never stopping early.
///
/// Output is inherited so the user sees what the tools print. Failures are
/// recorded in the returned outcomes, not reported here.
pub fn run_upgrade(opts: &UpgradeOptions) -> Vec<CommandOutcome> {
    let mut outcomes = Vec::with_capacity(opts.commands.len());

    for command in &opts.commands {
        if let Some(program) = command.split_whitespace().next() {
            if find_executable(program).is_none() {
                tracing::debug!("`{}` not found on PATH", program);
            }
        }

        let mut process = ProcessBuilder::shell(command);
        if let Some(cwd) = &opts.cwd {
            process = process.cwd(cwd);
        }

        tracing::info!("Running `{}`", command);
        let status = match process.status() {
            Ok(status) => CommandStatus::from_exit(status),
            Err(e) => CommandStatus::SpawnFailed(format!("{:#}", e)),
        };

        // Not fatal either way; callers decide how to report failures.
        tracing::debug!("`{}` {}", command, status);

        outcomes.push(CommandOutcome {
            command: command.clone(),
            status,
        });
    }

    outcomes
}
