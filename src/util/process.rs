//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Run a command line through the platform shell (`sh -c` or `cmd /C`).
    pub fn shell(command_line: &str) -> Self {
        if cfg!(windows) {
            ProcessBuilder::new("cmd").args(["/C", command_line])
        } else {
            ProcessBuilder::new("sh").args(["-c", command_line])
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute with inherited stdio and return status only.
    pub fn status(&self) -> Result<ExitStatus> {
        let mut cmd = self.build_command();
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute `{}`", self.display_command()))?;
        Ok(status)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cargo").args(["upgrade", "--incompatible"]);

        assert_eq!(pb.display_command(), "cargo upgrade --incompatible");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command() {
        let pb = ProcessBuilder::shell("cargo update");
        assert_eq!(pb.display_command(), "sh -c cargo update");
    }

    #[cfg(windows)]
    #[test]
    fn test_shell_command() {
        let pb = ProcessBuilder::shell("cargo update");
        assert_eq!(pb.display_command(), "cmd /C cargo update");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_status_reports_exit_code() {
        let status = ProcessBuilder::shell("exit 3").status().unwrap();
        assert_eq!(status.code(), Some(3));

        let status = ProcessBuilder::shell("true").status().unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_cwd_is_applied() {
        let tmp = tempfile::TempDir::new().unwrap();
        let status = ProcessBuilder::shell("touch marker")
            .cwd(tmp.path())
            .status()
            .unwrap();

        assert!(status.success());
        assert!(tmp.path().join("marker").exists());
    }

    #[test]
    fn test_spawn_failure_is_error() {
        let result = ProcessBuilder::new("caretup-definitely-missing-program").status();
        assert!(result.is_err());
    }
}
