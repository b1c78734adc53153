//! Global context for caretup operations.
//!
//! Provides centralized access to the working directory, manifest lookup
//! and layered configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::{find_manifest as find_manifest_from, ManifestError};
use crate::util::config::{self, Config};

/// Global context containing configuration paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global caretup data (~/.caretup/)
    home: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            home: config::global_config_dir(),
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different global directory instead of ~/.caretup/.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|home| home.join("config.toml"))
    }

    /// Resolve the manifest to operate on.
    ///
    /// An explicit path is taken relative to the working directory; otherwise
    /// the nearest `Cargo.toml` from the working directory upward is used.
    pub fn resolve_manifest(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(self.cwd.join(path)),
            None => Ok(self.find_manifest()?),
        }
    }

    /// Find `Cargo.toml` starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        find_manifest_from(&self.cwd)
    }

    /// Load configuration for the project rooted at `project_root`.
    ///
    /// Global and project files are optional and fall back to defaults when
    /// they cannot be parsed. An explicit file must load.
    pub fn load_config(&self, project_root: &Path, explicit: Option<&Path>) -> Result<Config> {
        let global = self.config_path();
        let mut config =
            config::load_config(global.as_deref(), &config::project_config_path(project_root));

        if let Some(path) = explicit {
            config.merge(Config::load(&self.cwd.join(path))?);
        }

        Ok(config)
    }
}
