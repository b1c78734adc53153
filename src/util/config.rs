//! Configuration file support for caretup.
//!
//! caretup reads up to three configuration files:
//! - Global: `~/.caretup/config.toml` - User-wide defaults
//! - Project: `.caretup/config.toml` next to the manifest
//! - Explicit: `--config <PATH>` on the command line
//!
//! Later layers take precedence over earlier ones.
//!
//! ```toml
//! [overrides]
//! ignored = ["openssl"]
//!
//! [overrides.pinned]
//! tokio = "=1.25.0"
//!
//! [normalize]
//! sections = ["dependencies", "dev-dependencies"]
//! extent = "table"
//!
//! [upgrade]
//! commands = ["cargo upgrade", "cargo update"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Overrides;
use crate::ops::normalize::ScanExtent;

/// Dependency tables normalized when nothing else is configured.
pub const DEFAULT_SECTIONS: &[&str] = &["dependencies"];

/// External commands run before normalization when nothing else is configured.
pub const DEFAULT_UPGRADE_COMMANDS: &[&str] = &["cargo upgrade", "cargo update"];

/// caretup configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pinned and ignored dependencies
    pub overrides: Overrides,

    /// Normalization settings
    pub normalize: NormalizeConfig,

    /// External upgrade step settings
    pub upgrade: UpgradeConfig,
}

/// Normalization-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Table names whose entries are normalized (e.g. `dev-dependencies`)
    pub sections: Option<Vec<String>>,

    /// How far past a dependency header the scan continues
    pub extent: Option<ScanExtent>,
}

/// Upgrade-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Shell command lines, run in order
    pub commands: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.overrides.merge(other.overrides);

        if other.normalize.sections.is_some() {
            self.normalize.sections = other.normalize.sections;
        }
        if other.normalize.extent.is_some() {
            self.normalize.extent = other.normalize.extent;
        }

        if other.upgrade.commands.is_some() {
            self.upgrade.commands = other.upgrade.commands;
        }
    }

    /// Dependency tables to normalize.
    pub fn sections(&self) -> Vec<String> {
        match &self.normalize.sections {
            Some(sections) => sections.clone(),
            None => DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Scan extent, defaulting to the bounded table scan.
    pub fn extent(&self) -> ScanExtent {
        self.normalize.extent.unwrap_or_default()
    }

    /// Upgrade command lines to run.
    pub fn upgrade_commands(&self) -> Vec<String> {
        match &self.upgrade.commands {
            Some(commands) => commands.clone(),
            None => DEFAULT_UPGRADE_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.caretup/config.toml)
/// 2. Global config (~/.caretup/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    // Project config overrides global
    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global caretup config directory (~/.caretup).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".caretup"))
}

/// Get the project config path (.caretup/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".caretup").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.overrides.is_empty());
        assert_eq!(config.sections(), vec!["dependencies"]);
        assert_eq!(config.extent(), ScanExtent::Table);
        assert_eq!(config.upgrade_commands(), vec!["cargo upgrade", "cargo update"]);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[overrides]
ignored = ["openssl"]

[overrides.pinned]
tokio = "=1.25.0"

[normalize]
sections = ["dependencies", "dev-dependencies"]
extent = "to-end"

[upgrade]
commands = ["cargo update"]
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert!(config.overrides.is_ignored("openssl"));
        assert_eq!(config.overrides.pinned("tokio"), Some("=1.25.0"));
        assert_eq!(config.sections(), vec!["dependencies", "dev-dependencies"]);
        assert_eq!(config.extent(), ScanExtent::ToEnd);
        assert_eq!(config.upgrade_commands(), vec!["cargo update"]);
    }

    #[test]
    fn test_config_load_invalid() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[normalize]\nextent = \"sideways\"\n").unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));

        // Implicit loading falls back to defaults instead.
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_empty_upgrade_commands() {
        let config: Config = toml::from_str("[upgrade]\ncommands = []\n").unwrap();
        assert!(config.upgrade_commands().is_empty());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.normalize.sections = Some(vec!["dependencies".to_string()]);
        base.upgrade.commands = Some(vec!["cargo update".to_string()]);
        base.overrides = Overrides::new().pin("serde", "=1.0.100");

        let mut override_cfg = Config::default();
        override_cfg.normalize.extent = Some(ScanExtent::ToEnd);
        override_cfg.overrides = Overrides::new().ignore("openssl");

        base.merge(override_cfg);

        assert_eq!(base.extent(), ScanExtent::ToEnd);
        assert_eq!(base.upgrade_commands(), vec!["cargo update"]); // Not overridden
        assert_eq!(base.overrides.pinned("serde"), Some("=1.0.100"));
        assert!(base.overrides.is_ignored("openssl"));
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[overrides.pinned]
tokio = "=1.0.0"
log = "=0.4.20"

[normalize]
extent = "to-end"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[overrides.pinned]
tokio = "=1.25.0"

[normalize]
extent = "table"
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);

        // Project pin wins
        assert_eq!(config.overrides.pinned("tokio"), Some("=1.25.0"));
        // Global pin preserved
        assert_eq!(config.overrides.pinned("log"), Some("=0.4.20"));
        // Project extent wins
        assert_eq!(config.extent(), ScanExtent::Table);
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
