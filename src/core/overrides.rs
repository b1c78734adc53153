//! Per-dependency overrides for version normalization.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Dependencies that must not receive the default caret rewrite.
///
/// ```toml
/// [overrides]
/// ignored = ["openssl"]
///
/// [overrides.pinned]
/// tokio = "=1.25.0"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    /// Dependency name -> exact version string to write.
    pub pinned: BTreeMap<String, String>,

    /// Dependencies whose lines are left exactly as they are.
    pub ignored: BTreeSet<String>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force `name` to `version`.
    pub fn pin(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.pinned.insert(name.into(), version.into());
        self
    }

    /// Skip `name` entirely.
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored.insert(name.into());
        self
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    pub fn pinned(&self, name: &str) -> Option<&str> {
        self.pinned.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.ignored.is_empty()
    }

    /// Merge another set of overrides into this one.
    ///
    /// Pins from `other` replace pins with the same name; ignored names are
    /// combined.
    pub fn merge(&mut self, other: Overrides) {
        self.pinned.extend(other.pinned);
        self.ignored.extend(other.ignored);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_default_is_noop() {
        let overrides = Overrides::default();
        assert!(overrides.is_empty());
        assert!(!overrides.is_ignored("serde"));
        assert_eq!(overrides.pinned("serde"), None);
    }

    #[test]
    fn test_overrides_builders() {
        let overrides = Overrides::new().pin("tokio", "=1.25.0").ignore("openssl");
        assert_eq!(overrides.pinned("tokio"), Some("=1.25.0"));
        assert!(overrides.is_ignored("openssl"));
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_overrides_merge() {
        let mut base = Overrides::new()
            .pin("tokio", "=1.0.0")
            .pin("serde", "=1.0.100")
            .ignore("openssl");
        let other = Overrides::new().pin("tokio", "=1.25.0").ignore("libc");

        base.merge(other);

        assert_eq!(base.pinned("tokio"), Some("=1.25.0"));
        assert_eq!(base.pinned("serde"), Some("=1.0.100"));
        assert!(base.is_ignored("openssl"));
        assert!(base.is_ignored("libc"));
    }

    #[test]
    fn test_overrides_deserialize() {
        let overrides: Overrides = toml::from_str(
            r#"
ignored = ["openssl"]

[pinned]
tokio = "=1.25.0"
"#,
        )
        .unwrap();

        assert_eq!(overrides.pinned("tokio"), Some("=1.25.0"));
        assert!(overrides.is_ignored("openssl"));
    }
}
