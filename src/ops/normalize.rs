//! Normalization of dependency version requirements.
//!
//! Walks a manifest line by line. Inside a dependency table every
//! `name = "X.Y.Z"` or `name = { version = "X.Y.Z", ... }` entry is rewritten
//! to the caret range `^X.Y`, unless the dependency is ignored, pinned, or
//! already uses a non-numeric requirement. The file is written back only
//! when at least one line changed.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::manifest::{self, is_table_header, section_header, ManifestLine};
use crate::core::{
    caret_requirement, is_numeric_version, parse_dependency_line, Manifest, Overrides,
};
use crate::util::config::{Config, DEFAULT_SECTIONS};

/// How far the scan continues after a dependency table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanExtent {
    /// Stop at the next table header that is not a dependency table.
    #[default]
    Table,
    /// Inspect every line after the first dependency header, whatever
    /// section it belongs to.
    ToEnd,
}

/// Options for normalizing a manifest.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Pinned and ignored dependencies
    pub overrides: Overrides,

    /// Dependency table names (`dependencies`, `dev-dependencies`, ...)
    pub sections: Vec<String>,

    /// Scan extent after a header
    pub extent: ScanExtent,

    /// Compute changes without writing the manifest
    pub dry_run: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            overrides: Overrides::default(),
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            extent: ScanExtent::default(),
            dry_run: false,
        }
    }
}

impl NormalizeOptions {
    /// Build options from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        NormalizeOptions {
            overrides: config.overrides.clone(),
            sections: config.sections(),
            extent: config.extent(),
            dry_run: false,
        }
    }

    fn is_dependency_header(&self, line: &str) -> bool {
        self.sections
            .iter()
            .any(|section| is_table_header(line, section))
    }
}

/// Why a version was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    /// Truncated to a caret range
    Caret,
    /// Replaced by a pinned override
    Pinned,
}

/// A single rewritten dependency version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    /// 1-based line number in the manifest
    pub line: usize,
    pub name: String,
    pub from: String,
    pub to: String,
    pub reason: ChangeReason,
}

impl fmt::Display for VersionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.name, self.from, self.to)
    }
}

/// Result of normalizing a manifest.
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    pub changes: Vec<VersionChange>,

    /// Whether the manifest file was rewritten
    pub written: bool,
}

impl NormalizeReport {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Decide the replacement version for one entry, if any.
fn replacement(
    name: &str,
    version: &str,
    overrides: &Overrides,
) -> Option<(String, ChangeReason)> {
    if overrides.is_ignored(name) {
        return None;
    }

    if let Some(pinned) = overrides.pinned(name) {
        return Some((pinned.to_string(), ChangeReason::Pinned));
    }

    if is_numeric_version(version) {
        return Some((caret_requirement(version), ChangeReason::Caret));
    }

    None
}

/// Normalize dependency versions in memory.
///
/// Lines before the first dependency header are never touched. Each
/// rewritten line keeps its indentation, surrounding text and terminator.
pub fn normalize_lines(
    lines: &mut [ManifestLine],
    opts: &NormalizeOptions,
) -> Vec<VersionChange> {
    let mut changes = Vec::new();
    let mut in_deps = false;

    for (idx, line) in lines.iter_mut().enumerate() {
        if opts.is_dependency_header(&line.text) {
            in_deps = true;
            continue;
        }

        if !in_deps {
            continue;
        }

        if opts.extent == ScanExtent::Table && section_header(&line.text).is_some() {
            in_deps = false;
            continue;
        }

        let Some(dep) = parse_dependency_line(&line.text) else {
            continue;
        };

        let Some((version, reason)) = replacement(dep.name, dep.version, &opts.overrides) else {
            tracing::trace!("leaving `{}` at line {}", dep.name, idx + 1);
            continue;
        };

        if version == dep.version {
            continue;
        }

        let change = VersionChange {
            line: idx + 1,
            name: dep.name.to_string(),
            from: dep.version.to_string(),
            to: version.clone(),
            reason,
        };
        let text = dep.render(&version);
        tracing::debug!("line {}: {}", change.line, change);

        line.text = text;
        changes.push(change);
    }

    changes
}

/// Normalize manifest text, returning the new text and the changes made.
pub fn normalize_str(contents: &str, opts: &NormalizeOptions) -> (String, Vec<VersionChange>) {
    let mut lines = manifest::split_lines(contents);
    let changes = normalize_lines(&mut lines, opts);
    (manifest::join_lines(&lines), changes)
}

/// Normalize the manifest at `path`.
///
/// The file is rewritten atomically, and only when something changed and
/// `opts.dry_run` is not set. Otherwise it is left byte-for-byte untouched.
pub fn normalize_manifest(path: &Path, opts: &NormalizeOptions) -> Result<NormalizeReport> {
    let mut manifest = Manifest::load(path)?;
    let changes = normalize_lines(manifest.lines_mut(), opts);

    let mut report = NormalizeReport {
        changes,
        written: false,
    };

    if report.is_unchanged() {
        tracing::info!("{} already normalized", manifest.path().display());
        return Ok(report);
    }

    if opts.dry_run {
        tracing::info!(
            "Dry run - {} would change {} line(s)",
            manifest.path().display(),
            report.changes.len()
        );
        return Ok(report);
    }

    manifest.save()?;
    report.written = true;
    tracing::info!(
        "Normalized {} dependency version(s) in {}",
        report.changes.len(),
        manifest.path().display()
    );

    Ok(report)
}
