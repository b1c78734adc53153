//! Line-oriented view of a `Cargo.toml` manifest.
//!
//! The manifest is never parsed as TOML. It is kept as an ordered list of
//! lines, each remembering its own terminator, so that a rewrite touches only
//! the version strings it means to touch and every other byte survives.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use thiserror::Error;

use crate::util::fs;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Cargo.toml";

/// `name = "1.2.3"` or `name = { version = "1.2.3", ... }`.
///
/// Groups: indent, name, prefix up to and including the opening quote,
/// version, suffix from the closing quote to end of line.
static DEPENDENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^([ \t]*)([A-Za-z0-9_-]+)([ \t]*=[ \t]*(?:\{[ \t]*version[ \t]*=[ \t]*)?")([^"]*)(".*)$"#,
    )
    .expect("dependency line pattern is valid")
});

/// `[table]` or `[[array.of.tables]]`, optionally followed by a comment.
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*\[\[?[ \t]*([^\[\],]+?)[ \t]*\]\]?[ \t]*(?:#.*)?$")
        .expect("section header pattern is valid")
});

/// Error locating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `Cargo.toml` in `{}` or any parent directory", .dir.display())]
    NotFound { dir: PathBuf },
}

/// Line terminator of a single manifest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    /// Last line of a file without a trailing newline.
    None,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::None => "",
        }
    }
}

/// One line of a manifest, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    pub text: String,
    pub ending: LineEnding,
}

impl ManifestLine {
    pub fn new(text: impl Into<String>, ending: LineEnding) -> Self {
        ManifestLine {
            text: text.into(),
            ending,
        }
    }
}

impl fmt::Display for ManifestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.text, self.ending.as_str())
    }
}

/// Split text into lines, keeping each line's terminator.
///
/// `join_lines(&split_lines(s)) == s` for every input.
pub fn split_lines(contents: &str) -> Vec<ManifestLine> {
    contents
        .split_inclusive('\n')
        .map(|raw| {
            if let Some(text) = raw.strip_suffix("\r\n") {
                ManifestLine::new(text, LineEnding::CrLf)
            } else if let Some(text) = raw.strip_suffix('\n') {
                ManifestLine::new(text, LineEnding::Lf)
            } else {
                ManifestLine::new(raw, LineEnding::None)
            }
        })
        .collect()
}

/// Reassemble lines produced by [`split_lines`].
pub fn join_lines(lines: &[ManifestLine]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.text.len() + 2).sum());
    for line in lines {
        out.push_str(&line.text);
        out.push_str(line.ending.as_str());
    }
    out
}

/// A dependency entry decomposed from a single manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLine<'a> {
    pub indent: &'a str,
    pub name: &'a str,
    /// Separator text up to and including the opening quote of the version.
    pub prefix: &'a str,
    pub version: &'a str,
    /// Closing quote of the version and everything after it.
    pub suffix: &'a str,
}

impl DependencyLine<'_> {
    /// Rebuild the line text with a different version string.
    pub fn render(&self, version: &str) -> String {
        format!(
            "{}{}{}{}{}",
            self.indent, self.name, self.prefix, version, self.suffix
        )
    }
}

/// Match a line (without terminator) against the dependency entry pattern.
///
/// Returns `None` for anything that is not a `name = "..."` or
/// `name = { version = "...", ... }` entry: comments, headers, other keys
/// and malformed lines alike.
pub fn parse_dependency_line(line: &str) -> Option<DependencyLine<'_>> {
    let caps = DEPENDENCY_RE.captures(line)?;
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    Some(DependencyLine {
        indent: group(1),
        name: group(2),
        prefix: group(3),
        version: group(4),
        suffix: group(5),
    })
}

/// Check whether a line is exactly the `[section]` header, ignoring
/// surrounding whitespace.
pub fn is_table_header(line: &str, section: &str) -> bool {
    line.trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|inner| inner == section)
}

/// Return the key of a table header line (`[a.b]` or `[[a.b]]`), if it is one.
pub fn section_header(line: &str) -> Option<&str> {
    SECTION_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A manifest loaded from disk as raw lines.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    lines: Vec<ManifestLine>,
}

impl Manifest {
    /// Read a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Manifest::from_contents(path, &contents))
    }

    /// Build a manifest from in-memory contents.
    pub fn from_contents(path: impl Into<PathBuf>, contents: &str) -> Self {
        Manifest {
            path: path.into(),
            lines: split_lines(contents),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_mut(&mut self) -> &mut [ManifestLine] {
        &mut self.lines
    }

    /// Render the whole manifest back to text.
    pub fn contents(&self) -> String {
        join_lines(&self.lines)
    }

    /// Replace the file on disk with the current contents in one step.
    pub fn save(&self) -> Result<()> {
        fs::write_atomic(&self.path, &self.contents())
    }
}

/// Find `Cargo.toml` in `start` or the nearest parent directory that has one.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ManifestError::NotFound {
                dir: start.to_path_buf(),
            });
        }
    }
}
