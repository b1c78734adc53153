//! Core data structures for caretup.
//!
//! - Line-oriented manifests and dependency line matching
//! - Caret requirement rules
//! - Per-dependency overrides

pub mod manifest;
pub mod overrides;
pub mod version;

pub use manifest::{
    find_manifest, parse_dependency_line, DependencyLine, Manifest, ManifestError, ManifestLine,
    MANIFEST_NAME,
};
pub use overrides::Overrides;
pub use version::{caret_requirement, is_numeric_version};
