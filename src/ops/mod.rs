//! High-level operations.
//!
//! This module contains the implementation of the caretup steps.

pub mod normalize;
pub mod upgrade;

pub use normalize::{
    normalize_lines, normalize_manifest, normalize_str, ChangeReason, NormalizeOptions,
    NormalizeReport, ScanExtent, VersionChange,
};
pub use upgrade::{run_upgrade, CommandOutcome, CommandStatus, UpgradeOptions};
