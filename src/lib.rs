//! caretup - upgrade Cargo dependencies and normalize their requirements
//!
//! This crate runs the external upgrade commands (`cargo upgrade`,
//! `cargo update`) and then rewrites dependency versions in `Cargo.toml`
//! into minimal caret ranges (`"1.2.3"` becomes `"^1.2"`), honoring
//! pinned and ignored dependencies.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and fixtures for caretup unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{manifest::Manifest, overrides::Overrides};
pub use ops::{normalize_manifest, run_upgrade, NormalizeOptions, UpgradeOptions};
pub use util::context::GlobalContext;
