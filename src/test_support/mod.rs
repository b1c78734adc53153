//! Test utilities for caretup unit tests.

pub mod fixtures;

use std::path::{Path, PathBuf};

use crate::core::MANIFEST_NAME;

pub use fixtures::*;

/// Write `contents` as `Cargo.toml` in `dir` and return its path.
pub fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join(MANIFEST_NAME);
    std::fs::write(&path, contents).expect("failed to write test manifest");
    path
}

/// Write a project config file under `dir/.caretup/`.
pub fn write_project_config(dir: &Path, contents: &str) -> PathBuf {
    let path = crate::util::config::project_config_path(dir);
    std::fs::create_dir_all(path.parent().expect("config path has a parent"))
        .expect("failed to create config directory");
    std::fs::write(&path, contents).expect("failed to write test config");
    path
}
