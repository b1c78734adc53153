//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Replace a file's contents in one step.
///
/// The new contents go to a temporary file in the same directory which is
/// then renamed over `path`, so readers see either the old file or the new
/// one and never a partial write. A symlinked `path` is followed: the file it
/// points to is replaced and the link stays in place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = resolve_target(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush file: {}", path.display()))?;

    // The temp file is created 0600; carry the original mode over.
    if let Ok(metadata) = fs::metadata(&target) {
        if let Err(e) = fs::set_permissions(tmp.path(), metadata.permissions()) {
            tracing::warn!("could not keep permissions of {}: {}", target.display(), e);
        }
    }

    tmp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to replace file: {}", path.display()))?;
    Ok(())
}

/// The file a write to `path` should land on: the symlink target if `path`
/// is a link, otherwise `path` itself.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
