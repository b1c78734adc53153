//! Manifest fixtures shared by unit tests.

/// A realistic manifest mixing every entry shape the normalizer sees.
pub const SAMPLE_MANIFEST: &str = r#"[package]
name = "sample"
version = "0.3.1"
edition = "2021"

[dependencies]
# serialization
serde = { version = "1.0.152", features = ["derive"] }
serde_json = "1.0.93"
tokio = { version = "1.25.0", features = ["full"] }
log = "^0.4"
local = { path = "../local" }
# anyhow = "1.0.69"
regex = "1.7.1" # text matching

[dev-dependencies]
tempfile = "3.4.0"
"#;

/// [`SAMPLE_MANIFEST`] after a default normalization pass.
pub const SAMPLE_MANIFEST_NORMALIZED: &str = r#"[package]
name = "sample"
version = "0.3.1"
edition = "2021"

[dependencies]
# serialization
serde = { version = "^1.0", features = ["derive"] }
serde_json = "^1.0"
tokio = { version = "^1.25", features = ["full"] }
log = "^0.4"
local = { path = "../local" }
# anyhow = "1.0.69"
regex = "^1.7" # text matching

[dev-dependencies]
tempfile = "3.4.0"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{normalize_str, NormalizeOptions};

    #[test]
    fn test_sample_normalizes_to_fixture() {
        let (output, changes) = normalize_str(SAMPLE_MANIFEST, &NormalizeOptions::default());
        assert_eq!(output, SAMPLE_MANIFEST_NORMALIZED);
        assert_eq!(changes.len(), 4);
    }
}
