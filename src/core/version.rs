//! Version requirement rewriting.

/// Check that a version string is made of digits and dots only.
///
/// Requirements such as `^1.0`, `=2.3.1`, `>=1, <2` or `*` are not numeric
/// and are never rewritten into a caret range.
pub fn is_numeric_version(version: &str) -> bool {
    !version.is_empty() && version.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Compute the minimal caret requirement for a version.
///
/// Keeps the first two dot-separated components: `1.2.3` becomes `^1.2`,
/// `2.0` stays `^2.0` and `3` becomes `^3`. A version that already starts
/// with `^` is returned unchanged.
pub fn caret_requirement(version: &str) -> String {
    if version.starts_with('^') {
        return version.to_string();
    }

    let major_minor: Vec<&str> = version.split('.').take(2).collect();
    format!("^{}", major_minor.join("."))
}
