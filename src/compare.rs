//! # Header Comparison
//!
//! Whitespace-insensitive equivalence of header blocks. The normalized form
//! is only ever used for comparison, never written back to a file.

/// Trims every line, drops the lines left empty, and joins the rest with
/// single newlines.
pub fn normalize(header: &str) -> String {
  header
    .split('\n')
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}

/// Returns `true` if both headers normalize to the same text.
///
/// The comparison is exact and case-sensitive.
pub fn equivalent(a: &str, b: &str) -> bool {
  normalize(a) == normalize(b)
}
