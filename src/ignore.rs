//! # Ignore Module
//!
//! Matches paths against the `--ignore` patterns and the `ignore` list of the
//! config file.
//!
//! Patterns are globs. A few shorthand forms are expanded so they behave the
//! way users expect on the command line:
//! - `dist/` matches the `dist` directory anywhere and everything below it
//! - `vendor` (no wildcard) matches a file or directory of that name anywhere
//! - `*.min.js` matches at any depth

use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::verbose_log;

/// Compiled ignore patterns.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
///
/// use headerlint::ignore::IgnoreMatcher;
///
/// # fn main() -> anyhow::Result<()> {
/// let matcher = IgnoreMatcher::new(&["dist/".to_string(), "*.min.js".to_string()])?;
///
/// assert!(matcher.is_ignored(Path::new("dist/app.js")));
/// assert!(matcher.is_ignored(Path::new("web/vendor.min.js")));
/// assert!(!matcher.is_ignored(Path::new("src/app.js")));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct IgnoreMatcher {
  glob_set: GlobSet,
  pattern_count: usize,
}

impl IgnoreMatcher {
  /// Compiles the given patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid glob.
  pub fn new(patterns: &[String]) -> Result<Self> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
      let pattern = pattern.replace('\\', "/");
      for expanded in expand_pattern(&pattern) {
        builder.add(Glob::new(&expanded).with_context(|| format!("Invalid glob pattern: {}", pattern))?);
      }
    }

    let glob_set = builder.build().context("Failed to build glob set")?;

    Ok(Self {
      glob_set,
      pattern_count: patterns.len(),
    })
  }

  /// Returns `true` if no patterns were given.
  pub const fn is_empty(&self) -> bool {
    self.pattern_count == 0
  }

  /// Returns `true` if `path` matches any pattern.
  pub fn is_ignored(&self, path: &Path) -> bool {
    if self.is_empty() {
      return false;
    }

    let path = path.strip_prefix("./").unwrap_or(path);
    if self.glob_set.is_match(path) {
      verbose_log!("Skipping: {} (matches ignore pattern)", path.display());
      return true;
    }
    false
  }
}

fn expand_pattern(pattern: &str) -> Vec<String> {
  if let Some(dir) = pattern.strip_suffix('/') {
    return vec![
      dir.to_string(),
      format!("{dir}/**"),
      format!("**/{dir}"),
      format!("**/{dir}/**"),
    ];
  }

  if !pattern.contains(['*', '?', '[']) {
    return vec![
      pattern.to_string(),
      format!("**/{pattern}"),
      format!("{pattern}/**"),
      format!("**/{pattern}/**"),
    ];
  }

  if pattern.starts_with("**/") || pattern.starts_with('/') {
    vec![pattern.to_string()]
  } else {
    vec![pattern.to_string(), format!("**/{pattern}")]
  }
}
