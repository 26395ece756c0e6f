//! # File Collector Module
//!
//! Expands the user's patterns into a list of files. A pattern is a file, a
//! directory (walked recursively, honoring `.gitignore`) or a glob.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::ignore::IgnoreMatcher;

/// Collects files for processing.
pub struct FileCollector {
  ignore: IgnoreMatcher,
}

impl FileCollector {
  pub const fn new(ignore: IgnoreMatcher) -> Self {
    Self { ignore }
  }

  /// Collects all files matched by `patterns`, minus ignored ones.
  ///
  /// The result is sorted and free of duplicates, so overlapping patterns
  /// (e.g. `src` and `src/app.js`) never process a file twice.
  ///
  /// # Errors
  ///
  /// Returns an error if a glob pattern is invalid.
  pub fn collect(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let start_time = std::time::Instant::now();
    let mut files = Vec::new();

    for pattern in patterns {
      let path = PathBuf::from(pattern);
      if path.is_file() {
        files.push(path);
      } else if path.is_dir() {
        files.extend(self.traverse_directory(&path));
      } else {
        let entries = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        for entry in entries {
          match entry {
            Ok(path) if path.is_dir() => files.extend(self.traverse_directory(&path)),
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Error with glob pattern {}: {}", pattern, e),
          }
        }
      }
    }

    let mut files: Vec<PathBuf> = files
      .into_iter()
      .map(|path| PathBuf::from(normalize_path_string(&path.to_string_lossy().replace('\\', "/"))))
      .filter(|path| !self.ignore.is_ignored(path))
      .collect();
    files.sort();
    files.dedup();

    debug!(
      "Collected {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }

  /// Walks `dir` recursively and returns its files.
  ///
  /// Hidden entries and anything excluded by `.gitignore` files are skipped;
  /// a git repository is not required for the latter.
  pub fn traverse_directory(&self, dir: &Path) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", dir.display());

    let mut builder = WalkBuilder::new(dir);
    builder.hidden(true).git_ignore(true).git_exclude(true).require_git(false);

    let mut files = Vec::new();
    for result in builder.build() {
      match result {
        Ok(entry) => {
          if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
          }
        }
        Err(e) => warn!("Error reading directory {}: {}", dir.display(), e),
      }
    }

    files
  }
}

/// Normalizes a path string by resolving `.` and `..` segments.
///
/// Used on forward-slash path strings so ignore patterns see the same shape
/// regardless of how the pattern that produced the path was spelled.
///
/// # Examples
/// - `./src/app.js` -> `src/app.js`
/// - `a/b/../../c/app.js` -> `c/app.js`
/// - `../other/app.js` -> `../other/app.js` (can't resolve, keeps as-is)
pub fn normalize_path_string(path: &str) -> String {
  let mut components: Vec<&str> = Vec::new();

  for segment in path.split('/') {
    if segment == ".." {
      if let Some(last) = components.last()
        && *last != ".."
        && !last.is_empty()
      {
        components.pop();
        continue;
      }
      components.push(segment);
    } else if segment == "." {
      continue;
    } else {
      components.push(segment);
    }
  }

  components.join("/")
}
