//! # Diff Module
//!
//! Renders the line diff between a file and its fixed version, so a check
//! run can show what `--fix` would change.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for proposed header fixes.
///
/// This struct handles:
/// - Printing diffs to stderr
/// - Appending diffs to a single consolidated file
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that collects all diffs of the run
  pub save_diff_path: Option<PathBuf>,

  /// Serializes writes from parallel workers
  write_lock: Mutex<()>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
      write_lock: Mutex::new(()),
    }
  }

  /// Returns `true` if diffs are shown or saved.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run never appends to a previous one.
  ///
  /// # Errors
  ///
  /// Returns an error if the diff file cannot be created.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      File::create(path).with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Shows and/or saves the diff between `original` and `new`.
  ///
  /// # Errors
  ///
  /// Returns an error if the diff file cannot be opened or written.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let diff_content = render_diff(path, original, new);

    // Hold the lock so diffs of different files are not interleaved.
    let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if self.show_diff {
      eprint!("{}", diff_content);
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(diff_content.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a line diff with `-`, `+` and ` ` markers under a per-file
/// heading.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);

  let mut diff_content = format!("Diff for {}:\n", path.display());
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    diff_content.push_str(sign);
    diff_content.push_str(change.value());
    if change.missing_newline() {
      diff_content.push('\n');
    }
  }
  diff_content.push('\n');

  diff_content
}
