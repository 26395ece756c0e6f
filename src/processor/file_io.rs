//! # File I/O Module
//!
//! File reading and writing helpers for the processor.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the whole file as UTF-8.
  ///
  /// The header check needs the complete text: the end token is searched over
  /// every line and a replacement can reach arbitrarily far into the file.
  pub fn read_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Write file content.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
