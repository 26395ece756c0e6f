//! # Templates Module
//!
//! This module reads the license template and renders it into the exact
//! header block a conforming file must start with.
//!
//! The module includes:
//! - [`TemplateSource`] for reading the raw license text on every check
//! - [`FileTemplate`] reading the template from disk
//! - [`render_header`] for wrapping license lines in a [`CommentSyntax`]
//!
//! ## Example
//!
//! ```rust
//! use headerlint::syntax::resolve;
//! use headerlint::templates::render_header;
//!
//! let header = render_header("Copyright 2024\nAll rights reserved", &resolve("js"));
//! assert_eq!(header, "/*\n* Copyright 2024\n* All rights reserved\n*/\n");
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::trace;

use crate::syntax::CommentSyntax;

/// Source of the raw license template text.
///
/// Implementations are read once per check and must not cache: editing the
/// template between two checks is reflected in the second one.
pub trait TemplateSource: Send + Sync {
  /// Read the full template text.
  ///
  /// # Errors
  ///
  /// Returns the underlying I/O error if the template cannot be read or is
  /// not valid UTF-8.
  fn read(&self) -> io::Result<String>;
}

/// Any closure returning the template text can be used as a source.
///
/// This is how tests and embedding hosts inject in-memory templates.
impl<F> TemplateSource for F
where
  F: Fn() -> io::Result<String> + Send + Sync,
{
  fn read(&self) -> io::Result<String> {
    self()
  }
}

/// Template read from a file on every call.
#[derive(Debug, Clone)]
pub struct FileTemplate {
  path: PathBuf,
}

impl FileTemplate {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl TemplateSource for FileTemplate {
  fn read(&self) -> io::Result<String> {
    trace!("Reading license template from: {}", self.path.display());
    fs::read_to_string(&self.path)
  }
}

/// Returns the license body lines: every line that is not blank, in order.
pub fn license_lines(license_text: &str) -> impl Iterator<Item = &str> {
  license_text.split('\n').filter(|line| !line.trim().is_empty())
}

/// Renders the canonical header block for `license_text`.
///
/// Blank template lines are dropped. Each remaining line is emitted as
/// `"{prefix} {line}"` with its content untouched, the block is wrapped in
/// the start and end tokens, and the result always ends with a newline.
pub fn render_header(license_text: &str, syntax: &CommentSyntax) -> String {
  let body = license_lines(license_text)
    .map(|line| format!("{} {}", syntax.prefix, line))
    .collect::<Vec<_>>()
    .join("\n");

  format!("{}\n{}\n{}\n", syntax.start, body, syntax.end)
}
