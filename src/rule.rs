//! # Header Rule
//!
//! The entry point hosts call for each file: it resolves the comment syntax,
//! reads the template, renders the canonical header and hands everything to
//! the [planner](crate::planner).
//!
//! ## Example
//!
//! ```rust
//! use std::io;
//!
//! use headerlint::planner::ProblemKind;
//! use headerlint::rule::HeaderRule;
//!
//! let rule = HeaderRule::with_source(|| Ok::<_, io::Error>("Copyright 2024".to_string()));
//!
//! assert!(rule.check("/*\n* Copyright 2024\n*/\nlet a;\n", "js").is_none());
//!
//! let problem = rule.check("let a;\n", "js").expect("header is missing");
//! assert_eq!(problem.kind, ProblemKind::Missing);
//! ```

use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use crate::config::ConfigError;
use crate::planner::{Problem, plan};
use crate::syntax::{BuiltinResolver, CommentSyntaxResolver};
use crate::templates::{FileTemplate, TemplateSource, render_header};

/// Validated options of the header rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOptions {
  /// Path to the license template
  pub file: PathBuf,
}

impl RuleOptions {
  /// Validates the rule options.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::MissingLicenseFile`] when no template path was
  /// given. The rule cannot run at all without one.
  pub fn new(file: Option<PathBuf>) -> Result<Self, ConfigError> {
    let file = file.ok_or(ConfigError::MissingLicenseFile)?;
    Ok(Self { file })
  }
}

/// Checks one file's header against the template read from `template`.
///
/// The template is read exactly once per call. A read failure is reported
/// as a problem without a fix and the header itself is not evaluated.
pub fn check_header(source: &str, extension: &str, template: &dyn TemplateSource) -> Option<Problem> {
  check_with_resolver(source, extension, template, &BuiltinResolver)
}

fn check_with_resolver(
  source: &str,
  extension: &str,
  template: &dyn TemplateSource,
  resolver: &dyn CommentSyntaxResolver,
) -> Option<Problem> {
  let syntax = resolver.resolve(extension);

  let license_text = match template.read() {
    Ok(text) => text,
    Err(e) => {
      warn!("Failed to read license template: {}", e);
      return Some(Problem::template_unreadable(&e));
    }
  };

  let header = render_header(&license_text, &syntax);
  let problem = plan(source, &syntax, &header);
  trace!(
    "Checked .{} source: {}",
    extension,
    problem.as_ref().map_or("ok", |p| p.message.as_str())
  );
  problem
}

/// A configured license header rule.
///
/// Holds no state between checks; it can be shared across threads and every
/// check re-reads the template.
pub struct HeaderRule {
  template: Box<dyn TemplateSource>,
  resolver: Box<dyn CommentSyntaxResolver>,
}

impl std::fmt::Debug for HeaderRule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HeaderRule")
      .field("template", &"<template source>")
      .field("resolver", &"<resolver>")
      .finish()
  }
}

impl HeaderRule {
  /// Creates a rule reading its template from `options.file`.
  pub fn new(options: RuleOptions) -> Self {
    Self::with_source(FileTemplate::new(options.file))
  }

  /// Validates `file` and creates a rule from it.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::MissingLicenseFile`] when `file` is `None`.
  pub fn from_file(file: Option<&Path>) -> Result<Self, ConfigError> {
    let options = RuleOptions::new(file.map(Path::to_path_buf))?;
    Ok(Self::new(options))
  }

  /// Creates a rule around any template source, using the builtin comment
  /// syntax table.
  pub fn with_source(template: impl TemplateSource + 'static) -> Self {
    Self {
      template: Box::new(template),
      resolver: Box::new(BuiltinResolver),
    }
  }

  /// Replaces the comment syntax resolver.
  pub fn with_resolver(mut self, resolver: Box<dyn CommentSyntaxResolver>) -> Self {
    self.resolver = resolver;
    self
  }

  /// The resolver used to map extensions to comment syntaxes.
  pub fn resolver(&self) -> &dyn CommentSyntaxResolver {
    self.resolver.as_ref()
  }

  /// Checks `source`, whose file has the given lowercase extension.
  ///
  /// Returns `None` when the file carries an equivalent header.
  pub fn check(&self, source: &str, extension: &str) -> Option<Problem> {
    check_with_resolver(source, extension, self.template.as_ref(), self.resolver.as_ref())
  }
}
