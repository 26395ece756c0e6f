//! # Comment Syntax Module
//!
//! Maps file extensions to the comment tokens used to render and locate a
//! license header.
//!
//! Two families of files are recognized out of the box:
//! - code (`js`, `ts`, `jsx`, `tsx`, `css`): `/*`, `*`, `*/`
//! - template (`html`): `<!--`, `--`, `-->`
//!
//! Every other extension resolves to the empty syntax. A
//! [`ConfigurableResolver`] lets users map extra extensions through the
//! `[comment-styles]` table of the config file.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::config::CommentStyleConfig;

/// The three literal tokens that open, prefix each interior line of, and
/// close a header comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentSyntax {
  /// Token on the first line of the header (e.g. `/*`)
  pub start: String,

  /// Token prepended to every license line (e.g. `*`)
  pub prefix: String,

  /// Token on the last line of the header (e.g. `*/`)
  pub end: String,
}

impl CommentSyntax {
  pub fn new(start: &str, prefix: &str, end: &str) -> Self {
    Self {
      start: start.to_string(),
      prefix: prefix.to_string(),
      end: end.to_string(),
    }
  }

  /// The syntax used for extensions nobody knows how to comment.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Returns `true` when no token is set at all.
  pub fn is_empty(&self) -> bool {
    self.start.is_empty() && self.prefix.is_empty() && self.end.is_empty()
  }
}

impl From<&CommentStyleConfig> for CommentSyntax {
  fn from(config: &CommentStyleConfig) -> Self {
    Self::new(&config.start, &config.prefix, &config.end)
  }
}

/// Closed set of comment families known to the builtin resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentFamily {
  /// Script and stylesheet files
  Code,
  /// Markup files
  Template,
  /// Anything without a known comment syntax
  Unknown,
}

impl CommentFamily {
  /// Determines the family for a lowercase extension without the leading dot.
  pub fn from_extension(extension: &str) -> Self {
    match extension {
      "js" | "ts" | "jsx" | "tsx" | "css" => CommentFamily::Code,
      "html" => CommentFamily::Template,
      _ => CommentFamily::Unknown,
    }
  }

  /// The comment tokens for this family.
  pub fn syntax(self) -> CommentSyntax {
    match self {
      CommentFamily::Code => CommentSyntax::new("/*", "*", "*/"),
      CommentFamily::Template => CommentSyntax::new("<!--", "--", "-->"),
      CommentFamily::Unknown => CommentSyntax::empty(),
    }
  }
}

/// Resolves the builtin comment syntax for an extension.
///
/// Unknown extensions are not an error; they get [`CommentSyntax::empty`].
pub fn resolve(extension: &str) -> CommentSyntax {
  CommentFamily::from_extension(extension).syntax()
}

/// Strategy for picking the comment syntax of a file extension.
///
/// Extensions are passed lowercase and without the leading dot.
pub trait CommentSyntaxResolver: Send + Sync {
  /// Resolve the comment syntax for the given extension.
  fn resolve(&self, extension: &str) -> CommentSyntax;

  /// Returns `true` if the extension maps to a non-empty syntax.
  fn is_known(&self, extension: &str) -> bool {
    !self.resolve(extension).is_empty()
  }
}

/// Resolver backed by the hardcoded family table.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl CommentSyntaxResolver for BuiltinResolver {
  fn resolve(&self, extension: &str) -> CommentSyntax {
    resolve(extension)
  }
}

/// Resolver that checks user overrides first, then falls back to the
/// builtin table.
#[derive(Debug, Clone)]
pub struct ConfigurableResolver {
  overrides: Arc<HashMap<String, CommentStyleConfig>>,
}

impl ConfigurableResolver {
  /// Creates a resolver from `[comment-styles]` overrides.
  ///
  /// Keys are expected to be lowercase already; [`crate::config::Config::load`]
  /// normalizes them.
  pub fn new(overrides: HashMap<String, CommentStyleConfig>) -> Self {
    Self {
      overrides: Arc::new(overrides),
    }
  }
}

impl CommentSyntaxResolver for ConfigurableResolver {
  fn resolve(&self, extension: &str) -> CommentSyntax {
    if let Some(style) = self.overrides.get(extension) {
      trace!("Using config comment style override for: .{}", extension);
      return CommentSyntax::from(style);
    }

    resolve(extension)
  }
}

/// Create a resolver for the given overrides.
///
/// Without overrides the cheaper [`BuiltinResolver`] is returned.
pub fn create_resolver(overrides: HashMap<String, CommentStyleConfig>) -> Box<dyn CommentSyntaxResolver> {
  if overrides.is_empty() {
    Box::new(BuiltinResolver)
  } else {
    Box::new(ConfigurableResolver::new(overrides))
  }
}
