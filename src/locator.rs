//! # Header Locator
//!
//! Finds the line indices of an existing header's start and end tokens.
//!
//! Both searches scan the whole file from the top and are independent of
//! each other, so a body line that happens to begin with the end token can
//! be picked up as the header's end when the real header lacks one.

use crate::syntax::CommentSyntax;

/// Position of the header delimiters, as 0-based line indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderLocation {
  /// First line whose trimmed text starts with the start token
  pub start: Option<usize>,
  /// First line whose trimmed text starts with the end token
  pub end: Option<usize>,
}

impl HeaderLocation {
  /// Returns `true` if the header opens on the very first line.
  pub const fn starts_at_top(&self) -> bool {
    matches!(self.start, Some(0))
  }
}

/// Locates the header delimiters in `lines`.
///
/// An empty token never matches, so files of an unknown comment family
/// always come back with both indices unset.
pub fn locate<S: AsRef<str>>(lines: &[S], syntax: &CommentSyntax) -> HeaderLocation {
  HeaderLocation {
    start: find_line_starting_with(lines, &syntax.start),
    end: find_line_starting_with(lines, &syntax.end),
  }
}

fn find_line_starting_with<S: AsRef<str>>(lines: &[S], token: &str) -> Option<usize> {
  if token.is_empty() {
    return None;
  }

  lines.iter().position(|line| line.as_ref().trim().starts_with(token))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::resolve;

  fn lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
  }

  #[test]
  fn test_locate_header_at_top() {
    let source = "/*\n* Copyright 2024\n*/\nconst a = 1;\n";
    let location = locate(&lines(source), &resolve("js"));

    assert_eq!(location.start, Some(0));
    assert_eq!(location.end, Some(2));
    assert!(location.starts_at_top());
  }

  #[test]
  fn test_locate_ignores_leading_indentation() {
    let source = "   <!--\n  -- Copyright 2024\n   -->\n<html></html>";
    let location = locate(&lines(source), &resolve("html"));

    assert_eq!(location, HeaderLocation { start: Some(0), end: Some(2) });
  }

  #[test]
  fn test_locate_no_header() {
    let source = "const a = 1;\nconst b = 2;\n";
    let location = locate(&lines(source), &resolve("js"));

    assert_eq!(location, HeaderLocation::default());
    assert!(!location.starts_at_top());
  }

  #[test]
  fn test_locate_header_below_code() {
    let source = "'use strict';\n/*\n* Copyright 2024\n*/\n";
    let location = locate(&lines(source), &resolve("js"));

    assert_eq!(location.start, Some(1));
    assert_eq!(location.end, Some(3));
    assert!(!location.starts_at_top());
  }

  #[test]
  fn test_locate_end_token_scan_is_unbounded() {
    // The header never closes, so the first body line that starts with the
    // end token is taken as the end of the header.
    let source = "/*\n* Copyright 2024\nconst a = 1;\n\n\n*/ const b = 2;\n";
    let location = locate(&lines(source), &resolve("js"));

    assert_eq!(location.start, Some(0));
    assert_eq!(location.end, Some(5));
  }

  #[test]
  fn test_locate_missing_end_token() {
    let source = "/*\n* Copyright 2024\nconst a = 1;";
    let location = locate(&lines(source), &resolve("js"));

    assert_eq!(location.start, Some(0));
    assert_eq!(location.end, None);
  }

  #[test]
  fn test_locate_empty_tokens_never_match() {
    let source = "# Title\n\nSome text\n";
    let location = locate(&lines(source), &resolve("md"));

    assert_eq!(location, HeaderLocation::default());
  }

  #[test]
  fn test_locate_prefix_lines_do_not_count_as_start() {
    // `*` lines must not be confused with the `/*` start token.
    let source = "* Copyright 2024\n*/\n";
    let location = locate(&lines(source), &resolve("css"));

    assert_eq!(location.start, None);
    assert_eq!(location.end, Some(1));
  }
}
