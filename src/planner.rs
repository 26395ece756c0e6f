//! # Fix Planner
//!
//! Decides whether a file's header needs attention and, if so, which text
//! edit brings it in line with the canonical header.
//!
//! A check ends in exactly one of three states:
//! - the header does not open on the first line: [`ProblemKind::Missing`],
//!   fixed by inserting the canonical header at offset 0
//! - the header opens on the first line but differs from the canonical one:
//!   [`ProblemKind::Incorrect`], fixed by replacing the old block
//! - the header matches: no problem

use std::io;
use std::ops::Range;

use serde::Serialize;

use crate::compare::equivalent;
use crate::locator::locate;
use crate::syntax::CommentSyntax;

/// Category of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
  /// The file does not start with a header
  Missing,
  /// The file starts with a header whose content differs
  Incorrect,
  /// The license template could not be read, so the file was not evaluated
  TemplateUnreadable,
}

/// A text edit that turns the checked file into a conforming one.
///
/// Offsets are byte offsets into the checked source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Fix {
  /// Insert `text` before `offset`
  Insert { offset: usize, text: String },
  /// Replace the bytes in `range` with `text`
  Replace { range: Range<usize>, text: String },
}

impl Fix {
  /// The text the fix writes.
  pub fn text(&self) -> &str {
    match self {
      Fix::Insert { text, .. } | Fix::Replace { text, .. } => text,
    }
  }

  /// Applies the fix to `source`, returning the new file content.
  ///
  /// Offsets past the end of `source` are clamped to its length.
  pub fn apply(&self, source: &str) -> String {
    let (range, text) = match self {
      Fix::Insert { offset, text } => (*offset..*offset, text),
      Fix::Replace { range, text } => (range.clone(), text),
    };
    let end = range.end.min(source.len());
    let start = range.start.min(end);

    let mut fixed = String::with_capacity(source.len() + text.len());
    fixed.push_str(&source[..start]);
    fixed.push_str(text);
    fixed.push_str(&source[end..]);
    fixed
  }
}

/// A problem reported for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
  pub kind: ProblemKind,
  /// Human-readable message shown to the user
  pub message: String,
  /// Edit that resolves the problem, when one can be computed
  pub fix: Option<Fix>,
}

impl Problem {
  pub const MISSING_MESSAGE: &'static str = "Missing license header";
  pub const INCORRECT_MESSAGE: &'static str = "License header is incorrect";

  fn missing(header: &str) -> Self {
    Self {
      kind: ProblemKind::Missing,
      message: Self::MISSING_MESSAGE.to_string(),
      fix: Some(Fix::Insert {
        offset: 0,
        text: header.to_string(),
      }),
    }
  }

  fn incorrect(range: Range<usize>, header: &str) -> Self {
    Self {
      kind: ProblemKind::Incorrect,
      message: Self::INCORRECT_MESSAGE.to_string(),
      fix: Some(Fix::Replace {
        range,
        text: header.to_string(),
      }),
    }
  }

  /// Problem for a template that failed to load. Carries no fix.
  pub fn template_unreadable(error: &io::Error) -> Self {
    Self {
      kind: ProblemKind::TemplateUnreadable,
      message: format!("Failed to read license file: {error}"),
      fix: None,
    }
  }
}

/// Compares the header of `source` against the rendered `header`.
///
/// Returns `None` when the file already conforms.
pub fn plan(source: &str, syntax: &CommentSyntax, header: &str) -> Option<Problem> {
  let lines: Vec<&str> = source.split('\n').collect();
  let location = locate(&lines, syntax);

  if !location.starts_at_top() {
    return Some(Problem::missing(header));
  }

  let existing = match location.end {
    Some(end) => lines[..=end].join("\n"),
    None => String::new(),
  };

  if equivalent(&existing, header) {
    return None;
  }

  // Line after the end token, 1-based. Without an end token this is line 1,
  // which turns the replacement into an insertion at the top.
  let after_end_line = location.end.map_or(1, |end| end + 2);
  let range = line_start_offset(source, 1)..line_start_offset(source, after_end_line);

  Some(Problem::incorrect(range, header))
}

/// Byte offset of column 0 of the 1-based `line`.
///
/// Lines past the last one resolve to the end of the text.
pub fn line_start_offset(source: &str, line: usize) -> usize {
  if line <= 1 {
    return 0;
  }

  source
    .match_indices('\n')
    .nth(line - 2)
    .map_or(source.len(), |(index, _)| index + 1)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::resolve;
  use crate::templates::render_header;

  const LICENSE: &str = "Copyright 2024\nAll rights reserved";

  fn js_header() -> String {
    render_header(LICENSE, &resolve("js"))
  }

  #[test]
  fn test_plan_matching_header() {
    let header = js_header();
    let source = format!("{header}const a = 1;\n");

    assert_eq!(plan(&source, &resolve("js"), &header), None);
  }

  #[test]
  fn test_plan_header_only_file() {
    let header = js_header();
    assert_eq!(plan(&header, &resolve("js"), &header), None);
  }

  #[test]
  fn test_plan_whitespace_differences_are_accepted() {
    let header = js_header();
    let source = "  /*\n\n   * Copyright 2024\n\n * All rights reserved\n    */\nconst a = 1;\n";

    assert_eq!(plan(source, &resolve("js"), &header), None);
  }

  #[test]
  fn test_plan_missing_header() {
    let header = js_header();
    let source = "const a = 1;\n";

    let problem = plan(source, &resolve("js"), &header).expect("problem expected");
    assert_eq!(problem.kind, ProblemKind::Missing);
    assert_eq!(problem.message, "Missing license header");
    assert_eq!(
      problem.fix,
      Some(Fix::Insert {
        offset: 0,
        text: header.clone()
      })
    );
  }

  #[test]
  fn test_plan_header_not_on_first_line_is_missing() {
    let header = js_header();
    let source = format!("\n{header}const a = 1;\n");

    let problem = plan(&source, &resolve("js"), &header).expect("problem expected");
    assert_eq!(problem.kind, ProblemKind::Missing);

    let fixed = problem.fix.expect("fix expected").apply(&source);
    assert_eq!(fixed, format!("{header}{source}"));
  }

  #[test]
  fn test_plan_incorrect_header() {
    let header = js_header();
    let source = "/*\n* Copyright 2023\n* All rights reserved\n*/\nconst a = 1;\n";

    let problem = plan(source, &resolve("js"), &header).expect("problem expected");
    assert_eq!(problem.kind, ProblemKind::Incorrect);
    assert_eq!(problem.message, "License header is incorrect");

    let fix = problem.fix.expect("fix expected");
    assert_eq!(
      fix,
      Fix::Replace {
        range: 0..45,
        text: header.clone()
      }
    );
    assert_eq!(fix.apply(source), format!("{header}const a = 1;\n"));
  }

  #[test]
  fn test_plan_incorrect_html_header() {
    let license = "Copyright 2024 ACME";
    let header = render_header(license, &resolve("html"));
    let source = "<!--\n-- Copyright 2020 ACME\n-->\n<html></html>\n";

    let problem = plan(source, &resolve("html"), &header).expect("problem expected");
    assert_eq!(problem.kind, ProblemKind::Incorrect);

    let fixed = problem.fix.expect("fix expected").apply(source);
    assert_eq!(fixed, "<!--\n-- Copyright 2024 ACME\n-->\n<html></html>\n");
  }

  #[test]
  fn test_plan_end_on_last_line_without_newline() {
    let header = js_header();
    let source = "/*\n* Copyright 2023\n*/";

    let problem = plan(source, &resolve("js"), &header).expect("problem expected");
    let fix = problem.fix.expect("fix expected");
    assert_eq!(
      fix,
      Fix::Replace {
        range: 0..source.len(),
        text: header.clone()
      }
    );
    assert_eq!(fix.apply(source), header);
  }

  #[test]
  fn test_plan_without_end_token_replaces_empty_range() {
    let header = js_header();
    let source = "/*\n* Copyright 2024\nconst a = 1;\n";

    let problem = plan(source, &resolve("js"), &header).expect("problem expected");
    assert_eq!(problem.kind, ProblemKind::Incorrect);
    assert_eq!(
      problem.fix,
      Some(Fix::Replace {
        range: 0..0,
        text: header.clone()
      })
    );
  }

  #[test]
  fn test_plan_end_token_in_body_extends_the_block() {
    // The header never closes, so the block runs until a body line that
    // starts with `*/`; everything up to there gets replaced.
    let header = js_header();
    let source = "/*\n* Copyright 2024\nconst a = 1;\n*/ const b = 2;\nconst c = 3;\n";

    let problem = plan(source, &resolve("js"), &header).expect("problem expected");
    let fixed = problem.fix.expect("fix expected").apply(source);
    assert_eq!(fixed, format!("{header}const c = 3;\n"));
  }

  #[test]
  fn test_plan_unknown_syntax_is_always_missing() {
    let syntax = resolve("md");
    let header = render_header(LICENSE, &syntax);
    let source = "# Title\n";

    let problem = plan(source, &syntax, &header).expect("problem expected");
    assert_eq!(problem.kind, ProblemKind::Missing);
    assert_eq!(problem.fix.as_ref().map(Fix::text), Some(header.as_str()));
  }

  #[test]
  fn test_line_start_offset() {
    let source = "ab\ncd\n\nef";
    assert_eq!(line_start_offset(source, 0), 0);
    assert_eq!(line_start_offset(source, 1), 0);
    assert_eq!(line_start_offset(source, 2), 3);
    assert_eq!(line_start_offset(source, 3), 6);
    assert_eq!(line_start_offset(source, 4), 7);
    assert_eq!(line_start_offset(source, 5), source.len());
    assert_eq!(line_start_offset(source, 100), source.len());
  }

  #[test]
  fn test_fix_apply_insert() {
    let fix = Fix::Insert {
      offset: 0,
      text: "/*\n* x\n*/\n".to_string(),
    };
    assert_eq!(fix.apply("body\n"), "/*\n* x\n*/\nbody\n");
    assert_eq!(fix.apply(""), "/*\n* x\n*/\n");
  }

  #[test]
  fn test_template_unreadable_has_no_fix() {
    let error = io::Error::new(io::ErrorKind::NotFound, "no such file");
    let problem = Problem::template_unreadable(&error);

    assert_eq!(problem.kind, ProblemKind::TemplateUnreadable);
    assert_eq!(problem.message, "Failed to read license file: no such file");
    assert!(problem.fix.is_none());
  }
}
