//! # Output Module
//!
//! All user-facing terminal output of a run: the start line, the lists of
//! offending files, the summary and the closing hint.
//!
//! Quiet mode keeps stdout scriptable: only bare paths of files that need
//! attention are printed.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::planner::ProblemKind;
use crate::report::{FileReport, FileStatus, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  pub const FAILURE: &str = "\u{2717}"; // ✗
  pub const INCORRECT: &str = "\u{21bb}"; // ↻
  pub const ERROR: &str = "!";
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

#[derive(Clone, Copy)]
enum ListColor {
  Red,
  Yellow,
  Green,
}

/// Print the initial "Checking N files..." or "Fixing N files..." message.
pub fn print_start_message(file_count: usize, fix_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if fix_mode { "Fixing" } else { "Checking" };
  println!("{} {} {}...", verb, file_count, plural(file_count));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the files missing a license header.
pub fn print_missing_files(files: &[&FileReport], workspace_root: Option<&Path>, limit: Option<usize>) {
  print_file_list(
    files,
    workspace_root,
    limit,
    (symbols::FAILURE, ListColor::Red),
    "missing license headers",
  );
}

/// Print the files whose license header is incorrect.
pub fn print_incorrect_files(files: &[&FileReport], workspace_root: Option<&Path>, limit: Option<usize>) {
  print_file_list(
    files,
    workspace_root,
    limit,
    (symbols::INCORRECT, ListColor::Yellow),
    "with incorrect license headers",
  );
}

/// Print the files that could not be checked, with the reason.
pub fn print_failed_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    for file in &sorted_files {
      println!("{}", make_relative_path(&file.path, workspace_root));
    }
    return;
  }

  let count = sorted_files.len();
  println!(
    "{} {} {} could not be checked:",
    symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    plural(count)
  );
  for file in sorted_files {
    let display_path = make_relative_path(&file.path, workspace_root);
    match file.message {
      Some(ref message) => println!("  {} ({})", display_path, message),
      None => println!("  {}", display_path),
    }
  }
}

/// Print the files whose header was fixed.
pub fn print_fixed_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if is_quiet() {
    return;
  }
  print_file_list(
    files,
    workspace_root,
    None,
    (symbols::SUCCESS, ListColor::Green),
    "fixed",
  );
}

fn print_file_list(
  files: &[&FileReport],
  workspace_root: Option<&Path>,
  limit: Option<usize>,
  (symbol, color): (&str, ListColor),
  description: &str,
) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    // Bare paths for scripting
    for file in &sorted_files {
      println!("{}", make_relative_path(&file.path, workspace_root));
    }
    return;
  }

  let count = sorted_files.len();
  let symbol = match color {
    ListColor::Red => symbol.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
    ListColor::Yellow => symbol.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
    ListColor::Green => symbol.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
  };
  println!("{} {} {} {}:", symbol, count, plural(count), description);

  let show_all = is_verbose();
  let effective_limit = if show_all {
    count
  } else {
    limit.unwrap_or(DEFAULT_FILE_LIST_LIMIT)
  };

  for file in sorted_files.iter().take(effective_limit) {
    println!("  {}", make_relative_path(&file.path, workspace_root));
  }

  if !show_all && count > effective_limit {
    println!(
      "  {} (use -v to see all)",
      format!("... and {} more", count - effective_limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the success message when all files have license headers.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have correct license headers.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y missing, Z incorrect, W skipped"
/// Fixed and failed counts are added when non-zero. In verbose mode, also
/// shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let missing_str = if summary.missing > 0 {
    summary.missing.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.missing.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let incorrect_str = if summary.incorrect > 0 {
    summary
      .incorrect
      .if_supports_color(Stream::Stdout, |s| s.yellow())
      .to_string()
  } else {
    summary
      .incorrect
      .if_supports_color(Stream::Stdout, |s| s.cyan())
      .to_string()
  };

  let mut summary_line = format!(
    "Summary: {} OK, {} missing, {} incorrect, {} skipped",
    summary.ok.if_supports_color(Stream::Stdout, |s| s.cyan()),
    missing_str,
    incorrect_str,
    summary.skipped.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );

  if summary.fixed > 0 {
    summary_line.push_str(&format!(
      ", {} fixed",
      summary.fixed.if_supports_color(Stream::Stdout, |s| s.green())
    ));
  }
  if summary.failed > 0 {
    summary_line.push_str(&format!(
      ", {} failed",
      summary.failed.if_supports_color(Stream::Stdout, |s| s.red())
    ));
  }

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// File reports grouped for output.
pub struct CategorizedReports<'a> {
  /// Files reported without a header
  pub missing: Vec<&'a FileReport>,
  /// Files reported with a differing header
  pub incorrect: Vec<&'a FileReport>,
  /// Files whose header was written
  pub fixed: Vec<&'a FileReport>,
  /// Files that could not be checked or written
  pub failed: Vec<&'a FileReport>,
  pub ok: Vec<&'a FileReport>,
  pub skipped: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self {
      missing: Vec::new(),
      incorrect: Vec::new(),
      fixed: Vec::new(),
      failed: Vec::new(),
      ok: Vec::new(),
      skipped: Vec::new(),
    };

    for report in reports {
      match (report.status, report.problem) {
        (FileStatus::Ok, _) => categorized.ok.push(report),
        (FileStatus::Skipped, _) => categorized.skipped.push(report),
        (FileStatus::Fixed, _) => categorized.fixed.push(report),
        (FileStatus::Reported, Some(ProblemKind::Missing)) => categorized.missing.push(report),
        (FileStatus::Reported, Some(ProblemKind::Incorrect)) => categorized.incorrect.push(report),
        (FileStatus::Reported | FileStatus::Failed, _) => categorized.failed.push(report),
      }
    }

    categorized
  }

  /// Returns `true` if any file still needs attention.
  pub fn has_problems(&self) -> bool {
    !self.missing.is_empty() || !self.incorrect.is_empty() || !self.failed.is_empty()
  }
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Make a path relative to the workspace root for display.
fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  if let Some(root) = workspace_root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::planner::Problem;

  fn problem(kind: ProblemKind) -> Problem {
    Problem {
      kind,
      message: "test".to_string(),
      fix: None,
    }
  }

  #[test]
  fn test_categorize_reports_mixed() {
    let reports = vec![
      FileReport::ok(Path::new("src/ok.js")),
      FileReport::reported(Path::new("src/missing.js"), &problem(ProblemKind::Missing)),
      FileReport::reported(Path::new("src/incorrect.css"), &problem(ProblemKind::Incorrect)),
      FileReport::fixed(Path::new("src/fixed.html"), &problem(ProblemKind::Incorrect)),
      FileReport::unfixable(Path::new("src/template.js"), &problem(ProblemKind::TemplateUnreadable)),
      FileReport::skipped(Path::new("README.md"), "unknown"),
    ];

    let categorized = CategorizedReports::from_reports(&reports);

    assert_eq!(categorized.ok.len(), 1);
    assert_eq!(categorized.missing.len(), 1);
    assert_eq!(categorized.incorrect.len(), 1);
    assert_eq!(categorized.fixed.len(), 1);
    assert_eq!(categorized.failed.len(), 1);
    assert_eq!(categorized.skipped.len(), 1);
    assert!(categorized.has_problems());
  }

  #[test]
  fn test_categorize_reports_clean_run() {
    let reports = vec![
      FileReport::ok(Path::new("a.js")),
      FileReport::fixed(Path::new("b.js"), &problem(ProblemKind::Missing)),
      FileReport::skipped(Path::new("c.md"), "unknown"),
    ];

    assert!(!CategorizedReports::from_reports(&reports).has_problems());
  }

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/app.js");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, Some(&root)), "src/app.js");
  }

  #[test]
  fn test_make_relative_path_without_root() {
    let path = PathBuf::from("/workspace/project/src/app.js");
    assert_eq!(make_relative_path(&path, None), "/workspace/project/src/app.js");
  }

  #[test]
  fn test_plural() {
    assert_eq!(plural(1), "file");
    assert_eq!(plural(0), "files");
    assert_eq!(plural(2), "files");
  }
}
