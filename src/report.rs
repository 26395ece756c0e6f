//! # Report Module
//!
//! Captures the outcome of every checked file and writes it out as a JSON
//! report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::planner::{Problem, ProblemKind};

/// Outcome of checking one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  /// The file already carries an equivalent header
  Ok,
  /// A problem was reported and left in place (check mode)
  Reported,
  /// A problem was reported and its fix written to disk
  Fixed,
  /// The file was not checked
  Skipped,
  /// The file could not be evaluated
  Failed,
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  pub status: FileStatus,
  /// Kind of the reported problem, if any
  pub problem: Option<ProblemKind>,
  /// Problem message, skip reason, or error text
  pub message: Option<String>,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

impl FileReport {
  pub fn ok(path: &Path) -> Self {
    Self {
      path: path.to_path_buf(),
      status: FileStatus::Ok,
      problem: None,
      message: None,
    }
  }

  pub fn reported(path: &Path, problem: &Problem) -> Self {
    Self::with_problem(path, FileStatus::Reported, problem)
  }

  pub fn fixed(path: &Path, problem: &Problem) -> Self {
    Self::with_problem(path, FileStatus::Fixed, problem)
  }

  /// A problem that carries no fix (the template could not be read).
  pub fn unfixable(path: &Path, problem: &Problem) -> Self {
    Self::with_problem(path, FileStatus::Failed, problem)
  }

  pub fn skipped(path: &Path, reason: &str) -> Self {
    Self {
      path: path.to_path_buf(),
      status: FileStatus::Skipped,
      problem: None,
      message: Some(reason.to_string()),
    }
  }

  /// The file itself could not be read or written.
  pub fn failed(path: &Path, error: &anyhow::Error) -> Self {
    Self {
      path: path.to_path_buf(),
      status: FileStatus::Failed,
      problem: None,
      message: Some(format!("{error:#}")),
    }
  }

  fn with_problem(path: &Path, status: FileStatus, problem: &Problem) -> Self {
    Self {
      path: path.to_path_buf(),
      status,
      problem: Some(problem.kind),
      message: Some(problem.message.clone()),
    }
  }

  /// Returns `true` if this file still needs attention after the run.
  pub const fn needs_attention(&self) -> bool {
    matches!(self.status, FileStatus::Reported | FileStatus::Failed)
  }
}

/// Summary of processing results
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files seen, skipped ones included
  pub total_files: usize,
  /// Files that already conform
  pub ok: usize,
  /// Files without a header at the top
  pub missing: usize,
  /// Files with a header whose content differs
  pub incorrect: usize,
  /// Files whose header was written to disk
  pub fixed: usize,
  pub skipped: usize,
  pub failed: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the summary was created
  pub timestamp: i64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports.
  ///
  /// `missing` and `incorrect` count problems still present on disk; fixed
  /// files are only counted under `fixed`.
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      ok: 0,
      missing: 0,
      incorrect: 0,
      fixed: 0,
      skipped: 0,
      failed: 0,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Local::now().timestamp(),
    };

    for report in reports {
      match report.status {
        FileStatus::Ok => summary.ok += 1,
        FileStatus::Fixed => summary.fixed += 1,
        FileStatus::Skipped => summary.skipped += 1,
        FileStatus::Failed => summary.failed += 1,
        FileStatus::Reported => match report.problem {
          Some(ProblemKind::Missing) => summary.missing += 1,
          Some(ProblemKind::Incorrect) => summary.incorrect += 1,
          Some(ProblemKind::TemplateUnreadable) | None => summary.failed += 1,
        },
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Writes a JSON report of `files` to `output_path`.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json_report(output_path: &Path, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let mut files = files.to_vec();
  files.sort_by(|a, b| a.path.cmp(&b.path));

  let report = JsonReport {
    generated_at: Local::now().to_rfc3339(),
    summary,
    files: &files,
  };

  let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
  fs::write(output_path, json).with_context(|| format!("Failed to write report to {}", output_path.display()))?;

  Ok(())
}
