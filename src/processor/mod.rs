//! # Processor Module
//!
//! Runs the header rule over many files and applies or previews fixes.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`file_collector`] - Pattern expansion and directory traversal
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules around a [`HeaderRule`].

mod file_collector;
mod file_io;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
pub use file_collector::{FileCollector, normalize_path_string};
pub use file_io::FileIO;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::diff::DiffManager;
use crate::ignore::IgnoreMatcher;
use crate::info_log;
use crate::report::FileReport;
use crate::rule::HeaderRule;

/// Reason recorded for files whose extension has no comment syntax.
pub const UNKNOWN_EXTENSION_REASON: &str = "No comment syntax defined for extension";

const UTF8_BOM: &str = "\u{FEFF}";

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub rule: HeaderRule,

  /// Write fixes to disk instead of only reporting problems
  pub fix: bool,

  /// Also check files whose extension has no comment syntax
  pub include_unknown: bool,

  pub ignore_patterns: Vec<String>,
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a check-only configuration for `rule`.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     fix: true,
  ///     ..ProcessorConfig::new(rule)
  /// }
  /// ```
  pub const fn new(rule: HeaderRule) -> Self {
    Self {
      rule,
      fix: false,
      include_unknown: false,
      ignore_patterns: Vec::new(),
      diff_manager: None,
    }
  }
}

/// Processor for checking and fixing license headers across files.
///
/// Every file is checked independently, so batches run in parallel on the
/// rayon pool. Only the report list is shared between workers.
pub struct Processor {
  rule: HeaderRule,
  fix: bool,
  include_unknown: bool,
  diff_manager: DiffManager,
  file_collector: FileCollector,

  /// Counter for the total number of files processed
  pub files_processed: AtomicUsize,

  /// Collection of file reports for generating reports
  pub file_reports: Mutex<Vec<FileReport>>,
}

impl Processor {
  /// Batch size for processing files to reduce overhead.
  const BATCH_SIZE: usize = 8;

  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let ignore = IgnoreMatcher::new(&config.ignore_patterns)?;

    Ok(Self {
      rule: config.rule,
      fix: config.fix,
      include_unknown: config.include_unknown,
      diff_manager: config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None)),
      file_collector: FileCollector::new(ignore),
      files_processed: AtomicUsize::new(0),
      file_reports: Mutex::new(Vec::new()),
    })
  }

  /// Expands `patterns` into the files a run would process.
  ///
  /// # Errors
  ///
  /// Returns an error if a glob pattern is invalid.
  pub fn collect_files(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
    self.file_collector.collect(patterns)
  }

  /// Processes a list of file or directory patterns.
  ///
  /// Returns `true` if any file still has a problem after the run: in check
  /// mode every reported problem counts, in fix mode only the ones that could
  /// not be fixed.
  ///
  /// # Errors
  ///
  /// Returns an error if a glob pattern is invalid.
  pub fn process(&self, patterns: &[String]) -> Result<bool> {
    let files = self.collect_files(patterns)?;
    Ok(self.process_files(files))
  }

  /// Processes an already collected file list.
  pub fn process_files(&self, files: Vec<PathBuf>) -> bool {
    if files.is_empty() {
      debug!("No files to process");
      return false;
    }

    let files_len = files.len();
    let process_start = std::time::Instant::now();
    debug!(
      "Processing {} files in {} batches (batch size: {})",
      files_len,
      files_len.div_ceil(Self::BATCH_SIZE),
      Self::BATCH_SIZE
    );

    let batch_results: Vec<(Vec<FileReport>, bool)> = files
      .par_chunks(Self::BATCH_SIZE)
      .map(|batch| self.process_file_batch(batch))
      .collect();

    let mut has_problems = false;
    let mut local_reports = Vec::with_capacity(files_len);
    for (batch_reports, batch_has_problems) in batch_results {
      local_reports.extend(batch_reports);
      has_problems |= batch_has_problems;
    }

    debug!(
      "Processed {} files in {}ms",
      files_len,
      process_start.elapsed().as_millis()
    );

    let mut reports = self.file_reports.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    reports.extend(local_reports);

    has_problems
  }

  /// Takes the collected reports, leaving the processor's list empty.
  pub fn take_reports(&self) -> Vec<FileReport> {
    let mut reports = self.file_reports.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    std::mem::take(&mut *reports)
  }

  fn process_file_batch(&self, files: &[PathBuf]) -> (Vec<FileReport>, bool) {
    let mut batch_reports = Vec::with_capacity(files.len());
    let mut has_problems = false;

    for path in files {
      let report = match self.process_single_file(path) {
        Ok(report) => report,
        Err(e) => {
          eprintln!("Error processing {}: {:#}", path.display(), e);
          FileReport::failed(path, &e)
        }
      };
      has_problems |= report.needs_attention();
      batch_reports.push(report);
    }

    (batch_reports, has_problems)
  }

  fn process_single_file(&self, path: &Path) -> Result<FileReport> {
    self.files_processed.fetch_add(1, Ordering::Relaxed);

    let extension = file_extension(path);
    if !self.include_unknown && !self.rule.resolver().is_known(&extension) {
      trace!("Skipping: {} ({})", path.display(), UNKNOWN_EXTENSION_REASON);
      return Ok(FileReport::skipped(path, UNKNOWN_EXTENSION_REASON));
    }

    let content = FileIO::read_content(path)?;
    // The header is checked after a leading BOM, which is kept on write
    let (bom, body) = match content.strip_prefix(UTF8_BOM) {
      Some(rest) => (UTF8_BOM, rest),
      None => ("", content.as_str()),
    };

    let Some(problem) = self.rule.check(body, &extension) else {
      trace!("Header OK: {}", path.display());
      return Ok(FileReport::ok(path));
    };

    let Some(ref fix) = problem.fix else {
      return Ok(FileReport::unfixable(path, &problem));
    };

    let fixed = format!("{bom}{}", fix.apply(body));

    if let Err(e) = self.diff_manager.display_diff(path, &content, &fixed) {
      warn!("Failed to display diff for {}: {}", path.display(), e);
    }

    if !self.fix {
      return Ok(FileReport::reported(path, &problem));
    }

    FileIO::write_file(path, &fixed)?;
    info_log!("Fixed license header in: {}", path.display());

    Ok(FileReport::fixed(path, &problem))
  }
}

/// Lowercase extension of `path` without the dot, or an empty string.
pub fn file_extension(path: &Path) -> String {
  path
    .extension()
    .and_then(OsStr::to_str)
    .map(str::to_lowercase)
    .unwrap_or_default()
}
