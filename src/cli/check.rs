//! # Check Command
//!
//! Checks license headers and, with `--fix`, rewrites the files that need a
//! new or corrected header.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{CliOverrides, load_config};
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_all_files_ok, print_blank_line, print_failed_files, print_fixed_files, print_hint,
  print_incorrect_files, print_missing_files, print_start_message, print_summary,
};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::{ProcessingSummary, write_json_report};
use crate::rule::{HeaderRule, RuleOptions};
use crate::syntax::create_resolver;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// File, directory or glob patterns to check. Directories are processed
  /// recursively.
  #[arg(required = true)]
  pub patterns: Vec<String>,

  /// License template file (overrides `file` in the config)
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Insert missing headers and replace incorrect ones in place
  #[arg(long)]
  pub fix: bool,

  /// Show the diff of every proposed fix
  #[arg(long)]
  pub show_diff: bool,

  /// Save the diff of every proposed fix to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i')]
  pub ignore: Vec<String>,

  /// Override the comment syntax of an extension (repeatable)
  /// Example: --comment-style "vue:<!--,--,-->"
  #[arg(long, value_name = "EXT:START,PREFIX,END")]
  pub comment_style: Vec<String>,

  /// Also check files whose extension has no known comment syntax
  #[arg(long)]
  pub include_unknown: bool,

  /// Path to config file (default: .headerlint.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Write a JSON report of all checked files
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except the paths that need attention
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the check command with the given arguments.
///
/// Returns exit code 1 when a file still needs attention after the run:
/// any reported problem in check mode, or any failure in fix mode.
///
/// # Errors
///
/// Returns an error for setup failures: an unreadable or invalid config, a
/// malformed `--comment-style`, no license template, or an invalid pattern.
pub fn run_check(args: CheckArgs) -> Result<ExitCode> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;

  let mut config = load_config(args.config.as_deref(), &current_dir, args.no_config)?.unwrap_or_default();

  let comment_styles = CliOverrides::parse_comment_styles(&args.comment_style)?;
  config.merge_cli_overrides(CliOverrides {
    file: args.license_file,
    ignore: args.ignore,
    comment_styles,
  });

  let options = RuleOptions::new(config.file.clone())
    .context("No license template configured; pass --license-file or set `file` in .headerlint.toml")?;
  debug!("Using license template: {}", options.file.display());

  let rule = HeaderRule::new(options).with_resolver(create_resolver(config.comment_styles));

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    fix: args.fix,
    include_unknown: args.include_unknown,
    ignore_patterns: config.ignore,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(rule)
  })?;

  let files = processor.collect_files(&args.patterns)?;
  print_start_message(files.len(), args.fix);

  if files.is_empty() {
    print_blank_line();
    print_all_files_ok();
    return Ok(ExitCode::SUCCESS);
  }

  let start_time = Instant::now();
  processor.process_files(files);
  let elapsed = start_time.elapsed();

  let file_reports = processor.take_reports();
  let summary = ProcessingSummary::from_reports(&file_reports, elapsed);
  let categorized = CategorizedReports::from_reports(&file_reports);
  let root = Some(current_dir.as_path());

  print_blank_line();

  let has_missing = !categorized.missing.is_empty();
  let has_incorrect = !categorized.incorrect.is_empty();
  // Split the limit between lists if both have content
  let limit = if has_missing && has_incorrect { Some(10) } else { None };

  print_fixed_files(&categorized.fixed, root);
  if !categorized.fixed.is_empty() && categorized.has_problems() {
    print_blank_line();
  }
  print_missing_files(&categorized.missing, root, limit);
  if has_missing && has_incorrect {
    print_blank_line();
  }
  print_incorrect_files(&categorized.incorrect, root, limit);
  if (has_missing || has_incorrect) && !categorized.failed.is_empty() {
    print_blank_line();
  }
  print_failed_files(&categorized.failed, root);

  if categorized.fixed.is_empty() && !categorized.has_problems() {
    print_all_files_ok();
  }

  print_blank_line();
  print_summary(&summary);

  if has_missing || has_incorrect {
    print_blank_line();
    let hint = match (has_missing, has_incorrect) {
      (true, true) => "Run with --fix to add missing headers and correct the rest.",
      (true, false) => "Run with --fix to add missing headers.",
      _ => "Run with --fix to correct the headers.",
    };
    print_hint(hint);
  }

  if let Some(ref output_path) = args.report_json {
    if let Err(e) = write_json_report(output_path, &file_reports, &summary) {
      eprintln!("Error generating JSON report: {:#}", e);
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if categorized.has_problems() {
    Ok(ExitCode::FAILURE)
  } else {
    Ok(ExitCode::SUCCESS)
  }
}
