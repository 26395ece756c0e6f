use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global output mode shared by the logging macros.
///
/// Starts as [`OutputMode::Normal`] until the CLI selects quiet or verbose.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies this mode to `owo-colors` for the rest of the process.
  ///
  /// `Auto` clears any override so `if_supports_color` falls back to its own
  /// terminal detection.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Switches the logging macros into verbose mode.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Switches the logging macros into quiet mode.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Returns `true` when verbose output was requested.
pub fn is_verbose() -> bool {
  matches!(
    OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)),
    OutputMode::Verbose
  )
}

/// Returns `true` when quiet output was requested.
pub fn is_quiet() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Quiet)
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the level follows the CLI flags:
/// quiet maps to `error`, no flag to `warn`, and each `-v` raises it one step
/// up to `trace`.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let default_level = if quiet {
    "error"
  } else {
    match verbose {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
    }
  };

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("headerlint={default_level}")));

  // A subscriber may already be installed when the CLI entry point is driven
  // from tests in the same process.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .try_init();
}
