//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod check;

pub use check::{CheckArgs, run_check};
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Check license headers without modifying files
  headerlint --license-file LICENSE_HEADER.txt src/

  # Insert missing headers and replace incorrect ones
  headerlint --fix --license-file LICENSE_HEADER.txt src/ public/

  # Show the diff of every proposed fix
  headerlint --show-diff --license-file LICENSE_HEADER.txt \"src/**/*.ts\"

  # Save all diffs to a file
  headerlint --save-diff changes.diff --license-file LICENSE_HEADER.txt src/

  # Check Vue single-file components with markup-style headers
  headerlint --comment-style \"vue:<!--,--,-->\" --license-file LICENSE_HEADER.txt src/

  # Ignore build output and minified files
  headerlint --ignore dist/ --ignore \"*.min.js\" --license-file LICENSE_HEADER.txt .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub check_args: CheckArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use clap::CommandFactory;

  use super::*;
  use crate::logging::ColorMode;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_full_invocation() {
    let cli = Cli::try_parse_from([
      "headerlint",
      "-f",
      "HEADER.txt",
      "--fix",
      "-i",
      "dist/",
      "--comment-style",
      "vue:<!--,--,-->",
      "-vv",
      "--colors",
      "never",
      "src",
      "public",
    ])
    .expect("valid arguments");

    let args = cli.check_args;
    assert_eq!(args.license_file, Some(PathBuf::from("HEADER.txt")));
    assert!(args.fix);
    assert_eq!(args.ignore, vec!["dist/"]);
    assert_eq!(args.comment_style, vec!["vue:<!--,--,-->"]);
    assert_eq!(args.verbose, 2);
    assert_eq!(args.colors, ColorMode::Never);
    assert_eq!(args.patterns, vec!["src", "public"]);
  }

  #[test]
  fn test_patterns_are_required() {
    assert!(Cli::try_parse_from(["headerlint", "-f", "HEADER.txt"]).is_err());
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["headerlint", "-q", "-v", "src"]).is_err());
  }
}
