//! # headerlint
//!
//! Checks and fixes license header comment blocks at the top of source files.

use std::process::ExitCode;

use anyhow::Result;
use headerlint::cli::{Cli, run_check};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  run_check(cli.check_args)
}
