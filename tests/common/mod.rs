#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assert_cmd::Command;
use tempfile::TempDir;

pub const LICENSE: &str = "Copyright 2024 Example Corp\nAll rights reserved";

pub const JS_HEADER: &str = "/*\n* Copyright 2024 Example Corp\n* All rights reserved\n*/\n";

pub const HTML_HEADER: &str = "<!--\n-- Copyright 2024 Example Corp\n-- All rights reserved\n-->\n";

/// Creates a temporary workspace containing `LICENSE_HEADER.txt`.
pub fn workspace() -> Result<TempDir> {
  let temp_dir = TempDir::new()?;
  fs::write(temp_dir.path().join("LICENSE_HEADER.txt"), LICENSE)?;
  Ok(temp_dir)
}

/// Writes `content` to `rel` below `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

pub fn read_file(root: &Path, rel: &str) -> Result<String> {
  let path = root.join(rel);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// A `headerlint` command running in `dir`, isolated from the caller's
/// environment.
pub fn headerlint(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("headerlint")?;
  cmd
    .current_dir(dir)
    .env_remove("HEADERLINT_CONFIG")
    .env_remove("RUST_LOG")
    .arg("--colors=never");
  Ok(cmd)
}
