//! # Configuration Module
//!
//! This module provides configuration support for headerlint: the path of
//! the license template, ignore patterns, and comment syntax overrides for
//! extra file extensions.
//!
//! Configuration can be specified in a `.headerlint.toml` file or via the
//! `HEADERLINT_CONFIG` environment variable. Command-line flags win over
//! values from the file.
//!
//! ```toml
//! file = "LICENSE_HEADER.txt"
//! ignore = ["dist/**"]
//!
//! [comment-styles]
//! vue = { start = "<!--", prefix = "--", end = "-->" }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerlint.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERLINT_CONFIG";

/// User-defined comment syntax for one extension.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommentStyleConfig {
  /// Token opening the header block (e.g. "/*")
  pub start: String,

  /// Token prepended to each license line (e.g. "*")
  #[serde(default)]
  pub prefix: String,

  /// Token closing the header block (e.g. "*/")
  pub end: String,
}

impl CommentStyleConfig {
  pub fn new(start: &str, prefix: &str, end: &str) -> Self {
    Self {
      start: start.to_string(),
      prefix: prefix.to_string(),
      end: end.to_string(),
    }
  }
}

/// Main configuration struct, loaded from `.headerlint.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Path to the license template. Relative paths are resolved against the
  /// directory containing the config file.
  #[serde(default)]
  pub file: Option<PathBuf>,

  /// Glob patterns of paths that are never checked.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Comment syntax overrides keyed by extension without the leading dot.
  #[serde(default, rename = "comment-styles")]
  pub comment_styles: HashMap<String, CommentStyleConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A comment style configuration is invalid.
  #[error("Invalid comment style for '{extension}': {message}")]
  InvalidCommentStyle { extension: String, message: String },

  /// No license template path was configured.
  #[error("License file path is required")]
  MissingLicenseFile,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if a comment
  /// style override is invalid.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = config.normalize(base_dir);

    verbose_log!("Loaded {} comment style overrides", config.comment_styles.len());

    Ok(config)
  }

  /// Checks that every override has non-empty delimiters and that no
  /// extension key carries a leading dot.
  fn validate(&self) -> Result<(), ConfigError> {
    for (ext, style) in &self.comment_styles {
      validate_comment_style(ext, style)?;
    }

    Ok(())
  }

  /// Lowercases extension keys and anchors a relative template path at
  /// `base_dir`.
  fn normalize(self, base_dir: &Path) -> Self {
    let comment_styles = self
      .comment_styles
      .into_iter()
      .map(|(k, v)| (k.to_lowercase(), v))
      .collect();

    let file = self.file.map(|file| {
      if file.is_absolute() || base_dir.as_os_str().is_empty() {
        file
      } else {
        base_dir.join(file)
      }
    });

    Self {
      file,
      ignore: self.ignore,
      comment_styles,
    }
  }

  /// Merges command-line overrides into this configuration. CLI values win.
  pub fn merge_cli_overrides(&mut self, overrides: CliOverrides) {
    if overrides.file.is_some() {
      self.file = overrides.file;
    }
    self.ignore.extend(overrides.ignore);
    self.comment_styles.extend(overrides.comment_styles);
  }
}

fn validate_comment_style(ext: &str, style: &CommentStyleConfig) -> Result<(), ConfigError> {
  let invalid = |message: &str| ConfigError::InvalidCommentStyle {
    extension: ext.to_string(),
    message: message.to_string(),
  };

  if ext.starts_with('.') {
    return Err(invalid("extension should not include leading dot"));
  }
  if style.start.trim().is_empty() {
    return Err(invalid("start field cannot be empty"));
  }
  if style.end.trim().is_empty() {
    return Err(invalid("end field cannot be empty"));
  }

  Ok(())
}

/// Settings given on the command line that override the config file.
#[derive(Debug, Default)]
pub struct CliOverrides {
  pub file: Option<PathBuf>,
  pub ignore: Vec<String>,
  pub comment_styles: HashMap<String, CommentStyleConfig>,
}

impl CliOverrides {
  /// Parses `--comment-style` values of the form `EXT:START,PREFIX,END`.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InvalidCommentStyle`] for malformed values.
  pub fn parse_comment_styles(values: &[String]) -> Result<HashMap<String, CommentStyleConfig>, ConfigError> {
    let mut styles = HashMap::with_capacity(values.len());

    for value in values {
      let (ext, tokens) = value.split_once(':').ok_or_else(|| ConfigError::InvalidCommentStyle {
        extension: value.clone(),
        message: "expected EXT:START,PREFIX,END".to_string(),
      })?;

      let parts: Vec<&str> = tokens.split(',').collect();
      let [start, prefix, end] = parts.as_slice() else {
        return Err(ConfigError::InvalidCommentStyle {
          extension: ext.to_string(),
          message: format!("expected three comma-separated tokens, got {}", parts.len()),
        });
      };

      let ext = ext.trim().to_lowercase();
      let style = CommentStyleConfig::new(start.trim(), prefix.trim(), end.trim());
      validate_comment_style(&ext, &style)?;
      styles.insert(ext, style);
    }

    Ok(styles)
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERLINT_CONFIG` environment variable
/// 3. `.headerlint.toml` in `search_dir`
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `Ok(None)` when `no_config` is set or no file is found.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, search_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
