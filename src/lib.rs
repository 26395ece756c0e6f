//! # headerlint
//!
//! Checks that script, markup and stylesheet files open with a license header
//! comment block rendered from a plain-text template, and computes the text
//! edit that inserts or corrects it.
//!
//! ## Features
//!
//! * Comment syntax picked from the file extension (`/* * */` for
//!   JavaScript, TypeScript and CSS, `<!-- -- -->` for HTML)
//! * Whitespace-insensitive comparison of the existing header
//! * Insert fixes for missing headers and replace fixes for incorrect ones
//! * Parallel checking of whole directory trees with diff preview and a JSON
//!   report
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerlint::rule::HeaderRule;
//!
//! fn main() -> anyhow::Result<()> {
//!     let rule = HeaderRule::from_file(Some(Path::new("LICENSE_HEADER.txt")))?;
//!
//!     let source = std::fs::read_to_string("src/app.js")?;
//!     if let Some(problem) = rule.check(&source, "js") {
//!         println!("{}", problem.message);
//!         if let Some(fix) = problem.fix {
//!             std::fs::write("src/app.js", fix.apply(&source))?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`rule`] - The per-file entry point
//! * [`syntax`], [`templates`], [`locator`], [`compare`], [`planner`] - The
//!   stages a check runs through
//! * [`processor`] - Checking many files at once
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod compare;
pub mod config;
pub mod diff;
pub mod ignore;
pub mod locator;
pub mod logging;
pub mod output;
pub mod planner;
pub mod processor;
pub mod report;
pub mod rule;
pub mod syntax;
pub mod templates;
