mod common;

use std::fs;
use std::io;

use headerlint::compare::normalize;
use headerlint::planner::{Fix, ProblemKind};
use headerlint::rule::{HeaderRule, check_header};
use headerlint::syntax::{CommentFamily, resolve};
use headerlint::templates::{FileTemplate, render_header};

use common::{HTML_HEADER, JS_HEADER, LICENSE};

fn rule() -> HeaderRule {
  HeaderRule::with_source(|| Ok::<_, io::Error>(LICENSE.to_string()))
}

#[test]
fn test_render_is_deterministic() {
  let syntax = resolve("js");
  assert_eq!(render_header(LICENSE, &syntax), render_header(LICENSE, &syntax));
  assert_eq!(render_header(LICENSE, &syntax), JS_HEADER);
}

#[test]
fn test_normalize_is_idempotent() {
  for text in [JS_HEADER, HTML_HEADER, "  a \r\n\n\n b  ", ""] {
    let once = normalize(text);
    assert_eq!(normalize(&once), once);
  }
}

#[test]
fn test_extension_families() {
  for ext in ["js", "jsx", "ts", "tsx", "css"] {
    assert_eq!(CommentFamily::from_extension(ext), CommentFamily::Code, "{ext}");
    assert_eq!(resolve(ext), resolve("js"), "{ext}");
  }
  assert_eq!(CommentFamily::from_extension("html"), CommentFamily::Template);
  assert!(resolve("md").is_empty());
  assert!(resolve("").is_empty());
}

#[test]
fn test_file_starting_with_rendered_header_passes() {
  let rule = rule();
  for (ext, header) in [("js", JS_HEADER), ("tsx", JS_HEADER), ("css", JS_HEADER), ("html", HTML_HEADER)] {
    let source = format!("{header}\nbody\n");
    assert_eq!(rule.check(&source, ext), None, "{ext}");
  }
}

#[test]
fn test_missing_header_inserts_rendered_header() {
  let source = "import React from 'react';\n";
  let problem = rule().check(source, "jsx").expect("missing header");

  assert_eq!(problem.kind, ProblemKind::Missing);
  assert_eq!(problem.message, "Missing license header");
  assert_eq!(
    problem.fix,
    Some(Fix::Insert {
      offset: 0,
      text: JS_HEADER.to_string()
    })
  );
}

#[test]
fn test_incorrect_header_is_replaced_in_place() {
  let source = "/*\n* Copyright 2023 Example Corp\n* All rights reserved\n*/\n.button { color: red; }\n";
  let problem = rule().check(source, "css").expect("incorrect header");

  assert_eq!(problem.kind, ProblemKind::Incorrect);
  assert_eq!(problem.message, "License header is incorrect");

  let fixed = problem.fix.expect("fix").apply(source);
  assert_eq!(fixed, format!("{JS_HEADER}.button {{ color: red; }}\n"));
  assert_eq!(rule().check(&fixed, "css"), None);
}

#[test]
fn test_whitespace_only_differences_pass() {
  let source = "<!--\n\n   -- Copyright 2024 Example Corp   \n\t-- All rights reserved\n\n-->\n<p></p>\n";
  assert_eq!(rule().check(source, "html"), None);
}

#[test]
fn test_applied_fix_converges() {
  let rule = rule();
  let sources = [
    ("js", "console.log(1);\n"),
    ("ts", "\n/*\n* Copyright 2024 Example Corp\n*/\nexport {};\n"),
    ("html", "<!--\n-- Copyright 1999\n-->\n<html></html>\n"),
    ("css", ""),
  ];

  for (ext, source) in sources {
    let problem = rule.check(source, ext).expect("problem expected");
    let fixed = problem.fix.expect("fix").apply(source);
    assert_eq!(rule.check(&fixed, ext), None, "{ext}: {fixed:?}");
  }
}

#[test]
fn test_template_is_reread_on_every_check() {
  let temp_dir = common::workspace().expect("create workspace");
  let template_path = temp_dir.path().join("LICENSE_HEADER.txt");
  let template = FileTemplate::new(&template_path);

  let source = JS_HEADER;
  assert_eq!(check_header(source, "js", &template), None);

  fs::write(&template_path, "Copyright 2025 Example Corp\nAll rights reserved").expect("update template");
  let problem = check_header(source, "js", &template).expect("template changed");
  assert_eq!(problem.kind, ProblemKind::Incorrect);
}

#[test]
fn test_missing_template_file_is_reported_without_fix() {
  let temp_dir = tempfile::TempDir::new().expect("create temp dir");
  let rule = HeaderRule::from_file(Some(temp_dir.path().join("nope.txt").as_path())).expect("rule options");

  let problem = rule.check("let a;\n", "js").expect("problem expected");
  assert_eq!(problem.kind, ProblemKind::TemplateUnreadable);
  assert!(problem.message.starts_with("Failed to read license file: "));
  assert!(problem.fix.is_none());
}

#[test]
fn test_rule_requires_template_path() {
  let err = HeaderRule::from_file(None).expect_err("missing path");
  assert_eq!(err.to_string(), "License file path is required");
}
