//! Tests for clean, redact, filter and strip-lines.

use super::{parse, parse_err};
use crate::cli::commands::redact_mode;
use crate::cli::CliCommand;
use clap::error::ErrorKind;
use prepkit_core::config::PrepConfig;
use prepkit_core::redact::RedactMode;
use std::path::Path;

#[test]
fn cli_parse_clean_defaults() {
    match parse(&["prepkit", "clean", "capture.har"]) {
        CliCommand::Clean {
            input,
            output,
            keep_css,
            keep_static,
            keep_binary,
        } => {
            assert_eq!(input, Path::new("capture.har"));
            assert!(output.is_none());
            assert!(!keep_css && !keep_static && !keep_binary);
        }
        _ => panic!("expected Clean"),
    }
}

#[test]
fn cli_parse_clean_keep_flags() {
    match parse(&[
        "prepkit",
        "clean",
        "capture.har",
        "--keep-css",
        "--keep-binary",
        "-o",
        "out.json",
    ]) {
        CliCommand::Clean {
            output,
            keep_css,
            keep_static,
            keep_binary,
            ..
        } => {
            assert_eq!(output.as_deref(), Some(Path::new("out.json")));
            assert!(keep_css);
            assert!(!keep_static);
            assert!(keep_binary);
        }
        _ => panic!("expected Clean with keep flags"),
    }
}

#[test]
fn cli_parse_redact_replace_with_text() {
    match parse(&[
        "prepkit",
        "redact",
        "capture.har",
        "hunter2",
        "--replace",
        "--text",
        "***",
    ]) {
        CliCommand::Redact {
            input,
            secret,
            replace,
            delete_line,
            delete_req,
            text,
            output,
        } => {
            assert_eq!(input, Path::new("capture.har"));
            assert_eq!(secret, "hunter2");
            assert!(replace && !delete_line && !delete_req);
            assert_eq!(text.as_deref(), Some("***"));
            assert!(output.is_none());
        }
        _ => panic!("expected Redact"),
    }
}

#[test]
fn cli_parse_redact_needs_exactly_one_mode() {
    assert_eq!(
        parse_err(&["prepkit", "redact", "capture.har", "hunter2"]),
        ErrorKind::MissingRequiredArgument
    );
    assert_eq!(
        parse_err(&[
            "prepkit",
            "redact",
            "capture.har",
            "hunter2",
            "--delete-line",
            "--delete-req",
        ]),
        ErrorKind::ArgumentConflict
    );
}

#[test]
fn cli_parse_redact_text_requires_replace() {
    assert_eq!(
        parse_err(&[
            "prepkit",
            "redact",
            "capture.har",
            "hunter2",
            "--delete-line",
            "--text",
            "x",
        ]),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn redact_mode_from_flags() {
    let mut cfg = PrepConfig::default();
    assert_eq!(
        redact_mode(&cfg, true, false, false, None),
        RedactMode::Replace {
            with: "[REDACTED]".to_string()
        }
    );
    cfg.redactor.replacement = "<hidden>".to_string();
    assert_eq!(
        redact_mode(&cfg, true, false, false, None),
        RedactMode::Replace {
            with: "<hidden>".to_string()
        }
    );
    assert_eq!(
        redact_mode(&cfg, true, false, false, Some("x".to_string())),
        RedactMode::Replace {
            with: "x".to_string()
        }
    );
    assert_eq!(
        redact_mode(&cfg, false, true, false, None),
        RedactMode::DeleteLine
    );
    assert_eq!(
        redact_mode(&cfg, false, false, true, None),
        RedactMode::DeleteRequest
    );
}

#[test]
fn cli_parse_filter_keywords() {
    match parse(&["prepkit", "filter", "capture.har", "api", "graphql", "-i"]) {
        CliCommand::Filter {
            input,
            keywords,
            ignore_case,
            output,
        } => {
            assert_eq!(input, Path::new("capture.har"));
            assert_eq!(keywords, vec!["api".to_string(), "graphql".to_string()]);
            assert!(ignore_case);
            assert!(output.is_none());
        }
        _ => panic!("expected Filter"),
    }
}

#[test]
fn cli_parse_filter_requires_keyword() {
    assert_eq!(
        parse_err(&["prepkit", "filter", "capture.har"]),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn cli_parse_strip_lines() {
    match parse(&["prepkit", "strip-lines", "big.har"]) {
        CliCommand::StripLines { max_len, .. } => assert_eq!(max_len, 1000),
        _ => panic!("expected StripLines"),
    }
    match parse(&["prepkit", "strip-lines", "big.har", "--max-len", "200", "-o", "s.har"]) {
        CliCommand::StripLines {
            input,
            max_len,
            output,
        } => {
            assert_eq!(input, Path::new("big.har"));
            assert_eq!(max_len, 200);
            assert_eq!(output.as_deref(), Some(Path::new("s.har")));
        }
        _ => panic!("expected StripLines with flags"),
    }
}
