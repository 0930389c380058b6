//! Tests for command helpers and handlers.

use super::conformance::render_conformance;
use super::create::parse_doc_type;
use super::init::render_settings;
use super::resolve::{build_context, parse_input_pair};
use super::validate::{Tally, render_reports};
use super::*;
use crate::cli::{ResolveArgs, TestArgs, ValidateArgs};
use crate::document::{DocumentType, ValidationReport, validate as validate_document};
use crate::error::ZeronError;
use crate::settings::Settings;
use crate::store::Store;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn report(file: &str, errors: &[&str], warnings: &[&str]) -> ValidationReport {
    ValidationReport {
        file: Some(PathBuf::from(file)),
        valid: errors.is_empty(),
        errors: errors.iter().map(|s| s.to_string()).collect(),
        warnings: warnings.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn resolve_args() -> ResolveArgs {
    ResolveArgs {
        file: PathBuf::from("t.json"),
        inputs: None,
        input: Vec::new(),
        steps: None,
    }
}

#[test]
fn test_marked_lines() {
    assert_eq!(marked(Marker::Success, "a.0n"), "+ a.0n");
    assert_eq!(marked(Marker::Error, "a.0n"), "x a.0n");
    assert_eq!(marked(Marker::Warn, "w"), "! w");
    assert_eq!(marked(Marker::Info, "i"), "i i");
    assert_eq!(detail("boom"), "   | boom");
}

#[test]
fn test_render_reports() {
    let reports = vec![
        report("ok.0n", &[], &[]),
        report("bad.0n", &["Missing $0n header"], &[]),
        report("snap.0n", &[], &["Snapshot: missing \"target\""]),
    ];

    let (lines, tally) = render_reports(&reports);

    assert_eq!(tally, Tally { valid: 2, invalid: 1 });
    assert_eq!(
        lines,
        vec![
            "+ ok.0n",
            "x bad.0n",
            "   | Missing $0n header",
            "+ snap.0n",
            "   | warning: Snapshot: missing \"target\"",
        ]
    );
}

#[test]
fn test_render_conformance_uses_basenames() {
    let reports = vec![
        report("/x/conformance/good.0n", &[], &[]),
        report("/x/conformance/bad.0n", &["Missing $0n.type"], &[]),
    ];

    let (lines, passed, failed) = render_conformance(&reports);

    assert_eq!((passed, failed), (1, 1));
    assert_eq!(lines[0], "+ PASS: good.0n");
    assert_eq!(lines[1], "x FAIL: bad.0n");
    assert_eq!(lines[2], "   | Missing $0n.type");
}

#[test]
fn test_validate_missing_path_is_user_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = validate::cmd_validate(ValidateArgs {
        path: temp_dir.path().join("nope.0n"),
    })
    .unwrap_err();
    assert!(matches!(err, ZeronError::UserError(_)));
}

#[test]
fn test_validate_directory_with_invalid_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bad.0n"), "{}").unwrap();

    let err = validate::cmd_validate(ValidateArgs {
        path: temp_dir.path().to_path_buf(),
    })
    .unwrap_err();
    assert!(matches!(err, ZeronError::ValidationFailed(_)));
}

#[test]
fn test_validate_valid_file_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.0n");
    fs::write(&path, json!({"$0n": {"type": "config", "version": "1.0.0"}}).to_string()).unwrap();

    validate::cmd_validate(ValidateArgs { path }).unwrap();
}

#[test]
fn test_conformance_missing_dir_is_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    conformance::cmd_test(TestArgs {
        dir: temp_dir.path().join("conformance"),
    })
    .unwrap();
}

#[test]
fn test_conformance_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("broken.0n"), "[").unwrap();

    let err = conformance::cmd_test(TestArgs {
        dir: temp_dir.path().to_path_buf(),
    })
    .unwrap_err();
    assert_eq!(err.exit_code(), crate::exit_codes::VALIDATION_FAILURE);
}

#[test]
fn test_create_writes_valid_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stripe.0n");

    create::cmd_create(crate::cli::CreateArgs {
        doc_type: "connection".to_string(),
        name: Some("Stripe".to_string()),
        description: None,
        service: Some("stripe".to_string()),
        output: Some(path.clone()),
    })
    .unwrap();

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(validate_document(&written).valid);
    assert_eq!(written["$0n"]["name"], json!("Stripe"));
    assert!(written["$0n"]["updated"].is_string());
}

#[test]
fn test_parse_doc_type() {
    assert_eq!(parse_doc_type("snapshot").unwrap(), DocumentType::Snapshot);
    let err = parse_doc_type("widget").unwrap_err();
    assert!(matches!(err, ZeronError::UserError(_)));
    assert!(err.to_string().contains("widget"));
}

#[test]
fn test_parse_input_pair() {
    assert_eq!(parse_input_pair("amount=42").unwrap(), ("amount".to_string(), json!(42)));
    assert_eq!(parse_input_pair("name=Ada").unwrap(), ("name".to_string(), json!("Ada")));
    assert_eq!(parse_input_pair("flag=true").unwrap(), ("flag".to_string(), json!(true)));
    assert_eq!(parse_input_pair("eq=a=b").unwrap(), ("eq".to_string(), json!("a=b")));
    assert_eq!(parse_input_pair("empty=").unwrap(), ("empty".to_string(), json!("")));
    assert!(parse_input_pair("novalue").is_err());
    assert!(parse_input_pair("=1").is_err());
}

#[test]
fn test_build_context_merges_inputs() {
    let args = ResolveArgs {
        inputs: Some(r#"{"amount": 1, "name": "x"}"#.to_string()),
        input: vec!["amount=5".to_string()],
        steps: Some(r#"{"fetch": {"id": 9}}"#.to_string()),
        ..resolve_args()
    };

    let ctx = build_context(&args).unwrap();

    assert_eq!(ctx.inputs["amount"], json!(5));
    assert_eq!(ctx.inputs["name"], json!("x"));
    assert_eq!(ctx.steps["fetch"], json!({"id": 9}));
    assert!(ctx.env.is_empty());
}

#[test]
fn test_build_context_rejects_non_object_inputs() {
    let args = ResolveArgs {
        inputs: Some("[1, 2]".to_string()),
        ..resolve_args()
    };
    assert!(matches!(build_context(&args), Err(ZeronError::UserError(_))));

    let args = ResolveArgs {
        steps: Some("{".to_string()),
        ..resolve_args()
    };
    assert!(matches!(build_context(&args), Err(ZeronError::InvalidJson(_))));
}

#[test]
fn test_resolve_command_reads_template() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("t.json");
    fs::write(&path, r#"{"total": "{{inputs.amount * 2}}"}"#).unwrap();

    resolve::cmd_resolve(ResolveArgs {
        file: path,
        input: vec!["amount=4".to_string()],
        ..resolve_args()
    })
    .unwrap();
}

#[test]
fn test_render_settings_defaults() {
    let lines = render_settings(&Settings::default());
    assert_eq!(
        lines,
        vec![
            "   | ai provider:   anthropic",
            "   | fallback mode: keyword",
            "   | history:       on",
            "   | cache:         on",
        ]
    );
}

#[test]
fn test_render_settings_from_initialized_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::at(temp_dir.path().join(".0n"));
    store.init().unwrap();

    let mut config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.config_path()).unwrap()).unwrap();
    config["settings"]["cache_enabled"] = json!(false);
    config["settings"]["ai_provider"] = json!("local");
    fs::write(store.config_path(), config.to_string()).unwrap();

    let lines = render_settings(&store.settings().unwrap());
    assert_eq!(lines[0], "   | ai provider:   local");
    assert_eq!(lines[3], "   | cache:         off");
}
