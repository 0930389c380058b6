//! Envelope and per-type validation.
//!
//! Validation never fails outright: every problem, including unreadable
//! files and malformed JSON, is collected into a [`ValidationReport`].

use super::model::{DocumentType, ENVELOPE_KEY};
use crate::error::{Result, ZeronError};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Outcome of validating one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Source file, when the document came from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub version: Option<String>,
}

impl ValidationReport {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn finish(mut self) -> Self {
        self.valid = self.errors.is_empty();
        self
    }

    fn with_file(mut self, path: &Path) -> Self {
        self.file = Some(path.to_path_buf());
        self
    }
}

/// JSON truthiness: missing, null, false, 0, and "" are all absent.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Envelope scalar as text (`"1.0.0"` stays as-is, `1` becomes `"1"`).
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate a parsed document.
pub fn validate(data: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(envelope) = data.get(ENVELOPE_KEY).filter(|v| truthy(Some(*v))) else {
        report.error(format!("Missing {} header", ENVELOPE_KEY));
        return report.finish();
    };

    let doc_type = envelope.get("type");
    if truthy(doc_type) {
        report.doc_type = doc_type.map(scalar_text);
    } else {
        report.error(format!("Missing {}.type", ENVELOPE_KEY));
    }

    let version = envelope.get("version");
    if truthy(version) {
        report.version = version.map(scalar_text);
    } else {
        report.error(format!("Missing {}.version", ENVELOPE_KEY));
    }

    match doc_type.and_then(Value::as_str).and_then(|t| t.parse().ok()) {
        Some(DocumentType::Connection) => check_connection(data, &mut report),
        Some(DocumentType::Workflow) => check_workflow(data, &mut report),
        Some(DocumentType::Snapshot) => check_snapshot(data, &mut report),
        Some(DocumentType::Config) | Some(DocumentType::Execution) | None => {}
    }

    report.finish()
}

fn check_connection(data: &Value, report: &mut ValidationReport) {
    if !truthy(data.get("service")) {
        report.error("Connection: missing \"service\"");
    }
    match data.get("auth") {
        auth if !truthy(auth) => report.error("Connection: missing \"auth\""),
        Some(auth) if !truthy(auth.get("type")) => {
            report.error("Connection: missing \"auth.type\"")
        }
        _ => {}
    }
}

fn check_workflow(data: &Value, report: &mut ValidationReport) {
    let steps = match data.get("steps").and_then(Value::as_array) {
        Some(steps) if !steps.is_empty() => steps,
        _ => {
            report.error("Workflow: missing or empty \"steps\" array");
            return;
        }
    };

    for (i, step) in steps.iter().enumerate() {
        for field in ["id", "service", "action"] {
            if !truthy(step.get(field)) {
                report.error(format!("Workflow: step {} missing \"{}\"", i + 1, field));
            }
        }
    }
}

fn check_snapshot(data: &Value, report: &mut ValidationReport) {
    if !truthy(data.get("target")) {
        report.warning("Snapshot: missing \"target\"");
    }
    if !truthy(data.get("components")) {
        report.error("Snapshot: missing \"components\"");
    }
}

/// Read and validate a document file.
///
/// Read failures and malformed JSON are reported as errors in the returned
/// report rather than returned as `Err`.
pub fn validate_file<P: AsRef<Path>>(path: P) -> ValidationReport {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let mut report = ValidationReport::default().with_file(path);
            report.error(format!("Error reading file: {}", e));
            return report.finish();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(data) => validate(&data).with_file(path),
        Err(e) => {
            let mut report = ValidationReport::default().with_file(path);
            report.error(format!("Invalid JSON: {}", e));
            report.finish()
        }
    }
}

/// Whether a file name marks a `.0n` document.
pub fn is_document_file(name: &str) -> bool {
    name.ends_with(".0n") || name.ends_with(".0n.json")
}

/// Recursively validate every `.0n` / `.0n.json` file under `dir`.
///
/// Directories whose names start with `.` are skipped. Entries are visited
/// in name order so reports come back in a stable order.
pub fn validate_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<ValidationReport>> {
    let mut reports = Vec::new();
    walk(dir.as_ref(), &mut reports)?;
    Ok(reports)
}

fn walk(dir: &Path, reports: &mut Vec<ValidationReport>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| ZeronError::io("failed to read directory", dir, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ZeronError::io("failed to read directory", dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if path.is_dir() {
            if !name.starts_with('.') {
                walk(&path, reports)?;
            }
        } else if is_document_file(&name) {
            tracing::debug!(file = %path.display(), "validating document");
            reports.push(validate_file(&path));
        }
    }

    Ok(())
}
