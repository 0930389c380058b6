//! Parse, create, and save operations.

use super::model::{CreateOptions, DocumentType, ENVELOPE_KEY, ParsedDocument, Step};
use super::validation::validate;
use crate::error::{Result, ZeronError};
use crate::fs::{read_to_string, write_json_pretty};
use crate::resolve::now_iso8601;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Default version stamped on newly created documents.
const DEFAULT_DOCUMENT_VERSION: &str = "1.0.0";

/// Read, validate, and parse a document file.
///
/// # Errors
///
/// * `ZeronError::Io` - the file could not be read
/// * `ZeronError::InvalidJson` - the file is not JSON
/// * `ZeronError::InvalidDocument` - validation failed; carries every message
pub fn parse<P: AsRef<Path>>(path: P) -> Result<ParsedDocument> {
    let content = read_to_string(path)?;
    let data: Value = serde_json::from_str(&content)?;
    parse_value(data)
}

/// Validate and parse an in-memory document.
pub fn parse_value(data: Value) -> Result<ParsedDocument> {
    let report = validate(&data);
    if !report.valid {
        return Err(ZeronError::InvalidDocument(report.errors));
    }

    let envelope = &data[ENVELOPE_KEY];
    let text = |key: &str| envelope.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(ParsedDocument {
        doc_type: report.doc_type.unwrap_or_default(),
        version: report.version.unwrap_or_default(),
        name: text("name"),
        description: text("description"),
        data,
    })
}

/// Build a skeleton document of the given type.
///
/// The envelope is stamped with the current time as `created`.
pub fn create(doc_type: DocumentType, options: &CreateOptions) -> Value {
    let mut doc = Map::new();
    doc.insert(
        ENVELOPE_KEY.to_string(),
        json!({
            "type": doc_type.as_str(),
            "version": options.version.as_deref().unwrap_or(DEFAULT_DOCUMENT_VERSION),
            "created": now_iso8601(),
            "name": options.name.as_deref().unwrap_or(""),
            "description": options.description.as_deref().unwrap_or(""),
        }),
    );

    let body = match doc_type {
        DocumentType::Connection => json!({
            "service": options.service.as_deref().unwrap_or(""),
            "environment": options.environment.as_deref().unwrap_or("production"),
            "auth": {
                "type": options.auth_type.as_deref().unwrap_or("api_key"),
                "credentials": options.credentials.clone().unwrap_or_else(|| json!({})),
            },
            "options": {},
            "metadata": {},
        }),
        DocumentType::Workflow => json!({
            "trigger": options.trigger.clone().unwrap_or_else(|| json!({"type": "manual"})),
            "inputs": options.inputs.clone().unwrap_or_else(|| json!({})),
            "steps": options.steps.clone().unwrap_or_default(),
            "outputs": {},
            "error_handling": {"on_error": "stop"},
        }),
        DocumentType::Snapshot => json!({
            "target": options.target.clone().unwrap_or_else(|| json!({})),
            "components": options.components.clone().unwrap_or_else(|| json!({})),
            "deployment": {
                "strategy": "merge",
                "dry_run": false,
                "rollback_on_error": true,
            },
        }),
        DocumentType::Config => json!({
            "settings": crate::settings::Settings::default(),
            "default_services": [],
            "plugins": [],
        }),
        DocumentType::Execution => json!({}),
    };

    if let Value::Object(fields) = body {
        doc.extend(fields);
    }
    Value::Object(doc)
}

/// Write a document to `path` as pretty-printed JSON.
///
/// When the document has an envelope object, `$0n.updated` is stamped with
/// the current time first.
pub fn save<P: AsRef<Path>>(document: &mut Value, path: P) -> Result<()> {
    if let Some(envelope) = document.get_mut(ENVELOPE_KEY).and_then(Value::as_object_mut) {
        envelope.insert("updated".to_string(), Value::String(now_iso8601()));
    }
    write_json_pretty(path, document)
}

/// Typed view of a workflow's `steps` array.
///
/// # Errors
///
/// `ZeronError::InvalidDocument` when `steps` is missing or a step lacks
/// one of `id`, `service`, `action`.
pub fn workflow_steps(document: &Value) -> Result<Vec<Step>> {
    let steps = document
        .get("steps")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ZeronError::InvalidDocument(vec!["Workflow: missing or invalid \"steps\" array".into()])
        })?;

    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            serde_json::from_value(step.clone()).map_err(|e| {
                ZeronError::InvalidDocument(vec![format!("Workflow: step {} is invalid: {}", i + 1, e)])
            })
        })
        .collect()
}
