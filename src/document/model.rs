//! Document types and records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Key of the envelope object at the top of every document.
pub const ENVELOPE_KEY: &str = "$0n";

/// Version of the document standard implemented here.
pub const VERSION: &str = "1.1.0";

/// Names of every known document type.
pub const TYPES: [&str; 5] = ["connection", "workflow", "snapshot", "config", "execution"];

/// Kind of document, taken from `$0n.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Connection,
    Workflow,
    Snapshot,
    Config,
    Execution,
}

impl DocumentType {
    /// All document types, in canonical order.
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Connection,
        DocumentType::Workflow,
        DocumentType::Snapshot,
        DocumentType::Config,
        DocumentType::Execution,
    ];

    /// The type's name as written in `$0n.type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Connection => "connection",
            DocumentType::Workflow => "workflow",
            DocumentType::Snapshot => "snapshot",
            DocumentType::Config => "config",
            DocumentType::Execution => "execution",
        }
    }

    /// Store subdirectory holding documents of this type (e.g. `workflows`).
    pub fn dir_name(&self) -> String {
        format!("{}s", self.as_str())
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown document type '{}' (expected one of: {})",
                    s,
                    TYPES.join(", ")
                )
            })
    }
}

/// A document that passed validation, with its envelope fields lifted out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The full document, envelope included.
    pub data: Value,
}

/// One step of a workflow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub service: String,
    pub action: String,

    /// Parameter payload; may contain `{{...}}` templates.
    #[serde(default)]
    pub params: Value,

    /// Any other step fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for [`create`](super::create).
///
/// Fields that do not apply to the requested type are ignored.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,

    // connection
    pub service: Option<String>,
    pub environment: Option<String>,
    pub auth_type: Option<String>,
    pub credentials: Option<Value>,

    // workflow
    pub trigger: Option<Value>,
    pub inputs: Option<Value>,
    pub steps: Option<Vec<Value>>,

    // snapshot
    pub target: Option<Value>,
    pub components: Option<Value>,
}
