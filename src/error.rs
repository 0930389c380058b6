//! Error types for dot0n.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! The template resolver itself never fails; these errors come from the
//! document, store, and CLI layers around it.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dot0n operations.
#[derive(Error, Debug)]
pub enum ZeronError {
    /// User provided invalid arguments or a path that does not exist.
    #[error("{0}")]
    UserError(String),

    /// Reading or writing a file failed.
    #[error("{action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input was not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A document failed envelope validation.
    #[error("Invalid .0n file: {}", .0.join(", "))]
    InvalidDocument(Vec<String>),

    /// One or more documents failed validation (CLI summary).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ZeronError {
    /// Build an I/O error with the path it concerns.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ZeronError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ZeronError::UserError(_) => exit_codes::USER_ERROR,
            ZeronError::InvalidJson(_) => exit_codes::USER_ERROR,
            ZeronError::InvalidDocument(_) => exit_codes::VALIDATION_FAILURE,
            ZeronError::ValidationFailed(_) => exit_codes::VALIDATION_FAILURE,
            ZeronError::Io { .. } => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for dot0n operations.
pub type Result<T> = std::result::Result<T, ZeronError>;
