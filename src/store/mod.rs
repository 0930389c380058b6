//! The per-user `~/.0n/` store.
//!
//! Layout:
//!
//! ```text
//! ~/.0n/
//! ├── config.json
//! ├── connections/
//! ├── workflows/
//! ├── snapshots/
//! ├── history/
//! ├── cache/
//! └── plugins/
//! ```
//!
//! The location can be overridden with the `DOT0N_HOME` environment variable.


use crate::document::{CreateOptions, DocumentType, ParsedDocument, create, is_document_file, parse};
use crate::error::{Result, ZeronError};
use crate::fs::{ensure_dir, write_json_pretty};
use crate::settings::Settings;
use directories::BaseDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the store location.
pub const HOME_ENV_VAR: &str = "DOT0N_HOME";

/// Name of the store directory under the user's home.
pub const STORE_DIR_NAME: &str = ".0n";

/// Subdirectories created by [`Store::init`].
pub const SUBDIRS: &[&str] = &[
    "connections",
    "workflows",
    "snapshots",
    "history",
    "cache",
    "plugins",
];

/// Global config file name.
pub const CONFIG_FILE: &str = "config.json";

/// Handle to a store directory. Nothing is touched on disk until a method
/// needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    root: PathBuf,
}

/// What [`Store::init`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
    /// Set when `config.json` was written by this call.
    pub config_created: Option<PathBuf>,
}

/// A stored document together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedDocument {
    pub file: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub document: ParsedDocument,
}

impl Store {
    /// Use an explicit store directory.
    pub fn at<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Locate the store: `$DOT0N_HOME` if set, otherwise `~/.0n`.
    pub fn locate() -> Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::at(dir));
        }

        let base = BaseDirs::new().ok_or_else(|| {
            ZeronError::UserError(format!(
                "could not determine the home directory.\n\n\
                 Set {} to choose where the store lives.",
                HOME_ENV_VAR
            ))
        })?;
        Ok(Self::at(base.home_dir().join(STORE_DIR_NAME)))
    }

    /// The store's root directory.
    pub fn dir(&self) -> &Path {
        &self.root
    }

    /// Path of the global `config.json`.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Directory holding documents of `doc_type` (e.g. `workflows/`).
    pub fn type_dir(&self, doc_type: DocumentType) -> PathBuf {
        self.root.join(doc_type.dir_name())
    }

    /// Whether the store directory exists.
    pub fn is_initialized(&self) -> bool {
        self.root.is_dir()
    }

    /// Create the store layout and a default `config.json`.
    ///
    /// Idempotent: existing directories and an existing config are left alone.
    pub fn init(&self) -> Result<InitReport> {
        let mut report = InitReport::default();

        let dirs = std::iter::once(self.root.clone()).chain(SUBDIRS.iter().map(|d| self.root.join(d)));
        for dir in dirs {
            if ensure_dir(&dir)? {
                tracing::debug!(dir = %dir.display(), "created store directory");
                report.created.push(dir);
            } else {
                report.existing.push(dir);
            }
        }

        let config_path = self.config_path();
        if !config_path.exists() {
            let options = CreateOptions {
                name: Some("Global Config".to_string()),
                ..Default::default()
            };
            write_json_pretty(&config_path, &create(DocumentType::Config, &options))?;
            report.config_created = Some(config_path);
        }

        Ok(report)
    }

    /// Load global settings from `config.json`.
    pub fn settings(&self) -> Result<Settings> {
        Settings::load(self.config_path())
    }

    /// Parse every document of `doc_type` in the store.
    ///
    /// Returns an empty list when the type's directory does not exist. Fails
    /// on the first document that does not validate.
    pub fn list(&self, doc_type: DocumentType) -> Result<Vec<ListedDocument>> {
        let dir = self.type_dir(doc_type);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files: Vec<(String, PathBuf)> = std::fs::read_dir(&dir)
            .map_err(|e| ZeronError::io("failed to read directory", &dir, e))?
            .filter_map(|entry| entry.ok())
            .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
            .filter(|(name, path)| is_document_file(name) && path.is_file())
            .collect();
        files.sort();

        files
            .into_iter()
            .map(|(file, path)| -> Result<ListedDocument> {
                let document = parse(&path)?;
                Ok(ListedDocument {
                    file,
                    path,
                    document,
                })
            })
            .collect()
    }
}
