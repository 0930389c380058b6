//! Filesystem utilities for dot0n.
//!
//! Document writes go through [`atomic_write`] so a crash never leaves a
//! half-written `.0n` file behind.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file, write_json_pretty};

use crate::error::{Result, ZeronError};
use std::path::Path;

/// Create a directory (and parents) if it does not exist yet.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)
        .map_err(|e| ZeronError::io("failed to create directory", path, e))?;
    Ok(true)
}

/// Read a file to a string, attaching the path to any error.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| ZeronError::io("failed to read", path, e))
}
