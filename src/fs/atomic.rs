//! Atomic file writes.
//!
//! Every write follows the same pattern:
//! 1. Write content to `.{filename}.tmp` in the target's directory
//! 2. Sync the temporary file to disk
//! 3. Rename it over the target
//!
//! The rename is atomic when source and destination share a filesystem,
//! which holds because the temporary file is a sibling of the target.

use crate::error::{Result, ZeronError};
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use dot0n::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("workflow.0n"), b"{}\n")?;
/// # Ok::<(), dot0n::error::ZeronError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| ZeronError::io("failed to create parent directory", parent, e))?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ZeronError::io("failed to atomically replace", path, e)
    })?;

    Ok(())
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically write a JSON value, pretty-printed with two-space indentation.
pub fn write_json_pretty<P: AsRef<Path>>(path: P, value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    atomic_write_file(path, &text)
}

/// `.{filename}.tmp` next to the target.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ZeronError::UserError(format!("invalid file path '{}'", target.display()))
        })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).map_err(|e| ZeronError::io("failed to create temporary file", path, e))?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(ZeronError::io("failed to write temporary file", path, e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.0n");

        atomic_write(&file_path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.0n");
        fs::write(&file_path, "original").unwrap();

        atomic_write_file(&file_path, "replacement").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "replacement");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("workflows").join("nested").join("a.0n");

        atomic_write_file(&file_path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "nested");
    }

    #[test]
    fn test_temp_file_is_gone_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.0n");

        atomic_write(&file_path, b"content").unwrap();

        assert!(!temp_dir.path().join(".test.0n.tmp").exists());
    }

    #[test]
    fn test_temp_path_for() {
        let temp = temp_path_for(Path::new("/some/path/file.0n")).unwrap();
        assert_eq!(temp, Path::new("/some/path/.file.0n.tmp"));
    }

    #[test]
    fn test_write_json_pretty() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("doc.0n");

        write_json_pretty(&file_path, &json!({"b": 1, "a": [true]})).unwrap();

        let text = fs::read_to_string(&file_path).unwrap();
        assert_eq!(text, "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}");
    }

    #[test]
    fn test_atomic_write_concurrent_distinct_files() {
        let temp_dir = TempDir::new().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let path = temp_dir.path().join(format!("file_{}.0n", i));
                let content = format!("content {}", i);
                std::thread::spawn(move || {
                    atomic_write_file(&path, &content).unwrap();
                    (path, content)
                })
            })
            .collect();

        for handle in handles {
            let (path, expected) = handle.join().unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), expected);
        }
    }
}
