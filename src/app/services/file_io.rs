//! File reading and writing helpers
//!
//! All model files are materialized in memory before parsing and rendered
//! to a string before writing. Writes can go through a temporary file in the
//! destination directory that is renamed into place once fully written.

use crate::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Read a whole text file
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))
}

/// Write a whole text file, optionally via temp-file-then-rename
pub fn write_text(path: &Path, content: &str, atomic: bool) -> Result<()> {
    let label = path.display().to_string();

    if !atomic {
        return std::fs::write(path, content).map_err(|e| Error::io(label, e));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = NamedTempFile::new_in(&dir).map_err(|e| Error::io(label.clone(), e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| Error::io(label.clone(), e))?;
    temp.flush().map_err(|e| Error::io(label.clone(), e))?;
    temp.persist(path)
        .map_err(|e| Error::io(label.clone(), e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), label);
    Ok(())
}

/// File name component of a path, for error messages
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Strip one pair of surrounding double quotes
pub fn strip_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(trimmed)
}
