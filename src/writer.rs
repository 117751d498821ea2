//! Change-aware file output.
//!
//! Generated files are only rewritten when their content differs, so
//! watchers and bundlers downstream don't see spurious modifications.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{IconsheetError, Result};

/// Read a file, treating a missing file as empty.
pub fn read_existing(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(IconsheetError::WriteFailure {
            path: path.to_path_buf(),
            message: format!("Failed to read existing output: {}", e),
        }),
    }
}

/// Write `content` to `path` unless the file already holds exactly that.
///
/// Returns `true` if the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if read_existing(path)? == content {
        return Ok(false);
    }

    fs::write(path, content).map_err(|e| IconsheetError::WriteFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(true)
}

/// Create an output directory and its parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| IconsheetError::WriteFailure {
        path: path.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })
}
