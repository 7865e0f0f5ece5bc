//! # Document Loader
//!
//! Turns a path into a parsed `serde_json::Value` or a load-failure signal.
//! Load failures carry the failure class (missing, unparseable, unreadable)
//! plus the underlying detail; file-level validators convert each into
//! exactly one diagnostic and skip structural checks for that document.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Error while loading a campaign document.
///
/// The `Display` text doubles as the diagnostic message, so the wording
/// stays stable across every validator that reports a load failure.
#[derive(Error, Debug)]
pub enum DocumentLoadError {
    /// The document file does not exist.
    #[error("File not found: {path}")]
    NotFound {
        /// Path that was checked.
        path: String,
    },

    /// The file exists but is not valid JSON.
    #[error("Invalid JSON format: {reason}")]
    InvalidJson {
        /// Path that failed to parse.
        path: String,
        /// Parser detail (line/column included by serde_json).
        reason: String,
    },

    /// The file exists but could not be read.
    #[error("Error reading file: {reason}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying IO detail.
        reason: String,
    },
}

/// Load and parse one document.
pub fn load_document(path: &Path) -> Result<Value, DocumentLoadError> {
    if !path.exists() {
        return Err(DocumentLoadError::NotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| DocumentLoadError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| DocumentLoadError::InvalidJson {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Whether a file name looks like a real campaign document.
///
/// `.json` files count; `.example.json` variants are templates shipped for
/// documentation and are excluded from validation sweeps and identity sets.
pub fn is_document_file(file_name: &str) -> bool {
    file_name.ends_with(".json") && !file_name.ends_with(".example.json")
}

/// Enumerate the campaign documents in a directory, sorted by path.
///
/// A missing or unreadable directory yields an empty list; per-call
/// listing keeps validation fresh against current on-disk state.
pub fn list_documents(dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let is_document = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_document_file);
            if is_document {
                paths.push(path);
            }
        }
    }
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_file_filter() {
        assert!(is_document_file("elara.json"));
        assert!(!is_document_file("elara.example.json"));
        assert!(!is_document_file("class.example.json"));
        assert!(!is_document_file("notes.md"));
        assert!(!is_document_file("elara.json.bak"));
    }

    #[test]
    fn test_list_documents_missing_dir_is_empty() {
        let paths = list_documents(Path::new("/nonexistent/campaign/npcs"));
        assert!(paths.is_empty());
    }
}
