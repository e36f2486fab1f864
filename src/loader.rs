//! Reading extraction documents from disk.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::types::{Document, ExtractError, Result};

/// A document together with the path it was read from.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: Document,
}

impl LoadedDocument {
    /// Path rendered for messages.
    pub fn label(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read and parse one JSON file.
pub fn load_value(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|e| ExtractError::io(path, e))?;

    debug!(path = %path.display(), bytes = content.len(), "Read document");

    serde_json::from_slice(&content).map_err(|source| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read one extraction document. The file must hold a JSON object.
pub fn load_document(path: impl AsRef<Path>) -> Result<LoadedDocument> {
    let path = path.as_ref();
    let value = load_value(path)?;
    let document = Document::from_value(&path.display().to_string(), value)?;

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        document,
    })
}

/// Read every path in order, stopping at the first failure.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LoadedDocument>> {
    paths.iter().map(|path| load_document(path)).collect()
}
