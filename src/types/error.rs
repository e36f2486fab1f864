//! Error types for loading, merging and indexing extraction documents.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised while loading, merging or indexing documents.
///
/// Every variant is fatal to the current invocation.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// An input path does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// An input path exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not well-formed JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configured field holds something other than a sequence.
    #[error("malformed document {document}: field `{field}` must be an array, found {found}")]
    MalformedDocument {
        document: String,
        field: String,
        found: &'static str,
    },

    /// The merged document could not be rendered as JSON.
    #[error("failed to render merged document: {0}")]
    Render(#[source] serde_json::Error),

    /// A node was reached twice while walking the tree.
    #[error("cyclic node structure detected at node of type {}", node_type.as_deref().unwrap_or("<untagged>"))]
    CyclicStructure { node_type: Option<String> },
}

impl ExtractError {
    /// Build the right variant for an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ExtractError::FileNotFound { path }
        } else {
            ExtractError::Read { path, source }
        }
    }
}
