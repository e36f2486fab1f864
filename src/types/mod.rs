//! Core types for extraction documents.

mod config;
mod document;
mod error;
mod node;

pub use config::ClengConfig;
pub use document::{nodes_from_value, value_kind, Document, ROOT_FIELD};
pub use error::{ExtractError, Result};
pub use node::Node;
