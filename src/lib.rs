//! Extraction Document Library
//!
//! Merges per-translation-unit extraction documents produced by the C/C++
//! front-end and indexes their node trees by type tag for exploration.

pub mod api;
pub mod explore;
pub mod index;
pub mod loader;
pub mod merge;
pub mod types;

pub use explore::Workspace;
pub use index::{NodeTypeIndexer, TypeIndex};
pub use merge::{DocumentMerger, MergeReport};
pub use types::{ClengConfig, Document, ExtractError, Node, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::explore::Workspace;
    pub use crate::index::*;
    pub use crate::loader::*;
    pub use crate::merge::*;
    pub use crate::types::*;
}

/// Fields concatenated by `merge` unless configured otherwise
pub const DEFAULT_MERGE_FIELDS: &[&str] = &["macros", "functions", "enums"];

/// Documents preloaded for exploration unless configured otherwise
pub const DEFAULT_RESOURCES: &[&str] = &["output"];

/// Default port of the exploration server
pub const DEFAULT_PORT: u16 = 3018;

/// Shown in place of a field a node does not define
pub const ABSENT_MARKER: &str = "<absent>";
