//! Recursive indexing of node trees by type tag.

mod indexer;
mod type_index;

pub use indexer::{index, NodeTypeIndexer};
pub use type_index::{display_field, TypeIndex};
