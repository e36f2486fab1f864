//! Exploration context for loaded extraction documents.

mod workspace;

pub use workspace::Workspace;
