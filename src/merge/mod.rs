//! Merging per-unit extraction documents into one aggregate.

mod files;
mod merger;
mod report;

pub use files::merge_files;
pub use merger::{merge, DocumentMerger};
pub use report::{MergeReport, MissingField};
