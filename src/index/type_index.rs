//! Nodes grouped by type tag.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::types::Node;
use crate::ABSENT_MARKER;

/// Mapping from type tag to every node carrying that tag.
///
/// Buckets hold borrowed nodes in traversal order. Tags are kept sorted so
/// serialized output is stable.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct TypeIndex<'a> {
    buckets: BTreeMap<&'a str, Vec<&'a Node>>,
}

impl<'a> TypeIndex<'a> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, tag: &'a str, node: &'a Node) {
        self.buckets.entry(tag).or_default().push(node);
    }

    /// Nodes tagged `tag`; empty if the tag never occurred.
    pub fn get(&self, tag: &str) -> &[&'a Node] {
        self.buckets.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether any node carries `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.buckets.contains_key(tag)
    }

    /// All tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.buckets.keys().copied()
    }

    /// Bucket sizes by tag.
    pub fn counts(&self) -> BTreeMap<&'a str, usize> {
        self.buckets
            .iter()
            .map(|(tag, nodes)| (*tag, nodes.len()))
            .collect()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no tagged node was found.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of indexed nodes across all buckets.
    pub fn total_nodes(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Value of `field` on every node in the `tag` bucket, `None` where absent.
    pub fn project(&self, tag: &str, field: &str) -> Vec<Option<Value>> {
        self.get(tag).iter().map(|node| node.field(field)).collect()
    }
}

/// Render a projected value for display.
///
/// Strings are printed bare, other values as compact JSON and absent values
/// as the absence marker.
pub fn display_field(value: Option<&Value>) -> String {
    match value {
        None => ABSENT_MARKER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
