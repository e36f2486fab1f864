//! Extracted program entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entity extracted from a translation unit (macro, function, enum, ...).
///
/// Only `node_type` and `context` are interpreted. Every other key the
/// front-end emitted (name, value, signature, args, ...) is kept verbatim in
/// `fields` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Kind tag, e.g. "function" or "parameter".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Nested child entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<Node>>,

    /// Opaque pass-through payload.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Node {
    /// Create an untagged leaf.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a leaf with the given type tag.
    pub fn tagged(node_type: &str) -> Self {
        Self {
            node_type: Some(node_type.to_string()),
            ..Default::default()
        }
    }

    /// Set a pass-through field.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.context.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// The type tag, if any.
    pub fn node_type(&self) -> Option<&str> {
        self.node_type.as_deref()
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        self.context.as_deref().unwrap_or(&[])
    }

    /// Check if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Look up a field by name.
    ///
    /// `node_type` and `context` resolve to the typed attributes; any other
    /// name is looked up in the pass-through payload.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "node_type" => self.node_type.clone().map(Value::String),
            "context" => self
                .context
                .as_ref()
                .and_then(|children| serde_json::to_value(children).ok()),
            _ => self.fields.get(name).cloned(),
        }
    }

    /// Shortcut for the conventional `name` field.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}
