//! Extraction document type definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ExtractError, Result};
use super::Node;

/// Field name used in errors about the document itself rather than a field.
pub const ROOT_FIELD: &str = "<root>";

/// One translation unit's extraction result.
///
/// Maps a category name ("macros", "functions", ...) to the ordered sequence
/// of entities in that category. Key order follows the source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a parsed JSON value.
    ///
    /// `label` names the source (usually its path) in the error raised when
    /// the value is not an object.
    pub fn from_value(label: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ExtractError::MalformedDocument {
                document: label.to_string(),
                field: ROOT_FIELD.to_string(),
                found: value_kind(&other),
            }),
        }
    }

    /// Set a field.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Raw value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Check whether a field is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in document order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Elements of a sequence field, if it holds one.
    pub fn sequence(&self, name: &str) -> Option<&[Value]> {
        self.fields
            .get(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Convert into a plain JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Collect the root nodes held by a JSON value.
///
/// Accepts an array of nodes, a single node object, or an extraction
/// document whose array fields are concatenated in field order. Array items
/// that are not objects carry no tag and no children, so they are skipped.
pub fn nodes_from_value(label: &str, value: &Value) -> Result<Vec<Node>> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| node_from_value(label, ROOT_FIELD, item))
            .collect(),
        Value::Object(fields) if is_node_like(fields) => {
            Ok(vec![node_from_value(label, ROOT_FIELD, value)?])
        }
        Value::Object(fields) => {
            let mut nodes = Vec::new();
            for (field, entries) in fields {
                let Some(items) = entries.as_array() else {
                    continue;
                };
                for item in items.iter().filter(|item| item.is_object()) {
                    nodes.push(node_from_value(label, field, item)?);
                }
            }
            Ok(nodes)
        }
        other => Err(ExtractError::MalformedDocument {
            document: label.to_string(),
            field: ROOT_FIELD.to_string(),
            found: value_kind(other),
        }),
    }
}

fn is_node_like(fields: &Map<String, Value>) -> bool {
    fields.contains_key("node_type")
}

fn node_from_value(label: &str, field: &str, value: &Value) -> Result<Node> {
    Node::deserialize(value).map_err(|_| ExtractError::MalformedDocument {
        document: label.to_string(),
        field: field.to_string(),
        found: "node with non-string node_type or non-array context",
    })
}

/// Human-readable JSON kind, used in error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        let doc = Document::from_value("a.json", json!({"macros": []})).unwrap();
        assert!(doc.contains("macros"));

        let err = Document::from_value("b.json", json!([1, 2])).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedDocument { ref document, ref field, found: "array" }
                if document == "b.json" && field == ROOT_FIELD
        ));
    }

    #[test]
    fn test_field_order_is_preserved() {
        let doc = Document::from_value(
            "a.json",
            json!({"macros": [], "functions": [], "enums": []}),
        )
        .unwrap();

        let names: Vec<&str> = doc.field_names().collect();
        assert_eq!(names, vec!["macros", "functions", "enums"]);
    }

    #[test]
    fn test_sequence_accessor() {
        let doc = Document::new()
            .with_field("macros", json!(["A", "B"]))
            .with_field("enums", json!({"not": "a list"}));

        assert_eq!(doc.sequence("macros").map(<[Value]>::len), Some(2));
        assert_eq!(doc.sequence("enums"), None);
        assert_eq!(doc.sequence("functions"), None);
    }

    #[test]
    fn test_nodes_from_array() {
        let nodes = nodes_from_value(
            "output.json",
            &json!([{"node_type": "function", "name": "f"}, "stray", {"name": "g"}]),
        )
        .unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].node_type(), Some("function"));
        assert_eq!(nodes[1].name(), Some("g"));
    }

    #[test]
    fn test_nodes_from_document_concatenates_fields() {
        let nodes = nodes_from_value(
            "typedefs.json",
            &json!({
                "simple": [{"name": "u8"}],
                "complex": [{"name": "handler_t"}, {"name": "point_t"}],
                "count": 3
            }),
        )
        .unwrap();

        let names: Vec<_> = nodes.iter().filter_map(Node::name).collect();
        assert_eq!(names, vec!["u8", "handler_t", "point_t"]);
    }

    #[test]
    fn test_nodes_from_single_node() {
        let nodes =
            nodes_from_value("one.json", &json!({"node_type": "struct", "name": "s"})).unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_nodes_from_bad_tag() {
        let err = nodes_from_value("bad.json", &json!({"functions": [{"node_type": 5}]}))
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedDocument { ref field, .. } if field == "functions"
        ));
    }

    #[test]
    fn test_nodes_from_scalar() {
        assert!(nodes_from_value("x.json", &json!(42)).is_err());
    }
}
