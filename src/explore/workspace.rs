//! Named documents loaded for exploration.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::index::{NodeTypeIndexer, TypeIndex};
use crate::loader::load_value;
use crate::types::{nodes_from_value, Node, Result};

/// Exploration context: a fixed set of named documents and their root nodes.
///
/// Built once by the caller and passed explicitly to whatever needs it. It
/// is never mutated after construction, so it can be shared freely.
#[derive(Debug, Default)]
pub struct Workspace {
    documents: BTreeMap<String, Vec<Node>>,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `<name>.json` from `dir` for every name.
    ///
    /// Any unreadable or malformed file fails the whole load.
    pub fn load<S: AsRef<str>>(dir: impl AsRef<Path>, names: &[S]) -> Result<Self> {
        let dir = dir.as_ref();
        let mut workspace = Self::new();

        for name in names {
            let name = name.as_ref();
            let path = dir.join(format!("{name}.json"));
            let value = load_value(&path)?;
            workspace.insert_value(name, &value)?;
        }

        info!(
            dir = %dir.display(),
            documents = workspace.len(),
            "Loaded exploration workspace"
        );

        Ok(workspace)
    }

    /// Add a document from its JSON value, replacing any with the same name.
    pub fn insert_value(&mut self, name: &str, value: &Value) -> Result<()> {
        let roots = nodes_from_value(name, value)?;
        self.insert_roots(name, roots);
        Ok(())
    }

    /// Add a document from already-built root nodes.
    pub fn insert_roots(&mut self, name: &str, roots: Vec<Node>) {
        self.documents.insert(name.to_string(), roots);
    }

    /// Loaded document names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Root nodes of a document.
    pub fn roots(&self, name: &str) -> Option<&[Node]> {
        self.documents.get(name).map(Vec::as_slice)
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Build the type index of a document. `None` if the name is unknown.
    pub fn types(&self, name: &str) -> Option<Result<TypeIndex<'_>>> {
        self.roots(name).map(NodeTypeIndexer::index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_load_named_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("output.json"),
            r#"[{"node_type": "function", "name": "f", "context": [{"node_type": "parameter", "name": "x"}]}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("macros.json"),
            r#"{"macros": [{"node_type": "macro", "name": "A", "value": "1"}]}"#,
        )
        .unwrap();

        let workspace = Workspace::load(dir.path(), &["output", "macros"]).unwrap();

        assert_eq!(workspace.names().collect::<Vec<_>>(), vec!["macros", "output"]);
        let index = workspace.types("output").unwrap().unwrap();
        assert_eq!(index.counts().get("parameter"), Some(&1));
        let index = workspace.types("macros").unwrap().unwrap();
        assert_eq!(index.project("macro", "value"), vec![Some(json!("1"))]);
    }

    #[test]
    fn test_missing_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Workspace::load(dir.path(), &["output"]).is_err());
    }

    #[test]
    fn test_unknown_document() {
        let workspace = Workspace::new();
        assert!(workspace.types("output").is_none());
        assert!(workspace.is_empty());
    }

    #[test]
    fn test_insert_value_replaces() {
        let mut workspace = Workspace::new();
        workspace
            .insert_value("output", &json!([{"node_type": "a"}]))
            .unwrap();
        workspace
            .insert_value("output", &json!([{"node_type": "b"}, {"node_type": "b"}]))
            .unwrap();

        assert_eq!(workspace.len(), 1);
        assert_eq!(workspace.roots("output").map(<[Node]>::len), Some(2));
    }
}
