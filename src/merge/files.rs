//! Merging extraction documents straight from disk.

use std::path::Path;

use tracing::info;

use crate::loader::load_documents;
use crate::types::{ExtractError, Result};

use super::{DocumentMerger, MergeReport};

/// Load every path in order, merge them and render the aggregate as JSON
/// indented by two spaces.
///
/// All inputs are read and merged before anything is rendered, so a failure
/// in any file yields an error and no output.
pub fn merge_files<P: AsRef<Path>>(
    paths: &[P],
    merger: &DocumentMerger,
) -> Result<(String, MergeReport)> {
    info!(files = paths.len(), fields = ?merger.fields(), "Merging documents");

    let loaded = load_documents(paths)?;
    let labels: Vec<String> = loaded.iter().map(|l| l.label()).collect();

    let (merged, report) = merger.merge_labeled(
        labels
            .iter()
            .map(String::as_str)
            .zip(loaded.iter().map(|l| &l.document)),
    )?;

    for label in &labels {
        let missing: Vec<&str> = report.missing_in(label).collect();
        if !missing.is_empty() {
            info!(document = %label, fields = ?missing, "Document lacks merged fields");
        }
    }

    let output = serde_json::to_string_pretty(&merged).map_err(ExtractError::Render)?;
    Ok((output, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_merge_files_renders_two_space_json() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "a.json", r#"{"macros":["A","B"],"functions":["f"]}"#);
        let b = write_file(dir.path(), "b.json", r#"{"macros":["C"],"enums":["E"]}"#);

        let (output, report) = merge_files(&[a, b.clone()], &DocumentMerger::default()).unwrap();

        let expected = r#"{
  "macros": [
    "A",
    "B",
    "C"
  ],
  "functions": [
    "f"
  ],
  "enums": [
    "E"
  ]
}"#;
        assert_eq!(output, expected);
        assert_eq!(report.documents, 2);
        let b_label = b.display().to_string();
        assert_eq!(report.missing_in(&b_label).collect::<Vec<_>>(), vec!["functions"]);
    }

    #[test]
    fn test_bad_second_file_fails_whole_merge() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(dir.path(), "good.json", r#"{"macros":["A"]}"#);
        let bad = write_file(dir.path(), "bad.json", r#"{"macros": ["#);

        let err = merge_files(&[good.clone(), bad], &DocumentMerger::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));

        let missing = dir.path().join("missing.json");
        let err = merge_files(&[good, missing], &DocumentMerger::default()).unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound { .. }));
    }

    #[test]
    fn test_object_field_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(dir.path(), "good.json", r#"{"enums":["E"]}"#);
        let bad = write_file(dir.path(), "unit.json", r#"{"enums":{"RED":0}}"#);

        let err = merge_files(&[good, bad.clone()], &DocumentMerger::default()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains(&bad.display().to_string()), "{message}");
        assert!(message.contains("`enums`"), "{message}");
        assert!(matches!(err, ExtractError::MalformedDocument { found: "object", .. }));
    }
}
