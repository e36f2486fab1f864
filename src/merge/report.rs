//! Summary of a merge run.

use serde::Serialize;

/// A configured field one input document did not define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    pub document: String,
    pub field: String,
}

/// Result of merging a batch of documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeReport {
    /// Number of input documents.
    pub documents: usize,
    /// Entries per configured field in the aggregate, in output order.
    pub field_counts: Vec<(String, usize)>,
    /// Absent fields, in input order.
    pub missing: Vec<MissingField>,
}

impl MergeReport {
    /// Total entries across all fields.
    pub fn total_entries(&self) -> usize {
        self.field_counts.iter().map(|(_, n)| n).sum()
    }

    /// Entries in one field, `None` if the field is not configured.
    pub fn count(&self, field: &str) -> Option<usize> {
        self.field_counts
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, n)| *n)
    }

    /// Fields `document` did not define.
    pub fn missing_in<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.missing
            .iter()
            .filter(move |m| m.document == document)
            .map(|m| m.field.as_str())
    }
}
