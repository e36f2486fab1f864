//! Field-wise concatenation of extraction documents.

use serde_json::Value;
use tracing::{debug, info};

use crate::types::{value_kind, Document, ExtractError, Result};
use crate::DEFAULT_MERGE_FIELDS;

use super::report::{MergeReport, MissingField};

/// Merges per-unit extraction documents into one aggregate document.
///
/// Only the configured fields are carried into the output; everything else
/// is dropped. A document that lacks a configured field contributes nothing
/// to it; a field that is present must hold an array.
#[derive(Debug, Clone)]
pub struct DocumentMerger {
    fields: Vec<String>,
}

impl Default for DocumentMerger {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_FIELDS.iter().copied())
    }
}

impl DocumentMerger {
    /// Create a merger over the given fields. Duplicates keep their first position.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        Self { fields: unique }
    }

    /// Fields carried into the aggregate, in output order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Merge documents in order.
    pub fn merge(&self, documents: &[Document]) -> Result<Document> {
        self.merge_with_report(documents).map(|(merged, _)| merged)
    }

    /// Merge documents in order and report what each one contributed.
    ///
    /// Documents are labelled by their position (`#0`, `#1`, ...) in errors.
    pub fn merge_with_report(&self, documents: &[Document]) -> Result<(Document, MergeReport)> {
        let labels: Vec<String> = (0..documents.len()).map(|i| format!("#{i}")).collect();
        self.merge_labeled(labels.iter().map(String::as_str).zip(documents))
    }

    /// Merge `(label, document)` pairs in order. Labels name the source in errors.
    pub fn merge_labeled<'a, I>(&self, documents: I) -> Result<(Document, MergeReport)>
    where
        I: IntoIterator<Item = (&'a str, &'a Document)>,
    {
        let mut buckets: Vec<Vec<Value>> = vec![Vec::new(); self.fields.len()];
        let mut missing = Vec::new();
        let mut count = 0;

        for (label, document) in documents {
            count += 1;

            for (field, bucket) in self.fields.iter().zip(buckets.iter_mut()) {
                match document.get(field) {
                    None => {
                        debug!(document = label, field = %field, "Field absent, treating as empty");
                        missing.push(MissingField {
                            document: label.to_string(),
                            field: field.clone(),
                        });
                    }
                    Some(Value::Array(items)) => bucket.extend(items.iter().cloned()),
                    Some(other) => {
                        return Err(ExtractError::MalformedDocument {
                            document: label.to_string(),
                            field: field.clone(),
                            found: value_kind(other),
                        });
                    }
                }
            }
        }

        let mut merged = Document::new();
        let mut field_counts = Vec::with_capacity(self.fields.len());
        for (field, bucket) in self.fields.iter().zip(buckets) {
            field_counts.push((field.clone(), bucket.len()));
            merged.insert(field, Value::Array(bucket));
        }

        let report = MergeReport {
            documents: count,
            field_counts,
            missing,
        };

        info!(
            documents = report.documents,
            entries = report.total_entries(),
            missing = report.missing.len(),
            "Merge complete"
        );

        Ok((merged, report))
    }
}

/// Merge `documents` over `fields` with default labelling.
pub fn merge<S: AsRef<str>>(documents: &[Document], fields: &[S]) -> Result<Document> {
    DocumentMerger::new(fields.iter().map(|f| f.as_ref().to_string())).merge(documents)
}
