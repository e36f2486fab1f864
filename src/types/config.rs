//! Configuration types for merging and exploration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MERGE_FIELDS, DEFAULT_PORT, DEFAULT_RESOURCES};

/// Global tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClengConfig {
    /// Fields concatenated by `merge`
    pub merge_fields: Vec<String>,

    /// Document names preloaded by `explore` (read from `<name>.json`)
    pub resources: Vec<String>,

    /// Directory the named documents are read from
    pub resource_dir: PathBuf,

    /// Port of the exploration server
    pub port: u16,
}

impl Default for ClengConfig {
    fn default() -> Self {
        Self {
            merge_fields: to_owned_list(DEFAULT_MERGE_FIELDS),
            resources: to_owned_list(DEFAULT_RESOURCES),
            resource_dir: PathBuf::from("."),
            port: DEFAULT_PORT,
        }
    }
}

impl ClengConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            merge_fields: std::env::var("CLENG_MERGE_FIELDS")
                .ok()
                .and_then(|s| parse_list(&s))
                .unwrap_or_else(|| to_owned_list(DEFAULT_MERGE_FIELDS)),
            resources: std::env::var("CLENG_RESOURCES")
                .ok()
                .and_then(|s| parse_list(&s))
                .unwrap_or_else(|| to_owned_list(DEFAULT_RESOURCES)),
            resource_dir: std::env::var("CLENG_RESOURCE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// Override the merge field set.
    pub fn with_merge_fields(mut self, fields: Vec<String>) -> Self {
        if !fields.is_empty() {
            self.merge_fields = fields;
        }
        self
    }

    /// Override the preloaded document names.
    pub fn with_resources(mut self, resources: Vec<String>) -> Self {
        if !resources.is_empty() {
            self.resources = resources;
        }
        self
    }
}

/// Split a comma-separated list, dropping blanks. `None` if nothing is left.
fn parse_list(raw: &str) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
