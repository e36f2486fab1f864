//! HTTP request handlers for the exploration service.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::explore::Workspace;
use crate::index::TypeIndex;
use crate::types::ClengConfig;

/// Application state shared across handlers.
pub struct AppState {
    pub workspace: Workspace,
    pub config: ClengConfig,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    documents: usize,
    resources: Vec<String>,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents: state.workspace.len(),
        resources: state.config.resources.clone(),
    })
}

/// A loaded document.
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    name: String,
    roots: usize,
}

/// List loaded documents.
pub async fn list_documents(State(state): State<Arc<AppState>>) -> Json<Vec<DocumentSummary>> {
    let documents = state
        .workspace
        .names()
        .map(|name| DocumentSummary {
            name: name.to_string(),
            roots: state.workspace.roots(name).map_or(0, |roots| roots.len()),
        })
        .collect();

    Json(documents)
}

/// Tag -> node count for one document.
pub async fn get_type_counts(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<BTreeMap<String, usize>>, StatusCode> {
    with_index(&state, &name, |index| {
        let counts = index
            .counts()
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        Ok(Json(counts))
    })
}

/// Every node of one type in one document.
pub async fn get_type_bucket(
    State(state): State<Arc<AppState>>,
    Path((name, tag)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    with_index(&state, &name, |index| {
        if !index.contains(&tag) {
            return Err(StatusCode::NOT_FOUND);
        }
        serde_json::to_value(index.get(&tag))
            .map(Json)
            .map_err(|e| {
                warn!(document = %name, tag = %tag, error = %e, "Failed to serialize bucket");
                StatusCode::INTERNAL_SERVER_ERROR
            })
    })
}

/// One field of every node of one type; `null` where the field is absent.
pub async fn get_field_projection(
    State(state): State<Arc<AppState>>,
    Path((name, tag, field)): Path<(String, String, String)>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    with_index(&state, &name, |index| {
        if !index.contains(&tag) {
            return Err(StatusCode::NOT_FOUND);
        }
        let values = index
            .project(&tag, &field)
            .into_iter()
            .map(|value| value.unwrap_or(Value::Null))
            .collect();
        Ok(Json(values))
    })
}

/// Build the index of `name` and hand it to `f`.
fn with_index<T>(
    state: &AppState,
    name: &str,
    f: impl FnOnce(&TypeIndex<'_>) -> Result<T, StatusCode>,
) -> Result<T, StatusCode> {
    let Some(result) = state.workspace.types(name) else {
        debug!(document = %name, "Unknown document");
        return Err(StatusCode::NOT_FOUND);
    };

    match result {
        Ok(index) => f(&index),
        Err(e) => {
            warn!(document = %name, error = %e, "Failed to index document");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
