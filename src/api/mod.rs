//! HTTP surface for exploring loaded documents.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Build the exploration routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Documents
        .route("/documents", get(handlers::list_documents))
        .route("/documents/:name/types", get(handlers::get_type_counts))
        .route("/documents/:name/types/:tag", get(handlers::get_type_bucket))
        .route(
            "/documents/:name/types/:tag/fields/:field",
            get(handlers::get_field_projection),
        )
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::explore::Workspace;
    use crate::types::ClengConfig;

    fn app() -> Router {
        let mut workspace = Workspace::new();
        workspace
            .insert_value(
                "output",
                &json!([
                    {
                        "node_type": "function",
                        "name": "f",
                        "context": [
                            {"node_type": "parameter", "name": "x"},
                            {"node_type": "parameter"}
                        ]
                    },
                    {"node_type": "function", "name": "g"}
                ]),
            )
            .unwrap();

        router(Arc::new(AppState {
            workspace,
            config: ClengConfig::default(),
        }))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["documents"], json!(1));
        assert_eq!(body["resources"], json!(["output"]));
    }

    #[tokio::test]
    async fn test_list_documents() {
        let (status, body) = get("/documents").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"name": "output", "roots": 2}]));
    }

    #[tokio::test]
    async fn test_type_counts() {
        let (status, body) = get("/documents/output/types").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"function": 2, "parameter": 2}));
    }

    #[tokio::test]
    async fn test_type_bucket() {
        let (status, body) = get("/documents/output/types/parameter").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"node_type": "parameter", "name": "x"}, {"node_type": "parameter"}])
        );
    }

    #[tokio::test]
    async fn test_field_projection() {
        let (status, body) = get("/documents/output/types/parameter/fields/name").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["x", null]));
    }

    #[tokio::test]
    async fn test_unknown_document_and_tag() {
        let (status, _) = get("/documents/structs/types").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get("/documents/output/types/enum").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
