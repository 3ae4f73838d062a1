/// REST API routes for sealbox.
///
/// All data handled by these routes is already encrypted client-side.
/// The server stores and returns envelopes without ever observing
/// plaintext or key material.
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::codec::envelope::{Envelope, SecretKind};
use crate::config;
use crate::error::VaultError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a core error onto a transport status. Infrastructure detail is
/// logged but not echoed back to the caller.
fn error_response(err: VaultError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match &err {
        VaultError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        VaultError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
        _ => {
            tracing::error!(error = %err, "vault operation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
        }
    };
    (status, Json(ErrorResponse { error: message }))
}

// ─── Health ──────────────────────────────────────────────

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

// ─── Vault ───────────────────────────────────────────────

/// Request to store an encrypted envelope.
#[derive(Debug, Deserialize)]
struct StoreRequest {
    iv: String,
    kind: SecretKind,
    ciphertext: String,
    /// Defaults to 24 hours when omitted.
    #[serde(rename = "ttlSeconds")]
    ttl_seconds: Option<u64>,
}

#[derive(Debug, Serialize)]
struct StoreResponse {
    id: String,
}

/// POST /vault — store an envelope, return its identifier.
async fn store_secret(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), (StatusCode, Json<ErrorResponse>)> {
    let ttl = req
        .ttl_seconds
        .map(Duration::from_secs)
        .unwrap_or(config::DEFAULT_TTL);

    let envelope = Envelope {
        iv: req.iv,
        kind: req.kind,
        ciphertext: req.ciphertext,
    };

    let id = state
        .vault
        .store(envelope, ttl)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(StoreResponse { id })))
}

/// POST /vault/{id}/take — atomically fetch and destroy an envelope.
///
/// 404 covers never-existed, expired and already-taken alike; the cases
/// are intentionally indistinguishable on the wire.
async fn take_secret(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, (StatusCode, Json<ErrorResponse>)> {
    let envelope = state.vault.take(&id).await.map_err(error_response)?;
    Ok(Json(envelope))
}

pub fn vault_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vault", post(store_secret))
        .route("/vault/{id}/take", post(take_secret))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    use super::*;
    use crate::vault::memory::MemoryVaultStore;
    use crate::vault::Vault;

    fn test_app() -> Router {
        let store = Arc::new(MemoryVaultStore::new());
        let vault = Vault::new(store, Duration::from_secs(24 * 60 * 60));
        crate::server::build_app(AppState {
            vault: Arc::new(vault),
        })
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_store_take_then_404() {
        let app = test_app();

        let stored = serde_json::json!({
            "iv": "AAAAAAAAAAAAAAAA",
            "kind": "text",
            "ciphertext": "BBBBBBBB",
            "ttlSeconds": 60,
        });

        let response = app
            .clone()
            .oneshot(json_request("/vault", stored.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = json_body(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                &format!("/vault/{id}/take"),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["iv"], stored["iv"]);
        assert_eq!(body["kind"], stored["kind"]);
        assert_eq!(body["ciphertext"], stored["ciphertext"]);

        let response = app
            .oneshot(json_request(
                &format!("/vault/{id}/take"),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_ttl() {
        let response = test_app()
            .oneshot(json_request(
                "/vault",
                serde_json::json!({
                    "iv": "AAAAAAAAAAAAAAAA",
                    "kind": "text",
                    "ciphertext": "BBBBBBBB",
                    "ttlSeconds": 24 * 60 * 60 + 1,
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_rejects_empty_fields() {
        let response = test_app()
            .oneshot(json_request(
                "/vault",
                serde_json::json!({
                    "iv": "",
                    "kind": "text",
                    "ciphertext": "BBBBBBBB",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_take_unknown_id_is_404() {
        let response = test_app()
            .oneshot(json_request(
                "/vault/u0hkN2LapUNvs3km/take",
                serde_json::json!({}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
