/// API server for sealbox.
///
/// The server is a blind relay — every payload that reaches it is already
/// encrypted client-side, and the decryption key (a URL-fragment construct)
/// never appears in any request. The routes map transport JSON onto the
/// vault's two operations and add nothing else.
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::vault::Vault;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The ephemeral vault, owning the backing-store handle.
    pub vault: Arc<Vault>,
}

/// Build the Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::vault_routes())
        .with_state(Arc::new(state))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the API server.
pub async fn serve(state: AppState, addr: &str) -> crate::error::Result<()> {
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(crate::error::VaultError::Io)?;

    tracing::info!("sealbox API server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(crate::error::VaultError::Io)?;

    Ok(())
}
