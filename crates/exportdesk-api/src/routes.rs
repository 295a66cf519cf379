//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use exportdesk_core::config::ServerConfig;
use exportdesk_core::error::ExportDeskError;

use crate::handlers;
use crate::state::AppState;

/// Path of the reply endpoint.
pub const AGENT_PATH: &str = "/api/agent";

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route(AGENT_PATH, post(handlers::agent_reply))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured browser origins. Unparseable origins are skipped.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Start the HTTP server on the configured address.
pub async fn start_server(state: AppState) -> Result<(), ExportDeskError> {
    let addr = state.config.bind_addr();
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExportDeskError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!(addr = %addr, "Reply endpoint listening at http://{}{}", addr, AGENT_PATH);

    axum::serve(listener, router)
        .await
        .map_err(|e| ExportDeskError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
