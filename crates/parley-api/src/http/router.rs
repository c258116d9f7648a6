//! Axum router configuration with middleware.
//!
//! REST routes are under `/api/`; the WebSocket endpoint is `/ws`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{delete, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.allowed_origin.as_deref());

    let api_routes = Router::new()
        .route(
            "/owners/{owner_id}/chats",
            get(handlers::chat::list_chats).delete(handlers::chat::delete_all_chats),
        )
        .route(
            "/owners/{owner_id}/chats/{chat_id}",
            delete(handlers::chat::delete_chat),
        )
        .route(
            "/owners/{owner_id}/chats/{chat_id}/messages",
            get(handlers::chat::list_messages),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer restricted to the configured origin, or permissive when
/// none is configured.
fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    match allowed_origin.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
