//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, delete_multiple_handler, get_handler, get_multiple_handler,
    has_handler, health_handler, set_handler, set_multiple_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a value
/// - `GET /get/:key` - Retrieve a value, null if absent
/// - `DELETE /del/:key` - Delete a key
/// - `GET /has/:key` - Check for a live entry
/// - `POST /clear` - Remove every entry
/// - `POST /get-multiple` - Retrieve several keys
/// - `PUT /set-multiple` - Store several values under one TTL
/// - `POST /delete-multiple` - Delete several keys
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/has/:key", get(has_handler))
        .route("/clear", post(clear_handler))
        .route("/get-multiple", post(get_multiple_handler))
        .route("/set-multiple", put(set_multiple_handler))
        .route("/delete-multiple", post(delete_multiple_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
