//! API Routes
//!
//! Configures the Axum router with all preset server endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_preset_handler, delete_preset_handler, get_preset_handler, health_handler,
    list_presets_handler, stats_handler, update_preset_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /filter/presets` - List presets from the presets file
/// - `POST /filter/presets` - Not implemented (501)
/// - `GET /filter/presets/:name` - Fetch one preset, cached by name
/// - `PUT /filter/presets/:name` - Not implemented (501)
/// - `DELETE /filter/presets/:name` - Not implemented (501)
/// - `GET /stats` - Cache statistics
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
        .route(
            "/filter/presets",
            get(list_presets_handler).post(create_preset_handler),
        )
        .route(
            "/filter/presets/:name",
            put(update_preset_handler)
                .get(get_preset_handler)
                .delete(delete_preset_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
