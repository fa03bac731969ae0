//! Axum router construction for the dashboard server.
//!
//! Assembles all routes (viewer assets, REST, `WebSocket`) into a single
//! [`Router`] with permissive CORS so devices and dashboards on other
//! origins can reach the API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /`, `/app.js`, `/style.css` -- viewer
/// - `GET /ws` -- `WebSocket` reading stream
/// - `GET /api/data` -- current reading
/// - `POST /api/data` -- device ingestion
/// - `GET /api/status` -- health summary
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Viewer
        .route("/", get(handlers::index))
        .route("/app.js", get(handlers::app_js))
        .route("/style.css", get(handlers::style_css))
        // WebSocket
        .route("/ws", get(ws::ws_readings))
        // REST API
        .route(
            "/api/data",
            get(handlers::get_data).post(handlers::post_data),
        )
        .route("/api/status", get(handlers::status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
