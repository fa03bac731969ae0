//! REST API endpoint handlers for the dashboard server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Viewer entry page |
//! | `GET` | `/app.js` | Viewer script |
//! | `GET` | `/style.css` | Viewer stylesheet |
//! | `GET` | `/api/data` | Current reading |
//! | `POST` | `/api/data` | Ingest a device reading |
//! | `GET` | `/api/status` | Server health summary |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use sensorhub_core::{ValidationError, ingest};
use sensorhub_types::{IngestAck, IngestPayload, ServerStatus};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");
const STYLE_CSS: &str = include_str!("../static/style.css");

// ---------------------------------------------------------------------------
// Viewer assets
// ---------------------------------------------------------------------------

/// Serve the viewer entry page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Serve the viewer script.
pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}

/// Serve the viewer stylesheet.
pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

// ---------------------------------------------------------------------------
// GET /api/data
// ---------------------------------------------------------------------------

/// Return the current reading.
pub async fn get_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.get().await)
}

// ---------------------------------------------------------------------------
// POST /api/data
// ---------------------------------------------------------------------------

/// Ingest a reading pushed by a device.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that firmware omitting the `Content-Type` header is still accepted and
/// every rejection uses the same failure body. On success the store is
/// updated, the simulator is locked out for good, and every connected
/// viewer receives the new reading.
pub async fn post_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let values = serde_json::from_slice::<IngestPayload>(&body)
        .map_err(|e| ValidationError::Malformed(e.to_string()))
        .and_then(|payload| ingest::validate(&payload))
        .inspect_err(|e| warn!(error = %e, "Rejected device reading"))?;

    let reading = state.store.apply_live(values).await;
    info!(
        temperature = reading.temperature,
        humidity = reading.humidity,
        fan_on = reading.fan_on,
        light_on = reading.light_on,
        viewers = state.store.viewer_count(),
        "Live reading received"
    );

    Ok(Json(IngestAck::received()))
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Return a health summary: online flag, current mode, whether device
/// data has arrived, the last update marker, and the viewer count.
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let reading = state.store.get().await;
    let viewers = u32::try_from(state.store.viewer_count()).unwrap_or(u32::MAX);

    Json(ServerStatus {
        status: String::from("online"),
        modo: reading.source.mode_label().to_owned(),
        datos_recibidos: state.store.live_data_seen().await,
        ultima_actualizacion: reading.last_update,
        simulacion_habilitada: state.simulation_enabled,
        clientes: viewers,
    })
}
