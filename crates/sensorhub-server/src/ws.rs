//! `WebSocket` push channel for real-time readings.
//!
//! Clients connect to `GET /ws`. The current reading is sent right away,
//! then every reading the store publishes, each as a JSON-encoded
//! [`PushEvent::SensorData`] text frame.
//!
//! Delivery is best effort. A viewer that falls behind skips the readings
//! it missed and resumes from the newest; a failed send ends the session.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use sensorhub_types::{PushEvent, Reading};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming readings.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_readings(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Encode a reading as a push channel text frame.
pub fn encode_reading(reading: Reading) -> Option<Message> {
    match serde_json::to_string(&PushEvent::SensorData(reading)) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            warn!("Failed to serialize reading: {e}");
            None
        }
    }
}

/// Handle the `WebSocket` lifecycle: send the snapshot, then forward
/// each broadcast reading until either side goes away.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let session = Uuid::new_v4();
    let (snapshot, mut rx) = state.store.subscribe_with_snapshot().await;
    info!(%session, viewers = state.store.viewer_count(), "Viewer connected");

    if let Some(msg) = encode_reading(snapshot) {
        if socket.send(msg).await.is_err() {
            debug!(%session, "Viewer disconnected (initial send failed)");
            return;
        }
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(reading) => {
                        let Some(msg) = encode_reading(reading) else {
                            continue;
                        };
                        if socket.send(msg).await.is_err() {
                            debug!(%session, "Viewer disconnected (send failed)");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(%session, skipped = n, "Viewer lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!(%session, "Reading channel closed, ending session");
                        break;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(%session, "Viewer disconnected (pong failed)");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%session, "WebSocket error: {e}");
                        break;
                    }
                    // Viewers have nothing to say; ignore text and binary frames.
                    _ => {}
                }
            }
        }
    }

    drop(rx);
    info!(%session, viewers = state.store.viewer_count(), "Viewer disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_reading_is_a_sensor_data_event() {
        let text = match encode_reading(Reading::initial()) {
            Some(Message::Text(text)) => text.as_str().to_owned(),
            _ => String::new(),
        };
        let json: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
        assert_eq!(json["event"], "sensorData");
        assert_eq!(json["data"]["temperatura"], 0.0);
        assert_eq!(json["data"]["conexion"], "desconectado");
    }
}
