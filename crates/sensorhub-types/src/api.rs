//! Request and response bodies for the REST endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/api/data` | [`IngestPayload`] in, [`IngestAck`] or [`IngestFailure`] out |
//! | `GET` | `/api/status` | [`ServerStatus`] out |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /api/data` as sent by the device.
///
/// Fields are kept as raw JSON values so that coercion (numeric strings,
/// truthy flags) can happen in one place with precise error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IngestPayload {
    /// Temperature; required, number or numeric string.
    #[serde(default)]
    #[ts(optional)]
    pub temperatura: Option<serde_json::Value>,
    /// Humidity; required, number or numeric string.
    #[serde(default)]
    #[ts(optional)]
    pub humedad: Option<serde_json::Value>,
    /// Fan state; optional, coerced by truthiness.
    #[serde(default)]
    #[ts(optional)]
    pub ventilador: Option<serde_json::Value>,
    /// Light state; optional, coerced by truthiness.
    #[serde(default)]
    #[ts(optional)]
    pub foco: Option<serde_json::Value>,
}

/// Successful ingestion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IngestAck {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl IngestAck {
    /// The acknowledgement returned for every accepted reading.
    pub fn received() -> Self {
        Self {
            success: true,
            message: String::from("Data received"),
        }
    }
}

/// Failed request response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IngestFailure {
    /// Always `false`.
    pub success: bool,
    /// Why the request was rejected.
    pub error: String,
}

impl IngestFailure {
    /// Build a failure body from any displayable error.
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ServerStatus {
    /// Always `"online"` while the server answers.
    pub status: String,
    /// Current operating mode label.
    pub modo: String,
    /// Whether real device data has been received.
    pub datos_recibidos: bool,
    /// The `lastUpdate` marker of the current reading.
    pub ultima_actualizacion: String,
    /// Whether the simulator is configured to run.
    pub simulacion_habilitada: bool,
    /// Number of viewers currently connected to the push channel.
    pub clientes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_with_missing_fields_deserializes() {
        let payload: IngestPayload =
            serde_json::from_str(r#"{"humedad": 40}"#).unwrap_or_default();
        assert!(payload.temperatura.is_none());
        assert_eq!(payload.humedad, Some(serde_json::json!(40)));
        assert!(payload.ventilador.is_none());
    }

    #[test]
    fn payload_ignores_unknown_fields() {
        let payload: Result<IngestPayload, _> =
            serde_json::from_str(r#"{"temperatura": 1, "humedad": 2, "device": "esp32"}"#);
        assert!(payload.is_ok());
    }

    #[test]
    fn failure_body_shape() {
        let json = serde_json::to_value(IngestFailure::new("missing field")).unwrap_or_default();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "missing field");
    }
}
