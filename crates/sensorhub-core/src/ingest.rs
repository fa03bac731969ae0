//! Validation and coercion of device payloads.
//!
//! A device posts loosely typed JSON. Temperature and humidity must be
//! present and numeric (JSON numbers, or strings that parse as numbers).
//! The two actuator flags are optional and coerced by truthiness, so a
//! firmware that sends `1`/`0` or omits them entirely still works.

use sensorhub_types::{IngestPayload, SensorValues};
use serde_json::Value;

/// Why a device payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or `null`.
    #[error("incomplete data: missing `{field}`")]
    Missing {
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// A required field is present but not a finite number.
    #[error("invalid data: `{field}` is not numeric ({value})")]
    NotNumeric {
        /// Wire name of the offending field.
        field: &'static str,
        /// The value as received, JSON-encoded.
        value: String,
    },

    /// The body is not a JSON object.
    #[error("malformed body: {0}")]
    Malformed(String),
}

/// Turn a device payload into sensor values, or explain why not.
pub fn validate(payload: &IngestPayload) -> Result<SensorValues, ValidationError> {
    let temperature = required_number("temperatura", payload.temperatura.as_ref())?;
    let humidity = required_number("humedad", payload.humedad.as_ref())?;

    Ok(SensorValues {
        temperature,
        humidity,
        fan_on: payload.ventilador.as_ref().is_some_and(truthy),
        light_on: payload.foco.as_ref().is_some_and(truthy),
    })
}

fn required_number(field: &'static str, value: Option<&Value>) -> Result<f64, ValidationError> {
    let value = match value {
        None | Some(Value::Null) => return Err(ValidationError::Missing { field }),
        Some(v) => v,
    };

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        })
}

/// Truthiness of a JSON value: `false`, `0`, `""` and `null` are false,
/// everything else is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
