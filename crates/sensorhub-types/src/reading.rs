//! The sensor reading record and the push channel envelope.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Display value of `lastUpdate` before any reading has been written.
pub const WAITING_FOR_DATA: &str = "Waiting for sensor data...";

// ---------------------------------------------------------------------------
// ReadingSource
// ---------------------------------------------------------------------------

/// Where the current reading came from.
///
/// Governs the viewer's display mode and whether the simulator is still
/// allowed to write. Serialized with the values the device firmware and
/// viewer already understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ReadingSource {
    /// No reading has been written yet.
    #[default]
    #[serde(rename = "desconectado")]
    Disconnected,
    /// The reading was synthesized by the simulator.
    #[serde(rename = "simulación")]
    Simulated,
    /// The reading was pushed by a real device.
    #[serde(rename = "conectado")]
    Live,
}

impl ReadingSource {
    /// Human-readable operating mode for status reports.
    pub const fn mode_label(self) -> &'static str {
        match self {
            Self::Live => "real data",
            Self::Simulated => "simulation",
            Self::Disconnected => "waiting for real data",
        }
    }
}

// ---------------------------------------------------------------------------
// SensorValues
// ---------------------------------------------------------------------------

/// The four measured/actuated values that make up a reading, without the
/// bookkeeping fields.
///
/// Produced by ingestion (after coercion) and by the simulator, and
/// consumed by the reading store.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorValues {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Whether the fan actuator is on.
    pub fan_on: bool,
    /// Whether the light actuator is on.
    pub light_on: bool,
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// The single current snapshot of sensor values and actuator states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Reading {
    /// Temperature in degrees Celsius.
    #[serde(rename = "temperatura")]
    pub temperature: f64,
    /// Relative humidity in percent.
    #[serde(rename = "humedad")]
    pub humidity: f64,
    /// Whether the fan actuator is on.
    #[serde(rename = "ventilador")]
    pub fan_on: bool,
    /// Whether the light actuator is on.
    #[serde(rename = "foco")]
    pub light_on: bool,
    /// Wall-clock time of the last mutation, formatted for display.
    #[serde(rename = "lastUpdate")]
    pub last_update: String,
    /// Where the values came from.
    #[serde(rename = "conexion")]
    pub source: ReadingSource,
}

impl Reading {
    /// The zeroed placeholder a store starts with.
    pub fn initial() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            fan_on: false,
            light_on: false,
            last_update: String::from(WAITING_FOR_DATA),
            source: ReadingSource::Disconnected,
        }
    }

    /// Overwrite every field from `values`, stamping the time and source.
    pub fn overwrite(&mut self, values: SensorValues, source: ReadingSource, stamp: String) {
        self.temperature = values.temperature;
        self.humidity = values.humidity;
        self.fan_on = values.fan_on;
        self.light_on = values.light_on;
        self.last_update = stamp;
        self.source = source;
    }

    /// The value part of this reading.
    pub const fn values(&self) -> SensorValues {
        SensorValues {
            temperature: self.temperature,
            humidity: self.humidity,
            fan_on: self.fan_on,
            light_on: self.light_on,
        }
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::initial()
    }
}

// ---------------------------------------------------------------------------
// PushEvent
// ---------------------------------------------------------------------------

/// A message pushed from the server to a connected viewer.
///
/// Serialized as `{"event": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "event", content = "data")]
pub enum PushEvent {
    /// The current reading.
    #[serde(rename = "sensorData")]
    SensorData(Reading),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_uses_wire_field_names() {
        let reading = Reading {
            temperature: 25.5,
            humidity: 40.0,
            fan_on: true,
            light_on: false,
            last_update: String::from("12:00:00"),
            source: ReadingSource::Live,
        };
        let json = serde_json::to_value(&reading).unwrap_or_default();
        assert_eq!(json["temperatura"], 25.5);
        assert_eq!(json["humedad"], 40.0);
        assert_eq!(json["ventilador"], true);
        assert_eq!(json["foco"], false);
        assert_eq!(json["lastUpdate"], "12:00:00");
        assert_eq!(json["conexion"], "conectado");
    }

    #[test]
    fn source_wire_values() {
        let values: Vec<String> = [
            ReadingSource::Disconnected,
            ReadingSource::Simulated,
            ReadingSource::Live,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap_or_default())
        .collect();
        assert_eq!(values, ["\"desconectado\"", "\"simulación\"", "\"conectado\""]);
    }

    #[test]
    fn initial_reading_is_disconnected_placeholder() {
        let reading = Reading::initial();
        assert_eq!(reading.source, ReadingSource::Disconnected);
        assert_eq!(reading.last_update, WAITING_FOR_DATA);
        assert!(!reading.fan_on);
        assert!(!reading.light_on);
    }

    #[test]
    fn overwrite_replaces_every_field() {
        let mut reading = Reading::initial();
        let values = SensorValues {
            temperature: 22.1,
            humidity: 71.3,
            fan_on: false,
            light_on: true,
        };
        reading.overwrite(values, ReadingSource::Simulated, String::from("08:15:00"));
        assert_eq!(reading.values(), values);
        assert_eq!(reading.source, ReadingSource::Simulated);
        assert_eq!(reading.last_update, "08:15:00");
    }

    #[test]
    fn push_event_envelope() {
        let event = PushEvent::SensorData(Reading::initial());
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(json["event"], "sensorData");
        assert_eq!(json["data"]["conexion"], "desconectado");
    }

    #[test]
    fn mode_labels() {
        assert_eq!(ReadingSource::Live.mode_label(), "real data");
        assert_eq!(ReadingSource::Simulated.mode_label(), "simulation");
        assert_eq!(
            ReadingSource::Disconnected.mode_label(),
            "waiting for real data"
        );
    }
}
