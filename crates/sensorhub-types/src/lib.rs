//! Shared type definitions for the SensorHub dashboard.
//!
//! This crate is the single source of truth for every payload that
//! crosses a process boundary: the REST API bodies, the push channel
//! envelope, and the reading itself. Types flow downstream to
//! `TypeScript` via `ts-rs` for the browser viewer.
//!
//! Field names on the wire follow the device firmware and the viewer
//! (`temperatura`, `humedad`, `ventilador`, `foco`, `lastUpdate`,
//! `conexion`); the Rust side uses English names and `serde` renames.
//!
//! # Modules
//!
//! - [`reading`] -- The [`Reading`] record, its [`ReadingSource`], and the
//!   [`PushEvent`] envelope sent to viewers
//! - [`api`] -- Request and response bodies for the REST endpoints

pub mod api;
pub mod reading;

// Re-export all public types at crate root for convenience.
pub use api::{IngestAck, IngestFailure, IngestPayload, ServerStatus};
pub use reading::{PushEvent, Reading, ReadingSource, SensorValues, WAITING_FOR_DATA};
