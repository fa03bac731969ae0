//! Dashboard API server for SensorHub.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Viewer** (`GET /`, `/app.js`, `/style.css`) -- the browser
//!   dashboard, embedded in the binary
//! - **`WebSocket` push channel** (`/ws`) streaming every new reading via
//!   the store's [`tokio::sync::broadcast`] channel
//! - **REST endpoints** for reading the current values, ingesting device
//!   data, and checking server status
//!
//! # Architecture
//!
//! All handlers share one [`ReadingStore`] through [`AppState`]. The
//! ingestion handler writes to it; the push channel subscribes to it.
//! Viewers receive the current reading as soon as they connect and then
//! every subsequent one, best effort.
//!
//! [`ReadingStore`]: sensorhub_core::ReadingStore

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
