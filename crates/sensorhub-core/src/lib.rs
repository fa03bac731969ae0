//! Reading ingestion and broadcast policy for the SensorHub dashboard.
//!
//! This crate owns the one piece of state in the system, the current
//! [`Reading`](sensorhub_types::Reading), and the two writers allowed to
//! change it.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `sensorhub-config.yaml` and
//!   environment variables into strongly-typed structs.
//! - [`ingest`] -- Validation and coercion of device payloads.
//! - [`simulator`] -- Periodic synthesis of plausible readings while no
//!   device is reporting.
//! - [`store`] -- [`ReadingStore`]: the shared reading plus its broadcast
//!   channel.
//!
//! # Write policy
//!
//! Device data always wins. The first accepted device reading sets a
//! permanent live lock in the store; from then on every simulator tick
//! is a no-op.
//!
//! [`ReadingStore`]: store::ReadingStore

pub mod config;
pub mod ingest;
pub mod simulator;
pub mod store;

pub use config::{ConfigError, SensorHubConfig};
pub use ingest::ValidationError;
pub use simulator::Simulator;
pub use store::ReadingStore;
