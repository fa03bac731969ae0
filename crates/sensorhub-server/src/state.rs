//! Shared application state for the dashboard server.

use std::sync::Arc;

use sensorhub_core::ReadingStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The current reading and its broadcast channel.
    pub store: Arc<ReadingStore>,
    /// Whether a simulator was started for this process. Reported by
    /// `/api/status`; the store itself enforces the write policy.
    pub simulation_enabled: bool,
}

impl AppState {
    /// Create state around an existing store.
    pub const fn new(store: Arc<ReadingStore>, simulation_enabled: bool) -> Self {
        Self {
            store,
            simulation_enabled,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(ReadingStore::new()), false)
    }
}
