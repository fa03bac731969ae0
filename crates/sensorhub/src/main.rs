//! SensorHub dashboard binary.
//!
//! Wires together the reading store, the simulator, and the dashboard
//! server, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`sensorhub-config.yaml` + environment)
//! 2. Initialize structured logging (tracing)
//! 3. Create the reading store
//! 4. Spawn the simulator (unless disabled)
//! 5. Serve the dashboard until interrupted

mod error;

use std::sync::Arc;

use sensorhub_core::config::{LogFormat, LoggingConfig};
use sensorhub_core::{ReadingStore, SensorHubConfig, Simulator};
use sensorhub_server::{AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, logging cannot be
/// installed, or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration.
    let config = SensorHubConfig::load()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;
    info!("sensorhub starting");

    let config_path = SensorHubConfig::resolve_path();
    info!(
        config_file = %config_path.display(),
        config_file_found = config_path.exists(),
        host = config.server.host,
        port = config.server.port,
        simulation_enabled = config.simulation.enabled,
        simulation_interval_ms = config.simulation.interval_ms,
        "Configuration loaded"
    );

    // 3. Create the reading store.
    let store = Arc::new(ReadingStore::new());

    // 4. Spawn the simulator.
    let simulation_enabled = config.simulation.enabled;
    let simulator_handle = if simulation_enabled {
        let simulator = Simulator::new(config.simulation.clone());
        Some(tokio::spawn(simulator.run(Arc::clone(&store))))
    } else {
        info!("Simulation disabled, waiting for real device data");
        None
    };

    // 5. Serve the dashboard.
    let state = Arc::new(AppState::new(store, simulation_enabled));
    let server_config = ServerConfig::from(&config.server);
    info!(
        url = %format!("http://localhost:{}", server_config.port),
        mode = if simulation_enabled {
            "simulation until a device reports"
        } else {
            "real device data only"
        },
        "Dashboard ready"
    );

    let result = sensorhub_server::start_server(&server_config, state, shutdown_signal()).await;

    if let Some(handle) = simulator_handle {
        handle.abort();
    }
    result?;

    info!("sensorhub shutdown complete");
    Ok(())
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(config: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    installed.map_err(|e| AppError::Logging {
        message: e.to_string(),
    })
}

/// Resolve when the process receives `Ctrl-C`.
///
/// If the signal handler cannot be installed the server keeps running;
/// it is then stopped the same way any process without handlers is.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
