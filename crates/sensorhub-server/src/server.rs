//! Dashboard HTTP server lifecycle management.
//!
//! Provides [`start_server`] which binds to a TCP port and runs the
//! Axum server until the supplied shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3000,
        }
    }
}

impl From<&sensorhub_core::config::ServerConfig> for ServerConfig {
    fn from(config: &sensorhub_core::config::ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
        }
    }
}

/// Start the dashboard HTTP server.
///
/// Binds to the configured address, builds the router, and serves
/// requests until `shutdown` resolves. In-flight requests are allowed
/// to finish; open `WebSocket` sessions are dropped.
///
/// # Errors
///
/// Returns an error if the address is invalid, the TCP listener cannot
/// bind, or the server encounters a fatal I/O error.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Dashboard server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Dashboard server stopped");
    Ok(())
}

/// Errors that can occur when starting or running the dashboard server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_core_config() {
        let core = sensorhub_core::config::ServerConfig {
            host: String::from("127.0.0.1"),
            port: 8123,
        };
        let config = ServerConfig::from(&core);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8123);
    }

    #[tokio::test]
    async fn invalid_address_is_a_bind_error() {
        let config = ServerConfig {
            host: String::from("not an address"),
            port: 3000,
        };
        let result = start_server(&config, Arc::new(AppState::default()), async {}).await;
        assert!(matches!(result, Err(ServerError::Bind(_))));
    }

    #[tokio::test]
    async fn stops_when_shutdown_resolves() {
        let config = ServerConfig {
            host: String::from("127.0.0.1"),
            port: 0,
        };
        let result = start_server(&config, Arc::new(AppState::default()), async {}).await;
        assert!(result.is_ok(), "{result:?}");
    }
}
