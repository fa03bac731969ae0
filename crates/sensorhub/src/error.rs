//! Error types for the SensorHub binary.
//!
//! [`AppError`] wraps every failure that can stop the process at startup.
//! Nothing that happens after the server is listening is fatal.

/// Top-level error for the SensorHub binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: sensorhub_core::ConfigError,
    },

    /// The dashboard server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: sensorhub_server::ServerError,
    },

    /// The log subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },
}
