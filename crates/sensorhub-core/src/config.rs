//! Configuration loading and typed config structures for SensorHub.
//!
//! The configuration lives in an optional `sensorhub-config.yaml` in the
//! working directory (or the file named by `SENSORHUB_CONFIG`). Every
//! field has a default, so a missing file or a partial file is fine.
//! A handful of environment variables override the file:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `HOST` | `server.host` |
//! | `PORT` | `server.port` |
//! | `SIMULATION_ENABLED` | `simulation.enabled` |
//! | `SIMULATION_INTERVAL_MS` | `simulation.interval_ms` |

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sensorhub-config.yaml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "SENSORHUB_CONFIG";

/// Smallest accepted simulator period.
pub const MIN_INTERVAL_MS: u64 = 100;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value was parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SensorHubConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Simulator settings.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SensorHubConfig {
    /// Resolve, read, override, and validate the configuration.
    ///
    /// Reads `SENSORHUB_CONFIG` if set, otherwise [`DEFAULT_CONFIG_FILE`].
    /// A missing file is not an error; defaults are used. Environment
    /// overrides are applied last.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::resolve_path();
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// The config file [`load`](Self::load) reads, whether or not it exists.
    pub fn resolve_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables are not consulted.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// An empty (or whitespace-only) document yields the defaults.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Unset keys leave the current value alone; set but unparseable
    /// values are rejected.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_override("PORT", &port)?;
        }
        if let Some(enabled) = lookup("SIMULATION_ENABLED") {
            self.simulation.enabled = parse_override("SIMULATION_ENABLED", &enabled)?;
        }
        if let Some(interval) = lookup("SIMULATION_INTERVAL_MS") {
            self.simulation.interval_ms = parse_override("SIMULATION_INTERVAL_MS", &interval)?;
        }
        Ok(())
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()
    }
}

fn parse_override<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("invalid {key} {raw:?}: {e}")))
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Simulator configuration.
///
/// Ranges are half-open: values are drawn from `[min, max)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Whether the simulator runs at all. When disabled the dashboard
    /// shows placeholder values until a device reports.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Period between simulator ticks in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Fixed RNG seed for reproducible runs; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Lower bound of simulated temperature.
    #[serde(default = "default_temperature_min")]
    pub temperature_min: f64,

    /// Upper bound of simulated temperature.
    #[serde(default = "default_temperature_max")]
    pub temperature_max: f64,

    /// Lower bound of simulated humidity.
    #[serde(default = "default_humidity_min")]
    pub humidity_min: f64,

    /// Upper bound of simulated humidity.
    #[serde(default = "default_humidity_max")]
    pub humidity_max: f64,

    /// The fan turns on above this temperature.
    #[serde(default = "default_fan_threshold")]
    pub fan_threshold: f64,

    /// The light turns on above this temperature, unless the fan is on.
    #[serde(default = "default_light_threshold")]
    pub light_threshold: f64,
}

impl SimulationConfig {
    /// Reject empty or inverted ranges and too-short periods.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("temperature", self.temperature_min, self.temperature_max)?;
        check_range("humidity", self.humidity_min, self.humidity_max)?;
        if self.interval_ms < MIN_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "simulation.interval_ms must be at least {MIN_INTERVAL_MS}, got {}",
                self.interval_ms
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "simulation.{name} range must satisfy min < max, got [{min}, {max})"
        )))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
            seed: None,
            temperature_min: default_temperature_min(),
            temperature_max: default_temperature_max(),
            humidity_min: default_humidity_min(),
            humidity_max: default_humidity_max(),
            fan_threshold: default_fan_threshold(),
            light_threshold: default_light_threshold(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter (trace, debug, info, warn, error). `RUST_LOG` wins
    /// when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

const fn default_true() -> bool {
    true
}

const fn default_interval_ms() -> u64 {
    3000
}

const fn default_temperature_min() -> f64 {
    20.0
}

const fn default_temperature_max() -> f64 {
    28.0
}

const fn default_humidity_min() -> f64 {
    60.0
}

const fn default_humidity_max() -> f64 {
    80.0
}

const fn default_fan_threshold() -> f64 {
    24.0
}

const fn default_light_threshold() -> f64 {
    21.0
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = SensorHubConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.simulation.enabled);
        assert_eq!(config.simulation.interval_ms, 3000);
        assert!(config.simulation.seed.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080

simulation:
  enabled: false
  interval_ms: 500
  seed: 42
  temperature_min: 10.0
  temperature_max: 15.0

logging:
  level: "debug"
  format: json
"#;

        let config = SensorHubConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(!config.simulation.enabled);
        assert_eq!(config.simulation.interval_ms, 500);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.logging.format, LogFormat::Json);
        // Untouched keys keep their defaults.
        assert_eq!(
            config.simulation.humidity_max.to_bits(),
            default_humidity_max().to_bits()
        );
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SensorHubConfig::parse("server:\n  port: 4000\n");
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.simulation.enabled);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SensorHubConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn parse_rejects_inverted_range() {
        let yaml = "simulation:\n  humidity_min: 90.0\n  humidity_max: 60.0\n";
        let result = SensorHubConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn parse_rejects_short_interval() {
        let yaml = "simulation:\n  interval_ms: 10\n";
        let result = SensorHubConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn parse_rejects_bad_yaml() {
        let result = SensorHubConfig::parse("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = SensorHubConfig::default();
        let result = config.apply_overrides(lookup_from(&[
            ("PORT", "5050"),
            ("HOST", "127.0.0.1"),
            ("SIMULATION_ENABLED", "false"),
            ("SIMULATION_INTERVAL_MS", "1500"),
        ]));
        assert!(result.is_ok());
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.simulation.enabled);
        assert_eq!(config.simulation.interval_ms, 1500);
    }

    #[test]
    fn unset_env_leaves_values() {
        let mut config = SensorHubConfig::default();
        let result = config.apply_overrides(lookup_from(&[]));
        assert!(result.is_ok());
        assert_eq!(config, SensorHubConfig::default());
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut config = SensorHubConfig::default();
        let result = config.apply_overrides(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            let config = SensorHubConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let result = SensorHubConfig::from_file(Path::new("/nonexistent/sensorhub.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
