//! Core config struct definitions and TOML loading.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::flood::FloodConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Engine configuration.
///
/// Every section and field is optional in TOML; missing values fall back to
/// the defaults documented on each field.
///
/// ```toml
/// [connection]
/// default_port = 6697
///
/// [flood]
/// max_lines_per_second = 4
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Connection and line handling.
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Outbound pacing.
    #[serde(default)]
    pub flood: FloodConfig,
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Connection-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Port used when an address has none (default: 6667).
    #[serde(default = "default_port")]
    pub default_port: u16,
    /// TCP connect timeout in milliseconds (default: 10000).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Longest accepted incoming line in bytes, terminator included (default: 8192).
    /// Longer lines are dropped with a warning.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Answer server PINGs automatically (default: true).
    #[serde(default = "default_auto_pong")]
    pub auto_pong: bool,
}

impl ConnectionConfig {
    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            default_port: default_port(),
            connect_timeout_ms: default_connect_timeout_ms(),
            max_line_length: default_max_line_length(),
            auto_pong: default_auto_pong(),
        }
    }
}

fn default_port() -> u16 {
    6667
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_max_line_length() -> usize {
    slirc_wire::codec::DEFAULT_MAX_LINE_LENGTH
}

fn default_auto_pong() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_values_are_correct() {
        let config = EngineConfig::default();
        assert_eq!(config.connection.default_port, 6667);
        assert_eq!(config.connection.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.connection.max_line_length, 8192);
        assert!(config.connection.auto_pong);
        assert_eq!(config.flood.max_lines_per_second, 8);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.connection.default_port, 6667);
        assert_eq!(config.flood.min_delay_ms, 250);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [connection]
            default_port = 6697
            auto_pong = false

            [flood]
            max_lines_per_second = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.connection.default_port, 6697);
        assert!(!config.connection.auto_pong);
        assert_eq!(config.connection.connect_timeout_ms, 10_000);
        assert_eq!(config.flood.max_lines_per_second, 4);
        assert_eq!(config.flood.step_ms, 200);
    }

    #[test]
    fn parse_error_is_reported() {
        let err = EngineConfig::from_toml_str("[flood]\nmin_delay_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_collected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [flood]
            min_delay_ms = 900
            max_delay_ms = 100
            max_lines_per_second = 0
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[connection]\nmax_line_length = 1024").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.connection.max_line_length, 1024);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/slirc-engine.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
