//! Configuration validation.
//!
//! Catches settings that would make the engine misbehave rather than fail.

use thiserror::Error;

use super::EngineConfig;

/// A single configuration problem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("connection.default_port must be non-zero")]
    ZeroDefaultPort,
    #[error("connection.connect_timeout_ms must be non-zero")]
    ZeroConnectTimeout,
    #[error("connection.max_line_length must be at least 512, got {0}")]
    LineLengthTooSmall(usize),
    #[error("flood.min_delay_ms ({min}) exceeds flood.max_delay_ms ({max})")]
    DelayRangeInverted { min: u64, max: u64 },
    #[error("flood.max_lines_per_second must be at least 1")]
    ZeroLinesPerSecond,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &EngineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let connection = &config.connection;
    if connection.default_port == 0 {
        errors.push(ValidationError::ZeroDefaultPort);
    }
    if connection.connect_timeout_ms == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if connection.max_line_length < 512 {
        errors.push(ValidationError::LineLengthTooSmall(connection.max_line_length));
    }

    let flood = &config.flood;
    if flood.min_delay_ms > flood.max_delay_ms {
        errors.push(ValidationError::DelayRangeInverted {
            min: flood.min_delay_ms,
            max: flood.max_delay_ms,
        });
    }
    if flood.max_lines_per_second == 0 {
        errors.push(ValidationError::ZeroLinesPerSecond);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = EngineConfig::default();
        config.connection.default_port = 0;
        config.connection.max_line_length = 100;
        config.flood.min_delay_ms = 1000;

        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroDefaultPort,
                ValidationError::LineLengthTooSmall(100),
                ValidationError::DelayRangeInverted { min: 1000, max: 750 },
            ]
        );
    }

    #[test]
    fn equal_min_and_max_delay_is_fine() {
        let mut config = EngineConfig::default();
        config.flood.min_delay_ms = 500;
        config.flood.max_delay_ms = 500;
        assert!(validate(&config).is_ok());
    }
}
