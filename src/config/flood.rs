//! Outbound flood control configuration.

use std::time::Duration;

use serde::Deserialize;

/// Pacing parameters for the outbound writer.
///
/// The writer keeps the timestamps of the last `max_lines_per_second + 1`
/// lines. Whenever they span less than a second it raises its inter-line
/// delay by `step_ms` (bounded by `min_delay_ms..=max_delay_ms`) and starts
/// cooling; cooling ends once `cooldown_ms` pass without another burst.
#[derive(Debug, Clone, Deserialize)]
pub struct FloodConfig {
    /// Smallest delay applied while cooling (default: 250).
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Largest delay applied while cooling (default: 750).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Lines allowed inside one second before throttling kicks in (default: 8).
    #[serde(default = "default_max_lines_per_second")]
    pub max_lines_per_second: usize,
    /// Delay increase per detected burst (default: 200).
    #[serde(default = "default_step_ms")]
    pub step_ms: u64,
    /// Burst-free time needed to stop cooling (default: 1000).
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl FloodConfig {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_lines_per_second: default_max_lines_per_second(),
            step_ms: default_step_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

fn default_min_delay_ms() -> u64 {
    250
}

fn default_max_delay_ms() -> u64 {
    750
}

fn default_max_lines_per_second() -> usize {
    8
}

fn default_step_ms() -> u64 {
    200
}

fn default_cooldown_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let config = FloodConfig::default();
        assert_eq!(config.min_delay(), Duration::from_millis(250));
        assert_eq!(config.max_delay(), Duration::from_millis(750));
        assert_eq!(config.max_lines_per_second, 8);
        assert_eq!(config.step(), Duration::from_millis(200));
        assert_eq!(config.cooldown(), Duration::from_secs(1));
    }

    #[test]
    fn flood_config_debug_impl() {
        let debug_str = format!("{:?}", FloodConfig::default());
        assert!(debug_str.contains("FloodConfig"));
        assert!(debug_str.contains("750"));
    }
}
