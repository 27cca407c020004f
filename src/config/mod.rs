//! Engine configuration.
//!
//! - [`types`]: top-level [`EngineConfig`], [`ConnectionConfig`] and loading
//! - [`flood`]: outbound pacing parameters ([`FloodConfig`])
//! - [`validation`]: sanity checks run by [`EngineConfig::load`]

mod flood;
mod types;
mod validation;

pub use flood::FloodConfig;
pub use types::{ConfigError, ConnectionConfig, EngineConfig};
pub use validation::{ValidationError, validate};
