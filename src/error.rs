//! Error types for the engine.
//!
//! Parsing and dispatch never surface errors to callers: malformed lines turn
//! into `Unknown` events and listener failures are logged. What remains here
//! are the failures a caller can act on: bad addresses, failed connects,
//! writes to a dead session, and listener registration mistakes.

use thiserror::Error;

use crate::config::ConfigError;
use crate::session::SessionId;

// ============================================================================
// Engine Errors (addresses, connects)
// ============================================================================

/// Errors from engine and session lifecycle operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),

    #[error("engine has been shut down")]
    EngineGone,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "invalid_address",
            Self::Connect { .. } => "connect_failed",
            Self::ConnectTimeout(_) => "connect_timeout",
            Self::EngineGone => "engine_gone",
            Self::Config(_) => "config",
        }
    }
}

// ============================================================================
// Session Errors (outbound queue)
// ============================================================================

/// Errors from enqueueing outbound lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {0} is not connected")]
    NotConnected(SessionId),
}

// ============================================================================
// Registration Errors (event bus)
// ============================================================================

/// Reasons a listener was not registered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("listener {0} is already registered")]
    Duplicate(String),

    #[error("listener {0} has no valid handlers")]
    NoHandlers(String),
}
