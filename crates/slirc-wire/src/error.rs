//! Error types for line tokenizing and framing.

use thiserror::Error;

/// Reasons a raw line could not be split into source, command and params.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LineError {
    /// The line was empty or only whitespace.
    #[error("empty line")]
    Empty,

    /// A source prefix was present but nothing followed it.
    #[error("missing command")]
    MissingCommand,

    /// The command token was neither letters nor a three-digit numeric.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Errors raised by [`LineCodec`](crate::LineCodec).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The underlying stream failed.
    #[error("codec I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured maximum; it is discarded.
    #[error("line too long: {actual} bytes (limit {limit})")]
    LineTooLong {
        /// Bytes seen before the codec gave up on the line.
        actual: usize,
        /// Configured maximum.
        limit: usize,
    },
}
