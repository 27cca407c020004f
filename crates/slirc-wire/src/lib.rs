//! # slirc-wire
//!
//! Wire-level building blocks for the slirc client engine.
//!
//! ## Features
//!
//! - Sender identities (`nick!user@host` or bare host) with wildcard mask matching
//! - RFC 1459 case mapping for nicks and channel names
//! - Zero-copy line tokenizing built on nom
//! - A tokio-util framing codec for CRLF-terminated lines
//!
//! ```rust
//! use slirc_wire::{Line, Source};
//!
//! let line = Line::parse(":nick!u@h PRIVMSG #chan :hello there friend").unwrap();
//! assert_eq!(line.command, "PRIVMSG");
//! assert_eq!(line.params.as_slice(), &["#chan", "hello there friend"]);
//!
//! let source = Source::parse(line.source.unwrap());
//! assert_eq!(source.nick(), Some("nick"));
//! assert!(source.matches("*!*@h"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod codec;
pub mod codes;
pub mod error;
pub mod line;
pub mod mask;
pub mod source;

pub use casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use codec::LineCodec;
pub use error::{CodecError, LineError};
pub use line::Line;
pub use mask::wildcard_match;
pub use source::Source;
