//! Line parsers.
//!
//! Each parser turns a [`Token`] into a [`Payload`], checking its own minimum
//! parameter count. Returning `None` means the line was structurally
//! insufficient; the registry then emits an `Unknown` event instead.

mod commands;
mod errors;
mod replies;

pub use commands::{
    InviteParser, JoinParser, KickParser, MessageParser, NickParser, PartParser, PingParser,
    PongParser, QuitParser, TopicParser,
};
pub use errors::ErrorReplyParser;
pub use replies::{
    ChannelUrlParser, MotdParser, NamesEndParser, NamesParser, ServerInfoParser,
    TopicReplyParser, UserHostParser, WelcomeParser,
};

use chrono::{DateTime, Utc};

use super::Token;
use crate::event::Payload;

/// Builds a typed payload from a tokenized line.
pub trait Parser: Send + Sync {
    /// `now` is the processing time, used where a line's own timestamp is
    /// missing or unreadable.
    fn parse(&self, token: &Token<'_>, now: DateTime<Utc>) -> Option<Payload>;
}
