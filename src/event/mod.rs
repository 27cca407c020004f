//! Typed events.
//!
//! Every incoming line becomes exactly one [`Event`]: a common envelope plus a
//! kind-specific [`Payload`]. Session lifecycle changes are reported the same
//! way so listeners have a single stream to watch.

mod kind;
mod payload;

pub use kind::EventKind;
pub use payload::{ErrorCode, ErrorReply, MotdPart, Payload, UserHostEntry};

use chrono::{DateTime, Utc};
use slirc_wire::Source;

use crate::session::SessionId;

/// An immutable, fully parsed event.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// When the line was processed.
    pub timestamp: DateTime<Utc>,
    /// Owning session.
    pub session: SessionId,
    /// The line exactly as received; empty for lifecycle events.
    pub raw: String,
    /// Who sent it.
    pub source: Source,
    pub payload: Payload,
}

impl Event {
    pub fn new(
        timestamp: DateTime<Utc>,
        session: SessionId,
        raw: impl Into<String>,
        source: Source,
        payload: Payload,
    ) -> Self {
        Self {
            timestamp,
            session,
            raw: raw.into(),
            source,
            payload,
        }
    }

    /// Lifecycle event (connect or disconnect) attributed to the server.
    pub(crate) fn lifecycle(session: SessionId, server: &str, payload: Payload) -> Self {
        Self::new(Utc::now(), session, String::new(), Source::parse(server), payload)
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Channel or nick this event is addressed to, if any.
    #[inline]
    pub fn target(&self) -> Option<&str> {
        self.payload.target()
    }

    /// Nick of the sender, if the source is a user.
    #[inline]
    pub fn nick(&self) -> Option<&str> {
        self.source.nick()
    }
}
