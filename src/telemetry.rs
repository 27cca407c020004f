//! Standardized span constructors for engine observability.
//!
//! The engine only emits `tracing` events and spans; installing a subscriber
//! is left to the host application.

pub mod spans {
    use tracing::{Span, debug_span, info_span};

    use crate::event::EventKind;
    use crate::session::SessionId;

    /// Span wrapping a session's reader task.
    pub fn session(id: SessionId, server: &str) -> Span {
        info_span!("session", session = %id, server = %server)
    }

    /// Span wrapping a session's writer task.
    pub fn writer(id: SessionId) -> Span {
        debug_span!("writer", session = %id)
    }

    /// Span for delivering one event to listeners.
    pub fn dispatch(kind: EventKind) -> Span {
        debug_span!("dispatch", kind = %kind)
    }
}
