use crate::error::SessionError;
use crate::session::{Session, SessionState};

/// What a listener callback gets alongside the event: a read-only view of the
/// session model (already reconciled with the event) and the session handle.
pub struct Context<'a> {
    state: &'a SessionState,
    session: &'a Session,
}

impl<'a> Context<'a> {
    pub fn new(state: &'a SessionState, session: &'a Session) -> Self {
        Self { state, session }
    }

    pub fn state(&self) -> &'a SessionState {
        self.state
    }

    pub fn session(&self) -> &'a Session {
        self.session
    }

    /// Queue a raw line (without terminator) on this session.
    pub fn send(&self, line: impl Into<String>) -> Result<(), SessionError> {
        self.session.send(line)
    }
}
