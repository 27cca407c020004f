//! Per-connection session: identity, status, the tracked targets and the
//! handle used to drive the connection.
//!
//! [`SessionState`] is owned by the session's reader task while connected and
//! is only ever mutated there, so it carries no locks. [`Session`] is the
//! cheap, shareable handle callers and listeners use.

mod handle;
mod reconcile;
mod state;
mod target;

pub use handle::Session;
pub use reconcile::Reconciled;
pub use state::SessionState;
pub use target::{Channel, PrivateTarget, Target, User};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique session identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocate the next identifier.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    Connected,
    #[default]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = SessionId::next();
        let b = SessionId::next();
        assert!(b > a);
    }

    #[test]
    fn id_display() {
        assert_eq!(SessionId::from(42).to_string(), "s42");
    }
}
