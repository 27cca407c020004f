//! Process-wide table of live sessions.

use std::borrow::Borrow;
use std::hash::Hash;

use dashmap::DashMap;

use crate::session::{Session, SessionId};

/// Extension helpers for `DashMap` that avoid holding shard locks while
/// caller code runs.
///
/// `DashMap::get()` and `DashMap::iter()` return guards that hold a shard
/// lock; these helpers clone what they need so the guard drops immediately.
pub trait DashMapExt<K, V> {
    /// Clone the value for `key`.
    fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone;

    /// Clone every value into a vector.
    fn values_cloned(&self) -> Vec<V>
    where
        V: Clone;
}

impl<K, V> DashMapExt<K, V> for DashMap<K, V>
where
    K: Eq + Hash,
{
    fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).map(|r| r.value().clone())
    }

    fn values_cloned(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|e| e.value().clone()).collect()
    }
}

/// Sessions that are open (created or connected) and not yet torn down.
#[derive(Default)]
pub(crate) struct SessionRegistry {
    sessions: DashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub(crate) fn insert(&self, session: Session) {
        self.sessions.insert(session.id(), session);
    }

    pub(crate) fn remove(&self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id).map(|(_, session)| session)
    }

    pub(crate) fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.get_cloned(&id)
    }

    /// Point-in-time copy, ordered by id.
    pub(crate) fn snapshot(&self) -> Vec<Session> {
        let mut sessions = self.sessions.values_cloned();
        sessions.sort_by_key(Session::id);
        sessions
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }
}
