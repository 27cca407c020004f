//! Messaging targets: channels with their members, and private peers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use slirc_wire::{codes::is_channel_name, irc_to_lower};

/// Privilege prefixes a server may put in front of a nick in a NAMES reply.
const NICK_SIGILS: [char; 5] = ['~', '&', '@', '%', '+'];

/// Strip any leading privilege sigils from a NAMES entry.
pub(crate) fn strip_sigils(name: &str) -> &str {
    name.trim_start_matches(NICK_SIGILS)
}

/// A channel member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    nick: String,
}

impl User {
    pub(crate) fn new(nick: impl Into<String>) -> Self {
        Self { nick: nick.into() }
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }
}

/// A direct-message peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateTarget {
    name: String,
}

impl PrivateTarget {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A channel with its topic and membership.
///
/// Members are keyed by case-folded nick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    name: String,
    topic: Option<String>,
    topic_set_by: Option<String>,
    topic_set_at: Option<DateTime<Utc>>,
    users: HashMap<String, User>,
}

impl Channel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            topic: None,
            topic_set_by: None,
            topic_set_at: None,
            users: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn topic_set_by(&self) -> Option<&str> {
        self.topic_set_by.as_deref()
    }

    pub fn topic_set_at(&self) -> Option<DateTime<Utc>> {
        self.topic_set_at
    }

    pub fn user(&self, nick: &str) -> Option<&User> {
        self.users.get(&irc_to_lower(nick))
    }

    pub fn has_user(&self, nick: &str) -> bool {
        self.users.contains_key(&irc_to_lower(nick))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Insert a member unless one with that nick already exists.
    pub(crate) fn add_user(&mut self, nick: &str) -> bool {
        let key = irc_to_lower(nick);
        if self.users.contains_key(&key) {
            return false;
        }
        self.users.insert(key, User::new(nick));
        true
    }

    pub(crate) fn remove_user(&mut self, nick: &str) -> Option<User> {
        self.users.remove(&irc_to_lower(nick))
    }

    /// Move a member's entry to a new nick. No-op if `old` is not a member.
    pub(crate) fn rename_user(&mut self, old: &str, new: &str) -> bool {
        let Some(mut user) = self.users.remove(&irc_to_lower(old)) else {
            return false;
        };
        user.nick = new.to_owned();
        self.users.insert(irc_to_lower(new), user);
        true
    }

    pub(crate) fn set_topic(&mut self, topic: Option<&str>, set_by: Option<&str>, at: DateTime<Utc>) {
        self.topic = topic.map(str::to_owned);
        self.topic_set_by = set_by.map(str::to_owned);
        self.topic_set_at = Some(at);
    }

    pub(crate) fn set_topic_origin(&mut self, set_by: &str, at: DateTime<Utc>) {
        self.topic_set_by = Some(set_by.to_owned());
        self.topic_set_at = Some(at);
    }
}

/// Named endpoint of messaging. The variant follows from the name's first
/// character and never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Private(PrivateTarget),
    Channel(Channel),
}

impl Target {
    pub(crate) fn new(name: &str) -> Self {
        if is_channel_name(name) {
            Target::Channel(Channel::new(name))
        } else {
            Target::Private(PrivateTarget {
                name: name.to_owned(),
            })
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Private(target) => target.name(),
            Target::Channel(channel) => channel.name(),
        }
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, Target::Channel(_))
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Target::Channel(channel) => Some(channel),
            Target::Private(_) => None,
        }
    }

    pub(crate) fn as_channel_mut(&mut self) -> Option<&mut Channel> {
        match self {
            Target::Channel(channel) => Some(channel),
            Target::Private(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_follows_name() {
        assert!(Target::new("#rust").is_channel());
        assert!(Target::new("&local").is_channel());
        assert!(!Target::new("friend").is_channel());
    }

    #[test]
    fn sigils_are_stripped() {
        assert_eq!(strip_sigils("@op"), "op");
        assert_eq!(strip_sigils("+voice"), "voice");
        assert_eq!(strip_sigils("@+both"), "both");
        assert_eq!(strip_sigils("~owner"), "owner");
        assert_eq!(strip_sigils("plain"), "plain");
    }

    #[test]
    fn add_user_never_overwrites() {
        let mut channel = Channel::new("#c");
        assert!(channel.add_user("Alice"));
        assert!(!channel.add_user("alice"));
        assert_eq!(channel.user_count(), 1);
        assert_eq!(channel.user("ALICE").map(User::nick), Some("Alice"));
    }

    #[test]
    fn rename_moves_entry() {
        let mut channel = Channel::new("#c");
        channel.add_user("old");
        assert!(channel.rename_user("old", "New"));
        assert!(!channel.has_user("old"));
        assert_eq!(channel.user("new").map(User::nick), Some("New"));
        assert!(!channel.rename_user("ghost", "x"));
    }

    #[test]
    fn topic_round_trip() {
        let mut channel = Channel::new("#c");
        let at = Utc::now();
        channel.set_topic(Some("hello"), Some("op"), at);
        assert_eq!(channel.topic(), Some("hello"));
        assert_eq!(channel.topic_set_by(), Some("op"));
        assert_eq!(channel.topic_set_at(), Some(at));

        channel.set_topic(None, None, at);
        assert_eq!(channel.topic(), None);
        assert_eq!(channel.topic_set_by(), None);
    }
}
