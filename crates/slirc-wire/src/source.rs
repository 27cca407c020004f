//! Sender identities.
//!
//! The prefix of an incoming line names who sent it: a user as
//! `nick!user@host` (sometimes `nick@host`) or a server as a bare host.

use std::fmt;

use crate::mask::wildcard_match;

/// Parsed sender identity.
///
/// Parsing is lenient and never fails; `raw` always holds the input exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Source {
    raw: String,
    nick: Option<String>,
    user: Option<String>,
    host: String,
}

impl Source {
    /// Parse a prefix (without the leading `:`).
    ///
    /// Without an `@` the whole string is taken as a host. With one, the part
    /// before it is `nick` or `nick!user`.
    pub fn parse(raw: &str) -> Self {
        let Some((who, host)) = raw.split_once('@') else {
            return Self {
                raw: raw.to_owned(),
                nick: None,
                user: None,
                host: raw.to_owned(),
            };
        };

        let (nick, user) = match who.split_once('!') {
            Some((nick, user)) => (nick, Some(user)),
            None => (who, None),
        };

        Self {
            raw: raw.to_owned(),
            nick: Some(nick.to_owned()),
            user: user.map(str::to_owned),
            host: host.to_owned(),
        }
    }

    /// Build a full `nick!user@host` identity.
    pub fn new(nick: &str, user: &str, host: &str) -> Self {
        Self {
            raw: format!("{nick}!{user}@{host}"),
            nick: Some(nick.to_owned()),
            user: Some(user.to_owned()),
            host: host.to_owned(),
        }
    }

    /// The prefix exactly as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Nick, when the source is a user.
    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    /// Username (ident), when present.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Hostname, or the whole string for a server source.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Wildcard-match this source's raw form against `mask`.
    pub fn matches(&self, mask: &str) -> bool {
        wildcard_match(mask, &self.raw)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Source {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
