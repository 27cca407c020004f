use std::collections::HashMap;

use slirc_wire::{codes::is_channel_name, irc_eq, irc_to_lower};

use super::target::{Channel, Target};
use super::{SessionId, Status};

/// Authoritative model of one connection.
///
/// Targets are keyed by case-folded name and created lazily the first time
/// an event refers to them.
#[derive(Clone, Debug)]
pub struct SessionState {
    id: SessionId,
    server: String,
    status: Status,
    nick: Option<String>,
    server_host: Option<String>,
    server_version: Option<String>,
    targets: HashMap<String, Target>,
}

impl SessionState {
    /// Fresh state for a session talking to `server` (host as configured).
    pub fn new(id: SessionId, server: impl Into<String>) -> Self {
        Self {
            id,
            server: server.into(),
            status: Status::Disconnected,
            nick: None,
            server_host: None,
            server_version: None,
            targets: HashMap::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Server host as given when the session was opened.
    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == Status::Connected
    }

    /// Own nick, once the server has told us.
    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    /// Server name as announced in the welcome burst.
    pub fn server_host(&self) -> Option<&str> {
        self.server_host.as_deref()
    }

    pub fn server_version(&self) -> Option<&str> {
        self.server_version.as_deref()
    }

    /// Source attributed to lines that arrive without a prefix.
    pub fn default_source(&self) -> &str {
        self.server_host.as_deref().unwrap_or(&self.server)
    }

    /// Whether `nick` is our own nick.
    pub fn is_self(&self, nick: &str) -> bool {
        self.nick.as_deref().is_some_and(|own| irc_eq(own, nick))
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.get(&irc_to_lower(name))
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.target(name).and_then(Target::as_channel)
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.targets.values().filter_map(Target::as_channel)
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn set_nick(&mut self, nick: &str) {
        self.nick = Some(nick.to_owned());
    }

    pub(crate) fn set_server_identity(&mut self, host: &str, version: &str) {
        self.server_host = Some(host.to_owned());
        self.server_version = Some(version.to_owned());
    }

    /// Look up a target, creating it if this is the first reference.
    pub(crate) fn target_mut(&mut self, name: &str) -> &mut Target {
        self.targets
            .entry(irc_to_lower(name))
            .or_insert_with(|| Target::new(name))
    }

    /// Like [`target_mut`](Self::target_mut) but only for channel names.
    pub(crate) fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        if !is_channel_name(name) {
            return None;
        }
        self.target_mut(name).as_channel_mut()
    }

    pub(crate) fn channels_mut(&mut self) -> impl Iterator<Item = &mut Channel> {
        self.targets.values_mut().filter_map(Target::as_channel_mut)
    }

    pub(crate) fn remove_target(&mut self, name: &str) -> Option<Target> {
        self.targets.remove(&irc_to_lower(name))
    }
}
