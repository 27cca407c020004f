//! State reconciliation.
//!
//! Runs on every event before listeners see it, so callbacks always observe
//! a model that already reflects the event. Every rule is idempotent: a
//! duplicated line leaves the state as a single delivery would.

use slirc_wire::codes::is_channel_name;

use super::target::strip_sigils;
use super::{SessionState, Status};
use crate::event::{Event, Payload};

/// Follow-up the session owner must perform after applying an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciled {
    Nothing,
    /// Our own QUIT came back; the connection should be torn down.
    Disconnect,
}

impl SessionState {
    /// Apply `event` to the model.
    pub fn apply(&mut self, event: &Event) -> Reconciled {
        let actor = event.nick();

        match &event.payload {
            Payload::Welcome { nick, .. } => self.set_nick(nick),

            Payload::ServerInfo {
                nick,
                host,
                version,
            } => {
                self.set_nick(nick);
                self.set_server_identity(host, version);
            }

            Payload::Nick { nick: new } => {
                let Some(old) = actor else {
                    return Reconciled::Nothing;
                };
                if self.is_self(old) {
                    self.set_nick(new);
                }
                for channel in self.channels_mut() {
                    channel.rename_user(old, new);
                }
            }

            Payload::Join { channel } => {
                if let (Some(nick), Some(channel)) = (actor, self.channel_mut(channel)) {
                    channel.add_user(nick);
                }
            }

            Payload::Part { channel: name, .. } => {
                let Some(nick) = actor else {
                    return Reconciled::Nothing;
                };
                if let Some(channel) = self.channel_mut(name) {
                    channel.remove_user(nick);
                }
                if self.is_self(nick) {
                    self.remove_target(name);
                }
            }

            Payload::Quit { .. } => {
                let Some(nick) = actor else {
                    return Reconciled::Nothing;
                };
                for channel in self.channels_mut() {
                    channel.remove_user(nick);
                }
                if self.is_self(nick) && self.is_connected() {
                    self.set_status(Status::Disconnected);
                    return Reconciled::Disconnect;
                }
            }

            Payload::NamesList { channel, names } => {
                if let Some(channel) = self.channel_mut(channel) {
                    for name in names.iter().map(|n| strip_sigils(n)).filter(|n| !n.is_empty()) {
                        channel.add_user(name);
                    }
                }
            }

            Payload::Kick {
                channel: name,
                nick,
                ..
            } => {
                if let Some(channel) = self.channel_mut(name) {
                    channel.remove_user(nick);
                }
                if self.is_self(nick) {
                    self.remove_target(name);
                }
            }

            Payload::Topic { channel, topic } => {
                if let Some(channel) = self.channel_mut(channel) {
                    channel.set_topic(Some(topic.as_str()), actor, event.timestamp);
                }
            }

            Payload::NoTopic { channel } => {
                if let Some(channel) = self.channel_mut(channel) {
                    channel.set_topic(None, None, event.timestamp);
                }
            }

            Payload::TopicReply { channel, topic } => {
                if let Some(channel) = self.channel_mut(channel) {
                    channel.set_topic(Some(topic.as_str()), None, event.timestamp);
                }
            }

            Payload::TopicSetBy {
                channel,
                set_by,
                set_at,
            } => {
                if let Some(channel) = self.channel_mut(channel) {
                    channel.set_topic_origin(set_by, *set_at);
                }
            }

            Payload::Privmsg { target, .. } | Payload::Notice { target, .. } => {
                if is_channel_name(target) {
                    self.channel_mut(target);
                } else if let Some(nick) = actor {
                    self.target_mut(nick);
                }
            }

            _ => {}
        }

        Reconciled::Nothing
    }
}
