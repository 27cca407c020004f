//! Line decoding: tokenizer, parsers and the registry tying codes to parsers.
//!
//! The registry is built once per engine and shared read-only by every
//! session. It never fails: a line no parser accepts becomes an `Unknown`
//! event carrying the raw text.

pub mod parsers;
mod tokenizer;

pub use parsers::Parser;
pub use tokenizer::{Token, tokenize};

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use slirc_wire::codes::*;
use tracing::debug;

use crate::event::{Event, Payload};
use crate::session::SessionState;
use parsers::*;

/// Command word / numeric to parser map.
pub struct ParserRegistry {
    parsers: HashMap<&'static str, Arc<dyn Parser>>,
    line_counts: HashMap<&'static str, AtomicU64>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        let mut parsers: HashMap<&'static str, Arc<dyn Parser>> = HashMap::new();

        parsers.insert(PING, Arc::new(PingParser));
        parsers.insert(PONG, Arc::new(PongParser));

        let message: Arc<dyn Parser> = Arc::new(MessageParser);
        parsers.insert(PRIVMSG, message.clone());
        parsers.insert(NOTICE, message);

        parsers.insert(JOIN, Arc::new(JoinParser));
        parsers.insert(PART, Arc::new(PartParser));
        parsers.insert(QUIT, Arc::new(QuitParser));
        parsers.insert(NICK, Arc::new(NickParser));
        parsers.insert(KICK, Arc::new(KickParser));
        parsers.insert(TOPIC, Arc::new(TopicParser));
        parsers.insert(INVITE, Arc::new(InviteParser));

        parsers.insert(RPL_WELCOME, Arc::new(WelcomeParser));
        parsers.insert(RPL_MYINFO, Arc::new(ServerInfoParser));
        parsers.insert(RPL_USERHOST, Arc::new(UserHostParser));
        parsers.insert(RPL_CHANNEL_URL, Arc::new(ChannelUrlParser));
        parsers.insert(RPL_NAMREPLY, Arc::new(NamesParser));
        parsers.insert(RPL_ENDOFNAMES, Arc::new(NamesEndParser));

        let topic: Arc<dyn Parser> = Arc::new(TopicReplyParser);
        parsers.insert(RPL_NOTOPIC, topic.clone());
        parsers.insert(RPL_TOPIC, topic.clone());
        parsers.insert(RPL_TOPICWHOTIME, topic);

        let motd: Arc<dyn Parser> = Arc::new(MotdParser);
        parsers.insert(RPL_MOTDSTART, motd.clone());
        parsers.insert(RPL_MOTD, motd.clone());
        parsers.insert(RPL_ENDOFMOTD, motd);

        let error: Arc<dyn Parser> = Arc::new(ErrorReplyParser);
        for code in [
            ERR_NOSUCHNICK,
            ERR_NOSUCHSERVER,
            ERR_NOSUCHCHANNEL,
            ERR_NOTONCHANNEL,
            ERR_ERRONEUSNICKNAME,
            ERR_NICKNAMEINUSE,
            ERR_NOORIGIN,
            ERR_NORECIPIENT,
            ERR_NOTEXTTOSEND,
            ERR_NOMOTD,
            ERR_NONICKNAMEGIVEN,
            ERR_NEEDMOREPARAMS,
            ERR_PASSWDMISMATCH,
        ] {
            parsers.insert(code, error.clone());
        }

        let line_counts = parsers
            .keys()
            .map(|&code| (code, AtomicU64::new(0)))
            .collect();

        Self {
            parsers,
            line_counts,
        }
    }

    /// Whether a parser is registered for `command` (case-insensitive).
    pub fn is_registered(&self, command: &str) -> bool {
        self.parsers.contains_key(command.to_ascii_uppercase().as_str())
    }

    /// Decode one line into an event for the session described by `state`.
    pub fn parse(&self, state: &SessionState, line: &str) -> Event {
        let now = Utc::now();
        let token = tokenize(line, state);
        let payload = self
            .payload_for(&token, now)
            .unwrap_or_else(|| Payload::Unknown {
                command: token.command.to_owned(),
                params: token.params.iter().map(|p| (*p).to_owned()).collect(),
            });
        Event::new(now, state.id(), line, token.source, payload)
    }

    fn payload_for(&self, token: &Token<'_>, now: DateTime<Utc>) -> Option<Payload> {
        if token.command.is_empty() {
            return None;
        }

        let command = token.command.to_ascii_uppercase();
        let Some((&code, parser)) = self.parsers.get_key_value(command.as_str()) else {
            debug!(command = %command, "No parser for command");
            return None;
        };

        if let Some(counter) = self.line_counts.get(code) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let payload = parser.parse(token, now);
        if payload.is_none() {
            debug!(command = %command, params = token.params.len(), "Line too short for parser");
        }
        payload
    }

    /// Lines seen per registered code, busiest first. Codes never seen are
    /// left out.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .line_counts
            .iter()
            .map(|(code, count)| (*code, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::session::SessionId;

    fn state() -> SessionState {
        SessionState::new(SessionId::from(5), "irc.example.com")
    }

    #[test]
    fn privmsg_line_becomes_message_event() {
        let registry = ParserRegistry::new();
        let line = ":nick!u@h PRIVMSG #chan :hello there friend";
        let event = registry.parse(&state(), line);

        assert_eq!(event.kind(), EventKind::Privmsg);
        assert!(event.kind().is_a(EventKind::Message));
        assert_eq!(event.raw, line);
        assert_eq!(event.source.raw(), "nick!u@h");
        assert_eq!(event.nick(), Some("nick"));
        assert_eq!(event.target(), Some("#chan"));
        assert_eq!(event.session, SessionId::from(5));
        assert!(matches!(
            event.payload,
            Payload::Privmsg { ref text, .. } if text == "hello there friend"
        ));
    }

    #[test]
    fn sourceless_line_is_attributed_to_server() {
        let registry = ParserRegistry::new();
        let event = registry.parse(&state(), "PING :abc");
        assert_eq!(event.kind(), EventKind::Ping);
        assert_eq!(event.source.raw(), "irc.example.com");
    }

    #[test]
    fn unregistered_command_is_unknown() {
        let registry = ParserRegistry::new();
        let line = ":srv 005 me CHANTYPES=# :are supported by this server";
        let event = registry.parse(&state(), line);
        assert_eq!(event.kind(), EventKind::Unknown);
        assert_eq!(event.raw, line);
        assert_eq!(event.source.raw(), "srv");
        assert!(matches!(event.payload, Payload::Unknown { ref command, .. } if command == "005"));
    }

    #[test]
    fn insufficient_params_are_unknown() {
        let registry = ParserRegistry::new();
        let event = registry.parse(&state(), ":nick!u@h PRIVMSG #chan");
        assert_eq!(event.kind(), EventKind::Unknown);
        assert_eq!(event.source.raw(), "nick!u@h");
    }

    #[test]
    fn garbage_is_unknown_with_best_effort_source() {
        let registry = ParserRegistry::new();
        let event = registry.parse(&state(), ":srv.example.net");
        assert_eq!(event.kind(), EventKind::Unknown);
        assert_eq!(event.source.raw(), "srv.example.net");

        let event = registry.parse(&state(), "");
        assert_eq!(event.kind(), EventKind::Unknown);
        assert_eq!(event.raw, "");
    }

    #[test]
    fn commands_are_case_insensitive() {
        let registry = ParserRegistry::new();
        let event = registry.parse(&state(), ":n!u@h privmsg #c :hi");
        assert_eq!(event.kind(), EventKind::Privmsg);
        let event = registry.parse(&state(), ":n!u@h notice #c :hi");
        assert_eq!(event.kind(), EventKind::Notice);
        assert!(registry.is_registered("join"));
        assert!(!registry.is_registered("WHOIS"));
    }

    #[test]
    fn shared_parsers_cover_every_code() {
        let registry = ParserRegistry::new();
        for code in ["331", "332", "333", "372", "375", "376", "401", "433", "464"] {
            assert!(registry.is_registered(code), "{code} not registered");
        }
    }

    #[test]
    fn stats_count_parsed_lines() {
        let registry = ParserRegistry::new();
        let state = state();
        registry.parse(&state, "PING :a");
        registry.parse(&state, "PING :b");
        registry.parse(&state, ":n!u@h JOIN #c");
        registry.parse(&state, ":srv 005 me X :y");
        assert_eq!(registry.command_stats(), vec![("PING", 2), ("JOIN", 1)]);
    }
}
