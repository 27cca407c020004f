//! Parsers for commands relayed from other clients.

use chrono::{DateTime, Utc};
use slirc_wire::codes::NOTICE;

use super::Parser;
use crate::event::Payload;
use crate::protocol::Token;

fn owned(param: Option<&str>) -> Option<String> {
    param.map(str::to_owned)
}

pub struct PingParser;

impl Parser for PingParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [token] = token.args::<1>()?;
        Some(Payload::Ping {
            token: token.to_owned(),
        })
    }
}

/// `PONG <server> [:<token>]`
pub struct PongParser;

impl Parser for PongParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [server] = token.args::<1>()?;
        Some(Payload::Pong {
            server: server.to_owned(),
            token: owned(token.arg(1)),
        })
    }
}

/// Shared by PRIVMSG and NOTICE.
pub struct MessageParser;

impl Parser for MessageParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [target, text] = token.args::<2>()?;
        let (target, text) = (target.to_owned(), text.to_owned());
        if token.command.eq_ignore_ascii_case(NOTICE) {
            Some(Payload::Notice { target, text })
        } else {
            Some(Payload::Privmsg { target, text })
        }
    }
}

pub struct JoinParser;

impl Parser for JoinParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [channel] = token.args::<1>()?;
        Some(Payload::Join {
            channel: channel.to_owned(),
        })
    }
}

pub struct PartParser;

impl Parser for PartParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [channel] = token.args::<1>()?;
        Some(Payload::Part {
            channel: channel.to_owned(),
            reason: owned(token.arg(1)),
        })
    }
}

/// QUIT has no required params.
pub struct QuitParser;

impl Parser for QuitParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        Some(Payload::Quit {
            reason: owned(token.arg(0)),
        })
    }
}

pub struct NickParser;

impl Parser for NickParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [nick] = token.args::<1>()?;
        Some(Payload::Nick {
            nick: nick.to_owned(),
        })
    }
}

/// `KICK <channel> <nick> [:<reason>]`
pub struct KickParser;

impl Parser for KickParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [channel, nick] = token.args::<2>()?;
        Some(Payload::Kick {
            channel: channel.to_owned(),
            nick: nick.to_owned(),
            reason: owned(token.arg(2)),
        })
    }
}

pub struct TopicParser;

impl Parser for TopicParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [channel, topic] = token.args::<2>()?;
        Some(Payload::Topic {
            channel: channel.to_owned(),
            topic: topic.to_owned(),
        })
    }
}

/// `INVITE <nick> <channel>`
pub struct InviteParser;

impl Parser for InviteParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [nick, channel] = token.args::<2>()?;
        Some(Payload::Invite {
            nick: nick.to_owned(),
            channel: channel.to_owned(),
        })
    }
}
