//! Parsers for numeric replies from the server.
//!
//! Numeric replies always start with our own nick (or `*` before
//! registration), so the interesting params begin at index 1.

use chrono::{DateTime, Utc};
use slirc_wire::codes::{RPL_ENDOFMOTD, RPL_MOTDSTART};

use super::Parser;
use crate::event::{MotdPart, Payload, UserHostEntry};
use crate::protocol::Token;

/// 001 `<nick> :<text>`
pub struct WelcomeParser;

impl Parser for WelcomeParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [nick, text] = token.args::<2>()?;
        Some(Payload::Welcome {
            nick: nick.to_owned(),
            text: text.to_owned(),
        })
    }
}

/// 004 `<nick> <servername> <version> ...`
pub struct ServerInfoParser;

impl Parser for ServerInfoParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [nick, host, version] = token.args::<3>()?;
        Some(Payload::ServerInfo {
            nick: nick.to_owned(),
            host: host.to_owned(),
            version: version.to_owned(),
        })
    }
}

/// 302 `<nick> :<entry> <entry> ...`
///
/// Unreadable entries are skipped.
pub struct UserHostParser;

impl Parser for UserHostParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [_, list] = token.args::<2>()?;
        let entries = list
            .split_whitespace()
            .filter_map(UserHostEntry::parse)
            .collect();
        Some(Payload::UserHost { entries })
    }
}

/// 328 `<nick> <channel> :<url>`
pub struct ChannelUrlParser;

impl Parser for ChannelUrlParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [_, channel, url] = token.args::<3>()?;
        Some(Payload::ChannelUrl {
            channel: channel.to_owned(),
            url: url.to_owned(),
        })
    }
}

/// Shared by 331, 332 and 333.
///
/// - 331 `<nick> <channel> :No topic is set`
/// - 332 `<nick> <channel> :<topic>`
/// - 333 `<nick> <channel> <setter> <unix time>`
pub struct TopicReplyParser;

impl Parser for TopicReplyParser {
    fn parse(&self, token: &Token<'_>, now: DateTime<Utc>) -> Option<Payload> {
        use slirc_wire::codes::{RPL_NOTOPIC, RPL_TOPIC, RPL_TOPICWHOTIME};

        match token.command {
            RPL_NOTOPIC => {
                let [_, channel] = token.args::<2>()?;
                Some(Payload::NoTopic {
                    channel: channel.to_owned(),
                })
            }
            RPL_TOPIC => {
                let [_, channel, topic] = token.args::<3>()?;
                Some(Payload::TopicReply {
                    channel: channel.to_owned(),
                    topic: topic.to_owned(),
                })
            }
            RPL_TOPICWHOTIME => {
                let [_, channel, set_by] = token.args::<3>()?;
                let set_at = token
                    .arg(3)
                    .and_then(|secs| secs.parse::<i64>().ok())
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .unwrap_or(now);
                Some(Payload::TopicSetBy {
                    channel: channel.to_owned(),
                    set_by: set_by.to_owned(),
                    set_at,
                })
            }
            _ => None,
        }
    }
}

/// 353 `<nick> [=*@] <channel> :<names>`
///
/// Some servers leave out the channel-type marker, so the channel is taken
/// from the second-to-last param.
pub struct NamesParser;

impl Parser for NamesParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let count = token.params.len();
        if count < 3 {
            return None;
        }
        let channel = token.params[count - 2];
        let names = token.params[count - 1]
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        Some(Payload::NamesList {
            channel: channel.to_owned(),
            names,
        })
    }
}

/// 366 `<nick> <channel> :End of /NAMES list.`
pub struct NamesEndParser;

impl Parser for NamesEndParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [_, channel] = token.args::<2>()?;
        Some(Payload::NamesEnd {
            channel: channel.to_owned(),
        })
    }
}

/// Shared by 375, 372 and 376.
pub struct MotdParser;

impl Parser for MotdParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let [_, text] = token.args::<2>()?;
        let part = match token.command {
            RPL_MOTDSTART => MotdPart::Start,
            RPL_ENDOFMOTD => MotdPart::End,
            _ => MotdPart::Line,
        };
        Some(Payload::Motd {
            part,
            text: text.to_owned(),
        })
    }
}
