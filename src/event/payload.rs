//! Kind-specific event data.

use chrono::{DateTime, Utc};
use slirc_wire::Source;

use super::EventKind;

/// Data carried by an event, one variant per concrete kind (error numerics
/// share [`Payload::Error`]).
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Connect,
    Disconnect,

    Ping {
        token: String,
    },
    Pong {
        server: String,
        token: Option<String>,
    },
    Privmsg {
        target: String,
        text: String,
    },
    Notice {
        target: String,
        text: String,
    },
    Join {
        channel: String,
    },
    Part {
        channel: String,
        reason: Option<String>,
    },
    Quit {
        reason: Option<String>,
    },
    Nick {
        nick: String,
    },
    Kick {
        channel: String,
        nick: String,
        reason: Option<String>,
    },
    Topic {
        channel: String,
        topic: String,
    },
    Invite {
        nick: String,
        channel: String,
    },
    /// Anything no parser accepted. `command` is empty when the line could
    /// not be tokenized at all.
    Unknown {
        command: String,
        params: Vec<String>,
    },

    Welcome {
        nick: String,
        text: String,
    },
    ServerInfo {
        nick: String,
        host: String,
        version: String,
    },
    UserHost {
        entries: Vec<UserHostEntry>,
    },
    ChannelUrl {
        channel: String,
        url: String,
    },
    NoTopic {
        channel: String,
    },
    TopicReply {
        channel: String,
        topic: String,
    },
    TopicSetBy {
        channel: String,
        set_by: String,
        set_at: DateTime<Utc>,
    },
    NamesList {
        channel: String,
        names: Vec<String>,
    },
    NamesEnd {
        channel: String,
    },
    Motd {
        part: MotdPart,
        text: String,
    },
    Error(ErrorReply),
}

impl Payload {
    /// Concrete kind of this payload.
    pub fn kind(&self) -> EventKind {
        match self {
            Payload::Connect => EventKind::Connect,
            Payload::Disconnect => EventKind::Disconnect,
            Payload::Ping { .. } => EventKind::Ping,
            Payload::Pong { .. } => EventKind::Pong,
            Payload::Privmsg { .. } => EventKind::Privmsg,
            Payload::Notice { .. } => EventKind::Notice,
            Payload::Join { .. } => EventKind::Join,
            Payload::Part { .. } => EventKind::Part,
            Payload::Quit { .. } => EventKind::Quit,
            Payload::Nick { .. } => EventKind::Nick,
            Payload::Kick { .. } => EventKind::Kick,
            Payload::Topic { .. } => EventKind::Topic,
            Payload::Invite { .. } => EventKind::Invite,
            Payload::Unknown { .. } => EventKind::Unknown,
            Payload::Welcome { .. } => EventKind::Welcome,
            Payload::ServerInfo { .. } => EventKind::ServerInfo,
            Payload::UserHost { .. } => EventKind::UserHost,
            Payload::ChannelUrl { .. } => EventKind::ChannelUrl,
            Payload::NoTopic { .. } => EventKind::NoTopic,
            Payload::TopicReply { .. } => EventKind::TopicReply,
            Payload::TopicSetBy { .. } => EventKind::TopicSetBy,
            Payload::NamesList { .. } => EventKind::NamesList,
            Payload::NamesEnd { .. } => EventKind::NamesEnd,
            Payload::Motd { .. } => EventKind::Motd,
            Payload::Error(reply) => reply.code.kind(),
        }
    }

    /// Channel or nick the payload is addressed to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Payload::Privmsg { target, .. } | Payload::Notice { target, .. } => Some(target),
            Payload::Join { channel }
            | Payload::Part { channel, .. }
            | Payload::Kick { channel, .. }
            | Payload::Topic { channel, .. }
            | Payload::Invite { channel, .. }
            | Payload::ChannelUrl { channel, .. }
            | Payload::NoTopic { channel }
            | Payload::TopicReply { channel, .. }
            | Payload::TopicSetBy { channel, .. }
            | Payload::NamesList { channel, .. }
            | Payload::NamesEnd { channel } => Some(channel),
            Payload::Error(reply) if reply.code.kind().is_a(EventKind::TargetError) => {
                reply.subject.as_deref()
            }
            _ => None,
        }
    }
}

/// Which part of the message of the day a line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotdPart {
    Start,
    Line,
    End,
}

/// One entry of a USERHOST reply, e.g. `nick*=+user@host`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserHostEntry {
    pub source: Source,
    pub oper: bool,
    pub away: bool,
}

impl UserHostEntry {
    /// Parse one space-separated reply entry.
    pub fn parse(entry: &str) -> Option<Self> {
        let (nick, rest) = entry.split_once('=')?;
        let (nick, oper) = match nick.strip_suffix('*') {
            Some(nick) => (nick, true),
            None => (nick, false),
        };
        let mut chars = rest.chars();
        let away = match chars.next()? {
            '+' => false,
            '-' => true,
            _ => return None,
        };
        let (user, host) = chars.as_str().split_once('@')?;
        if nick.is_empty() {
            return None;
        }
        Some(Self {
            source: Source::new(nick, user, host),
            oper,
            away,
        })
    }
}

/// Numeric error reply from the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReply {
    pub code: ErrorCode,
    /// What the error is about: a target for target errors, a nick for nick
    /// errors, a command for [`ErrorCode::NeedMoreParams`].
    pub subject: Option<String>,
    pub text: String,
}

/// Error numerics the engine recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoSuchNick,
    NoSuchServer,
    NoSuchChannel,
    NotOnChannel,
    ErroneousNick,
    NickInUse,
    NoOrigin,
    NoRecipient,
    NoTextToSend,
    NoMotd,
    NoNickGiven,
    NeedMoreParams,
    PasswordMismatch,
}

impl ErrorCode {
    /// Map a three-digit numeric to its error code.
    pub fn from_numeric(numeric: &str) -> Option<Self> {
        use slirc_wire::codes::*;
        Some(match numeric {
            ERR_NOSUCHNICK => Self::NoSuchNick,
            ERR_NOSUCHSERVER => Self::NoSuchServer,
            ERR_NOSUCHCHANNEL => Self::NoSuchChannel,
            ERR_NOTONCHANNEL => Self::NotOnChannel,
            ERR_ERRONEUSNICKNAME => Self::ErroneousNick,
            ERR_NICKNAMEINUSE => Self::NickInUse,
            ERR_NOORIGIN => Self::NoOrigin,
            ERR_NORECIPIENT => Self::NoRecipient,
            ERR_NOTEXTTOSEND => Self::NoTextToSend,
            ERR_NOMOTD => Self::NoMotd,
            ERR_NONICKNAMEGIVEN => Self::NoNickGiven,
            ERR_NEEDMOREPARAMS => Self::NeedMoreParams,
            ERR_PASSWDMISMATCH => Self::PasswordMismatch,
            _ => return None,
        })
    }

    pub fn kind(self) -> EventKind {
        match self {
            Self::NoSuchNick => EventKind::NoSuchNick,
            Self::NoSuchServer => EventKind::NoSuchServer,
            Self::NoSuchChannel => EventKind::NoSuchChannel,
            Self::NotOnChannel => EventKind::NotOnChannel,
            Self::ErroneousNick => EventKind::ErroneousNick,
            Self::NickInUse => EventKind::NickInUse,
            Self::NoOrigin => EventKind::NoOrigin,
            Self::NoRecipient => EventKind::NoRecipient,
            Self::NoTextToSend => EventKind::NoTextToSend,
            Self::NoMotd => EventKind::NoMotd,
            Self::NoNickGiven => EventKind::NoNickGiven,
            Self::NeedMoreParams => EventKind::NeedMoreParams,
            Self::PasswordMismatch => EventKind::PasswordMismatch,
        }
    }
}
