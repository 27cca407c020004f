//! Event kind hierarchy.
//!
//! Kinds form a tree rooted at [`EventKind::Any`]. Leaves are concrete: every
//! [`Event`](super::Event) has exactly one. Inner nodes are abstract and only
//! exist so listeners can subscribe to a whole family at once.

use std::fmt;

/// Tag for every event kind, concrete or abstract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    // Abstract
    Any,
    Lifecycle,
    Irc,
    Message,
    Response,
    TopicInfo,
    Error,
    TargetError,
    NickError,

    // Lifecycle
    Connect,
    Disconnect,

    // Commands
    Ping,
    Pong,
    Privmsg,
    Notice,
    Join,
    Part,
    Quit,
    Nick,
    Kick,
    Topic,
    Invite,
    Unknown,

    // Replies
    Welcome,
    ServerInfo,
    UserHost,
    ChannelUrl,
    NoTopic,
    TopicReply,
    TopicSetBy,
    NamesList,
    NamesEnd,
    Motd,

    // Errors
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

impl EventKind {
    /// Direct parent in the hierarchy; `None` only for [`EventKind::Any`].
    pub const fn parent(self) -> Option<EventKind> {
        use EventKind::*;
        Some(match self {
            Any => return None,
            Lifecycle | Irc => Any,
            Connect | Disconnect => Lifecycle,
            Ping | Pong | Join | Part | Quit | Nick | Kick | Topic | Invite | Unknown | Message
            | Response => Irc,
            Privmsg | Notice => Message,
            Welcome | ServerInfo | UserHost | ChannelUrl | NamesList | NamesEnd | Motd
            | TopicInfo | Error => Response,
            NoTopic | TopicReply | TopicSetBy => TopicInfo,
            TargetError | NickError | NoOrigin | NoRecipient | NoTextToSend | NoMotd
            | NoNickGiven | NeedMoreParams | PasswordMismatch => Error,
            NoSuchNick | NoSuchServer | NoSuchChannel | NotOnChannel => TargetError,
            ErroneousNick | NickInUse => NickError,
        })
    }

    /// This kind followed by each ancestor, most specific first.
    pub fn lineage(self) -> impl Iterator<Item = EventKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    /// Whether `self` is `other` or descends from it.
    pub fn is_a(self, other: EventKind) -> bool {
        self.lineage().any(|kind| kind == other)
    }

    /// Abstract kinds never appear on an event.
    pub const fn is_abstract(self) -> bool {
        use EventKind::*;
        matches!(
            self,
            Any | Lifecycle | Irc | Message | Response | TopicInfo | Error | TargetError | NickError
        )
    }

    /// Superseded kinds; subscribing to one still works but is logged.
    pub const fn is_deprecated(self) -> bool {
        matches!(self, EventKind::ChannelUrl)
    }

    /// Whether events of this kind (or, for abstract kinds, of some
    /// descendant) can be addressed to a channel or nick.
    pub fn may_carry_target(self) -> bool {
        use EventKind::*;
        match self {
            Any | Irc | Message | Response | TopicInfo | Error | TargetError => true,
            Privmsg | Notice | Join | Part | Kick | Topic | Invite => true,
            ChannelUrl | NoTopic | TopicReply | TopicSetBy | NamesList | NamesEnd => true,
            NoSuchNick | NoSuchServer | NoSuchChannel | NotOnChannel => true,
            _ => false,
        }
    }

    pub const fn name(self) -> &'static str {
        use EventKind::*;
        match self {
            Any => "any",
            Lifecycle => "lifecycle",
            Irc => "irc",
            Message => "message",
            Response => "response",
            TopicInfo => "topic_info",
            Error => "error",
            TargetError => "target_error",
            NickError => "nick_error",
            Connect => "connect",
            Disconnect => "disconnect",
            Ping => "ping",
            Pong => "pong",
            Privmsg => "privmsg",
            Notice => "notice",
            Join => "join",
            Part => "part",
            Quit => "quit",
            Nick => "nick",
            Kick => "kick",
            Topic => "topic",
            Invite => "invite",
            Unknown => "unknown",
            Welcome => "welcome",
            ServerInfo => "server_info",
            UserHost => "user_host",
            ChannelUrl => "channel_url",
            NoTopic => "no_topic",
            TopicReply => "topic_reply",
            TopicSetBy => "topic_set_by",
            NamesList => "names_list",
            NamesEnd => "names_end",
            Motd => "motd",
            NoSuchNick => "no_such_nick",
            NoSuchServer => "no_such_server",
            NoSuchChannel => "no_such_channel",
            NotOnChannel => "not_on_channel",
            ErroneousNick => "erroneous_nick",
            NickInUse => "nick_in_use",
            NoOrigin => "no_origin",
            NoRecipient => "no_recipient",
            NoTextToSend => "no_text_to_send",
            NoMotd => "no_motd",
            NoNickGiven => "no_nick_given",
            NeedMoreParams => "need_more_params",
            PasswordMismatch => "password_mismatch",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineage_walks_to_root() {
        let chain: Vec<_> = EventKind::NickInUse.lineage().collect();
        assert_eq!(
            chain,
            vec![
                EventKind::NickInUse,
                EventKind::NickError,
                EventKind::Error,
                EventKind::Response,
                EventKind::Irc,
                EventKind::Any,
            ]
        );
    }

    #[test]
    fn message_family() {
        assert!(EventKind::Privmsg.is_a(EventKind::Message));
        assert!(EventKind::Notice.is_a(EventKind::Message));
        assert!(!EventKind::Join.is_a(EventKind::Message));
        assert!(EventKind::Join.is_a(EventKind::Any));
    }

    #[test]
    fn lifecycle_is_not_irc() {
        assert!(EventKind::Disconnect.is_a(EventKind::Lifecycle));
        assert!(!EventKind::Disconnect.is_a(EventKind::Irc));
    }

    #[test]
    fn abstract_kinds_are_inner_nodes() {
        assert!(EventKind::Any.is_abstract());
        assert!(EventKind::TopicInfo.is_abstract());
        assert!(!EventKind::TopicReply.is_abstract());
        assert!(!EventKind::Unknown.is_abstract());
    }

    #[test]
    fn only_channel_url_is_deprecated() {
        assert!(EventKind::ChannelUrl.is_deprecated());
        assert!(!EventKind::Response.is_deprecated());
        assert!(!EventKind::Privmsg.is_deprecated());
    }

    #[test]
    fn target_capability() {
        assert!(EventKind::Privmsg.may_carry_target());
        assert!(EventKind::Message.may_carry_target());
        assert!(EventKind::NoSuchChannel.may_carry_target());
        assert!(!EventKind::Quit.may_carry_target());
        assert!(!EventKind::Ping.may_carry_target());
        assert!(!EventKind::Lifecycle.may_carry_target());
        assert!(!EventKind::NickError.may_carry_target());
    }

    #[test]
    fn display_uses_snake_case_name() {
        assert_eq!(EventKind::NamesList.to_string(), "names_list");
    }
}
