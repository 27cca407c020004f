//! Command words and numeric reply codes the engine understands.
//!
//! Numerics are kept as their three-digit string form since that is how they
//! appear on the wire and how the parser registry keys them.

/// Keepalive probe from the server.
pub const PING: &str = "PING";
/// Keepalive answer.
pub const PONG: &str = "PONG";
/// Message to a channel or user.
pub const PRIVMSG: &str = "PRIVMSG";
/// Notice to a channel or user.
pub const NOTICE: &str = "NOTICE";
/// Someone joined a channel.
pub const JOIN: &str = "JOIN";
/// Someone left a channel.
pub const PART: &str = "PART";
/// Someone left the network.
pub const QUIT: &str = "QUIT";
/// Nick change.
pub const NICK: &str = "NICK";
/// Someone was removed from a channel.
pub const KICK: &str = "KICK";
/// Topic change.
pub const TOPIC: &str = "TOPIC";
/// Invitation to a channel.
pub const INVITE: &str = "INVITE";

/// RPL_WELCOME
pub const RPL_WELCOME: &str = "001";
/// RPL_MYINFO: own nick, server name, server version.
pub const RPL_MYINFO: &str = "004";
/// RPL_USERHOST
pub const RPL_USERHOST: &str = "302";
/// RPL_CHANNEL_URL
pub const RPL_CHANNEL_URL: &str = "328";
/// RPL_NOTOPIC
pub const RPL_NOTOPIC: &str = "331";
/// RPL_TOPIC
pub const RPL_TOPIC: &str = "332";
/// RPL_TOPICWHOTIME
pub const RPL_TOPICWHOTIME: &str = "333";
/// RPL_NAMREPLY
pub const RPL_NAMREPLY: &str = "353";
/// RPL_ENDOFNAMES
pub const RPL_ENDOFNAMES: &str = "366";
/// RPL_MOTD
pub const RPL_MOTD: &str = "372";
/// RPL_MOTDSTART
pub const RPL_MOTDSTART: &str = "375";
/// RPL_ENDOFMOTD
pub const RPL_ENDOFMOTD: &str = "376";

/// ERR_NOSUCHNICK
pub const ERR_NOSUCHNICK: &str = "401";
/// ERR_NOSUCHSERVER
pub const ERR_NOSUCHSERVER: &str = "402";
/// ERR_NOSUCHCHANNEL
pub const ERR_NOSUCHCHANNEL: &str = "403";
/// ERR_NOORIGIN
pub const ERR_NOORIGIN: &str = "409";
/// ERR_NORECIPIENT
pub const ERR_NORECIPIENT: &str = "411";
/// ERR_NOTEXTTOSEND
pub const ERR_NOTEXTTOSEND: &str = "412";
/// ERR_NOMOTD
pub const ERR_NOMOTD: &str = "422";
/// ERR_NONICKNAMEGIVEN
pub const ERR_NONICKNAMEGIVEN: &str = "431";
/// ERR_ERRONEUSNICKNAME
pub const ERR_ERRONEUSNICKNAME: &str = "432";
/// ERR_NICKNAMEINUSE
pub const ERR_NICKNAMEINUSE: &str = "433";
/// ERR_NOTONCHANNEL
pub const ERR_NOTONCHANNEL: &str = "442";
/// ERR_NEEDMOREPARAMS
pub const ERR_NEEDMOREPARAMS: &str = "461";
/// ERR_PASSWDMISMATCH
pub const ERR_PASSWDMISMATCH: &str = "464";

/// Whether `name` is a channel name (`#` or `&` prefix).
#[inline]
pub fn is_channel_name(name: &str) -> bool {
    name.starts_with(['#', '&'])
}
