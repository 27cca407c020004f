//! Parser for error numerics.

use chrono::{DateTime, Utc};

use super::Parser;
use crate::event::{ErrorCode, ErrorReply, EventKind, Payload};
use crate::protocol::Token;

/// Shared by every error numeric in [`ErrorCode`].
///
/// Errors about a target, a nick or a command carry that subject as the
/// second param (`<me> <subject> :<text>`); the rest are just
/// `<me> :<text>`.
pub struct ErrorReplyParser;

impl ErrorReplyParser {
    fn has_subject(code: ErrorCode) -> bool {
        let kind = code.kind();
        kind.is_a(EventKind::TargetError)
            || kind.is_a(EventKind::NickError)
            || code == ErrorCode::NeedMoreParams
    }
}

impl Parser for ErrorReplyParser {
    fn parse(&self, token: &Token<'_>, _now: DateTime<Utc>) -> Option<Payload> {
        let code = ErrorCode::from_numeric(token.command)?;
        let (subject, text) = if Self::has_subject(code) {
            let [_, subject, text] = token.args::<3>()?;
            (Some(subject.to_owned()), text)
        } else {
            let [_, text] = token.args::<2>()?;
            (None, text)
        };
        Some(Payload::Error(ErrorReply {
            code,
            subject,
            text: text.to_owned(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::parse_with;
    use super::*;

    #[test]
    fn nick_in_use_carries_nick() {
        assert_eq!(
            parse_with(&ErrorReplyParser, ":srv 433 * bot :Nickname is already in use"),
            Some(Payload::Error(ErrorReply {
                code: ErrorCode::NickInUse,
                subject: Some("bot".into()),
                text: "Nickname is already in use".into(),
            }))
        );
    }

    #[test]
    fn target_error_needs_target() {
        assert_eq!(parse_with(&ErrorReplyParser, ":srv 403 me :No such channel"), None);
        let payload = parse_with(&ErrorReplyParser, ":srv 403 me #gone :No such channel").unwrap();
        assert_eq!(payload.kind(), EventKind::NoSuchChannel);
        assert_eq!(payload.target(), Some("#gone"));
    }

    #[test]
    fn plain_errors_have_no_subject() {
        let payload = parse_with(&ErrorReplyParser, ":srv 422 me :MOTD File is missing").unwrap();
        assert_eq!(
            payload,
            Payload::Error(ErrorReply {
                code: ErrorCode::NoMotd,
                subject: None,
                text: "MOTD File is missing".into(),
            })
        );
    }

    #[test]
    fn need_more_params_names_command() {
        let Some(Payload::Error(reply)) =
            parse_with(&ErrorReplyParser, ":srv 461 me JOIN :Not enough parameters")
        else {
            panic!("expected error reply");
        };
        assert_eq!(reply.subject.as_deref(), Some("JOIN"));
    }

    #[test]
    fn unknown_numeric_is_rejected() {
        assert_eq!(parse_with(&ErrorReplyParser, ":srv 499 me :weird"), None);
    }
}
