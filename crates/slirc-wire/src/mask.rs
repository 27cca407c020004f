//! Wildcard matching for hostmasks.

use crate::casemap::irc_to_lower;

/// Match `text` against a `*`-wildcard `pattern`.
///
/// The pattern is split on `*` and each literal piece must occur in `text`
/// after the previous one. Nothing is anchored, so a bare piece matches
/// anywhere and `?` has no special meaning. Comparison uses RFC 1459 case
/// mapping.
///
/// ```
/// use slirc_wire::wildcard_match;
///
/// assert!(wildcard_match("*@*.example.com", "nick!user@host.example.com"));
/// assert!(!wildcard_match("*@*.other.com", "nick!user@host.example.com"));
/// assert!(wildcard_match("NICK!*", "nick!user@host"));
/// assert!(wildcard_match("user", "nick!user@host"));
/// ```
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern = irc_to_lower(pattern);
    let text = irc_to_lower(text);
    let mut rest = text.as_str();

    for piece in pattern.split('*') {
        match rest.find(piece) {
            Some(index) => rest = &rest[index + piece.len()..],
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_runs() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("", "anything"));
        assert!(wildcard_match("a*c", "abbbc"));
        assert!(wildcard_match("a*c", "ac"));
        assert!(!wildcard_match("a*c", "abd"));
    }

    #[test]
    fn pieces_must_appear_in_order() {
        assert!(wildcard_match("nick*host", "nick!user@host"));
        assert!(!wildcard_match("host*nick", "nick!user@host"));
        assert!(!wildcard_match("ab*ab", "xxabyy"));
        assert!(wildcard_match("ab*ab", "xxabyyab"));
    }

    #[test]
    fn question_mark_is_literal() {
        assert!(!wildcard_match("te?t", "test"));
        assert!(wildcard_match("te?t", "is te?t here"));
    }

    #[test]
    fn unanchored_at_either_end() {
        let raw = "nick!user@host.example.com";
        assert!(wildcard_match("user", raw));
        assert!(wildcard_match("*@*.example", raw));
        assert!(wildcard_match("nick!*@host", raw));
        assert!(wildcard_match("example.com", raw));
        assert!(!wildcard_match("nobody", raw));
    }

    #[test]
    fn hostmask_domain_match() {
        let raw = "nick!user@host.example.com";
        assert!(wildcard_match("*@*.example.com", raw));
        assert!(!wildcard_match("*@*.other.com", raw));
        assert!(wildcard_match("*!*@*", raw));
    }

    #[test]
    fn rfc1459_case_folding() {
        assert!(wildcard_match("*!*@HOST.EXAMPLE.COM", "nick!user@host.example.com"));
        assert!(wildcard_match("Nick[away]!*", "nick{away}!u@h"));
    }
}
