//! Line tokenizer.
//!
//! Wraps [`slirc_wire::Line`] with the session context it needs: lines without
//! a prefix are attributed to the server, and lines that cannot be tokenized
//! still produce a token (with an empty command) so the caller can fall back
//! to an `Unknown` event.

use slirc_wire::{Line, Source};
use smallvec::SmallVec;
use tracing::debug;

use crate::session::SessionState;

/// A tokenized line with its resolved source.
#[derive(Clone, Debug)]
pub struct Token<'a> {
    /// The input line, unchanged.
    pub raw: &'a str,
    /// The line's prefix, or the session's server host when it has none.
    pub source: Source,
    /// Command word or numeric as received; empty if the line was malformed.
    pub command: &'a str,
    /// Middle params followed by the trailing one, if present.
    pub params: SmallVec<[&'a str; 15]>,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }

    /// The first `N` params, or `None` if there are fewer.
    pub fn args<const N: usize>(&self) -> Option<[&'a str; N]> {
        if self.params.len() < N {
            return None;
        }
        Some(std::array::from_fn(|i| self.params[i]))
    }

    /// The last param (usually the trailing text), if any.
    #[inline]
    pub fn last(&self) -> Option<&'a str> {
        self.params.last().copied()
    }
}

/// Split `line` into source, command and params. Never fails.
pub fn tokenize<'a>(line: &'a str, state: &SessionState) -> Token<'a> {
    match Line::parse(line) {
        Ok(parsed) => Token {
            raw: line,
            source: Source::parse(parsed.source.unwrap_or_else(|| state.default_source())),
            command: parsed.command,
            params: parsed.params,
        },
        Err(error) => {
            debug!(error = %error, raw = %line, "Could not tokenize line");
            Token {
                raw: line,
                source: Source::parse(prefix_of(line).unwrap_or_else(|| state.default_source())),
                command: "",
                params: SmallVec::new(),
            }
        }
    }
}

/// Best-effort prefix of a line that failed to tokenize.
fn prefix_of(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(':')?;
    let prefix = rest.split(' ').next().unwrap_or_default();
    (!prefix.is_empty()).then_some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionId;

    fn state() -> SessionState {
        SessionState::new(SessionId::from(3), "irc.example.com")
    }

    #[test]
    fn explicit_source_is_used() {
        let state = state();
        let token = tokenize(":nick!u@h PRIVMSG #chan :hello there friend", &state);
        assert_eq!(token.source.raw(), "nick!u@h");
        assert_eq!(token.command, "PRIVMSG");
        assert_eq!(token.params.as_slice(), &["#chan", "hello there friend"]);
    }

    #[test]
    fn missing_source_falls_back_to_server_address() {
        let state = state();
        let token = tokenize("PING :12345", &state);
        assert_eq!(token.source.raw(), "irc.example.com");
        assert_eq!(token.arg(0), Some("12345"));
    }

    #[test]
    fn missing_source_prefers_announced_host() {
        let mut state = state();
        state.set_server_identity("hub.example.net", "ircd");
        let token = tokenize("PING :12345", &state);
        assert_eq!(token.source.raw(), "hub.example.net");
    }

    #[test]
    fn malformed_line_yields_empty_command() {
        let state = state();
        let token = tokenize(":lonely.server", &state);
        assert_eq!(token.command, "");
        assert!(token.params.is_empty());
        assert_eq!(token.source.raw(), "lonely.server");

        let token = tokenize("", &state);
        assert_eq!(token.command, "");
        assert_eq!(token.source.raw(), "irc.example.com");
    }

    #[test]
    fn args_requires_minimum() {
        let state = state();
        let token = tokenize(":n!u@h KICK #c victim", &state);
        assert_eq!(token.args::<2>(), Some(["#c", "victim"]));
        assert_eq!(token.args::<3>(), None);
        assert_eq!(token.last(), Some("victim"));
    }
}
