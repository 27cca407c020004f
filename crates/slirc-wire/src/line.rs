//! Nom-based line tokenizer.
//!
//! Splits one protocol line into its optional source prefix, command and
//! parameters without copying:
//!
//! ```text
//! [:source] <command> [middle...] [:trailing]
//! ```

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    error::ErrorKind,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::error::LineError;

/// Parse the source prefix (the part after `:` and before the first space).
fn parse_source(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command name (1*letter or 3digit).
fn parse_command(input: &str) -> IResult<&str, &str> {
    let (rest, cmd) = take_while1(|c: char| c.is_alphanumeric())(input)?;

    let is_all_letters = cmd.chars().all(|c| c.is_ascii_alphabetic());
    let is_three_digits = cmd.len() == 3 && cmd.chars().all(|c| c.is_ascii_digit());

    if is_all_letters || is_three_digits {
        Ok((rest, cmd))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::AlphaNumeric,
        )))
    }
}

/// Split the remainder after the command into parameters.
///
/// Runs of spaces separate middle parameters. A parameter that starts with `:`
/// is the trailing one: it swallows the rest of the line, spaces included.
fn parse_params(input: &str) -> SmallVec<[&str; 15]> {
    let mut params: SmallVec<[&str; 15]> = SmallVec::new();
    let mut rest = input;

    while rest.starts_with(' ') {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }

        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    params
}

/// A tokenized line borrowing from its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    /// Source prefix without the leading `:`, if the line had one.
    pub source: Option<&'a str>,
    /// Command word or three-digit numeric, as received.
    pub command: &'a str,
    /// Middle parameters followed by the trailing one, if any.
    pub params: SmallVec<[&'a str; 15]>,
}

impl<'a> Line<'a> {
    /// Tokenize a single line. A trailing CR/LF is ignored.
    pub fn parse(input: &'a str) -> Result<Self, LineError> {
        let input = input.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            return Err(LineError::Empty);
        }

        let (rest, source) = match parse_source(input) {
            Ok((rest, source)) => (rest, Some(source)),
            Err(_) => (input, None),
        };
        let rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return Err(LineError::MissingCommand);
        }

        let (rest, command) = parse_command(rest).map_err(|_| {
            let token = rest.split(' ').next().unwrap_or_default();
            LineError::InvalidCommand(token.to_owned())
        })?;

        Ok(Self {
            source,
            command,
            params: parse_params(rest),
        })
    }

    /// Parameter at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }
}
