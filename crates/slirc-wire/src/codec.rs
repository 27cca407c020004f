//! Line framing codec for tokio.
//!
//! Reads `\n`-terminated lines (a preceding `\r` is dropped) and writes lines
//! with a `\r\n` terminator appended.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::CodecError;

/// Default cap on an incoming line, in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 8192;

/// Line-based codec.
///
/// Text is decoded as UTF-8 lossily so a stray byte never tears down the
/// connection. An over-long line yields [`CodecError::LineTooLong`] once and
/// is then skipped up to its terminator; decoding resumes with the next line.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for a newline.
    next_index: usize,
    max_len: usize,
    /// Set while skipping the remainder of an over-long line.
    discarding: bool,
}

impl LineCodec {
    /// Codec with the default maximum line length.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LENGTH)
    }

    /// Codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Configured maximum line length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, CodecError> {
        loop {
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');

            if self.discarding {
                match newline {
                    Some(offset) => {
                        let _ = src.split_to(self.next_index + offset + 1);
                        self.next_index = 0;
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        src.clear();
                        self.next_index = 0;
                        return Ok(None);
                    }
                }
            }

            let Some(offset) = newline else {
                self.next_index = src.len();
                if src.len() > self.max_len {
                    let actual = src.len();
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Err(CodecError::LineTooLong {
                        actual,
                        limit: self.max_len,
                    });
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(CodecError::LineTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            let text = String::from_utf8_lossy(&line);
            return Ok(Some(text.trim_end_matches(['\r', '\n']).to_owned()));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, CodecError> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if self.discarding || src.is_empty() => {
                src.clear();
                Ok(None)
            }
            None => {
                // Unterminated final line.
                let rest = src.split_to(src.len());
                self.next_index = 0;
                let text = String::from_utf8_lossy(&rest);
                Ok(Some(text.trim_end_matches('\r').to_owned()))
            }
        }
    }
}

impl<T: AsRef<str>> Encoder<T> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> Result<(), CodecError> {
        let line = line.as_ref();
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
