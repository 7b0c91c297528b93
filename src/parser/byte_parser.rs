//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for text-based input formats with
//! support for peeking, consuming, comment skipping and quote-aware label
//! parsing. Used by the Newick and edge list loaders.

use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser over an in-memory input.
///
/// # Features
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes with escaping)
/// - Line-wise access for record based formats
/// - Context extraction for error reporting
///
/// Labels are decoded as UTF-8 (lossy); all syntax bytes are ASCII.
///
/// # Example
/// ```
/// use treedist::parser::byte_parser::ByteParser;
///
/// let mut parser = ByteParser::from_str("  [comment] 'Wilson''s':0.5");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert_eq!(parser.parse_label(b":").unwrap(), "Wilson's");
/// assert!(parser.consume_if(b':'));
/// ```
#[derive(Debug, Clone)]
pub struct ByteParser {
    bytes: Vec<u8>,
    position: usize,
}

impl ByteParser {
    /// Creates a new `ByteParser` owning the given bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, position: 0 }
    }

    /// Creates a new `ByteParser` from a string by copying it.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Self::new(input.as_bytes().to_vec())
    }

    /// Peeks at the current byte without consuming it, `None` at EOF.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    /// Gets the current byte and advances the position, `None` at EOF.
    #[inline(always)]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    /// Returns whether the end of input has been reached.
    pub fn is_eof(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Sets the current byte offset, clamped to the input length.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.bytes.len());
    }

    /// Skips (consumes) all consecutive whitespace: space, tab, newline and
    /// carriage return.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.position += 1;
        }
    }

    /// Skips (consumes) a comment in square brackets `[...]` if present.
    ///
    /// # Returns
    /// `true` if a comment was consumed, `false` if there is none here
    ///
    /// # Errors
    /// [UnclosedComment](crate::parser::ParsingErrorType::UnclosedComment)
    /// if the comment has no closing `]`.
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }
        if !self.consume_until(b']', ConsumeMode::Inclusive) {
            return Err(ParsingError::unclosed_comment(self));
        }
        Ok(true)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();
        while self.skip_comment()? {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Consumes the current byte if it equals `byte`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consumes bytes until `target` is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        match self.bytes[self.position..].iter().position(|&b| b == target) {
            Some(offset) => {
                self.position += offset;
                if mode == ConsumeMode::Inclusive {
                    self.position += 1;
                }
                true
            }
            None => {
                self.position = self.bytes.len();
                false
            }
        }
    }

    /// Consumes the rest of the current line including its `\n` and returns
    /// it without the line break (and without a trailing `\r`).
    ///
    /// Returns `None` at EOF.
    pub fn next_line(&mut self) -> Option<&[u8]> {
        if self.is_eof() {
            return None;
        }
        let start = self.position;
        self.consume_until(b'\n', ConsumeMode::Exclusive);
        let mut end = self.position;
        self.consume_if(b'\n');
        if end > start && self.bytes[end - 1] == b'\r' {
            end -= 1;
        }
        Some(&self.bytes[start..end])
    }

    /// Returns the input from `start` up to the current position.
    pub fn slice_from(&self, start: usize) -> &[u8] {
        self.bytes.get(start..self.position).unwrap_or(&[])
    }

    /// Returns up to `k` bytes starting at `position` as string, for error
    /// context. Invalid UTF-8 is replaced.
    pub fn context_at(&self, position: usize, k: usize) -> String {
        let start = position.min(self.bytes.len());
        let end = start.saturating_add(k).min(self.bytes.len());
        String::from_utf8_lossy(&self.bytes[start..end]).into_owned()
    }

    /// Parses a label (quoted or unquoted) ending at any of `delimiters`.
    ///
    /// Leading whitespace and comments are skipped. An empty string is
    /// returned if the next byte already is a delimiter.
    ///
    /// # Errors
    /// Returns an error on an unclosed comment or quoted label.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek() == Some(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a label enclosed in single quotes, with the opening quote not
    /// consumed yet. A doubled quote stands for one quote
    /// (`'Wilson''s'` becomes `Wilson's`).
    ///
    /// # Errors
    /// [UnexpectedEOF](crate::parser::ParsingErrorType::UnexpectedEOF) if
    /// the closing quote is missing.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next(); // opening '

        let mut label = Vec::new();
        loop {
            match self.next() {
                None => return Err(ParsingError::unexpected_eof(self)),
                Some(b'\'') if self.peek() == Some(b'\'') => {
                    label.push(b'\'');
                    self.next();
                }
                Some(b'\'') => break,
                Some(b) => label.push(b),
            }
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters (or EOF).
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let start = self.position;
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            self.position += 1;
        }
        String::from_utf8_lossy(&self.bytes[start..self.position]).into_owned()
    }
}

/// Specifies whether [consume_until](ByteParser::consume_until) consumes
/// the target or stops right before it.
///
/// # Examples
/// ```
/// use treedist::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::from_str("a\tb\t2.5");
/// parser.consume_until(b'\t', ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b'b'));
///
/// parser.consume_until(b'\t', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'\t'));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target along with everything before it.
    Inclusive,
    /// Stop before the target without consuming it.
    Exclusive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsingErrorType;

    #[test]
    fn test_next_line_strips_line_breaks() {
        let mut parser = ByteParser::from_str("a\tb\r\n\nc");
        assert_eq!(parser.next_line(), Some(&b"a\tb"[..]));
        assert_eq!(parser.next_line(), Some(&b""[..]));
        assert_eq!(parser.next_line(), Some(&b"c"[..]));
        assert_eq!(parser.next_line(), None);
    }

    #[test]
    fn test_unclosed_comment() {
        let mut parser = ByteParser::from_str("  [never closed");
        let err = parser.skip_comment_and_whitespace().unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
    }

    #[test]
    fn test_unclosed_quote() {
        let mut parser = ByteParser::from_str("'open");
        let err = parser.parse_label(b",").unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
    }

    #[test]
    fn test_unquoted_label_keeps_utf8() {
        let mut parser = ByteParser::from_str("Möwe:1");
        assert_eq!(parser.parse_unquoted_label(b":"), "Möwe");
        assert_eq!(parser.peek(), Some(b':'));
        assert_eq!(parser.context_at(0, 3), "M\u{f6}");
    }
}
