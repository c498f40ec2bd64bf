use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use std::borrow::Cow;

fn missing(length: usize, cursor: Cursor<'_, u8>) -> ParseError {
    ParseError::end_of_input(format!("{length} byte(s)"), cursor.position())
}

/// Parser that copies a fixed number of bytes
#[derive(Debug, Clone, Copy)]
pub struct Take {
    length: usize,
}

pub fn take(length: usize) -> Take {
    Take { length }
}

impl Parser for Take {
    type Element = u8;
    type Output = Vec<u8>;
    type Error = ParseError;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, u8>,
    ) -> ParseState<'code, u8, Vec<u8>, ParseError> {
        match cursor.peek(self.length) {
            Some(bytes) => ParseState::success(cursor.advance(self.length), bytes.to_vec()),
            None => ParseState::failure(cursor, missing(self.length, cursor)),
        }
    }
}

/// Parser that reads a fixed number of bytes as ASCII text
#[derive(Debug, Clone, Copy)]
pub struct Ascii {
    length: usize,
}

pub fn ascii(length: usize) -> Ascii {
    Ascii { length }
}

impl Parser for Ascii {
    type Element = u8;
    type Output = String;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, u8>) -> ParseState<'code, u8, String, ParseError> {
        let Some(bytes) = cursor.peek(self.length) else {
            return ParseState::failure(cursor, missing(self.length, cursor));
        };

        if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
            return ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::ConversionFailure {
                        target: "ascii",
                        reason: format!(
                            "byte {:#04x} at offset {offset} is not ASCII",
                            bytes[offset]
                        ),
                    },
                    cursor.position(),
                ),
            );
        }

        // All bytes are ASCII, so each one maps to exactly one char
        let text = bytes.iter().copied().map(char::from).collect();
        ParseState::success(cursor.advance(self.length), text)
    }
}

/// Parser that matches an exact byte string
///
/// Mismatches render the expected and actual bytes as text when built with
/// [`ascii_literal`], and as hex otherwise.
#[derive(Debug, Clone)]
pub struct Literal {
    expected: Cow<'static, [u8]>,
    textual: bool,
}

pub fn literal(expected: impl Into<Cow<'static, [u8]>>) -> Literal {
    Literal {
        expected: expected.into(),
        textual: false,
    }
}

pub fn ascii_literal(expected: &'static str) -> Literal {
    Literal {
        expected: Cow::Borrowed(expected.as_bytes()),
        textual: true,
    }
}

impl Literal {
    fn render(&self, bytes: &[u8]) -> String {
        if self.textual {
            String::from_utf8_lossy(bytes).into_owned()
        } else {
            bytes
                .iter()
                .map(|b| format!("{b:02X}"))
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

impl Parser for Literal {
    type Element = u8;
    type Output = Vec<u8>;
    type Error = ParseError;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, u8>,
    ) -> ParseState<'code, u8, Vec<u8>, ParseError> {
        let expected = self.expected.as_ref();

        let Some(actual) = cursor.peek(expected.len()) else {
            return ParseState::failure(
                cursor,
                ParseError::end_of_input(format!("'{}'", self.render(expected)), cursor.position()),
            );
        };

        if actual != expected {
            return ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::LiteralMismatch {
                        expected: self.render(expected),
                        actual: self.render(actual),
                    },
                    cursor.position(),
                ),
            );
        }

        ParseState::success(cursor.advance(expected.len()), actual.to_vec())
    }
}
