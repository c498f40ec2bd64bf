use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use std::borrow::Cow;

/// Parser that matches an exact string
#[derive(Debug, Clone)]
pub struct StringParser {
    expected: Cow<'static, str>,
}

impl StringParser {
    pub fn new(expected: impl Into<Cow<'static, str>>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Parser for StringParser {
    type Element = u8;
    type Output = Cow<'static, str>;
    type Error = ParseError;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, u8>,
    ) -> ParseState<'code, u8, Self::Output, ParseError> {
        let target = self.expected.as_bytes();

        let Some(actual) = cursor.peek(target.len()) else {
            return ParseState::failure(
                cursor,
                ParseError::end_of_input(format!("'{}'", self.expected), cursor.position()),
            );
        };

        if actual != target {
            return ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::LiteralMismatch {
                        expected: self.expected.to_string(),
                        actual: String::from_utf8_lossy(actual).into_owned(),
                    },
                    cursor.position(),
                ),
            );
        }

        // Clone is cheap here - just copies the reference for &'static str
        ParseState::success(cursor.advance(target.len()), self.expected.clone())
    }
}

/// Convenience function to create a StringParser
pub fn string(expected: impl Into<Cow<'static, str>>) -> StringParser {
    StringParser::new(expected)
}
