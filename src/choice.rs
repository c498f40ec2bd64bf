use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use tracing::trace;

/// Parser combinator that tries each alternative from the same starting state
///
/// The first alternative to succeed wins, even if a later one would consume
/// more. Failed attempts consume nothing. When every alternative fails, a
/// `NoAlternativeMatched` error is reported at the original position.
#[derive(Clone)]
pub struct Choice<P> {
    parsers: Vec<P>,
}

impl<P> Parser for Choice<P>
where
    P: Parser,
    P::Error: From<ParseError>,
{
    type Element = P::Element;
    type Output = P::Output;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        for parser in &self.parsers {
            let state = parser.apply(cursor);
            if !state.is_error() {
                return state;
            }
        }

        trace!(
            position = cursor.position(),
            alternatives = self.parsers.len(),
            "no alternative matched"
        );
        ParseState::failure(
            cursor,
            ParseError::new(ErrorKind::NoAlternativeMatched, cursor.position()).into(),
        )
    }
}

/// Creates a parser that returns the result of the first matching alternative
pub fn choice<P>(parsers: impl Into<Vec<P>>) -> Choice<P>
where
    P: Parser,
    P::Error: From<ParseError>,
{
    Choice {
        parsers: parsers.into(),
    }
}
