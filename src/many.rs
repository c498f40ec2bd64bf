use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use tracing::warn;

/// Parser combinator that matches `minimum` or more occurrences of the given parser
///
/// Repetition stops at the first failed attempt. That attempt's error is
/// discarded and the position stays at the end of the last success. If the
/// wrapped parser succeeds without consuming anything, the repetition fails
/// with `NoProgress` instead of looping forever.
#[derive(Clone)]
pub struct Many<P> {
    parser: P,
    minimum: usize,
}

impl<P> Many<P> {
    pub fn new(parser: P, minimum: usize) -> Self {
        Many { parser, minimum }
    }
}

impl<P> Parser for Many<P>
where
    P: Parser,
    P::Error: From<ParseError>,
{
    type Element = P::Element;
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        mut cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        let mut results = Vec::new();

        while let Some((value, next_cursor)) = self.parser.apply(cursor).into_success() {
            if next_cursor.position() == cursor.position() {
                warn!(
                    position = cursor.position(),
                    "repeated parser succeeded without consuming input"
                );
                return ParseState::failure(
                    cursor,
                    ParseError::new(ErrorKind::NoProgress, cursor.position()).into(),
                );
            }
            results.push(value);
            cursor = next_cursor;
        }

        if results.len() < self.minimum {
            return ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::MinimumRepetitionsNotMet {
                        minimum: self.minimum,
                        found: results.len(),
                    },
                    cursor.position(),
                )
                .into(),
            );
        }

        ParseState::success(cursor, results)
    }
}

/// Convenience function to create a Many parser that matches zero or more times
///
/// Never fails for a parser that consumes input on success.
pub fn many<P>(parser: P) -> Many<P>
where
    P: Parser,
    P::Error: From<ParseError>,
{
    Many::new(parser, 0)
}

/// Convenience function to create a Many parser that needs `minimum` matches
pub fn many_at_least<P>(minimum: usize, parser: P) -> Many<P>
where
    P: Parser,
    P::Error: From<ParseError>,
{
    Many::new(parser, minimum)
}
