use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
///
/// This is a two-way `choice` for parsers of different concrete types; both
/// attempts start from the same position.
#[derive(Clone)]
pub struct Or<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Or { parser1, parser2 }
    }
}

impl<P1, P2> Parser for Or<P1, P2>
where
    P1: Parser,
    P1::Error: From<ParseError>,
    P2: Parser<Element = P1::Element, Output = P1::Output, Error = P1::Error>,
{
    type Element = P1::Element;
    type Output = P1::Output;
    type Error = P1::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        let first = self.parser1.apply(cursor);
        if !first.is_error() {
            return first;
        }

        let second = self.parser2.apply(cursor);
        if !second.is_error() {
            return second;
        }

        ParseState::failure(
            cursor,
            ParseError::new(ErrorKind::NoAlternativeMatched, cursor.position()).into(),
        )
    }
}

/// Extension trait to add .or() method support for parsers
pub trait OrExt: Parser + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<Element = Self::Element, Output = Self::Output, Error = Self::Error>,
    {
        Or::new(self, other)
    }
}

/// Implement OrExt for all parsers
impl<P> OrExt for P where P: Parser {}

/// Convenience function to create an Or parser
pub fn or<P1, P2>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser,
    P2: Parser<Element = P1::Element, Output = P1::Output, Error = P1::Error>,
{
    Or::new(parser1, parser2)
}
