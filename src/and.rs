use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::state::ParseState;

/// Parser combinator that sequences two parsers and returns both results as a tuple
///
/// Note: When chaining multiple `.and()` calls, this produces nested tuples like
/// `(((a, b), c), d)` rather than flat tuples. Use [`crate::sequence`] with a
/// tuple of parsers for a flat result.
///
/// Like `sequence`, a failure of the second parser is reported where the second
/// parser left off; the position is not rewound.
#[derive(Clone)]
pub struct And<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> And<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        And { parser1, parser2 }
    }
}

impl<P1, P2> Parser for And<P1, P2>
where
    P1: Parser,
    P2: Parser<Element = P1::Element, Error = P1::Error>,
{
    type Element = P1::Element;
    type Output = (P1::Output, P2::Output);
    type Error = P1::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        let (first, cursor) = match self.parser1.apply(cursor).branch() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        self.parser2
            .apply(cursor)
            .map_result(|second| (first, second))
    }
}

/// Parser combinator that runs two parsers in order and keeps only the first result
#[derive(Clone)]
pub struct Skip<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Parser for Skip<P1, P2>
where
    P1: Parser,
    P2: Parser<Element = P1::Element, Error = P1::Error>,
{
    type Element = P1::Element;
    type Output = P1::Output;
    type Error = P1::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        let (kept, cursor) = match self.parser1.apply(cursor).branch() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        self.parser2.apply(cursor).map_result(|_| kept)
    }
}

/// Parser combinator that runs two parsers in order and keeps only the second result
#[derive(Clone)]
pub struct Then<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Parser for Then<P1, P2>
where
    P1: Parser,
    P2: Parser<Element = P1::Element, Error = P1::Error>,
{
    type Element = P1::Element;
    type Output = P2::Output;
    type Error = P1::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        self.parser2.transform(self.parser1.apply(cursor))
    }
}

/// Convenience function to create an And parser
pub fn and<P1, P2>(parser1: P1, parser2: P2) -> And<P1, P2>
where
    P1: Parser,
    P2: Parser<Element = P1::Element, Error = P1::Error>,
{
    And::new(parser1, parser2)
}

/// Extension trait to add .and(), .skip() and .then() method support for parsers
pub trait AndExt: Parser + Sized {
    fn and<P>(self, other: P) -> And<Self, P>
    where
        P: Parser<Element = Self::Element, Error = Self::Error>,
    {
        And::new(self, other)
    }

    /// Parse `other` after `self`, discarding `other`'s result
    fn skip<P>(self, other: P) -> Skip<Self, P>
    where
        P: Parser<Element = Self::Element, Error = Self::Error>,
    {
        Skip {
            parser1: self,
            parser2: other,
        }
    }

    /// Parse `other` after `self`, discarding `self`'s result
    fn then<P>(self, other: P) -> Then<Self, P>
    where
        P: Parser<Element = Self::Element, Error = Self::Error>,
    {
        Then {
            parser1: self,
            parser2: other,
        }
    }
}

/// Implement AndExt for all parsers
impl<P> AndExt for P where P: Parser {}
