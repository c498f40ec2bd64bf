use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::state::ParseState;

/// Parser combinator for optional matching
///
/// Yields `Some` with the inner result on success. On failure it yields `None`
/// at the incoming position, consuming nothing and never reporting an error.
#[derive(Clone)]
pub struct Possibly<P> {
    parser: P,
}

impl<P: Parser> Parser for Possibly<P> {
    type Element = P::Element;
    type Output = Option<P::Output>;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        match self.parser.apply(cursor).into_success() {
            Some((value, next_cursor)) => ParseState::success(next_cursor, Some(value)),
            None => ParseState::success(cursor, None),
        }
    }
}

/// Creates a parser that optionally matches `parser`
pub fn possibly<P: Parser>(parser: P) -> Possibly<P> {
    Possibly { parser }
}
