use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::state::ParseState;

/// Parser combinator that picks the next parser based on a previous result
///
/// On success the selector receives the result and returns a new parser, which
/// continues from the current position. This is what makes context-sensitive
/// grammars possible, e.g. a tag selecting its payload parser or a length
/// field sizing the bytes that follow.
#[derive(Clone)]
pub struct Chain<P, F> {
    parser: P,
    selector: F,
}

impl<P, F> Chain<P, F> {
    pub fn new(parser: P, selector: F) -> Self {
        Chain { parser, selector }
    }
}

impl<P, F, Q> Parser for Chain<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Q,
    Q: Parser<Element = P::Element, Error = P::Error>,
{
    type Element = P::Element;
    type Output = Q::Output;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        match self.parser.apply(cursor).branch() {
            Ok((value, cursor)) => (self.selector)(value).apply(cursor),
            Err(failed) => failed,
        }
    }
}

/// Extension trait to add .chain() method support for parsers
pub trait ChainExt: Parser + Sized {
    fn chain<F, Q>(self, selector: F) -> Chain<Self, F>
    where
        F: Fn(Self::Output) -> Q,
        Q: Parser<Element = Self::Element, Error = Self::Error>,
    {
        Chain::new(self, selector)
    }
}

/// Implement ChainExt for all parsers
impl<P> ChainExt for P where P: Parser {}
