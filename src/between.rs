use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::state::ParseState;

/// A pair of delimiters waiting for the parser of the content between them
///
/// Produced by [`between`]; one pair can wrap any number of content parsers
/// via [`Between::around`].
#[derive(Debug, Clone)]
pub struct Between<L, R> {
    open: L,
    close: R,
}

impl<L: Clone, R: Clone> Between<L, R> {
    /// Build the parser matching `open`, then `content`, then `close`
    pub fn around<P>(&self, content: P) -> Enclosed<L, P, R>
    where
        L: Parser,
        P: Parser<Element = L::Element, Error = L::Error>,
        R: Parser<Element = L::Element, Error = L::Error>,
    {
        Enclosed {
            open: self.open.clone(),
            content,
            close: self.close.clone(),
        }
    }
}

/// Creates a delimiter pair, e.g. `between(string("("), string(")"))`
pub fn between<L, R>(open: L, close: R) -> Between<L, R>
where
    L: Parser + Clone,
    R: Parser<Element = L::Element, Error = L::Error> + Clone,
{
    Between { open, close }
}

/// Parser that matches content between opening and closing delimiters
///
/// Parses `open + content + close` in sequence and returns just the
/// `content` value with the delimiters discarded.
///
/// # Examples
/// - `"[content]"` → `"content"`
/// - `"(value)"` → `"value"`
#[derive(Clone)]
pub struct Enclosed<L, P, R> {
    open: L,
    content: P,
    close: R,
}

impl<L, P, R> Parser for Enclosed<L, P, R>
where
    L: Parser,
    P: Parser<Element = L::Element, Error = L::Error>,
    R: Parser<Element = L::Element, Error = L::Error>,
{
    type Element = L::Element;
    type Output = P::Output;
    type Error = L::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        let state = self.content.transform(self.open.apply(cursor));
        let (value, cursor) = match state.branch() {
            Ok(parts) => parts,
            Err(failed) => return failed,
        };
        self.close.apply(cursor).map_result(|_| value)
    }
}
