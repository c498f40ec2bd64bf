use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::state::ParseState;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Core parser trait for parser combinators
///
/// A parser is a pure transform from one [`ParseState`] to the next. Parsers
/// hold no per-parse state, so one value can be stored (even in a `static`)
/// and reused across unrelated inputs and threads.
pub trait Parser {
    /// The input element type (e.g. `u8` for bytes and ASCII text)
    type Element: Atomic;
    type Output;
    type Error;

    /// Attempt to match at the cursor position
    ///
    /// Only ever called for a state that is not already an error. A failing
    /// parser reports the error at the position it gave up on.
    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error>;

    /// Thread a state through this parser
    ///
    /// An incoming error state is returned unchanged, without running any
    /// matching logic. Every combinator composes through this method.
    fn transform<'code, R>(
        &self,
        state: ParseState<'code, Self::Element, R, Self::Error>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error>
    where
        Self: Sized,
    {
        match state.branch() {
            Ok((_, cursor)) => self.apply(cursor),
            Err(failed) => failed,
        }
    }

    /// Run the parser once over a complete input, starting at position 0
    ///
    /// The returned state carries either the final result and position, or the
    /// error and the position where propagation stopped.
    fn run<'code>(
        &self,
        input: &'code [Self::Element],
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error>
    where
        Self::Error: fmt::Debug,
    {
        let start: ParseState<'code, Self::Element, (), Self::Error> = ParseState::initial(input);
        let (cursor, outcome) = match start.branch() {
            Ok((_, cursor)) => self.apply(cursor),
            Err(failed) => failed,
        }
        .into_parts();

        // Rebuild from the input alone so no intermediate state leaks out
        let end = ParseState::initial(input).with_result_at((), cursor.position());
        match outcome {
            Ok(result) => {
                trace!(position = end.position(), "parse succeeded");
                end.with_result(result)
            }
            Err(error) => {
                debug!(position = end.position(), ?error, "parse failed");
                end.with_error(error)
            }
        }
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Element = P::Element;
    type Output = P::Output;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        (**self).apply(cursor)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Element = P::Element;
    type Output = P::Output;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        (**self).apply(cursor)
    }
}

impl<P: Parser + ?Sized> Parser for Arc<P> {
    type Element = P::Element;
    type Output = P::Output;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        (**self).apply(cursor)
    }
}

type DynParser<T, O, E> = dyn Parser<Element = T, Output = O, Error = E> + Send + Sync;

/// Type-erased, cheaply clonable parser
///
/// Use this to store a parser as a shared value, or to put parsers of
/// different concrete types into one `sequence`/`choice` list.
pub struct BoxedParser<T, O, E = ParseError> {
    inner: Arc<DynParser<T, O, E>>,
}

impl<T, O, E> Clone for BoxedParser<T, O, E> {
    fn clone(&self) -> Self {
        BoxedParser {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, O, E> fmt::Debug for BoxedParser<T, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedParser").finish_non_exhaustive()
    }
}

impl<T: Atomic, O, E> BoxedParser<T, O, E> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<Element = T, Output = O, Error = E> + Send + Sync + 'static,
    {
        BoxedParser {
            inner: Arc::new(parser),
        }
    }
}

impl<T: Atomic, O, E> Parser for BoxedParser<T, O, E> {
    type Element = T;
    type Output = O;
    type Error = E;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, O, E> {
        self.inner.apply(cursor)
    }
}

/// Extension trait to add .boxed() method support for parsers
pub trait BoxedExt: Parser + Sized {
    fn boxed(self) -> BoxedParser<Self::Element, Self::Output, Self::Error>
    where
        Self: Send + Sync + 'static,
    {
        BoxedParser::new(self)
    }
}

/// Implement BoxedExt for all parsers
impl<P> BoxedExt for P where P: Parser {}
