use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use tracing::warn;

/// A separator waiting for its value parser
///
/// Produced by [`separated_by`] / [`separated_by_at_least`]; the same
/// separator can be reused for several value parsers via [`SeparatedBy::of`].
#[derive(Debug, Clone)]
pub struct SeparatedBy<S> {
    separator: S,
    minimum: usize,
}

impl<S: Clone> SeparatedBy<S> {
    /// Build the list parser for `value`
    pub fn of<P>(&self, value: P) -> SeparatedList<P, S>
    where
        P: Parser,
        S: Parser<Element = P::Element, Error = P::Error>,
    {
        SeparatedList {
            value,
            separator: self.separator.clone(),
            minimum: self.minimum,
        }
    }
}

/// Values separated by `separator`, e.g. `1,2,3`
pub fn separated_by<S: Parser + Clone>(separator: S) -> SeparatedBy<S> {
    SeparatedBy {
        separator,
        minimum: 0,
    }
}

/// Like [`separated_by`], but at least `minimum` values must be present
pub fn separated_by_at_least<S: Parser + Clone>(minimum: usize, separator: S) -> SeparatedBy<S> {
    SeparatedBy { separator, minimum }
}

/// Parser combinator that matches values alternating with separators
///
/// Only the values are collected. The loop ends as soon as either a value or
/// the separator after it fails to match; that failure is not an error. A
/// separator that is not followed by a value stays consumed.
///
/// # Examples
/// - `"a,b,c"` with separator `,` → `vec!["a", "b", "c"]`
/// - `""` → `vec![]` (unless a minimum is required)
#[derive(Clone)]
pub struct SeparatedList<P, S> {
    value: P,
    separator: S,
    minimum: usize,
}

impl<P, S> Parser for SeparatedList<P, S>
where
    P: Parser,
    P::Error: From<ParseError>,
    S: Parser<Element = P::Element, Error = P::Error>,
{
    type Element = P::Element;
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        mut cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        let mut results = Vec::new();

        loop {
            let start = cursor.position();

            let Some((value, after_value)) = self.value.apply(cursor).into_success() else {
                break;
            };
            results.push(value);
            cursor = after_value;

            let Some((_, after_separator)) = self.separator.apply(cursor).into_success() else {
                break;
            };
            if after_separator.position() == start {
                warn!(position = start, "separated list made no progress");
                return ParseState::failure(
                    cursor,
                    ParseError::new(ErrorKind::NoProgress, start).into(),
                );
            }
            cursor = after_separator;
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
