use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::state::ParseState;
use std::fmt;

/// Parser combinator that transforms the error of a parser using a mapping function
///
/// The mapper receives the error and the position of the error state.
pub struct ErrorMap<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> ErrorMap<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        ErrorMap { parser, mapper }
    }
}

impl<P: Clone, F: Clone> Clone for ErrorMap<P, F> {
    fn clone(&self) -> Self {
        ErrorMap::new(self.parser.clone(), self.mapper.clone())
    }
}

impl<P, F> fmt::Debug for ErrorMap<P, F>
where
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorMap")
            .field("parser", &self.parser)
            .field("mapper", &"<function>")
            .finish()
    }
}

impl<P, F, E2> Parser for ErrorMap<P, F>
where
    P: Parser,
    F: Fn(P::Error, usize) -> E2,
{
    type Element = P::Element;
    type Output = P::Output;
    type Error = E2;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, E2> {
        let (cursor, outcome) = self.parser.apply(cursor).into_parts();
        match outcome {
            Ok(value) => ParseState::success(cursor, value),
            Err(error) => ParseState::failure(cursor, (self.mapper)(error, cursor.position())),
        }
    }
}

/// Extension trait to add .error_map() method support for parsers
pub trait ErrorMapExt: Parser + Sized {
    fn error_map<F, E2>(self, mapper: F) -> ErrorMap<Self, F>
    where
        F: Fn(Self::Error, usize) -> E2,
    {
        ErrorMap::new(self, mapper)
    }
}

/// Implement ErrorMapExt for all parsers
impl<P> ErrorMapExt for P where P: Parser {}

/// Convenience function to create an ErrorMap parser
pub fn error_map<P, F, E2>(parser: P, mapper: F) -> ErrorMap<P, F>
where
    P: Parser,
    F: Fn(P::Error, usize) -> E2,
{
    ErrorMap::new(parser, mapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{fail, succeed};
    use crate::error::{ErrorKind, ParseError};
    use crate::sequence::sequence;
    use crate::text::string;
    use thiserror::Error;

    #[derive(Debug, PartialEq, Error)]
    enum CustomError {
        #[error("simple: {0}")]
        Simple(String),
        #[error("code {0} at {1}")]
        WithCode(u32, usize),
    }

    #[test]
    fn test_error_map_transforms_error_on_failure() {
        let parser = fail::<u8, char>("always fails")
            .error_map(|_, _| CustomError::Simple("mapped error".to_string()));

        assert_eq!(
            parser.run(b"test").into_result(),
            Err(CustomError::Simple("mapped error".to_string()))
        );
    }

    #[test]
    fn test_error_map_preserves_success() {
        let parser = succeed::<u8, char>('x')
            .error_map(|_, _| CustomError::Simple("should not be called".to_string()));

        assert_eq!(parser.run(b"test").into_result(), Ok('x'));
    }

    #[test]
    fn test_error_map_receives_position() {
        let parser = sequence(vec![string("ab"), string("cd")])
            .error_map(|_, position| CustomError::WithCode(404, position));
        let state = parser.run(b"abxx");

        assert_eq!(state.position(), 2);
        assert_eq!(state.error(), Some(&CustomError::WithCode(404, 2)));
    }

    #[test]
    fn test_error_map_chain() {
        let parser = fail::<u8, char>("first")
            .error_map(|_, _| CustomError::Simple("first".to_string()))
            .error_map(|_, position| CustomError::WithCode(500, position));

        assert_eq!(
            parser.run(b"test").into_result(),
            Err(CustomError::WithCode(500, 0))
        );
    }

    #[test]
    fn test_error_map_accessing_original_error() {
        let parser = string("hello").error_map(|original: ParseError, _| {
            ParseError::custom(format!("Wrapped: {}", original.kind), original.position)
        });

        let error = parser.run(b"world").into_result().err();
        let message = error.map(|e| e.to_string()).unwrap_or_default();
        assert!(message.starts_with("Wrapped:"));
        assert!(matches!(
            string("hello").run(b"world").error().map(|e| &e.kind),
            Some(ErrorKind::LiteralMismatch { .. })
        ));
    }

    #[test]
    fn test_function_syntax() {
        let parser = error_map(string("a"), |e: ParseError, _| e.position + 100);
        assert_eq!(parser.run(b"b").into_result(), Err(100));
    }
}
