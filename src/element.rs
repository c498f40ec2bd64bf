use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use std::borrow::Cow;
use std::marker::PhantomData;

/// Parser that consumes and returns a single element of any kind
pub struct AnyElement<T> {
    _element: PhantomData<fn() -> T>,
}

impl<T> Clone for AnyElement<T> {
    fn clone(&self) -> Self {
        AnyElement {
            _element: PhantomData,
        }
    }
}

/// Convenience function to create an AnyElement parser
pub fn any_element<T: Atomic>() -> AnyElement<T> {
    AnyElement {
        _element: PhantomData,
    }
}

impl<T: Atomic> Parser for AnyElement<T> {
    type Element = T;
    type Output = T;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, T, ParseError> {
        match cursor.value() {
            Some(element) => ParseState::success(cursor.advance(1), element),
            None => ParseState::failure(
                cursor,
                ParseError::end_of_input("any element", cursor.position()),
            ),
        }
    }
}

/// Parser that matches one specific element
#[derive(Debug, Clone)]
pub struct IsElement<T> {
    expected: T,
}

/// Convenience function to create an IsElement parser
pub fn is_element<T: Atomic>(expected: T) -> IsElement<T> {
    IsElement { expected }
}

impl<T: Atomic> Parser for IsElement<T> {
    type Element = T;
    type Output = T;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, T, ParseError> {
        match cursor.value() {
            Some(element) if element == self.expected => {
                ParseState::success(cursor.advance(1), element)
            }
            Some(element) => ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::LiteralMismatch {
                        expected: T::slice_to_string(&[self.expected]),
                        actual: T::slice_to_string(&[element]),
                    },
                    cursor.position(),
                ),
            ),
            None => ParseState::failure(
                cursor,
                ParseError::end_of_input(
                    format!("'{}'", T::slice_to_string(&[self.expected])),
                    cursor.position(),
                ),
            ),
        }
    }
}

/// Parser that matches a single element satisfying a predicate
#[derive(Clone)]
pub struct Satisfy<T, F> {
    predicate: F,
    description: Cow<'static, str>,
    _element: PhantomData<fn() -> T>,
}

/// Match one element for which `predicate` holds; `description` names the
/// class in the mismatch error
pub fn element<T, F>(predicate: F, description: impl Into<Cow<'static, str>>) -> Satisfy<T, F>
where
    T: Atomic,
    F: Fn(T) -> bool,
{
    Satisfy {
        predicate,
        description: description.into(),
        _element: PhantomData,
    }
}

impl<T, F> Parser for Satisfy<T, F>
where
    T: Atomic,
    F: Fn(T) -> bool,
{
    type Element = T;
    type Output = T;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, T, ParseError> {
        match cursor.value() {
            Some(element) if (self.predicate)(element) => {
                ParseState::success(cursor.advance(1), element)
            }
            Some(_) => ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::PatternMismatch {
                        description: self.description.clone(),
                    },
                    cursor.position(),
                ),
            ),
            None => ParseState::failure(
                cursor,
                ParseError::end_of_input(self.description.clone(), cursor.position()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_element() {
        let state = any_element::<u8>().run(b"hi");
        assert_eq!(state.result(), Some(&b'h'));
        assert_eq!(state.position(), 1);
    }

    #[test]
    fn test_any_element_empty_input() {
        let state = any_element::<u8>().run(b"");
        assert!(matches!(
            state.error().map(|e| &e.kind),
            Some(ErrorKind::EndOfInput { .. })
        ));
    }

    #[test]
    fn test_is_element_mismatch() {
        let state = is_element(b'A').run(b"xyz");
        let error = state.error().cloned();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("expected 'A', but got 'x' at index 0".to_string())
        );
    }

    #[test]
    fn test_is_element_over_chars() {
        let input: Vec<char> = "λx".chars().collect();
        let state = is_element('λ').run(&input);

        assert_eq!(state.result(), Some(&'λ'));
        assert_eq!(state.position(), 1);
    }

    #[test]
    fn test_satisfy() {
        let vowel = element(|c: char| "aeiou".contains(c), "vowel");
        let input: Vec<char> = "ab".chars().collect();

        assert_eq!(vowel.run(&input).into_result().ok(), Some('a'));

        let input: Vec<char> = "ba".chars().collect();
        let state = vowel.run(&input);
        assert_eq!(
            state.error().map(|e| e.to_string()),
            Some("could not match vowel at index 0".to_string())
        );
    }
}
