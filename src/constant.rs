use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::parser::Parser;
use crate::state::ParseState;
use std::borrow::Cow;
use std::marker::PhantomData;

/// Parser that ignores the input and succeeds with a fixed value
///
/// Useful as the base case of a `chain` continuation.
pub struct Succeed<T, O> {
    value: O,
    _element: PhantomData<fn() -> T>,
}

impl<T, O: Clone> Clone for Succeed<T, O> {
    fn clone(&self) -> Self {
        Succeed {
            value: self.value.clone(),
            _element: PhantomData,
        }
    }
}

pub fn succeed<T: Atomic, O: Clone>(value: O) -> Succeed<T, O> {
    Succeed {
        value,
        _element: PhantomData,
    }
}

impl<T: Atomic, O: Clone> Parser for Succeed<T, O> {
    type Element = T;
    type Output = O;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, O, ParseError> {
        ParseState::success(cursor, self.value.clone())
    }
}

/// Parser that ignores the input and fails at the current position
pub struct Fail<T, O> {
    message: Cow<'static, str>,
    _marker: PhantomData<fn() -> (T, O)>,
}

impl<T, O> Clone for Fail<T, O> {
    fn clone(&self) -> Self {
        Fail {
            message: self.message.clone(),
            _marker: PhantomData,
        }
    }
}

pub fn fail<T: Atomic, O>(message: impl Into<Cow<'static, str>>) -> Fail<T, O> {
    Fail {
        message: message.into(),
        _marker: PhantomData,
    }
}

impl<T: Atomic, O> Parser for Fail<T, O> {
    type Element = T;
    type Output = O;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, O, ParseError> {
        ParseState::failure(
            cursor,
            ParseError::custom(self.message.to_string(), cursor.position()),
        )
    }
}
