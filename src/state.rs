use crate::atomic::Atomic;
use crate::cursor::Cursor;

/// Immutable snapshot of progress over an input sequence
///
/// A state holds either a result or an error, never both. The position of an
/// error state is frozen at the point where propagation stopped. Every builder
/// consumes the old state and keeps its input, so intermediate states can't be
/// mutated in place.
#[derive(Debug)]
pub struct ParseState<'code, T, R, E> {
    cursor: Cursor<'code, T>,
    outcome: Result<R, E>,
}

impl<T: Clone, R: Clone, E: Clone> Clone for ParseState<'_, T, R, E> {
    fn clone(&self) -> Self {
        ParseState {
            cursor: self.cursor,
            outcome: self.outcome.clone(),
        }
    }
}

impl<'code, T: Atomic, E> ParseState<'code, T, (), E> {
    /// Fresh state at position 0 with no result yet
    pub fn initial(input: &'code [T]) -> Self {
        ParseState {
            cursor: Cursor::new(input),
            outcome: Ok(()),
        }
    }
}

impl<'code, T: Atomic, R, E> ParseState<'code, T, R, E> {
    /// Success state at the cursor's position
    pub fn success(cursor: Cursor<'code, T>, result: R) -> Self {
        ParseState {
            cursor,
            outcome: Ok(result),
        }
    }

    /// Error state frozen at the cursor's position
    pub fn failure(cursor: Cursor<'code, T>, error: E) -> Self {
        ParseState {
            cursor,
            outcome: Err(error),
        }
    }

    /// Replace the outcome with a result, keeping input and position
    pub fn with_result<U>(self, result: U) -> ParseState<'code, T, U, E> {
        ParseState::success(self.cursor, result)
    }

    /// Replace the outcome with a result and move to `position`
    pub fn with_result_at<U>(self, result: U, position: usize) -> ParseState<'code, T, U, E> {
        ParseState::success(Cursor::at(self.cursor.source(), position), result)
    }

    /// Replace the outcome with an error, keeping input and position
    pub fn with_error<U, F>(self, error: F) -> ParseState<'code, T, U, F> {
        ParseState::failure(self.cursor, error)
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn input(&self) -> &'code [T] {
        self.cursor.source()
    }

    pub fn cursor(&self) -> Cursor<'code, T> {
        self.cursor
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn result(&self) -> Option<&R> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&E> {
        self.outcome.as_ref().err()
    }

    pub fn into_result(self) -> Result<R, E> {
        self.outcome
    }

    pub fn into_parts(self) -> (Cursor<'code, T>, Result<R, E>) {
        (self.cursor, self.outcome)
    }

    /// Transform the result of a success state; error states pass through
    pub fn map_result<U>(self, f: impl FnOnce(R) -> U) -> ParseState<'code, T, U, E> {
        ParseState {
            cursor: self.cursor,
            outcome: self.outcome.map(f),
        }
    }

    /// The result and cursor of a success state; `None` for an error state
    pub fn into_success(self) -> Option<(R, Cursor<'code, T>)> {
        match self.outcome {
            Ok(result) => Some((result, self.cursor)),
            Err(_) => None,
        }
    }

    /// Split a success state into its result and cursor, or re-label an error
    /// state for a different result type without touching it
    pub fn branch<U>(self) -> Result<(R, Cursor<'code, T>), ParseState<'code, T, U, E>> {
        match self.outcome {
            Ok(result) => Ok((result, self.cursor)),
            Err(error) => Err(ParseState::failure(self.cursor, error)),
        }
    }
}
