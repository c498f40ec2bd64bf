use crate::atomic::Atomic;

/// A position within a borrowed input sequence
///
/// The cursor is `Copy`: saving a cursor and resuming from it later is how
/// alternatives rewind. The input itself is borrowed once for the whole parse
/// and never copied.
#[derive(Debug)]
pub struct Cursor<'code, T> {
    data: &'code [T],
    /// Element position in the data slice (0-based index, may equal `data.len()`)
    position: usize,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'code, T: Atomic> Cursor<'code, T> {
    pub fn new(data: &'code [T]) -> Self {
        Cursor { data, position: 0 }
    }

    /// Cursor over `data` at `position`, clamped to the end of the input
    pub fn at(data: &'code [T], position: usize) -> Self {
        Cursor {
            data,
            position: position.min(data.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The complete input, independent of the current position
    pub fn source(&self) -> &'code [T] {
        self.data
    }

    /// Everything from the current position to the end of the input
    pub fn remaining(&self) -> &'code [T] {
        &self.data[self.position..]
    }

    /// Get the element at the current position, if any
    pub fn value(&self) -> Option<T> {
        self.data.get(self.position).copied()
    }

    /// The next `len` elements, or `None` when fewer remain
    pub fn peek(&self, len: usize) -> Option<&'code [T]> {
        let end = self.position.checked_add(len)?;
        self.data.get(self.position..end)
    }

    /// Move forward by `count` elements, stopping at the end of the input
    pub fn advance(self, count: usize) -> Self {
        Cursor::at(self.data, self.position.saturating_add(count))
    }

    pub fn eos(&self) -> bool {
        self.position >= self.data.len()
    }
}
