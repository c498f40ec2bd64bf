use super::endian::{Endianness, FromBytes};
use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use std::fmt;
use std::marker::PhantomData;

/// Parser that decodes a fixed-width integer at the current position
pub struct Integer<N> {
    endianness: Endianness,
    _marker: PhantomData<fn() -> N>,
}

impl<N> Clone for Integer<N> {
    fn clone(&self) -> Self {
        Integer {
            endianness: self.endianness,
            _marker: PhantomData,
        }
    }
}

impl<N: FromBytes> fmt::Debug for Integer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integer")
            .field("type", &N::NAME)
            .field("endianness", &self.endianness)
            .finish()
    }
}

impl<N: FromBytes> Parser for Integer<N> {
    type Element = u8;
    type Output = N;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, u8>) -> ParseState<'code, u8, N, ParseError> {
        let Some(raw) = cursor.peek(N::WIDTH) else {
            return ParseState::failure(
                cursor,
                ParseError::end_of_input(N::NAME, cursor.position()),
            );
        };

        match N::from_bytes(raw, self.endianness) {
            Ok(value) => ParseState::success(cursor.advance(N::WIDTH), value),
            Err(e) => ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::ConversionFailure {
                        target: N::NAME,
                        reason: e.to_string(),
                    },
                    cursor.position(),
                ),
            ),
        }
    }
}

/// Integer of any [`FromBytes`] type in the given byte order
pub fn integer<N: FromBytes>(endianness: Endianness) -> Integer<N> {
    Integer {
        endianness,
        _marker: PhantomData,
    }
}

pub fn u8() -> Integer<u8> {
    integer(Endianness::Big)
}

pub fn i8() -> Integer<i8> {
    integer(Endianness::Big)
}

pub fn u16(endianness: Endianness) -> Integer<u16> {
    integer(endianness)
}

pub fn i16(endianness: Endianness) -> Integer<i16> {
    integer(endianness)
}

pub fn u32(endianness: Endianness) -> Integer<u32> {
    integer(endianness)
}

pub fn i32(endianness: Endianness) -> Integer<i32> {
    integer(endianness)
}

pub fn u64(endianness: Endianness) -> Integer<u64> {
    integer(endianness)
}

pub fn i64(endianness: Endianness) -> Integer<i64> {
    integer(endianness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_big_endian() {
        let state = u32(Endianness::Big).run(&[0x11, 0x22, 0x33, 0x44]);

        assert_eq!(state.result(), Some(&287_454_020));
        assert_eq!(state.position(), 4);
    }

    #[test]
    fn test_i32_big_endian() {
        let state = i32(Endianness::Big).run(&[0xFF, 0xEE, 0xDD, 0xCC]);
        assert_eq!(state.result(), Some(&-1_122_868));
    }

    #[test]
    fn test_little_endian() {
        assert_eq!(
            u32(Endianness::Little).run(&[0x44, 0x33, 0x22, 0x11]).into_result(),
            Ok(287_454_020)
        );
        assert_eq!(u16(Endianness::Little).run(&[0x01, 0x02]).into_result(), Ok(0x0201));
    }

    #[test]
    fn test_single_bytes() {
        assert_eq!(u8().run(&[0xFF]).into_result(), Ok(255));
        assert_eq!(i8().run(&[0xFF]).into_result(), Ok(-1));
    }

    #[test]
    fn test_sixty_four_bit() {
        let bytes = [0x80, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(
            u64(Endianness::Big).run(&bytes).into_result(),
            Ok(0x8000_0000_0000_0001)
        );
        assert_eq!(i64(Endianness::Big).run(&bytes).into_result(), Ok(i64::MIN + 1));
    }

    #[test]
    fn test_insufficient_bytes() {
        let state = i16(Endianness::Big).run(&[0x01]);

        assert_eq!(state.position(), 0);
        assert_eq!(
            state.error().map(|e| e.to_string()),
            Some("tried to match i16, but got unexpected end of input at index 0".to_string())
        );
    }

    #[test]
    fn test_consumes_only_its_width() {
        let state = u16(Endianness::Big).run(&[0x00, 0x44, 0xFF]);

        assert_eq!(state.result(), Some(&68));
        assert_eq!(state.position(), 2);
    }
}
