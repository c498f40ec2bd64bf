use crate::cursor::Cursor;
use crate::error::{GrammarError, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;

/// Parser that extracts a masked run of bits, shifted down to bit 0
///
/// The mask applies to a big-endian word of `width` bytes (1 to 4) at the
/// current position. With `increment` set, the position moves past the word;
/// without it the position stays put, so another field of the same word can
/// be read next.
///
/// # Examples
/// - mask `0xF0` over `0xAB` → `0x0A`
/// - mask `0x1FFF`, width 2, over `[0x40, 0x05]` → `0x0005`
#[derive(Debug, Clone, Copy)]
pub struct Bits {
    mask: u32,
    width: usize,
    increment: bool,
}

impl Bits {
    /// A bit field inside a word of `width` bytes
    pub fn with_width(mask: u32, width: usize) -> Result<Self, GrammarError> {
        if !(1..=4).contains(&width) {
            return Err(GrammarError::InvalidBitWidth { width });
        }
        if mask == 0 {
            return Err(GrammarError::EmptyBitMask);
        }
        if width < 4 && mask >> (8 * width) != 0 {
            return Err(GrammarError::MaskExceedsWidth { mask, width });
        }
        let run = mask >> mask.trailing_zeros();
        if run & run.wrapping_add(1) != 0 {
            return Err(GrammarError::NonContiguousMask { mask });
        }
        Ok(Bits {
            mask,
            width,
            increment: true,
        })
    }

    /// Whether to advance past the word after extracting
    pub fn increment(mut self, increment: bool) -> Self {
        self.increment = increment;
        self
    }

    fn extract(&self, word: &[u8]) -> u32 {
        let value = word
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
        (value & self.mask)
            .checked_shr(self.mask.trailing_zeros())
            .unwrap_or(0)
    }
}

/// A bit field inside the single byte at the current position
pub fn bits(mask: u8) -> Result<Bits, GrammarError> {
    Bits::with_width(u32::from(mask), 1)
}

impl Parser for Bits {
    type Element = u8;
    type Output = u32;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, u8>) -> ParseState<'code, u8, u32, ParseError> {
        let Some(word) = cursor.peek(self.width) else {
            return ParseState::failure(
                cursor,
                ParseError::end_of_input(format!("bits {:#x}", self.mask), cursor.position()),
            );
        };

        let value = self.extract(word);
        if self.increment {
            ParseState::success(cursor.advance(self.width), value)
        } else {
            ParseState::success(cursor, value)
        }
    }
}
