//! Parsers for byte-oriented binary records
//!
//! Positions are byte offsets. Bit fields never advance at sub-byte
//! granularity: a [`Bits`] parser either stays on its word or moves past it.

pub mod bits;
pub mod bytes;
pub mod endian;
pub mod integer;

pub use bits::{Bits, bits};
pub use bytes::{Ascii, Literal, Take, ascii, ascii_literal, literal, take};
pub use endian::{Endianness, FromBytes};
pub use integer::{Integer, i8, i16, i32, i64, integer, u8, u16, u32, u64};
