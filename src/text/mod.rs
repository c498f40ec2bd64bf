//! Primitive parsers for ASCII text given as bytes

pub mod pattern;
pub mod string;

pub use pattern::{Base, Pattern, digit, digits, digits_in, letters, regex, whitespace};
pub use string::{StringParser, string};
