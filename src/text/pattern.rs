use crate::cursor::Cursor;
use crate::error::{ErrorKind, GrammarError, ParseError};
use crate::parser::Parser;
use crate::state::ParseState;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;

static LETTERS: Lazy<Pattern> = Lazy::new(|| builtin("[A-Za-z]+", "letters"));
static DIGITS: Lazy<Pattern> = Lazy::new(|| builtin("[0-9]+", "digits"));
static DIGIT: Lazy<Pattern> = Lazy::new(|| builtin("[0-9]", "digit"));
static WHITESPACE: Lazy<Pattern> = Lazy::new(|| builtin(r"\s+", "whitespace"));

fn builtin(pattern: &str, description: &'static str) -> Pattern {
    Pattern {
        regex: Regex::new(&anchored(pattern)).expect("built-in pattern is valid"),
        description: Cow::Borrowed(description),
    }
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern})")
}

/// Parser that matches the longest run accepted by a regular expression,
/// starting exactly at the current position
///
/// The matched text is returned as a `String`.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    description: Cow<'static, str>,
}

impl Parser for Pattern {
    type Element = u8;
    type Output = String;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, u8>) -> ParseState<'code, u8, String, ParseError> {
        let remaining = cursor.remaining();

        if remaining.is_empty() {
            return ParseState::failure(
                cursor,
                ParseError::end_of_input(self.description.clone(), cursor.position()),
            );
        }

        match self.regex.find(remaining) {
            Some(found) => ParseState::success(
                cursor.advance(found.end()),
                String::from_utf8_lossy(found.as_bytes()).into_owned(),
            ),
            None => ParseState::failure(
                cursor,
                ParseError::new(
                    ErrorKind::PatternMismatch {
                        description: self.description.clone(),
                    },
                    cursor.position(),
                ),
            ),
        }
    }
}

/// Creates a parser from a regular expression
///
/// The pattern is anchored at the current position. An invalid pattern is
/// rejected here, before any input is parsed.
pub fn regex(
    pattern: &str,
    description: impl Into<Cow<'static, str>>,
) -> Result<Pattern, GrammarError> {
    let description = description.into();
    let regex = Regex::new(&anchored(pattern)).map_err(|source| GrammarError::InvalidPattern {
        description: description.to_string(),
        source,
    })?;
    Ok(Pattern { regex, description })
}

/// One or more ASCII letters
pub fn letters() -> Pattern {
    LETTERS.clone()
}

/// One or more decimal digits
pub fn digits() -> Pattern {
    DIGITS.clone()
}

/// Exactly one decimal digit
pub fn digit() -> Pattern {
    DIGIT.clone()
}

/// One or more whitespace characters
pub fn whitespace() -> Pattern {
    WHITESPACE.clone()
}

/// Numeric base for [`digits_in`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Base {
    fn class(self) -> &'static str {
        match self {
            Base::Binary => "0-1",
            Base::Octal => "0-7",
            Base::Decimal => "0-9",
            Base::Hexadecimal => "0-9a-fA-F",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Base::Binary => "binary",
            Base::Octal => "octal",
            Base::Decimal => "decimal",
            Base::Hexadecimal => "hexadecimal",
        }
    }
}

/// A run of `minimum` to `maximum` digits in `base` (`None` for no upper bound)
pub fn digits_in(
    base: Base,
    minimum: usize,
    maximum: Option<usize>,
) -> Result<Pattern, GrammarError> {
    let upper = match maximum {
        Some(maximum) if maximum < minimum => {
            return Err(GrammarError::InvalidBounds { minimum, maximum });
        }
        Some(maximum) => maximum.to_string(),
        None => String::new(),
    };
    regex(
        &format!("[{}]{{{minimum},{upper}}}", base.class()),
        format!("{} digit(s)", base.name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        let state = letters().run(b"hello123");

        assert_eq!(state.result().map(String::as_str), Some("hello"));
        assert_eq!(state.position(), 5);
    }

    #[test]
    fn test_letters_mismatch() {
        let state = letters().run(b"123");
        assert_eq!(
            state.error().map(|e| e.to_string()),
            Some("could not match letters at index 0".to_string())
        );
    }

    #[test]
    fn test_digits_end_of_input() {
        let state = digits().run(b"");
        assert!(matches!(
            state.error().map(|e| &e.kind),
            Some(ErrorKind::EndOfInput { .. })
        ));
    }

    #[test]
    fn test_single_digit() {
        let state = digit().run(b"42");

        assert_eq!(state.result().map(String::as_str), Some("4"));
        assert_eq!(state.position(), 1);
    }

    #[test]
    fn test_pattern_is_anchored() {
        let state = digits().run(b"abc123");
        assert!(state.is_error());
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(whitespace().run(b" \t\nx").position(), 3);
    }

    #[test]
    fn test_custom_regex() {
        let identifier = regex("[a-z_][a-z0-9_]*", "identifier").unwrap();
        let state = identifier.run(b"snake_case2 rest");

        assert_eq!(state.result().map(String::as_str), Some("snake_case2"));
    }

    #[test]
    fn test_invalid_regex_is_a_construction_error() {
        let error = regex("[unclosed", "broken").unwrap_err();
        assert!(matches!(error, GrammarError::InvalidPattern { .. }));
        assert_eq!(error.to_string(), "invalid pattern for broken");
    }

    #[test]
    fn test_hex_digits_with_bounds() {
        let byte = digits_in(Base::Hexadecimal, 2, Some(2)).unwrap();
        let state = byte.run(b"fF1");

        assert_eq!(state.result().map(String::as_str), Some("fF"));
        assert_eq!(state.position(), 2);

        let state = byte.run(b"g0");
        assert_eq!(
            state.error().map(|e| e.to_string()),
            Some("could not match hexadecimal digit(s) at index 0".to_string())
        );
    }

    #[test]
    fn test_binary_digits_unbounded() {
        let bits = digits_in(Base::Binary, 1, None).unwrap();
        assert_eq!(bits.run(b"10102").position(), 4);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(matches!(
            digits_in(Base::Octal, 3, Some(1)),
            Err(GrammarError::InvalidBounds {
                minimum: 3,
                maximum: 1
            })
        ));
    }
}
