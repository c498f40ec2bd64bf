use crate::atomic::Atomic;
use std::borrow::Cow;
use thiserror::Error;

/// What went wrong while matching
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Required elements do not exist beyond the current position
    #[error("tried to match {expected}, but got unexpected end of input")]
    EndOfInput { expected: Cow<'static, str> },

    /// An exact-match parser observed different content
    #[error("expected '{expected}', but got '{actual}'")]
    LiteralMismatch { expected: String, actual: String },

    /// A class-based matcher found no matching run
    #[error("could not match {description}")]
    PatternMismatch { description: Cow<'static, str> },

    #[error("unable to match with any parser")]
    NoAlternativeMatched,

    #[error("unable to match at least {minimum} repetitions, matched {found}")]
    MinimumRepetitionsNotMet { minimum: usize, found: usize },

    /// Bytes were present but could not be interpreted as the target type
    #[error("error extracting {target}: {reason}")]
    ConversionFailure {
        target: &'static str,
        reason: String,
    },

    /// A repeated parser succeeded without consuming input
    #[error("repeated parser succeeded without consuming input")]
    NoProgress,

    #[error("lazy parser used before it was bound")]
    UnboundLazy,

    #[error("{0}")]
    Custom(String),
}

/// A parse failure: what went wrong and where matching was attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at index {position}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        ParseError { kind, position }
    }

    pub fn custom(message: impl Into<String>, position: usize) -> Self {
        ParseError::new(ErrorKind::Custom(message.into()), position)
    }

    pub fn end_of_input(expected: impl Into<Cow<'static, str>>, position: usize) -> Self {
        ParseError::new(
            ErrorKind::EndOfInput {
                expected: expected.into(),
            },
            position,
        )
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Translate the element offset into a line number and offset within that line
    ///
    /// Note: the offset counts elements, not rendered columns.
    pub fn locate<T: Atomic>(&self, input: &[T]) -> Location {
        Location::of(input, self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub offset: usize,
}

impl Location {
    pub fn of<T: Atomic>(input: &[T], position: usize) -> Self {
        let mut line = 1;
        let mut line_start = 0;

        for (i, element) in input.iter().enumerate() {
            if i >= position {
                break;
            }
            if element.is_newline() {
                line += 1;
                line_start = i + 1;
            }
        }

        Location {
            line,
            offset: position.saturating_sub(line_start),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, offset {}", self.line, self.offset)
    }
}

/// Misconfiguration detected while building a grammar, before any input is seen
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("bit-field width must be between 1 and 4 bytes, got {width}")]
    InvalidBitWidth { width: usize },

    #[error("bit mask must select at least one bit")]
    EmptyBitMask,

    #[error("bit mask {mask:#x} does not fit in {width} byte(s)")]
    MaskExceedsWidth { mask: u32, width: usize },

    #[error("bit mask {mask:#b} must select one contiguous run of bits")]
    NonContiguousMask { mask: u32 },

    #[error("invalid pattern for {description}")]
    InvalidPattern {
        description: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid repetition bounds: minimum {minimum} exceeds maximum {maximum}")]
    InvalidBounds { minimum: usize, maximum: usize },

    #[error("lazy parser is already bound")]
    LazyAlreadyBound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_index() {
        let error = ParseError::custom("Illegal character 'a'", 15);
        assert_eq!(error.to_string(), "Illegal character 'a' at index 15");
    }

    #[test]
    fn test_literal_mismatch_display() {
        let error = ParseError::new(
            ErrorKind::LiteralMismatch {
                expected: "bar".into(),
                actual: "foo".into(),
            },
            0,
        );
        assert_eq!(error.to_string(), "expected 'bar', but got 'foo' at index 0");
    }

    #[test]
    fn test_end_of_input_display() {
        let error = ParseError::end_of_input("'Goodbye'", 13);
        assert_eq!(
            error.to_string(),
            "tried to match 'Goodbye', but got unexpected end of input at index 13"
        );
    }

    #[test]
    fn test_locate_eos_empty_data() {
        let data: &[u8] = b"";
        let location = ParseError::custom("x", 0).locate(data);
        assert_eq!(location, Location { line: 1, offset: 0 });
    }

    #[test]
    fn test_locate_multiline() {
        let data = b"line1\nline2";
        let location = ParseError::custom("x", 11).locate(data);

        // Past the end of "line2"
        assert_eq!(location.line, 2);
        assert_eq!(location.offset, 5);
    }

    #[test]
    fn test_locate_after_newline() {
        let data = b"hello\n";
        let location = Location::of(data, 6);
        assert_eq!(location.to_string(), "line 2, offset 0");
    }

    #[test]
    fn test_grammar_error_display() {
        let error = GrammarError::MaskExceedsWidth {
            mask: 0x1FF,
            width: 1,
        };
        assert_eq!(error.to_string(), "bit mask 0x1ff does not fit in 1 byte(s)");
        assert_eq!(
            GrammarError::InvalidBitWidth { width: 5 }.to_string(),
            "bit-field width must be between 1 and 4 bytes, got 5"
        );
    }
}
