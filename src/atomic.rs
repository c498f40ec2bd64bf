/// Trait for atomic elements that can be used as parser input
/// This enables generic error formatting and position calculation
pub trait Atomic: Copy + Clone + PartialEq + std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// The newline character/element for this atomic type
    const NEWLINE: Self;

    /// Convert a slice of elements to a displayable string for error reporting
    fn slice_to_string(slice: &[Self]) -> String;

    fn is_newline(&self) -> bool {
        *self == Self::NEWLINE
    }
}

impl Atomic for u8 {
    const NEWLINE: Self = b'\n';

    fn slice_to_string(slice: &[Self]) -> String {
        String::from_utf8_lossy(slice).to_string()
    }
}

impl Atomic for char {
    const NEWLINE: Self = '\n';

    fn slice_to_string(slice: &[Self]) -> String {
        slice.iter().collect()
    }
}
