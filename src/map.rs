use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::state::ParseState;

/// Parser combinator that transforms the output of a parser using a mapping function
#[derive(Clone)]
pub struct Map<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Map { parser, mapper }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Element = P::Element;
    type Output = U;
    type Error = P::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, U, Self::Error> {
        self.parser.apply(cursor).map_result(&self.mapper)
    }
}

/// Convenience function to create a Map parser
pub fn map<P, F, U>(parser: P, mapper: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    Map::new(parser, mapper)
}

/// Extension trait to add .map() method support for parsers
pub trait MapExt: Parser + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, mapper)
    }
}

/// Implement MapExt for all parsers
impl<P> MapExt for P where P: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::is_element;
    use crate::text::digits;

    #[derive(Debug, PartialEq)]
    enum Token {
        Letter(char),
        Number(u64),
    }

    #[test]
    fn test_map_byte_to_char() {
        let parser = is_element(b'A').map(|byte| byte as char);
        let state = parser.run(b"A");

        assert_eq!(state.result(), Some(&'A'));
        assert_eq!(state.position(), 1);
    }

    #[test]
    fn test_map_to_enum() {
        let parser = is_element(b'X').map(|byte| Token::Letter(byte as char));
        assert_eq!(parser.run(b"X").into_result(), Ok(Token::Letter('X')));
    }

    #[test]
    fn test_map_digits_to_number() {
        let parser = digits().map(|text| text.parse::<u64>().map(Token::Number).ok());
        let state = parser.run(b"123abc");

        assert_eq!(state.result(), Some(&Some(Token::Number(123))));
        assert_eq!(state.position(), 3);
    }

    #[test]
    fn test_map_chaining() {
        let parser = is_element(b'5')
            .map(|byte| byte as char)
            .map(|ch| ch.to_digit(10))
            .map(|digit| format!("Digit: {:?}", digit));

        assert_eq!(parser.run(b"5").into_result(), Ok("Digit: Some(5)".to_string()));
    }

    #[test]
    fn test_map_preserves_errors() {
        let parser = is_element(b'A').map(|byte| byte as char);
        let state = parser.run(b"xyz");

        assert!(state.is_error());
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_function_syntax() {
        let parser = map(is_element(b'9'), |byte| byte as char);
        assert_eq!(parser.run(b"9").into_result(), Ok('9'));
    }
}
