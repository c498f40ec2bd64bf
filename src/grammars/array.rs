//! Nested bracketed arrays of integers, e.g. `[1,[[2],3,4],5]`

use crate::and::AndExt;
use crate::between::between;
use crate::chain::ChainExt;
use crate::choice::choice;
use crate::constant::{fail, succeed};
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::lazy::Lazy;
use crate::map::MapExt;
use crate::parser::{BoxedExt, BoxedParser, Parser};
use crate::possibly::possibly;
use crate::separated_by::separated_by;
use crate::state::ParseState;
use crate::text::{digits, string};
use serde::Serialize;
use std::fmt;

/// A parsed array element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(i64),
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

fn number() -> impl Parser<Element = u8, Output = Value, Error = ParseError> + Send + Sync + 'static
{
    possibly(string("-"))
        .and(digits())
        .chain(|(sign, digits)| -> BoxedParser<u8, Value> {
            let text = match sign {
                Some(_) => format!("-{digits}"),
                None => digits,
            };
            match text.parse::<i64>() {
                Ok(n) => succeed(Value::Number(n)).boxed(),
                Err(_) => fail("integer out of range").boxed(),
            }
        })
}

/// Grammar for a single value: an integer or a bracketed, comma-separated list
/// of values
///
/// Build it once and reuse it; it owns the recursive definition.
#[derive(Debug, Clone)]
pub struct ArrayGrammar {
    value: Lazy<u8, Value>,
}

impl Default for ArrayGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayGrammar {
    pub fn new() -> Self {
        let value: Lazy<u8, Value> = Lazy::recursive(|value| {
            let list = between(string("["), string("]"))
                .around(separated_by(string(",")).of(value))
                .map(Value::List);
            choice(vec![number().boxed(), list.boxed()])
        });
        ArrayGrammar { value }
    }
}

impl Parser for ArrayGrammar {
    type Element = u8;
    type Output = Value;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, u8>) -> ParseState<'code, u8, Value, ParseError> {
        self.value.apply(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn list(items: Vec<Value>) -> Value {
        Value::List(items)
    }

    #[test]
    fn test_nested_arrays() {
        let state = ArrayGrammar::new().run(b"[1,[[2],3,4],5]");

        assert_eq!(
            state.into_result(),
            Ok(list(vec![
                Value::Number(1),
                list(vec![list(vec![Value::Number(2)]), Value::Number(3), Value::Number(4)]),
                Value::Number(5),
            ]))
        );
    }

    #[test]
    fn test_display_round_trips_the_text() {
        let text = "[1,[[2],3,-4],[]]";
        let value = ArrayGrammar::new().run(text.as_bytes()).into_result();

        assert_eq!(value.map(|v| v.to_string()), Ok(text.to_string()));
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(ArrayGrammar::new().run(b"42").into_result(), Ok(Value::Number(42)));
    }

    #[test]
    fn test_out_of_range_integer() {
        let state = ArrayGrammar::new().run(b"[99999999999999999999]");
        assert_eq!(
            state.error().map(|e| e.kind.clone()),
            Some(ErrorKind::NoAlternativeMatched)
        );
    }

    #[test]
    fn test_unclosed_array() {
        let state = ArrayGrammar::new().run(b"[1,2");
        assert!(state.is_error());
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let value = ArrayGrammar::new().run(b"[1,[2]]").into_result().unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "[1,[2]]");
    }
}
