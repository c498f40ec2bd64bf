//! Prefix arithmetic in S-expression form, e.g. `(+ (* 10 2) (- (/ 50 3) 2))`

use crate::between::between;
use crate::chain::ChainExt;
use crate::choice::choice;
use crate::constant::{fail, succeed};
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::lazy::Lazy;
use crate::map::MapExt;
use crate::parser::{BoxedExt, BoxedParser, Parser};
use crate::sequence::sequence;
use crate::state::ParseState;
use crate::text::{digits, string, whitespace};
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expr {
    Number(i64),
    Operation {
        operator: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow in {0:?}")]
    Overflow(Operator),
}

impl Expr {
    pub fn evaluate(&self) -> Result<i64, EvalError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Operation {
                operator,
                left,
                right,
            } => {
                let (a, b) = (left.evaluate()?, right.evaluate()?);
                let result = match operator {
                    Operator::Add => a.checked_add(b),
                    Operator::Subtract => a.checked_sub(b),
                    Operator::Multiply => a.checked_mul(b),
                    Operator::Divide if b == 0 => return Err(EvalError::DivisionByZero),
                    Operator::Divide => a.checked_div(b),
                };
                trace!(?operator, a, b, ?result, "evaluated operation");
                result.ok_or(EvalError::Overflow(*operator))
            }
        }
    }
}

fn operator() -> BoxedParser<u8, Operator> {
    choice(vec![
        string("+").map(|_| Operator::Add).boxed(),
        string("-").map(|_| Operator::Subtract).boxed(),
        string("*").map(|_| Operator::Multiply).boxed(),
        string("/").map(|_| Operator::Divide).boxed(),
    ])
    .boxed()
}

fn number() -> BoxedParser<u8, Expr> {
    digits()
        .chain(|digits| -> BoxedParser<u8, Expr> {
            match digits.parse::<i64>() {
                Ok(n) => succeed(Expr::Number(n)).boxed(),
                Err(_) => fail("integer out of range").boxed(),
            }
        })
        .boxed()
}

/// Grammar for one expression: an integer or `(op left right)`
#[derive(Debug, Clone)]
pub struct ExprGrammar {
    expr: Lazy<u8, Expr>,
}

impl Default for ExprGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprGrammar {
    pub fn new() -> Self {
        let expr: Lazy<u8, Expr> = Lazy::recursive(|expr| {
            let operation = between(string("("), string(")"))
                .around(sequence((
                    operator(),
                    whitespace(),
                    expr.clone(),
                    whitespace(),
                    expr,
                )))
                .map(|(operator, _, left, _, right)| Expr::Operation {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                });
            choice(vec![number(), operation.boxed()])
        });
        ExprGrammar { expr }
    }
}

impl Parser for ExprGrammar {
    type Element = u8;
    type Output = Expr;
    type Error = ParseError;

    fn apply<'code>(&self, cursor: Cursor<'code, u8>) -> ParseState<'code, u8, Expr, ParseError> {
        self.expr.apply(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> Result<i64, EvalError> {
        ExprGrammar::new()
            .run(source.as_bytes())
            .into_result()
            .expect("expression should parse")
            .evaluate()
    }

    #[test]
    fn test_nested_expression() {
        assert_eq!(eval("(+ (* 10 2) (- (/ 50 3) 2))"), Ok(34));
    }

    #[test]
    fn test_parse_tree() {
        let state = ExprGrammar::new().run(b"(- 7 2)");
        assert_eq!(
            state.into_result(),
            Ok(Expr::Operation {
                operator: Operator::Subtract,
                left: Box::new(Expr::Number(7)),
                right: Box::new(Expr::Number(2)),
            })
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("(/ 1 (- 2 2))"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            eval("(* 9223372036854775807 2)"),
            Err(EvalError::Overflow(Operator::Multiply))
        );
    }

    #[test]
    fn test_unknown_operator() {
        let state = ExprGrammar::new().run(b"(% 1 2)");
        assert!(state.is_error());
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_missing_operand_fails() {
        assert!(ExprGrammar::new().run(b"(+ 1)").is_error());
    }
}
