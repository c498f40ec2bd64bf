//! Ready-made grammars built only from the public combinators

pub mod array;
pub mod ipv4;
pub mod sexpr;
pub mod tagged;

pub use array::{ArrayGrammar, Value};
pub use ipv4::{Ipv4Header, ipv4_header};
pub use sexpr::{EvalError, Expr, ExprGrammar, Operator};
pub use tagged::{Tagged, tagged};
