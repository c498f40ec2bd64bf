//! # arcparse - Parser Combinator Library
//!
//! A combinator parsing engine over in-memory sequences of bytes or chars,
//! with a byte and bit level decoding layer for binary records.
//!
//! A parser threads a [`ParseState`] from one position to the next. Errors are
//! values carried in that state: once a state is an error every combinator
//! passes it through untouched, so grammars compose without explicit checks.
//!
//! - **No panics while parsing**: failures are returned as [`ParseError`] data
//! - **Construction-time validation**: bad grammar configuration is a [`GrammarError`]
//! - **Composability**: small parsers combine into larger ones using combinators
//! - **Shareable**: parsers are immutable and can be reused across inputs and threads
//!
//! ```
//! use arcparse::prelude::*;
//! use arcparse::text::{digits, string};
//!
//! let list = between(string("["), string("]"))
//!     .around(separated_by(string(",")).of(digits().map(|d| d.len())));
//!
//! assert_eq!(list.run(b"[1,22,333]").into_result(), Ok(vec![1, 2, 3]));
//! ```

pub mod and;
pub mod atomic;
pub mod between;
pub mod binary;
pub mod chain;
pub mod choice;
pub mod constant;
pub mod cursor;
pub mod element;
pub mod error;
pub mod error_map;
pub mod grammars;
pub mod lazy;
pub mod many;
pub mod map;
pub mod or;
pub mod parser;
pub mod possibly;
pub mod separated_by;
pub mod sequence;
pub mod state;
pub mod text;

pub use and::{And, AndExt, Skip, Then, and};
pub use atomic::Atomic;
pub use between::{Between, Enclosed, between};
pub use chain::{Chain, ChainExt};
pub use choice::{Choice, choice};
pub use constant::{Fail, Succeed, fail, succeed};
pub use cursor::Cursor;
pub use element::{AnyElement, IsElement, Satisfy, any_element, element, is_element};
pub use error::{ErrorKind, GrammarError, Location, ParseError};
pub use error_map::{ErrorMap, ErrorMapExt, error_map};
pub use lazy::{Lazy, LazyRef};
pub use many::{Many, many, many_at_least};
pub use map::{Map, MapExt, map};
pub use or::{Or, OrExt, or};
pub use parser::{BoxedExt, BoxedParser, Parser};
pub use possibly::{Possibly, possibly};
pub use separated_by::{SeparatedBy, SeparatedList, separated_by, separated_by_at_least};
pub use sequence::{Sequence, Sequential, sequence};
pub use state::ParseState;

/// Everything needed to write a grammar: the core trait, the extension
/// traits and the free-standing combinators
pub mod prelude {
    pub use crate::and::AndExt;
    pub use crate::between::between;
    pub use crate::chain::ChainExt;
    pub use crate::choice::choice;
    pub use crate::constant::{fail, succeed};
    pub use crate::error::{ErrorKind, ParseError};
    pub use crate::error_map::ErrorMapExt;
    pub use crate::lazy::Lazy;
    pub use crate::many::{many, many_at_least};
    pub use crate::map::MapExt;
    pub use crate::or::OrExt;
    pub use crate::parser::{BoxedExt, Parser};
    pub use crate::possibly::possibly;
    pub use crate::separated_by::{separated_by, separated_by_at_least};
    pub use crate::sequence::sequence;
}
