//! `type:payload` values whose payload grammar is picked by the tag

use crate::and::AndExt;
use crate::chain::ChainExt;
use crate::constant::{fail, succeed};
use crate::error::ParseError;
use crate::map::MapExt;
use crate::parser::{BoxedExt, BoxedParser, Parser};
use crate::sequence::sequence;
use crate::text::{digits, letters, string};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Tagged {
    String(String),
    Number(u64),
    DiceRoll { count: u32, sides: u32 },
}

fn payload(tag: String) -> BoxedParser<u8, Tagged> {
    match tag.as_str() {
        "string" => letters().map(Tagged::String).boxed(),
        "number" => digits()
            .chain(|digits| -> BoxedParser<u8, Tagged> {
                match digits.parse() {
                    Ok(n) => succeed(Tagged::Number(n)).boxed(),
                    Err(_) => fail("number out of range").boxed(),
                }
            })
            .boxed(),
        "diceroll" => sequence((digits(), string("d"), digits()))
            .chain(|(count, _, sides)| -> BoxedParser<u8, Tagged> {
                match (count.parse(), sides.parse()) {
                    (Ok(count), Ok(sides)) => {
                        succeed(Tagged::DiceRoll { count, sides }).boxed()
                    }
                    _ => fail("dice roll out of range").boxed(),
                }
            })
            .boxed(),
        _ => fail(format!("unknown tag '{tag}'")).boxed(),
    }
}

/// Parser for `string:<letters>`, `number:<digits>` and `diceroll:<n>d<sides>`
pub fn tagged() -> impl Parser<Element = u8, Output = Tagged, Error = ParseError> + Clone {
    letters().skip(string(":")).chain(payload)
}
