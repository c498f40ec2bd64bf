use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::parser::Parser;
use crate::state::ParseState;

/// A group of parsers that can be applied one after another
///
/// Implemented for `Vec<P>` and `[P; N]` (homogeneous, collecting into a
/// `Vec`) and for tuples of up to twelve parsers (heterogeneous, collecting
/// into a tuple of the same arity).
pub trait Sequential {
    type Element: Atomic;
    type Output;
    type Error;

    fn apply_in_order<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error>;
}

fn apply_each<'code, 'p, P, I>(
    parsers: I,
    capacity: usize,
    mut cursor: Cursor<'code, P::Element>,
) -> ParseState<'code, P::Element, Vec<P::Output>, P::Error>
where
    P: Parser + 'p,
    I: IntoIterator<Item = &'p P>,
{
    let mut results = Vec::with_capacity(capacity);

    for parser in parsers {
        let (value, next_cursor) = match parser.apply(cursor).branch() {
            Ok(parts) => parts,
            // Later parsers are never attempted
            Err(failed) => return failed,
        };
        results.push(value);
        cursor = next_cursor;
    }

    ParseState::success(cursor, results)
}

impl<P: Parser> Sequential for Vec<P> {
    type Element = P::Element;
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn apply_in_order<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        apply_each(self, self.len(), cursor)
    }
}

impl<P: Parser, const N: usize> Sequential for [P; N] {
    type Element = P::Element;
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn apply_in_order<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        apply_each(self, N, cursor)
    }
}

macro_rules! sequential_tuple {
    ($($parser:ident => $value:ident),+) => {
        impl<T: Atomic, E, $($parser),+> Sequential for ($($parser,)+)
        where
            $($parser: Parser<Element = T, Error = E>),+
        {
            type Element = T;
            type Output = ($(<$parser as Parser>::Output,)+);
            type Error = E;

            #[allow(non_snake_case)]
            fn apply_in_order<'code>(
                &self,
                cursor: Cursor<'code, T>,
            ) -> ParseState<'code, T, Self::Output, E> {
                let ($($parser,)+) = self;
                $(
                    let ($value, cursor) = match $parser.apply(cursor).branch() {
                        Ok(parts) => parts,
                        Err(failed) => return failed,
                    };
                )+
                ParseState::success(cursor, ($($value,)+))
            }
        }
    };
}

sequential_tuple!(A => a);
sequential_tuple!(A => a, B => b);
sequential_tuple!(A => a, B => b, C => c);
sequential_tuple!(A => a, B => b, C => c, D => d);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f, G => g);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f, G => g, H => h);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f, G => g, H => h, I => i);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f, G => g, H => h, I => i, J => j);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f, G => g, H => h, I => i, J => j, K => k);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f, G => g, H => h, I => i, J => j, K => k, L => l);
sequential_tuple!(A => a, B => b, C => c, D => d, F => f, G => g, H => h, I => i, J => j, K => k, L => l, M => m);

/// Parser combinator that applies a group of parsers in order
///
/// Each step's result is collected in input order. The first failure stops the
/// sequence and is returned as-is: the position is wherever the failing parser
/// left it, not rewound. Use `choice` at decision points that need a rewind.
#[derive(Clone)]
pub struct Sequence<S> {
    parsers: S,
}

impl<S: Sequential> Parser for Sequence<S> {
    type Element = S::Element;
    type Output = S::Output;
    type Error = S::Error;

    fn apply<'code>(
        &self,
        cursor: Cursor<'code, Self::Element>,
    ) -> ParseState<'code, Self::Element, Self::Output, Self::Error> {
        self.parsers.apply_in_order(cursor)
    }
}

/// Creates a parser that applies `parsers` one after another
pub fn sequence<S: Sequential>(parsers: S) -> Sequence<S> {
    Sequence { parsers }
}
