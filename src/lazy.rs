use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::error::{ErrorKind, GrammarError, ParseError};
use crate::parser::{BoxedParser, Parser};
use crate::state::ParseState;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

type Slot<T, O, E> = OnceCell<BoxedParser<T, O, E>>;

/// A forward-declared parser for recursive grammars
///
/// Declare it, reference it inside the grammar through [`Lazy::handle`], then
/// [`bind`](Lazy::bind) it to the finished grammar exactly once. After binding
/// it behaves like the parser it was bound to.
///
/// The `Lazy` owns the binding; handles only refer to it weakly, so a grammar
/// that contains itself does not leak. Keep the `Lazy` alive for as long as
/// any grammar using its handles is run.
pub struct Lazy<T, O, E = ParseError> {
    slot: Arc<Slot<T, O, E>>,
}

impl<T, O, E> Clone for Lazy<T, O, E> {
    fn clone(&self) -> Self {
        Lazy {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T, O, E> fmt::Debug for Lazy<T, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("bound", &self.slot.get().is_some())
            .finish()
    }
}

impl<T: Atomic, O, E> Default for Lazy<T, O, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Atomic, O, E> Lazy<T, O, E> {
    pub fn new() -> Self {
        Lazy {
            slot: Arc::new(OnceCell::new()),
        }
    }

    /// A reference to this parser for use inside the grammar being defined
    pub fn handle(&self) -> LazyRef<T, O, E> {
        LazyRef {
            slot: Arc::downgrade(&self.slot),
        }
    }

    /// Bind the real definition; a second binding is rejected
    pub fn bind<P>(&self, parser: P) -> Result<(), GrammarError>
    where
        P: Parser<Element = T, Output = O, Error = E> + Send + Sync + 'static,
    {
        self.slot
            .set(BoxedParser::new(parser))
            .map_err(|_| GrammarError::LazyAlreadyBound)?;
        debug!("lazy parser bound");
        Ok(())
    }

    /// Declare and bind in one step
    ///
    /// `define` receives a handle to the parser under construction and returns
    /// its definition, which may contain that handle any number of times.
    pub fn recursive<P, F>(define: F) -> Self
    where
        F: FnOnce(LazyRef<T, O, E>) -> P,
        P: Parser<Element = T, Output = O, Error = E> + Send + Sync + 'static,
    {
        let lazy = Lazy::new();
        let parser = define(lazy.handle());
        let bound = lazy.slot.set(BoxedParser::new(parser)).is_ok();
        debug_assert!(bound, "a fresh lazy cell is bound exactly once");
        debug!("recursive parser bound");
        lazy
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }
}

fn apply_slot<'code, T, O, E>(
    slot: Option<&Slot<T, O, E>>,
    cursor: Cursor<'code, T>,
) -> ParseState<'code, T, O, E>
where
    T: Atomic,
    E: From<ParseError>,
{
    match slot.and_then(OnceCell::get) {
        Some(parser) => parser.apply(cursor),
        None => ParseState::failure(
            cursor,
            ParseError::new(ErrorKind::UnboundLazy, cursor.position()).into(),
        ),
    }
}

impl<T, O, E> Parser for Lazy<T, O, E>
where
    T: Atomic,
    E: From<ParseError>,
{
    type Element = T;
    type Output = O;
    type Error = E;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, O, E> {
        apply_slot(Some(&*self.slot), cursor)
    }
}

/// Weak reference to a [`Lazy`] parser, embedded inside recursive grammars
pub struct LazyRef<T, O, E = ParseError> {
    slot: Weak<Slot<T, O, E>>,
}

impl<T, O, E> Clone for LazyRef<T, O, E> {
    fn clone(&self) -> Self {
        LazyRef {
            slot: Weak::clone(&self.slot),
        }
    }
}

impl<T, O, E> Parser for LazyRef<T, O, E>
where
    T: Atomic,
    E: From<ParseError>,
{
    type Element = T;
    type Output = O;
    type Error = E;

    fn apply<'code>(&self, cursor: Cursor<'code, T>) -> ParseState<'code, T, O, E> {
        let slot = self.slot.upgrade();
        apply_slot(slot.as_deref(), cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::between::between;
    use crate::choice::choice;
    use crate::map::MapExt;
    use crate::parser::BoxedExt;
    use crate::separated_by::separated_by;
    use crate::text::{digits, string};

    #[derive(Debug, PartialEq)]
    enum Nested {
        Leaf(String),
        List(Vec<Nested>),
    }

    #[test]
    fn test_recursive_grammar() {
        let value: Lazy<u8, Nested> = Lazy::new();
        let list = between(string("("), string(")"))
            .around(separated_by(string(" ")).of(value.handle()))
            .map(Nested::List);
        value
            .bind(choice(vec![digits().map(Nested::Leaf).boxed(), list.boxed()]))
            .unwrap();

        let state = value.run(b"(1 (2 3) ())");
        assert_eq!(
            state.into_result(),
            Ok(Nested::List(vec![
                Nested::Leaf("1".into()),
                Nested::List(vec![Nested::Leaf("2".into()), Nested::Leaf("3".into())]),
                Nested::List(vec![]),
            ]))
        );
    }

    #[test]
    fn test_recursive_constructor() {
        let value: Lazy<u8, Nested> = Lazy::recursive(|this| {
            let list = between(string("("), string(")"))
                .around(separated_by(string(" ")).of(this))
                .map(Nested::List);
            choice(vec![digits().map(Nested::Leaf).boxed(), list.boxed()])
        });

        assert!(value.is_bound());
        assert_eq!(
            value.run(b"((7))").into_result(),
            Ok(Nested::List(vec![Nested::List(vec![Nested::Leaf("7".into())])]))
        );
    }

    #[test]
    fn test_recursive_parser_cannot_be_rebound() {
        let value: Lazy<u8, String> = Lazy::recursive(|_| digits());

        assert!(matches!(
            value.bind(string("x").map(|s| s.into_owned())),
            Err(GrammarError::LazyAlreadyBound)
        ));
        assert_eq!(value.run(b"42").into_result(), Ok("42".to_string()));
    }

    #[test]
    fn test_bind_twice_is_rejected() {
        let lazy: Lazy<u8, String> = Lazy::new();
        assert!(lazy.bind(digits()).is_ok());

        let second = lazy.bind(digits().map(|d| d + "!"));
        assert!(matches!(second, Err(GrammarError::LazyAlreadyBound)));

        // The first binding stays in effect
        assert_eq!(lazy.run(b"12").into_result(), Ok("12".to_string()));
    }

    #[test]
    fn test_unbound_lazy_fails_at_parse_time() {
        let lazy: Lazy<u8, String> = Lazy::new();
        let state = lazy.run(b"12");

        assert!(!lazy.is_bound());
        assert_eq!(
            state.error().map(|e| e.kind.clone()),
            Some(ErrorKind::UnboundLazy)
        );
    }

    #[test]
    fn test_handle_after_owner_dropped() {
        let handle = {
            let lazy: Lazy<u8, String> = Lazy::new();
            lazy.bind(digits()).unwrap();
            lazy.handle()
        };

        assert_eq!(
            handle.run(b"1").error().map(|e| e.kind.clone()),
            Some(ErrorKind::UnboundLazy)
        );
    }

    #[test]
    fn test_handle_behaves_like_bound_parser() {
        let lazy: Lazy<u8, String> = Lazy::new();
        let handle = lazy.handle();
        lazy.bind(digits()).unwrap();

        let state = handle.run(b"42x");
        assert_eq!(state.result().map(String::as_str), Some("42"));
        assert_eq!(state.position(), 2);
    }
}
