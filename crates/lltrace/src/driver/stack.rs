//! Persistent parse stack.
//!
//! Every configuration in a trace holds a [`SymbolStack`]. Pushing and popping
//! builds a new head on top of the frames below it, so all snapshots share the
//! part of the stack they have in common.

use crate::grammar::Symbol;
use std::fmt;
use std::sync::Arc;

struct Frame {
    symbol: Symbol,
    below: Option<Arc<Frame>>,
}

/// An immutable-by-sharing stack of symbols, top first.
#[derive(Clone, Default)]
pub struct SymbolStack {
    head: Option<Arc<Frame>>,
    len: usize,
}

impl SymbolStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Build a stack from symbols listed bottom first.
    pub fn from_bottom<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut stack = Self::new();
        for symbol in symbols {
            stack.push(symbol);
        }
        stack
    }

    /// Push `symbol` on top.
    pub fn push(&mut self, symbol: Symbol) {
        let below = self.head.take();
        self.head = Some(Arc::new(Frame { symbol, below }));
        self.len += 1;
    }

    /// Remove the top symbol. Frames still referenced by snapshots stay alive.
    pub fn pop(&mut self) -> Option<Symbol> {
        let frame = self.head.take()?;
        self.len -= 1;
        match Arc::try_unwrap(frame) {
            Ok(frame) => {
                self.head = frame.below;
                Some(frame.symbol)
            }
            Err(shared) => {
                self.head.clone_from(&shared.below);
                Some(shared.symbol.clone())
            }
        }
    }

    /// The symbol on top, if any.
    #[must_use]
    pub fn top(&self) -> Option<&Symbol> {
        self.head.as_deref().map(|frame| &frame.symbol)
    }

    /// Number of symbols on the stack.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the stack holds no symbols.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Symbols from the top down.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Copy out the symbols bottom first, the order they are displayed in.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.iter().cloned().collect();
        symbols.reverse();
        symbols
    }

    /// Symbol at `index`, counting from the bottom.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        if index >= self.len {
            return None;
        }
        self.iter().nth(self.len - 1 - index)
    }
}

impl Drop for SymbolStack {
    fn drop(&mut self) {
        // Unlink uniquely owned frames one by one; a recursive drop of a long
        // chain would overflow the call stack.
        let mut next = self.head.take();
        while let Some(frame) = next {
            match Arc::try_unwrap(frame) {
                Ok(mut frame) => next = frame.below.take(),
                Err(_) => break,
            }
        }
    }
}

impl PartialEq for SymbolStack {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for SymbolStack {}

impl fmt::Debug for SymbolStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

impl FromIterator<Symbol> for SymbolStack {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::from_bottom(iter)
    }
}

/// Iterator over a [`SymbolStack`], top first.
pub struct Iter<'a> {
    next: Option<&'a Frame>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.below.as_deref();
        Some(&frame.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(texts: &[&str]) -> Vec<Symbol> {
        texts.iter().copied().map(Symbol::classify).collect()
    }

    #[test]
    fn push_pop_order() {
        let mut stack = SymbolStack::from_bottom(syms(&["$", "E"]));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top(), Some(&Symbol::classify("E")));
        assert_eq!(stack.pop(), Some(Symbol::classify("E")));
        assert_eq!(stack.pop(), Some(Symbol::EndMarker));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn snapshots_are_unaffected_by_later_changes() {
        let mut live = SymbolStack::from_bottom(syms(&["$", "E"]));
        let snapshot = live.clone();

        live.pop();
        live.push(Symbol::classify("E'"));
        live.push(Symbol::classify("T"));

        assert_eq!(snapshot.to_vec(), syms(&["$", "E"]));
        assert_eq!(live.to_vec(), syms(&["$", "E'", "T"]));
    }

    #[test]
    fn get_counts_from_bottom() {
        let stack = SymbolStack::from_bottom(syms(&["$", "E", "x"]));
        assert_eq!(stack.get(0), Some(&Symbol::EndMarker));
        assert_eq!(stack.get(1), Some(&Symbol::classify("E")));
        assert_eq!(stack.get(2), Some(&Symbol::classify("x")));
        assert_eq!(stack.get(3), None);
    }

    #[test]
    fn long_chains_drop_without_recursion() {
        let mut stack = SymbolStack::new();
        for _ in 0..200_000 {
            stack.push(Symbol::classify("a"));
        }
        let shared = stack.clone();
        drop(stack);
        assert_eq!(shared.len(), 200_000);
    }
}
