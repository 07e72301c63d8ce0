//! # Testing Utilities
//!
//! Fixtures shared by the unit tests, integration tests, benchmarks and the
//! command-line tool.
//!
//! The arithmetic table covers `E, E', T, T', F` over `+ - * / ( ) id num`:
//!
//! ```text
//! E  → T E'
//! E' → + T E' | - T E' | ε
//! T  → F T'
//! T' → * F T' | / F T' | ε
//! F  → ( E ) | id | num
//! ```

use crate::error::GrammarError;
use crate::grammar::{NonTerminal, PredictiveTable, Terminal};

/// Name of the arithmetic table's start symbol.
pub const ARITHMETIC_START: &str = "E";

/// The arithmetic table's start symbol.
#[must_use]
pub fn start_symbol() -> NonTerminal {
    NonTerminal::new(ARITHMETIC_START).expect("`E` is a nonterminal")
}

/// The LL(1) table for the arithmetic expression grammar.
#[must_use]
pub fn arithmetic_table() -> PredictiveTable {
    let mut builder = PredictiveTable::builder();
    for first in ["id", "num", "("] {
        builder = builder.entry("E", first, ["T", "E'"]).entry("T", first, ["F", "T'"]);
    }
    for op in ["+", "-"] {
        builder = builder.entry("E'", op, [op, "T", "E'"]).entry("T'", op, ["ε"]);
    }
    for op in ["*", "/"] {
        builder = builder.entry("T'", op, [op, "F", "T'"]);
    }
    for follow in [")", "$"] {
        builder = builder.entry("E'", follow, ["ε"]).entry("T'", follow, ["ε"]);
    }
    builder
        .entry("F", "id", ["id"])
        .entry("F", "num", ["num"])
        .entry("F", "(", ["(", "E", ")"])
        .build()
        .expect("arithmetic table is well formed")
}

/// Split whitespace-separated text into terminals.
///
/// # Errors
///
/// Fails on the first word that is not a terminal (`$`, `ε`, or a word
/// starting with an uppercase ASCII letter).
pub fn terminals(text: &str) -> Result<Vec<Terminal>, GrammarError> {
    text.split_whitespace().map(Terminal::new).collect()
}
