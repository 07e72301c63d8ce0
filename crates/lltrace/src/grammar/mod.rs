//! # Grammar Model
//!
//! Immutable value types for the inputs of a predictive parse: symbols,
//! productions and the predictive table.
//!
//! ## Symbols
//!
//! Every [`Symbol`] carries its class as an enum tag. When symbols are read
//! from text, [`Symbol::classify`] applies the naming convention once: text
//! starting with an uppercase ASCII letter is a nonterminal, anything else is
//! a terminal, and `$` / `ε` are the end and empty markers.
//!
//! ## Tables
//!
//! A [`PredictiveTable`] maps a nonterminal and a [`Lookahead`] to a
//! [`TableEntry`]. A missing row, a missing cell and an explicit
//! [`TableEntry::Error`] are three different things, and the driver reports
//! them differently.

mod production;
mod symbol;
mod table;

pub use production::{Production, ProductionRhs};
pub use symbol::{END_MARKER, EPSILON, Lookahead, NonTerminal, Symbol, Terminal, is_terminal_text};
pub use table::{PredictiveTable, TableBuilder, TableEntry, TableRow};
