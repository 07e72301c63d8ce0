//! # lltrace
//!
//! Table-driven predictive (LL(1)) parsing with a full derivation trace.
//!
//! ## Overview
//!
//! You supply a start symbol, a fully built [`PredictiveTable`] and a stream
//! of [`Terminal`]s. The [`driver`] simulates the push-down automaton and
//! records every move as a [`Configuration`]; the [`tree`] builder then turns
//! that trace into a concrete parse tree.
//!
//! - **No table construction**: FIRST/FOLLOW and conflict detection are the
//!   caller's business; the table is used as given
//! - **Fail fast**: the first error ends the parse, with no recovery
//! - **Cheap snapshots**: configurations share stack frames and the input
//!   buffer instead of copying them
//!
//! ## Quick Start
//!
//! ```rust
//! use lltrace::grammar::{NonTerminal, PredictiveTable};
//! use lltrace::testing::terminals;
//!
//! // S → a S | ε
//! let table = PredictiveTable::builder()
//!     .entry("S", "a", ["a", "S"])
//!     .entry("S", "$", ["ε"])
//!     .build()
//!     .expect("valid table");
//!
//! let start = NonTerminal::new("S").expect("nonterminal");
//! let tokens = terminals("a a").expect("terminals");
//!
//! let derivation = lltrace::parse(&start, &table, &tokens).expect("accepted");
//! assert!(derivation.trace.is_accepted());
//! assert_eq!(derivation.tree.leaf_values().collect::<Vec<_>>(), ["a", "a"]);
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] - Symbols, productions and the predictive table
//! - [`driver`] - The automaton and its configuration trace
//! - [`tree`] - Parse tree reconstruction from a trace
//! - [`render`] - Text output for traces and trees
//! - [`error`] - Error types
//! - [`testing`] - The arithmetic expression fixture

pub mod driver;
pub mod error;
pub mod grammar;
pub mod render;
pub mod testing;
pub mod tree;

pub use driver::{Configuration, DriverConfig, PredictiveDriver, Trace, drive, drive_with_config};
pub use error::{CellState, DriveError, GrammarError, ParseError, TreeError};
pub use grammar::{Lookahead, NonTerminal, PredictiveTable, Production, Symbol, TableEntry, Terminal};
pub use render::RenderConfig;
pub use tree::{SyntaxTreeNode, build_tree};

/// A successful parse: the trace and the tree built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub trace: Trace,
    pub tree: SyntaxTreeNode,
}

/// Drive `tokens` and build the tree in one go.
///
/// # Errors
///
/// Returns the driver's error if the input is rejected, or the builder's
/// error if the trace cannot be turned into a tree.
pub fn parse(start: &NonTerminal, table: &PredictiveTable, tokens: &[Terminal]) -> Result<Derivation, ParseError> {
    parse_with_config(start, table, tokens, DriverConfig::default())
}

/// [`parse`] with explicit driver settings.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_config(
    start: &NonTerminal,
    table: &PredictiveTable,
    tokens: &[Terminal],
    config: DriverConfig,
) -> Result<Derivation, ParseError> {
    let trace = drive_with_config(start, table, tokens, config)?;
    let tree = build_tree(&trace)?;
    Ok(Derivation { trace, tree })
}
