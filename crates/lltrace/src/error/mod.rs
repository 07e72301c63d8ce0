//! # Error Types
//!
//! Every failure is reported to the immediate caller and nothing is retried.
//!
//! - [`GrammarError`]: a symbol or production could not be built from text
//! - [`DriveError`]: the driver rejected the input or hit a hole in the table
//! - [`TreeError`]: a trace could not be turned into a tree
//! - [`ParseError`]: either of the last two, from [`crate::parse`]
//!
//! Positions are 0-based indices into the token stream with `$` appended.
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, the error types derive
//! [`miette::Diagnostic`] with stable codes.

use crate::grammar::{Lookahead, NonTerminal, Symbol};
use compact_str::CompactString;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Failure to build a symbol or production.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("symbol text is empty")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::grammar::empty_symbol)))]
    EmptySymbol,

    #[error("`{0}` is not a terminal")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(
            code(lltrace::grammar::not_a_terminal),
            help("terminals must not start with an uppercase ASCII letter")
        )
    )]
    NotATerminal(CompactString),

    #[error("`{0}` is not a nonterminal")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(
            code(lltrace::grammar::not_a_nonterminal),
            help("nonterminals must start with an uppercase ASCII letter")
        )
    )]
    NotANonTerminal(CompactString),

    #[error("`{0}` is a reserved marker and cannot be used here")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::grammar::reserved_symbol)))]
    ReservedSymbol(CompactString),

    #[error("production for `{left}` mixes ε with other symbols")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::grammar::mixed_epsilon)))]
    MixedEpsilon { left: NonTerminal },

    #[error("production for `{left}` contains the end marker `$`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::grammar::end_marker)))]
    EndMarkerInProduction { left: NonTerminal },
}

/// Why a table cell could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// The row has no entry for the lookahead.
    Absent,
    /// The row holds an explicit error marker for the lookahead.
    Error,
}

/// Failure while driving the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum DriveError {
    /// The terminal on top of the stack differs from the current input.
    #[error("syntax error at position {position}: expected `{expected}`, found `{found}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::driver::mismatch)))]
    Mismatch {
        position: usize,
        expected: Symbol,
        found: Lookahead,
    },

    /// The table has no row at all for a nonterminal on the stack.
    #[error("parsing table has no row for `{nonterminal}`")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(
            code(lltrace::driver::missing_row),
            help("every nonterminal reachable from the start symbol needs a table row")
        )
    )]
    MissingRow { nonterminal: NonTerminal },

    /// The row exists but has nothing usable for the lookahead.
    #[error("syntax error at position {position}: no production for `{nonterminal}` on `{lookahead}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::driver::no_entry)))]
    NoEntry {
        position: usize,
        nonterminal: NonTerminal,
        lookahead: Lookahead,
        cell: CellState,
    },

    /// The configured step ceiling was reached before acceptance.
    #[error("derivation exceeded the limit of {limit} steps")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::driver::step_limit)))]
    StepLimitExceeded { limit: usize },
}

impl DriveError {
    /// Input position the error refers to, when it has one.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Mismatch { position, .. } | Self::NoEntry { position, .. } => Some(*position),
            Self::MissingRow { .. } | Self::StepLimitExceeded { .. } => None,
        }
    }

    /// Whether this is a syntax error in the input, as opposed to a table
    /// or resource problem.
    #[must_use]
    pub const fn is_syntax_error(&self) -> bool {
        matches!(self, Self::Mismatch { .. } | Self::NoEntry { .. })
    }
}

/// A trace that cannot be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum TreeError {
    #[error("trace is empty")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::empty_trace)))]
    EmptyTrace,

    #[error("initial configuration holds {stack_len} stack symbols, expected `$` and a start symbol")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::missing_start)))]
    MissingStartSymbol { stack_len: usize },

    #[error("configuration {index} has step {found}, expected {expected}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::step_gap)))]
    NonConsecutiveStep {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("step {step} needs a pending node but none is left")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::underflow)))]
    NodeStackUnderflow { step: usize },

    #[error("step {step} expands `{expected}` but the pending node is `{found}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::expansion_mismatch)))]
    ExpansionMismatch {
        step: usize,
        expected: NonTerminal,
        found: Symbol,
    },

    #[error("step {step} matches `{consumed}` but the pending node is `{found}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::match_mismatch)))]
    MatchMismatch {
        step: usize,
        consumed: Lookahead,
        found: Symbol,
    },

    #[error("step {step} matches a terminal but the previous configuration has no input left")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::no_token)))]
    NoConsumedToken { step: usize },

    #[error("trace ended with {pending} unfinished nodes")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lltrace::tree::unfinished)))]
    UnfinishedNodes { pending: usize },
}

/// Error from [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseError {
    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(transparent))]
    Drive(#[from] DriveError),

    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(transparent))]
    Tree(#[from] TreeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_parts() {
        let err = DriveError::NoEntry {
            position: 2,
            nonterminal: NonTerminal::new("T").unwrap(),
            lookahead: Lookahead::End,
            cell: CellState::Absent,
        };
        assert_eq!(
            err.to_string(),
            "syntax error at position 2: no production for `T` on `$`"
        );
        assert_eq!(err.position(), Some(2));
        assert!(err.is_syntax_error());

        let err = DriveError::MissingRow {
            nonterminal: NonTerminal::new("X").unwrap(),
        };
        assert_eq!(err.to_string(), "parsing table has no row for `X`");
        assert_eq!(err.position(), None);
        assert!(!err.is_syntax_error());
    }

    #[test]
    fn parse_error_is_transparent() {
        let err: ParseError = TreeError::EmptyTrace.into();
        assert_eq!(err.to_string(), "trace is empty");
    }
}
