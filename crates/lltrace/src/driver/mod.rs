//! # Predictive Driver
//!
//! Non-recursive table-driven parsing. The driver simulates the push-down
//! automaton for a start symbol, a [`PredictiveTable`] and a terminal stream,
//! and records one [`Configuration`] per move.
//!
//! The stack starts as `[$, start]` and the input as `tokens ++ [$]`. On each
//! move the top of the stack is either matched against the next input
//! terminal or, if it is a nonterminal, replaced by the right-hand side of the
//! production in `M[top, lookahead]`, pushed in reverse so that its first
//! symbol ends up on top. Parsing succeeds when `$` on the stack meets `$` in
//! the input.
//!
//! ```rust
//! use lltrace::driver::drive;
//! use lltrace::testing::{arithmetic_table, start_symbol, terminals};
//!
//! let table = arithmetic_table();
//! let trace = drive(&start_symbol(), &table, &terminals("id + id").unwrap()).unwrap();
//! assert!(trace.is_accepted());
//! assert_eq!(trace[0].step(), 0);
//! ```

mod config;
mod stack;
mod trace;

pub use config::DriverConfig;
pub use stack::{Iter as StackIter, SymbolStack};
pub use trace::{Configuration, ConfigurationRecord, RemainingInput, Trace};

use crate::error::{CellState, DriveError};
use crate::grammar::{Lookahead, NonTerminal, PredictiveTable, Production, Symbol, TableEntry, Terminal};
use std::sync::Arc;

/// A borrowed table plus driver settings.
#[derive(Debug, Clone)]
pub struct PredictiveDriver<'t> {
    table: &'t PredictiveTable,
    config: DriverConfig,
}

impl<'t> PredictiveDriver<'t> {
    /// Create a driver over `table` with the default configuration.
    #[must_use]
    pub fn new(table: &'t PredictiveTable) -> Self {
        Self {
            table,
            config: DriverConfig::default(),
        }
    }

    /// Replace the driver configuration.
    #[must_use]
    pub const fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// The table this driver reads.
    #[must_use]
    pub const fn table(&self) -> &'t PredictiveTable {
        self.table
    }

    /// The driver configuration.
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run the automaton to acceptance and return the whole trace.
    ///
    /// # Errors
    ///
    /// Fails on the first mismatch, missing row, unusable cell or when the
    /// step ceiling is reached. No partial trace is returned.
    pub fn drive(&self, start: &NonTerminal, tokens: &[Terminal]) -> Result<Trace, DriveError> {
        self.run(start, tokens)
            .inspect(|trace| log::debug!("accepted {} tokens in {} steps", tokens.len(), trace.len() - 1))
            .inspect_err(|e| log::debug!("rejected: {e}"))
    }

    fn run(&self, start: &NonTerminal, tokens: &[Terminal]) -> Result<Trace, DriveError> {
        let buffer: Arc<[Lookahead]> = tokens
            .iter()
            .cloned()
            .map(Lookahead::Terminal)
            .chain(std::iter::once(Lookahead::End))
            .collect();
        let mut input = RemainingInput::new(buffer, 0);
        let mut stack = SymbolStack::from_bottom([Symbol::EndMarker, Symbol::NonTerminal(start.clone())]);

        let mut trace = Trace::new();
        let mut step = 0;
        self.emit(&mut trace, step, &stack, &input, None);

        while let Some(top) = stack.top().cloned() {
            // Reading past the buffer keeps returning the end marker.
            let current = input.front().cloned().unwrap_or(Lookahead::End);

            if top.is_end_marker() && current.is_end() {
                break;
            }

            step += 1;

            match top {
                Symbol::NonTerminal(nonterminal) => {
                    let production = self.select(&nonterminal, &current, input.position())?;
                    self.check_limit(step)?;
                    stack.pop();
                    for symbol in production.expansion().rev() {
                        stack.push(symbol.clone());
                    }
                    self.emit(&mut trace, step, &stack, &input, Some(production.clone()));
                }
                expected => {
                    if !expected.matches(&current) {
                        return Err(DriveError::Mismatch {
                            position: input.position(),
                            expected,
                            found: current,
                        });
                    }
                    self.check_limit(step)?;
                    stack.pop();
                    input.advance();
                    self.emit(&mut trace, step, &stack, &input, None);
                }
            }
        }

        Ok(trace)
    }

    /// Fail if emitting configuration `step` would pass the ceiling. Only
    /// moves that succeed count, so a failing move keeps its own error.
    fn check_limit(&self, step: usize) -> Result<(), DriveError> {
        match self.config.max_steps {
            Some(limit) if step > limit => Err(DriveError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Look up `M[nonterminal, lookahead]`.
    fn select(
        &self,
        nonterminal: &NonTerminal,
        lookahead: &Lookahead,
        position: usize,
    ) -> Result<&'t Production, DriveError> {
        let table: &'t PredictiveTable = self.table;
        let row = table.row(nonterminal).ok_or_else(|| DriveError::MissingRow {
            nonterminal: nonterminal.clone(),
        })?;

        let cell = match row.entry(lookahead) {
            Some(TableEntry::Production(production)) => return Ok(production),
            Some(TableEntry::Error) => CellState::Error,
            None => CellState::Absent,
        };

        Err(DriveError::NoEntry {
            position,
            nonterminal: nonterminal.clone(),
            lookahead: lookahead.clone(),
            cell,
        })
    }

    fn emit(
        &self,
        trace: &mut Trace,
        step: usize,
        stack: &SymbolStack,
        input: &RemainingInput,
        production: Option<Production>,
    ) {
        match &production {
            Some(p) => log::trace!("step {step}: apply {p}, stack={stack:?}"),
            None => log::trace!("step {step}: input@{}, stack={stack:?}", input.position()),
        }
        trace.push(Configuration::new(step, stack.clone(), input.clone(), production));
    }
}

/// Drive `tokens` from `start` with the default configuration.
///
/// # Errors
///
/// See [`PredictiveDriver::drive`].
pub fn drive(start: &NonTerminal, table: &PredictiveTable, tokens: &[Terminal]) -> Result<Trace, DriveError> {
    PredictiveDriver::new(table).drive(start, tokens)
}

/// Drive `tokens` from `start` with an explicit configuration.
///
/// # Errors
///
/// See [`PredictiveDriver::drive`].
pub fn drive_with_config(
    start: &NonTerminal,
    table: &PredictiveTable,
    tokens: &[Terminal],
    config: DriverConfig,
) -> Result<Trace, DriveError> {
    PredictiveDriver::new(table).with_config(config).drive(start, tokens)
}
