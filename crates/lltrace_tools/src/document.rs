//! JSON table documents
//!
//! ```json
//! {
//!   "start": "S",
//!   "table": {
//!     "S": { "a": ["a", "S"], "$": ["ε"], "b": "error" }
//!   }
//! }
//! ```

use lltrace::error::GrammarError;
use lltrace::grammar::{PredictiveTable, TableEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parsing table as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    /// Default start symbol, overridable from the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Rows keyed by nonterminal, cells keyed by lookahead.
    pub table: BTreeMap<String, BTreeMap<String, CellDocument>>,
}

/// One cell: the right-hand side of a production, or the `"error"` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellDocument {
    Production(Vec<String>),
    Marker(Marker),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    #[serde(rename = "error")]
    Error,
}

impl TableDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the JSON error for malformed text or an unknown cell shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build the predictive table.
    ///
    /// # Errors
    ///
    /// Fails on the first row key, lookahead or production symbol that does
    /// not classify the way its position requires.
    pub fn to_table(&self) -> Result<PredictiveTable, GrammarError> {
        let mut builder = PredictiveTable::builder();
        for (left, cells) in &self.table {
            builder = builder.row(left);
            for (lookahead, cell) in cells {
                builder = match cell {
                    CellDocument::Production(right) => builder.entry(left, lookahead, right),
                    CellDocument::Marker(Marker::Error) => builder.error(left, lookahead),
                };
            }
        }
        builder.build()
    }

    /// Write a table back out as a document.
    #[must_use]
    pub fn from_table(start: Option<&str>, table: &PredictiveTable) -> Self {
        let mut rows: BTreeMap<String, BTreeMap<String, CellDocument>> = table
            .rows()
            .map(|(left, _)| (left.to_string(), BTreeMap::new()))
            .collect();

        for (left, lookahead, entry) in table.sorted_entries() {
            let cell = match entry {
                TableEntry::Production(production) => CellDocument::Production(
                    production.right().iter().map(ToString::to_string).collect(),
                ),
                TableEntry::Error => CellDocument::Marker(Marker::Error),
            };
            rows.entry(left.to_string())
                .or_default()
                .insert(lookahead.to_string(), cell);
        }

        Self {
            start: start.map(str::to_string),
            table: rows,
        }
    }
}
