use crate::error::GrammarError;
use crate::grammar::{Lookahead, NonTerminal, Production, Symbol};
use ahash::RandomState;
use hashbrown::HashMap;

/// One cell of the predictive table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEntry {
    /// Expand the row's nonterminal with this production.
    Production(Production),
    /// Explicit error marker.
    Error,
}

impl TableEntry {
    /// The production in this cell, `None` for an error marker.
    #[must_use]
    pub const fn production(&self) -> Option<&Production> {
        match self {
            Self::Production(p) => Some(p),
            Self::Error => None,
        }
    }

    /// Whether this cell is an explicit error marker.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl From<Production> for TableEntry {
    fn from(production: Production) -> Self {
        Self::Production(production)
    }
}

/// The cells of one nonterminal, keyed by lookahead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    entries: HashMap<Lookahead, TableEntry, RandomState>,
}

impl TableRow {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell for `lookahead`, if any.
    #[must_use]
    pub fn entry(&self, lookahead: &Lookahead) -> Option<&TableEntry> {
        self.entries.get(lookahead)
    }

    /// Set a cell, returning the entry it replaced.
    pub fn insert(&mut self, lookahead: Lookahead, entry: TableEntry) -> Option<TableEntry> {
        self.entries.insert(lookahead, entry)
    }

    /// Iterate over the cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Lookahead, &TableEntry)> {
        self.entries.iter()
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Predictive parsing table: `M[nonterminal][lookahead]`.
///
/// The table is taken as given. Nothing here checks that it is complete or
/// conflict-free; a bad table shows up as an error while driving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictiveTable {
    rows: HashMap<NonTerminal, TableRow, RandomState>,
}

impl PredictiveTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a table from symbol text.
    #[must_use]
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// The row for `nonterminal`, if the table has one.
    #[must_use]
    pub fn row(&self, nonterminal: &NonTerminal) -> Option<&TableRow> {
        self.rows.get(nonterminal)
    }

    /// Whether the table has a row for `nonterminal`.
    #[must_use]
    pub fn contains_row(&self, nonterminal: &NonTerminal) -> bool {
        self.rows.contains_key(nonterminal)
    }

    /// The cell `M[nonterminal, lookahead]`, if any.
    #[must_use]
    pub fn entry(&self, nonterminal: &NonTerminal, lookahead: &Lookahead) -> Option<&TableEntry> {
        self.row(nonterminal)?.entry(lookahead)
    }

    /// The production in a cell, if the cell holds one.
    #[must_use]
    pub fn production(&self, nonterminal: &NonTerminal, lookahead: &Lookahead) -> Option<&Production> {
        self.entry(nonterminal, lookahead)?.production()
    }

    /// Make sure a row exists, even if it stays empty.
    pub fn row_mut(&mut self, nonterminal: NonTerminal) -> &mut TableRow {
        self.rows.entry(nonterminal).or_default()
    }

    /// Set a cell, creating the row if needed. Returns the replaced entry.
    pub fn insert(
        &mut self,
        nonterminal: NonTerminal,
        lookahead: Lookahead,
        entry: TableEntry,
    ) -> Option<TableEntry> {
        self.row_mut(nonterminal).insert(lookahead, entry)
    }

    /// Iterate over the rows in no particular order.
    pub fn rows(&self) -> impl Iterator<Item = (&NonTerminal, &TableRow)> {
        self.rows.iter()
    }

    /// Every cell, sorted by nonterminal then lookahead.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&NonTerminal, &Lookahead, &TableEntry)> {
        let mut cells: Vec<_> = self
            .rows
            .iter()
            .flat_map(|(nt, row)| row.iter().map(move |(la, entry)| (nt, la, entry)))
            .collect();
        cells.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        cells
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds a [`PredictiveTable`] from symbol text.
///
/// Each piece of text is classified by the naming convention. The first
/// classification error is kept and returned from [`TableBuilder::build`].
///
/// ```rust
/// use lltrace::grammar::PredictiveTable;
///
/// let table = PredictiveTable::builder()
///     .entry("S", "a", ["a", "S"])
///     .entry("S", "$", ["ε"])
///     .error("S", "b")
///     .build()
///     .unwrap();
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: PredictiveTable,
    error: Option<GrammarError>,
}

impl TableBuilder {
    /// Create a builder for an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `M[left, lookahead] = left → right`.
    #[must_use]
    pub fn entry<I>(mut self, left: &str, lookahead: &str, right: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.error.is_some() {
            return self;
        }
        let cell = NonTerminal::new(left).and_then(|nt| {
            let lookahead = Lookahead::parse(lookahead)?;
            let production =
                Production::new(nt.clone(), right.into_iter().map(|s| Symbol::classify(s.as_ref())))?;
            Ok((nt, lookahead, production))
        });
        match cell {
            Ok((nt, lookahead, production)) => {
                self.table.insert(nt, lookahead, production.into());
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Add an explicit error marker at `M[left, lookahead]`.
    #[must_use]
    pub fn error(mut self, left: &str, lookahead: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match NonTerminal::new(left).and_then(|nt| Ok((nt, Lookahead::parse(lookahead)?))) {
            Ok((nt, lookahead)) => {
                self.table.insert(nt, lookahead, TableEntry::Error);
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Add a row with no cells.
    #[must_use]
    pub fn row(mut self, left: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match NonTerminal::new(left) {
            Ok(nt) => {
                self.table.row_mut(nt);
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Finish the table.
    ///
    /// # Errors
    ///
    /// Returns the first symbol classification or production error met while
    /// adding cells.
    pub fn build(self) -> Result<PredictiveTable, GrammarError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(text: &str) -> NonTerminal {
        NonTerminal::new(text).unwrap()
    }

    fn la(text: &str) -> Lookahead {
        Lookahead::parse(text).unwrap()
    }

    #[test]
    fn absent_row_cell_and_error_are_distinct() {
        let table = PredictiveTable::builder()
            .entry("S", "a", ["a"])
            .error("S", "b")
            .build()
            .unwrap();

        assert!(table.row(&nt("X")).is_none());
        assert!(table.entry(&nt("S"), &la("c")).is_none());
        assert_eq!(table.entry(&nt("S"), &la("b")), Some(&TableEntry::Error));
        assert!(table.production(&nt("S"), &la("b")).is_none());
        assert_eq!(
            table.production(&nt("S"), &la("a")).map(ToString::to_string),
            Some("S → a".to_string())
        );
    }

    #[test]
    fn builder_reports_first_error() {
        let err = PredictiveTable::builder()
            .entry("s", "a", ["a"])
            .entry("S", "E", ["a"])
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::NotANonTerminal(_)));

        let err = PredictiveTable::builder()
            .entry("S", "E", ["a"])
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::NotATerminal(_)));

        let err = PredictiveTable::builder()
            .entry("S", "ε", ["a"])
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::ReservedSymbol(_)));
    }

    #[test]
    fn builder_rejects_empty_right_side_symbols() {
        let err = PredictiveTable::builder()
            .entry("S", "a", ["a", ""])
            .build()
            .unwrap_err();
        assert_eq!(err, GrammarError::EmptySymbol);
    }

    #[test]
    fn later_entries_replace_earlier_ones() {
        let table = PredictiveTable::builder()
            .entry("S", "a", ["a"])
            .error("S", "a")
            .build()
            .unwrap();
        assert_eq!(table.entry(&nt("S"), &la("a")), Some(&TableEntry::Error));
        assert_eq!(table.row(&nt("S")).map(TableRow::len), Some(1));
    }

    #[test]
    fn empty_rows_are_kept() {
        let table = PredictiveTable::builder().row("S").build().unwrap();
        assert!(table.contains_row(&nt("S")));
        assert!(table.row(&nt("S")).is_some_and(TableRow::is_empty));
    }

    #[test]
    fn sorted_entries_are_ordered() {
        let table = PredictiveTable::builder()
            .entry("T", "b", ["b"])
            .entry("S", "b", ["T"])
            .entry("S", "a", ["a"])
            .build()
            .unwrap();
        let cells: Vec<String> = table
            .sorted_entries()
            .into_iter()
            .map(|(n, l, _)| format!("{n}/{l}"))
            .collect();
        assert_eq!(cells, ["S/a", "S/b", "T/b"]);
    }
}
