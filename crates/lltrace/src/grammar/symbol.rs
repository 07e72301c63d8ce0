use crate::error::GrammarError;
use compact_str::CompactString;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Text of the end-of-input marker.
pub const END_MARKER: &str = "$";

/// Text of the empty-production marker.
pub const EPSILON: &str = "ε";

/// Returns `true` when `text` names a terminal under the naming convention:
/// anything whose first character is not an uppercase ASCII letter.
///
/// The empty string has no first character and is *not* a terminal.
#[must_use]
pub fn is_terminal_text(text: &str) -> bool {
    text.chars().next().is_some_and(|c| !c.is_ascii_uppercase())
}

/// A terminal symbol: matched literally against the input, never expanded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(into = "CompactString", try_from = "CompactString")
)]
pub struct Terminal(CompactString);

impl Terminal {
    /// Create a terminal from its text.
    ///
    /// # Errors
    ///
    /// Fails when the text is empty, is one of the reserved markers (`$`, `ε`),
    /// or starts with an uppercase ASCII letter.
    pub fn new(text: impl Into<CompactString>) -> Result<Self, GrammarError> {
        let text = text.into();
        if text.is_empty() {
            return Err(GrammarError::EmptySymbol);
        }
        if text == END_MARKER || text == EPSILON {
            return Err(GrammarError::ReservedSymbol(text));
        }
        if !is_terminal_text(&text) {
            return Err(GrammarError::NotATerminal(text));
        }
        Ok(Self(text))
    }

    /// The terminal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<CompactString> for Terminal {
    type Error = GrammarError;

    fn try_from(text: CompactString) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl TryFrom<&str> for Terminal {
    type Error = GrammarError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<Terminal> for CompactString {
    fn from(terminal: Terminal) -> Self {
        terminal.0
    }
}

/// A nonterminal symbol: expanded through the parsing table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(into = "CompactString", try_from = "CompactString")
)]
pub struct NonTerminal(CompactString);

impl NonTerminal {
    /// Create a nonterminal from its text.
    ///
    /// # Errors
    ///
    /// Fails when the text is empty or does not start with an uppercase ASCII
    /// letter.
    pub fn new(text: impl Into<CompactString>) -> Result<Self, GrammarError> {
        let text = text.into();
        if text.is_empty() {
            return Err(GrammarError::EmptySymbol);
        }
        if is_terminal_text(&text) {
            return Err(GrammarError::NotANonTerminal(text));
        }
        Ok(Self(text))
    }

    /// The nonterminal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<CompactString> for NonTerminal {
    type Error = GrammarError;

    fn try_from(text: CompactString) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl TryFrom<&str> for NonTerminal {
    type Error = GrammarError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<NonTerminal> for CompactString {
    fn from(nonterminal: NonTerminal) -> Self {
        nonterminal.0
    }
}

/// A grammar symbol, tagged once when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(into = "CompactString", from = "CompactString")
)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    /// `$`, bottom of the stack and end of the input.
    EndMarker,
    /// `ε`, only ever the sole symbol of an empty right-hand side.
    Epsilon,
}

impl Symbol {
    /// Classify symbol text with the naming convention.
    ///
    /// `$` and `ε` become the markers, text starting with an uppercase ASCII
    /// letter (and the empty string) becomes a nonterminal, everything else a
    /// terminal.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        match text {
            END_MARKER => Self::EndMarker,
            EPSILON => Self::Epsilon,
            _ if is_terminal_text(text) => Self::Terminal(Terminal(text.into())),
            _ => Self::NonTerminal(NonTerminal(text.into())),
        }
    }

    /// The classification predicate: `true` for terminals and for both
    /// markers, whose text does not start with an uppercase letter.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.is_nonterminal()
    }

    /// Whether this is a nonterminal.
    #[must_use]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Self::NonTerminal(_))
    }

    /// Whether this is the end marker `$`.
    #[must_use]
    pub const fn is_end_marker(&self) -> bool {
        matches!(self, Self::EndMarker)
    }

    /// Whether this is the empty marker `ε`.
    #[must_use]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Self::Epsilon)
    }

    /// The symbol text, markers included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Terminal(t) => t.as_str(),
            Self::NonTerminal(n) => n.as_str(),
            Self::EndMarker => END_MARKER,
            Self::Epsilon => EPSILON,
        }
    }

    /// The nonterminal this symbol names, if any.
    #[must_use]
    pub const fn as_nonterminal(&self) -> Option<&NonTerminal> {
        match self {
            Self::NonTerminal(n) => Some(n),
            _ => None,
        }
    }

    /// The lookahead this symbol can be compared against, if any.
    #[must_use]
    pub fn as_lookahead(&self) -> Option<Lookahead> {
        match self {
            Self::Terminal(t) => Some(Lookahead::Terminal(t.clone())),
            Self::EndMarker => Some(Lookahead::End),
            Self::NonTerminal(_) | Self::Epsilon => None,
        }
    }

    /// Whether this stack symbol is matched by the lookahead.
    #[must_use]
    pub fn matches(&self, lookahead: &Lookahead) -> bool {
        match (self, lookahead) {
            (Self::Terminal(t), Lookahead::Terminal(u)) => t == u,
            (Self::EndMarker, Lookahead::End) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Self::classify(text)
    }
}

impl From<CompactString> for Symbol {
    fn from(text: CompactString) -> Self {
        Self::classify(&text)
    }
}

impl From<Symbol> for CompactString {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Terminal(t) => t.0,
            Symbol::NonTerminal(n) => n.0,
            Symbol::EndMarker => CompactString::new(END_MARKER),
            Symbol::Epsilon => CompactString::new(EPSILON),
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Self::Terminal(terminal)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(nonterminal: NonTerminal) -> Self {
        Self::NonTerminal(nonterminal)
    }
}

impl From<Lookahead> for Symbol {
    fn from(lookahead: Lookahead) -> Self {
        match lookahead {
            Lookahead::Terminal(t) => Self::Terminal(t),
            Lookahead::End => Self::EndMarker,
        }
    }
}

/// What the input pointer can see: a terminal, or the end marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(into = "CompactString", try_from = "CompactString")
)]
pub enum Lookahead {
    Terminal(Terminal),
    End,
}

impl Lookahead {
    /// Parse table-column text: `$` or a terminal.
    ///
    /// # Errors
    ///
    /// Fails for `ε`, the empty string and nonterminal text.
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        if text == END_MARKER {
            Ok(Self::End)
        } else {
            Terminal::new(text).map(Self::Terminal)
        }
    }

    /// Whether this is the end of the input.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// The terminal, unless this is the end.
    #[must_use]
    pub const fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Self::Terminal(t) => Some(t),
            Self::End => None,
        }
    }

    /// The lookahead text, `$` for the end.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Terminal(t) => t.as_str(),
            Self::End => END_MARKER,
        }
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Terminal> for Lookahead {
    fn from(terminal: Terminal) -> Self {
        Self::Terminal(terminal)
    }
}

impl TryFrom<CompactString> for Lookahead {
    type Error = GrammarError;

    fn try_from(text: CompactString) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<Lookahead> for CompactString {
    fn from(lookahead: Lookahead) -> Self {
        CompactString::from(Symbol::from(lookahead))
    }
}
