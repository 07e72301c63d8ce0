use crate::error::GrammarError;
use crate::grammar::{NonTerminal, Symbol};
use smallvec::{SmallVec, smallvec};
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Right-hand side storage; most productions are short.
pub type ProductionRhs = SmallVec<[Symbol; 4]>;

/// A rewrite rule `A → α`.
///
/// An empty expansion is stored as the single symbol `ε`; `ε` never appears
/// next to other symbols and `$` never appears at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Production {
    left: NonTerminal,
    right: ProductionRhs,
}

impl Production {
    /// Create a production, normalizing an empty right-hand side to `[ε]`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptySymbol`] for a symbol with empty text,
    /// [`GrammarError::MixedEpsilon`] when `ε` appears alongside other
    /// symbols and [`GrammarError::EndMarkerInProduction`] when `$` appears.
    pub fn new<I>(left: NonTerminal, right: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let right: ProductionRhs = right.into_iter().map(Into::into).collect();

        if right.iter().any(|symbol| symbol.as_str().is_empty()) {
            return Err(GrammarError::EmptySymbol);
        }
        if right.iter().any(Symbol::is_end_marker) {
            return Err(GrammarError::EndMarkerInProduction { left });
        }
        if right.len() > 1 && right.iter().any(Symbol::is_epsilon) {
            return Err(GrammarError::MixedEpsilon { left });
        }
        if right.is_empty() {
            return Ok(Self::epsilon(left));
        }

        Ok(Self { left, right })
    }

    /// `left → ε`
    #[must_use]
    pub fn epsilon(left: NonTerminal) -> Self {
        Self {
            left,
            right: smallvec![Symbol::Epsilon],
        }
    }

    /// The nonterminal being rewritten.
    #[must_use]
    pub const fn left(&self) -> &NonTerminal {
        &self.left
    }

    /// The right-hand side as stored, `[ε]` for an empty expansion.
    #[must_use]
    pub fn right(&self) -> &[Symbol] {
        &self.right
    }

    /// Whether the right-hand side is exactly `[ε]`.
    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        matches!(self.right.as_slice(), [Symbol::Epsilon])
    }

    /// Right-hand symbols that actually occupy stack slots (and tree children).
    pub fn expansion(&self) -> impl DoubleEndedIterator<Item = &Symbol> + ExactSizeIterator {
        let symbols: &[Symbol] = if self.is_epsilon() { &[] } else { &self.right };
        symbols.iter()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} →", self.left)?;
        for symbol in &self.right {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}
