use crate::driver::SymbolStack;
use crate::grammar::{Lookahead, Production, Symbol};
use std::ops::Index;
use std::sync::Arc;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The unread part of the input: a shared buffer of `tokens ++ [$]` and the
/// position of the input pointer.
#[derive(Debug, Clone)]
pub struct RemainingInput {
    buffer: Arc<[Lookahead]>,
    offset: usize,
}

impl RemainingInput {
    /// Wrap an already terminated buffer. `offset` is clamped to its length.
    #[must_use]
    pub fn new(buffer: Arc<[Lookahead]>, offset: usize) -> Self {
        let offset = offset.min(buffer.len());
        Self { buffer, offset }
    }

    /// Position of the input pointer in `tokens ++ [$]`.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.offset
    }

    /// The unread tokens, next token first.
    #[must_use]
    pub fn as_slice(&self) -> &[Lookahead] {
        &self.buffer[self.offset..]
    }

    /// The next token, if any.
    #[must_use]
    pub fn front(&self) -> Option<&Lookahead> {
        self.buffer.get(self.offset)
    }

    /// Number of unread tokens, `$` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Whether nothing, not even `$`, is left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn advance(&mut self) {
        if self.offset < self.buffer.len() {
            self.offset += 1;
        }
    }
}

impl PartialEq for RemainingInput {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for RemainingInput {}

/// One snapshot of the automaton.
///
/// Later moves of the driver never change a configuration that was already
/// emitted: the stack and input are shared, not aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    step: usize,
    stack: SymbolStack,
    input: RemainingInput,
    production: Option<Production>,
}

impl Configuration {
    /// Create a configuration from shared parts.
    #[must_use]
    pub const fn new(
        step: usize,
        stack: SymbolStack,
        input: RemainingInput,
        production: Option<Production>,
    ) -> Self {
        Self {
            step,
            stack,
            input,
            production,
        }
    }

    /// Build a configuration from plain symbol lists (stack bottom first,
    /// input next token first).
    #[must_use]
    pub fn from_parts(
        step: usize,
        stack: Vec<Symbol>,
        input: Vec<Lookahead>,
        production: Option<Production>,
    ) -> Self {
        Self {
            step,
            stack: SymbolStack::from_bottom(stack),
            input: RemainingInput::new(input.into(), 0),
            production,
        }
    }

    /// Step number, 0 for the initial configuration.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// The stack, top first when iterated.
    #[must_use]
    pub const fn stack(&self) -> &SymbolStack {
        &self.stack
    }

    /// The unread input at this step.
    #[must_use]
    pub const fn input(&self) -> &RemainingInput {
        &self.input
    }

    /// Production applied to reach this configuration, `None` for the initial
    /// configuration and for terminal matches.
    #[must_use]
    pub const fn production(&self) -> Option<&Production> {
        self.production.as_ref()
    }

    /// Whether this configuration came from matching a terminal.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.step > 0 && self.production.is_none()
    }

    /// Stack `[$]` against input `[$]`: the accepting configuration.
    #[must_use]
    pub fn is_accepting(&self) -> bool {
        self.stack.len() == 1
            && self.stack.top().is_some_and(Symbol::is_end_marker)
            && matches!(self.input.as_slice(), [Lookahead::End])
    }

    /// A plain copy for rendering or serialization.
    #[must_use]
    pub fn to_record(&self) -> ConfigurationRecord {
        ConfigurationRecord {
            step: self.step,
            stack: self.stack.to_vec(),
            input: self.input.as_slice().to_vec(),
            production: self.production.clone(),
        }
    }
}

/// A configuration copied into plain vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ConfigurationRecord {
    pub step: usize,
    /// Bottom first.
    pub stack: Vec<Symbol>,
    /// Next token first.
    pub input: Vec<Lookahead>,
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Option::is_none"))]
    pub production: Option<Production>,
}

impl From<ConfigurationRecord> for Configuration {
    fn from(record: ConfigurationRecord) -> Self {
        Self::from_parts(record.step, record.stack, record.input, record.production)
    }
}

/// The ordered derivation log produced by the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    configurations: Vec<Configuration>,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            configurations: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, configuration: Configuration) {
        self.configurations.push(configuration);
    }

    /// The configurations in step order.
    #[must_use]
    pub fn as_slice(&self) -> &[Configuration] {
        &self.configurations
    }

    /// Take the configurations out of the trace.
    #[must_use]
    pub fn into_vec(self) -> Vec<Configuration> {
        self.configurations
    }

    /// Number of configurations, the initial one included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    /// Whether the trace holds no configurations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// The initial configuration.
    #[must_use]
    pub fn first(&self) -> Option<&Configuration> {
        self.configurations.first()
    }

    /// The last configuration emitted.
    #[must_use]
    pub fn last(&self) -> Option<&Configuration> {
        self.configurations.last()
    }

    /// Iterate over the configurations in step order.
    pub fn iter(&self) -> std::slice::Iter<'_, Configuration> {
        self.configurations.iter()
    }

    /// Productions in the order they were applied: the leftmost derivation.
    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.configurations.iter().filter_map(Configuration::production)
    }

    /// Whether the trace ends in the accepting configuration.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.last().is_some_and(Configuration::is_accepting)
    }

    /// Copy every configuration into a plain record.
    #[must_use]
    pub fn to_records(&self) -> Vec<ConfigurationRecord> {
        self.configurations.iter().map(Configuration::to_record).collect()
    }
}

impl From<Vec<Configuration>> for Trace {
    fn from(configurations: Vec<Configuration>) -> Self {
        Self { configurations }
    }
}

impl Index<usize> for Trace {
    type Output = Configuration;

    fn index(&self, index: usize) -> &Self::Output {
        &self.configurations[index]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Configuration;
    type IntoIter = std::slice::Iter<'a, Configuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configurations.iter()
    }
}

impl IntoIterator for Trace {
    type Item = Configuration;
    type IntoIter = std::vec::IntoIter<Configuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configurations.into_iter()
    }
}

impl AsRef<[Configuration]> for Trace {
    fn as_ref(&self) -> &[Configuration] {
        &self.configurations
    }
}
