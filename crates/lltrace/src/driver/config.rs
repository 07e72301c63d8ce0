/// Configuration for the predictive driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverConfig {
    /// Maximum number of moves after the initial configuration.
    ///
    /// `None` runs until acceptance or error. A table that expands without
    /// consuming input never terminates on its own, so callers that take
    /// tables from outside should set a ceiling.
    pub max_steps: Option<usize>,
}

impl DriverConfig {
    /// Unlimited configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_steps: None }
    }

    /// Stop after `max_steps` moves.
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Remove the step ceiling.
    #[must_use]
    pub const fn unlimited(mut self) -> Self {
        self.max_steps = None;
        self
    }
}
