//! Builders for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Chart, Hierarchy};
use crate::dispatch::{Fsm, Hsm};
use crate::validation::{validate_hierarchy, HierarchyViolation};
use stillwater::validation::Validation;

/// Builder for hierarchical machines with a fluent API.
///
/// When `.states(..)` is given, `build` probes each listed state's
/// superstate chain and refuses to build a malformed hierarchy.
pub struct HsmBuilder<C: Hierarchy> {
    chart: Option<C>,
    initial: Option<C::State>,
    states: Vec<C::State>,
    record_history: bool,
}

impl<C: Hierarchy> HsmBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            chart: None,
            initial: None,
            states: Vec::new(),
            record_history: false,
        }
    }

    /// Set the chart providing state behavior (required).
    pub fn chart(mut self, chart: C) -> Self {
        self.chart = Some(chart);
        self
    }

    /// Set the initial pseudo-state (required).
    pub fn initial(mut self, state: C::State) -> Self {
        self.initial = Some(state);
        self
    }

    /// States whose superstate chains are validated at build time.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = C::State>,
    {
        self.states.extend(states);
        self
    }

    /// Record completed transitions (off by default).
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Build with the default nesting limit.
    pub fn build(self) -> Result<Hsm<C>, BuildError> {
        self.build_with_limit()
    }

    /// Build with nesting limit `DEPTH`.
    pub fn build_with_limit<const DEPTH: usize>(self) -> Result<Hsm<C, DEPTH>, BuildError> {
        let mut chart = self.chart.ok_or(BuildError::MissingChart)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if !self.states.is_empty() {
            if let Validation::Failure(violations) =
                validate_hierarchy(&mut chart, &self.states, DEPTH)
            {
                let violations: Vec<HierarchyViolation> = violations.iter().cloned().collect();
                return Err(BuildError::InvalidHierarchy(violations));
            }
        }

        let machine = Hsm::with_nesting_limit(chart, initial);
        Ok(if self.record_history {
            machine.with_history()
        } else {
            machine
        })
    }
}

impl<C: Hierarchy> Default for HsmBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for flat machines.
pub struct FsmBuilder<C: Chart> {
    chart: Option<C>,
    initial: Option<C::State>,
    record_history: bool,
}

impl<C: Chart> FsmBuilder<C> {
    pub fn new() -> Self {
        Self {
            chart: None,
            initial: None,
            record_history: false,
        }
    }

    pub fn chart(mut self, chart: C) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn initial(mut self, state: C::State) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn build(self) -> Result<Fsm<C>, BuildError> {
        let chart = self.chart.ok_or(BuildError::MissingChart)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let machine = Fsm::new(chart, initial);
        Ok(if self.record_history {
            machine.with_history()
        } else {
            machine
        })
    }
}

impl<C: Chart> Default for FsmBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
