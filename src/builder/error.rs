//! Build errors for machine builders.

use crate::validation::HierarchyViolation;
use thiserror::Error;

/// Errors that can occur when building state machines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Chart not specified. Call .chart(chart) before .build()")]
    MissingChart,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Hierarchy is malformed ({} violation(s))", .0.len())]
    InvalidHierarchy(Vec<HierarchyViolation>),
}
