//! Hierarchy violations.

use thiserror::Error;

/// A defect in a state hierarchy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HierarchyViolation {
    #[error("State '{state}' does not report a superstate")]
    MissingSuperstate { state: String },

    #[error("State '{state}' reports itself as its own superstate")]
    SelfParent { state: String },

    #[error("Superstate chain of '{state}' loops back to '{repeated}'")]
    Cycle { state: String, repeated: String },

    #[error("State '{state}' is nested deeper than the limit ({limit})")]
    TooDeep { state: String, limit: usize },
}
