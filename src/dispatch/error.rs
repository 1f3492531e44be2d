//! Errors raised by the dispatchers.

use thiserror::Error;

/// Consistency violations detected while starting or dispatching.
///
/// These indicate a malformed hierarchy or driver misuse, not ordinary
/// outcomes: ignored and unhandled events are reported through
/// [`DispatchOutcome`](super::DispatchOutcome) instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Machine has not been started. Call .start() before .dispatch()")]
    NotStarted,

    #[error("Machine has already been started")]
    AlreadyStarted,

    #[error("Machine is not stable (current '{current}', next '{next}')")]
    Unstable { current: String, next: String },

    #[error("Initial pseudo-state '{initial}' did not request a transition")]
    InitialNotTransition { initial: String },

    #[error("Nesting depth limit ({limit}) exceeded while walking from '{state}'")]
    NestingTooDeep { state: String, limit: usize },

    #[error("State '{state}' did not report a superstate")]
    MissingSuperstate { state: String },

    #[error("Initial transition of '{state}' targets '{target}', which is not nested inside it")]
    InitialTargetNotNested { state: String, target: String },

    #[error("State '{source_state}' requested a transition to the root state")]
    TransitionToTop { source_state: String },
}
