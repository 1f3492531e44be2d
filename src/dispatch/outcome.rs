//! Ordinary results of a dispatch.

use crate::core::State;

/// Result of dispatching one event.
///
/// None of these are failures: an ignored event simply leaves the machine
/// where it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome<S: State> {
    /// Consumed by `by` without a state change.
    Handled { by: S },

    /// Nobody up to the root wanted the event. State unchanged.
    Ignored,

    /// Moved from stable state `from` to stable state `to`. `source` is the
    /// state whose handler requested the transition.
    Transitioned { from: S, to: S, source: S },
}

impl<S: State> DispatchOutcome<S> {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}
