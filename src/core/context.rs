//! Per-machine state slots.

use super::state::State;

/// The three state slots of one machine instance.
///
/// `current` is the single source of truth for "which state am I in" and is
/// only meaningful while the machine is stable (`current == next`). `next`
/// tracks the in-flight target while a transition resolves. `last` holds the
/// state that was current before the most recent transition.
///
/// A context is never stable before its machine has started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context<S: State> {
    pub(crate) current: S,
    pub(crate) next: S,
    pub(crate) last: Option<S>,
    settled: bool,
}

impl<S: State> Context<S> {
    /// A context resting in `current` that has been asked to move to `next`.
    /// Machines are created this way, with the initial pseudo-state pending.
    pub(crate) fn pending(current: S, next: S) -> Self {
        Self {
            current,
            next,
            last: None,
            settled: false,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn next(&self) -> S {
        self.next
    }

    pub fn last(&self) -> Option<S> {
        self.last
    }

    /// True between dispatches.
    pub fn is_stable(&self) -> bool {
        self.settled && self.current == self.next
    }

    pub(crate) fn settle(&mut self, state: S) {
        self.current = state;
        self.next = state;
        self.settled = true;
    }
}
