//! Result codes returned by state handlers.

use super::state::State;

/// What a handler did with an event.
///
/// Instead of writing targets into a shared scratch slot, handlers return
/// them inside the variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response<S: State> {
    /// Event consumed, no transition.
    Handled,

    /// Event explicitly ignored. The root answers this for everything it
    /// does not recognize.
    Ignored,

    /// Not processed here; the dispatcher offers the event to the superstate.
    Unhandled,

    /// Transition requested to the given target.
    Transition(S),

    /// Transition requested back to the state that was current before the
    /// most recent transition.
    TransitionLast,

    /// Answer to a [`Signal::EMPTY`](super::Signal::EMPTY) probe: the
    /// immediate superstate.
    Super(S),
}

impl<S: State> Response<S> {
    /// Whether the handler requested any kind of transition.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transition(_) | Self::TransitionLast)
    }
}
