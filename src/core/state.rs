//! State identities and the handler traits that give them behavior.
//!
//! A state is a plain value (usually a field-less enum variant). Equality of
//! two values means "same state". All behavior lives in a [`Chart`], which
//! dispatches on the state value with a single `match`.

use super::event::Event;
use super::response::Response;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identities.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: states are compared and stored in fixed-size
///   path buffers during transitions
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: transition history is serializable
///
/// # Example
///
/// ```rust
/// use smcore::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Top,
///     Closed,
///     Open,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Top => "Top",
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// The behavior of every state in one machine.
///
/// `handle` is invoked for real events and for the pseudo-events
/// `ENTRY`, `EXIT`, `INIT` and `EMPTY`. It must not dispatch events to its
/// own machine.
///
/// - `ENTRY`/`EXIT`: perform side effects, answer `Handled` or `Ignored`
/// - `EMPTY`: answer `Super(parent)`; the root is never asked
/// - `INIT`: answer `Transition(substate)` or decline with anything else
/// - user signals: `Handled`, `Ignored`, `Unhandled` or a transition
pub trait Chart {
    type State: State;
    type Payload;

    fn handle(&mut self, state: Self::State, event: &Event<Self::Payload>)
        -> Response<Self::State>;
}

/// A chart whose states nest under a single root.
pub trait Hierarchy: Chart {
    /// The root state. Its handler answers `Ignored` for anything it does
    /// not handle itself.
    fn top(&self) -> Self::State;
}
