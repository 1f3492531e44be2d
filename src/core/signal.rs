//! Signal codes identifying event categories.
//!
//! Negative values are reserved for the dispatcher's own pseudo-events.
//! User signals start at zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a raw value cannot be used as a user signal.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SignalError {
    #[error("Signal value {0} is reserved for pseudo-events")]
    Reserved(i32),
}

/// Integer discriminant of an event.
///
/// The four reserved pseudo-signals form the contract between the dispatcher
/// and every state handler:
///
/// - [`Signal::EMPTY`]: superstate probe, answered with `Response::Super`
/// - [`Signal::ENTRY`]: entry action
/// - [`Signal::EXIT`]: exit action
/// - [`Signal::INIT`]: initial transition into a substate
///
/// # Example
///
/// ```rust
/// use smcore::core::Signal;
///
/// const BUTTON: Signal = Signal::user(0);
/// const TIMEOUT: Signal = Signal::user(1);
///
/// assert!(!BUTTON.is_reserved());
/// assert_ne!(BUTTON, TIMEOUT);
/// assert!(Signal::ENTRY.is_reserved());
/// assert!(Signal::try_from(-2).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signal(i32);

impl Signal {
    pub const EMPTY: Signal = Signal(-4);
    pub const ENTRY: Signal = Signal(-3);
    pub const EXIT: Signal = Signal(-2);
    pub const INIT: Signal = Signal(-1);
    /// First user signal. Also the signal of the default start event.
    pub const USER: Signal = Signal(0);

    /// Create a user signal.
    ///
    /// Panics (at const evaluation time when used in a `const`) if `value`
    /// is negative.
    pub const fn user(value: i32) -> Self {
        assert!(value >= 0, "user signals must be non-negative");
        Signal(value)
    }

    /// Raw discriminant.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this is one of the dispatcher's pseudo-signals.
    pub const fn is_reserved(self) -> bool {
        self.0 < 0
    }
}

impl TryFrom<i32> for Signal {
    type Error = SignalError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value < 0 {
            Err(SignalError::Reserved(value))
        } else {
            Ok(Signal(value))
        }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EMPTY => f.write_str("EMPTY"),
            Self::ENTRY => f.write_str("ENTRY"),
            Self::EXIT => f.write_str("EXIT"),
            Self::INIT => f.write_str("INIT"),
            Signal(value) => write!(f, "USER({value})"),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
