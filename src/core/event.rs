//! Events delivered to state handlers.

use super::signal::Signal;

/// An immutable signal plus an optional payload.
///
/// Handlers receive events by reference. Pseudo-events built with
/// [`Event::reserved`] never carry a payload and are never retained by a
/// machine.
///
/// # Example
///
/// ```rust
/// use smcore::core::{Event, Signal};
///
/// const DIGIT: Signal = Signal::user(1);
///
/// let press = Event::with_payload(DIGIT, 7u8);
/// assert_eq!(press.signal, DIGIT);
/// assert_eq!(press.payload(), Some(&7));
///
/// let tick: Event = Event::new(Signal::user(2));
/// assert!(tick.payload().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event<P = ()> {
    pub signal: Signal,
    payload: Option<P>,
}

impl<P> Event<P> {
    /// Event without payload.
    pub const fn new(signal: Signal) -> Self {
        Self {
            signal,
            payload: None,
        }
    }

    /// Event carrying `payload`.
    pub const fn with_payload(signal: Signal, payload: P) -> Self {
        Self {
            signal,
            payload: Some(payload),
        }
    }

    /// Pseudo-event used by the dispatcher to drive handlers.
    pub(crate) const fn reserved(signal: Signal) -> Self {
        Self::new(signal)
    }

    /// Default event handed to the initial pseudo-state by `start`.
    pub const fn start() -> Self {
        Self::new(Signal::USER)
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn is_reserved(&self) -> bool {
        self.signal.is_reserved()
    }
}
