//! Core vocabulary shared by both dispatchers.
//!
//! - [`Signal`] and [`Event`]: what gets delivered
//! - [`State`], [`Chart`] and [`Hierarchy`]: who handles it
//! - [`Response`]: what the handler did
//! - [`Context`]: where a machine currently rests
//! - [`StateHistory`]: where it has been

mod context;
mod event;
mod history;
mod response;
mod signal;
mod state;

pub use context::Context;
pub use event::Event;
pub use history::{StateHistory, StateTransition};
pub use response::Response;
pub use signal::{Signal, SignalError};
pub use state::{Chart, Hierarchy, State};
