//! Event dispatchers.
//!
//! - [`Fsm`]: flat machines, one exit and one entry per transition
//! - [`Hsm`]: hierarchical machines with superstate delegation, LCA-based
//!   exit/entry ordering and nested initial transitions
//!
//! Both are synchronous and run every transition to a stable configuration
//! before returning. Neither may be re-entered from a state handler.

mod error;
mod fsm;
mod hsm;
mod outcome;
mod path;

pub use error::MachineError;
pub use fsm::Fsm;
pub use hsm::{Hsm, MAX_NEST_DEPTH};
pub use outcome::DispatchOutcome;
