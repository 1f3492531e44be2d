//! smcore: an event-driven state machine dispatch core
//!
//! Callers supply state behavior as a [`Chart`](core::Chart) and feed events;
//! smcore supplies the dispatch semantics. Two engines share one vocabulary:
//!
//! - [`Fsm`](dispatch::Fsm): flat machines, transitions go straight from the
//!   current state to the target
//! - [`Hsm`](dispatch::Hsm): hierarchical machines with superstate
//!   delegation, least-common-ancestor exit/entry ordering and nested initial
//!   transitions
//!
//! # Core Concepts
//!
//! - **State**: a plain `Copy` value; equality means "same state"
//! - **Chart**: one `handle` function matching on state and signal
//! - **Response**: what a handler did, including transition targets and
//!   superstate answers
//! - **Pseudo-signals**: `ENTRY`, `EXIT`, `INIT` and `EMPTY` drive entry
//!   actions, exit actions, initial transitions and superstate probes
//!
//! # Example
//!
//! ```rust
//! use smcore::core::{Chart, Event, Hierarchy, Response, Signal};
//! use smcore::dispatch::{DispatchOutcome, Hsm};
//! use smcore::state_enum;
//!
//! state_enum! {
//!     enum Player { Top, Initial, Active, Playing, Paused, Stopped }
//! }
//!
//! const PAUSE: Signal = Signal::user(1);
//! const STOP: Signal = Signal::user(2);
//!
//! struct Deck;
//!
//! impl Chart for Deck {
//!     type State = Player;
//!     type Payload = ();
//!
//!     fn handle(&mut self, state: Player, event: &Event) -> Response<Player> {
//!         use Player::*;
//!         match (state, event.signal) {
//!             (Top, _) => Response::Ignored,
//!             (Initial, _) => Response::Transition(Active),
//!             (Active | Stopped, Signal::EMPTY) => Response::Super(Top),
//!             (Active, Signal::INIT) => Response::Transition(Playing),
//!             (Active, STOP) => Response::Transition(Stopped),
//!             (Playing | Paused, Signal::EMPTY) => Response::Super(Active),
//!             (Playing, PAUSE) => Response::Transition(Paused),
//!             (Paused, PAUSE) => Response::Transition(Playing),
//!             _ => Response::Unhandled,
//!         }
//!     }
//! }
//!
//! impl Hierarchy for Deck {
//!     fn top(&self) -> Player {
//!         Player::Top
//!     }
//! }
//!
//! let mut machine = Hsm::new(Deck, Player::Initial);
//! assert_eq!(machine.start(&Event::start()), Ok(Player::Playing));
//!
//! // Paused does not handle STOP; its superstate Active does.
//! machine.dispatch(&Event::new(PAUSE)).unwrap();
//! let outcome = machine.dispatch(&Event::new(STOP)).unwrap();
//! assert_eq!(
//!     outcome,
//!     DispatchOutcome::Transitioned {
//!         from: Player::Paused,
//!         to: Player::Stopped,
//!         source: Player::Active,
//!     }
//! );
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{Chart, Event, Hierarchy, Response, Signal, State};
pub use dispatch::{DispatchOutcome, Fsm, Hsm, MachineError, MAX_NEST_DEPTH};
