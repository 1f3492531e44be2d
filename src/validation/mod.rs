//! Up-front validation of state hierarchies.
//!
//! Dispatchers detect malformed hierarchies lazily, when a walk runs into
//! them. This module checks a set of states before any event is dispatched
//! and uses Stillwater's `Validation` type to report ALL violations in one
//! pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use smcore::core::{Chart, Event, Hierarchy, Response, Signal};
//! use smcore::state_enum;
//! use smcore::validation::validate_hierarchy;
//!
//! state_enum! {
//!     enum Node { Top, Parent, Child }
//! }
//!
//! struct Tree;
//!
//! impl Chart for Tree {
//!     type State = Node;
//!     type Payload = ();
//!
//!     fn handle(&mut self, state: Node, event: &Event) -> Response<Node> {
//!         match (state, event.signal) {
//!             (Node::Parent, Signal::EMPTY) => Response::Super(Node::Top),
//!             (Node::Child, Signal::EMPTY) => Response::Super(Node::Parent),
//!             _ => Response::Ignored,
//!         }
//!     }
//! }
//!
//! impl Hierarchy for Tree {
//!     fn top(&self) -> Node { Node::Top }
//! }
//!
//! let result = validate_hierarchy(&mut Tree, &[Node::Parent, Node::Child], 8);
//! assert!(result.is_success());
//! ```

pub mod rules;
pub mod violations;

pub use rules::validate_hierarchy;
pub use violations::HierarchyViolation;
