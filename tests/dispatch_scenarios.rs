//! Scenario tests for hierarchical dispatch.
//!
//! The chart below records every handler invocation so each test can assert
//! the exact sequence of deliveries, exits and entries.
//!
//! ```text
//! Top
//! ├── A
//! │   ├── A1
//! │   └── A2
//! ├── S           (initial -> S1)
//! │   └── S1      (initial -> S11)
//! │       └── S11
//! ├── D1
//! │   └── D2
//! │       └── D3
//! │           └── D4
//! ├── Wayward     (initial -> D1, which is not nested in it)
//! └── Lost        (answers no superstate)
//!
//! C1 <-> C2       (each names the other as superstate)
//! ```

use smcore::core::{Chart, Event, Hierarchy, Response, Signal, State};
use smcore::dispatch::{DispatchOutcome, Hsm, MachineError};
use smcore::state_enum;

state_enum! {
    enum Node {
        Top,
        Initial,
        A,
        A1,
        A2,
        S,
        S1,
        S11,
        D1,
        D2,
        D3,
        D4,
        Wayward,
        Lost,
        C1,
        C2,
    }
}

const GOTO: Signal = Signal::user(1);
const SELF: Signal = Signal::user(2);
const DECLINE: Signal = Signal::user(3);
const ESCAPE: Signal = Signal::user(4);
const PASS_UP: Signal = Signal::user(5);
const SPIN: Signal = Signal::user(6);

struct Recorder {
    start_at: Node,
    goto: Node,
    log: Vec<String>,
}

impl Recorder {
    fn new(start_at: Node) -> Self {
        Self {
            start_at,
            goto: Node::Top,
            log: Vec::new(),
        }
    }
}

fn parent(state: Node) -> Option<Node> {
    match state {
        Node::A | Node::S | Node::D1 | Node::Wayward => Some(Node::Top),
        Node::A1 | Node::A2 => Some(Node::A),
        Node::S1 => Some(Node::S),
        Node::S11 => Some(Node::S1),
        Node::D2 => Some(Node::D1),
        Node::D3 => Some(Node::D2),
        Node::D4 => Some(Node::D3),
        Node::C1 => Some(Node::C2),
        Node::C2 => Some(Node::C1),
        Node::Top | Node::Initial | Node::Lost => None,
    }
}

impl Chart for Recorder {
    type State = Node;
    type Payload = ();

    fn handle(&mut self, state: Node, event: &Event) -> Response<Node> {
        match event.signal {
            Signal::ENTRY => {
                self.log.push(format!("{}-ENTRY", state.name()));
                return Response::Handled;
            }
            Signal::EXIT => {
                self.log.push(format!("{}-EXIT", state.name()));
                // Exit actions cannot transition; the dispatcher ignores this.
                return if state == Node::A2 {
                    Response::Transition(Node::S)
                } else {
                    Response::Handled
                };
            }
            Signal::EMPTY => {
                return match parent(state) {
                    Some(parent) => Response::Super(parent),
                    None => Response::Ignored,
                };
            }
            Signal::INIT => {
                return match state {
                    Node::S => Response::Transition(Node::S1),
                    Node::S1 => Response::Transition(Node::S11),
                    Node::Wayward => Response::Transition(Node::D1),
                    _ => Response::Ignored,
                };
            }
            _ => {}
        }

        if state == Node::Initial {
            return Response::Transition(self.start_at);
        }
        self.log.push(format!("{}-{}", state.name(), event.signal));

        match (state, event.signal) {
            (Node::Top, _) => Response::Ignored,
            (Node::A1, DECLINE) => Response::Unhandled,
            (Node::A, DECLINE) => Response::Transition(Node::A2),
            (_, SELF) => Response::Transition(state),
            (_, GOTO) => Response::Transition(self.goto),
            (_, ESCAPE) => Response::Transition(Node::Top),
            (Node::A1, PASS_UP) => Response::Super(Node::A),
            (Node::A, PASS_UP) => Response::Handled,
            (Node::A1, SPIN) => Response::Super(Node::C1),
            _ => Response::Unhandled,
        }
    }
}

impl Hierarchy for Recorder {
    fn top(&self) -> Node {
        Node::Top
    }
}

fn machine_at(start_at: Node) -> Hsm<Recorder> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("trace")
        .with_test_writer()
        .try_init();

    let mut machine = Hsm::new(Recorder::new(start_at), Node::Initial);
    machine.start(&Event::start()).unwrap();
    machine.chart_mut().log.clear();
    machine
}

fn goto(machine: &mut Hsm<Recorder>, target: Node) -> DispatchOutcome<Node> {
    machine.chart_mut().goto = target;
    machine.dispatch(&Event::new(GOTO)).unwrap()
}

#[test]
fn declined_event_is_handled_by_parent_transition() {
    let mut machine = machine_at(Node::A1);
    let outcome = machine.dispatch(&Event::new(DECLINE)).unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Transitioned {
            from: Node::A1,
            to: Node::A2,
            source: Node::A,
        }
    );
    assert_eq!(
        machine.chart().log,
        vec!["A1-USER(3)", "A-USER(3)", "A1-EXIT", "A2-ENTRY"]
    );
    assert_eq!(machine.current(), Node::A2);
    assert!(machine.context().is_stable());
}

#[test]
fn self_transition_exits_and_enters_once() {
    let mut machine = machine_at(Node::A1);
    machine.dispatch(&Event::new(SELF)).unwrap();

    assert_eq!(
        machine.chart().log,
        vec!["A1-USER(2)", "A1-EXIT", "A1-ENTRY"]
    );
    assert_eq!(machine.current(), Node::A1);
}

#[test]
fn sibling_transition_leaves_parent_untouched() {
    let mut machine = machine_at(Node::A1);
    goto(&mut machine, Node::A2);

    assert_eq!(
        machine.chart().log,
        vec!["A1-USER(1)", "A1-EXIT", "A2-ENTRY"]
    );
}

#[test]
fn ancestor_transition_exits_down_to_ancestor_only() {
    let mut machine = machine_at(Node::D4);
    let outcome = goto(&mut machine, Node::D1);

    assert_eq!(
        machine.chart().log,
        vec!["D4-USER(1)", "D4-EXIT", "D3-EXIT", "D2-EXIT"]
    );
    assert_eq!(
        outcome,
        DispatchOutcome::Transitioned {
            from: Node::D4,
            to: Node::D1,
            source: Node::D4,
        }
    );
    assert!(machine.context().is_stable());
}

#[test]
fn start_follows_nested_initial_transitions() {
    let mut machine = Hsm::new(Recorder::new(Node::S), Node::Initial);
    let leaf = machine.start(&Event::start()).unwrap();

    assert_eq!(leaf, Node::S11);
    assert_eq!(
        machine.chart().log,
        vec!["S-ENTRY", "S1-ENTRY", "S11-ENTRY"]
    );
}

#[test]
fn transition_into_composite_drills_to_leaf() {
    let mut machine = machine_at(Node::A1);
    let outcome = goto(&mut machine, Node::S);

    assert_eq!(
        machine.chart().log,
        vec![
            "A1-USER(1)",
            "A1-EXIT",
            "A-EXIT",
            "S-ENTRY",
            "S1-ENTRY",
            "S11-ENTRY"
        ]
    );
    assert_eq!(
        outcome,
        DispatchOutcome::Transitioned {
            from: Node::A1,
            to: Node::S11,
            source: Node::A1,
        }
    );
}

#[test]
fn cross_tree_transition_exits_to_root_and_enters_target_chain() {
    let mut machine = machine_at(Node::S11);
    goto(&mut machine, Node::D3);

    assert_eq!(
        machine.chart().log,
        vec![
            "S11-USER(1)",
            "S11-EXIT",
            "S1-EXIT",
            "S-EXIT",
            "D1-ENTRY",
            "D2-ENTRY",
            "D3-ENTRY"
        ]
    );
    assert_eq!(machine.current(), Node::D3);
}

#[test]
fn super_answer_to_real_event_delegates() {
    let mut machine = machine_at(Node::A1);
    let outcome = machine.dispatch(&Event::new(PASS_UP)).unwrap();

    assert_eq!(outcome, DispatchOutcome::Handled { by: Node::A });
    assert_eq!(machine.chart().log, vec!["A1-USER(5)", "A-USER(5)"]);
}

#[test]
fn event_unrecognized_up_to_root_is_a_no_op() {
    let mut machine = machine_at(Node::S11);
    let outcome = machine.dispatch(&Event::new(Signal::user(77))).unwrap();

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(
        machine.chart().log,
        vec![
            "S11-USER(77)",
            "S1-USER(77)",
            "S-USER(77)",
            "Top-USER(77)"
        ]
    );
    assert_eq!(machine.current(), Node::S11);
}

#[test]
fn exit_action_transition_is_ignored() {
    let mut machine = machine_at(Node::A2);
    goto(&mut machine, Node::A1);

    assert_eq!(machine.current(), Node::A1);
    assert!(machine.context().is_stable());
}

#[test]
fn hierarchy_at_nesting_limit_is_accepted() {
    let mut machine: Hsm<Recorder, 4> =
        Hsm::with_nesting_limit(Recorder::new(Node::D4), Node::Initial);

    assert_eq!(machine.start(&Event::start()), Ok(Node::D4));
    machine.chart_mut().goto = Node::A2;
    machine.dispatch(&Event::new(GOTO)).unwrap();
    machine.chart_mut().goto = Node::D4;
    machine.dispatch(&Event::new(GOTO)).unwrap();
    assert_eq!(machine.current(), Node::D4);
}

#[test]
fn hierarchy_beyond_nesting_limit_is_rejected() {
    let mut machine: Hsm<Recorder, 3> =
        Hsm::with_nesting_limit(Recorder::new(Node::D4), Node::Initial);

    assert!(matches!(
        machine.start(&Event::start()),
        Err(MachineError::NestingTooDeep { limit: 3, .. })
    ));
}

#[test]
fn transition_beyond_nesting_limit_leaves_machine_unstable() {
    let mut machine: Hsm<Recorder, 3> =
        Hsm::with_nesting_limit(Recorder::new(Node::D3), Node::Initial);
    machine.start(&Event::start()).unwrap();

    machine.chart_mut().goto = Node::D4;
    let result = machine.dispatch(&Event::new(GOTO));
    assert!(matches!(
        result,
        Err(MachineError::NestingTooDeep { limit: 3, .. })
    ));
    assert!(!machine.context().is_stable());

    assert!(matches!(
        machine.dispatch(&Event::new(SELF)),
        Err(MachineError::Unstable { .. })
    ));
}

#[test]
fn transition_to_root_is_rejected_without_side_effects() {
    let mut machine = machine_at(Node::A1);
    let result = machine.dispatch(&Event::new(ESCAPE));

    assert_eq!(
        result,
        Err(MachineError::TransitionToTop {
            source_state: "A1".to_string()
        })
    );
    assert_eq!(machine.chart().log, vec!["A1-USER(4)"]);
    assert!(machine.context().is_stable());
}

#[test]
fn state_without_superstate_is_reported() {
    let mut machine = machine_at(Node::A1);
    machine.chart_mut().goto = Node::Lost;
    let result = machine.dispatch(&Event::new(GOTO));

    assert_eq!(
        result,
        Err(MachineError::MissingSuperstate {
            state: "Lost".to_string()
        })
    );
    assert!(!machine.context().is_stable());
}

#[test]
fn initial_transition_outside_its_state_is_rejected() {
    let mut machine = machine_at(Node::A1);
    machine.chart_mut().goto = Node::Wayward;
    let result = machine.dispatch(&Event::new(GOTO));

    assert_eq!(
        result,
        Err(MachineError::InitialTargetNotNested {
            state: "Wayward".to_string(),
            target: "D1".to_string(),
        })
    );
    assert!(!machine.context().is_stable());
}

#[test]
fn start_into_state_with_stray_initial_transition_fails() {
    let mut machine = Hsm::new(Recorder::new(Node::Wayward), Node::Initial);

    assert_eq!(
        machine.start(&Event::start()),
        Err(MachineError::InitialTargetNotNested {
            state: "Wayward".to_string(),
            target: "D1".to_string(),
        })
    );
}

#[test]
fn delegation_through_superstate_cycle_is_bounded() {
    let mut machine = machine_at(Node::A1);
    let result = machine.dispatch(&Event::new(SPIN));

    assert_eq!(
        result,
        Err(MachineError::NestingTooDeep {
            state: "A1".to_string(),
            limit: 8,
        })
    );
    // Delegation changes nothing, so the machine stays usable.
    assert!(machine.context().is_stable());
    assert_eq!(machine.current(), Node::A1);
    assert!(goto(&mut machine, Node::A2).is_transition());
}

#[test]
fn transition_into_superstate_cycle_is_bounded() {
    let mut machine = machine_at(Node::A1);
    machine.chart_mut().goto = Node::C1;
    let result = machine.dispatch(&Event::new(GOTO));

    assert!(matches!(
        result,
        Err(MachineError::NestingTooDeep { limit: 8, .. })
    ));
    assert!(!machine.context().is_stable());
}

#[test]
fn start_into_root_is_rejected() {
    let mut machine = Hsm::new(Recorder::new(Node::Top), Node::Initial);

    assert_eq!(
        machine.start(&Event::start()),
        Err(MachineError::TransitionToTop {
            source_state: "Initial".to_string()
        })
    );
    assert!(!machine.is_started());
    assert!(!machine.context().is_stable());
}
