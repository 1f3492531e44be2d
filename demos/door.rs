//! Garage Door Controller
//!
//! A hierarchical machine where `Operational` groups the normal states and
//! a fault from any of them is handled once, in the superstate.
//!
//! ```text
//! Top
//! ├── Operational  (initial -> Closed)
//! │   ├── Closed
//! │   ├── Opening
//! │   ├── Open
//! │   └── Closing
//! └── Fault
//! ```
//!
//! Run with: RUST_LOG=trace cargo run --example door

use smcore::builder::HsmBuilder;
use smcore::core::{Chart, Event, Hierarchy, Response, Signal, State};
use smcore::state_enum;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Door {
        Top,
        Initial,
        Operational,
        Closed,
        Opening,
        Open,
        Closing,
        Fault,
    }
}

const BUTTON: Signal = Signal::user(1);
const LIMIT_SWITCH: Signal = Signal::user(2);
const OBSTRUCTION: Signal = Signal::user(3);
const RESET: Signal = Signal::user(4);

#[derive(Default)]
struct Controller {
    motor_runs: u32,
}

impl Chart for Controller {
    type State = Door;
    type Payload = ();

    fn handle(&mut self, state: Door, event: &Event) -> Response<Door> {
        use Door::*;
        match (state, event.signal) {
            (Top, _) => Response::Ignored,
            (Initial, _) => Response::Transition(Operational),

            (Operational | Fault, Signal::EMPTY) => Response::Super(Top),
            (Operational, Signal::INIT) => Response::Transition(Closed),
            (Operational, OBSTRUCTION) => Response::Transition(Fault),

            (Closed | Opening | Open | Closing, Signal::EMPTY) => Response::Super(Operational),
            (Opening | Closing, Signal::ENTRY) => {
                self.motor_runs += 1;
                println!("  motor on ({})", state.name());
                Response::Handled
            }
            (Opening | Closing, Signal::EXIT) => {
                println!("  motor off");
                Response::Handled
            }
            (Closed, BUTTON) => Response::Transition(Opening),
            (Opening, LIMIT_SWITCH) => Response::Transition(Open),
            (Open, BUTTON) => Response::Transition(Closing),
            (Closing, LIMIT_SWITCH) => Response::Transition(Closed),

            (Fault, Signal::ENTRY) => {
                println!("  fault latched");
                Response::Handled
            }
            (Fault, RESET) => Response::Transition(Operational),

            _ => Response::Unhandled,
        }
    }
}

impl Hierarchy for Controller {
    fn top(&self) -> Door {
        Door::Top
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Garage Door Controller ===\n");

    let mut machine = HsmBuilder::new()
        .chart(Controller::default())
        .initial(Door::Initial)
        .states([
            Door::Operational,
            Door::Closed,
            Door::Opening,
            Door::Open,
            Door::Closing,
            Door::Fault,
        ])
        .record_history(true)
        .build()
        .unwrap();

    let start = machine.start(&Event::start()).unwrap();
    println!("Started in {}\n", start.name());

    let script = [
        ("button", BUTTON),
        ("limit switch", LIMIT_SWITCH),
        ("button", BUTTON),
        ("obstruction", OBSTRUCTION),
        ("button", BUTTON),
        ("reset", RESET),
    ];

    for (label, signal) in script {
        println!("-> {label}");
        let outcome = machine.dispatch(&Event::new(signal)).unwrap();
        println!("   {:?}, now {}", outcome, machine.current().name());
    }

    println!("\nMotor ran {} times", machine.chart().motor_runs);
    if let Some(history) = machine.history() {
        let path: Vec<&str> = history.get_path().iter().map(|s| s.name()).collect();
        println!("Path: {}", path.join(" -> "));
    }

    println!("\n=== Example Complete ===");
}
