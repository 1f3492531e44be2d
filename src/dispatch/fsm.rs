//! Flat state machine dispatcher.
//!
//! Transitions go straight from the current state to the target: one exit,
//! one entry. There is no superstate delegation, so `Unhandled` is simply
//! dropped.

use super::error::MachineError;
use super::outcome::DispatchOutcome;
use crate::core::{Chart, Context, Event, Response, Signal, State, StateHistory, StateTransition};
use chrono::Utc;
use tracing::{debug, trace, warn};

/// Flat state machine.
pub struct Fsm<C: Chart> {
    chart: C,
    initial: C::State,
    context: Context<C::State>,
    started: bool,
    history: Option<StateHistory<C::State>>,
}

impl<C: Chart> Fsm<C> {
    /// Create a machine whose `initial` pseudo-state must answer the start
    /// event with a transition into the first real state.
    pub fn new(chart: C, initial: C::State) -> Self {
        Self {
            chart,
            initial,
            context: Context::pending(initial, initial),
            started: false,
            history: None,
        }
    }

    pub fn with_history(mut self) -> Self {
        self.history = Some(StateHistory::new());
        self
    }

    pub fn current(&self) -> C::State {
        self.context.current
    }

    pub fn context(&self) -> &Context<C::State> {
        &self.context
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut C {
        &mut self.chart
    }

    pub fn history(&self) -> Option<&StateHistory<C::State>> {
        self.history.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Take the initial transition and enter the first state.
    pub fn start(&mut self, event: &Event<C::Payload>) -> Result<C::State, MachineError> {
        if self.started {
            return Err(MachineError::AlreadyStarted);
        }
        let target = match self.chart.handle(self.initial, event) {
            Response::Transition(target) => target,
            _ => {
                return Err(MachineError::InitialNotTransition {
                    initial: self.initial.name().to_string(),
                })
            }
        };

        self.started = true;
        self.context.next = target;
        self.enter(target);
        self.context.settle(target);

        debug!(state = target.name(), "State machine started");
        self.record(self.initial, target);
        Ok(target)
    }

    pub fn dispatch(
        &mut self,
        event: &Event<C::Payload>,
    ) -> Result<DispatchOutcome<C::State>, MachineError> {
        if !self.started {
            return Err(MachineError::NotStarted);
        }
        if !self.context.is_stable() {
            return Err(MachineError::Unstable {
                current: self.context.current.name().to_string(),
                next: self.context.next.name().to_string(),
            });
        }

        let from = self.context.current;
        let target = match self.chart.handle(from, event) {
            Response::Transition(target) => target,
            Response::TransitionLast => match self.context.last {
                Some(last) => last,
                None => {
                    warn!(
                        state = from.name(),
                        "Transition to last state requested before any transition, ignoring"
                    );
                    return Ok(DispatchOutcome::Ignored);
                }
            },
            Response::Handled => return Ok(DispatchOutcome::Handled { by: from }),
            _ => return Ok(DispatchOutcome::Ignored),
        };

        self.context.next = target;
        self.context.last = Some(from);
        self.exit(from);
        self.enter(target);
        self.context.settle(target);

        debug!(from = from.name(), to = target.name(), signal = %event.signal, "Transition complete");

        self.record(from, target);

        Ok(DispatchOutcome::Transitioned {
            from,
            to: target,
            source: from,
        })
    }

    fn record(&mut self, from: C::State, to: C::State) {
        if let Some(history) = self.history.as_mut() {
            history.record(StateTransition {
                from,
                to,
                source: from,
                timestamp: Utc::now(),
            });
        }
    }

    fn enter(&mut self, state: C::State) {
        trace!(state = state.name(), "Entering state");
        self.chart.handle(state, &Event::reserved(Signal::ENTRY));
    }

    fn exit(&mut self, state: C::State) {
        trace!(state = state.name(), "Exiting state");
        self.chart.handle(state, &Event::reserved(Signal::EXIT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Turnstile {
            Initial,
            Locked,
            Unlocked,
        }
    }

    const COIN: Signal = Signal::user(1);
    const PUSH: Signal = Signal::user(2);
    const UNDO: Signal = Signal::user(3);

    #[derive(Default)]
    struct Gate {
        log: Vec<String>,
        coins: u32,
    }

    impl Chart for Gate {
        type State = Turnstile;
        type Payload = u32;

        fn handle(&mut self, state: Turnstile, event: &Event<u32>) -> Response<Turnstile> {
            match (state, event.signal) {
                (_, Signal::ENTRY) => {
                    self.log.push(format!("{}-ENTRY", state.name()));
                    Response::Handled
                }
                (_, Signal::EXIT) => {
                    self.log.push(format!("{}-EXIT", state.name()));
                    Response::Handled
                }
                (Turnstile::Initial, _) => Response::Transition(Turnstile::Locked),
                (Turnstile::Locked, COIN) => {
                    self.coins += event.payload().copied().unwrap_or(0);
                    Response::Transition(Turnstile::Unlocked)
                }
                (Turnstile::Unlocked, COIN) => Response::Handled,
                (Turnstile::Unlocked, PUSH) => Response::Transition(Turnstile::Locked),
                (_, UNDO) => Response::TransitionLast,
                _ => Response::Unhandled,
            }
        }
    }

    fn started() -> Fsm<Gate> {
        let mut machine = Fsm::new(Gate::default(), Turnstile::Initial).with_history();
        machine.start(&Event::start()).unwrap();
        machine
    }

    #[test]
    fn start_enters_first_state() {
        let machine = started();
        assert_eq!(machine.current(), Turnstile::Locked);
        assert_eq!(machine.chart().log, vec!["Locked-ENTRY"]);
        assert!(machine.context().is_stable());
    }

    #[test]
    fn start_without_transition_fails() {
        let mut machine = Fsm::new(Gate::default(), Turnstile::Locked);
        let result = machine.start(&Event::start());

        assert!(matches!(
            result,
            Err(MachineError::InitialNotTransition { .. })
        ));
        assert!(machine.chart().log.is_empty());
    }

    #[test]
    fn transition_exits_then_enters() {
        let mut machine = started();
        let outcome = machine
            .dispatch(&Event::with_payload(COIN, 25))
            .unwrap();

        assert!(outcome.is_transition());
        assert_eq!(machine.current(), Turnstile::Unlocked);
        assert_eq!(machine.chart().coins, 25);
        assert_eq!(
            machine.chart().log,
            vec!["Locked-ENTRY", "Locked-EXIT", "Unlocked-ENTRY"]
        );
    }

    #[test]
    fn unhandled_event_is_dropped() {
        let mut machine = started();
        let outcome = machine.dispatch(&Event::new(PUSH)).unwrap();

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(machine.current(), Turnstile::Locked);
    }

    #[test]
    fn handled_event_keeps_state() {
        let mut machine = started();
        machine.dispatch(&Event::new(COIN)).unwrap();
        let outcome = machine.dispatch(&Event::new(COIN)).unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Handled {
                by: Turnstile::Unlocked
            }
        );
    }

    #[test]
    fn transition_last_returns_to_previous_state() {
        let mut machine = started();
        machine.dispatch(&Event::new(COIN)).unwrap();
        machine.dispatch(&Event::new(UNDO)).unwrap();

        assert_eq!(machine.current(), Turnstile::Locked);
        assert_eq!(machine.history().map(StateHistory::len), Some(3));
    }

    #[test]
    fn history_path_begins_at_initial_pseudo_state() {
        let mut machine = started();
        machine.dispatch(&Event::new(COIN)).unwrap();

        let path = machine.history().map(StateHistory::get_path);
        assert_eq!(
            path,
            Some(vec![
                &Turnstile::Initial,
                &Turnstile::Locked,
                &Turnstile::Unlocked
            ])
        );
    }

    #[test]
    fn unstarted_machine_is_not_stable() {
        let machine = Fsm::new(Gate::default(), Turnstile::Initial);
        assert!(!machine.context().is_stable());
    }

    #[test]
    fn dispatch_before_start_is_rejected() {
        let mut machine = Fsm::new(Gate::default(), Turnstile::Initial);
        assert_eq!(
            machine.dispatch(&Event::new(COIN)),
            Err(MachineError::NotStarted)
        );
    }
}
