//! Hierarchical state machine dispatcher.

use super::error::MachineError;
use super::outcome::DispatchOutcome;
use super::path::{self, Path};
use crate::core::{Context, Event, Hierarchy, Response, Signal, State, StateHistory, StateTransition};
use chrono::Utc;
use tracing::{debug, trace, warn};

/// Default bound on how deep states may nest below the root.
pub const MAX_NEST_DEPTH: usize = 8;

/// Hierarchical state machine.
///
/// Events are offered to the current leaf state first and delegated to its
/// superstates until one of them reacts. Transitions exit up to the least
/// common ancestor of source and target, enter down to the target, then
/// follow initial transitions until a state declines one.
///
/// `DEPTH` bounds how deep states may nest below the root. The root has
/// depth 0 and its children depth 1.
///
/// # Example
///
/// ```rust
/// use smcore::core::{Chart, Event, Hierarchy, Response, Signal};
/// use smcore::dispatch::Hsm;
/// use smcore::state_enum;
///
/// state_enum! {
///     enum Light { Top, Initial, On, Off }
/// }
///
/// const TOGGLE: Signal = Signal::user(1);
///
/// struct Switch;
///
/// impl Chart for Switch {
///     type State = Light;
///     type Payload = ();
///
///     fn handle(&mut self, state: Light, event: &Event) -> Response<Light> {
///         match (state, event.signal) {
///             (Light::Top, _) => Response::Ignored,
///             (_, Signal::EMPTY) => Response::Super(Light::Top),
///             (Light::Initial, _) => Response::Transition(Light::Off),
///             (Light::Off, TOGGLE) => Response::Transition(Light::On),
///             (Light::On, TOGGLE) => Response::Transition(Light::Off),
///             _ => Response::Unhandled,
///         }
///     }
/// }
///
/// impl Hierarchy for Switch {
///     fn top(&self) -> Light {
///         Light::Top
///     }
/// }
///
/// let mut machine = Hsm::new(Switch, Light::Initial);
/// machine.start(&Event::start()).unwrap();
/// assert_eq!(machine.current(), Light::Off);
///
/// machine.dispatch(&Event::new(TOGGLE)).unwrap();
/// assert_eq!(machine.current(), Light::On);
/// ```
pub struct Hsm<C: Hierarchy, const DEPTH: usize = MAX_NEST_DEPTH> {
    pub(super) chart: C,
    pub(super) top: C::State,
    pub(super) initial: C::State,
    pub(super) context: Context<C::State>,
    /// Depth of the deepest active state.
    pub(super) depth: usize,
    pub(super) started: bool,
    pub(super) history: Option<StateHistory<C::State>>,
}

impl<C: Hierarchy> Hsm<C> {
    /// Create a machine with the default nesting limit.
    ///
    /// `initial` is a pseudo-state whose handler must answer the start event
    /// with a transition into the first real state.
    pub fn new(chart: C, initial: C::State) -> Self {
        Self::with_nesting_limit(chart, initial)
    }
}

impl<C: Hierarchy, const DEPTH: usize> Hsm<C, DEPTH> {
    /// Create a machine whose nesting limit is `DEPTH`.
    pub fn with_nesting_limit(chart: C, initial: C::State) -> Self {
        let top = chart.top();
        Self {
            chart,
            top,
            initial,
            context: Context::pending(top, initial),
            depth: 0,
            started: false,
            history: None,
        }
    }

    /// Record every completed transition in a [`StateHistory`].
    pub fn with_history(mut self) -> Self {
        self.history = Some(StateHistory::new());
        self
    }

    /// Current stable leaf state.
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

    /// Whether `state` is the current leaf or one of its ancestors.
    pub fn is_in(&mut self, state: C::State) -> Result<bool, MachineError> {
        self.ensure_stable()?;
        let mut cursor = Some(self.context.current);
        let mut steps = 0;
        while let Some(candidate) = cursor {
            if candidate == state {
                return Ok(true);
            }
            steps += 1;
            if steps > DEPTH + 1 {
                return Err(self.too_deep(candidate));
            }
            cursor = self.superstate(candidate)?;
        }
        Ok(false)
    }

    /// Take the initial transition and settle in the deepest initial
    /// configuration. Must be called exactly once, before any dispatch.
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
        if target == self.top {
            return Err(MachineError::TransitionToTop {
                source_state: self.initial.name().to_string(),
            });
        }

        self.started = true;
        self.context.next = target;
        self.enter_from(self.top, target)?;
        let leaf = self.drill_into(target)?;
        self.context.settle(leaf);

        debug!(state = leaf.name(), depth = self.depth, "State machine started");
        self.record(self.initial, leaf, self.initial);
        Ok(leaf)
    }

    /// Deliver one event.
    ///
    /// Runs to a stable configuration before returning. Ignored and
    /// unhandled events are reported as [`DispatchOutcome::Ignored`].
    pub fn dispatch(
        &mut self,
        event: &Event<C::Payload>,
    ) -> Result<DispatchOutcome<C::State>, MachineError> {
        self.ensure_stable()?;

        let from = self.context.current;
        let (source, response) = self.resolve(from, event)?;

        let target = match response {
            Response::Transition(target) => target,
            Response::TransitionLast => match self.context.last {
                Some(last) => last,
                None => {
                    warn!(
                        state = source.name(),
                        "Transition to last state requested before any transition, ignoring"
                    );
                    return Ok(DispatchOutcome::Ignored);
                }
            },
            Response::Handled => return Ok(DispatchOutcome::Handled { by: source }),
            _ => return Ok(DispatchOutcome::Ignored),
        };
        if target == self.top {
            return Err(MachineError::TransitionToTop {
                source_state: source.name().to_string(),
            });
        }

        self.context.next = target;
        self.context.last = Some(from);

        // Exit from the current leaf up to the state that took the transition.
        let mut state = from;
        while state != source {
            self.exit(state);
            state = self.parent(state)?;
        }

        let entries: Path<C::State, DEPTH> = self.find_path(target, source)?;
        for &state in entries.iter().rev() {
            self.enter(state)?;
        }
        let to = self.drill_into(target)?;
        self.context.settle(to);

        debug!(
            from = from.name(),
            to = to.name(),
            source = source.name(),
            signal = %event.signal,
            "Transition complete"
        );

        self.record(from, to, source);
        Ok(DispatchOutcome::Transitioned { from, to, source })
    }

    fn record(&mut self, from: C::State, to: C::State, source: C::State) {
        if let Some(history) = self.history.as_mut() {
            history.record(StateTransition {
                from,
                to,
                source,
                timestamp: Utc::now(),
            });
        }
    }

    /// Offer `event` to `leaf` and then to each superstate until one of them
    /// reacts. Returns the reacting state and its answer.
    fn resolve(
        &mut self,
        leaf: C::State,
        event: &Event<C::Payload>,
    ) -> Result<(C::State, Response<C::State>), MachineError> {
        let mut state = leaf;
        let mut hops = 0;
        loop {
            let parent = match self.chart.handle(state, event) {
                Response::Unhandled => match self.superstate(state)? {
                    Some(parent) => parent,
                    None => return Ok((state, Response::Ignored)),
                },
                // Answering a real event with its superstate is a delegation too.
                Response::Super(parent) => parent,
                response => return Ok((state, response)),
            };

            hops += 1;
            if hops > DEPTH {
                return Err(self.too_deep(leaf));
            }
            trace!(
                state = state.name(),
                superstate = parent.name(),
                signal = %event.signal,
                "Delegating event to superstate"
            );
            state = parent;
        }
    }

    /// Follow initial transitions from `leaf` until a state declines one.
    fn drill_into(&mut self, mut leaf: C::State) -> Result<C::State, MachineError> {
        loop {
            let target = match self.trigger(leaf, Signal::INIT) {
                Response::Transition(target) => target,
                _ => return Ok(leaf),
            };
            if target == leaf {
                return Err(MachineError::InitialTargetNotNested {
                    state: leaf.name().to_string(),
                    target: target.name().to_string(),
                });
            }

            trace!(
                state = leaf.name(),
                target = target.name(),
                "Taking initial transition"
            );
            self.context.next = target;
            self.enter_from(leaf, target)?;
            leaf = target;
        }
    }

    /// Enter every state strictly below `ancestor` down to `target`, root
    /// side first.
    fn enter_from(&mut self, ancestor: C::State, target: C::State) -> Result<(), MachineError> {
        let mut chain: Path<C::State, DEPTH> = Path::new();
        let mut state = target;
        while state != ancestor {
            path::push(&mut chain, state)?;
            state = match self.superstate(state)? {
                Some(parent) => parent,
                None => {
                    return Err(MachineError::InitialTargetNotNested {
                        state: ancestor.name().to_string(),
                        target: target.name().to_string(),
                    })
                }
            };
        }
        for &state in chain.iter().rev() {
            self.enter(state)?;
        }
        Ok(())
    }

    fn ensure_stable(&self) -> Result<(), MachineError> {
        if !self.started {
            return Err(MachineError::NotStarted);
        }
        if !self.context.is_stable() {
            return Err(MachineError::Unstable {
                current: self.context.current.name().to_string(),
                next: self.context.next.name().to_string(),
            });
        }
        Ok(())
    }

    pub(super) fn trigger(&mut self, state: C::State, signal: Signal) -> Response<C::State> {
        self.chart.handle(state, &Event::reserved(signal))
    }

    pub(super) fn enter(&mut self, state: C::State) -> Result<(), MachineError> {
        if self.depth >= DEPTH {
            return Err(self.too_deep(state));
        }
        trace!(state = state.name(), "Entering state");
        self.trigger(state, Signal::ENTRY);
        self.depth += 1;
        Ok(())
    }

    pub(super) fn exit(&mut self, state: C::State) {
        trace!(state = state.name(), "Exiting state");
        if self.trigger(state, Signal::EXIT).is_transition() {
            warn!(
                state = state.name(),
                "Exit action requested a transition, ignoring"
            );
        }
        self.depth = self.depth.saturating_sub(1);
    }

    /// Immediate superstate, or `None` for the root.
    pub(super) fn superstate(&mut self, state: C::State) -> Result<Option<C::State>, MachineError> {
        if state == self.top {
            return Ok(None);
        }
        match self.trigger(state, Signal::EMPTY) {
            Response::Super(parent) => Ok(Some(parent)),
            _ => Err(MachineError::MissingSuperstate {
                state: state.name().to_string(),
            }),
        }
    }

    /// Immediate superstate of a state known not to be the root.
    pub(super) fn parent(&mut self, state: C::State) -> Result<C::State, MachineError> {
        self.superstate(state)?
            .ok_or_else(|| MachineError::MissingSuperstate {
                state: state.name().to_string(),
            })
    }

    pub(super) fn too_deep(&self, state: C::State) -> MachineError {
        MachineError::NestingTooDeep {
            state: state.name().to_string(),
            limit: DEPTH,
        }
    }
}
