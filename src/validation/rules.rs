//! Superstate-chain checks using Validation.

use crate::core::{Event, Hierarchy, Response, Signal, State};
use crate::validation::violations::HierarchyViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Check that every state in `states` reaches the root through a finite,
/// acyclic superstate chain no deeper than `limit`.
///
/// Returns `Validation::Success(())` if all chains are sound, or
/// `Validation::Failure` with every distinct violation found.
pub fn validate_hierarchy<C: Hierarchy>(
    chart: &mut C,
    states: &[C::State],
    limit: usize,
) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
    let top = chart.top();
    let mut checks: Vec<Validation<(), NonEmptyVec<HierarchyViolation>>> = Vec::new();

    for &state in states {
        checks.push(match check_chain(chart, top, state, limit) {
            Some(violation) => Validation::fail(violation),
            None => Validation::success(()),
        });
    }

    // States sharing a broken ancestor report the same violation
    Validation::all_vec(checks).map(|_| ()).map_err(dedup)
}

fn dedup(violations: NonEmptyVec<HierarchyViolation>) -> NonEmptyVec<HierarchyViolation> {
    let mut unique = NonEmptyVec::singleton(violations.head().clone());
    for violation in violations.tail() {
        if !unique.iter().any(|seen| seen == violation) {
            unique.push(violation.clone());
        }
    }
    unique
}

fn check_chain<C: Hierarchy>(
    chart: &mut C,
    top: C::State,
    state: C::State,
    limit: usize,
) -> Option<HierarchyViolation> {
    let probe = Event::reserved(Signal::EMPTY);
    let mut visited = vec![state];
    let mut cursor = state;

    while cursor != top {
        if visited.len() > limit {
            return Some(HierarchyViolation::TooDeep {
                state: state.name().to_string(),
                limit,
            });
        }

        let parent = match chart.handle(cursor, &probe) {
            Response::Super(parent) => parent,
            _ => {
                return Some(HierarchyViolation::MissingSuperstate {
                    state: cursor.name().to_string(),
                })
            }
        };
        if parent == cursor {
            return Some(HierarchyViolation::SelfParent {
                state: cursor.name().to_string(),
            });
        }
        if visited.contains(&parent) {
            return Some(HierarchyViolation::Cycle {
                state: state.name().to_string(),
                repeated: parent.name().to_string(),
            });
        }

        visited.push(parent);
        cursor = parent;
    }

    None
}
