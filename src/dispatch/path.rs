//! Least-common-ancestor search for hierarchical transitions.
//!
//! The search runs a ladder of cheap checks for the common shapes
//! (self-transition, parent to child, siblings, child to parent) before
//! falling back to climbing both ancestor chains. Exit actions for the
//! source side run as the search proves them necessary.

use super::error::MachineError;
use super::hsm::Hsm;
use crate::core::{Hierarchy, State};

/// Fixed-capacity state sequence. Capacity is the nesting limit.
pub(crate) type Path<S, const N: usize> = heapless::Vec<S, N>;

pub(crate) fn push<S: State, const N: usize>(
    path: &mut Path<S, N>,
    state: S,
) -> Result<(), MachineError> {
    path.push(state)
        .map_err(|state| MachineError::NestingTooDeep {
            state: state.name().to_string(),
            limit: N,
        })
}

impl<C: Hierarchy, const DEPTH: usize> Hsm<C, DEPTH> {
    /// Compute the states to enter for a transition from `source` to
    /// `target`, exiting `source` and its ancestors below the LCA on the way.
    ///
    /// The returned path starts at `target` and climbs toward the LCA; the
    /// caller enters it back to front. An empty path means `target` was
    /// already active and nothing needs entering.
    pub(super) fn find_path(
        &mut self,
        target: C::State,
        source: C::State,
    ) -> Result<Path<C::State, DEPTH>, MachineError> {
        let mut path: Path<C::State, DEPTH> = Path::new();
        push(&mut path, target)?;

        // (a) source == target
        if source == target {
            self.exit(source);
            return Ok(path);
        }

        // (b) source == target->super
        let target_parent = self.superstate(target)?;
        if target_parent == Some(source) {
            return Ok(path);
        }

        // (c) source->super == target->super
        let source_parent = self.superstate(source)?;
        if source_parent == target_parent {
            self.exit(source);
            return Ok(path);
        }

        // (d) source->super == target
        if source_parent == Some(target) {
            self.exit(source);
            path.clear();
            return Ok(path);
        }

        // (e) source == target->super->super...
        // Records the target's ancestors below the root along the way.
        let mut ancestor = target_parent;
        while let Some(state) = ancestor {
            if state == source {
                return Ok(path);
            }
            if state == self.top {
                break;
            }
            push(&mut path, state)?;
            ancestor = self.superstate(state)?;
        }

        self.exit(source);

        // (f) source->super == target->super->super...
        // (g) source->super->super... == target->super->super...
        // Every state above the source that is not on the target's chain is
        // exited. The root ends the climb.
        let mut candidate = match source_parent {
            Some(parent) => parent,
            None => return Ok(path),
        };
        let mut climbed = 0;
        loop {
            if candidate == self.top {
                return Ok(path);
            }
            if let Some(index) = path.iter().position(|&state| state == candidate) {
                path.truncate(index);
                return Ok(path);
            }

            climbed += 1;
            if climbed > DEPTH {
                return Err(self.too_deep(source));
            }
            self.exit(candidate);
            candidate = self.parent(candidate)?;
        }
    }
}
