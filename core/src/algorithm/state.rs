//! Run lifecycle state machine
//!
//! A max-flow run moves through
//! `Initialized -> Searching -> (Augmenting -> Searching)* -> Finalizing -> Done`.
//! `Searching -> Finalizing` happens when no augmenting path remains. The
//! only other exit from `Initialized` is straight to `Finalizing`, taken when
//! source and sink coincide and the run short-circuits.
//!
//! Every `Augmenting -> Searching` transition completes one augmentation.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::FlowError;

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Endpoints resolved, working copy not yet searched
    Initialized,
    /// Looking for an augmenting path
    Searching,
    /// Applying a discovered path's bottleneck
    Augmenting,
    /// Total flow fixed, min cut being extracted
    Finalizing,
    /// Result assembled
    Done,
}

impl RunPhase {
    /// Whether `self -> next` is a legal transition
    pub const fn can_transition_to(self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (RunPhase::Initialized, RunPhase::Searching)
                | (RunPhase::Initialized, RunPhase::Finalizing)
                | (RunPhase::Searching, RunPhase::Augmenting)
                | (RunPhase::Searching, RunPhase::Finalizing)
                | (RunPhase::Augmenting, RunPhase::Searching)
                | (RunPhase::Finalizing, RunPhase::Done)
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Done)
    }
}

/// Tracks the phase of a single run and counts completed augmentations
#[derive(Debug, Clone)]
pub struct RunStateMachine {
    phase: RunPhase,
    augmentations: usize,
}

impl Default for RunStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStateMachine {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Initialized,
            augmentations: 0,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Augmentations completed so far
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// Moves to `next`, failing with `InvalidTransition` if the move is not
    /// part of the lifecycle.
    pub fn transition(&mut self, next: RunPhase) -> Result<(), FlowError> {
        if !self.phase.can_transition_to(next) {
            return Err(FlowError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }

        if self.phase == RunPhase::Augmenting && next == RunPhase::Searching {
            self.augmentations += 1;
        }
        debug!("run phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}
