// state.rs — Per-step lifecycle.
//
//   Pending → Planning → Executing → Done
//                │            └────→ Failed
//                ├──→ Planning   (retry)
//                └──→ Failed
//
// Done and Failed are terminal for the step only; the orchestrator simply
// moves on to the next step's Pending.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OrchestratorError;

/// Where a single step is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// Reached in sequence, not yet submitted.
    Pending,

    /// Blocking call to the planning service.
    Planning,

    /// Blocking call to the executor.
    Executing,

    /// Trajectory executed.
    Done,

    /// Planning or execution did not succeed.
    Failed,
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepState::Pending => write!(f, "pending"),
            StepState::Planning => write!(f, "planning"),
            StepState::Executing => write!(f, "executing"),
            StepState::Done => write!(f, "done"),
            StepState::Failed => write!(f, "failed"),
        }
    }
}

impl StepState {
    pub fn can_transition_to(&self, next: StepState) -> bool {
        matches!(
            (self, next),
            (StepState::Pending, StepState::Planning)
                | (StepState::Planning, StepState::Planning)
                | (StepState::Planning, StepState::Executing)
                | (StepState::Planning, StepState::Failed)
                | (StepState::Executing, StepState::Done)
                | (StepState::Executing, StepState::Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StepState::Done | StepState::Failed)
    }

    /// Move to `next`, or report the invalid edge for step `step`.
    pub fn advance(&mut self, next: StepState, step: usize) -> Result<(), OrchestratorError> {
        if !self.can_transition_to(next) {
            return Err(OrchestratorError::InvalidTransition {
                step,
                from: self.to_string(),
                to: next.to_string(),
            });
        }
        let from = *self;
        *self = next;
        tracing::trace!(step, %from, to = %next, "step state transition");
        Ok(())
    }
}
