// error.rs — Error types for sequence assembly and orchestration.
//
// A planner returning no feasible trajectory is NOT an error here: it is a
// normal PlanOutcome, recorded in the report and absorbed per step. The
// variants below are construction-time contract violations and collaborator
// faults.

use std::path::PathBuf;

use mseq_request::KinematicGroup;
use thiserror::Error;

use crate::report::ExecutionReport;

/// Violations of the step/group invariant, caught while the sequence is built.
#[derive(Debug, Error, PartialEq)]
pub enum SequenceError {
    /// A joint goal written for one group was attached to a step targeting another.
    #[error("step targets group {target} but its joint goal is for group {goal}")]
    GroupMismatch {
        target: KinematicGroup,
        goal: KinematicGroup,
    },

    /// A named configuration belongs to a different group than the step targets.
    #[error("step {index} targets group {target} but pose '{pose}' belongs to group {expected}")]
    PoseGroupMismatch {
        index: usize,
        pose: String,
        target: KinematicGroup,
        expected: KinematicGroup,
    },
}

/// The planning service could not be reached or crashed.
///
/// Distinct from an infeasible plan, which the service reports as
/// `PlanOutcome::Failure`.
#[derive(Debug, Error)]
pub enum PlanningServiceError {
    #[error("planning service unavailable: {0}")]
    Unavailable(String),
}

/// The executor could not carry out a trajectory.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("controller fault while executing trajectory {trajectory}: {reason}")]
    ControllerFault { trajectory: uuid::Uuid, reason: String },
}

/// Errors that stop an orchestration run or its reporting.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The planner failed as a service; the run cannot continue meaningfully.
    /// `completed` holds the records of the steps that finished before `step`.
    #[error("planning service failed at step {step}: {source}")]
    PlannerUnavailable {
        step: usize,
        source: PlanningServiceError,
        completed: Box<ExecutionReport>,
    },

    /// Internal step state machine was driven through an invalid edge.
    #[error("invalid transition from {from} to {to} at step {step}")]
    InvalidTransition {
        step: usize,
        from: String,
        to: String,
    },

    /// Writing an execution report failed.
    #[error("I/O error at {path}: {source}")]
    ReportIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrchestratorError {
    /// What the run got done before it was stopped, if it got that far.
    pub fn partial_report(&self) -> Option<&ExecutionReport> {
        match self {
            OrchestratorError::PlannerUnavailable { completed, .. } => Some(&**completed),
            _ => None,
        }
    }
}
