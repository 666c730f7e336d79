//! # mseq-orchestrator
//!
//! Sequential plan-and-execute orchestration of joint-space motion steps.
//!
//! An [`Orchestrator`] walks a [`Sequence`] of [`MotionStep`]s in order. For
//! each step it builds a planning request, asks the external
//! [`PlanningService`] for a trajectory, and hands a successful trajectory to
//! the [`Executor`]. An infeasible plan is logged and absorbed; the run moves
//! on to the next step (or aborts, or re-plans, per [`FailurePolicy`]).
//!
//! ## Key components
//!
//! - [`Sequence`] / [`SequenceBuilder`] — ordered, immutable work list with
//!   the step/group invariant checked at construction
//! - [`PlanningService`], [`Executor`] — blocking collaborator traits
//! - [`MotionLogger`] — injected logging capability ([`TracingLogger`] by default)
//! - [`Pacer`] — post-step delay primitive ([`ThreadPacer`] by default)
//! - [`StepState`] — per-step lifecycle (Pending → Planning → Executing → Done | Failed)
//! - [`ExecutionReport`] — per-step outcomes of one run

pub mod error;
pub mod logger;
pub mod orchestrator;
pub mod pacer;
pub mod policy;
pub mod report;
pub mod service;
pub mod state;
pub mod step;

pub use error::{ExecutionError, OrchestratorError, PlanningServiceError, SequenceError};
pub use logger::{LogLevel, MotionLogger, TracingLogger};
pub use orchestrator::Orchestrator;
pub use pacer::{Pacer, ThreadPacer};
pub use policy::FailurePolicy;
pub use report::{ExecutionReport, StepOutcome, StepRecord};
pub use service::{Executor, PlanOutcome, PlanningService, Trajectory};
pub use state::StepState;
pub use step::{MotionStep, PoseLibrary, Sequence, SequenceBuilder};
