//! # mseq-request
//!
//! Planning request construction for joint-space motion sequences.
//!
//! A [`PlanningRequest`] bundles everything an external motion planner needs
//! for one step: the [`KinematicGroup`] being moved, the goal (a named
//! configuration or explicit joint values), the [`PlanParameters`] naming the
//! planning pipelines to use, and the start state. Building a request is pure
//! data assembly and never fails; validation happens when the inputs are
//! constructed.
//!
//! ## Key components
//!
//! - [`KinematicGroup`] — identifier of an independently planned set of joints
//! - [`GoalSpec`] — named configuration or [`JointTarget`]
//! - [`TuningParameters`] — velocity/acceleration scaling in `[0.0, 1.0]`
//! - [`PlanParameters`] — planner defaults, one pipeline, or several
//! - [`PlanningRequest::build`] — the request builder

pub mod error;
pub mod goal;
pub mod group;
pub mod parameters;
pub mod request;
pub mod tuning;

pub use error::RequestError;
pub use goal::{GoalSpec, JointTarget};
pub use group::KinematicGroup;
pub use parameters::PlanParameters;
pub use request::{GoalState, PlanningRequest, StartState};
pub use tuning::{TuningParameters, DEFAULT_PLANNER_ID};
