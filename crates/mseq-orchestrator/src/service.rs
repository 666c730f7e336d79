// service.rs — The external planning service and executor, seen from the core.
//
// Both are blocking calls. A planner that finds no feasible trajectory
// returns `PlanOutcome::Failure`; `Err` is reserved for the service itself
// being broken. The trajectory handle moves from planner to executor and is
// consumed there, so one plan can never be executed twice.

use mseq_request::{KinematicGroup, PlanningRequest};
use uuid::Uuid;

use crate::error::{ExecutionError, PlanningServiceError};

/// Opaque handle to a computed plan.
///
/// Deliberately not `Clone`: ownership passes to [`Executor::execute`].
#[derive(Debug, PartialEq)]
pub struct Trajectory {
    id: Uuid,
    group: KinematicGroup,
    waypoints: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn new(group: KinematicGroup, waypoints: Vec<Vec<f64>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group,
            waypoints,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn group(&self) -> &KinematicGroup {
        &self.group
    }

    pub fn waypoints(&self) -> &[Vec<f64>] {
        &self.waypoints
    }

    /// Joint positions at the end of the trajectory.
    pub fn final_positions(&self) -> Option<&[f64]> {
        self.waypoints.last().map(Vec::as_slice)
    }
}

/// Result of one planning call.
#[derive(Debug)]
pub enum PlanOutcome {
    Success(Trajectory),
    Failure,
}

impl PlanOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PlanOutcome::Success(_))
    }
}

/// Computes trajectories. Each call plans from the robot's state at call time.
pub trait PlanningService {
    fn plan(&mut self, request: &PlanningRequest) -> Result<PlanOutcome, PlanningServiceError>;

    /// Service display name (for logs).
    fn name(&self) -> &str {
        "planner"
    }
}

/// Carries out trajectories on the robot, blocking until motion finishes.
pub trait Executor {
    fn execute(&mut self, trajectory: Trajectory) -> Result<(), ExecutionError>;

    /// Executor display name (for logs).
    fn name(&self) -> &str {
        "executor"
    }
}

impl<T: PlanningService + ?Sized> PlanningService for Box<T> {
    fn plan(&mut self, request: &PlanningRequest) -> Result<PlanOutcome, PlanningServiceError> {
        (**self).plan(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Executor + ?Sized> Executor for Box<T> {
    fn execute(&mut self, trajectory: Trajectory) -> Result<(), ExecutionError> {
        (**self).execute(trajectory)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
