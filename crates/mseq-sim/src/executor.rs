// executor.rs — SimulatedExecutor: moves the simulated robot along a trajectory.

use mseq_orchestrator::{ExecutionError, Executor, Trajectory};

use crate::robot::SimulatedRobot;

/// Executor that jumps the robot to each trajectory's final waypoint.
pub struct SimulatedExecutor {
    robot: SimulatedRobot,
    executed: usize,
}

impl SimulatedExecutor {
    pub fn new(robot: SimulatedRobot) -> Self {
        Self { robot, executed: 0 }
    }

    /// Trajectories executed so far.
    pub fn executed(&self) -> usize {
        self.executed
    }
}

impl Executor for SimulatedExecutor {
    fn execute(&mut self, trajectory: Trajectory) -> Result<(), ExecutionError> {
        let fault = |reason: String| ExecutionError::ControllerFault {
            trajectory: trajectory.id(),
            reason,
        };

        let target = trajectory
            .final_positions()
            .ok_or_else(|| fault("trajectory has no waypoints".to_string()))?;

        let mut state = self.robot.state().borrow_mut();
        let model = state
            .groups
            .get_mut(trajectory.group())
            .ok_or_else(|| fault(format!("no controller for {}", trajectory.group())))?;
        if model.positions.len() != target.len() {
            return Err(fault(format!(
                "{} has {} joints, trajectory has {}",
                trajectory.group(),
                model.positions.len(),
                target.len()
            )));
        }
        model.positions.copy_from_slice(target);
        self.executed += 1;

        tracing::debug!(
            trajectory = %trajectory.id(),
            group = %trajectory.group(),
            "trajectory executed"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "simulated-executor"
    }
}
