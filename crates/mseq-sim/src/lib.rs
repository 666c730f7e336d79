//! # mseq-sim
//!
//! In-process stand-ins for the external planning service and executor.
//!
//! [`SimulatedRobot`] holds joint positions, limits and named poses for each
//! kinematic group. [`SimulatedPlanner`] plans straight-line joint-space
//! trajectories from the robot's current positions and refuses goals that
//! are out of limits, of the wrong arity, or unknown. [`SimulatedExecutor`]
//! moves the robot to the end of each trajectory it is handed. Planner and
//! executor share the same robot, so every plan starts where the previous
//! execution left off.

pub mod executor;
pub mod planner;
pub mod robot;

pub use executor::SimulatedExecutor;
pub use planner::SimulatedPlanner;
pub use robot::{JointLimits, SimulatedRobot};
