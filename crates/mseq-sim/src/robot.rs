// robot.rs — Simulated joint state shared by the planner and executor.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;
use std::rc::Rc;

use mseq_orchestrator::PoseLibrary;
use mseq_request::{KinematicGroup, RequestError};

/// Lower/upper position bounds (radians) for one joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    pub lower: f64,
    pub upper: f64,
}

impl JointLimits {
    pub fn symmetric(bound: f64) -> Self {
        Self {
            lower: -bound,
            upper: bound,
        }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.lower && position <= self.upper
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GroupModel {
    pub(crate) positions: Vec<f64>,
    pub(crate) limits: Vec<JointLimits>,
}

#[derive(Debug, Clone)]
pub(crate) struct NamedPose {
    pub(crate) group: KinematicGroup,
    pub(crate) positions: Vec<f64>,
}

#[derive(Debug, Default)]
pub(crate) struct RobotState {
    pub(crate) groups: BTreeMap<KinematicGroup, GroupModel>,
    pub(crate) poses: HashMap<String, NamedPose>,
}

/// Handle to a simulated robot. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRobot {
    state: Rc<RefCell<RobotState>>,
}

impl SimulatedRobot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group at its initial positions. One limit per joint.
    pub fn add_group(&self, group: KinematicGroup, initial: Vec<f64>, limits: Vec<JointLimits>) {
        debug_assert_eq!(initial.len(), limits.len());
        self.state.borrow_mut().groups.insert(
            group,
            GroupModel {
                positions: initial,
                limits,
            },
        );
    }

    /// Register a named configuration for `group`.
    pub fn add_pose(&self, name: impl Into<String>, group: KinematicGroup, positions: Vec<f64>) {
        self.state
            .borrow_mut()
            .poses
            .insert(name.into(), NamedPose { group, positions });
    }

    /// Current joint positions of `group`.
    pub fn positions(&self, group: &KinematicGroup) -> Option<Vec<f64>> {
        self.state
            .borrow()
            .groups
            .get(group)
            .map(|g| g.positions.clone())
    }

    pub fn groups(&self) -> Vec<KinematicGroup> {
        self.state.borrow().groups.keys().cloned().collect()
    }

    /// Named poses with their owning groups, for sequence validation.
    pub fn pose_library(&self) -> PoseLibrary {
        let mut library = PoseLibrary::new();
        for (name, pose) in &self.state.borrow().poses {
            library.insert(name.clone(), pose.group.clone());
        }
        library
    }

    pub(crate) fn state(&self) -> &Rc<RefCell<RobotState>> {
        &self.state
    }

    /// Two 7-DoF arms planned as one group, plus a 1-DoF gripper on each hand.
    ///
    /// Grippers travel ±90°; arm joints ±180°. Every group starts at zero.
    /// `two_arm_init_pose` is the only named configuration.
    pub fn two_arm_gripper() -> Result<Self, RequestError> {
        let robot = Self::new();
        let arm = KinematicGroup::new("two_arm_group")?;
        robot.add_group(arm.clone(), vec![0.0; 14], vec![JointLimits::symmetric(PI); 14]);
        for gripper in ["l_gripper_group", "r_gripper_group"] {
            robot.add_group(
                KinematicGroup::new(gripper)?,
                vec![0.0],
                vec![JointLimits::symmetric(PI / 2.0)],
            );
        }

        let left = [-0.32, -1.57, 0.0, -2.64, 0.0, 0.0, 1.57];
        let right = [0.32, 1.57, 0.0, 2.64, 0.0, 0.0, -1.57];
        let init: Vec<f64> = left.iter().chain(right.iter()).copied().collect();
        robot.add_pose("two_arm_init_pose", arm, init);
        Ok(robot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let robot = SimulatedRobot::new();
        let other = robot.clone();
        let g = KinematicGroup::new("l_gripper_group").unwrap();
        robot.add_group(g.clone(), vec![0.0], vec![JointLimits::symmetric(1.0)]);
        assert_eq!(other.positions(&g), Some(vec![0.0]));
    }

    #[test]
    fn demo_robot_layout() {
        let robot = SimulatedRobot::two_arm_gripper().unwrap();
        assert_eq!(robot.groups().len(), 3);
        let arm = KinematicGroup::new("two_arm_group").unwrap();
        assert_eq!(robot.positions(&arm).map(|p| p.len()), Some(14));
        let library = robot.pose_library();
        assert_eq!(library.group_of("two_arm_init_pose"), Some(&arm));
    }

    #[test]
    fn limits_are_inclusive() {
        let limits = JointLimits::symmetric(1.0);
        assert!(limits.contains(1.0));
        assert!(limits.contains(-1.0));
        assert!(!limits.contains(1.0001));
    }
}
