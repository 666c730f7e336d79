// goal.rs — GoalSpec: what a single motion step is asked to reach.
//
// A goal is either a key into the robot's predefined pose library or an
// explicit joint-value vector for one group. Exactly one is populated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::group::KinematicGroup;

/// Explicit joint positions (radians) for every degree of freedom in a group.
///
/// Arity is not checked here; a planner that knows the group's joint count
/// rejects mismatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointTarget {
    pub group: KinematicGroup,
    pub positions: Vec<f64>,
}

impl JointTarget {
    pub fn new(group: KinematicGroup, positions: Vec<f64>) -> Self {
        Self { group, positions }
    }

    /// Build a target from angles given in degrees.
    pub fn from_degrees(group: KinematicGroup, degrees: &[f64]) -> Self {
        Self {
            group,
            positions: degrees.iter().map(|d| d.to_radians()).collect(),
        }
    }
}

/// The goal of one motion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalSpec {
    /// A named configuration from the robot's pose library (e.g., `"two_arm_init_pose"`).
    Named(String),

    /// Explicit joint values for a group.
    Joints(JointTarget),
}

impl GoalSpec {
    /// Goal for a named configuration. Empty names are rejected.
    pub fn named(name: impl Into<String>) -> Result<Self, RequestError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RequestError::EmptyPoseName);
        }
        Ok(GoalSpec::Named(name))
    }

    pub fn joints(group: KinematicGroup, positions: Vec<f64>) -> Self {
        GoalSpec::Joints(JointTarget::new(group, positions))
    }

    /// The group this goal is written for, when the goal itself says so.
    ///
    /// Named configurations carry no group; resolving them is the pose
    /// library's business.
    pub fn implied_group(&self) -> Option<&KinematicGroup> {
        match self {
            GoalSpec::Named(_) => None,
            GoalSpec::Joints(target) => Some(&target.group),
        }
    }
}

impl fmt::Display for GoalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalSpec::Named(name) => write!(f, "pose '{}'", name),
            GoalSpec::Joints(target) => {
                let degrees: Vec<String> = target
                    .positions
                    .iter()
                    .map(|r| format!("{:.1}°", r.to_degrees()))
                    .collect();
                write!(f, "joints [{}]", degrees.join(", "))
            }
        }
    }
}
