// request.rs — PlanningRequest: the value handed to an external planner.
//
// Construction copies the group identity, resolves the goal, and carries the
// planning parameters. Nothing here talks to the robot or validates arity.

use serde::{Deserialize, Serialize};

use crate::goal::{GoalSpec, JointTarget};
use crate::group::KinematicGroup;
use crate::parameters::PlanParameters;

/// Where planning starts from.
///
/// Planning always begins at the robot's live state at the moment the
/// planner is invoked; planning from a hypothetical start is not supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartState {
    #[default]
    Current,
}

/// A goal resolved for the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalState {
    /// Key into the planner's pose library.
    Named { configuration: String },

    /// Concrete joint state for the group.
    Joints(JointTarget),
}

/// A request ready to be submitted to a planning service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRequest {
    pub group: KinematicGroup,
    pub start: StartState,
    pub goal: GoalState,
    pub parameters: PlanParameters,
}

impl PlanningRequest {
    /// Assemble a request for `group`.
    pub fn build(
        group: &KinematicGroup,
        goal: &GoalSpec,
        parameters: &PlanParameters,
        start: StartState,
    ) -> Self {
        let goal = match goal {
            GoalSpec::Named(name) => GoalState::Named {
                configuration: name.clone(),
            },
            GoalSpec::Joints(target) => GoalState::Joints(target.clone()),
        };
        Self {
            group: group.clone(),
            start,
            goal,
            parameters: parameters.clone(),
        }
    }
}
