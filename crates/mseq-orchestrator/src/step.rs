// step.rs — MotionStep and Sequence: the ordered work list of a run.
//
// Steps are immutable once built. The group invariant (a step's goal must be
// written for the step's own group) is checked here, at construction, so the
// orchestrator never sees a step that violates it.

use std::collections::HashMap;
use std::time::Duration;

use mseq_request::{GoalSpec, KinematicGroup, PlanParameters, PlanningRequest, StartState};

use crate::error::SequenceError;

/// One goal for one kinematic group, with its planning parameters and pacing delay.
#[derive(Debug, Clone)]
pub struct MotionStep {
    group: KinematicGroup,
    goal: GoalSpec,
    parameters: PlanParameters,
    delay: Duration,
    label: Option<String>,
}

impl MotionStep {
    /// Create a step with no post-execution delay.
    ///
    /// `parameters` is usually one shared profile (`Arc<TuningParameters>`),
    /// but may be [`PlanParameters::Default`] or a multi-pipeline list.
    /// Fails when `goal` is an explicit joint target for a different group.
    pub fn new(
        group: KinematicGroup,
        goal: GoalSpec,
        parameters: impl Into<PlanParameters>,
    ) -> Result<Self, SequenceError> {
        if let Some(goal_group) = goal.implied_group() {
            if goal_group != &group {
                return Err(SequenceError::GroupMismatch {
                    target: group,
                    goal: goal_group.clone(),
                });
            }
        }
        Ok(Self {
            group,
            goal,
            parameters: parameters.into(),
            delay: Duration::ZERO,
            label: None,
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn group(&self) -> &KinematicGroup {
        &self.group
    }

    pub fn goal(&self) -> &GoalSpec {
        &self.goal
    }

    pub fn parameters(&self) -> &PlanParameters {
        &self.parameters
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Planning request for this step, starting from the robot's current state.
    pub fn request(&self) -> PlanningRequest {
        PlanningRequest::build(
            &self.group,
            &self.goal,
            &self.parameters,
            StartState::Current,
        )
    }
}

/// Named configurations known to the robot, keyed by name, with their owning group.
#[derive(Debug, Clone, Default)]
pub struct PoseLibrary {
    poses: HashMap<String, KinematicGroup>,
}

impl PoseLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, group: KinematicGroup) {
        self.poses.insert(name.into(), group);
    }

    pub fn group_of(&self, name: &str) -> Option<&KinematicGroup> {
        self.poses.get(name)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

/// An ordered list of steps, built once and iterated once per run.
///
/// Cloning yields an independent copy for a second run; the tuning profiles
/// stay shared.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    steps: Vec<MotionStep>,
}

impl Sequence {
    pub fn builder() -> SequenceBuilder {
        SequenceBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MotionStep> {
        self.steps.iter()
    }
}

impl IntoIterator for Sequence {
    type Item = MotionStep;
    type IntoIter = std::vec::IntoIter<MotionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a MotionStep;
    type IntoIter = std::slice::Iter<'a, MotionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Assembles a [`Sequence`].
///
/// With a pose library attached, named goals whose pose the library knows
/// must belong to the step's group. Unknown names pass through; the planner
/// rejects them at run time.
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    steps: Vec<MotionStep>,
    poses: Option<PoseLibrary>,
}

impl SequenceBuilder {
    pub fn with_pose_library(mut self, poses: PoseLibrary) -> Self {
        self.poses = Some(poses);
        self
    }

    /// Append one step.
    pub fn step(mut self, step: MotionStep) -> Result<Self, SequenceError> {
        self.check_pose_group(self.steps.len(), &step)?;
        self.steps.push(step);
        Ok(self)
    }

    /// Append `steps`, in order, `times` times over.
    pub fn repeat(mut self, times: usize, steps: &[MotionStep]) -> Result<Self, SequenceError> {
        for _ in 0..times {
            for step in steps {
                self = self.step(step.clone())?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> Sequence {
        Sequence { steps: self.steps }
    }

    fn check_pose_group(&self, index: usize, step: &MotionStep) -> Result<(), SequenceError> {
        let (Some(poses), GoalSpec::Named(pose)) = (&self.poses, step.goal()) else {
            return Ok(());
        };
        match poses.group_of(pose) {
            Some(expected) if expected != step.group() => Err(SequenceError::PoseGroupMismatch {
                index,
                pose: pose.clone(),
                target: step.group().clone(),
                expected: expected.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mseq_request::{JointTarget, TuningParameters};

    fn group(name: &str) -> KinematicGroup {
        KinematicGroup::new(name).unwrap()
    }

    fn tuning() -> Arc<TuningParameters> {
        Arc::new(TuningParameters::new(0.1, 0.1).unwrap())
    }

    #[test]
    fn joint_goal_for_other_group_is_rejected() {
        let goal = GoalSpec::joints(group("two_arm_group"), vec![0.0; 14]);
        let err = MotionStep::new(group("l_gripper_group"), goal, tuning()).unwrap_err();
        assert_eq!(
            err,
            SequenceError::GroupMismatch {
                target: group("l_gripper_group"),
                goal: group("two_arm_group"),
            }
        );
    }

    #[test]
    fn step_defaults_to_zero_delay() {
        let goal = GoalSpec::joints(group("l_gripper_group"), vec![0.0]);
        let step = MotionStep::new(group("l_gripper_group"), goal, tuning()).unwrap();
        assert_eq!(step.delay(), Duration::ZERO);
        assert!(step.label().is_none());
    }

    #[test]
    fn request_starts_from_current_state() {
        let g = group("r_gripper_group");
        let goal = GoalSpec::Joints(JointTarget::from_degrees(g.clone(), &[40.0]));
        let step = MotionStep::new(g.clone(), goal, tuning()).unwrap();
        let request = step.request();
        assert_eq!(request.start, StartState::Current);
        assert_eq!(request.group, g);
        assert_eq!(request.parameters.pipelines().len(), 1);
    }

    #[test]
    fn step_may_leave_parameters_to_the_planner() {
        let g = group("two_arm_group");
        let step = MotionStep::new(
            g,
            GoalSpec::named("two_arm_init_pose").unwrap(),
            PlanParameters::Default,
        )
        .unwrap();
        assert!(step.parameters().is_default());
        assert!(step.request().parameters.is_default());
    }

    #[test]
    fn multi_pipeline_step_requests_every_pipeline() {
        let g = group("l_gripper_group");
        let fallback = Arc::new(
            TuningParameters::new(0.5, 0.5)
                .unwrap()
                .with_planner_id("pilz_ptp"),
        );
        let parameters = PlanParameters::Multi(vec![tuning(), fallback]);
        let step = MotionStep::new(g.clone(), GoalSpec::joints(g, vec![0.0]), parameters).unwrap();

        let request = step.request();
        let ids: Vec<_> = request
            .parameters
            .pipelines()
            .iter()
            .map(|p| p.planner_id())
            .collect();
        assert_eq!(ids, vec!["ompl_rrtc_default", "pilz_ptp"]);
    }

    #[test]
    fn repeat_preserves_order() {
        let g = group("l_gripper_group");
        let open = MotionStep::new(g.clone(), GoalSpec::joints(g.clone(), vec![-0.7]), tuning())
            .unwrap()
            .with_label("open");
        let close = MotionStep::new(g.clone(), GoalSpec::joints(g.clone(), vec![0.0]), tuning())
            .unwrap()
            .with_label("close");

        let sequence = Sequence::builder()
            .repeat(2, &[open, close])
            .unwrap()
            .build();

        let labels: Vec<_> = sequence.iter().filter_map(|s| s.label()).collect();
        assert_eq!(labels, vec!["open", "close", "open", "close"]);
    }

    #[test]
    fn steps_share_tuning_profile() {
        let g = group("l_gripper_group");
        let profile = tuning();
        let step = MotionStep::new(g.clone(), GoalSpec::joints(g, vec![0.0]), profile.clone())
            .unwrap();
        let sequence = Sequence::builder().repeat(3, &[step]).unwrap().build();
        assert_eq!(sequence.len(), 3);
        // One handle held here plus one per step.
        assert_eq!(Arc::strong_count(&profile), 4);
    }

    #[test]
    fn pose_library_enforces_pose_group() {
        let mut poses = PoseLibrary::new();
        poses.insert("two_arm_init_pose", group("two_arm_group"));

        let step = MotionStep::new(
            group("l_gripper_group"),
            GoalSpec::named("two_arm_init_pose").unwrap(),
            tuning(),
        )
        .unwrap();

        let err = Sequence::builder()
            .with_pose_library(poses)
            .step(step)
            .unwrap_err();
        assert!(matches!(err, SequenceError::PoseGroupMismatch { index: 0, .. }));
    }

    #[test]
    fn unknown_pose_passes_through() {
        let mut poses = PoseLibrary::new();
        poses.insert("two_arm_init_pose", group("two_arm_group"));
        let step = MotionStep::new(
            group("two_arm_group"),
            GoalSpec::named("unlisted_pose").unwrap(),
            tuning(),
        )
        .unwrap();
        let sequence = Sequence::builder()
            .with_pose_library(poses)
            .step(step)
            .unwrap()
            .build();
        assert_eq!(sequence.len(), 1);
    }
}
