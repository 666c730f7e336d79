// planner.rs — SimulatedPlanner: straight-line joint-space planning.
//
// Each call reads the robot's positions at that moment, resolves the goal,
// and interpolates linearly. Pipelines are tried in request order and the
// first that is not marked failing wins; a request without parameters uses
// the default pipeline. Infeasible goals come back as PlanOutcome::Failure,
// never as an error.

use std::collections::HashSet;

use mseq_orchestrator::{PlanOutcome, PlanningService, PlanningServiceError, Trajectory};
use mseq_request::{GoalState, PlanningRequest, DEFAULT_PLANNER_ID};

use crate::robot::SimulatedRobot;

/// Waypoints between start and goal, goal included.
const DEFAULT_SEGMENTS: usize = 10;

/// Planning service backed by a [`SimulatedRobot`].
pub struct SimulatedPlanner {
    robot: SimulatedRobot,
    segments: usize,
    failing_calls: HashSet<usize>,
    failing_pipelines: HashSet<String>,
    available: bool,
    calls: usize,
}

impl SimulatedPlanner {
    pub fn new(robot: SimulatedRobot) -> Self {
        Self {
            robot,
            segments: DEFAULT_SEGMENTS,
            failing_calls: HashSet::new(),
            failing_pipelines: HashSet::new(),
            available: true,
            calls: 0,
        }
    }

    /// Report no feasible plan for the given (0-based) call indices.
    pub fn with_failing_calls(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_calls.extend(calls);
        self
    }

    /// Pipelines (by planner id) that never find a plan.
    pub fn with_failing_pipelines<S: Into<String>>(
        mut self,
        planner_ids: impl IntoIterator<Item = S>,
    ) -> Self {
        self.failing_pipelines
            .extend(planner_ids.into_iter().map(Into::into));
        self
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments.max(1);
        self
    }

    /// Simulate the planning service being down.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Planning calls made so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Goal positions for `request`, or the reason it is infeasible.
    fn resolve_goal(&self, request: &PlanningRequest) -> Result<(Vec<f64>, Vec<f64>), String> {
        let state = self.robot.state().borrow();
        let model = state
            .groups
            .get(&request.group)
            .ok_or_else(|| format!("unknown group {}", request.group))?;

        let goal = match &request.goal {
            GoalState::Named { configuration } => {
                let pose = state
                    .poses
                    .get(configuration)
                    .ok_or_else(|| format!("unknown named configuration '{}'", configuration))?;
                if pose.group != request.group {
                    return Err(format!(
                        "configuration '{}' belongs to {}",
                        configuration, pose.group
                    ));
                }
                pose.positions.clone()
            }
            GoalState::Joints(target) => target.positions.clone(),
        };

        if goal.len() != model.limits.len() {
            return Err(format!(
                "expected {} joint values for {}, got {}",
                model.limits.len(),
                request.group,
                goal.len()
            ));
        }
        if let Some((joint, value)) = goal
            .iter()
            .enumerate()
            .find(|(i, v)| !model.limits[*i].contains(**v))
        {
            return Err(format!("joint {} target {:.3} rad is out of limits", joint, value));
        }

        Ok((model.positions.clone(), goal))
    }

    /// First pipeline of `request` able to plan, by planner id.
    fn select_pipeline<'r>(&self, request: &'r PlanningRequest) -> Option<&'r str> {
        let pipelines = request.parameters.pipelines();
        if pipelines.is_empty() {
            return (!self.failing_pipelines.contains(DEFAULT_PLANNER_ID))
                .then_some(DEFAULT_PLANNER_ID);
        }
        pipelines
            .iter()
            .map(|tuning| tuning.planner_id())
            .find(|id| !self.failing_pipelines.contains(*id))
    }

    fn interpolate(&self, start: &[f64], goal: &[f64]) -> Vec<Vec<f64>> {
        (1..=self.segments)
            .map(|k| {
                let t = k as f64 / self.segments as f64;
                start
                    .iter()
                    .zip(goal)
                    .map(|(s, g)| s + (g - s) * t)
                    .collect()
            })
            .collect()
    }
}

impl PlanningService for SimulatedPlanner {
    fn plan(&mut self, request: &PlanningRequest) -> Result<PlanOutcome, PlanningServiceError> {
        let call = self.calls;
        self.calls += 1;

        if !self.available {
            return Err(PlanningServiceError::Unavailable(
                "simulated planner is offline".to_string(),
            ));
        }
        if self.failing_calls.contains(&call) {
            tracing::debug!(call, group = %request.group, "scripted planning failure");
            return Ok(PlanOutcome::Failure);
        }

        let Some(planner_id) = self.select_pipeline(request) else {
            tracing::warn!(
                group = %request.group,
                parameters = %request.parameters,
                "no pipeline produced a plan"
            );
            return Ok(PlanOutcome::Failure);
        };

        match self.resolve_goal(request) {
            Ok((start, goal)) => {
                let waypoints = self.interpolate(&start, &goal);
                tracing::debug!(
                    group = %request.group,
                    planner_id,
                    waypoints = waypoints.len(),
                    "planned trajectory"
                );
                Ok(PlanOutcome::Success(Trajectory::new(
                    request.group.clone(),
                    waypoints,
                )))
            }
            Err(reason) => {
                tracing::warn!(group = %request.group, %reason, "no feasible plan");
                Ok(PlanOutcome::Failure)
            }
        }
    }

    fn name(&self) -> &str {
        "simulated-planner"
    }
}
