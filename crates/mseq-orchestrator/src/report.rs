// report.rs — ExecutionReport: what happened to each step of a run.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use mseq_request::{GoalSpec, KinematicGroup};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::OrchestratorError;
use crate::policy::FailurePolicy;
use crate::step::MotionStep;

/// Final disposition of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// Planned and handed to the executor, which completed.
    Executed,

    /// The planner found no feasible trajectory.
    PlanningFailed,

    /// Planned, but the executor reported a fault.
    ExecutionFailed,

    /// Skipped because an earlier failure aborted the run.
    NotAttempted,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Executed => write!(f, "executed"),
            StepOutcome::PlanningFailed => write!(f, "planning_failed"),
            StepOutcome::ExecutionFailed => write!(f, "execution_failed"),
            StepOutcome::NotAttempted => write!(f, "not_attempted"),
        }
    }
}

/// Record of one step in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Position of the step in the sequence (0-based).
    pub index: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub group: KinematicGroup,

    pub goal: GoalSpec,

    pub outcome: StepOutcome,

    /// Number of planning calls made for this step.
    pub planning_attempts: u32,

    /// Handle of the trajectory passed to the executor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trajectory_id: Option<Uuid>,
}

impl StepRecord {
    pub(crate) fn new(index: usize, step: &MotionStep, outcome: StepOutcome) -> Self {
        Self {
            index,
            label: step.label().map(str::to_string),
            group: step.group().clone(),
            goal: step.goal().clone(),
            outcome,
            planning_attempts: 0,
            trajectory_id: None,
        }
    }
}

/// Per-step results of one orchestration run, in sequence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub run_id: Uuid,
    pub policy: FailurePolicy,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepRecord>,
}

impl ExecutionReport {
    pub fn outcomes(&self) -> Vec<StepOutcome> {
        self.steps.iter().map(|s| s.outcome).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn executed_count(&self) -> usize {
        self.count(StepOutcome::Executed)
    }

    pub fn planning_failures(&self) -> usize {
        self.count(StepOutcome::PlanningFailed)
    }

    /// True when every step executed (vacuously true for an empty run).
    pub fn all_executed(&self) -> bool {
        self.steps.iter().all(|s| s.outcome == StepOutcome::Executed)
    }

    /// Save the report as pretty-printed JSON (creates or overwrites).
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), OrchestratorError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| OrchestratorError::ReportIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| OrchestratorError::ReportIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn count(&self, outcome: StepOutcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mseq_request::TuningParameters;
    use tempfile::tempdir;

    fn record(index: usize, outcome: StepOutcome) -> StepRecord {
        let group = KinematicGroup::new("l_gripper_group").unwrap();
        let step = MotionStep::new(
            group.clone(),
            GoalSpec::joints(group, vec![0.0]),
            Arc::new(TuningParameters::new(0.1, 0.1).unwrap()),
        )
        .unwrap();
        StepRecord::new(index, &step, outcome)
    }

    fn report(outcomes: &[StepOutcome]) -> ExecutionReport {
        ExecutionReport {
            run_id: Uuid::new_v4(),
            policy: FailurePolicy::default(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            steps: outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| record(i, *o))
                .collect(),
        }
    }

    #[test]
    fn counts_by_outcome() {
        let r = report(&[
            StepOutcome::PlanningFailed,
            StepOutcome::Executed,
            StepOutcome::Executed,
        ]);
        assert_eq!(r.executed_count(), 2);
        assert_eq!(r.planning_failures(), 1);
        assert!(!r.all_executed());
    }

    #[test]
    fn empty_report_is_all_executed() {
        let r = report(&[]);
        assert!(r.is_empty());
        assert!(r.all_executed());
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("run.json");
        let r = report(&[StepOutcome::Executed, StepOutcome::NotAttempted]);
        r.write_json(&path).unwrap();

        let restored: ExecutionReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.run_id, r.run_id);
        assert_eq!(
            restored.outcomes(),
            vec![StepOutcome::Executed, StepOutcome::NotAttempted]
        );
    }

    #[test]
    fn outcome_serialized_in_snake_case() {
        let json = serde_json::to_string(&StepOutcome::PlanningFailed).unwrap();
        assert_eq!(json, "\"planning_failed\"");
    }
}
