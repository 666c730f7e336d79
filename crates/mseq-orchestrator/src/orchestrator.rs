// orchestrator.rs — Runs a Sequence step by step against a planner and executor.
//
// For each step, strictly in order and one at a time:
//   1. build the planning request (start = current robot state)
//   2. plan (blocking)
//   3. on success, hand the trajectory to the executor (blocking)
//   4. pause for the step's delay, whatever the outcome
//
// An infeasible plan is logged at error severity and absorbed; what happens
// next is decided by the FailurePolicy. Only a broken planning service stops
// the run with an error, which carries the records of the steps already done.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{OrchestratorError, PlanningServiceError};
use crate::logger::{LogLevel, MotionLogger, TracingLogger};
use crate::pacer::{Pacer, ThreadPacer};
use crate::policy::FailurePolicy;
use crate::report::{ExecutionReport, StepOutcome, StepRecord};
use crate::service::{Executor, PlanOutcome, PlanningService, Trajectory};
use crate::state::StepState;
use crate::step::{MotionStep, Sequence};

static TRACING_LOGGER: TracingLogger = TracingLogger;
static THREAD_PACER: ThreadPacer = ThreadPacer;

/// Why a step could not be carried through.
enum StepFault {
    Service(PlanningServiceError),
    Internal(OrchestratorError),
}

impl From<OrchestratorError> for StepFault {
    fn from(err: OrchestratorError) -> Self {
        StepFault::Internal(err)
    }
}

/// Sequential plan-and-execute driver.
///
/// Borrows its collaborators for the duration of the run, so callers keep
/// ownership of (and can inspect) their planner and executor afterwards.
pub struct Orchestrator<'a> {
    planner: &'a mut dyn PlanningService,
    executor: &'a mut dyn Executor,
    logger: &'a dyn MotionLogger,
    pacer: &'a dyn Pacer,
    policy: FailurePolicy,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator logging through `tracing`, sleeping the thread between
    /// steps, with the skip-and-continue policy.
    pub fn new(planner: &'a mut dyn PlanningService, executor: &'a mut dyn Executor) -> Self {
        Self {
            planner,
            executor,
            logger: &TRACING_LOGGER,
            pacer: &THREAD_PACER,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_logger(mut self, logger: &'a dyn MotionLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_pacer(mut self, pacer: &'a dyn Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Run every step of `sequence` and report what happened to each.
    pub fn run(&mut self, sequence: Sequence) -> Result<ExecutionReport, OrchestratorError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let total = sequence.len();
        tracing::info!(
            %run_id,
            steps = total,
            policy = %self.policy,
            planner = self.planner.name(),
            executor = self.executor.name(),
            "starting motion sequence"
        );

        let mut records = Vec::with_capacity(total);
        let mut steps = sequence.into_iter().enumerate();

        while let Some((index, step)) = steps.next() {
            let record = match self.run_step(index, total, &step) {
                Ok(record) => record,
                Err(StepFault::Internal(err)) => return Err(err),
                Err(StepFault::Service(source)) => {
                    let completed = self.report(run_id, started_at, records);
                    tracing::warn!(
                        %run_id,
                        step = index,
                        completed = completed.len(),
                        "motion sequence stopped: planning service failed"
                    );
                    return Err(OrchestratorError::PlannerUnavailable {
                        step: index,
                        source,
                        completed: Box::new(completed),
                    });
                }
            };
            let succeeded = record.outcome == StepOutcome::Executed;
            records.push(record);

            if !succeeded && self.policy.aborts_on_failure() {
                self.logger.log(
                    LogLevel::Warn,
                    &format!("Aborting sequence after step {}/{}", index + 1, total),
                );
                records.extend(
                    steps
                        .by_ref()
                        .map(|(i, s)| StepRecord::new(i, &s, StepOutcome::NotAttempted)),
                );
                break;
            }

            self.pacer.pause(step.delay());
        }

        let report = self.report(run_id, started_at, records);
        tracing::info!(
            %run_id,
            executed = report.executed_count(),
            planning_failed = report.planning_failures(),
            "motion sequence finished"
        );
        Ok(report)
    }

    fn report(
        &self,
        run_id: Uuid,
        started_at: DateTime<Utc>,
        steps: Vec<StepRecord>,
    ) -> ExecutionReport {
        ExecutionReport {
            run_id,
            policy: self.policy,
            started_at,
            finished_at: Utc::now(),
            steps,
        }
    }

    fn run_step(
        &mut self,
        index: usize,
        total: usize,
        step: &MotionStep,
    ) -> Result<StepRecord, StepFault> {
        let mut state = StepState::Pending;
        let mut record = StepRecord::new(index, step, StepOutcome::PlanningFailed);

        let trajectory = self.plan_step(index, total, step, &mut state, &mut record)?;

        record.outcome = match trajectory {
            Some(trajectory) => {
                state.advance(StepState::Executing, index)?;
                record.trajectory_id = Some(trajectory.id());
                self.logger.log(LogLevel::Info, "Executing plan");
                match self.executor.execute(trajectory) {
                    Ok(()) => {
                        state.advance(StepState::Done, index)?;
                        StepOutcome::Executed
                    }
                    Err(e) => {
                        state.advance(StepState::Failed, index)?;
                        self.logger
                            .log(LogLevel::Error, &format!("Execution failed: {}", e));
                        StepOutcome::ExecutionFailed
                    }
                }
            }
            None => {
                state.advance(StepState::Failed, index)?;
                self.logger.log(LogLevel::Error, "Planning failed");
                StepOutcome::PlanningFailed
            }
        };

        self.logger.log(
            LogLevel::Debug,
            &format!("Step {}/{} finished: {}", index + 1, total, record.outcome),
        );
        Ok(record)
    }

    /// Plan a step, re-planning while the policy allows. `None` means every
    /// attempt came back infeasible.
    fn plan_step(
        &mut self,
        index: usize,
        total: usize,
        step: &MotionStep,
        state: &mut StepState,
        record: &mut StepRecord,
    ) -> Result<Option<Trajectory>, StepFault> {
        let max_attempts = self.policy.max_planning_attempts();

        loop {
            state.advance(StepState::Planning, index)?;
            record.planning_attempts += 1;

            // Rebuilt per attempt: each plan starts from the state at call time.
            let request = step.request();
            self.logger.log(
                LogLevel::Info,
                &format!(
                    "Planning trajectory for {} to {} with {} (step {}/{})",
                    step.group(),
                    step.goal(),
                    step.parameters(),
                    index + 1,
                    total
                ),
            );

            let outcome = self.planner.plan(&request).map_err(|source| {
                self.logger.log(
                    LogLevel::Error,
                    &format!("Planning service error: {}", source),
                );
                StepFault::Service(source)
            })?;

            match outcome {
                PlanOutcome::Success(trajectory) => return Ok(Some(trajectory)),
                PlanOutcome::Failure if record.planning_attempts < max_attempts => {
                    self.logger.log(
                        LogLevel::Warn,
                        &format!(
                            "Planning attempt {}/{} failed, retrying",
                            record.planning_attempts, max_attempts
                        ),
                    );
                }
                PlanOutcome::Failure => return Ok(None),
            }
        }
    }
}
