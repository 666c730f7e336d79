// run.rs — `mseq run`: execute the sequence against the simulated robot.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use mseq_orchestrator::{ExecutionReport, FailurePolicy, Orchestrator};
use mseq_sim::{SimulatedExecutor, SimulatedPlanner, SimulatedRobot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Log the failure and move on to the next step.
    Skip,
    /// Stop at the first step that does not execute.
    Abort,
    /// Re-plan a failed step up to --retries more times.
    Retry,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// What to do when a step fails.
    #[arg(long, value_enum, default_value = "skip")]
    pub policy: PolicyArg,

    /// Extra planning attempts per step with --policy retry.
    #[arg(long, default_value = "2")]
    pub retries: u32,

    /// Write the execution report as JSON to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Make the simulated planner report no plan for these (0-based) planning calls.
    #[arg(long = "fail-plan", value_name = "CALL")]
    pub fail_plan: Vec<usize>,

    /// Make the simulated planner's pipeline with this planner id never find a plan.
    #[arg(long = "fail-pipeline", value_name = "PLANNER_ID")]
    pub fail_pipeline: Vec<String>,
}

impl RunArgs {
    fn failure_policy(&self) -> FailurePolicy {
        match self.policy {
            PolicyArg::Skip => FailurePolicy::SkipAndContinue,
            PolicyArg::Abort => FailurePolicy::Abort,
            PolicyArg::Retry => FailurePolicy::Retry {
                max_retries: self.retries,
            },
        }
    }
}

pub fn execute(args: &RunArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let sequence = config.build_sequence()?;

    let robot = SimulatedRobot::two_arm_gripper()?;
    let mut planner = SimulatedPlanner::new(robot.clone())
        .with_failing_calls(args.fail_plan.iter().copied())
        .with_failing_pipelines(args.fail_pipeline.iter().cloned());
    let mut executor = SimulatedExecutor::new(robot);

    tracing::info!("Simulated robot ready");
    let result = Orchestrator::new(&mut planner, &mut executor)
        .with_policy(args.failure_policy())
        .run(sequence);
    let report = match result {
        Ok(report) => report,
        Err(err) => {
            if let Some(completed) = err.partial_report() {
                print_report(completed);
            }
            return Err(err.into());
        }
    };

    print_report(&report);

    if let Some(path) = &args.report {
        report.write_json(path)?;
        println!("Report written to {}", path.display());
    }

    // Planning failures are visible in the log and the report only; the
    // exit status stays 0 once the sequence has run.
    Ok(())
}

fn print_report(report: &ExecutionReport) {
    println!("Run {} (policy: {})", report.run_id, report.policy);
    for step in &report.steps {
        println!(
            "  {:>2}. {:<16} {:<16} {:<24} {}",
            step.index + 1,
            step.outcome.to_string(),
            step.group.to_string(),
            step.goal.to_string(),
            step.label.as_deref().unwrap_or(""),
        );
    }
    println!(
        "{} of {} step(s) executed, {} planning failure(s)",
        report.executed_count(),
        report.len(),
        report.planning_failures()
    );
}
