// policy.rs — What the orchestrator does when a step does not execute.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Failure policy applied at each step boundary.
///
/// - `SkipAndContinue` records the failure and moves to the next step; the
///   failed step is never re-attempted.
/// - `Abort` records the failure and marks every remaining step not attempted.
/// - `Retry` re-plans up to `max_retries` more times, then behaves like
///   `SkipAndContinue`. Only planning is retried; a trajectory is never
///   executed twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    SkipAndContinue,
    Abort,
    Retry { max_retries: u32 },
}

impl FailurePolicy {
    /// Total planning attempts allowed for one step.
    pub fn max_planning_attempts(&self) -> u32 {
        match self {
            FailurePolicy::Retry { max_retries } => max_retries.saturating_add(1),
            _ => 1,
        }
    }

    pub fn aborts_on_failure(&self) -> bool {
        matches!(self, FailurePolicy::Abort)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::SkipAndContinue => write!(f, "skip_and_continue"),
            FailurePolicy::Abort => write!(f, "abort"),
            FailurePolicy::Retry { max_retries } => write!(f, "retry({})", max_retries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_skip_and_continue() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::SkipAndContinue);
    }

    #[test]
    fn attempts_per_policy() {
        assert_eq!(FailurePolicy::SkipAndContinue.max_planning_attempts(), 1);
        assert_eq!(FailurePolicy::Abort.max_planning_attempts(), 1);
        assert_eq!(
            FailurePolicy::Retry { max_retries: 2 }.max_planning_attempts(),
            3
        );
        assert_eq!(
            FailurePolicy::Retry {
                max_retries: u32::MAX
            }
            .max_planning_attempts(),
            u32::MAX
        );
    }

    #[test]
    fn serializes_with_policy_tag() {
        let json = serde_json::to_string(&FailurePolicy::Retry { max_retries: 3 }).unwrap();
        assert_eq!(json, r#"{"policy":"retry","max_retries":3}"#);
        let restored: FailurePolicy = serde_json::from_str(r#"{"policy":"abort"}"#).unwrap();
        assert_eq!(restored, FailurePolicy::Abort);
    }
}
