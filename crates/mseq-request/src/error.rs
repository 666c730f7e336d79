// error.rs — Error types for request inputs.
//
// Building a PlanningRequest cannot fail; these errors come from constructing
// the values that go into one.

use thiserror::Error;

/// Errors raised while constructing request inputs.
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    /// A scaling factor fell outside the closed interval [0.0, 1.0].
    #[error("{parameter} must be within [0.0, 1.0], got {value}")]
    ScalingOutOfRange { parameter: &'static str, value: f64 },

    /// Kinematic group identifiers must be non-empty.
    #[error("kinematic group name must not be empty")]
    EmptyGroupName,

    /// Named configuration keys must be non-empty.
    #[error("named configuration must not be empty")]
    EmptyPoseName,
}
