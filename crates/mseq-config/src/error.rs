// error.rs — Error types for loading and expanding sequence configuration.

use std::path::PathBuf;

use mseq_orchestrator::SequenceError;
use mseq_request::RequestError;
use thiserror::Error;

/// Errors that can occur while loading a configuration or building a sequence from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for a sequence configuration.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A step refers to a profile that is not defined.
    #[error("phase {phase} step {step}: unknown profile '{profile}'")]
    UnknownProfile {
        phase: usize,
        step: usize,
        profile: String,
    },

    /// A step sets none of `pose`, `positions`, `positions_deg`.
    #[error("phase {phase} step {step}: no goal (set one of pose, positions, positions_deg)")]
    GoalNotSpecified { phase: usize, step: usize },

    /// A step sets more than one of `pose`, `positions`, `positions_deg`.
    #[error("phase {phase} step {step}: more than one goal given")]
    AmbiguousGoal { phase: usize, step: usize },

    /// A step sets both `profile` and `profiles`.
    #[error("phase {phase} step {step}: set either profile or profiles, not both")]
    AmbiguousProfile { phase: usize, step: usize },

    /// A profile's scaling factors are out of range.
    #[error("profile '{profile}': {source}")]
    Tuning {
        profile: String,
        source: RequestError,
    },

    /// A group or pose name is invalid.
    #[error("phase {phase} step {step}: {source}")]
    InvalidStep {
        phase: usize,
        step: usize,
        source: RequestError,
    },

    /// A pose entry in the library is invalid.
    #[error("pose '{pose}': {source}")]
    InvalidPose { pose: String, source: RequestError },

    /// The assembled steps violate the step/group invariant.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}
