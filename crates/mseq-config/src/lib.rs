//! # mseq-config
//!
//! TOML configuration for motion sequences.
//!
//! A [`SequenceConfig`] names the planning profiles, the pose library, and
//! the phases of a run (each phase a list of steps repeated `repeat` times).
//! [`SequenceConfig::build_sequence`] turns it into a validated
//! [`mseq_orchestrator::Sequence`]. When no file is given, the built-in
//! [`SequenceConfig::gripper_demo`] is used.

pub mod config;
pub mod error;

pub use config::{
    PhaseConfig, PoseConfig, ProfileConfig, SequenceConfig, StepConfig, DEFAULT_CONFIG_FILE,
};
pub use error::ConfigError;
