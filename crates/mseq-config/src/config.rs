//! Sequence configuration structures
//!
//! ```toml
//! [profiles.gripper]
//! planner_id = "ompl_rrtc_default"
//! max_velocity_scaling_factor = 0.1
//! max_acceleration_scaling_factor = 0.1
//!
//! [[poses]]
//! name = "two_arm_init_pose"
//! group = "two_arm_group"
//!
//! [[phases]]
//! name = "left gripper"
//! repeat = 2
//!
//! [[phases.steps]]
//! group = "l_gripper_group"
//! profile = "gripper"
//! positions_deg = [-40.0]
//!
//! # Several pipelines in one request, tried in order.
//! [[phases.steps]]
//! group = "l_gripper_group"
//! profiles = ["gripper", "gripper_ptp"]
//! positions_deg = [0.0]
//! ```
//!
//! A step with neither `profile` nor `profiles` leaves every planning
//! setting to the planner.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mseq_orchestrator::{MotionStep, PoseLibrary, Sequence};
use mseq_request::{
    GoalSpec, JointTarget, KinematicGroup, PlanParameters, RequestError, TuningParameters,
    DEFAULT_PLANNER_ID,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "mseq.toml";

/// Top-level configuration: profiles, pose library and phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Planning profiles by name (e.g., "arm", "gripper").
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,

    /// Named configurations and the group each belongs to.
    #[serde(default)]
    pub poses: Vec<PoseConfig>,

    /// Phases, run in order.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

/// Planner and speed settings shared by every step using the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_planner_id")]
    pub planner_id: String,

    /// Fraction of each joint's velocity limit, 0.0 to 1.0.
    pub max_velocity_scaling_factor: f64,

    /// Fraction of each joint's acceleration limit, 0.0 to 1.0.
    pub max_acceleration_scaling_factor: f64,
}

/// Library entry: a named configuration owned by a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseConfig {
    pub name: String,
    pub group: String,
}

/// Steps run in order, `repeat` times over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default = "default_repeat")]
    pub repeat: usize,

    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// One motion step. Exactly one of `pose`, `positions`, `positions_deg` is set,
/// and at most one of `profile`, `profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    pub group: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Multi-pipeline planning: profiles tried in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,

    /// Named configuration from the pose library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<String>,

    /// Joint positions in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<f64>>,

    /// Joint positions in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions_deg: Option<Vec<f64>>,

    /// Hold after the step, whatever its outcome.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub delay_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// Serde default functions
fn default_planner_id() -> String {
    DEFAULT_PLANNER_ID.to_string()
}

fn default_repeat() -> usize {
    1
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::gripper_demo()
    }
}

impl SequenceConfig {
    /// The two-arm gripper routine: arms to `two_arm_init_pose`, then open
    /// and close the left gripper twice, then the right gripper twice.
    pub fn gripper_demo() -> Self {
        let profile = || ProfileConfig {
            planner_id: default_planner_id(),
            max_velocity_scaling_factor: 0.1,
            max_acceleration_scaling_factor: 0.1,
        };
        let gripper_step = |group: &str, degrees: f64, label: &str| StepConfig {
            group: group.to_string(),
            profile: Some("gripper".to_string()),
            profiles: Vec::new(),
            pose: None,
            positions: None,
            positions_deg: Some(vec![degrees]),
            delay_ms: 0,
            label: Some(label.to_string()),
        };

        Self {
            profiles: BTreeMap::from([
                ("arm".to_string(), profile()),
                ("gripper".to_string(), profile()),
            ]),
            poses: vec![PoseConfig {
                name: "two_arm_init_pose".to_string(),
                group: "two_arm_group".to_string(),
            }],
            phases: vec![
                PhaseConfig {
                    name: Some("init pose".to_string()),
                    repeat: 1,
                    steps: vec![StepConfig {
                        group: "two_arm_group".to_string(),
                        profile: Some("arm".to_string()),
                        profiles: Vec::new(),
                        pose: Some("two_arm_init_pose".to_string()),
                        positions: None,
                        positions_deg: None,
                        delay_ms: 0,
                        label: Some("init pose".to_string()),
                    }],
                },
                PhaseConfig {
                    name: Some("left gripper".to_string()),
                    repeat: 2,
                    steps: vec![
                        gripper_step("l_gripper_group", -40.0, "left open"),
                        gripper_step("l_gripper_group", 0.0, "left close"),
                    ],
                },
                PhaseConfig {
                    name: Some("right gripper".to_string()),
                    repeat: 2,
                    steps: vec![
                        gripper_step("r_gripper_group", 40.0, "right open"),
                        gripper_step("r_gripper_group", 0.0, "right close"),
                    ],
                },
            ],
        }
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in demo.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(
                "no sequence config at {}, using built-in gripper demo",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Named configurations as a library for sequence validation.
    pub fn pose_library(&self) -> Result<PoseLibrary, ConfigError> {
        let mut library = PoseLibrary::new();
        for pose in &self.poses {
            let group =
                KinematicGroup::new(pose.group.as_str()).map_err(|source| ConfigError::InvalidPose {
                    pose: pose.name.clone(),
                    source,
                })?;
            library.insert(pose.name.clone(), group);
        }
        Ok(library)
    }

    /// Expand phases into a validated sequence.
    ///
    /// Profiles become shared tuning parameters; every step of a profile
    /// points at the same instance.
    pub fn build_sequence(&self) -> Result<Sequence, ConfigError> {
        let profiles = self.tuning_profiles()?;
        let mut builder = Sequence::builder().with_pose_library(self.pose_library()?);

        for (phase_index, phase) in self.phases.iter().enumerate() {
            let steps = phase
                .steps
                .iter()
                .enumerate()
                .map(|(step_index, step)| build_step(phase_index, step_index, step, &profiles))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.repeat(phase.repeat, &steps)?;
        }

        let sequence = builder.build();
        tracing::debug!(
            phases = self.phases.len(),
            steps = sequence.len(),
            "built motion sequence from config"
        );
        Ok(sequence)
    }

    fn tuning_profiles(&self) -> Result<BTreeMap<String, Arc<TuningParameters>>, ConfigError> {
        self.profiles
            .iter()
            .map(|(name, profile)| {
                let tuning = TuningParameters::new(
                    profile.max_velocity_scaling_factor,
                    profile.max_acceleration_scaling_factor,
                )
                .map_err(|source| ConfigError::Tuning {
                    profile: name.clone(),
                    source,
                })?
                .with_planner_id(profile.planner_id.clone());
                Ok((name.clone(), Arc::new(tuning)))
            })
            .collect()
    }
}

fn build_step(
    phase: usize,
    step: usize,
    config: &StepConfig,
    profiles: &BTreeMap<String, Arc<TuningParameters>>,
) -> Result<MotionStep, ConfigError> {
    let invalid = |source: RequestError| ConfigError::InvalidStep {
        phase,
        step,
        source,
    };

    let lookup = |name: &String| {
        profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownProfile {
                phase,
                step,
                profile: name.clone(),
            })
    };
    let parameters = match (&config.profile, config.profiles.as_slice()) {
        (Some(_), [_, ..]) => return Err(ConfigError::AmbiguousProfile { phase, step }),
        (Some(name), []) => PlanParameters::Single(lookup(name)?),
        (None, names) => PlanParameters::from_pipelines(
            names.iter().map(lookup).collect::<Result<Vec<_>, _>>()?,
        ),
    };
    let group = KinematicGroup::new(config.group.as_str()).map_err(invalid)?;

    let goal = match (&config.pose, &config.positions, &config.positions_deg) {
        (Some(pose), None, None) => GoalSpec::named(pose.as_str()).map_err(invalid)?,
        (None, Some(radians), None) => GoalSpec::joints(group.clone(), radians.clone()),
        (None, None, Some(degrees)) => {
            GoalSpec::Joints(JointTarget::from_degrees(group.clone(), degrees))
        }
        (None, None, None) => return Err(ConfigError::GoalNotSpecified { phase, step }),
        _ => return Err(ConfigError::AmbiguousGoal { phase, step }),
    };

    // Joint goals are written for the step's own group, so this cannot mismatch.
    let mut motion =
        MotionStep::new(group, goal, parameters)?.with_delay(Duration::from_millis(config.delay_ms));
    if let Some(label) = &config.label {
        motion = motion.with_label(label.as_str());
    }
    Ok(motion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mseq_orchestrator::SequenceError;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"
[profiles.gripper]
max_velocity_scaling_factor = 0.2
max_acceleration_scaling_factor = 0.3

[[phases]]
repeat = 3

[[phases.steps]]
group = "l_gripper_group"
profile = "gripper"
positions_deg = [-40.0]
delay_ms = 50

[[phases.steps]]
group = "l_gripper_group"
profile = "gripper"
positions = [0.0]
"#;

    #[test]
    fn demo_expands_to_nine_steps() {
        let sequence = SequenceConfig::gripper_demo().build_sequence().unwrap();
        assert_eq!(sequence.len(), 9);

        let labels: Vec<_> = sequence.iter().filter_map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec![
                "init pose",
                "left open",
                "left close",
                "left open",
                "left close",
                "right open",
                "right close",
                "right open",
                "right close",
            ]
        );
    }

    #[test]
    fn demo_uses_rrt_connect_at_ten_percent() {
        let sequence = SequenceConfig::gripper_demo().build_sequence().unwrap();
        for step in sequence.iter() {
            let PlanParameters::Single(tuning) = step.parameters() else {
                panic!("expected a single pipeline, got {}", step.parameters());
            };
            assert_eq!(tuning.planner_id(), "ompl_rrtc_default");
            assert_eq!(tuning.velocity_scaling(), 0.1);
            assert_eq!(tuning.acceleration_scaling(), 0.1);
        }
    }

    #[test]
    fn demo_round_trips_through_toml() {
        let demo = SequenceConfig::gripper_demo();
        let text = demo.to_toml_string().unwrap();
        let restored = SequenceConfig::from_toml_str(&text).unwrap();
        assert_eq!(demo, restored);
    }

    #[test]
    fn minimal_file_applies_defaults() {
        let config = SequenceConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(config.profiles["gripper"].planner_id, DEFAULT_PLANNER_ID);

        let sequence = config.build_sequence().unwrap();
        assert_eq!(sequence.len(), 6);
        let first = sequence.iter().next().unwrap();
        assert_eq!(first.delay(), Duration::from_millis(50));
        assert_eq!(first.parameters().pipelines()[0].acceleration_scaling(), 0.3);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, MINIMAL).unwrap();
        let config = SequenceConfig::load(&path).unwrap();
        assert_eq!(config.phases[0].repeat, 3);
    }

    #[test]
    fn load_or_default_falls_back_when_missing() {
        let dir = tempdir().unwrap();
        let config = SequenceConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, SequenceConfig::gripper_demo());
    }

    #[test]
    fn load_or_default_reports_broken_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "phases = 7").unwrap();
        assert!(matches!(
            SequenceConfig::load_or_default(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = SequenceConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_profile_rejected() {
        let mut config = SequenceConfig::gripper_demo();
        config.phases[1].steps[0].profile = Some("wrist".to_string());
        let err = config.build_sequence().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownProfile { phase: 1, step: 0, ref profile } if profile == "wrist"
        ));
    }

    #[test]
    fn out_of_range_profile_rejected() {
        let mut config = SequenceConfig::gripper_demo();
        config
            .profiles
            .get_mut("arm")
            .unwrap()
            .max_velocity_scaling_factor = 1.2;
        assert!(matches!(
            config.build_sequence(),
            Err(ConfigError::Tuning { ref profile, .. }) if profile == "arm"
        ));
    }

    #[test]
    fn goal_must_be_given_exactly_once() {
        let mut config = SequenceConfig::gripper_demo();
        config.phases[2].steps[1].positions_deg = None;
        assert!(matches!(
            config.build_sequence(),
            Err(ConfigError::GoalNotSpecified { phase: 2, step: 1 })
        ));

        let mut config = SequenceConfig::gripper_demo();
        config.phases[2].steps[1].positions = Some(vec![0.0]);
        assert!(matches!(
            config.build_sequence(),
            Err(ConfigError::AmbiguousGoal { phase: 2, step: 1 })
        ));
    }

    #[test]
    fn pose_for_wrong_group_rejected() {
        let mut config = SequenceConfig::gripper_demo();
        config.phases[0].steps[0].group = "l_gripper_group".to_string();
        assert!(matches!(
            config.build_sequence(),
            Err(ConfigError::Sequence(SequenceError::PoseGroupMismatch { .. }))
        ));
    }

    #[test]
    fn empty_group_name_rejected() {
        let mut config = SequenceConfig::gripper_demo();
        config.phases[1].steps[0].group = String::new();
        assert!(matches!(
            config.build_sequence(),
            Err(ConfigError::InvalidStep { phase: 1, step: 0, .. })
        ));
    }

    #[test]
    fn zero_repeat_drops_phase() {
        let mut config = SequenceConfig::gripper_demo();
        config.phases[1].repeat = 0;
        assert_eq!(config.build_sequence().unwrap().len(), 5);
    }

    const PIPELINES: &str = r#"
[profiles.rrt]
max_velocity_scaling_factor = 0.1
max_acceleration_scaling_factor = 0.1

[profiles.ptp]
planner_id = "pilz_ptp"
max_velocity_scaling_factor = 0.5
max_acceleration_scaling_factor = 0.5

[[phases]]

[[phases.steps]]
group = "two_arm_group"
pose = "two_arm_init_pose"

[[phases.steps]]
group = "l_gripper_group"
profile = "rrt"
positions = [0.0]

[[phases.steps]]
group = "l_gripper_group"
profiles = ["rrt", "ptp"]
positions = [0.0]
"#;

    #[test]
    fn step_selects_parameter_mode() {
        let sequence = SequenceConfig::from_toml_str(PIPELINES)
            .unwrap()
            .build_sequence()
            .unwrap();
        let steps: Vec<_> = sequence.iter().collect();

        assert!(steps[0].parameters().is_default());
        assert!(matches!(steps[1].parameters(), PlanParameters::Single(_)));

        let PlanParameters::Multi(pipelines) = steps[2].parameters() else {
            panic!("expected multi-pipeline parameters");
        };
        let ids: Vec<_> = pipelines.iter().map(|p| p.planner_id()).collect();
        assert_eq!(ids, vec!["ompl_rrtc_default", "pilz_ptp"]);
        // Same profile, same instance.
        assert!(Arc::ptr_eq(&pipelines[0], &steps[1].parameters().pipelines()[0]));
    }

    #[test]
    fn pipeline_list_round_trips_through_toml() {
        let config = SequenceConfig::from_toml_str(PIPELINES).unwrap();
        let restored = SequenceConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(config, restored);
        assert_eq!(restored.phases[0].steps[2].profiles, vec!["rrt", "ptp"]);
    }

    #[test]
    fn profile_and_profiles_together_rejected() {
        let mut config = SequenceConfig::gripper_demo();
        config.phases[1].steps[1].profiles = vec!["arm".to_string()];
        assert!(matches!(
            config.build_sequence(),
            Err(ConfigError::AmbiguousProfile { phase: 1, step: 1 })
        ));
    }

    #[test]
    fn unknown_profile_in_pipeline_list_rejected() {
        let mut config = SequenceConfig::gripper_demo();
        let step = &mut config.phases[2].steps[0];
        step.profile = None;
        step.profiles = vec!["gripper".to_string(), "wrist".to_string()];
        assert!(matches!(
            config.build_sequence(),
            Err(ConfigError::UnknownProfile { phase: 2, step: 0, ref profile }) if profile == "wrist"
        ));
    }
}
