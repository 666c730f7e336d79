// tuning.rs — Motion-quality parameters shared by every step of a profile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Planner pipeline used when a profile does not name one.
pub const DEFAULT_PLANNER_ID: &str = "ompl_rrtc_default";

/// Velocity and acceleration scaling for one planning profile.
///
/// Both factors lie in the closed interval `[0.0, 1.0]`; the constructor is
/// the only way to set them, so a value of this type is always in range.
/// Steps share a profile through `Arc<TuningParameters>`, wrapped in
/// [`PlanParameters`](crate::PlanParameters).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningParameters {
    planner_id: String,
    max_velocity_scaling_factor: f64,
    max_acceleration_scaling_factor: f64,
}

impl TuningParameters {
    pub fn new(velocity_scaling: f64, acceleration_scaling: f64) -> Result<Self, RequestError> {
        Ok(Self {
            planner_id: DEFAULT_PLANNER_ID.to_string(),
            max_velocity_scaling_factor: check_scaling(
                "max_velocity_scaling_factor",
                velocity_scaling,
            )?,
            max_acceleration_scaling_factor: check_scaling(
                "max_acceleration_scaling_factor",
                acceleration_scaling,
            )?,
        })
    }

    pub fn with_planner_id(mut self, planner_id: impl Into<String>) -> Self {
        self.planner_id = planner_id.into();
        self
    }

    pub fn planner_id(&self) -> &str {
        &self.planner_id
    }

    pub fn velocity_scaling(&self) -> f64 {
        self.max_velocity_scaling_factor
    }

    pub fn acceleration_scaling(&self) -> f64 {
        self.max_acceleration_scaling_factor
    }
}

impl fmt::Display for TuningParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v={:.2} a={:.2}",
            self.planner_id, self.max_velocity_scaling_factor, self.max_acceleration_scaling_factor
        )
    }
}

fn check_scaling(parameter: &'static str, value: f64) -> Result<f64, RequestError> {
    // NaN fails the range check as well.
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RequestError::ScalingOutOfRange { parameter, value })
    }
}

// Deserialization goes through `new` so out-of-range files are rejected.
impl<'de> Deserialize<'de> for TuningParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default = "default_planner_id")]
            planner_id: String,
            max_velocity_scaling_factor: f64,
            max_acceleration_scaling_factor: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        TuningParameters::new(
            raw.max_velocity_scaling_factor,
            raw.max_acceleration_scaling_factor,
        )
        .map(|t| t.with_planner_id(raw.planner_id))
        .map_err(serde::de::Error::custom)
    }
}

fn default_planner_id() -> String {
    DEFAULT_PLANNER_ID.to_string()
}
