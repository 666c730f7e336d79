// parameters.rs — Which planning pipelines a request asks the planner to use.
//
// Serialized as a plain list of tuning profiles: an empty list means the
// planner's own defaults, one entry a single pipeline, more entries a
// multi-pipeline request.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tuning::TuningParameters;

/// Planning pipelines for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TuningParameters>", into = "Vec<TuningParameters>")]
pub enum PlanParameters {
    /// No parameters; the planner uses its configured default pipeline.
    #[default]
    Default,

    /// One pipeline with its scaling factors.
    Single(Arc<TuningParameters>),

    /// Several pipelines in one request. The planner tries them in order and
    /// returns the first trajectory found.
    Multi(Vec<Arc<TuningParameters>>),
}

impl PlanParameters {
    /// Pick the mode from the number of pipelines given.
    pub fn from_pipelines(mut pipelines: Vec<Arc<TuningParameters>>) -> Self {
        match pipelines.len() {
            0 => PlanParameters::Default,
            1 => PlanParameters::Single(pipelines.remove(0)),
            _ => PlanParameters::Multi(pipelines),
        }
    }

    /// Pipelines in the order they should be tried. Empty for `Default`.
    pub fn pipelines(&self) -> &[Arc<TuningParameters>] {
        match self {
            PlanParameters::Default => &[],
            PlanParameters::Single(tuning) => std::slice::from_ref(tuning),
            PlanParameters::Multi(pipelines) => pipelines,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, PlanParameters::Default)
    }
}

impl From<Arc<TuningParameters>> for PlanParameters {
    fn from(tuning: Arc<TuningParameters>) -> Self {
        PlanParameters::Single(tuning)
    }
}

impl From<TuningParameters> for PlanParameters {
    fn from(tuning: TuningParameters) -> Self {
        PlanParameters::Single(Arc::new(tuning))
    }
}

impl From<Vec<TuningParameters>> for PlanParameters {
    fn from(pipelines: Vec<TuningParameters>) -> Self {
        Self::from_pipelines(pipelines.into_iter().map(Arc::new).collect())
    }
}

impl From<PlanParameters> for Vec<TuningParameters> {
    fn from(parameters: PlanParameters) -> Self {
        parameters
            .pipelines()
            .iter()
            .map(|tuning| tuning.as_ref().clone())
            .collect()
    }
}

impl fmt::Display for PlanParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanParameters::Default => write!(f, "planner defaults"),
            PlanParameters::Single(tuning) => write!(f, "{}", tuning),
            PlanParameters::Multi(pipelines) => {
                write!(f, "multi[")?;
                for (i, tuning) in pipelines.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", tuning)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(id: &str, scaling: f64) -> Arc<TuningParameters> {
        Arc::new(
            TuningParameters::new(scaling, scaling)
                .unwrap()
                .with_planner_id(id),
        )
    }

    #[test]
    fn mode_follows_pipeline_count() {
        assert_eq!(PlanParameters::from_pipelines(vec![]), PlanParameters::Default);

        let only = pipeline("ompl_rrtc_default", 0.1);
        assert_eq!(
            PlanParameters::from_pipelines(vec![only.clone()]),
            PlanParameters::Single(only)
        );

        let multi = PlanParameters::from_pipelines(vec![
            pipeline("ompl_rrtc_default", 0.1),
            pipeline("pilz_ptp", 0.2),
        ]);
        assert!(matches!(multi, PlanParameters::Multi(ref p) if p.len() == 2));
    }

    #[test]
    fn pipelines_keep_their_order() {
        let params = PlanParameters::Multi(vec![pipeline("pilz_ptp", 0.2), pipeline("chomp", 0.3)]);
        let ids: Vec<_> = params.pipelines().iter().map(|p| p.planner_id()).collect();
        assert_eq!(ids, vec!["pilz_ptp", "chomp"]);
        assert!(PlanParameters::Default.pipelines().is_empty());
        assert!(PlanParameters::Default.is_default());
    }

    #[test]
    fn serializes_as_a_list_of_profiles() {
        let params = PlanParameters::Multi(vec![pipeline("pilz_ptp", 0.2), pipeline("chomp", 0.3)]);
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.starts_with('['));
        let restored: PlanParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, params);

        let restored: PlanParameters = serde_json::from_str("[]").unwrap();
        assert_eq!(restored, PlanParameters::Default);
    }

    #[test]
    fn display_names_the_pipelines() {
        assert_eq!(PlanParameters::Default.to_string(), "planner defaults");
        let params = PlanParameters::Multi(vec![pipeline("pilz_ptp", 0.2), pipeline("chomp", 0.3)]);
        assert_eq!(params.to_string(), "multi[pilz_ptp v=0.20 a=0.20; chomp v=0.30 a=0.30]");
    }
}
