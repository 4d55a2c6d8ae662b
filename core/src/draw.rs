//! Plain distribution draws: no payoff model, just the SampleSet.

use crate::{
    distribution::{DistributionFamily, DistributionSpec},
    error::SimResult,
    scenario::{Scenario, SimContext},
    types::SampleSet,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawRequest {
    /// Family inferred by the classifier.
    Inferred { min: f64, mean: f64, max: f64, sd: f64 },
    Triangular { min: f64, mode: f64, max: f64 },
    Uniform { min: f64, max: f64 },
    Normal { mean: f64, sd: f64 },
    TruncatedNormal { min: f64, mean: f64, max: f64, sd: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawReport {
    pub distribution: DistributionFamily,
    #[serde(rename = "distValues")]
    pub dist_values: SampleSet,
}

impl DrawRequest {
    pub fn spec(&self) -> SimResult<DistributionSpec> {
        match *self {
            Self::Inferred { min, mean, max, sd }        => DistributionSpec::infer(min, mean, max, sd),
            Self::Triangular { min, mode, max }          => DistributionSpec::triangular(min, mode, max),
            Self::Uniform { min, max }                   => DistributionSpec::uniform(min, max),
            Self::Normal { mean, sd }                    => DistributionSpec::normal(mean, sd),
            Self::TruncatedNormal { min, mean, max, sd } => DistributionSpec::truncated_normal(min, mean, max, sd),
        }
    }
}

impl Scenario for DrawRequest {
    type Report = DrawReport;

    fn name(&self) -> &'static str { "draw" }

    fn validate(&self) -> SimResult<()> {
        self.spec().map(|_| ())
    }

    fn simulate(&self, ctx: &mut SimContext<'_>) -> SimResult<DrawReport> {
        let spec = self.spec()?;
        let dist_values = match self {
            // The dedicated truncated-normal draw historically passed its
            // arguments as (min, max, mean).
            Self::TruncatedNormal { .. } => {
                let count = ctx.config.sample_count;
                ctx.sampler().sample_truncated_legacy_order(&spec, count, &mut *ctx.rng)?
            }
            _ => ctx.sample(&spec)?,
        };
        Ok(DrawReport { distribution: spec.family, dist_values })
    }
}
