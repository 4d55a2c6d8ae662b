//! Multi-year NPV projection.
//!
//! An up-front investment (`fixed_cost`) is depreciated straight-line over
//! the projection. Each trial samples one sales-decay factor `d` and then,
//! for every year y = 1..=5:
//!
//!   units_y  = year_one_units  · (1 − d)^(y−1)
//!   margin_y = year_one_margin · (1 − margin_decrease)^(y−1)
//!   after_tax_y = (units_y · margin_y − depreciation) · (1 − tax_rate)
//!   cash_flow_y = after_tax_y + depreciation
//!
//! NPV is taken over [−fixed_cost, cash_flow_1, …, cash_flow_5].

use crate::{
    distribution::{require_percent, DistributionSpec},
    error::{SimError, SimResult},
    finance::{npv, straight_line_depreciation},
    sampler::choose,
    scenario::{Scenario, SimContext},
    stats::{summarize, StatsSummary},
    types::{TrialVector, MAX_TRIAL_COUNT, PROJECTION_YEARS},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NpvScenario {
    pub fixed_cost:      f64,
    pub year_one_units:  f64,
    pub year_one_margin: f64,
    pub decay_min:       f64,
    pub decay_mean:      f64,
    pub decay_max:       f64,
    #[serde(rename = "decaySD")]
    pub decay_sd:        f64,
    pub margin_decrease: f64,
    pub tax_rate:        f64,
    pub discount_rate:   f64,
    /// Overrides the configured trial count for this request.
    pub trials:          Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpvReport {
    #[serde(rename = "simulatedNPVs")]
    pub simulated_npvs: TrialVector,
    #[serde(rename = "meanNPV")]
    pub mean_npv: f64,
    #[serde(flatten)]
    pub stats: StatsSummary,
}

impl NpvScenario {
    pub fn decay_spec(&self) -> SimResult<DistributionSpec> {
        DistributionSpec::infer(self.decay_min, self.decay_mean, self.decay_max, self.decay_sd)
    }

    /// Year-0 outflow followed by one after-tax cash flow per projected year.
    pub fn cash_flows(&self, decay: f64) -> Vec<f64> {
        let depreciation = straight_line_depreciation(self.fixed_cost, PROJECTION_YEARS);
        let mut flows = Vec::with_capacity(PROJECTION_YEARS + 1);
        flows.push(-self.fixed_cost);

        let mut units = self.year_one_units;
        let mut margin = self.year_one_margin;
        for _ in 0..PROJECTION_YEARS {
            let before_tax = units * margin - depreciation;
            let after_tax = before_tax * (1.0 - self.tax_rate);
            flows.push(after_tax + depreciation);

            units *= 1.0 - decay;
            margin *= 1.0 - self.margin_decrease;
        }
        flows
    }

    pub fn trial_npv(&self, decay: f64) -> f64 {
        npv(self.discount_rate, &self.cash_flows(decay))
    }
}

impl Scenario for NpvScenario {
    type Report = NpvReport;

    fn name(&self) -> &'static str { "npv" }

    fn validate(&self) -> SimResult<()> {
        require_percent("marginDecrease", self.margin_decrease)?;
        require_percent("taxRate", self.tax_rate)?;
        require_percent("discountRate", self.discount_rate)?;
        match self.trials {
            Some(0) => return Err(SimError::invalid_input("trials must be greater than 0.")),
            Some(n) if n > MAX_TRIAL_COUNT => {
                return Err(SimError::invalid_input(format!(
                    "trials must not exceed {MAX_TRIAL_COUNT}."
                )));
            }
            _ => {}
        }
        if self.year_one_units < 0.0 {
            return Err(SimError::invalid_input("yearOneUnits must not be negative."));
        }
        self.decay_spec().map(|_| ())
    }

    fn simulate(&self, ctx: &mut SimContext<'_>) -> SimResult<NpvReport> {
        let decays = ctx.sample(&self.decay_spec()?)?;

        let trials = self.trials.unwrap_or(ctx.config.trial_count);
        let simulated_npvs = ctx.run_trials(trials, |rng| {
            let decay = choose(&decays, rng)?;
            Ok(self.trial_npv(decay))
        })?;

        let stats = summarize(&simulated_npvs)?;
        Ok(NpvReport { mean_npv: stats.mean, simulated_npvs, stats })
    }
}
