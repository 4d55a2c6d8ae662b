//! Customer-retention valuation.
//!
//! Each trial follows one customer for up to five years. Every year a
//! Bernoulli draw against `retention_rate` decides whether they stay;
//! that year's profit is drawn from Normal(mean_y, |st_dev · mean_y|)
//! either way, and the first churned year ends the trial. NPV is taken
//! over [0, p_1, …, p_k] with k = years loyal.

use crate::{
    distribution::require_percent,
    error::{SimError, SimResult},
    finance::npv,
    sampler::draw_normal,
    scenario::{Scenario, SimContext},
    stats::{mean, summarize, StatsSummary},
    types::{TrialVector, PROJECTION_YEARS},
};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionScenario {
    pub retention_rate:         f64,
    pub discount_rate:          f64,
    /// Profit sd as a fraction of that year's mean profit.
    pub st_dev:                 f64,
    pub year_one_mean_profit:   f64,
    pub year_two_mean_profit:   f64,
    pub year_three_mean_profit: f64,
    pub year_four_mean_profit:  f64,
    pub year_five_mean_profit:  f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerPath {
    pub npv:         f64,
    pub years_loyal: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionReport {
    #[serde(rename = "simulatedNPVs")]
    pub simulated_npvs: TrialVector,
    #[serde(rename = "meanNPV")]
    pub mean_npv: f64,
    #[serde(rename = "meanYearsLoyal")]
    pub mean_years_loyal: f64,
    #[serde(flatten)]
    pub stats: StatsSummary,
}

impl RetentionScenario {
    pub fn mean_profits(&self) -> [f64; PROJECTION_YEARS] {
        [
            self.year_one_mean_profit,
            self.year_two_mean_profit,
            self.year_three_mean_profit,
            self.year_four_mean_profit,
            self.year_five_mean_profit,
        ]
    }

    /// Simulate one customer.
    pub fn customer_path(&self, rng: &mut dyn RngCore) -> SimResult<CustomerPath> {
        let mut profits = Vec::with_capacity(PROJECTION_YEARS + 1);
        profits.push(0.0);
        for year_mean in self.mean_profits() {
            let retained = rng.gen::<f64>() <= self.retention_rate;
            profits.push(draw_normal(year_mean, (self.st_dev * year_mean).abs(), &mut *rng)?);
            if !retained {
                break;
            }
        }
        Ok(CustomerPath {
            npv: npv(self.discount_rate, &profits),
            years_loyal: profits.len() - 1,
        })
    }
}

impl Scenario for RetentionScenario {
    type Report = RetentionReport;

    fn name(&self) -> &'static str { "retention" }

    fn validate(&self) -> SimResult<()> {
        require_percent("retentionRate", self.retention_rate)?;
        require_percent("discountRate", self.discount_rate)?;
        if !(self.st_dev >= 0.0) {
            return Err(SimError::invalid_input("stDev must be greater than or equal to 0."));
        }
        Ok(())
    }

    fn simulate(&self, ctx: &mut SimContext<'_>) -> SimResult<RetentionReport> {
        let trials = ctx.config.trial_count;
        let paths = ctx.run_trials(trials, |rng| self.customer_path(rng))?;

        let simulated_npvs: TrialVector = paths.iter().map(|p| p.npv).collect();
        let years: Vec<f64> = paths.iter().map(|p| p.years_loyal as f64).collect();

        let stats = summarize(&simulated_npvs)?;
        Ok(RetentionReport {
            mean_npv: stats.mean,
            mean_years_loyal: mean(&years),
            simulated_npvs,
            stats,
        })
    }
}
