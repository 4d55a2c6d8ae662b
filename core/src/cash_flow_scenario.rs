//! Annual cash flow from periodic cash flows.
//!
//! Each trial draws `periods_per_year` periodic flows (with replacement)
//! from one SampleSet, sums them and subtracts the annual fixed cost.

use crate::{
    distribution::DistributionSpec,
    error::{SimError, SimResult},
    sampler::choose_many,
    scenario::{Scenario, SimContext},
    stats::{summarize, StatsSummary},
    types::{TrialVector, MAX_PERIODS_PER_YEAR},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashFlowScenario {
    pub periods_per_year: i64,
    pub fixed_cost:       f64,
    pub min:              f64,
    pub mean:             f64,
    pub max:              f64,
    pub sd:               f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowReport {
    #[serde(rename = "annualCashFlows")]
    pub annual_cash_flows: TrialVector,
    #[serde(rename = "meanProfit")]
    pub mean_profit: f64,
    #[serde(flatten)]
    pub stats: StatsSummary,
}

impl CashFlowScenario {
    pub fn periodic_spec(&self) -> SimResult<DistributionSpec> {
        DistributionSpec::infer(self.min, self.mean, self.max, self.sd)
    }
}

impl Scenario for CashFlowScenario {
    type Report = CashFlowReport;

    fn name(&self) -> &'static str { "cash_flow" }

    fn validate(&self) -> SimResult<()> {
        if self.periods_per_year <= 0 {
            return Err(SimError::invalid_input("periodsPerYear must be greater than 0."));
        }
        if self.periods_per_year > MAX_PERIODS_PER_YEAR {
            return Err(SimError::invalid_input(format!(
                "periodsPerYear must not exceed {MAX_PERIODS_PER_YEAR}."
            )));
        }
        self.periodic_spec().map(|_| ())
    }

    fn simulate(&self, ctx: &mut SimContext<'_>) -> SimResult<CashFlowReport> {
        let periodic = ctx.sample(&self.periodic_spec()?)?;
        let periods = usize::try_from(self.periods_per_year)
            .map_err(|_| SimError::invalid_input("periodsPerYear is out of range."))?;

        let trials = ctx.config.trial_count;
        let annual_cash_flows = ctx.run_trials(trials, |rng| {
            let year = choose_many(&periodic, periods, rng)?;
            Ok(year.iter().sum::<f64>() - self.fixed_cost)
        })?;

        let stats = summarize(&annual_cash_flows)?;
        Ok(CashFlowReport { mean_profit: stats.mean, annual_cash_flows, stats })
    }
}
