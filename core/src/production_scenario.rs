//! Production planning: single-period newsvendor model.
//!
//! One demand SampleSet is drawn up front; each trial picks a realized
//! demand from it and computes
//!
//!   profit = sold·price + salvaged·salvage − quantity·unit_cost − fixed_cost
//!
//! where `sold = min(quantity, demand)`.

use crate::{
    distribution::DistributionSpec,
    error::{SimError, SimResult},
    sampler::choose,
    scenario::{Scenario, SimContext},
    stats::{summarize, StatsSummary},
    types::TrialVector,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductionScenario {
    pub unit_cost:           f64,
    pub unit_price:          f64,
    pub salvage_price:       f64,
    pub demand_min:          f64,
    pub demand_mode:         f64,
    pub demand_max:          f64,
    #[serde(rename = "demandSD")]
    pub demand_sd:           f64,
    pub fixed_cost:          f64,
    pub production_quantity: f64,
}

/// Where realized demand comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemandModel {
    /// min == mode == max > 0 with sd == 0: every draw is that value.
    Fixed(f64),
    Distributed(DistributionSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionReport {
    #[serde(rename = "simulatedProfits")]
    pub simulated_profits: TrialVector,
    #[serde(rename = "meanProfit")]
    pub mean_profit: f64,
    #[serde(flatten)]
    pub stats: StatsSummary,
}

impl ProductionScenario {
    pub fn demand_model(&self) -> SimResult<DemandModel> {
        let point_mass = self.demand_sd == 0.0
            && self.demand_min == self.demand_mode
            && self.demand_mode == self.demand_max
            && self.demand_max > 0.0;
        if point_mass {
            return Ok(DemandModel::Fixed(self.demand_max));
        }
        // Normal demand is centered on the mode.
        DistributionSpec::infer(self.demand_min, self.demand_mode, self.demand_max, self.demand_sd)
            .map(DemandModel::Distributed)
    }

    pub fn profit(&self, demand: f64) -> f64 {
        let sold = self.production_quantity.min(demand);
        let salvaged = self.production_quantity - sold;
        sold * self.unit_price + salvaged * self.salvage_price
            - self.production_quantity * self.unit_cost
            - self.fixed_cost
    }
}

impl Scenario for ProductionScenario {
    type Report = ProductionReport;

    fn name(&self) -> &'static str { "production" }

    fn validate(&self) -> SimResult<()> {
        if !(self.production_quantity > 0.0) {
            return Err(SimError::invalid_input("productionQuantity must be greater than 0."));
        }
        self.demand_model().map(|_| ())
    }

    fn simulate(&self, ctx: &mut SimContext<'_>) -> SimResult<ProductionReport> {
        let demand = match self.demand_model()? {
            DemandModel::Fixed(value) => vec![value; ctx.config.sample_count],
            DemandModel::Distributed(spec) => ctx.sample(&spec)?,
        };

        let trials = ctx.config.trial_count;
        let simulated_profits = ctx.run_trials(trials, |rng| {
            let realized = choose(&demand, rng)?;
            Ok(self.profit(realized))
        })?;

        let stats = summarize(&simulated_profits)?;
        Ok(ProductionReport { mean_profit: stats.mean, simulated_profits, stats })
    }
}
