//! Production planning scenario.

use montecarlo_core::{
    config::EngineConfig, production_scenario::ProductionScenario, SimEngine, SimError,
};

fn scenario() -> ProductionScenario {
    ProductionScenario {
        unit_cost: 6.0,
        unit_price: 15.0,
        salvage_price: 2.0,
        demand_min: 80.0,
        demand_mode: 120.0,
        demand_max: 200.0,
        demand_sd: 0.0,
        fixed_cost: 250.0,
        production_quantity: 130.0,
    }
}

/// Fixed demand of 100 with no costs: every trial earns exactly 100 × price.
#[test]
fn fixed_demand_without_costs_is_deterministic() {
    let engine = SimEngine::with_seed(42);
    let s = ProductionScenario {
        unit_cost: 0.0,
        unit_price: 9.5,
        salvage_price: 0.0,
        demand_min: 100.0,
        demand_mode: 100.0,
        demand_max: 100.0,
        demand_sd: 0.0,
        fixed_cost: 0.0,
        production_quantity: 100.0,
    };
    let report = engine.run(&s).unwrap();

    assert_eq!(report.simulated_profits.len(), 1000);
    assert!(report.simulated_profits.iter().all(|p| *p == 950.0));
    assert_eq!(report.mean_profit, 950.0);
    assert_eq!(report.stats.standard_error, 0.0);
    assert_eq!(report.stats.value_at_risk, 0.0);
    assert_eq!(report.stats.p_loss_upper_ci, 0.0);
}

/// Profit can never exceed selling the full run at list price.
#[test]
fn profits_bounded_by_full_sellthrough() {
    let engine = SimEngine::with_seed(42);
    let s = scenario();
    let ceiling = s.production_quantity * (s.unit_price - s.unit_cost) - s.fixed_cost;
    let floor = s.production_quantity * (s.salvage_price - s.unit_cost) - s.fixed_cost;

    let report = engine.run(&s).unwrap();
    assert!(report.simulated_profits.iter().all(|p| *p <= ceiling + 1e-9 && *p >= floor - 1e-9));
    assert!(report.stats.mean_lower_ci <= report.mean_profit);
    assert!(report.mean_profit <= report.stats.mean_upper_ci);
}

#[test]
fn heavy_fixed_cost_shows_up_as_risk() {
    let engine = SimEngine::with_seed(42);
    let s = ProductionScenario { fixed_cost: 1000.0, ..scenario() };
    let report = engine.run(&s).unwrap();
    assert!(report.stats.p_loss_lower_ci > 0.0);
    assert!(report.stats.value_at_risk > 0.0);
}

#[test]
fn trial_count_follows_config() {
    let engine = SimEngine::new(EngineConfig { trial_count: 250, ..EngineConfig::default() });
    let report = engine.run(&scenario()).unwrap();
    assert_eq!(report.simulated_profits.len(), 250);
}

#[test]
fn invalid_demand_rejected() {
    let engine = SimEngine::with_seed(42);
    let s = ProductionScenario { demand_min: 300.0, ..scenario() };
    assert!(matches!(engine.run(&s), Err(SimError::InvalidDistributionParameters { .. })));
}

#[test]
fn report_serializes_with_response_keys() {
    let engine = SimEngine::with_seed(42);
    let json = serde_json::to_value(engine.run(&scenario()).unwrap()).unwrap();
    for key in [
        "simulatedProfits",
        "meanProfit",
        "meanStandardError",
        "meanLowerCI",
        "meanUpperCI",
        "pLoseMoneyLowerCI",
        "pLoseMoneyUpperCI",
        "valueAtRisk",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}
