//! Multi-year NPV projection scenario.

use montecarlo_core::{npv_scenario::NpvScenario, SimEngine, SimError};

fn scenario() -> NpvScenario {
    NpvScenario {
        fixed_cost: 1000.0,
        year_one_units: 500.0,
        year_one_margin: 1.5,
        decay_min: 0.0,
        decay_mean: 0.1,
        decay_max: 0.3,
        decay_sd: 0.0,
        margin_decrease: 0.02,
        tax_rate: 0.25,
        discount_rate: 0.08,
        trials: None,
    }
}

#[test]
fn every_trial_matches_some_decay_in_range() {
    let engine = SimEngine::with_seed(42);
    let s = scenario();
    let report = engine.run(&s).unwrap();

    // NPV falls as decay rises, so the decay support bounds every trial.
    let best = s.trial_npv(s.decay_min);
    let worst = s.trial_npv(s.decay_max);
    assert!(worst < best);
    assert!(report.simulated_npvs.iter().all(|v| *v <= best + 1e-9 && *v >= worst - 1e-9));
}

#[test]
fn trial_override_sets_vector_length() {
    let engine = SimEngine::with_seed(42);
    let s = NpvScenario { trials: Some(64), ..scenario() };
    let report = engine.run(&s).unwrap();
    assert_eq!(report.simulated_npvs.len(), 64);
}

#[test]
fn unprofitable_project_reports_value_at_risk() {
    let engine = SimEngine::with_seed(42);
    let s = NpvScenario { year_one_units: 10.0, ..scenario() };
    let report = engine.run(&s).unwrap();
    assert!(report.mean_npv < 0.0);
    assert_eq!(report.stats.p_loss_lower_ci, 1.0);
    assert!(report.stats.value_at_risk > 0.0);
}

#[test]
fn invalid_rates_named_in_error() {
    let engine = SimEngine::with_seed(42);
    let err = engine.run(&NpvScenario { tax_rate: 1.2, ..scenario() }).unwrap_err();
    assert!(matches!(err, SimError::InvalidPercentage { name: "taxRate" }));
    assert_eq!(err.to_string(), "taxRate must be between 0 and 1.");
}

#[test]
fn serializes_npv_keys() {
    let engine = SimEngine::with_seed(42);
    let json = serde_json::to_value(engine.run(&scenario()).unwrap()).unwrap();
    assert!(json.get("simulatedNPVs").is_some());
    assert!(json.get("meanNPV").is_some());
    assert!(json.get("valueAtRisk").is_some());
}
