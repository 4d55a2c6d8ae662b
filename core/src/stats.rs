//! Statistics aggregation over a trial vector.
//!
//! All intervals are 95% normal approximations (z = 1.96). Value-at-risk
//! is the 5th percentile negated and floored at zero: a position whose
//! 5th-percentile outcome is still a gain has nothing at risk.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

pub const Z_95: f64 = 1.96;
pub const VAR_PERCENTILE: f64 = 0.05;

/// Summary statistics of one scenario run.
///
/// `mean` is not serialized here; each report publishes it under its own
/// key (`meanProfit`, `meanNPV`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(skip)]
    pub mean: f64,
    #[serde(rename = "meanStandardError")]
    pub standard_error: f64,
    #[serde(rename = "meanLowerCI")]
    pub mean_lower_ci: f64,
    #[serde(rename = "meanUpperCI")]
    pub mean_upper_ci: f64,
    #[serde(rename = "pLoseMoneyLowerCI")]
    pub p_loss_lower_ci: f64,
    #[serde(rename = "pLoseMoneyUpperCI")]
    pub p_loss_upper_ci: f64,
    #[serde(rename = "valueAtRisk")]
    pub value_at_risk: f64,
}

pub fn summarize(trials: &[f64]) -> SimResult<StatsSummary> {
    if trials.is_empty() {
        return Err(SimError::invalid_input("cannot summarize an empty trial vector"));
    }
    let n = trials.len() as f64;

    let mean = mean(trials);
    let standard_error = sample_std_dev(trials, mean) / n.sqrt();
    let half_width = Z_95 * standard_error;

    let p_loss = trials.iter().filter(|v| **v < 0.0).count() as f64 / n;
    let p_half_width = Z_95 * (p_loss * (1.0 - p_loss) / n).sqrt();

    let value_at_risk = (-percentile(trials, VAR_PERCENTILE)).max(0.0);

    Ok(StatsSummary {
        mean,
        standard_error,
        mean_lower_ci: mean - half_width,
        mean_upper_ci: mean + half_width,
        p_loss_lower_ci: (p_loss - p_half_width).clamp(0.0, 1.0),
        p_loss_upper_ci: (p_loss + p_half_width).clamp(0.0, 1.0),
        value_at_risk,
    })
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator); 0.0 when n < 2.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Percentile with linear interpolation between order statistics at rank
/// `q * (n - 1)`. `q` is a fraction in [0, 1]. Returns NaN for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}
