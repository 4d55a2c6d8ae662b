//! Deterministic finance helpers shared by the scenario models.

/// Net present value of `flows` at `rate`. `flows[0]` is year 0 and is
/// not discounted.
pub fn npv(rate: f64, flows: &[f64]) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Equal depreciation charge per year over `years`.
pub fn straight_line_depreciation(cost: f64, years: usize) -> f64 {
    if years == 0 {
        return 0.0;
    }
    cost / years as f64
}
