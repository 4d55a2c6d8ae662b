//! Shared primitive types used across the engine.

/// Ordered draws from one distribution. One per call, never shared.
pub type SampleSet = Vec<f64>;

/// One scalar outcome (profit, cash flow, NPV) per simulated trial.
pub type TrialVector = Vec<f64>;

/// Seed used when no configuration overrides it.
pub const DEFAULT_SEED: u64 = 42;

/// Draws per SampleSet and trials per scenario run.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;
pub const DEFAULT_TRIAL_COUNT: usize = 1000;

/// Largest trial or sample count a single call may ask for.
pub const MAX_TRIAL_COUNT: usize = 1_000_000;

/// Largest number of periodic flows summed into one annual cash flow.
pub const MAX_PERIODS_PER_YEAR: i64 = 10_000;

/// Upper bound on rejected draws for a single truncated-normal value.
pub const DEFAULT_MAX_REJECTION_ATTEMPTS: u32 = 10_000;

/// Length of the multi-year and retention projections.
pub const PROJECTION_YEARS: usize = 5;
