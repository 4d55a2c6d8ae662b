//! Scenario trait and per-call context.
//!
//! RULE: Every simulator implements Scenario.
//! The engine calls validate() first and only calls simulate() if it
//! passes, so no sampling ever happens on invalid input.
//! All randomness flows through `SimContext::rng`.

use crate::{
    cancel::CancelToken,
    config::EngineConfig,
    distribution::DistributionSpec,
    error::{SimError, SimResult},
    sampler::Sampler,
    types::{SampleSet, MAX_TRIAL_COUNT},
};
use rand::RngCore;
use serde::Serialize;

/// The contract every scenario simulator must fulfill.
pub trait Scenario {
    /// Response body produced by one run.
    type Report: Serialize;

    /// Stable name, used for logging and as the RNG label.
    fn name(&self) -> &'static str;

    /// Reject bad input before anything is drawn.
    fn validate(&self) -> SimResult<()>;

    /// Run the model. Only called after `validate()` succeeded.
    fn simulate(&self, ctx: &mut SimContext<'_>) -> SimResult<Self::Report>;
}

/// Everything a scenario may touch during one call.
pub struct SimContext<'a> {
    pub rng:    &'a mut dyn RngCore,
    pub config: &'a EngineConfig,
    pub cancel: &'a CancelToken,
}

impl<'a> SimContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, config: &'a EngineConfig, cancel: &'a CancelToken) -> Self {
        Self { rng, config, cancel }
    }

    pub fn sampler(&self) -> Sampler<'a> {
        Sampler::from_config(self.config, self.cancel)
    }

    /// Draw one SampleSet of the configured size.
    pub fn sample(&mut self, spec: &DistributionSpec) -> SimResult<SampleSet> {
        let count = self.config.sample_count;
        if count > MAX_TRIAL_COUNT {
            return Err(SimError::invalid_input(format!(
                "sample count {count} exceeds the limit of {MAX_TRIAL_COUNT}"
            )));
        }
        let sampler = self.sampler();
        sampler.sample(spec, count, &mut *self.rng)
    }

    /// Run `count` trials, polling for cancellation before each one.
    /// Counts above `MAX_TRIAL_COUNT` are rejected before allocating.
    pub fn run_trials<T, F>(&mut self, count: usize, mut trial: F) -> SimResult<Vec<T>>
    where
        F: FnMut(&mut dyn RngCore) -> SimResult<T>,
    {
        if count > MAX_TRIAL_COUNT {
            return Err(SimError::invalid_input(format!(
                "trial count {count} exceeds the limit of {MAX_TRIAL_COUNT}"
            )));
        }
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            self.cancel.check()?;
            results.push(trial(&mut *self.rng)?);
        }
        Ok(results)
    }
}
