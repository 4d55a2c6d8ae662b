//! The simulation engine.
//!
//! CALL ORDER (fixed for every request):
//!   1. scenario.validate()     no randomness consumed
//!   2. fresh SimRng from config.seed
//!   3. scenario.simulate()     sample once, then run the trial loop
//!   4. summary statistics on the trial vector
//!
//! RULES:
//!   - The engine holds no per-call state. Every call gets its own RNG
//!     and buffers, so concurrent calls need no locking.
//!   - Same config + same inputs ⇒ identical reports.
//!   - A cancel token, if attached, is polled inside every loop.

use crate::{
    cancel::CancelToken,
    config::EngineConfig,
    draw::{DrawReport, DrawRequest},
    error::SimResult,
    rng::SimRng,
    scenario::{Scenario, SimContext},
};
use rand::RngCore;

pub struct SimEngine {
    pub config: EngineConfig,
    cancel:     CancelToken,
}

impl SimEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, cancel: CancelToken::new() }
    }

    /// Engine with default config and a fixed seed. Used by tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(EngineConfig::default().with_seed(seed))
    }

    /// Share a cancel token with the caller.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run a scenario on a freshly seeded generator.
    pub fn run<S: Scenario>(&self, scenario: &S) -> SimResult<S::Report> {
        let mut rng = SimRng::new(self.config.seed).with_name(scenario.name());
        log::debug!("{}: fresh rng seed={}", rng.name, rng.seed());
        self.run_with_rng(scenario, &mut rng)
    }

    /// Run a scenario on a caller-supplied generator.
    pub fn run_with_rng<S: Scenario>(
        &self,
        scenario: &S,
        rng: &mut dyn RngCore,
    ) -> SimResult<S::Report> {
        if let Err(e) = scenario.validate() {
            log::debug!("{} rejected: {e}", scenario.name());
            return Err(e);
        }

        log::debug!(
            "{} starting: samples={} trials={}",
            scenario.name(),
            self.config.sample_count,
            self.config.trial_count
        );
        let mut ctx = SimContext::new(rng, &self.config, &self.cancel);
        let report = scenario.simulate(&mut ctx)?;
        log::debug!("{} finished", scenario.name());
        Ok(report)
    }

    /// Draw a plain SampleSet.
    pub fn draw(&self, request: &DrawRequest) -> SimResult<DrawReport> {
        self.run(request)
    }
}
