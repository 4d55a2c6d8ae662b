use crate::{
    sampler::RetryCenter,
    types::{
        DEFAULT_MAX_REJECTION_ATTEMPTS, DEFAULT_SAMPLE_COUNT, DEFAULT_SEED, DEFAULT_TRIAL_COUNT,
        MAX_TRIAL_COUNT,
    },
};
use serde::{Deserialize, Serialize};

/// Engine-wide knobs. Every field has a default so a partial JSON file
/// only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub seed:                   u64,
    pub sample_count:           usize,
    pub trial_count:            usize,
    pub max_rejection_attempts: u32,
    pub retry_center:           RetryCenter,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:                   DEFAULT_SEED,
            sample_count:           DEFAULT_SAMPLE_COUNT,
            trial_count:            DEFAULT_TRIAL_COUNT,
            max_rejection_attempts: DEFAULT_MAX_REJECTION_ATTEMPTS,
            retry_center:           RetryCenter::Fixed,
        }
    }
}

impl EngineConfig {
    /// Load overrides from a JSON file, e.g. `{"seed": 7, "trial_count": 5000}`.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::debug!("Loaded engine config from {path}: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sample_count == 0 {
            anyhow::bail!("sample_count must be greater than 0");
        }
        if self.trial_count == 0 {
            anyhow::bail!("trial_count must be greater than 0");
        }
        if self.sample_count > MAX_TRIAL_COUNT || self.trial_count > MAX_TRIAL_COUNT {
            anyhow::bail!("sample_count and trial_count must not exceed {MAX_TRIAL_COUNT}");
        }
        if self.max_rejection_attempts == 0 {
            anyhow::bail!("max_rejection_attempts must be greater than 0");
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Small, fast config for unit tests.
    pub fn default_test() -> Self {
        Self {
            sample_count: 200,
            trial_count: 200,
            ..Self::default()
        }
    }
}
