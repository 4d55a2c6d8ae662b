//! Sampling primitives.
//!
//! Triangular, uniform and normal draws come straight from `rand_distr`.
//! The truncated normal is rejection-sampled: draw from Normal(mean, sd),
//! discard anything outside [min, max], draw again. The loop is bounded by
//! `max_attempts` and polls the cancel token on every attempt, so a bad
//! parameter set produces an error instead of spinning forever.

use crate::{
    cancel::CancelToken,
    config::EngineConfig,
    distribution::{DistributionFamily, DistributionSpec},
    error::{SimError, SimResult},
    types::SampleSet,
};
use rand::Rng;
use rand_distr::{Distribution, Normal, Triangular, Uniform};
use serde::{Deserialize, Serialize};

/// Where the rejection sampler centers its next draw after a rejection.
///
/// `Fixed` always redraws around the mean. `Alternating` reproduces the
/// legacy behavior where every retry swapped the mean and upper bound:
/// odd retries draw around `max` and accept only values in `[min, mean]`.
/// Both only ever accept values inside `[min, max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryCenter {
    #[default]
    Fixed,
    Alternating,
}

pub struct Sampler<'a> {
    max_attempts: u32,
    retry_center: RetryCenter,
    cancel:       &'a CancelToken,
}

impl<'a> Sampler<'a> {
    pub fn new(max_attempts: u32, retry_center: RetryCenter, cancel: &'a CancelToken) -> Self {
        Self { max_attempts, retry_center, cancel }
    }

    pub fn from_config(config: &EngineConfig, cancel: &'a CancelToken) -> Self {
        Self::new(config.max_rejection_attempts, config.retry_center, cancel)
    }

    /// Draw `count` values from `spec`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        spec: &DistributionSpec,
        count: usize,
        rng: &mut R,
    ) -> SimResult<SampleSet> {
        let values: SampleSet = match spec.family {
            DistributionFamily::Triangular => {
                let dist = triangular(spec.min, spec.center, spec.max)?;
                dist.sample_iter(&mut *rng).take(count).collect()
            }
            DistributionFamily::Uniform => {
                let dist = uniform(spec.min, spec.max)?;
                dist.sample_iter(&mut *rng).take(count).collect()
            }
            DistributionFamily::Normal => {
                let dist = normal(spec.center, spec.sd)?;
                dist.sample_iter(&mut *rng).take(count).collect()
            }
            DistributionFamily::TruncatedNormal => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.truncated_normal(spec.min, spec.center, spec.max, spec.sd, &mut *rng)?);
                }
                values
            }
        };
        log::debug!(
            "sampled {count} values from {} (min={}, center={}, max={}, sd={})",
            spec.family.name(), spec.min, spec.center, spec.max, spec.sd
        );
        Ok(values)
    }

    /// Truncated-normal samples with the legacy argument order of the
    /// dedicated truncated-normal draw: the first attempt is centered on
    /// `max` with `mean` as the upper bound. Only differs from `sample`
    /// under `RetryCenter::Alternating`.
    pub fn sample_truncated_legacy_order<R: Rng + ?Sized>(
        &self,
        spec: &DistributionSpec,
        count: usize,
        rng: &mut R,
    ) -> SimResult<SampleSet> {
        if self.retry_center == RetryCenter::Fixed {
            return self.sample(spec, count, rng);
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.rejection_draw(spec.min, spec.max, spec.center, spec.sd, &mut *rng)?);
        }
        Ok(values)
    }

    /// One draw from Normal(mean, sd) restricted to `[min, max]`.
    pub fn truncated_normal<R: Rng + ?Sized>(
        &self,
        min: f64,
        mean: f64,
        max: f64,
        sd: f64,
        rng: &mut R,
    ) -> SimResult<f64> {
        self.rejection_draw(min, mean, max, sd, rng)
    }

    fn rejection_draw<R: Rng + ?Sized>(
        &self,
        min: f64,
        mut center: f64,
        mut upper: f64,
        sd: f64,
        rng: &mut R,
    ) -> SimResult<f64> {
        for _ in 0..self.max_attempts {
            self.cancel.check()?;
            let value = normal(center, sd)?.sample(rng);
            if value >= min && value <= upper {
                return Ok(value);
            }
            if self.retry_center == RetryCenter::Alternating {
                std::mem::swap(&mut center, &mut upper);
            }
        }
        let max = center.max(upper);
        log::warn!(
            "rejection sampler gave up after {} attempts (min={min}, max={max}, sd={sd})",
            self.max_attempts
        );
        Err(SimError::TruncationBoundsUnsatisfied { attempts: self.max_attempts, min, max })
    }
}

/// Pick one value uniformly at random, with replacement.
pub fn choose<R: Rng + ?Sized>(samples: &[f64], rng: &mut R) -> SimResult<f64> {
    if samples.is_empty() {
        return Err(SimError::invalid_input("cannot draw from an empty sample set"));
    }
    Ok(samples[rng.gen_range(0..samples.len())])
}

/// Pick `k` values uniformly at random, with replacement.
pub fn choose_many<R: Rng + ?Sized>(samples: &[f64], k: usize, rng: &mut R) -> SimResult<Vec<f64>> {
    (0..k).map(|_| choose(samples, &mut *rng)).collect()
}

/// One unbounded draw from Normal(mean, sd). `sd == 0` returns `mean`.
pub fn draw_normal<R: Rng + ?Sized>(mean: f64, sd: f64, rng: &mut R) -> SimResult<f64> {
    Ok(normal(mean, sd)?.sample(rng))
}

fn triangular(min: f64, mode: f64, max: f64) -> SimResult<Triangular<f64>> {
    if !(max - min).is_finite() {
        return Err(SimError::invalid_distribution(format!(
            "triangular span overflows: [{min}, {max}]"
        )));
    }
    Triangular::new(min, max, mode)
        .map_err(|e| SimError::invalid_distribution(format!("triangular({min}, {mode}, {max}): {e}")))
}

fn uniform(min: f64, max: f64) -> SimResult<Uniform<f64>> {
    if !((max - min).is_finite() && min < max) {
        return Err(SimError::invalid_distribution(format!(
            "uniform requires finite min < max, got [{min}, {max})"
        )));
    }
    Ok(Uniform::new(min, max))
}

fn normal(mean: f64, sd: f64) -> SimResult<Normal<f64>> {
    Normal::new(mean, sd)
        .map_err(|e| SimError::invalid_distribution(format!("normal({mean}, {sd}): {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    fn sampler(cancel: &CancelToken) -> Sampler<'_> {
        Sampler::new(10_000, RetryCenter::Fixed, cancel)
    }

    #[test]
    fn triangular_stays_in_support_and_varies() {
        let cancel = CancelToken::new();
        let spec = DistributionSpec::infer(200.0, 400.0, 600.0, 0.0).unwrap();
        let mut rng = SimRng::new(42);
        let values = sampler(&cancel).sample(&spec, 1000, &mut rng).unwrap();

        assert_eq!(values.len(), 1000);
        assert!(values.iter().all(|v| (200.0..=600.0).contains(v)));
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(lo < hi, "triangular samples are constant");
    }

    #[test]
    fn uniform_is_half_open() {
        let cancel = CancelToken::new();
        let spec = DistributionSpec::uniform(-1.0, 1.0).unwrap();
        let mut rng = SimRng::new(1);
        let values = sampler(&cancel).sample(&spec, 500, &mut rng).unwrap();
        assert!(values.iter().all(|v| *v >= -1.0 && *v < 1.0));
    }

    #[test]
    fn truncated_normal_respects_bounds_under_both_policies() {
        let cancel = CancelToken::new();
        let spec = DistributionSpec::infer(200.0, 400.0, 600.0, 150.0).unwrap();
        for policy in [RetryCenter::Fixed, RetryCenter::Alternating] {
            let s = Sampler::new(10_000, policy, &cancel);
            let mut rng = SimRng::new(42);
            let values = s.sample(&spec, 1000, &mut rng).unwrap();
            assert!(
                values.iter().all(|v| (200.0..=600.0).contains(v)),
                "{policy:?} produced an out-of-bounds value"
            );
            let mut rng = SimRng::new(42);
            let legacy = s.sample_truncated_legacy_order(&spec, 1000, &mut rng).unwrap();
            assert!(legacy.iter().all(|v| (200.0..=600.0).contains(v)));
        }
    }

    #[test]
    fn unreachable_bounds_report_an_error() {
        let cancel = CancelToken::new();
        let s = Sampler::new(50, RetryCenter::Fixed, &cancel);
        let mut rng = SimRng::new(42);
        // The window sits a million sd above the mean; no draw will land.
        let err = s.truncated_normal(1e6, 0.0, 1e6 + 1.0, 1.0, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::TruncationBoundsUnsatisfied { attempts: 50, .. }));
    }

    #[test]
    fn cancelled_token_stops_rejection_loop() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut rng = SimRng::new(42);
        let err = sampler(&cancel).truncated_normal(0.0, 0.5, 1.0, 1.0, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::Cancelled));
    }

    #[test]
    fn overflowing_span_errors_instead_of_panicking() {
        let cancel = CancelToken::new();
        let mut rng = SimRng::new(42);
        for family in [DistributionFamily::Uniform, DistributionFamily::Triangular] {
            // Built by hand so it skips DistributionSpec validation.
            let spec = DistributionSpec { family, min: -1e308, center: 0.0, max: 1e308, sd: 0.0 };
            let err = sampler(&cancel).sample(&spec, 10, &mut rng).unwrap_err();
            assert!(matches!(err, SimError::InvalidDistributionParameters { .. }), "{family:?}");
        }
    }

    /// Replays the rejection loop by hand. Attempt k of every value draws
    /// around `centers[k % 2]` and accepts `[min, uppers[k % 2]]`.
    fn replay(seed: u64, count: usize, min: f64, centers: [f64; 2], uppers: [f64; 2], sd: f64) -> Vec<f64> {
        let mut rng = SimRng::new(seed);
        let mut values = Vec::with_capacity(count);
        while values.len() < count {
            let mut attempt = 0;
            loop {
                let k = attempt % 2;
                let v = Normal::new(centers[k], sd).unwrap().sample(&mut rng);
                if v >= min && v <= uppers[k] {
                    values.push(v);
                    break;
                }
                attempt += 1;
            }
        }
        values
    }

    #[test]
    fn legacy_order_starts_around_max_with_mean_as_upper_bound() {
        let cancel = CancelToken::new();
        let s = Sampler::new(10_000, RetryCenter::Alternating, &cancel);
        let spec = DistributionSpec::truncated_normal(0.0, 1.0, 10.0, 2.0).unwrap();
        let mut rng = SimRng::new(7);
        let got = s.sample_truncated_legacy_order(&spec, 200, &mut rng).unwrap();

        assert_eq!(got, replay(7, 200, 0.0, [10.0, 1.0], [1.0, 10.0], 2.0));
        // Retries around the mean may land above it; first attempts never do.
        assert!(got.iter().any(|v| *v > 1.0));
    }

    #[test]
    fn alternating_retry_swaps_mean_and_max() {
        let cancel = CancelToken::new();
        let s = Sampler::new(10_000, RetryCenter::Alternating, &cancel);
        let spec = DistributionSpec::truncated_normal(0.0, 1.0, 10.0, 2.0).unwrap();
        let mut rng = SimRng::new(7);
        let got = s.sample(&spec, 200, &mut rng).unwrap();
        assert_eq!(got, replay(7, 200, 0.0, [1.0, 10.0], [10.0, 1.0], 2.0));
    }

    #[test]
    fn fixed_retry_always_centers_on_mean() {
        let cancel = CancelToken::new();
        let spec = DistributionSpec::truncated_normal(0.0, 1.0, 10.0, 2.0).unwrap();
        let mut rng = SimRng::new(7);
        let got = sampler(&cancel).sample_truncated_legacy_order(&spec, 200, &mut rng).unwrap();
        assert_eq!(got, replay(7, 200, 0.0, [1.0, 1.0], [10.0, 10.0], 2.0));
    }

    #[test]
    fn choose_rejects_empty_input() {
        let mut rng = SimRng::new(42);
        assert!(choose(&[], &mut rng).is_err());
        let picks = choose_many(&[1.0, 2.0, 3.0], 12, &mut rng).unwrap();
        assert_eq!(picks.len(), 12);
        assert!(picks.iter().all(|v| [1.0, 2.0, 3.0].contains(v)));
    }
}
