//! Distribution classifier.
//!
//! Callers describe a distribution with four loosely constrained numbers
//! (min, center, max, sd). The family is inferred from which of them are
//! zero and how they are ordered. Rules are evaluated in a fixed priority
//! order and the first match wins:
//!
//!   1. triangular        sd == 0, min <= center <= max, min < max
//!   2. normal            min == 0, max == 0, sd > 0  (center is the mean)
//!   3. truncated normal  sd > 0, min <= center <= max, min < max
//!   4. uniform           center == 0, sd == 0, min < max
//!
//! NEVER reorder these rules. Rule 1 and rule 4 overlap whenever
//! min <= 0 <= max with a zero center; priority is what resolves it.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

pub const CLASSIFY_REQUIREMENTS: &str = "The provided inputs must follow one of these distributions: \
1) triangular: min <= mode <= max, min < max, sd = 0 \
2) normal: min = 0, max = 0, sd > 0 \
3) truncated normal: min <= mean <= max, min < max, sd > 0 \
4) uniform: min < max, mean = 0, sd = 0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionFamily {
    #[serde(rename = "triangular")]
    Triangular,
    #[serde(rename = "uniform")]
    Uniform,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "truncated normal")]
    TruncatedNormal,
}

impl DistributionFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Triangular      => "triangular",
            Self::Uniform         => "uniform",
            Self::Normal          => "normal",
            Self::TruncatedNormal => "truncated normal",
        }
    }
}

/// `min <= mode <= max` and `min < max`.
pub fn is_triangular(min: f64, mode: f64, max: f64) -> bool {
    min <= mode && mode <= max && min < max
}

pub fn is_percent(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Every parameter finite and `max - min` representable. Bounds near
/// ±f64::MAX pass the ordering checks but overflow the samplers.
pub fn is_finite_tuple(min: f64, center: f64, max: f64, sd: f64) -> bool {
    center.is_finite() && sd.is_finite() && (max - min).is_finite()
}

fn require_finite(min: f64, center: f64, max: f64, sd: f64) -> SimResult<()> {
    if !is_finite_tuple(min, center, max, sd) {
        return Err(SimError::invalid_distribution(format!(
            "Parameters must be finite and max - min must not overflow \
             (min={min}, center={center}, max={max}, sd={sd})"
        )));
    }
    Ok(())
}

/// Validate a rate parameter, naming it in the error.
pub fn require_percent(name: &'static str, value: f64) -> SimResult<()> {
    if !is_percent(value) {
        return Err(SimError::InvalidPercentage { name });
    }
    Ok(())
}

/// Map (min, center, max, sd) to a family, or `None` when no rule matches.
pub fn classify(min: f64, center: f64, max: f64, sd: f64) -> Option<DistributionFamily> {
    if sd == 0.0 && is_triangular(min, center, max) {
        Some(DistributionFamily::Triangular)
    } else if min == 0.0 && max == 0.0 && sd > 0.0 {
        Some(DistributionFamily::Normal)
    } else if sd > 0.0 && is_triangular(min, center, max) {
        Some(DistributionFamily::TruncatedNormal)
    } else if center == 0.0 && sd == 0.0 && min < max {
        Some(DistributionFamily::Uniform)
    } else {
        None
    }
}

/// A classified distribution together with the parameters it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    pub family: DistributionFamily,
    pub min:    f64,
    pub center: f64,
    pub max:    f64,
    pub sd:     f64,
}

impl DistributionSpec {
    /// Infer the family from the raw tuple. Fails before any sampling.
    pub fn infer(min: f64, center: f64, max: f64, sd: f64) -> SimResult<Self> {
        let family = classify(min, center, max, sd)
            .ok_or_else(|| SimError::invalid_distribution(CLASSIFY_REQUIREMENTS))?;
        require_finite(min, center, max, sd)?;
        Ok(Self { family, min, center, max, sd })
    }

    pub fn triangular(min: f64, mode: f64, max: f64) -> SimResult<Self> {
        if !is_triangular(min, mode, max) {
            return Err(SimError::invalid_distribution(
                "Please ensure the following: 1) distMin <= distMode <= distMax 2) distMin < distMax",
            ));
        }
        require_finite(min, mode, max, 0.0)?;
        Ok(Self { family: DistributionFamily::Triangular, min, center: mode, max, sd: 0.0 })
    }

    pub fn uniform(min: f64, max: f64) -> SimResult<Self> {
        if min >= max {
            return Err(SimError::invalid_distribution(
                "Please ensure the following: distMin < distMax",
            ));
        }
        require_finite(min, 0.0, max, 0.0)?;
        Ok(Self { family: DistributionFamily::Uniform, min, center: 0.0, max, sd: 0.0 })
    }

    pub fn normal(mean: f64, sd: f64) -> SimResult<Self> {
        if sd <= 0.0 {
            return Err(SimError::invalid_distribution(
                "Please ensure the following: distSD > 0",
            ));
        }
        require_finite(0.0, mean, 0.0, sd)?;
        Ok(Self { family: DistributionFamily::Normal, min: 0.0, center: mean, max: 0.0, sd })
    }

    pub fn truncated_normal(min: f64, mean: f64, max: f64, sd: f64) -> SimResult<Self> {
        if !is_triangular(min, mean, max) || sd <= 0.0 {
            return Err(SimError::invalid_distribution(
                "Please ensure the following: 1) distMin <= distMean <= distMax 2) distMin < distMax 3) distSD > 0",
            ));
        }
        require_finite(min, mean, max, sd)?;
        Ok(Self { family: DistributionFamily::TruncatedNormal, min, center: mean, max, sd })
    }
}
