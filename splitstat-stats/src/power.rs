//! Sample Size Planning
//!
//! Computes the minimum per-group sample size for a future two-sided
//! two-proportion z-test to detect a given absolute effect at the
//! requested significance and power.

use crate::normal::normal_quantile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recommended sample size for a future experiment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SampleSizeRecommendation {
    /// Minimum participants per group
    pub per_group: u64,
    /// Minimum participants across both groups
    pub total: u64,
}

/// Errors from sample size planning
#[derive(Debug, Clone, Error)]
pub enum PlanError {
    #[error("Minimum detectable effect must be non-zero")]
    ZeroEffect,

    #[error("Baseline proportion {0} must lie strictly between 0 and 1")]
    BaselineOutOfRange(f64),

    #[error("Baseline {baseline} plus effect {mde} leaves the (0, 1) interval")]
    TargetOutOfRange { baseline: f64, mde: f64 },

    #[error("Alpha {0} must lie strictly between 0 and 1")]
    InvalidAlpha(f64),

    #[error("Power {0} must lie strictly between 0 and 1")]
    InvalidPower(f64),
}

/// Minimum per-group sample size to detect an absolute effect `mde`
/// at baseline proportion `baseline`
///
/// Uses the standard two-proportion formula with pooled and unpooled
/// variance terms, rounding UP so power is never understated.
///
/// # Errors
/// `PlanError` when the baseline, target proportion, effect, alpha, or
/// power fall outside their valid open intervals. `mde = 0` in
/// particular must be rejected, not divided by.
pub fn required_sample_size(
    baseline: f64,
    mde: f64,
    alpha: f64,
    power: f64,
) -> Result<SampleSizeRecommendation, PlanError> {
    if mde == 0.0 || !mde.is_finite() {
        return Err(PlanError::ZeroEffect);
    }
    if !(0.0..=1.0).contains(&baseline) || baseline == 0.0 || baseline == 1.0 {
        return Err(PlanError::BaselineOutOfRange(baseline));
    }
    let target = baseline + mde;
    if target <= 0.0 || target >= 1.0 {
        return Err(PlanError::TargetOutOfRange { baseline, mde });
    }
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err(PlanError::InvalidAlpha(alpha));
    }
    if power <= 0.0 || power >= 1.0 {
        return Err(PlanError::InvalidPower(power));
    }

    let z_alpha = normal_quantile(1.0 - alpha / 2.0);
    let z_beta = normal_quantile(power);

    let p_bar = (baseline + target) / 2.0;
    let q_bar = 1.0 - p_bar;
    let v1 = baseline * (1.0 - baseline);
    let v2 = target * (1.0 - target);

    let numerator = z_alpha * (2.0 * p_bar * q_bar).sqrt() + z_beta * (v1 + v2).sqrt();
    let n = (numerator * numerator) / (mde * mde);

    let per_group = n.ceil() as u64;
    Ok(SampleSizeRecommendation {
        per_group,
        total: per_group * 2,
    })
}
