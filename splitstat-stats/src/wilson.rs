//! Wilson Score Confidence Interval
//!
//! Closed-form interval for a single binomial proportion. Unlike the
//! Wald interval it stays informative at k = 0 or k = n and remains
//! accurate at small sample sizes.

use crate::normal::normal_quantile;
use serde::{Deserialize, Serialize};

/// Confidence interval bounds for a proportion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound (NaN when no data)
    pub lower: f64,
    /// Upper bound (NaN when no data)
    pub upper: f64,
    /// Confidence level, e.g. 0.95
    pub level: f64,
}

impl ConfidenceInterval {
    /// Whether the interval carries no information (zero trials)
    pub fn is_undefined(&self) -> bool {
        self.lower.is_nan() || self.upper.is_nan()
    }
}

/// Wilson score interval at confidence level `1 - alpha`
///
/// `trials = 0` yields NaN bounds: a valid "no data" result, not an
/// error. The two-sided critical value is always used, even when the
/// surrounding test is one-sided.
///
/// Bounds land within (or within floating-point distance of) [0, 1] by
/// construction and are never clipped here; clipping is the caller's
/// choice. Requires `0 < alpha < 1`.
pub fn wilson_interval(successes: u64, trials: u64, alpha: f64) -> ConfidenceInterval {
    let level = 1.0 - alpha;
    if trials == 0 {
        return ConfidenceInterval {
            lower: f64::NAN,
            upper: f64::NAN,
            level,
        };
    }

    let z = normal_quantile(1.0 - alpha / 2.0);
    let n = trials as f64;
    let p_hat = successes as f64 / n;

    let denom = 1.0 + z * z / n;
    let center = (p_hat + z * z / (2.0 * n)) / denom;
    let half = z * (p_hat * (1.0 - p_hat) / n + z * z / (4.0 * n * n)).sqrt() / denom;

    ConfidenceInterval {
        lower: center - half,
        upper: center + half,
        level,
    }
}
