//! Two-Proportion Z-Test
//!
//! Hypothesis test comparing two binomial proportions using a
//! pooled-variance z-statistic. The pooled estimate is used for every
//! alternative, matching standard practice for the null hypothesis of
//! equal proportions.

use crate::normal::normal_cdf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Alternative hypothesis for the test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// Proportions differ in either direction (default)
    #[default]
    TwoSided,
    /// Second arm's proportion is greater than the first's
    Greater,
    /// Second arm's proportion is less than the first's
    Less,
}

impl std::fmt::Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alternative::TwoSided => write!(f, "two-sided"),
            Alternative::Greater => write!(f, "greater"),
            Alternative::Less => write!(f, "less"),
        }
    }
}

impl std::str::FromStr for Alternative {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "two-sided" | "two_sided" | "twosided" => Ok(Alternative::TwoSided),
            "greater" | "larger" => Ok(Alternative::Greater),
            "less" | "smaller" => Ok(Alternative::Less),
            other => Err(format!("Unknown alternative: {}", other)),
        }
    }
}

/// Result of a two-proportion z-test
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZTestResult {
    /// The z statistic, positive when the second arm converts higher
    pub statistic: f64,
    /// p-value under the selected alternative, in [0, 1]
    ///
    /// May saturate to exactly 0.0 or 1.0 at extreme z.
    pub p_value: f64,
}

/// Errors from the z-test
#[derive(Debug, Clone, Error)]
pub enum ZTestError {
    #[error("Both arms need at least one trial (got {trials_a} and {trials_b})")]
    ZeroTrials { trials_a: u64, trials_b: u64 },

    #[error("Degenerate pooled variance: pooled proportion is {pooled} so the statistic is undefined")]
    DegenerateVariance { pooled: f64 },
}

/// Compare two binomial proportions with a pooled-variance z-test
///
/// The statistic measures `(p_b - p_a) / se` where `se` derives from the
/// pooled proportion over both arms.
///
/// # Errors
/// `ZeroTrials` if either arm has no trials, `DegenerateVariance` if the
/// pooled proportion is 0 or 1 (zero standard error).
pub fn proportion_z_test(
    successes_a: u64,
    trials_a: u64,
    successes_b: u64,
    trials_b: u64,
    alternative: Alternative,
) -> Result<ZTestResult, ZTestError> {
    if trials_a == 0 || trials_b == 0 {
        return Err(ZTestError::ZeroTrials { trials_a, trials_b });
    }

    let n_a = trials_a as f64;
    let n_b = trials_b as f64;
    let p_a = successes_a as f64 / n_a;
    let p_b = successes_b as f64 / n_b;

    let pooled = (successes_a + successes_b) as f64 / (n_a + n_b);
    let se = (pooled * (1.0 - pooled) * (1.0 / n_a + 1.0 / n_b)).sqrt();
    if se == 0.0 {
        return Err(ZTestError::DegenerateVariance { pooled });
    }

    let z = (p_b - p_a) / se;
    let p_value = match alternative {
        Alternative::TwoSided => 2.0 * (1.0 - normal_cdf(z.abs())),
        Alternative::Greater => 1.0 - normal_cdf(z),
        Alternative::Less => normal_cdf(z),
    };

    Ok(ZTestResult {
        statistic: z,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_scenario() {
        // Control 50/1000 vs treatment 65/1000
        let result = proportion_z_test(50, 1000, 65, 1000, Alternative::TwoSided).unwrap();
        assert!((result.statistic - 1.440_793_2).abs() < 1e-6);
        assert!((result.p_value - 0.149_643_2).abs() < 1e-6);
    }

    #[test]
    fn test_equal_arms_give_zero_statistic() {
        let result = proportion_z_test(50, 1000, 50, 1000, Alternative::TwoSided).unwrap();
        assert!(result.statistic.abs() < f64::EPSILON);
        // The erf approximation is only good to ~1e-7, so p lands near 1.0
        assert!((result.p_value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_directional_symmetry() {
        // greater(A, B) must equal less(B, A) with the arms swapped
        let greater = proportion_z_test(50, 1000, 65, 1000, Alternative::Greater).unwrap();
        let less = proportion_z_test(65, 1000, 50, 1000, Alternative::Less).unwrap();
        assert!((greater.p_value - less.p_value).abs() < 1e-12);
        assert!((greater.statistic + less.statistic).abs() < 1e-12);
    }

    #[test]
    fn test_two_sided_is_twice_one_sided() {
        let two_sided = proportion_z_test(50, 1000, 65, 1000, Alternative::TwoSided).unwrap();
        // Observed effect is positive, so "greater" is the directional test
        let one_sided = proportion_z_test(50, 1000, 65, 1000, Alternative::Greater).unwrap();
        assert!((two_sided.p_value - 2.0 * one_sided.p_value).abs() < 1e-12);
        assert!(two_sided.p_value <= 1.0);
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(
            proportion_z_test(0, 0, 10, 100, Alternative::TwoSided),
            Err(ZTestError::ZeroTrials { .. })
        ));
        assert!(matches!(
            proportion_z_test(10, 100, 0, 0, Alternative::TwoSided),
            Err(ZTestError::ZeroTrials { .. })
        ));
    }

    #[test]
    fn test_degenerate_variance_rejected() {
        // No conversions anywhere: pooled proportion 0
        assert!(matches!(
            proportion_z_test(0, 100, 0, 100, Alternative::TwoSided),
            Err(ZTestError::DegenerateVariance { .. })
        ));
        // Everyone converts: pooled proportion 1
        assert!(matches!(
            proportion_z_test(100, 100, 100, 100, Alternative::TwoSided),
            Err(ZTestError::DegenerateVariance { .. })
        ));
    }

    #[test]
    fn test_extreme_z_saturates() {
        let result = proportion_z_test(10, 10_000, 500, 10_000, Alternative::TwoSided).unwrap();
        // The normal CDF saturates here; exact zero is a valid p-value
        assert!(result.p_value >= 0.0);
        assert!(result.p_value < 1e-12);
    }

    #[test]
    fn test_alternative_parsing() {
        assert_eq!(
            "two-sided".parse::<Alternative>().unwrap(),
            Alternative::TwoSided
        );
        assert_eq!(
            "greater".parse::<Alternative>().unwrap(),
            Alternative::Greater
        );
        assert_eq!("less".parse::<Alternative>().unwrap(), Alternative::Less);
        assert!("sideways".parse::<Alternative>().is_err());
    }
}
