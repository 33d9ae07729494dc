//! Experiment Analysis Orchestration
//!
//! Combines the z-test, Wilson intervals, lift metrics, and sample size
//! planning into one immutable result. The orchestrator never masks a
//! sub-component error: a report built on one undefined statistic would
//! be misleading as a whole, so any invalid input aborts the analysis.

use crate::power::{PlanError, SampleSizeRecommendation, required_sample_size};
use crate::wilson::{ConfidenceInterval, wilson_interval};
use crate::ztest::{Alternative, ZTestError, ZTestResult, proportion_z_test};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw outcome of one experiment arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmObservation {
    /// Number of converted participants
    pub successes: u64,
    /// Number of participants exposed
    pub trials: u64,
}

impl ArmObservation {
    /// Validated constructor: at least one trial, successes bounded by trials
    pub fn new(successes: u64, trials: u64) -> Result<Self, AnalysisError> {
        if trials == 0 {
            return Err(AnalysisError::EmptyArm);
        }
        if successes > trials {
            return Err(AnalysisError::SuccessesExceedTrials { successes, trials });
        }
        Ok(Self { successes, trials })
    }

    /// Observed conversion rate
    pub fn conversion_rate(&self) -> f64 {
        self.successes as f64 / self.trials as f64
    }
}

/// Scalar parameters for one analysis run
///
/// No defaults are baked in here; the configuration layer owns defaults
/// so the core stays free of hidden global state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TestParameters {
    /// Significance level in (0, 1)
    pub alpha: f64,
    /// Desired power in (0, 1), used by the sample size planner
    pub power: f64,
    /// Alternative hypothesis for the z-test
    pub alternative: Alternative,
}

/// Absolute and relative lift of treatment over control
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectSummary {
    /// Treatment rate minus control rate
    pub absolute_lift: f64,
    /// Absolute lift divided by control rate (NaN when control rate is 0)
    pub relative_lift: f64,
}

impl EffectSummary {
    /// Derive lift metrics from two observed conversion rates
    pub fn from_rates(control_rate: f64, treatment_rate: f64) -> Self {
        let absolute_lift = treatment_rate - control_rate;
        let relative_lift = if control_rate > 0.0 {
            absolute_lift / control_rate
        } else {
            f64::NAN
        };
        Self {
            absolute_lift,
            relative_lift,
        }
    }
}

/// Per-arm estimates in the final result
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArmSummary {
    /// The raw counts this summary derives from
    pub observed: ArmObservation,
    /// Observed conversion rate
    pub conversion_rate: f64,
    /// Wilson score interval at level `1 - alpha`
    pub interval: ConfidenceInterval,
}

/// Complete outcome of one experiment analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Control arm estimates
    pub control: ArmSummary,
    /// Treatment arm estimates
    pub treatment: ArmSummary,
    /// Hypothesis test outcome
    pub test: ZTestResult,
    /// Lift metrics
    pub effect: EffectSummary,
    /// Whether `p_value < alpha`
    pub significant: bool,
    /// Forward-looking sample size at the requested target MDE
    pub recommendation: SampleSizeRecommendation,
}

/// Errors from experiment analysis
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("Arm has zero trials")]
    EmptyArm,

    #[error("Arm reports {successes} successes out of only {trials} trials")]
    SuccessesExceedTrials { successes: u64, trials: u64 },

    #[error("Alpha {0} must lie strictly between 0 and 1")]
    InvalidAlpha(f64),

    #[error("Power {0} must lie strictly between 0 and 1")]
    InvalidPower(f64),

    #[error(transparent)]
    ZTest(#[from] ZTestError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Analyze a two-arm experiment
///
/// Runs the z-test at `params.alternative`, computes two-sided Wilson
/// intervals for both arms, derives lift metrics, and plans the sample
/// size needed to detect `target_mde` from the control arm's baseline.
///
/// # Errors
/// Fails fast on any precondition violation; sub-component errors
/// propagate unmodified.
pub fn analyze_experiment(
    control: ArmObservation,
    treatment: ArmObservation,
    params: &TestParameters,
    target_mde: f64,
) -> Result<ExperimentResult, AnalysisError> {
    if params.alpha <= 0.0 || params.alpha >= 1.0 {
        return Err(AnalysisError::InvalidAlpha(params.alpha));
    }
    if params.power <= 0.0 || params.power >= 1.0 {
        return Err(AnalysisError::InvalidPower(params.power));
    }

    let control_rate = control.conversion_rate();
    let treatment_rate = treatment.conversion_rate();

    let test = proportion_z_test(
        control.successes,
        control.trials,
        treatment.successes,
        treatment.trials,
        params.alternative,
    )?;

    let effect = EffectSummary::from_rates(control_rate, treatment_rate);
    let recommendation = required_sample_size(control_rate, target_mde, params.alpha, params.power)?;

    Ok(ExperimentResult {
        control: ArmSummary {
            observed: control,
            conversion_rate: control_rate,
            interval: wilson_interval(control.successes, control.trials, params.alpha),
        },
        treatment: ArmSummary {
            observed: treatment,
            conversion_rate: treatment_rate,
            interval: wilson_interval(treatment.successes, treatment.trials, params.alpha),
        },
        significant: test.p_value < params.alpha,
        test,
        effect,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TestParameters {
        TestParameters {
            alpha: 0.05,
            power: 0.8,
            alternative: Alternative::TwoSided,
        }
    }

    #[test]
    fn test_full_analysis_scenario() {
        let control = ArmObservation::new(50, 1000).unwrap();
        let treatment = ArmObservation::new(65, 1000).unwrap();
        let result = analyze_experiment(control, treatment, &params(), 0.01).unwrap();

        assert!((result.control.conversion_rate - 0.05).abs() < 1e-12);
        assert!((result.treatment.conversion_rate - 0.065).abs() < 1e-12);
        assert!((result.effect.absolute_lift - 0.015).abs() < 1e-12);
        assert!((result.effect.relative_lift - 0.3).abs() < 1e-9);
        assert!((result.test.statistic - 1.440_793_2).abs() < 1e-6);
        assert!((result.test.p_value - 0.149_643_2).abs() < 1e-6);
        assert!(!result.significant);
        assert_eq!(result.recommendation.per_group, 8158);
    }

    #[test]
    fn test_intervals_bracket_rates() {
        let control = ArmObservation::new(50, 1000).unwrap();
        let treatment = ArmObservation::new(65, 1000).unwrap();
        let result = analyze_experiment(control, treatment, &params(), 0.01).unwrap();

        for arm in [&result.control, &result.treatment] {
            assert!(arm.interval.lower <= arm.conversion_rate);
            assert!(arm.conversion_rate <= arm.interval.upper);
            assert!((arm.interval.level - 0.95).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_significant_when_p_below_alpha() {
        let control = ArmObservation::new(500, 10_000).unwrap();
        let treatment = ArmObservation::new(700, 10_000).unwrap();
        let result = analyze_experiment(control, treatment, &params(), 0.01).unwrap();
        assert!(result.test.p_value < 0.05);
        assert!(result.significant);
    }

    #[test]
    fn test_relative_lift_undefined_at_zero_baseline() {
        let effect = EffectSummary::from_rates(0.0, 0.05);
        assert!((effect.absolute_lift - 0.05).abs() < 1e-12);
        assert!(effect.relative_lift.is_nan());
    }

    #[test]
    fn test_zero_converting_control_aborts_planning() {
        // Relative lift alone would be NaN (valid), but the planner's
        // baseline precondition fails, and the whole analysis fails fast.
        let control = ArmObservation::new(0, 1000).unwrap();
        let treatment = ArmObservation::new(65, 1000).unwrap();
        let result = analyze_experiment(control, treatment, &params(), 0.01);
        assert!(matches!(
            result,
            Err(AnalysisError::Plan(PlanError::BaselineOutOfRange(_)))
        ));
    }

    #[test]
    fn test_invalid_observation_rejected() {
        assert!(matches!(
            ArmObservation::new(0, 0),
            Err(AnalysisError::EmptyArm)
        ));
        assert!(matches!(
            ArmObservation::new(11, 10),
            Err(AnalysisError::SuccessesExceedTrials { .. })
        ));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let control = ArmObservation::new(50, 1000).unwrap();
        let treatment = ArmObservation::new(65, 1000).unwrap();

        let bad_alpha = TestParameters {
            alpha: 0.0,
            ..params()
        };
        assert!(matches!(
            analyze_experiment(control, treatment, &bad_alpha, 0.01),
            Err(AnalysisError::InvalidAlpha(_))
        ));

        let bad_power = TestParameters {
            power: 1.0,
            ..params()
        };
        assert!(matches!(
            analyze_experiment(control, treatment, &bad_power, 0.01),
            Err(AnalysisError::InvalidPower(_))
        ));
    }

    #[test]
    fn test_one_sided_alternative_flows_through() {
        let control = ArmObservation::new(50, 1000).unwrap();
        let treatment = ArmObservation::new(65, 1000).unwrap();
        let one_sided = TestParameters {
            alternative: Alternative::Greater,
            ..params()
        };
        let result = analyze_experiment(control, treatment, &one_sided, 0.01).unwrap();
        // Half the two-sided p-value for a positive observed effect
        assert!((result.test.p_value - 0.074_821_6).abs() < 1e-6);
        // Wilson intervals stay two-sided regardless
        assert!((result.control.interval.level - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_pool_propagates() {
        let control = ArmObservation::new(0, 100).unwrap();
        let treatment = ArmObservation::new(0, 100).unwrap();
        assert!(matches!(
            analyze_experiment(control, treatment, &params(), 0.01),
            Err(AnalysisError::ZTest(ZTestError::DegenerateVariance { .. }))
        ));
    }
}
