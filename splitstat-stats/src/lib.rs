#![warn(missing_docs)]
//! Splitstat Statistical Engine
//!
//! Pure numeric routines for analyzing a two-arm conversion experiment:
//! - Two-proportion z-test with pooled variance
//! - Wilson score confidence intervals (robust near 0/1 and at small N)
//! - Minimum-detectable-effect sample size planning
//! - An orchestrator combining the three into one immutable result
//!
//! Every function here is a deterministic closed-form computation over
//! immutable inputs: no I/O, no shared state, no hidden defaults. Callers
//! supply alpha/power/MDE explicitly and own all formatting concerns.

mod analysis;
mod normal;
mod power;
mod wilson;
mod ztest;

pub use analysis::{
    AnalysisError, ArmObservation, ArmSummary, EffectSummary, ExperimentResult, TestParameters,
    analyze_experiment,
};
pub use normal::{normal_cdf, normal_quantile};
pub use power::{PlanError, SampleSizeRecommendation, required_sample_size};
pub use wilson::{ConfidenceInterval, wilson_interval};
pub use ztest::{Alternative, ZTestError, ZTestResult, proportion_z_test};
