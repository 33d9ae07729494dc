#![warn(missing_docs)]
//! # Splitstat
//!
//! Batch analysis of two-arm A/B tests over binary conversion outcomes:
//! - **Two-proportion z-test**: pooled-variance significance testing with
//!   two-sided and directional alternatives
//! - **Wilson intervals**: per-arm confidence intervals that stay honest
//!   at small samples and extreme proportions
//! - **Sample size planning**: minimum per-group N to detect a target
//!   effect at the requested power
//! - **Reporting**: Markdown, JSON, terminal output, and an SVG chart
//!
//! ## Quick Start
//!
//! ```
//! use splitstat::{Alternative, ArmObservation, TestParameters, analyze_experiment};
//!
//! let control = ArmObservation::new(50, 1000).unwrap();
//! let treatment = ArmObservation::new(65, 1000).unwrap();
//! let params = TestParameters {
//!     alpha: 0.05,
//!     power: 0.8,
//!     alternative: Alternative::TwoSided,
//! };
//!
//! let result = analyze_experiment(control, treatment, &params, 0.01).unwrap();
//! assert!(!result.significant);
//! ```

// Re-export the statistical core
pub use splitstat_stats::{
    AnalysisError, Alternative, ArmObservation, ArmSummary, ConfidenceInterval, EffectSummary,
    ExperimentResult, PlanError, SampleSizeRecommendation, TestParameters, ZTestError, ZTestResult,
    analyze_experiment, normal_cdf, normal_quantile, proportion_z_test, required_sample_size,
    wilson_interval,
};

// Re-export reporting
pub use splitstat_report::{
    AnalysisConfig, ChartOptions, ChartTheme, OutputFormat, Report, generate_conversion_chart,
    generate_json_report, generate_markdown_report,
};

// Re-export ingestion and the CLI harness
pub use splitstat_cli::{
    ArmCounts, IngestError, format_human_output, load_arm_counts, parse_arm_counts, select_arms,
};

/// Run the Splitstat CLI harness.
///
/// Call this from the binary's `main()`:
/// ```ignore
/// fn main() {
///     splitstat::run().unwrap();
/// }
/// ```
pub use splitstat_cli::run;
