//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use splitstat_stats::{Alternative, ExperimentResult};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete experiment report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Provenance and configuration
    pub meta: ReportMeta,
    /// Arm labels as found in the dataset (control, treatment)
    pub control_label: String,
    /// Treatment arm label
    pub treatment_label: String,
    /// The full statistical result
    pub result: ExperimentResult,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Schema version for downstream consumers
    pub schema_version: u32,
    /// Tool version
    pub version: String,
    /// UTC time of report generation
    pub timestamp: DateTime<Utc>,
    /// Dataset name or path as supplied by the caller
    pub dataset: String,
    /// Total rows across both arms
    pub total_observations: u64,
    /// Analysis configuration captured for reproducibility
    pub config: AnalysisConfig,
}

/// Analysis configuration captured in report metadata
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Significance level
    pub alpha: f64,
    /// Planning power
    pub power: f64,
    /// Target minimum detectable effect (absolute)
    pub target_mde: f64,
    /// Alternative hypothesis used by the z-test
    pub alternative: Alternative,
}

impl Report {
    /// Assemble a report from an analysis result and its provenance
    pub fn new(
        dataset: impl Into<String>,
        control_label: impl Into<String>,
        treatment_label: impl Into<String>,
        result: ExperimentResult,
        config: AnalysisConfig,
    ) -> Self {
        let total_observations = result.control.observed.trials + result.treatment.observed.trials;
        Self {
            meta: ReportMeta {
                schema_version: SCHEMA_VERSION,
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                dataset: dataset.into(),
                total_observations,
                config,
            },
            control_label: control_label.into(),
            treatment_label: treatment_label.into(),
            result,
        }
    }
}

/// Build the canonical 50/1000 vs 65/1000 report used across renderer tests
#[cfg(test)]
pub(crate) fn sample_report() -> Report {
    use splitstat_stats::{ArmObservation, TestParameters, analyze_experiment};

    let params = TestParameters {
        alpha: 0.05,
        power: 0.8,
        alternative: Alternative::TwoSided,
    };
    let result = analyze_experiment(
        ArmObservation::new(50, 1000).unwrap(),
        ArmObservation::new(65, 1000).unwrap(),
        &params,
        0.01,
    )
    .unwrap();
    Report::new(
        "synthetic_ab_data.csv",
        "A_control",
        "B_treatment",
        result,
        AnalysisConfig {
            alpha: 0.05,
            power: 0.8,
            target_mde: 0.01,
            alternative: Alternative::TwoSided,
        },
    )
}
