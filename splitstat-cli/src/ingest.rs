//! Dataset Ingestion
//!
//! Reads the experiment CSV and aggregates rows into per-arm counts.
//! The format matches the exported event table: a header row naming at
//! least the group and outcome columns, then one row per participant
//! with a 0/1 (or true/false) conversion outcome.

use splitstat_stats::ArmObservation;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Aggregated counts for one arm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArmCounts {
    /// Converted participants
    pub successes: u64,
    /// All participants
    pub trials: u64,
}

/// Errors from dataset ingestion
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset is empty (no header row)")]
    Empty,

    #[error("Dataset has a header but no data rows")]
    NoRows,

    #[error("Column '{0}' not found in header")]
    MissingColumn(String),

    #[error("Line {line}: expected at least {expected} fields, got {got}")]
    ShortRow { line: usize, expected: usize, got: usize },

    #[error("Line {line}: cannot parse outcome '{value}' as 0/1")]
    BadOutcome { line: usize, value: String },

    #[error("Arm '{0}' not present in dataset")]
    MissingArm(String),
}

/// Load a CSV file and aggregate conversion counts per arm label
///
/// Arms are returned in label order; rows belonging to arms other than
/// the ones later selected still aggregate here, so a dataset with
/// extra variants loads fine.
pub fn load_arm_counts(
    path: impl AsRef<Path>,
    group_column: &str,
    outcome_column: &str,
) -> Result<BTreeMap<String, ArmCounts>, IngestError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_arm_counts(&content, group_column, outcome_column)
}

/// Parse CSV content into per-arm counts
pub fn parse_arm_counts(
    content: &str,
    group_column: &str,
    outcome_column: &str,
) -> Result<BTreeMap<String, ArmCounts>, IngestError> {
    let mut lines = content.lines().enumerate();

    let (_, header) = lines.next().ok_or(IngestError::Empty)?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let group_idx = find_column(&columns, group_column)?;
    let outcome_idx = find_column(&columns, outcome_column)?;
    let needed = group_idx.max(outcome_idx) + 1;

    let mut counts: BTreeMap<String, ArmCounts> = BTreeMap::new();
    let mut saw_rows = false;

    for (index, raw) in lines {
        let line = index + 1; // 1-based for messages
        if raw.trim().is_empty() {
            continue;
        }
        saw_rows = true;

        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if fields.len() < needed {
            return Err(IngestError::ShortRow {
                line,
                expected: needed,
                got: fields.len(),
            });
        }

        let converted = parse_outcome(fields[outcome_idx]).ok_or_else(|| {
            IngestError::BadOutcome {
                line,
                value: fields[outcome_idx].to_string(),
            }
        })?;

        let entry = counts.entry(fields[group_idx].to_string()).or_default();
        entry.trials += 1;
        if converted {
            entry.successes += 1;
        }
    }

    if !saw_rows {
        return Err(IngestError::NoRows);
    }
    Ok(counts)
}

/// Pick the configured control/treatment pair out of the aggregated arms
pub fn select_arms(
    counts: &BTreeMap<String, ArmCounts>,
    control_label: &str,
    treatment_label: &str,
) -> Result<(ArmCounts, ArmCounts), IngestError> {
    let control = counts
        .get(control_label)
        .copied()
        .ok_or_else(|| IngestError::MissingArm(control_label.to_string()))?;
    let treatment = counts
        .get(treatment_label)
        .copied()
        .ok_or_else(|| IngestError::MissingArm(treatment_label.to_string()))?;
    Ok((control, treatment))
}

impl ArmCounts {
    /// Convert to a validated core observation
    pub fn to_observation(self) -> Result<ArmObservation, splitstat_stats::AnalysisError> {
        ArmObservation::new(self.successes, self.trials)
    }
}

fn find_column(columns: &[&str], name: &str) -> Result<usize, IngestError> {
    columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case(name))
        .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
}

fn parse_outcome(value: &str) -> Option<bool> {
    match value {
        "0" => Some(false),
        "1" => Some(true),
        _ => match value.to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
    }
}
