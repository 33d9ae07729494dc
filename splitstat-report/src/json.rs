//! JSON Output

use crate::report::Report;
use serde::{Deserialize, Serialize};

/// Schema information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSchema {
    /// Schema identifier
    pub schema: String,
    /// Schema version
    pub version: String,
}

/// Generate a prettified JSON report.
///
/// Serializes the experiment report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::sample_report;

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.control_label, report.control_label);
        assert_eq!(
            parsed.result.recommendation.per_group,
            report.result.recommendation.per_group
        );
        assert!((parsed.result.test.p_value - report.result.test.p_value).abs() < 1e-15);
    }

    #[test]
    fn test_json_contains_key_fields() {
        let json = generate_json_report(&sample_report()).unwrap();
        assert!(json.contains("\"schema_version\": 1"));
        assert!(json.contains("\"significant\""));
        assert!(json.contains("\"per_group\": 8158"));
        assert!(json.contains("\"alternative\": \"two-sided\""));
    }
}
