//! Output Formatting
//!
//! Human-readable terminal rendering of an experiment report:
//! per-arm rates with confidence intervals, the test verdict, lift
//! metrics, and the forward sample size recommendation.

use splitstat_report::Report;

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let r = &report.result;
    let cfg = &report.meta.config;
    let mut output = String::new();

    output.push('\n');
    output.push_str("Splitstat Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!(
        "Dataset: {}  (N={})\n\n",
        report.meta.dataset, report.meta.total_observations
    ));

    let arms = [
        (&report.control_label, &r.control),
        (&report.treatment_label, &r.treatment),
    ];
    let max_name_len = arms
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(12);

    for (label, arm) in arms {
        output.push_str(&format!(
            "  {:<width$}  rate: {:.4}  ({}/{})  {:.0}% CI: [{:.4}, {:.4}]\n",
            label,
            arm.conversion_rate,
            arm.observed.successes,
            arm.observed.trials,
            arm.interval.level * 100.0,
            arm.interval.lower,
            arm.interval.upper,
            width = max_name_len
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "  absolute lift: {:+.4}   relative lift: {}\n",
        r.effect.absolute_lift,
        if r.effect.relative_lift.is_nan() {
            "n/a".to_string()
        } else {
            format!("{:+.2}%", r.effect.relative_lift * 100.0)
        }
    ));

    let verdict = if r.significant { "✓" } else { "✗" };
    output.push_str(&format!(
        "  {} z = {:.3}, p = {:.4} ({} at α={})\n",
        verdict,
        r.test.statistic,
        r.test.p_value,
        if r.significant {
            "significant"
        } else {
            "not significant"
        },
        cfg.alpha
    ));

    output.push_str("\nSample Size Guidance\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  To detect an absolute lift of {:.4} at {:.0}% power, α={}:\n",
        cfg.target_mde,
        cfg.power * 100.0,
        cfg.alpha
    ));
    output.push_str(&format!(
        "  ~{} users per group ({} total)\n",
        r.recommendation.per_group, r.recommendation.total
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitstat_report::{AnalysisConfig, Report};
    use splitstat_stats::{Alternative, ArmObservation, TestParameters, analyze_experiment};

    fn sample_report() -> Report {
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

    #[test]
    fn test_human_output_content() {
        let text = format_human_output(&sample_report());
        assert!(text.contains("Splitstat Results"));
        assert!(text.contains("A_control"));
        assert!(text.contains("rate: 0.0500"));
        assert!(text.contains("(50/1000)"));
        assert!(text.contains("absolute lift: +0.0150"));
        assert!(text.contains("relative lift: +30.00%"));
        assert!(text.contains("not significant"));
        assert!(text.contains("~8158 users per group"));
    }
}
