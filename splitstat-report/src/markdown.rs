//! Markdown Report
//!
//! Renders the canonical written report: summary estimates with
//! confidence intervals, the significance interpretation, and forward
//! sample size guidance for the next test.

use crate::report::Report;

/// Generate the Markdown experiment report
pub fn generate_markdown_report(report: &Report) -> String {
    let r = &report.result;
    let cfg = &report.meta.config;
    let mut out = String::new();

    out.push_str("# A/B Test Report — Conversion Analysis\n\n");
    out.push_str(&format!(
        "**Dataset**: {} (N={})\n\n",
        report.meta.dataset, report.meta.total_observations
    ));
    out.push_str(&format!(
        "**Generated**: {} by splitstat {}\n\n",
        report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        report.meta.version
    ));

    out.push_str("## Summary\n");
    out.push_str(&format!(
        "- Control ({}) Conversion: {:.4}  ({:.0}% CI: [{:.4}, {:.4}])\n",
        report.control_label,
        r.control.conversion_rate,
        r.control.interval.level * 100.0,
        r.control.interval.lower,
        r.control.interval.upper
    ));
    out.push_str(&format!(
        "- Treatment ({}) Conversion: {:.4}  ({:.0}% CI: [{:.4}, {:.4}])\n",
        report.treatment_label,
        r.treatment.conversion_rate,
        r.treatment.interval.level * 100.0,
        r.treatment.interval.lower,
        r.treatment.interval.upper
    ));
    out.push_str(&format!(
        "- Absolute Lift: {:.4}\n",
        r.effect.absolute_lift
    ));
    out.push_str(&format!(
        "- Relative Lift: {}\n",
        format_relative_lift(r.effect.relative_lift)
    ));
    out.push_str(&format!(
        "- {} z-test: z = {:.3}, p-value = {}\n\n",
        capitalize(&cfg.alternative.to_string()),
        r.test.statistic,
        format_p_value(r.test.p_value)
    ));

    out.push_str("## Interpretation\n");
    if r.significant {
        out.push_str("Significant difference detected between groups.\n\n");
    } else {
        out.push_str(&format!(
            "No statistically significant difference detected at α={}.\n\n",
            cfg.alpha
        ));
    }

    out.push_str("## Sample Size Guidance\n");
    out.push_str(&format!(
        "- Baseline conversion (control): {:.4}\n",
        r.control.conversion_rate
    ));
    out.push_str(&format!(
        "- To detect an **absolute** lift of {:.1} percentage points (MDE = {}) \
         with {:.0}% power at α={}, you need:\n",
        cfg.target_mde * 100.0,
        cfg.target_mde,
        cfg.power * 100.0,
        cfg.alpha
    ));
    out.push_str(&format!(
        "  - **~{} users per group** ({} total).\n",
        r.recommendation.per_group, r.recommendation.total
    ));

    out
}

/// Relative lift as a percentage, or "n/a" when the baseline is zero
fn format_relative_lift(relative_lift: f64) -> String {
    if relative_lift.is_nan() {
        "n/a (control rate is zero)".to_string()
    } else {
        format!("{:.2}%", relative_lift * 100.0)
    }
}

/// p-values get four decimals, switching to scientific notation when tiny
fn format_p_value(p: f64) -> String {
    if p != 0.0 && p < 1e-4 {
        format!("{:.2e}", p)
    } else {
        format!("{:.4}", p)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
