#![warn(missing_docs)]
//! Splitstat Report - Rendering and Visualization
//!
//! Generates output formats for an analyzed experiment:
//! - Markdown (the canonical written report)
//! - JSON (machine-readable)
//! - SVG (conversion rate chart)
//!
//! All formatting and presentation concerns live here; the statistical
//! core only hands over raw scalars and intervals.

mod chart;
mod json;
mod markdown;
mod report;

pub use chart::{ChartOptions, ChartTheme, generate_conversion_chart};
pub use json::{ReportSchema, generate_json_report};
pub use markdown::generate_markdown_report;
pub use report::{AnalysisConfig, Report, ReportMeta};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown report
    Markdown,
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
