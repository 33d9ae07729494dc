//! Configuration loading from splitstat.toml
//!
//! Defaults for alpha, power, MDE, column names, and output live here,
//! not in the statistical core. The file is discovered by walking up
//! from the current directory; CLI flags override whatever it says.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Splitstat configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SplitConfig {
    /// Statistical defaults
    #[serde(default)]
    pub analysis: AnalysisDefaults,
    /// Dataset column and arm-label mapping
    #[serde(default)]
    pub data: DataConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Chart configuration
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Statistical defaults for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    /// Significance level
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Planning power
    #[serde(default = "default_power")]
    pub power: f64,
    /// Target minimum detectable effect (absolute)
    #[serde(default = "default_mde")]
    pub mde: f64,
    /// Alternative hypothesis: "two-sided", "greater", or "less"
    #[serde(default = "default_alternative")]
    pub alternative: String,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            power: default_power(),
            mde: default_mde(),
            alternative: default_alternative(),
        }
    }
}

fn default_alpha() -> f64 {
    0.05
}
fn default_power() -> f64 {
    0.8
}
fn default_mde() -> f64 {
    0.01
}
fn default_alternative() -> String {
    "two-sided".to_string()
}

/// Dataset column and arm-label mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Column holding the arm label
    #[serde(default = "default_group_column")]
    pub group_column: String,
    /// Column holding the 0/1 conversion outcome
    #[serde(default = "default_outcome_column")]
    pub outcome_column: String,
    /// Arm label treated as control
    #[serde(default = "default_control_label")]
    pub control_label: String,
    /// Arm label treated as treatment
    #[serde(default = "default_treatment_label")]
    pub treatment_label: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            group_column: default_group_column(),
            outcome_column: default_outcome_column(),
            control_label: default_control_label(),
            treatment_label: default_treatment_label(),
        }
    }
}

fn default_group_column() -> String {
    "group".to_string()
}
fn default_outcome_column() -> String {
    "converted".to_string()
}
fn default_control_label() -> String {
    "A_control".to_string()
}
fn default_treatment_label() -> String {
    "B_treatment".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "markdown", "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Where the rendered report is written
    #[serde(default = "default_report_path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            report_path: default_report_path(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_report_path() -> String {
    "report.md".to_string()
}

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Whether to write the chart at all
    #[serde(default = "default_chart_enabled")]
    pub enabled: bool,
    /// Where the chart SVG is written
    #[serde(default = "default_chart_path")]
    pub path: String,
    /// Color theme: "light" or "dark"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Chart width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Chart height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: default_chart_enabled(),
            path: default_chart_path(),
            theme: default_theme(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_chart_enabled() -> bool {
    true
}
fn default_chart_path() -> String {
    "figures/group_conversion.svg".to_string()
}
fn default_theme() -> String {
    "light".to_string()
}
fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    480
}

impl SplitConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("splitstat.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Splitstat Configuration

[analysis]
# Significance level
alpha = 0.05
# Power used for sample size planning
power = 0.8
# Target minimum detectable effect (absolute, e.g. 0.01 = 1pp)
mde = 0.01
# Alternative hypothesis: "two-sided", "greater", or "less"
alternative = "two-sided"

[data]
# Column holding the arm label
group_column = "group"
# Column holding the 0/1 conversion outcome
outcome_column = "converted"
# Arm labels
control_label = "A_control"
treatment_label = "B_treatment"

[output]
# Default output format: human, markdown, json
format = "human"
# Report destination
report_path = "report.md"

[chart]
# Write the conversion chart
enabled = true
# Chart destination
path = "figures/group_conversion.svg"
# Color theme: light or dark
theme = "light"
# Chart dimensions
width = 640
height = 480
"#
        .to_string()
    }
}
