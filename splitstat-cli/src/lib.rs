#![warn(missing_docs)]
//! Splitstat CLI Library
//!
//! Drives the batch analysis: parse flags, discover `splitstat.toml`,
//! ingest the dataset, run the statistical core, and write the rendered
//! report and chart. The statistical core stays pure; every file and
//! terminal concern lives here.

mod config;
mod formatting;
mod ingest;

pub use config::*;
pub use formatting::format_human_output;
pub use ingest::{ArmCounts, IngestError, load_arm_counts, parse_arm_counts, select_arms};

use clap::{Parser, Subcommand};
use splitstat_report::{
    AnalysisConfig, ChartOptions, ChartTheme, OutputFormat, Report, generate_conversion_chart,
    generate_json_report, generate_markdown_report,
};
use splitstat_stats::{Alternative, TestParameters, analyze_experiment, required_sample_size};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Splitstat CLI arguments
#[derive(Parser, Debug)]
#[command(name = "splitstat")]
#[command(author, version, about = "Splitstat - A/B test analysis for conversion experiments")]
pub struct Cli {
    /// Optional subcommand (Analyze, Plan, InitConfig); defaults to Analyze
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dataset CSV path
    #[arg(default_value = "data/synthetic_ab_data.csv")]
    pub data: PathBuf,

    /// Output format: human, markdown, json
    #[arg(long)]
    pub format: Option<String>,

    /// Report output file (overrides config; stdout-only if "-")
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Chart output file (overrides config)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Skip chart generation
    #[arg(long)]
    pub no_chart: bool,

    /// Significance level
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Planning power
    #[arg(long)]
    pub power: Option<f64>,

    /// Target minimum detectable effect (absolute)
    #[arg(long)]
    pub mde: Option<f64>,

    /// Alternative hypothesis: two-sided, greater, less
    #[arg(long)]
    pub alternative: Option<String>,

    /// Arm label treated as control
    #[arg(long)]
    pub control: Option<String>,

    /// Arm label treated as treatment
    #[arg(long)]
    pub treatment: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a dataset and write the report (default)
    Analyze,
    /// Sample size planning only, no dataset needed
    Plan {
        /// Baseline conversion rate
        #[arg(long)]
        baseline: f64,
        /// Absolute minimum detectable effect
        #[arg(long)]
        mde: f64,
    },
    /// Write a default splitstat.toml to the current directory
    InitConfig,
}

/// Run the Splitstat CLI. Main entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Splitstat CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("splitstat=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("splitstat=info")
            .init();
    }

    // Discover splitstat.toml configuration (CLI flags override)
    let config = SplitConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::Plan { baseline, mde }) => plan_only(&cli, &config, baseline, mde),
        Some(Commands::InitConfig) => init_config(),
        Some(Commands::Analyze) | None => analyze(&cli, &config),
    }
}

/// Resolve effective analysis parameters from CLI flags over config
fn resolve_parameters(
    cli: &Cli,
    config: &SplitConfig,
) -> anyhow::Result<(TestParameters, f64)> {
    let alternative: Alternative = cli
        .alternative
        .as_deref()
        .unwrap_or(&config.analysis.alternative)
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let params = TestParameters {
        alpha: cli.alpha.unwrap_or(config.analysis.alpha),
        power: cli.power.unwrap_or(config.analysis.power),
        alternative,
    };
    let target_mde = cli.mde.unwrap_or(config.analysis.mde);
    Ok((params, target_mde))
}

/// Full pipeline: ingest, analyze, render, write
fn analyze(cli: &Cli, config: &SplitConfig) -> anyhow::Result<()> {
    let (params, target_mde) = resolve_parameters(cli, config)?;

    let control_label = cli
        .control
        .as_deref()
        .unwrap_or(&config.data.control_label);
    let treatment_label = cli
        .treatment
        .as_deref()
        .unwrap_or(&config.data.treatment_label);

    info!(dataset = %cli.data.display(), "loading dataset");
    let counts = load_arm_counts(
        &cli.data,
        &config.data.group_column,
        &config.data.outcome_column,
    )?;
    debug!(arms = counts.len(), "aggregated arms");

    let (control_counts, treatment_counts) = select_arms(&counts, control_label, treatment_label)?;
    let control = control_counts.to_observation()?;
    let treatment = treatment_counts.to_observation()?;

    let result = analyze_experiment(control, treatment, &params, target_mde)?;
    let report = Report::new(
        cli.data.display().to_string(),
        control_label,
        treatment_label,
        result,
        AnalysisConfig {
            alpha: params.alpha,
            power: params.power,
            target_mde,
            alternative: params.alternative,
        },
    );

    // Render in the requested format
    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let rendered = match format {
        OutputFormat::Human => format_human_output(&report),
        OutputFormat::Markdown => generate_markdown_report(&report),
        OutputFormat::Json => generate_json_report(&report)?,
    };

    match output_target(cli, config, format) {
        Some(path) => {
            write_file(&path, &rendered)?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{}", rendered),
    }

    if !cli.no_chart && config.chart.enabled {
        let chart_path = cli
            .chart
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.chart.path));
        let options = ChartOptions {
            width: config.chart.width,
            height: config.chart.height,
            theme: config
                .chart
                .theme
                .parse::<ChartTheme>()
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        };
        let svg = generate_conversion_chart(&report, &options);
        write_file(&chart_path, &svg)?;
        info!(path = %chart_path.display(), "chart written");
    }

    println!(
        "Analysis complete. {} arms, N={}, p={:.4}.",
        counts.len(),
        report.meta.total_observations,
        report.result.test.p_value
    );
    Ok(())
}

/// Where the rendered report goes; None means stdout
fn output_target(cli: &Cli, config: &SplitConfig, format: OutputFormat) -> Option<PathBuf> {
    match &cli.output {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path.clone()),
        // Human output defaults to the terminal; file formats go to the
        // configured report path.
        None if format == OutputFormat::Human => None,
        None => Some(PathBuf::from(&config.output.report_path)),
    }
}

/// Sample size planning without a dataset
fn plan_only(cli: &Cli, config: &SplitConfig, baseline: f64, mde: f64) -> anyhow::Result<()> {
    let alpha = cli.alpha.unwrap_or(config.analysis.alpha);
    let power = cli.power.unwrap_or(config.analysis.power);
    let rec = required_sample_size(baseline, mde, alpha, power)?;
    println!(
        "To detect an absolute lift of {} from baseline {} with {:.0}% power at α={}:",
        mde,
        baseline,
        power * 100.0,
        alpha
    );
    println!("  ~{} users per group ({} total)", rec.per_group, rec.total);
    Ok(())
}

/// Write a default splitstat.toml, refusing to clobber an existing one
fn init_config() -> anyhow::Result<()> {
    let path = Path::new("splitstat.toml");
    if path.exists() {
        anyhow::bail!("splitstat.toml already exists");
    }
    std::fs::write(path, SplitConfig::default_toml())?;
    println!("Wrote splitstat.toml");
    Ok(())
}

/// Write content, creating parent directories as needed
fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            command: None,
            data: PathBuf::from("data/synthetic_ab_data.csv"),
            format: None,
            output: None,
            chart: None,
            no_chart: false,
            alpha: None,
            power: None,
            mde: None,
            alternative: None,
            control: None,
            treatment: None,
            verbose: false,
        }
    }

    #[test]
    fn test_parameters_from_config_defaults() {
        let (params, mde) = resolve_parameters(&base_cli(), &SplitConfig::default()).unwrap();
        assert!((params.alpha - 0.05).abs() < f64::EPSILON);
        assert!((params.power - 0.8).abs() < f64::EPSILON);
        assert_eq!(params.alternative, Alternative::TwoSided);
        assert!((mde - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli {
            alpha: Some(0.01),
            alternative: Some("greater".to_string()),
            mde: Some(0.02),
            ..base_cli()
        };
        let (params, mde) = resolve_parameters(&cli, &SplitConfig::default()).unwrap();
        assert!((params.alpha - 0.01).abs() < f64::EPSILON);
        assert_eq!(params.alternative, Alternative::Greater);
        assert!((mde - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_alternative_rejected() {
        let cli = Cli {
            alternative: Some("sideways".to_string()),
            ..base_cli()
        };
        assert!(resolve_parameters(&cli, &SplitConfig::default()).is_err());
    }

    #[test]
    fn test_output_target_resolution() {
        let config = SplitConfig::default();

        // Human defaults to stdout
        assert_eq!(output_target(&base_cli(), &config, OutputFormat::Human), None);

        // File formats default to the configured report path
        assert_eq!(
            output_target(&base_cli(), &config, OutputFormat::Markdown),
            Some(PathBuf::from("report.md"))
        );

        // Explicit "-" forces stdout
        let dash = Cli {
            output: Some(PathBuf::from("-")),
            ..base_cli()
        };
        assert_eq!(output_target(&dash, &config, OutputFormat::Markdown), None);

        // Explicit path wins
        let explicit = Cli {
            output: Some(PathBuf::from("out/analysis.json")),
            ..base_cli()
        };
        assert_eq!(
            output_target(&explicit, &config, OutputFormat::Json),
            Some(PathBuf::from("out/analysis.json"))
        );
    }
}
