//! Evaluate CLI command.
//!
//! Loads the training and validation booking curves, runs the three
//! forecast models, and prints each model's normalized error followed by
//! its forecast table.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::Path;

use airline_forecast_backtest::{run_from_files, BacktestResults};
use airline_forecast_core::{AppConfig, ConfigLoader, MetricsFormatter, DEFAULT_CONFIG_PATH};
use airline_forecast_data::CsvStorage;

/// Arguments for the evaluate command.
#[derive(Args, Debug, Clone, Default)]
pub struct EvaluateArgs {
    /// Config file path
    #[arg(short, long, env = "AIRLINE_FORECAST_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Training data CSV file (overrides data.training_path)
    #[arg(long)]
    pub training: Option<String>,

    /// Validation data CSV file (overrides data.validation_path)
    #[arg(long)]
    pub validation: Option<String>,

    /// Output format: text, json
    #[arg(long)]
    pub format: Option<String>,

    /// Directory to export each forecast table as CSV
    #[arg(long)]
    pub forecast_dir: Option<String>,

    /// Malformed row policy: abort, skip
    #[arg(long)]
    pub on_malformed: Option<String>,

    /// Validation ground truth: resolved, provided
    #[arg(long)]
    pub ground_truth: Option<String>,

    /// Decimal places for scores
    #[arg(long)]
    pub decimals: Option<u32>,
}

/// Output format for evaluation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parses an output format from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: AppConfig, args: &EvaluateArgs) -> Result<AppConfig> {
    if let Some(path) = &args.training {
        config.data.training_path.clone_from(path);
    }
    if let Some(path) = &args.validation {
        config.data.validation_path.clone_from(path);
    }
    if let Some(format) = &args.format {
        config.output.format.clone_from(format);
    }
    if let Some(dir) = &args.forecast_dir {
        config.output.forecast_dir = Some(dir.clone());
    }
    if let Some(policy) = &args.on_malformed {
        config.evaluation.malformed_records = policy.parse()?;
    }
    if let Some(source) = &args.ground_truth {
        config.evaluation.ground_truth = source.parse()?;
    }
    if let Some(decimals) = args.decimals {
        config.evaluation.score_decimals = decimals;
    }
    Ok(config)
}

/// Renders results in the requested format.
fn render(results: &BacktestResults, format: OutputFormat, decimals: u32) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(MetricsFormatter::format(&results.evaluations, decimals)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
    }
}

/// Writes `<model>_forecast.csv` for every model into `dir`.
fn export_forecasts(results: &BacktestResults, dir: &str) -> Result<()> {
    let dir = Path::new(dir);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create forecast directory: {}", dir.display()))?;

    for evaluation in &results.evaluations {
        let path = dir.join(format!("{}_forecast.csv", evaluation.table.model.slug()));
        CsvStorage::write_forecasts(&path, &evaluation.table)?;
    }

    tracing::info!("Exported forecast tables to {}", dir.display());
    Ok(())
}

/// Runs the evaluate command.
///
/// # Errors
/// Returns an error if configuration is invalid or the evaluation fails.
pub fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let config = apply_overrides(ConfigLoader::load_from(&args.config)?, &args)?;
    let format = OutputFormat::parse(&config.output.format)?;

    tracing::info!("Training data: {}", config.data.training_path);
    tracing::info!("Validation data: {}", config.data.validation_path);
    tracing::info!(
        "Malformed rows: {:?}, ground truth: {:?}",
        config.evaluation.malformed_records,
        config.evaluation.ground_truth
    );

    let results = run_from_files(&config)?;

    println!("{}", render(&results, format, config.evaluation.score_decimals)?);

    if let Some(dir) = &config.output.forecast_dir {
        export_forecasts(&results, dir)?;
    }

    Ok(())
}
