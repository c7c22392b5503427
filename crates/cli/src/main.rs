use clap::{Parser, Subcommand};

mod commands;

use airline_forecast_core::DEFAULT_CONFIG_PATH;
use commands::EvaluateArgs;

#[derive(Parser)]
#[command(name = "airline-forecast")]
#[command(about = "Score airline booking-curve forecasts against a naive baseline", long_about = None)]
struct Cli {
    /// Optional log file path (logs to stderr when omitted)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the Flat, Additive and Multiplicative models and score them
    Evaluate(EvaluateArgs),
    /// Print the effective configuration after file and environment merges
    ShowConfig {
        /// Config file path
        #[arg(short, long, env = "AIRLINE_FORECAST_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Reports go to stdout, so logs never share it
    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Evaluate(args) => {
            commands::run_evaluate(args)?;
        }
        Commands::ShowConfig { config } => {
            commands::run_show_config(&config)?;
        }
    }

    Ok(())
}
