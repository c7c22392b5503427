//! Prints the merged configuration.

use airline_forecast_core::{AppConfig, ConfigLoader};
use anyhow::Result;

/// Renders the effective configuration as pretty JSON.
fn render(config: &AppConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Loads defaults, the TOML file at `config_path`, and environment
/// overrides, then prints the result.
///
/// # Errors
/// Returns an error if the configuration cannot be parsed.
pub fn run_show_config(config_path: &str) -> Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    println!("{}", render(&config)?);
    Ok(())
}
