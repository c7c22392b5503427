use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

/// Default location of the TOML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

/// Prefix for environment overrides, e.g. `AIRLINE_FORECAST_DATA__TRAINING_PATH`.
pub const ENV_PREFIX: &str = "AIRLINE_FORECAST_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging compiled defaults, the TOML file at
    /// `path` (skipped when absent), and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed or a
    /// value has the wrong type.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        tracing::debug!(path, "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GroundTruth, MalformedRecordPolicy};

    // Jail serializes environment access across these tests.

    #[test]
    fn missing_file_yields_defaults() {
        figment::Jail::expect_with(|_| {
            let config = ConfigLoader::load_from("does/not/exist.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.evaluation.score_decimals, 2);
            assert_eq!(config.output.format, "text");
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "Config.toml",
                r#"
[data]
training_path = "train.csv"
date_formats = ["%d.%m.%Y"]

[evaluation]
malformed_records = "skip"
ground_truth = "provided"
"#,
            )?;

            let config = ConfigLoader::load_from("Config.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.data.training_path, "train.csv");
            assert_eq!(config.data.date_formats, vec!["%d.%m.%Y".to_string()]);
            // untouched keys keep their defaults
            assert_eq!(config.data.validation_path, "airline_booking_validationData.csv");
            assert_eq!(config.evaluation.malformed_records, MalformedRecordPolicy::Skip);
            assert_eq!(config.evaluation.ground_truth, GroundTruth::Provided);
            assert_eq!(config.evaluation.score_decimals, 2);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "Config.toml",
                r#"
[data]
training_path = "from_file.csv"

[evaluation]
score_decimals = 4
"#,
            )?;
            jail.set_env("AIRLINE_FORECAST_DATA__TRAINING_PATH", "from_env.csv");
            jail.set_env("AIRLINE_FORECAST_EVALUATION__SCORE_DECIMALS", 3);
            jail.set_env("AIRLINE_FORECAST_EVALUATION__MALFORMED_RECORDS", "skip");
            // consumed by the CLI, not part of AppConfig
            jail.set_env("AIRLINE_FORECAST_CONFIG", "Config.toml");

            let config = ConfigLoader::load_from("Config.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.data.training_path, "from_env.csv");
            assert_eq!(config.evaluation.score_decimals, 3);
            assert_eq!(config.evaluation.malformed_records, MalformedRecordPolicy::Skip);
            assert_eq!(config.data.validation_path, "airline_booking_validationData.csv");
            Ok(())
        });
    }

    #[test]
    fn environment_applies_without_a_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AIRLINE_FORECAST_OUTPUT__FORMAT", "json");

            let config = ConfigLoader::load_from("missing.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.output.format, "json");
            assert_eq!(config.evaluation.score_decimals, 2);
            Ok(())
        });
    }

    #[test]
    fn invalid_value_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("Config.toml", "[evaluation]\nmalformed_records = \"explode\"")?;
            assert!(ConfigLoader::load_from("Config.toml").is_err());
            Ok(())
        });
    }
}
