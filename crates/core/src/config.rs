use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub evaluation: EvaluationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub training_path: String,
    pub validation_path: String,
    /// chrono format strings tried in order when parsing date cells.
    pub date_formats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub malformed_records: MalformedRecordPolicy,
    pub ground_truth: GroundTruth,
    pub score_decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `text` or `json`.
    pub format: String,
    /// Directory the three forecast tables are exported to as CSV.
    pub forecast_dir: Option<String>,
}

/// What to do with a row whose dates or counts cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRecordPolicy {
    /// Fail the whole run on the first bad row.
    #[default]
    Abort,
    /// Drop the row, log it, and continue.
    Skip,
}

/// Where validation ground truth comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroundTruth {
    /// Maximum cumulative bookings observed per departure date.
    #[default]
    Resolved,
    /// The validation file's own `final_demand` column.
    Provided,
}

impl std::str::FromStr for MalformedRecordPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "abort" | "fail" => Ok(Self::Abort),
            "skip" | "drop" => Ok(Self::Skip),
            _ => Err(anyhow::anyhow!(
                "Invalid malformed-record policy: '{}'. Valid values: abort, skip",
                s
            )),
        }
    }
}

impl std::str::FromStr for GroundTruth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "resolved" | "max" => Ok(Self::Resolved),
            "provided" | "column" => Ok(Self::Provided),
            _ => Err(anyhow::anyhow!(
                "Invalid ground truth source: '{}'. Valid values: resolved, provided",
                s
            )),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            training_path: "airline_booking_trainingData.csv".to_string(),
            validation_path: "airline_booking_validationData.csv".to_string(),
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%m/%d/%Y".to_string(),
                "%Y/%m/%d".to_string(),
            ],
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            malformed_records: MalformedRecordPolicy::Abort,
            ground_truth: GroundTruth::Resolved,
            score_decimals: 2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            forecast_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = AppConfig::default();
        assert_eq!(config.data.training_path, "airline_booking_trainingData.csv");
        assert_eq!(config.evaluation.score_decimals, 2);
        assert_eq!(config.evaluation.malformed_records, MalformedRecordPolicy::Abort);
        assert_eq!(config.evaluation.ground_truth, GroundTruth::Resolved);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn policy_parses_aliases() {
        assert_eq!("SKIP".parse::<MalformedRecordPolicy>().unwrap(), MalformedRecordPolicy::Skip);
        assert_eq!("fail".parse::<MalformedRecordPolicy>().unwrap(), MalformedRecordPolicy::Abort);
        assert!("ignore".parse::<MalformedRecordPolicy>().is_err());
    }

    #[test]
    fn ground_truth_parses() {
        assert_eq!("provided".parse::<GroundTruth>().unwrap(), GroundTruth::Provided);
        assert_eq!("resolved".parse::<GroundTruth>().unwrap(), GroundTruth::Resolved);
        assert!("guess".parse::<GroundTruth>().is_err());
    }
}
