//! Configuration for the chart pipeline
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML or YAML file, then `PANDASH_*` environment variables.
//!
//! - `PANDASH_DATA_PATH`: survey JSON document
//! - `PANDASH_LABEL_COLUMN` / `PANDASH_VALUE_COLUMN`: chart columns
//! - `PANDASH_DATASET_LABEL`: legend text of the single dataset
//! - `PANDASH_AGGREGATION`: `sum`, `mean` or `count`
//! - `PANDASH_ASCENDING`: `true`/`false`
//! - `PANDASH_LOG_LEVEL`: `off`, `error`, `warn`, `info`, `debug`, `trace`

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::dashboard::ChartOptions;
use crate::error::{Error, Result};
use crate::groupby::AggFunc;

const ENV_PREFIX: &str = "PANDASH_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub label_column: String,
    pub value_column: String,
    pub dataset_label: String,
    pub aggregation: AggFunc,
    pub ascending: bool,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let chart = ChartOptions::default();
        DashboardConfig {
            data_path: PathBuf::from("data/data.json"),
            label_column: chart.label_column,
            value_column: chart.value_column,
            dataset_label: chart.dataset_label,
            aggregation: chart.aggregation,
            ascending: chart.ascending,
            log_level: "warn".to_string(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}

impl DashboardConfig {
    /// Read a config file; the format follows the extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let config: DashboardConfig = match extension.as_deref() {
            Some("toml") => toml::from_str(&text)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            _ => {
                return Err(Error::Config(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PANDASH_*` overrides from any lookup (the environment in
    /// production, a map in tests)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(v) = var("DATA_PATH") {
            self.data_path = PathBuf::from(v);
        }
        if let Some(v) = var("LABEL_COLUMN") {
            self.label_column = v;
        }
        if let Some(v) = var("VALUE_COLUMN") {
            self.value_column = v;
        }
        if let Some(v) = var("DATASET_LABEL") {
            self.dataset_label = v;
        }
        if let Some(v) = var("AGGREGATION") {
            self.aggregation = v.parse()?;
        }
        if let Some(v) = var("ASCENDING") {
            self.ascending = parse_bool("PANDASH_ASCENDING", &v)?;
        }
        if let Some(v) = var("LOG_LEVEL") {
            self.log_level = v;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.label_column.is_empty() || self.value_column.is_empty() {
            return Err(Error::Config("chart columns must not be empty".to_string()));
        }
        if self.label_column == self.value_column {
            return Err(Error::Config(format!(
                "label and value column are both '{}'",
                self.label_column
            )));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| Error::Config(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            label_column: self.label_column.clone(),
            value_column: self.value_column.clone(),
            dataset_label: self.dataset_label.clone(),
            aggregation: self.aggregation,
            ascending: self.ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_match_chart_options() {
        let config = DashboardConfig::default();
        assert_eq!(config.chart_options(), ChartOptions::default());
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PANDASH_VALUE_COLUMN", "votes"),
            ("PANDASH_AGGREGATION", "mean"),
            ("PANDASH_ASCENDING", "yes"),
        ]
        .into_iter()
        .collect();

        let config = DashboardConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.value_column, "votes");
        assert_eq!(config.aggregation, AggFunc::Mean);
        assert!(config.ascending);
    }

    #[test]
    fn test_bad_override() {
        let result = DashboardConfig::default().with_overrides(|key| {
            (key == "PANDASH_ASCENDING").then(|| "sideways".to_string())
        });
        assert!(result.unwrap_err().is_config_error());
    }

    #[test]
    fn test_same_label_and_value_rejected() {
        let config = DashboardConfig {
            value_column: "responseValue".into(),
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "data_path = \"survey.json\"\naggregation = \"count\"").unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("survey.json"));
        assert_eq!(config.aggregation, AggFunc::Count);
        assert_eq!(config.label_column, "responseValue");
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "dataset_label: Votes\nascending: true\nlog_level: debug").unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dataset_label, "Votes");
        assert!(config.ascending);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(DashboardConfig::from_file(file.path()).is_err());
    }
}
