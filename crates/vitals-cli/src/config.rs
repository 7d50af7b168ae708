//! Run configuration loaded from a JSON file.
//!
//! ```json
//! {
//!   "constants": { "fromdate": 20250601, "basalburn": 2000 },
//!   "input_dir": "input",
//!   "output_dir": "output",
//!   "year_inference": { "december_year": 2025 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vitals_model::{ProcessingOptions, YearInference};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config is missing required key `{key}`")]
    MissingKey { key: &'static str },
}

#[derive(Debug, Default, Deserialize)]
struct RawConstants {
    fromdate: Option<i64>,
    #[serde(alias = "cron_basalburn")]
    basalburn: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    constants: RawConstants,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    #[serde(default)]
    year_inference: YearInference,
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub options: ProcessingOptions,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Parses config text; `origin` is only used in error messages.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        let from_date = raw.constants.fromdate.ok_or(ConfigError::MissingKey {
            key: "constants.fromdate",
        })?;
        let basal_burn = raw.constants.basalburn.ok_or(ConfigError::MissingKey {
            key: "constants.basalburn",
        })?;

        Ok(Self {
            options: ProcessingOptions::new(from_date, basal_burn)
                .with_year_inference(raw.year_inference),
            input_dir: raw
                .input_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
            output_dir: raw
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }

    /// Replaces directories given on the command line.
    #[must_use]
    pub fn with_overrides(
        mut self,
        input_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_json(text, Path::new("config.json"))
    }

    #[test]
    fn reads_constants_and_defaults() {
        let config = parse(r#"{"constants": {"fromdate": 20250601, "basalburn": 2000}}"#).unwrap();
        assert_eq!(config.options.from_date, 20250601);
        assert_eq!(config.options.basal_burn, 2000.0);
        assert_eq!(config.options.year_inference, YearInference::default());
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn accepts_cron_prefixed_basal_burn() {
        let config = parse(
            r#"{"constants": {"fromdate": 20250101, "cron_basalburn": 1800.5},
                "input_dir": "data", "year_inference": {"december_year": 2024}}"#,
        )
        .unwrap();
        assert_eq!(config.options.basal_burn, 1800.5);
        assert_eq!(config.options.year_inference, YearInference::new(2024));
        assert_eq!(config.input_dir, PathBuf::from("data"));
    }

    #[test]
    fn missing_keys_are_reported() {
        let err = parse(r#"{"constants": {"basalburn": 2000}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "constants.fromdate" }));
        let err = parse(r#"{"constants": {"fromdate": 20250101}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "constants.basalburn" }));
        let err = parse("{}").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse("{constants"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn cli_overrides_directories() {
        let config = parse(r#"{"constants": {"fromdate": 0, "basalburn": 0}}"#)
            .unwrap()
            .with_overrides(None, Some(PathBuf::from("out")));
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
