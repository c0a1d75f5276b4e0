//! Settings file and its merge with command-line flags.
//!
//! ```toml
//! default_fiscal_year = "FY2025-26"
//! log_level = "info"
//! output_format = "json"
//! regimes_csv = "regimes.csv"
//! ```
//!
//! Every key is optional. Flags override the file; the file overrides the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;
use crate::output::OutputFormat;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "taxbot.toml";

pub const DEFAULT_FISCAL_YEAR: &str = "FY2025-26";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub default_fiscal_year: String,
    pub log_level: String,
    pub output_format: OutputFormat,
    pub regimes_csv: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_fiscal_year: DEFAULT_FISCAL_YEAR.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            output_format: OutputFormat::Table,
            regimes_csv: None,
        }
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or defaults.
    ///
    /// An explicit `path` that cannot be read is an error; a missing
    /// default file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fiscal_year: String,
    pub format: OutputFormat,
    pub regimes_csv: Option<PathBuf>,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(
        args: &GlobalArgs,
        config: CliConfig,
    ) -> Self {
        Self {
            fiscal_year: args
                .fiscal_year
                .clone()
                .unwrap_or(config.default_fiscal_year),
            format: args.format.unwrap_or(config.output_format),
            regimes_csv: args.regimes.clone().or(config.regimes_csv),
            log_level: args.log_level.clone().unwrap_or(config.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn every_key_is_read() {
        let config = CliConfig::from_toml(
            r#"
            default_fiscal_year = "FY2024-25"
            log_level = "debug"
            output_format = "json"
            regimes_csv = "custom.csv"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            CliConfig {
                default_fiscal_year: "FY2024-25".to_string(),
                log_level: "debug".to_string(),
                output_format: OutputFormat::Json,
                regimes_csv: Some(PathBuf::from("custom.csv")),
            }
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(CliConfig::from_toml("fiscal_year = \"FY2024-25\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();

        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn flags_override_file() {
        let args = GlobalArgs {
            fiscal_year: Some("FY2024-25".to_string()),
            format: None,
            ..Default::default()
        };
        let config = CliConfig {
            default_fiscal_year: "FY2025-26".to_string(),
            output_format: OutputFormat::Json,
            ..Default::default()
        };

        let settings = Settings::resolve(&args, config);

        assert_eq!(
            settings,
            Settings {
                fiscal_year: "FY2024-25".to_string(),
                format: OutputFormat::Json,
                regimes_csv: None,
                log_level: "warn".to_string(),
            }
        );
    }
}
