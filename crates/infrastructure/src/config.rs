//! Suite configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional file
//! (named by `RESTCHECK_CONFIG`, format taken from its extension), then
//! `RESTCHECK_*` environment variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::report::ReportFormat;

/// Public endpoint the suite targets by default.
pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev";

/// Environment variable naming an optional config file.
pub const CONFIG_PATH_VAR: &str = "RESTCHECK_CONFIG";

const ENV_PREFIX: &str = "RESTCHECK";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base_url '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Settings for one suite run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuiteConfig {
    /// Root of the API, without the `/objects` suffix.
    pub base_url: String,
    /// Per-request timeout; unset means the HTTP client default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Stop after the first failing case.
    #[serde(default)]
    pub stop_on_failure: bool,
    /// How the report is printed.
    #[serde(default)]
    pub report_format: ReportFormat,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
            user_agent: default_user_agent(),
            stop_on_failure: false,
            report_format: ReportFormat::default(),
        }
    }
}

fn default_user_agent() -> String {
    format!("restcheck/{}", env!("CARGO_PKG_VERSION"))
}

impl SuiteConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from(file.as_deref(), None)
    }

    /// Loads configuration from an optional file and an environment map.
    ///
    /// `env` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the result is invalid.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("stop_on_failure", defaults.stop_on_failure)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Values stay strings here; typed fields are parsed on deserialize.
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).source(env));

        let loaded: Self = builder.build()?.try_deserialize()?;
        let config = loaded.validated()?;
        debug!(
            base_url = %config.base_url,
            timeout_ms = ?config.timeout_ms,
            stop_on_failure = config.stop_on_failure,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Normalizes and checks the base URL.
    fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(&trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        self.base_url = trimmed;
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::load_from(None, env(&[])).unwrap();
        assert_eq!(config, SuiteConfig::default());
        assert_eq!(config.base_url, "https://api.restful-api.dev");
        assert!(config.user_agent.starts_with("restcheck/"));
    }

    #[test]
    fn test_env_overrides() {
        let config = SuiteConfig::load_from(
            None,
            env(&[
                ("RESTCHECK_BASE_URL", "http://localhost:8080/"),
                ("RESTCHECK_TIMEOUT_MS", "2500"),
                ("RESTCHECK_STOP_ON_FAILURE", "true"),
                ("RESTCHECK_REPORT_FORMAT", "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_ms, Some(2500));
        assert!(config.stop_on_failure);
        assert_eq!(config.report_format, ReportFormat::Json);
    }

    #[test]
    fn test_numeric_looking_strings_are_kept_verbatim() {
        let config = SuiteConfig::load_from(
            None,
            env(&[("RESTCHECK_USER_AGENT", "1.50"), ("RESTCHECK_BASE_URL", "http://10.0.0.1")]),
        )
        .unwrap();

        assert_eq!(config.user_agent, "1.50");
        assert_eq!(config.base_url, "http://10.0.0.1");
    }

    #[test]
    fn test_unknown_report_format_is_an_error() {
        let result = SuiteConfig::load_from(None, env(&[("RESTCHECK_REPORT_FORMAT", "xml")]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "base_url = \"https://staging.example.com\"\ntimeout_ms = 1000\nuser_agent = \"ci\""
        )
        .unwrap();

        let config = SuiteConfig::load_from(
            Some(file.path()),
            env(&[("RESTCHECK_TIMEOUT_MS", "3000")]),
        )
        .unwrap();

        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.user_agent, "ci");
        assert_eq!(config.timeout_ms, Some(3000));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = SuiteConfig::load_from(Some(Path::new("/nonexistent/restcheck.toml")), env(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = SuiteConfig::load_from(None, env(&[("RESTCHECK_BASE_URL", "ftp://x")]));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));

        let result = SuiteConfig::load_from(None, env(&[("RESTCHECK_BASE_URL", "nope")]));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }
}
