//! Dashboard configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `DASHBOARD_*` environment variables
//! and configuration files, in that order of precedence.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TOKEN_KEY: &str = "token";

/// How new entity identifiers are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Decimal counter continuing after the reference data.
    #[default]
    Sequential,
    /// Random v4 UUIDs.
    Uuid,
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Raised when a setting holds a value outside its vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {setting}; expected one of: {expected}")]
pub struct InvalidSetting {
    setting: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for IdStrategy {
    type Err = InvalidSetting;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            _ => Err(InvalidSetting {
                setting: "id_strategy",
                value: value.to_owned(),
                expected: "sequential, uuid",
            }),
        }
    }
}

impl FromStr for LogFormat {
    type Err = InvalidSetting;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(InvalidSetting {
                setting: "log_format",
                value: value.to_owned(),
                expected: "pretty, json",
            }),
        }
    }
}

/// Configuration values for the dashboard binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Simulated backend round-trip in milliseconds.
    #[ortho_config(default = 1000)]
    pub latency_ms: u64,
    /// Directory holding the session token file.
    pub token_dir: Option<PathBuf>,
    /// File name of the session token inside `token_dir`.
    pub token_key: Option<String>,
    /// Identifier strategy: `sequential` or `uuid`.
    pub id_strategy: Option<String>,
    /// Log encoding: `pretty` or `json`.
    pub log_format: Option<String>,
}

impl DashboardSettings {
    /// Simulated latency.
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Token directory, defaulting to the working directory.
    pub fn token_dir(&self) -> PathBuf {
        self.token_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Token file name, defaulting to `token`.
    pub fn token_key(&self) -> &str {
        self.token_key.as_deref().unwrap_or(DEFAULT_TOKEN_KEY)
    }

    /// Parsed identifier strategy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSetting`] for anything but `sequential` or `uuid`.
    pub fn id_strategy(&self) -> Result<IdStrategy, InvalidSetting> {
        self.id_strategy
            .as_deref()
            .map_or(Ok(IdStrategy::default()), str::parse)
    }

    /// Parsed log format.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSetting`] for anything but `pretty` or `json`.
    pub fn log_format(&self) -> Result<LogFormat, InvalidSetting> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), str::parse)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for dashboard configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "DASHBOARD_LATENCY_MS",
        "DASHBOARD_TOKEN_DIR",
        "DASHBOARD_TOKEN_KEY",
        "DASHBOARD_ID_STRATEGY",
        "DASHBOARD_LOG_FORMAT",
    ];

    fn load_from_empty_args() -> DashboardSettings {
        DashboardSettings::load_from_iter([OsString::from("dashboard")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.latency(), Duration::from_millis(1000));
        assert_eq!(settings.token_dir(), PathBuf::from("."));
        assert_eq!(settings.token_key(), "token");
        assert_eq!(settings.id_strategy(), Ok(IdStrategy::Sequential));
        assert_eq!(settings.log_format(), Ok(LogFormat::Pretty));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DASHBOARD_LATENCY_MS", Some("0".to_owned())),
            ("DASHBOARD_TOKEN_DIR", Some("/tmp/dashboard".to_owned())),
            ("DASHBOARD_TOKEN_KEY", Some("session".to_owned())),
            ("DASHBOARD_ID_STRATEGY", Some("uuid".to_owned())),
            ("DASHBOARD_LOG_FORMAT", Some("json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.latency(), Duration::ZERO);
        assert_eq!(settings.token_dir(), PathBuf::from("/tmp/dashboard"));
        assert_eq!(settings.token_key(), "session");
        assert_eq!(settings.id_strategy(), Ok(IdStrategy::Uuid));
        assert_eq!(settings.log_format(), Ok(LogFormat::Json));
    }

    #[rstest]
    #[case("Sequential", IdStrategy::Sequential)]
    #[case(" uuid ", IdStrategy::Uuid)]
    fn id_strategy_parsing_is_lenient_about_case(#[case] raw: &str, #[case] expected: IdStrategy) {
        assert_eq!(raw.parse::<IdStrategy>(), Ok(expected));
    }

    #[rstest]
    fn unknown_log_format_is_reported() {
        let settings = DashboardSettings {
            latency_ms: 1000,
            token_dir: None,
            token_key: None,
            id_strategy: None,
            log_format: Some("xml".to_owned()),
        };
        let err = settings.log_format().expect_err("xml is not a format");
        assert_eq!(
            err.to_string(),
            "invalid value \"xml\" for log_format; expected one of: pretty, json"
        );
    }
}
