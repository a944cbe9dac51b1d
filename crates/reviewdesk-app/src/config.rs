// ABOUTME: Configuration loading and validation for the review desk.
// ABOUTME: Reads REVIEWDESK_* environment variables; invalid values name the offending variable.

use std::path::PathBuf;
use std::time::Duration;

use reviewdesk_agent::{DEFAULT_STEP_TIMEOUT, LatencyProfile};
use reviewdesk_core::Language;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("REVIEWDESK_LANGUAGE must be `en` or `zh`, got {0:?}")]
    InvalidLanguage(String),

    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Desk configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub home: PathBuf,
    pub language: Language,
    pub latency: LatencyProfile,
    pub step_timeout: Option<Duration>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            home: default_home(),
            language: Language::En,
            latency: LatencyProfile::default(),
            step_timeout: Some(DEFAULT_STEP_TIMEOUT),
        }
    }
}

impl DeskConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - REVIEWDESK_HOME: data directory (default: ~/.reviewdesk)
    /// - REVIEWDESK_LANGUAGE: interface language, `en` or `zh` (default: en)
    /// - REVIEWDESK_SIMULATED_LATENCY_MS: one delay for every simulated collaborator
    /// - REVIEWDESK_STEP_TIMEOUT_SECS: per-step timeout, 0 disables (default: 120)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let home = var("REVIEWDESK_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(default_home);

        let language = match var("REVIEWDESK_LANGUAGE") {
            Some(code) => Language::from_code(&code).ok_or(ConfigError::InvalidLanguage(code))?,
            None => Language::En,
        };

        let latency = match var("REVIEWDESK_SIMULATED_LATENCY_MS") {
            Some(value) => LatencyProfile::uniform(Duration::from_millis(parse_number(
                "REVIEWDESK_SIMULATED_LATENCY_MS",
                value,
            )?)),
            None => LatencyProfile::default(),
        };

        let step_timeout = match var("REVIEWDESK_STEP_TIMEOUT_SECS") {
            Some(value) => match parse_number("REVIEWDESK_STEP_TIMEOUT_SECS", value)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => Some(DEFAULT_STEP_TIMEOUT),
        };

        Ok(Self {
            home,
            language,
            latency,
            step_timeout,
        })
    }
}

fn default_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join(".reviewdesk")
}

fn parse_number(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}
