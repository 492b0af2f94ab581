//! Process-wide settings, read once at startup and passed by reference.
use std::fmt;

use crate::routing::DEFAULT_HANDOFF_THRESHOLD;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "BANKWISE_MODEL";
pub const BASE_URL_VAR: &str = "BANKWISE_BASE_URL";
pub const THRESHOLD_VAR: &str = "BANKWISE_HANDOFF_THRESHOLD";
pub const LOG_VAR: &str = "BANKWISE_LOG";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone)]
pub struct BankConfig {
    /// Credential for the hosted model. Not validated; a missing key fails at the first call.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub handoff_threshold: f64,
    pub log_filter: String,
}

impl fmt::Debug for BankConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<REDACTED>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("handoff_threshold", &self.handoff_threshold)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            handoff_threshold: DEFAULT_HANDOFF_THRESHOLD,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a number: {value}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("Failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// A missing `.env` is fine, anything else (a malformed line, an unreadable file) is not.
fn load_dotenv<T>(res: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match res {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

impl BankConfig {
    /// Read settings from the environment, loading `.env` first if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv(dotenvy::dotenv())?;

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let handoff_threshold = match get(THRESHOLD_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: THRESHOLD_VAR,
                value: value.clone(),
            })?,
            None => DEFAULT_HANDOFF_THRESHOLD,
        };

        let config = Self {
            api_key: get(API_KEY_VAR),
            base_url: get(BASE_URL_VAR),
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            handoff_threshold,
            log_filter: get(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };

        Ok(config)
    }
}
