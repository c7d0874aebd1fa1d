//! Hardcover API credentials

use std::fmt;
use thiserror::Error;

/// Environment variable holding the Hardcover API key
pub const API_KEY_ENV: &str = "HARDCOVER_API_KEY";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {name} is not set")]
    MissingVar { name: String },
    #[error("Environment variable {name} is empty")]
    EmptyVar { name: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct HardcoverConfig {
    api_key: String,
}

impl HardcoverConfig {
    /// Use a key supplied directly (tests, embedded callers)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Read the key from `HARDCOVER_API_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(API_KEY_ENV)
    }

    pub fn from_env_var(name: &str) -> Result<Self, ConfigError> {
        let api_key = std::env::var(name).map_err(|_| ConfigError::MissingVar {
            name: name.to_string(),
        })?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyVar {
                name: name.to_string(),
            });
        }
        Ok(Self::new(api_key))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keep the key out of logs
impl fmt::Debug for HardcoverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HardcoverConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
