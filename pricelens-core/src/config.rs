//! Viewer configuration, stored as TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock behaviour: 30-day lookback out of 7/30/90, SMA-10, 3 preview rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::error::ViewerError;
use crate::export::DEFAULT_PREVIEW_ROWS;
use crate::indicators::DEFAULT_SMA_WINDOW;

/// Most retries a provider may be configured for.
pub const MAX_PROVIDER_RETRIES: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub fetch: FetchConfig,
    pub signal: SignalConfig,
    pub export: ExportConfig,
    pub provider: ProviderConfig,
    /// Extra company-name → symbol suggestions.
    pub tickers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub default_lookback_days: u32,
    /// Choices offered by front ends. The pipeline accepts any positive value.
    pub lookback_choices: Vec<u32>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            default_lookback_days: 30,
            lookback_choices: vec![7, 30, 90],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub sma_window: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sma_window: DEFAULT_SMA_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub preview_rows: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// HTTP provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            base_delay_ms: 500,
        }
    }
}

impl ViewerConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.signal.sma_window == 0 {
            return Err(ViewerError::InvalidConfiguration(
                "signal.sma_window must be a positive integer".into(),
            ));
        }
        if self.export.preview_rows == 0 {
            return Err(ViewerError::InvalidConfiguration(
                "export.preview_rows must be at least 1".into(),
            ));
        }
        if self.fetch.default_lookback_days == 0 {
            return Err(ViewerError::InvalidConfiguration(
                "fetch.default_lookback_days must be positive".into(),
            ));
        }
        if self.fetch.lookback_choices.contains(&0) {
            return Err(ViewerError::InvalidConfiguration(
                "fetch.lookback_choices must all be positive".into(),
            ));
        }
        if self.provider.max_retries > MAX_PROVIDER_RETRIES {
            return Err(ViewerError::InvalidConfiguration(format!(
                "provider.max_retries must be at most {MAX_PROVIDER_RETRIES}, got {}",
                self.provider.max_retries
            )));
        }
        Ok(())
    }
}
