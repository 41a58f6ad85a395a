//! Pipeline error taxonomy.
//!
//! Every failure the viewer pipeline can surface is one variant of
//! [`ViewerError`]. Provider-level detail lives in [`SourceError`] and is
//! carried by `SourceUnavailable` so front ends can show it verbatim.

use thiserror::Error;

use crate::data::provider::SourceError;

/// Failure kinds surfaced to callers of the pipeline.
///
/// None of these are retried automatically and none of them touch the
/// session cache: a failed fetch leaves the previously cached series in place.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Bad symbol or lookback window, detected before any external call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Bad derivation window or configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The source was reached but returned no rows.
    #[error("no data found for symbol '{symbol}'")]
    NoData { symbol: String },

    /// The source could not be reached or reported an error.
    #[error("failed to fetch data for '{symbol}': {source}")]
    SourceUnavailable {
        symbol: String,
        #[source]
        source: SourceError,
    },

    /// Preview or export requested while the session holds no series.
    #[error("no data to export: fetch a series first")]
    NoDataToExport,

    /// Writing to the export destination failed.
    #[error("export failed: {0}")]
    IoFailure(#[from] std::io::Error),
}

/// Coarse message category, so a front end can tell "nothing to show yet"
/// apart from "the input was wrong" and "something broke".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NothingToShow,
    BadInput,
    Failure,
}

impl ViewerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ViewerError::NoData { .. } | ViewerError::NoDataToExport => {
                ErrorCategory::NothingToShow
            }
            ViewerError::InvalidInput(_) | ViewerError::InvalidConfiguration(_) => {
                ErrorCategory::BadInput
            }
            ViewerError::SourceUnavailable { .. } | ViewerError::IoFailure(_) => {
                ErrorCategory::Failure
            }
        }
    }

    /// Short dialog-style title, distinct per variant.
    pub fn title(&self) -> &'static str {
        match self {
            ViewerError::InvalidInput(_) => "Input Error",
            ViewerError::InvalidConfiguration(_) => "Configuration Error",
            ViewerError::NoData { .. } => "No Data",
            ViewerError::SourceUnavailable { .. } => "Fetch Failed",
            ViewerError::NoDataToExport => "Nothing to Export",
            ViewerError::IoFailure(_) => "Export Failed",
        }
    }
}

impl From<csv::Error> for ViewerError {
    fn from(err: csv::Error) -> Self {
        ViewerError::IoFailure(err.into())
    }
}
