//! Data provider trait and structured source error types.
//!
//! The DataProvider trait abstracts over market-data sources (Yahoo Finance,
//! synthetic offline data) so we can swap implementations and stub them in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PricePoint;

/// Raw daily OHLC row from a data provider, in whatever order it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<RawBar> for PricePoint {
    fn from(bar: RawBar) -> Self {
        PricePoint {
            date: bar.date,
            open: bar.open,
            close: bar.close,
            high: bar.high,
            low: bar.low,
        }
    }
}

/// Transport and lookup failures reported by a provider.
///
/// An empty result is not an error at this level: providers return
/// `Ok(vec![])` and the fetcher turns that into `NoData`.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("HTTP {status} for {symbol}")]
    HttpStatus { status: u16, symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market-data providers.
///
/// `fetch` is blocking and is the only suspension point of the pipeline.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLC rows for a symbol over an inclusive date range.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bar_maps_onto_price_point() {
        let bar = RawBar {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
        };
        let p = PricePoint::from(bar);
        assert_eq!(p.date, bar.date);
        assert_eq!(p.open, 10.0);
        assert_eq!(p.close, 11.0);
        assert_eq!(p.high, 12.0);
        assert_eq!(p.low, 9.0);
    }

    #[test]
    fn provider_is_object_safe() {
        fn _takes_dyn(_p: &dyn DataProvider) {}
    }
}
