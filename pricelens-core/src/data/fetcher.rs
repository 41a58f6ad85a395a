//! SeriesFetcher: validated, clock-windowed retrieval of a daily series.
//!
//! Input is validated before the provider is touched. The window is
//! `[today - lookback_days, today]` with "today" taken from the injected
//! clock. Provider rows are canonicalized (ascending, unique dates) and the
//! returned series carries no signal column yet.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::canonicalize::canonicalize;
use super::clock::Clock;
use super::provider::DataProvider;
use crate::domain::{FetchRequest, PricePoint, Series};
use crate::error::ViewerError;

pub struct SeriesFetcher<'a> {
    provider: &'a dyn DataProvider,
    clock: &'a dyn Clock,
}

impl<'a> SeriesFetcher<'a> {
    pub fn new(provider: &'a dyn DataProvider, clock: &'a dyn Clock) -> Self {
        Self { provider, clock }
    }

    /// Inclusive date window for a lookback ending today.
    ///
    /// Fails with `InvalidInput` when the start would fall before the
    /// earliest representable date.
    pub fn window(&self, lookback_days: u32) -> Result<(NaiveDate, NaiveDate), ViewerError> {
        let end = self.clock.today();
        let start = end
            .checked_sub_signed(chrono::Duration::days(i64::from(lookback_days)))
            .ok_or_else(|| {
                ViewerError::InvalidInput(format!(
                    "lookback of {lookback_days} days reaches past the earliest supported date"
                ))
            })?;
        Ok((start, end))
    }

    /// Validate raw input, then fetch.
    pub fn fetch(&self, symbol: &str, lookback_days: i64) -> Result<Series, ViewerError> {
        let request = FetchRequest::new(symbol, lookback_days)?;
        self.fetch_request(&request)
    }

    pub fn fetch_request(&self, request: &FetchRequest) -> Result<Series, ViewerError> {
        let symbol = request.symbol();
        let (start, end) = self.window(request.lookback_days())?;
        debug!(
            symbol,
            %start,
            %end,
            provider = self.provider.name(),
            "fetching series"
        );

        let bars = self
            .provider
            .fetch(symbol, start, end)
            .map_err(|source| ViewerError::SourceUnavailable {
                symbol: symbol.to_string(),
                source,
            })?;

        if bars.is_empty() {
            return Err(ViewerError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let canonical = canonicalize(bars);
        if canonical.repaired() {
            warn!(
                symbol,
                unsorted = canonical.was_unsorted,
                duplicates_dropped = canonical.duplicates_dropped,
                "provider returned out-of-order or duplicate dates; repaired"
            );
        }

        let prices: Vec<PricePoint> = canonical.bars.into_iter().map(PricePoint::from).collect();
        info!(symbol, rows = prices.len(), "fetched series");
        Ok(Series::new(symbol, prices))
    }
}
