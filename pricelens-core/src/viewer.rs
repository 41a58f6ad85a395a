//! Viewer: the explicit session context.
//!
//! Owns the session cache and wires fetch → derive → cache. Front ends hold
//! one `Viewer` per session and call the projection and export methods,
//! which re-read the cache on every call.

use tracing::info;

use crate::config::ViewerConfig;
use crate::data::{Clock, DataProvider, SeriesFetcher, TickerDirectory};
use crate::domain::Series;
use crate::error::ViewerError;
use crate::export::{ExportGate, PendingExport, PreviewRow};
use crate::indicators::derive_sma;
use crate::projection::{ChartSpec, TableRow, ViewProjector};
use crate::session::SessionCache;

pub struct Viewer<'a> {
    fetcher: SeriesFetcher<'a>,
    cache: SessionCache,
    projector: ViewProjector,
    gate: ExportGate,
    tickers: TickerDirectory,
    sma_window: usize,
}

impl<'a> Viewer<'a> {
    /// Fresh session: empty cache, signal hidden.
    pub fn new(
        provider: &'a dyn DataProvider,
        clock: &'a dyn Clock,
        config: &ViewerConfig,
    ) -> Result<Self, ViewerError> {
        config.validate()?;
        let mut tickers = TickerDirectory::builtin();
        tickers.extend(&config.tickers);
        Ok(Self {
            fetcher: SeriesFetcher::new(provider, clock),
            cache: SessionCache::new(),
            projector: ViewProjector,
            gate: ExportGate::new(config.export.preview_rows),
            tickers,
            sma_window: config.signal.sma_window,
        })
    }

    /// Fetch, derive the signal and replace the cached series.
    ///
    /// On any error the previously cached series stays in place.
    pub fn fetch(&mut self, symbol: &str, lookback_days: i64) -> Result<&Series, ViewerError> {
        let raw = self.fetcher.fetch(symbol, lookback_days)?;
        let derived = derive_sma(&raw, self.sma_window)?;
        info!(
            symbol = derived.symbol(),
            rows = derived.len(),
            signal_points = derived.defined_sma_count(),
            "series ready"
        );
        Ok(self.cache.replace(derived))
    }

    pub fn current(&self) -> Option<&Series> {
        self.cache.current()
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn set_signal_visible(&mut self, visible: bool) {
        self.cache.set_signal_visible(visible);
    }

    pub fn signal_visible(&self) -> bool {
        self.cache.signal_visible()
    }

    pub fn sma_window(&self) -> usize {
        self.sma_window
    }

    pub fn table(&self) -> Option<Vec<TableRow>> {
        self.projector.table(&self.cache)
    }

    pub fn chart(&self) -> Option<ChartSpec> {
        self.projector.chart(&self.cache)
    }

    pub fn preview(&self) -> Result<Vec<PreviewRow>, ViewerError> {
        self.gate.preview(&self.cache)
    }

    pub fn prepare_export(&self) -> Result<PendingExport<'_>, ViewerError> {
        self.gate.prepare(&self.cache)
    }

    pub fn suggest(&self, query: &str) -> Option<&str> {
        self.tickers.suggest(query)
    }
}
