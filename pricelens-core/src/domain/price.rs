//! PricePoint and Series: the daily market data the viewer works on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for a single symbol.
///
/// `low <= min(open, close) <= max(open, close) <= high` is expected from the
/// source but not enforced; see [`PricePoint::is_sane`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

impl PricePoint {
    /// OHLC ordering check. Informational only; the pipeline keeps insane rows.
    pub fn is_sane(&self) -> bool {
        self.low <= self.open.min(self.close)
            && self.open.max(self.close) <= self.high
            && self.low >= 0.0
    }
}

/// A price point paired with its derived moving-average value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub price: PricePoint,
    /// Trailing mean of `close`; `None` until a full window is available.
    pub sma: Option<f64>,
}

impl SeriesPoint {
    pub fn date(&self) -> NaiveDate {
        self.price.date
    }
}

/// Date-ordered daily series for one symbol.
///
/// Points are ascending by date with no duplicate dates. The fetcher
/// canonicalizes provider rows before building a `Series`, so code that
/// receives one can rely on the ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: String,
    points: Vec<SeriesPoint>,
    sma_window: Option<usize>,
}

impl Series {
    /// Build a series with no derived signal. `prices` must already be
    /// ascending by date and free of duplicate dates.
    pub fn new(symbol: impl Into<String>, prices: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points: prices
                .into_iter()
                .map(|price| SeriesPoint { price, sma: None })
                .collect(),
            sma_window: None,
        }
    }

    /// Replace the signal column. Used by the SMA deriver only.
    pub(crate) fn with_sma(&self, window: usize, sma: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(sma.len(), self.points.len());
        let points = self
            .points
            .iter()
            .zip(sma)
            .map(|(p, sma)| SeriesPoint {
                price: p.price,
                sma,
            })
            .collect();
        Self {
            symbol: self.symbol.clone(),
            points,
            sma_window: Some(window),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Window the signal column was derived with, if any.
    pub fn sma_window(&self) -> Option<usize> {
        self.sma_window
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price.close)
    }

    /// Number of points carrying a defined signal value.
    pub fn defined_sma_count(&self) -> usize {
        self.points.iter().filter(|p| p.sma.is_some()).count()
    }

    pub fn has_signal(&self) -> bool {
        self.points.iter().any(|p| p.sma.is_some())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(SeriesPoint::date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(SeriesPoint::date)
    }
}

/// Build an ascending series from close prices, one calendar day apart.
///
/// open = previous close (or close for the first point), high/low = ±1.
#[cfg(test)]
pub(crate) fn make_series(symbol: &str, closes: &[f64]) -> Series {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let prices = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PricePoint {
                date: base + chrono::Duration::days(i as i64),
                open,
                close,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
            }
        })
        .collect();
    Series::new(symbol, prices)
}
