//! Export gate: preview, confirm, then write the full series as CSV.
//!
//! The gate reads the session cache and never fetches. On an empty cache both
//! preview and export fail with `NoDataToExport` before anything is written.
//! Writing requires a [`PendingExport`], which can only be obtained together
//! with its preview, so a caller cannot serialize without having had the
//! preview to show for confirmation.
//!
//! CSV columns: date, open, close, high, low, sma (blank when undefined).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::domain::Series;
use crate::error::ViewerError;
use crate::session::SessionCache;

/// Rows shown in the confirmation preview by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 3;

const CSV_HEADER: [&str; 6] = ["date", "open", "close", "high", "low", "sma"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewRow {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

/// Last `tail` rows in chronological order; all rows if the series is shorter.
pub fn preview_rows(series: &Series, tail: usize) -> Vec<PreviewRow> {
    let points = series.points();
    let skip = points.len().saturating_sub(tail);
    points[skip..]
        .iter()
        .map(|p| PreviewRow {
            date: p.price.date,
            open: p.price.open,
            close: p.price.close,
        })
        .collect()
}

/// Serialize the whole series, header first, one row per point.
pub fn write_csv<W: Write>(series: &Series, writer: W) -> Result<(), ViewerError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for p in series.points() {
        wtr.write_record([
            p.price.date.to_string(),
            p.price.open.to_string(),
            p.price.close.to_string(),
            p.price.high.to_string(),
            p.price.low.to_string(),
            p.sma.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct ExportGate {
    preview_rows: usize,
}

impl ExportGate {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    pub fn preview(&self, cache: &SessionCache) -> Result<Vec<PreviewRow>, ViewerError> {
        let series = cache.current().ok_or(ViewerError::NoDataToExport)?;
        Ok(preview_rows(series, self.preview_rows))
    }

    /// Start an export: checks there is data and captures the preview.
    pub fn prepare<'c>(&self, cache: &'c SessionCache) -> Result<PendingExport<'c>, ViewerError> {
        let series = cache.current().ok_or(ViewerError::NoDataToExport)?;
        Ok(PendingExport {
            series,
            preview: preview_rows(series, self.preview_rows),
        })
    }
}

impl Default for ExportGate {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_ROWS)
    }
}

/// An export awaiting confirmation. Dropping it cancels the export.
#[derive(Debug)]
pub struct PendingExport<'c> {
    series: &'c Series,
    preview: Vec<PreviewRow>,
}

impl PendingExport<'_> {
    pub fn preview(&self) -> &[PreviewRow] {
        &self.preview
    }

    pub fn symbol(&self) -> &str {
        self.series.symbol()
    }

    /// Rows that will be written (the full series, not just the preview).
    pub fn row_count(&self) -> usize {
        self.series.len()
    }

    /// Confirmed: write to `writer`. Returns the number of data rows.
    pub fn confirm<W: Write>(self, writer: W) -> Result<usize, ViewerError> {
        write_csv(self.series, writer)?;
        info!(symbol = self.series.symbol(), rows = self.series.len(), "exported series");
        Ok(self.series.len())
    }

    /// Confirmed: create `path` and write to it.
    pub fn confirm_to_path(self, path: &Path) -> Result<usize, ViewerError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let rows = self.confirm(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "export written");
        Ok(rows)
    }
}
