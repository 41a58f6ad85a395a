//! End-to-end pipeline tests against a stub provider and a fixed clock.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use pricelens_core::data::{DataProvider, FixedClock, RawBar, SourceError};
use pricelens_core::projection::CurveKind;
use pricelens_core::{Viewer, ViewerConfig, ViewerError};

/// Returns `days` ascending daily rows ending on the requested end date,
/// closes 100, 101, ... Counts calls. Symbols listed in `fail_on` error out.
struct StubProvider {
    days: usize,
    calls: AtomicUsize,
    fail_on: Vec<&'static str>,
    empty_on: Vec<&'static str>,
}

impl StubProvider {
    fn new(days: usize) -> Self {
        Self {
            days,
            calls: AtomicUsize::new(0),
            fail_on: Vec::new(),
            empty_on: Vec::new(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&symbol) {
            return Err(SourceError::NetworkUnreachable("stub outage".into()));
        }
        if self.empty_on.contains(&symbol) {
            return Ok(Vec::new());
        }
        let first = end - chrono::Duration::days(self.days as i64 - 1);
        Ok((0..self.days)
            .map(|i| {
                let close = 100.0 + i as f64;
                RawBar {
                    date: first + chrono::Duration::days(i as i64),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                }
            })
            .collect())
    }
}

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap())
}

#[test]
fn aapl_30_day_scenario() {
    let provider = StubProvider::new(30);
    let clock = clock();
    let mut viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();

    let series = viewer.fetch("AAPL", 30).unwrap();
    assert_eq!(series.len(), 30);
    assert!(series
        .points()
        .windows(2)
        .all(|w| w[0].date() < w[1].date()));

    // Day 10 carries the first SMA-10: mean(100..=109) = 104.5
    let points = series.points();
    assert!(points[..9].iter().all(|p| p.sma.is_none()));
    assert_eq!(points[9].sma, Some(104.5));
    assert_eq!(series.defined_sma_count(), 21);
    let day10 = points[9].date();

    viewer.set_signal_visible(true);
    let chart = viewer.chart().unwrap();
    let signal = chart.curve(CurveKind::Signal).unwrap();
    assert_eq!(signal.points[0], (day10, 104.5));
    assert_eq!(signal.points.len(), 21);
    assert_eq!(chart.curve(CurveKind::Close).unwrap().points.len(), 30);
    assert_eq!(chart.curve(CurveKind::Open).unwrap().points.len(), 30);
}

#[test]
fn toggle_and_export_do_not_refetch() {
    let provider = StubProvider::new(12);
    let clock = clock();
    let mut viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();
    viewer.fetch("MSFT", 30).unwrap();
    assert_eq!(provider.calls(), 1);

    viewer.set_signal_visible(true);
    viewer.chart().unwrap();
    viewer.set_signal_visible(false);
    viewer.table().unwrap();
    viewer.preview().unwrap();
    let mut sink = Vec::new();
    viewer.prepare_export().unwrap().confirm(&mut sink).unwrap();

    assert_eq!(provider.calls(), 1);
}

#[test]
fn failed_fetch_keeps_previous_series() {
    let mut provider = StubProvider::new(15);
    provider.fail_on.push("DOWN");
    provider.empty_on.push("NONE");
    let clock = clock();
    let mut viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();

    viewer.fetch("AAPL", 30).unwrap();

    assert!(matches!(
        viewer.fetch("DOWN", 30),
        Err(ViewerError::SourceUnavailable { .. })
    ));
    assert!(matches!(
        viewer.fetch("NONE", 30),
        Err(ViewerError::NoData { .. })
    ));
    assert!(matches!(
        viewer.fetch("", 30),
        Err(ViewerError::InvalidInput(_))
    ));

    let current = viewer.current().unwrap();
    assert_eq!(current.symbol(), "AAPL");
    assert_eq!(current.len(), 15);
}

#[test]
fn toggle_survives_new_fetch() {
    let provider = StubProvider::new(20);
    let clock = clock();
    let mut viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();
    viewer.set_signal_visible(true);
    viewer.fetch("TSLA", 30).unwrap();
    assert!(viewer.signal_visible());
    assert!(viewer.chart().unwrap().signal().is_some());
}

#[test]
fn empty_session_shows_nothing_and_refuses_export() {
    let provider = StubProvider::new(5);
    let clock = clock();
    let viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();

    assert!(viewer.table().is_none());
    assert!(viewer.chart().is_none());
    assert!(matches!(viewer.preview(), Err(ViewerError::NoDataToExport)));
    assert!(matches!(
        viewer.prepare_export(),
        Err(ViewerError::NoDataToExport)
    ));
    assert_eq!(provider.calls(), 0);
}

#[test]
fn export_empty_session_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let provider = StubProvider::new(5);
    let clock = clock();
    let viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();

    let result = viewer
        .prepare_export()
        .and_then(|pending| pending.confirm_to_path(&path));
    assert!(matches!(result, Err(ViewerError::NoDataToExport)));
    assert!(!path.exists());
}

#[test]
fn export_to_path_writes_full_series() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aapl.csv");
    let provider = StubProvider::new(12);
    let clock = clock();
    let mut viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();
    viewer.fetch("AAPL", 30).unwrap();

    let pending = viewer.prepare_export().unwrap();
    let preview: Vec<f64> = pending.preview().iter().map(|r| r.close).collect();
    assert_eq!(preview, vec![109.0, 110.0, 111.0]);
    assert_eq!(pending.confirm_to_path(&path).unwrap(), 12);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "date,open,close,high,low,sma");
    assert!(lines[1].ends_with(','));
    assert!(lines[10].ends_with(",104.5"));
    assert!(lines.iter().skip(1).zip(lines.iter().skip(2)).all(|(a, b)| a < b));
}

#[test]
fn export_to_missing_directory_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let provider = StubProvider::new(3);
    let clock = clock();
    let mut viewer = Viewer::new(&provider, &clock, &ViewerConfig::default()).unwrap();
    viewer.fetch("AAPL", 7).unwrap();

    let result = viewer.prepare_export().unwrap().confirm_to_path(&path);
    assert!(matches!(result, Err(ViewerError::IoFailure(_))));
}
