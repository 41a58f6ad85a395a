//! View projections: table rows and chart curves derived from a series.
//!
//! Both projections are pure functions of their inputs. The session-level
//! helpers on [`ViewProjector`] re-read the cache every call and return `None`
//! when nothing has been fetched yet; they never trigger a fetch.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Series;
use crate::session::SessionCache;

/// One table row, in series order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    Close,
    Open,
    Signal,
}

/// A named curve: ordered (date, value) pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub kind: CurveKind,
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Everything a chart renderer needs. Curves are in draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    pub curves: Vec<Curve>,
}

impl ChartSpec {
    pub fn curve(&self, kind: CurveKind) -> Option<&Curve> {
        self.curves.iter().find(|c| c.kind == kind)
    }

    pub fn signal(&self) -> Option<&Curve> {
        self.curve(CurveKind::Signal)
    }
}

pub fn project_table(series: &Series) -> Vec<TableRow> {
    series
        .points()
        .iter()
        .map(|p| TableRow {
            date: p.price.date,
            open: p.price.open,
            close: p.price.close,
            high: p.price.high,
            low: p.price.low,
        })
        .collect()
}

/// Close and open curves always; the signal curve only when `show_signal` is
/// set and at least one point has a defined value.
pub fn project_chart(series: &Series, show_signal: bool) -> ChartSpec {
    let points = series.points();
    let mut curves = vec![
        Curve {
            kind: CurveKind::Close,
            label: "Close Price".into(),
            points: points.iter().map(|p| (p.date(), p.price.close)).collect(),
        },
        Curve {
            kind: CurveKind::Open,
            label: "Open Price".into(),
            points: points.iter().map(|p| (p.date(), p.price.open)).collect(),
        },
    ];

    if show_signal {
        let signal: Vec<(NaiveDate, f64)> = points
            .iter()
            .filter_map(|p| p.sma.map(|v| (p.date(), v)))
            .collect();
        if !signal.is_empty() {
            let label = match series.sma_window() {
                Some(w) => format!("SMA-{w}"),
                None => "SMA".into(),
            };
            curves.push(Curve {
                kind: CurveKind::Signal,
                label,
                points: signal,
            });
        }
    }

    ChartSpec {
        title: "Stock Price Trend".into(),
        y_label: "Price (USD)".into(),
        curves,
    }
}

/// Session-bound projections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewProjector;

impl ViewProjector {
    pub fn table(&self, cache: &SessionCache) -> Option<Vec<TableRow>> {
        cache.current().map(project_table)
    }

    pub fn chart(&self, cache: &SessionCache) -> Option<ChartSpec> {
        cache
            .current()
            .map(|series| project_chart(series, cache.signal_visible()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::make_series;
    use crate::indicators::derive_sma;

    #[test]
    fn table_preserves_order_and_count() {
        let series = make_series("TEST", &[5.0, 3.0, 9.0, 1.0]);
        let rows = project_table(&series);
        assert_eq!(rows.len(), 4);
        let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![5.0, 3.0, 9.0, 1.0]);
        assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(rows[1].open, 5.0);
        assert_eq!(rows[1].high, 6.0);
        assert_eq!(rows[1].low, 2.0);
    }

    #[test]
    fn chart_always_has_close_and_open() {
        let series = make_series("TEST", &[1.0, 2.0, 3.0]);
        let chart = project_chart(&series, false);
        assert_eq!(chart.curves.len(), 2);
        assert_eq!(chart.curves[0].kind, CurveKind::Close);
        assert_eq!(chart.curves[0].label, "Close Price");
        assert_eq!(chart.curves[1].kind, CurveKind::Open);
        assert_eq!(chart.curves[1].points.len(), 3);
        assert!(chart.signal().is_none());
    }

    #[test]
    fn signal_hidden_when_toggle_off() {
        let closes: Vec<f64> = (0..15).map(f64::from).collect();
        let series = derive_sma(&make_series("TEST", &closes), 10).unwrap();
        assert!(project_chart(&series, false).signal().is_none());
    }

    #[test]
    fn signal_shown_when_toggle_on() {
        let closes: Vec<f64> = (0..15).map(f64::from).collect();
        let series = derive_sma(&make_series("TEST", &closes), 10).unwrap();
        let chart = project_chart(&series, true);
        let signal = chart.signal().unwrap();
        assert_eq!(signal.label, "SMA-10");
        assert_eq!(signal.points.len(), 6);
        assert_eq!(signal.points[0].0, series.points()[9].date());
        assert_eq!(signal.points[0].1, 4.5);
    }

    #[test]
    fn short_series_with_toggle_on_is_not_a_failure() {
        let series = derive_sma(&make_series("TEST", &[1.0, 2.0, 3.0]), 10).unwrap();
        let chart = project_chart(&series, true);
        assert_eq!(chart.curves.len(), 2);
        assert!(chart.signal().is_none());
    }

    #[test]
    fn empty_cache_projects_nothing() {
        let cache = SessionCache::new();
        assert!(ViewProjector.table(&cache).is_none());
        assert!(ViewProjector.chart(&cache).is_none());
    }

    #[test]
    fn projections_follow_current_state() {
        let mut cache = SessionCache::new();
        let closes: Vec<f64> = (0..12).map(f64::from).collect();
        cache.replace(derive_sma(&make_series("AAA", &closes), 10).unwrap());

        assert!(ViewProjector.chart(&cache).unwrap().signal().is_none());
        cache.set_signal_visible(true);
        assert!(ViewProjector.chart(&cache).unwrap().signal().is_some());

        cache.replace(derive_sma(&make_series("BBB", &[1.0, 2.0]), 10).unwrap());
        assert_eq!(ViewProjector.table(&cache).unwrap().len(), 2);
        assert!(ViewProjector.chart(&cache).unwrap().signal().is_none());
    }
}
