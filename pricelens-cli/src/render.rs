//! Plain-text rendering of projections for the terminal.

use pricelens_core::export::PreviewRow;
use pricelens_core::projection::{ChartSpec, TableRow};
use pricelens_core::ViewerError;

pub fn table(rows: &[TableRow]) -> String {
    let mut out = format!(
        "{:<12} {:>10} {:>10} {:>10} {:>10}\n",
        "Date", "Open", "Close", "High", "Low"
    );
    out.push_str(&"-".repeat(56));
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
            r.date.format("%Y-%m-%d"),
            r.open,
            r.close,
            r.high,
            r.low
        ));
    }
    out
}

/// Summary of each curve: label, point count, first/last and range.
pub fn chart(spec: &ChartSpec) -> String {
    let mut out = format!("=== {} ({}) ===\n", spec.title, spec.y_label);
    for curve in &spec.curves {
        let (Some(first), Some(last)) = (curve.points.first(), curve.points.last()) else {
            out.push_str(&format!("{:<12} (no points)\n", curve.label));
            continue;
        };
        let lo = curve.points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let hi = curve
            .points
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max);
        out.push_str(&format!(
            "{:<12} {:>4} pts  {} {:>9.2} -> {} {:>9.2}  [min {:.2}, max {:.2}]\n",
            curve.label,
            curve.points.len(),
            first.0,
            first.1,
            last.0,
            last.1,
            lo,
            hi
        ));
    }
    out
}

pub fn preview(rows: &[PreviewRow]) -> String {
    let mut out = format!("{:<12} {:>10} {:>10}\n", "Date", "Open", "Close");
    for r in rows {
        out.push_str(&format!(
            "{:<12} {:>10.2} {:>10.2}\n",
            r.date.format("%Y-%m-%d"),
            r.open,
            r.close
        ));
    }
    out
}

/// One-line error message prefixed with its dialog title.
pub fn error(err: &ViewerError) -> String {
    format!("[{}] {err}", err.title())
}
