//! Canonicalize provider rows: sort ascending by date, drop duplicate dates.
//!
//! Providers are expected to return ascending, unique dates. When they don't,
//! we repair the rows instead of failing the fetch. The first row seen for a
//! date wins, matching a stable sort followed by keep-first dedup.

use super::provider::RawBar;

/// Outcome of canonicalization, with counts for logging.
#[derive(Debug, Clone)]
pub struct Canonicalized {
    pub bars: Vec<RawBar>,
    pub was_unsorted: bool,
    pub duplicates_dropped: usize,
}

impl Canonicalized {
    /// True if the input needed any repair.
    pub fn repaired(&self) -> bool {
        self.was_unsorted || self.duplicates_dropped > 0
    }
}

pub fn canonicalize(mut bars: Vec<RawBar>) -> Canonicalized {
    let was_unsorted = bars.windows(2).any(|w| w[0].date > w[1].date);
    if was_unsorted {
        // stable: equal dates keep arrival order, so dedup keeps the first
        bars.sort_by_key(|b| b.date);
    }

    let before = bars.len();
    bars.dedup_by_key(|b| b.date);
    let duplicates_dropped = before - bars.len();

    Canonicalized {
        bars,
        was_unsorted,
        duplicates_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, open: f64) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open,
            high: open + 5.0,
            low: open - 1.0,
            close: open + 3.0,
        }
    }

    #[test]
    fn canonicalize_sorts_data() {
        let out = canonicalize(vec![bar(3, 100.0), bar(1, 100.0), bar(2, 100.0)]);
        let days: Vec<_> = out.bars.iter().map(|b| b.date).collect();
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert!(out.was_unsorted);
        assert_eq!(out.duplicates_dropped, 0);
    }

    #[test]
    fn canonicalize_removes_duplicates_keeping_first() {
        let out = canonicalize(vec![bar(1, 100.0), bar(1, 101.0), bar(2, 102.0)]);
        assert_eq!(out.bars.len(), 2);
        assert_eq!(out.bars[0].open, 100.0);
        assert_eq!(out.duplicates_dropped, 1);
        assert!(!out.was_unsorted);
    }

    #[test]
    fn unsorted_duplicates_keep_arrival_order() {
        let out = canonicalize(vec![bar(2, 1.0), bar(1, 2.0), bar(2, 3.0)]);
        assert_eq!(out.bars.len(), 2);
        assert_eq!(out.bars[1].open, 1.0);
    }

    #[test]
    fn clean_input_untouched() {
        let input = vec![bar(1, 1.0), bar(2, 2.0), bar(5, 3.0)];
        let out = canonicalize(input.clone());
        assert!(!out.repaired());
        assert_eq!(out.bars, input);
    }

    #[test]
    fn empty_input() {
        let out = canonicalize(Vec::new());
        assert!(out.bars.is_empty());
        assert!(!out.repaired());
    }
}
