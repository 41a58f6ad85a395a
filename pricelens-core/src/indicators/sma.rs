//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a trailing window.
//! Lookback: period - 1 (first defined value at index period-1).

use crate::domain::Series;
use crate::error::ViewerError;

/// Window used by the viewer's signal column.
pub const DEFAULT_SMA_WINDOW: usize = 10;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, ViewerError> {
        if period == 0 {
            return Err(ViewerError::InvalidConfiguration(
                "SMA window must be a positive integer".into(),
            ));
        }
        Ok(Self {
            period,
            name: format!("sma_{period}"),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn lookback(&self) -> usize {
        self.period - 1
    }

    /// One output per input. `None` until a full window is available, and for
    /// any window containing a NaN close.
    pub fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let n = closes.len();
        let mut result = vec![None; n];

        if n < self.period {
            return result;
        }

        // Compute initial window sum
        let mut sum: f64 = closes[..self.period].iter().sum();
        let mut nan_in_window = sum.is_nan();
        if !nan_in_window {
            result[self.period - 1] = Some(sum / self.period as f64);
        }

        // Roll the window forward
        for i in self.period..n {
            let leaving = closes[i - self.period];
            let entering = closes[i];

            if entering.is_nan() || leaving.is_nan() || nan_in_window {
                // A NaN poisons the running sum, so rescan the window
                let window = &closes[(i + 1 - self.period)..=i];
                sum = window.iter().sum();
                nan_in_window = sum.is_nan();
                if nan_in_window {
                    continue;
                }
            } else {
                sum = sum - leaving + entering;
            }

            result[i] = Some(sum / self.period as f64);
        }

        result
    }
}

/// Return a copy of `series` with its signal column set to SMA-`window`.
///
/// Pure: prices are untouched and no rounding is applied.
pub fn derive_sma(series: &Series, window: usize) -> Result<Series, ViewerError> {
    let sma = Sma::new(window)?;
    let closes: Vec<f64> = series.closes().collect();
    Ok(series.with_sma(window, sma.compute(&closes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::make_series;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let sma = Sma::new(5).unwrap();
        let result = sma.compute(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().take(4).enumerate() {
            assert!(v.is_none(), "expected None at index {i}");
        }
        // SMA[4] = mean(10,11,12,13,14) = 12.0
        assert_approx(result[4].unwrap(), 12.0, DEFAULT_EPSILON);
        assert_approx(result[5].unwrap(), 13.0, DEFAULT_EPSILON);
        assert_approx(result[6].unwrap(), 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_close() {
        let result = Sma::new(1).unwrap().compute(&[100.0, 200.0, 300.0]);
        assert_eq!(result, vec![Some(100.0), Some(200.0), Some(300.0)]);
    }

    #[test]
    fn sma_nan_window_is_undefined() {
        let result = Sma::new(3)
            .unwrap()
            .compute(&[10.0, 11.0, f64::NAN, 13.0, 14.0, 15.0]);
        // Index 2..=4 windows all contain the NaN
        assert!(result[2].is_none());
        assert!(result[3].is_none());
        assert!(result[4].is_none());
        // Index 5 window [13,14,15] → 14.0
        assert_approx(result[5].unwrap(), 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_zero_window_rejected() {
        assert!(matches!(
            Sma::new(0),
            Err(ViewerError::InvalidConfiguration(_))
        ));
        let s = make_series("TEST", &[1.0, 2.0]);
        assert!(matches!(
            derive_sma(&s, 0),
            Err(ViewerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn sma_lookback() {
        assert_eq!(Sma::new(20).unwrap().lookback(), 19);
        assert_eq!(Sma::new(1).unwrap().lookback(), 0);
        assert_eq!(Sma::new(10).unwrap().name(), "sma_10");
    }

    #[test]
    fn sma_too_few_points() {
        let result = Sma::new(5).unwrap().compute(&[10.0, 11.0]);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn twelve_point_series_window_10() {
        let closes: Vec<f64> = (1..=12).map(f64::from).collect();
        let series = make_series("TEST", &closes);
        let derived = derive_sma(&series, DEFAULT_SMA_WINDOW).unwrap();

        assert_eq!(derived.defined_sma_count(), 3);
        for p in &derived.points()[..9] {
            assert!(p.sma.is_none());
        }
        // mean(1..=10) = 5.5, mean(2..=11) = 6.5, mean(3..=12) = 7.5
        assert_approx(derived.points()[9].sma.unwrap(), 5.5, DEFAULT_EPSILON);
        assert_approx(derived.points()[10].sma.unwrap(), 6.5, DEFAULT_EPSILON);
        assert_approx(derived.points()[11].sma.unwrap(), 7.5, DEFAULT_EPSILON);
        assert_eq!(derived.sma_window(), Some(10));
    }

    #[test]
    fn derive_leaves_prices_alone() {
        let series = make_series("TEST", &[3.0, 1.0, 4.0, 1.0, 5.0]);
        let derived = derive_sma(&series, 2).unwrap();
        assert_eq!(derived.len(), series.len());
        for (a, b) in series.points().iter().zip(derived.points()) {
            assert_eq!(a.price, b.price);
        }
    }
}
