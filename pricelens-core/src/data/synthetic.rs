//! Offline synthetic provider.
//!
//! Generates a deterministic random walk per symbol, seeded from the symbol
//! name, skipping weekends. Lets the CLI run without network access; output
//! is clearly labelled as synthetic by the provider name.

use super::provider::{DataProvider, RawBar, SourceError};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
pub struct SyntheticProvider {
    start_price: f64,
}

impl SyntheticProvider {
    pub fn new(start_price: f64) -> Self {
        Self { start_price }
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, SourceError> {
        // Deterministic seed from symbol name
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = self.start_price;
        let mut current = start;

        while current <= end {
            let weekday = current.weekday();
            if weekday == Weekday::Sat || weekday == Weekday::Sun {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));

            bars.push(RawBar {
                date: current,
                open,
                high,
                low,
                close,
            });

            price = close;
            current += chrono::Duration::days(1);
        }

        Ok(bars)
    }
}
