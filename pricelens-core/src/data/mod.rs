//! Market data: providers, clock, canonicalization and the series fetcher

pub mod canonicalize;
pub mod clock;
pub mod fetcher;
pub mod provider;
pub mod synthetic;
pub mod tickers;
pub mod yahoo;

pub use clock::{Clock, FixedClock, SystemClock};
pub use fetcher::SeriesFetcher;
pub use provider::{DataProvider, RawBar, SourceError};
pub use synthetic::SyntheticProvider;
pub use tickers::TickerDirectory;
pub use yahoo::YahooProvider;
