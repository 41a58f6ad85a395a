//! Domain types for PriceLens

pub mod price;
pub mod request;

pub use price::{PricePoint, Series, SeriesPoint};
pub use request::{normalize_symbol, FetchRequest};
