//! PriceLens Core: the stock-price viewer pipeline.
//!
//! This crate contains everything below the presentation layer:
//! - Domain types (price points, series, fetch requests)
//! - Data providers (Yahoo Finance, synthetic) behind the `DataProvider` trait
//! - Series fetcher with an injectable clock
//! - SMA signal derivation
//! - Session cache with the signal toggle
//! - Table and chart projections
//! - Export gate with preview and confirmation
//! - TOML configuration
//! - A small student grade calculator

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod export;
pub mod grade;
pub mod indicators;
pub mod projection;
pub mod session;
pub mod viewer;

pub use config::{ConfigError, ViewerConfig};
pub use error::{ErrorCategory, ViewerError};
pub use viewer::Viewer;
