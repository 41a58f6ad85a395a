//! Session state: the single cached series plus the signal toggle.
//!
//! Owned by the session context and mutated through `&mut self` only, so the
//! borrow checker gives the single-writer discipline. `replace` is the only
//! way to change the cached series and it always discards the previous one.

use tracing::debug;

use crate::domain::Series;

#[derive(Debug, Default)]
pub struct SessionCache {
    series: Option<Series>,
    signal_visible: bool,
}

impl SessionCache {
    /// Empty cache, signal hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `series`, dropping whatever was cached before. Does not touch
    /// the signal toggle.
    pub fn replace(&mut self, series: Series) -> &Series {
        debug!(
            symbol = series.symbol(),
            rows = series.len(),
            replaced = self.series.is_some(),
            "session series replaced"
        );
        self.series.insert(series)
    }

    /// The cached series, or `None` when nothing has been fetched yet.
    ///
    /// `None` means "nothing to show", not an error.
    pub fn current(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_none()
    }

    pub fn set_signal_visible(&mut self, visible: bool) {
        self.signal_visible = visible;
    }

    pub fn signal_visible(&self) -> bool {
        self.signal_visible
    }
}
