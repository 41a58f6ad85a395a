//! Ticker suggestions: company name to symbol lookup.
//!
//! A small built-in directory covers the common names; configuration can add
//! more entries. Lookup is case-insensitive on a trimmed query.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerDirectory {
    names: BTreeMap<String, String>,
}

impl TickerDirectory {
    pub fn builtin() -> Self {
        let names = [
            ("apple", "AAPL"),
            ("tesla", "TSLA"),
            ("microsoft", "MSFT"),
            ("google", "GOOGL"),
        ]
        .into_iter()
        .map(|(name, sym)| (name.to_string(), sym.to_string()))
        .collect();
        Self { names }
    }

    /// Add or override entries. Names are stored lowercased.
    pub fn extend<'a>(&mut self, entries: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (name, sym) in entries {
            self.names
                .insert(name.trim().to_lowercase(), sym.trim().to_uppercase());
        }
    }

    pub fn suggest(&self, query: &str) -> Option<&str> {
        self.names
            .get(&query.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TickerDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
