//! Validated fetch request.

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// A symbol and lookback window that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    symbol: String,
    lookback_days: u32,
}

impl FetchRequest {
    /// Trim and uppercase the symbol; reject empty symbols and zero windows.
    pub fn new(symbol: &str, lookback_days: i64) -> Result<Self, ViewerError> {
        let symbol = normalize_symbol(symbol)?;
        if lookback_days <= 0 {
            return Err(ViewerError::InvalidInput(format!(
                "lookback must be a positive number of days, got {lookback_days}"
            )));
        }
        let lookback_days = u32::try_from(lookback_days).map_err(|_| {
            ViewerError::InvalidInput(format!("lookback of {lookback_days} days is too large"))
        })?;
        Ok(Self {
            symbol,
            lookback_days,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }
}

/// Uppercase, whitespace-trimmed ticker symbol.
pub fn normalize_symbol(raw: &str) -> Result<String, ViewerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ViewerError::InvalidInput(
            "please enter a stock symbol".into(),
        ));
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        let req = FetchRequest::new("  aapl ", 30).unwrap();
        assert_eq!(req.symbol(), "AAPL");
        assert_eq!(req.lookback_days(), 30);
    }

    #[test]
    fn blank_symbol_rejected() {
        assert!(matches!(
            FetchRequest::new("   ", 30),
            Err(ViewerError::InvalidInput(_))
        ));
    }

    #[test]
    fn non_positive_lookback_rejected() {
        assert!(matches!(
            FetchRequest::new("AAPL", 0),
            Err(ViewerError::InvalidInput(_))
        ));
        assert!(matches!(
            FetchRequest::new("AAPL", -7),
            Err(ViewerError::InvalidInput(_))
        ));
    }

    #[test]
    fn any_positive_lookback_accepted() {
        // The front end offers 7/30/90 but the pipeline takes any positive window.
        assert_eq!(FetchRequest::new("MSFT", 45).unwrap().lookback_days(), 45);
    }
}
