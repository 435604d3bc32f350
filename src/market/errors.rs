// ============================================================================
// Market Errors
// ============================================================================

use crate::numeric::NumericError;
use thiserror::Error;

/// Errors raised by the market-level precision helpers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketError {
    #[error("market not found: {0}")]
    MarketNotFound(String),

    #[error("currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("{symbol} has no {field} precision")]
    MissingPrecision { symbol: String, field: &'static str },

    /// Value formats to zero at the market's precision
    #[error("{field} of {symbol} must be greater than minimum {field} precision of {precision}")]
    BelowMinimumPrecision {
        symbol: String,
        field: &'static str,
        precision: String,
    },

    #[error("{symbol} has no {kind} fee rate")]
    MissingFeeRate { symbol: String, kind: &'static str },

    #[error("a market order cannot be charged a maker fee")]
    IncompatibleFeeArguments,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}
