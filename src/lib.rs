// ============================================================================
// Exchange Precision Library
// Exchange-compliant number formatting and exact decimal arithmetic
// ============================================================================

//! # Exchange Precision
//!
//! Formats prices, amounts and fees the way exchanges accept them, and
//! computes with them without binary floating-point error.
//!
//! ## Features
//!
//! - **Precision formatting** by decimal places, significant digits or tick size
//! - **Character-exact output** with optional zero padding
//! - **Arbitrary-precision decimals** ([`numeric::Precise`]) backed by big integers
//! - **Market helpers** applying per-market precision and computing fees
//!
//! ## Example
//!
//! ```rust
//! use exchange_precision::prelude::*;
//!
//! // Round a price to two decimal places
//! let price = format_to_precision(
//!     123.4567,
//!     RoundingMode::Round,
//!     2,
//!     CountingMode::DecimalPlaces,
//!     PaddingMode::NoPadding,
//! )
//! .unwrap();
//! assert_eq!(price, "123.46");
//!
//! // Snap an amount down onto a 0.05 grid
//! let amount = format_to_precision(
//!     "1.237",
//!     RoundingMode::Truncate,
//!     "0.05",
//!     CountingMode::TickSize,
//!     PaddingMode::NoPadding,
//! )
//! .unwrap();
//! assert_eq!(amount, "1.2");
//!
//! // Exact arithmetic
//! let sum = Precise::parse("1.1").unwrap() + Precise::parse("2.2").unwrap();
//! assert_eq!(sum.to_string(), "3.3");
//! ```

pub mod format;
pub mod market;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::format::{
        decimal_to_precision, format_to_precision, omit_zero, parse_precision,
        precision_from_string, CountingMode, PaddingMode, RoundingMode,
    };
    pub use crate::market::{
        Currency, ExchangePrecision, Fee, FeeSide, Market, MarketError, MarketRegistry, OrderType,
        Side, TakerOrMaker,
    };
    pub use crate::numeric::{
        number_to_string, NumericError, NumericInput, NumericResult, Precise,
    };
}
