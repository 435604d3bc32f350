// ============================================================================
// Market Configuration
// Exchange precision settings and per-market precision metadata
// ============================================================================

use super::errors::MarketError;
use crate::format::{CountingMode, PaddingMode};
use crate::numeric::NumericInput;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Exchange Precision
// ============================================================================

/// How an exchange states its precision metadata.
///
/// Most exchanges publish tick sizes (`"0.01"`), older ones publish digit
/// counts (`2`). The padding mode applies to every formatted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExchangePrecision {
    pub precision_mode: CountingMode,
    pub padding_mode: PaddingMode,
}

impl ExchangePrecision {
    pub fn new(precision_mode: CountingMode, padding_mode: PaddingMode) -> Self {
        Self {
            precision_mode,
            padding_mode,
        }
    }

    /// Tick-size metadata, no padding
    pub fn tick_size() -> Self {
        Self::new(CountingMode::TickSize, PaddingMode::NoPadding)
    }

    /// Check that `value` is usable as precision metadata under this mode.
    pub(crate) fn check_precision(&self, owner: &str, value: &NumericInput) -> Result<(), MarketError> {
        let valid = match self.precision_mode {
            CountingMode::TickSize => value.to_f64().map(|tick| tick > 0.0).unwrap_or(false),
            CountingMode::DecimalPlaces | CountingMode::SignificantDigits => {
                value.to_digit_count().is_ok()
            }
        };
        if valid {
            Ok(())
        } else {
            Err(MarketError::Config(format!(
                "{}: precision {} is not valid under {:?}",
                owner, value, self.precision_mode
            )))
        }
    }
}

// ============================================================================
// Fee Side
// ============================================================================

/// Which currency a market charges its trading fee in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FeeSide {
    /// The currency received
    Get,
    /// The currency spent
    Give,
    #[default]
    Quote,
    Base,
}

// ============================================================================
// Market
// ============================================================================

/// Price and amount precision of a market, as a tick size or digit count
/// depending on [`ExchangePrecision::precision_mode`]
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarketPrecision {
    pub price: Option<NumericInput>,
    pub amount: Option<NumericInput>,
}

/// A tradable market with the metadata the precision helpers need
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Market {
    /// Unified symbol (e.g., "BTC/USDT", "BTC/USDT:USDT")
    pub symbol: String,
    pub base: String,
    pub quote: String,
    /// Settlement currency of derivative markets
    pub settle: Option<String>,
    pub spot: bool,
    pub precision: MarketPrecision,
    /// Taker fee rate (e.g., "0.001")
    pub taker: Option<NumericInput>,
    /// Maker fee rate
    pub maker: Option<NumericInput>,
    pub fee_side: FeeSide,
}

impl Default for Market {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            base: String::new(),
            quote: String::new(),
            settle: None,
            spot: true,
            precision: MarketPrecision::default(),
            taker: None,
            maker: None,
            fee_side: FeeSide::default(),
        }
    }
}

impl Market {
    /// Create a spot market
    pub fn spot(symbol: impl Into<String>, base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            base: base.into(),
            quote: quote.into(),
            ..Self::default()
        }
    }

    /// Create a derivative market settled in `settle`
    pub fn derivative(
        symbol: impl Into<String>,
        base: impl Into<String>,
        quote: impl Into<String>,
        settle: impl Into<String>,
    ) -> Self {
        Self {
            settle: Some(settle.into()),
            spot: false,
            ..Self::spot(symbol, base, quote)
        }
    }

    /// Builder method: Set price precision
    pub fn with_price_precision(mut self, precision: impl Into<NumericInput>) -> Self {
        self.precision.price = Some(precision.into());
        self
    }

    /// Builder method: Set amount precision
    pub fn with_amount_precision(mut self, precision: impl Into<NumericInput>) -> Self {
        self.precision.amount = Some(precision.into());
        self
    }

    /// Builder method: Set taker and maker fee rates
    pub fn with_fees(mut self, taker: impl Into<NumericInput>, maker: impl Into<NumericInput>) -> Self {
        self.taker = Some(taker.into());
        self.maker = Some(maker.into());
        self
    }

    /// Builder method: Set the fee currency side
    pub fn with_fee_side(mut self, fee_side: FeeSide) -> Self {
        self.fee_side = fee_side;
        self
    }

    /// Validate the market against the exchange precision mode
    pub fn validate(&self, precision: &ExchangePrecision) -> Result<(), MarketError> {
        if self.symbol.is_empty() {
            return Err(MarketError::Config("market symbol cannot be empty".to_string()));
        }
        if self.base.is_empty() || self.quote.is_empty() {
            return Err(MarketError::Config(format!(
                "{}: base and quote currencies are required",
                self.symbol
            )));
        }
        if !self.spot && self.settle.is_none() {
            return Err(MarketError::Config(format!(
                "{}: derivative market without a settle currency",
                self.symbol
            )));
        }

        for value in [&self.precision.price, &self.precision.amount].into_iter().flatten() {
            precision.check_precision(&self.symbol, value)?;
        }
        for rate in [&self.taker, &self.maker].into_iter().flatten() {
            rate.to_f64().map_err(|_| {
                MarketError::Config(format!("{}: fee rate {} is not a number", self.symbol, rate))
            })?;
        }

        Ok(())
    }
}

// ============================================================================
// Currency
// ============================================================================

/// A currency with its default precision and per-network overrides
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Currency {
    pub code: String,
    pub precision: Option<NumericInput>,
    /// Withdrawal networks (e.g., "ERC20", "TRC20") and their precision
    pub networks: HashMap<String, NumericInput>,
}

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Builder method: Set default precision
    pub fn with_precision(mut self, precision: impl Into<NumericInput>) -> Self {
        self.precision = Some(precision.into());
        self
    }

    /// Builder method: Add a network-specific precision
    pub fn with_network(mut self, network: impl Into<String>, precision: impl Into<NumericInput>) -> Self {
        self.networks.insert(network.into(), precision.into());
        self
    }

    /// Precision for `network`, falling back to the currency default
    pub fn precision_for(&self, network: Option<&str>) -> Option<&NumericInput> {
        network
            .and_then(|name| self.networks.get(name))
            .or(self.precision.as_ref())
    }

    pub fn validate(&self, precision: &ExchangePrecision) -> Result<(), MarketError> {
        if self.code.is_empty() {
            return Err(MarketError::Config("currency code cannot be empty".to_string()));
        }
        for value in self.precision.iter().chain(self.networks.values()) {
            precision.check_precision(&self.code, value)?;
        }
        Ok(())
    }
}
