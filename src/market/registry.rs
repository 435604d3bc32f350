// ============================================================================
// Market Registry
// Formats order values against the precision of a loaded market
// ============================================================================

use super::config::{Currency, ExchangePrecision, FeeSide, Market};
use super::errors::MarketError;
use super::fee::{Fee, OrderType, Side, TakerOrMaker};
use crate::format::{format_to_precision, omit_zero, RoundingMode};
use crate::numeric::{NumericInput, Precise};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// The markets and currencies of one exchange together with its precision
/// conventions.
///
/// This is the boundary order-placement code talks to: it passes a symbol
/// and a raw value and receives the string to put in the request.
///
/// # Example
/// ```
/// use exchange_precision::prelude::*;
///
/// let registry = MarketRegistry::new(ExchangePrecision::tick_size()).with_market(
///     Market::spot("BTC/USDT", "BTC", "USDT")
///         .with_price_precision("0.01")
///         .with_amount_precision("0.00001"),
/// );
///
/// assert_eq!(registry.price_to_precision("BTC/USDT", 43250.126).unwrap(), "43250.13");
/// assert_eq!(registry.amount_to_precision("BTC/USDT", 0.123456789).unwrap(), "0.12345");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarketRegistry {
    precision: ExchangePrecision,
    markets: HashMap<String, Market>,
    currencies: HashMap<String, Currency>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeDescription {
    #[serde(default)]
    precision_mode: crate::format::CountingMode,
    #[serde(default)]
    padding_mode: crate::format::PaddingMode,
    #[serde(default)]
    markets: Vec<Market>,
    #[serde(default)]
    currencies: Vec<Currency>,
}

impl MarketRegistry {
    pub fn new(precision: ExchangePrecision) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    /// Builder method: Add a market (replaces one with the same symbol)
    pub fn with_market(mut self, market: Market) -> Self {
        self.markets.insert(market.symbol.clone(), market);
        self
    }

    /// Builder method: Add a currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currencies.insert(currency.code.clone(), currency);
        self
    }

    /// Load an exchange description (`precisionMode`, `paddingMode`,
    /// `markets`, `currencies`) from JSON and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, MarketError> {
        let description: ExchangeDescription =
            serde_json::from_str(json).map_err(|e| MarketError::Config(e.to_string()))?;

        let registry = description.markets.into_iter().fold(
            Self::new(ExchangePrecision::new(
                description.precision_mode,
                description.padding_mode,
            )),
            Self::with_market,
        );
        let registry = description
            .currencies
            .into_iter()
            .fold(registry, Self::with_currency);

        registry.validate()?;
        tracing::debug!(
            markets = registry.markets.len(),
            currencies = registry.currencies.len(),
            "loaded market registry"
        );
        Ok(registry)
    }

    /// Validate every market and currency against the precision mode
    pub fn validate(&self) -> Result<(), MarketError> {
        for market in self.markets.values() {
            market.validate(&self.precision)?;
        }
        for currency in self.currencies.values() {
            currency.validate(&self.precision)?;
        }
        Ok(())
    }

    pub fn precision(&self) -> ExchangePrecision {
        self.precision
    }

    pub fn market(&self, symbol: &str) -> Result<&Market, MarketError> {
        self.markets
            .get(symbol)
            .ok_or_else(|| MarketError::MarketNotFound(symbol.to_string()))
    }

    pub fn currency(&self, code: &str) -> Result<&Currency, MarketError> {
        self.currencies
            .get(code)
            .ok_or_else(|| MarketError::CurrencyNotFound(code.to_string()))
    }

    // ========================================================================
    // Precision Helpers
    // ========================================================================

    /// Round a price to the market's price precision.
    ///
    /// # Errors
    /// `BelowMinimumPrecision` if the price rounds to zero.
    pub fn price_to_precision(&self, symbol: &str, price: impl Into<NumericInput>) -> Result<String, MarketError> {
        let market = self.market(symbol)?;
        let precision = required(market, "price", market.precision.price.as_ref())?;
        let result = self.format(price.into(), RoundingMode::Round, precision)?;
        reject_zero(market, "price", precision, result)
    }

    /// Truncate an amount to the market's amount precision.
    ///
    /// # Errors
    /// `BelowMinimumPrecision` if the amount truncates to zero.
    pub fn amount_to_precision(&self, symbol: &str, amount: impl Into<NumericInput>) -> Result<String, MarketError> {
        let market = self.market(symbol)?;
        let precision = required(market, "amount", market.precision.amount.as_ref())?;
        let result = self.format(amount.into(), RoundingMode::Truncate, precision)?;
        reject_zero(market, "amount", precision, result)
    }

    /// Truncate a cost (price × amount) to the market's price precision.
    pub fn cost_to_precision(&self, symbol: &str, cost: impl Into<NumericInput>) -> Result<String, MarketError> {
        let market = self.market(symbol)?;
        let precision = required(market, "price", market.precision.price.as_ref())?;
        self.format(cost.into(), RoundingMode::Truncate, precision)
    }

    /// Round a fee to the market's price precision.
    pub fn fee_to_precision(&self, symbol: &str, fee: impl Into<NumericInput>) -> Result<String, MarketError> {
        let market = self.market(symbol)?;
        let precision = required(market, "price", market.precision.price.as_ref())?;
        self.format(fee.into(), RoundingMode::Round, precision)
    }

    /// Round a currency amount (fee, withdrawal) to the currency's precision.
    ///
    /// A network-specific precision wins over the currency default; a
    /// currency without any precision returns the value unformatted.
    pub fn currency_to_precision(
        &self,
        code: &str,
        value: impl Into<NumericInput>,
        network: Option<&str>,
    ) -> Result<String, MarketError> {
        let value: NumericInput = value.into();
        match self.currency(code)?.precision_for(network) {
            Some(precision) => self.format(value, RoundingMode::Round, precision),
            None => Ok(value.normalize()),
        }
    }

    /// Fee for filling `amount` at `price`, computed exactly.
    ///
    /// The fee currency follows the market's [`FeeSide`]; derivative markets
    /// always charge in their settle currency. Market orders are always takers.
    ///
    /// # Errors
    /// `IncompatibleFeeArguments` for a market order with `TakerOrMaker::Maker`.
    pub fn calculate_fee(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: Side,
        amount: impl Into<NumericInput>,
        price: impl Into<NumericInput>,
        taker_or_maker: TakerOrMaker,
    ) -> Result<Fee, MarketError> {
        if order_type == OrderType::Market && taker_or_maker == TakerOrMaker::Maker {
            return Err(MarketError::IncompatibleFeeArguments);
        }
        let market = self.market(symbol)?;

        let use_quote = match market.fee_side {
            FeeSide::Get => side == Side::Sell,
            FeeSide::Give => side == Side::Buy,
            FeeSide::Quote => true,
            FeeSide::Base => false,
        };

        let amount: NumericInput = amount.into();
        let amount = Precise::try_from(amount)?;
        let (base_cost, currency) = if use_quote {
            let price: NumericInput = price.into();
            let price = Precise::try_from(price)?;
            (amount.checked_mul(&price)?, &market.quote)
        } else {
            (amount, &market.base)
        };
        let currency = if market.spot {
            currency
        } else {
            market.settle.as_ref().unwrap_or(currency)
        };

        let kind = match order_type {
            OrderType::Market => TakerOrMaker::Taker,
            OrderType::Limit => taker_or_maker,
        };
        let rate = match kind {
            TakerOrMaker::Taker => market.taker.as_ref(),
            TakerOrMaker::Maker => market.maker.as_ref(),
        }
        .ok_or_else(|| MarketError::MissingFeeRate {
            symbol: market.symbol.clone(),
            kind: kind.as_str(),
        })?;
        let rate = Precise::try_from(rate.clone())?;

        Ok(Fee {
            kind,
            currency: currency.clone(),
            cost: base_cost.checked_mul(&rate)?,
            rate,
        })
    }

    fn format(&self, value: NumericInput, rounding: RoundingMode, precision: &NumericInput) -> Result<String, MarketError> {
        Ok(format_to_precision(
            value,
            rounding,
            precision,
            self.precision.precision_mode,
            self.precision.padding_mode,
        )?)
    }
}

fn required<'a>(
    market: &Market,
    field: &'static str,
    precision: Option<&'a NumericInput>,
) -> Result<&'a NumericInput, MarketError> {
    precision.ok_or_else(|| MarketError::MissingPrecision {
        symbol: market.symbol.clone(),
        field,
    })
}

fn reject_zero(
    market: &Market,
    field: &'static str,
    precision: &NumericInput,
    result: String,
) -> Result<String, MarketError> {
    if omit_zero(&result).is_some() {
        return Ok(result);
    }
    tracing::debug!(symbol = %market.symbol, field, %precision, "value vanishes at market precision");
    Err(MarketError::BelowMinimumPrecision {
        symbol: market.symbol.clone(),
        field,
        precision: precision.normalize(),
    })
}
