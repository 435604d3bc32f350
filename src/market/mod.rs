// ============================================================================
// Market Module
// Per-market precision metadata and the order-value helpers built on it
// ============================================================================

mod config;
mod errors;
mod fee;
mod registry;

pub use config::{Currency, ExchangePrecision, FeeSide, Market, MarketPrecision};
pub use errors::MarketError;
pub use fee::{Fee, OrderType, Side, TakerOrMaker};
pub use registry::MarketRegistry;
