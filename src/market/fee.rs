// ============================================================================
// Trading Fees
// ============================================================================

use crate::numeric::Precise;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderType {
    Limit,
    Market,
}

/// Liquidity role of an order, which selects the fee rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TakerOrMaker {
    #[default]
    Taker,
    Maker,
}

impl TakerOrMaker {
    pub fn as_str(self) -> &'static str {
        match self {
            TakerOrMaker::Taker => "taker",
            TakerOrMaker::Maker => "maker",
        }
    }
}

/// Fee charged for a (hypothetical) fill, computed exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fee {
    pub kind: TakerOrMaker,
    /// Currency the fee is charged in
    pub currency: String,
    pub rate: Precise,
    pub cost: Precise,
}
