// ============================================================================
// Precision Modes
// Rounding, counting and padding configuration for the formatter
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do with digits beyond the requested precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoundingMode {
    /// Round half up (`1.45 -> 1.5` at one decimal place)
    #[default]
    Round,
    /// Discard excess digits
    Truncate,
}

/// What the digit argument of the formatter counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CountingMode {
    /// Number of fractional digits
    #[default]
    DecimalPlaces,
    /// Number of significant digits, wherever the decimal point is
    SignificantDigits,
    /// The argument is a step size the value is quantized to (e.g. `0.05`)
    TickSize,
}

/// Whether results are zero-extended to the nominal precision width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PaddingMode {
    #[default]
    NoPadding,
    PadWithZero,
}
