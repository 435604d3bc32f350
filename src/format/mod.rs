// ============================================================================
// Format Module
// Exchange precision formatting of prices, amounts and fees
// ============================================================================

mod formatter;
mod modes;
mod precision;

pub use formatter::{decimal_to_precision, format_to_precision};
pub use modes::{CountingMode, PaddingMode, RoundingMode};
pub use precision::{omit_zero, parse_precision, precision_from_string};
