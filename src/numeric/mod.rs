// ============================================================================
// Numeric Module
// Exact decimal values for price, amount and fee arithmetic
// ============================================================================
//
// This module provides:
// - NumericInput: raw integer/float/string values and their plain-decimal rendering
// - Precise: arbitrary-precision decimal (big integer × 10^-decimals)
// - string_math: string-in/string-out exact arithmetic built on Precise
// - NumericError: Error types shared with the formatter
//
// Design principles:
// - No binary floating point in arithmetic on exchange values
// - All fallible operations return Result (no panics)
// - Values are immutable; every operation returns a new instance

mod errors;
mod input;
mod precise;

pub mod string_math;

pub use errors::{NumericError, NumericResult};
pub use input::{number_to_string, NumericInput};
pub use precise::{Precise, DEFAULT_DIV_PRECISION, MAX_DECIMALS};
