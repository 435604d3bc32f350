// ============================================================================
// String Arithmetic
// Exact decimal arithmetic on exchange-provided numeric strings
// ============================================================================
//
// Balances, fees and order book levels arrive as strings. These helpers parse
// both operands into `Precise`, compute exactly, and hand back the canonical
// (reduced) string, so `"0.1" + "0.2"` is `"0.3"` and never `"0.30000000000000004"`.

use super::errors::NumericResult;
use super::precise::{Precise, DEFAULT_DIV_PRECISION};

fn binary(a: &str, b: &str, op: impl FnOnce(&Precise, &Precise) -> Precise) -> NumericResult<String> {
    let (a, b) = (Precise::parse(a)?, Precise::parse(b)?);
    Ok(op(&a, &b).to_string())
}

fn compare(a: &str, b: &str, test: impl FnOnce(&Precise, &Precise) -> bool) -> NumericResult<bool> {
    let (a, b) = (Precise::parse(a)?, Precise::parse(b)?);
    Ok(test(&a, &b))
}

pub fn string_add(a: &str, b: &str) -> NumericResult<String> {
    binary(a, b, |a, b| a + b)
}

pub fn string_sub(a: &str, b: &str) -> NumericResult<String> {
    binary(a, b, |a, b| a - b)
}

pub fn string_mul(a: &str, b: &str) -> NumericResult<String> {
    let (a, b) = (Precise::parse(a)?, Precise::parse(b)?);
    Ok(a.checked_mul(&b)?.to_string())
}

/// `a / b` truncated at 18 fractional digits.
pub fn string_div(a: &str, b: &str) -> NumericResult<String> {
    string_div_with_precision(a, b, DEFAULT_DIV_PRECISION)
}

pub fn string_div_with_precision(a: &str, b: &str, precision: i32) -> NumericResult<String> {
    let (a, b) = (Precise::parse(a)?, Precise::parse(b)?);
    Ok(a.checked_div_with_precision(&b, precision)?.to_string())
}

pub fn string_mod(a: &str, b: &str) -> NumericResult<String> {
    let (a, b) = (Precise::parse(a)?, Precise::parse(b)?);
    Ok(a.checked_rem(&b)?.to_string())
}

pub fn string_abs(a: &str) -> NumericResult<String> {
    Ok(Precise::parse(a)?.abs().to_string())
}

pub fn string_neg(a: &str) -> NumericResult<String> {
    Ok((-Precise::parse(a)?).to_string())
}

pub fn string_eq(a: &str, b: &str) -> NumericResult<bool> {
    compare(a, b, |a, b| a == b)
}

pub fn string_gt(a: &str, b: &str) -> NumericResult<bool> {
    compare(a, b, |a, b| a > b)
}

pub fn string_ge(a: &str, b: &str) -> NumericResult<bool> {
    compare(a, b, |a, b| a >= b)
}

pub fn string_lt(a: &str, b: &str) -> NumericResult<bool> {
    compare(a, b, |a, b| a < b)
}

pub fn string_le(a: &str, b: &str) -> NumericResult<bool> {
    compare(a, b, |a, b| a <= b)
}

pub fn string_min(a: &str, b: &str) -> NumericResult<String> {
    binary(a, b, |a, b| a.clone().min(b.clone()))
}

pub fn string_max(a: &str, b: &str) -> NumericResult<String> {
    binary(a, b, |a, b| a.clone().max(b.clone()))
}
