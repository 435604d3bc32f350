// ============================================================================
// Numeric Input
// Raw price/amount values and their canonical plain-decimal rendering
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A raw numeric value as it arrives from order-placement or market-data code.
///
/// Exchanges hand us integers, floats and pre-formatted strings more or less
/// interchangeably; every one of them is normalized to a plain decimal string
/// before any digit manipulation happens.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum NumericInput {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    /// Passed through verbatim by [`NumericInput::normalize`]
    Text(String),
}

impl NumericInput {
    /// Render as a plain decimal string (sign, digits, at most one dot, no exponent).
    ///
    /// Strings are returned untouched. Floats use the shortest round-trippable
    /// digits, with scientific notation expanded:
    /// - `1e21` -> `"1000000000000000000000"`
    /// - `1.5e-7` -> `"0.00000015"`
    /// - `0.0` -> `"0"`
    pub fn normalize(&self) -> String {
        match self {
            NumericInput::Integer(v) => v.to_string(),
            NumericInput::Unsigned(v) => v.to_string(),
            NumericInput::Float(v) => expand_exponent(&float_repr(*v)),
            NumericInput::Text(s) => s.clone(),
        }
    }

    /// Numeric value as a 64-bit float, for the tick-size and power-of-ten paths.
    pub fn to_f64(&self) -> NumericResult<f64> {
        match self {
            NumericInput::Integer(v) => Ok(*v as f64),
            NumericInput::Unsigned(v) => Ok(*v as f64),
            NumericInput::Float(v) => Ok(*v),
            NumericInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| NumericError::invalid_number(s, "not a decimal number")),
        }
    }

    /// Interpret the value as a digit count (decimal places or significant digits).
    ///
    /// # Errors
    /// `InvalidPrecision` if the value is fractional or outside the `i32` range.
    pub fn to_digit_count(&self) -> NumericResult<i32> {
        let out_of_range = || NumericError::InvalidPrecision(format!("{} is not a digit count", self));
        match self {
            NumericInput::Integer(v) => i32::try_from(*v).map_err(|_| out_of_range()),
            NumericInput::Unsigned(v) => i32::try_from(*v).map_err(|_| out_of_range()),
            NumericInput::Float(v) => float_to_digit_count(*v).ok_or_else(out_of_range),
            NumericInput::Text(s) => {
                let s = s.trim();
                if let Ok(v) = s.parse::<i32>() {
                    return Ok(v);
                }
                s.parse::<f64>()
                    .ok()
                    .and_then(float_to_digit_count)
                    .ok_or_else(out_of_range)
            }
        }
    }
}

fn float_to_digit_count(v: f64) -> Option<i32> {
    if v.is_finite() && v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalize())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for NumericInput {
            #[inline]
            fn from(value: $t) -> Self {
                NumericInput::Integer(value as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for NumericInput {
            #[inline]
            fn from(value: $t) -> Self {
                NumericInput::Unsigned(value as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f64> for NumericInput {
    #[inline]
    fn from(value: f64) -> Self {
        NumericInput::Float(value)
    }
}

impl From<f32> for NumericInput {
    /// Goes through the shortest `f32` digits so `0.1f32` stays `0.1`.
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse::<f64>().unwrap_or(value as f64);
        NumericInput::Float(widened)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<&String> for NumericInput {
    fn from(value: &String) -> Self {
        NumericInput::Text(value.clone())
    }
}

impl From<&NumericInput> for NumericInput {
    fn from(value: &NumericInput) -> Self {
        value.clone()
    }
}

impl From<rust_decimal::Decimal> for NumericInput {
    fn from(value: rust_decimal::Decimal) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Normalize an optional value; an absent value renders as `""`, which
/// callers read as "precision undefined".
pub fn number_to_string<V: Into<NumericInput>>(value: Option<V>) -> String {
    value.map(|v| Into::<NumericInput>::into(v).normalize()).unwrap_or_default()
}

// ============================================================================
// Float Rendering
// ============================================================================

/// Shortest round-trippable rendering, switching to scientific notation
/// outside `1e-7 < |x| < 1e21` (e.g. `"1e+21"`, `"1.5e-7"`).
fn float_repr(x: f64) -> String {
    if x == 0.0 {
        // also folds -0.0
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }
    let sci = format!("{:e}", x);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return x.to_string();
    };
    match exponent.parse::<i32>() {
        Ok(exp) if (-6..21).contains(&exp) => x.to_string(),
        Ok(exp) if exp >= 0 => format!("{}e+{}", mantissa, exp),
        Ok(exp) => format!("{}e{}", mantissa, exp),
        Err(_) => x.to_string(),
    }
}

/// Expand a `mantissa e exponent` representation into plain decimal digits.
///
/// Representations without an exponent marker, or with an unparsable
/// exponent, come back unchanged.
pub(crate) fn expand_exponent(repr: &str) -> String {
    let Some((mantissa, exponent)) = repr.split_once(['e', 'E']) else {
        return repr.to_string();
    };
    let Ok(exp) = exponent.parse::<i32>() else {
        return repr.to_string();
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if exp >= 0 {
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let shift = exp as usize;
        if shift >= fraction.len() {
            format!(
                "{}{}{}{}",
                sign,
                integer,
                fraction,
                "0".repeat(shift - fraction.len())
            )
        } else {
            format!(
                "{}{}{}.{}",
                sign,
                integer,
                &fraction[..shift],
                &fraction[shift..]
            )
        }
    } else {
        let digits = mantissa.replace('.', "");
        let leading = (exp.unsigned_abs() - 1) as usize;
        format!("{}0.{}{}", sign, "0".repeat(leading), digits)
    }
}
