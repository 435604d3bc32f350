// ============================================================================
// Precision Formatter
// Converts raw numeric values into exchange-compliant decimal strings
// ============================================================================
//
// Exchanges byte-compare submitted prices and amounts against their allowed
// precision, so everything here works on the decimal digits themselves rather
// than on binary floating point. The only float arithmetic is on the
// tick-size path, and its noise is rounded away at 8 decimal places before
// the digits are produced. Negative digit counts scale exactly with Precise.

use super::modes::{CountingMode, PaddingMode, RoundingMode};
use super::precision::precision_from_string;
use crate::numeric::{NumericError, NumericInput, NumericResult, Precise, MAX_DECIMALS};
use smallvec::{smallvec, SmallVec};

/// Decimal places used to render a tick size before counting its digits
const TICK_RENDER_DIGITS: usize = 22;

/// Decimal places at which float remainders are considered exact
const FLOAT_NOISE_DIGITS: usize = 8;

/// Format `value` to the precision an exchange expects.
///
/// # Arguments
/// * `value` - Raw price/amount (integer, float or plain decimal string)
/// * `rounding` - Round half up or truncate
/// * `digits` - Decimal places, significant digits, or the tick size itself
///   (for [`CountingMode::TickSize`]). A negative digit count rounds to the
///   nearest power of ten (`-2` -> nearest 100)
/// * `counting` - How `digits` is interpreted
/// * `padding` - Whether to zero-extend to the full nominal width
///
/// # Errors
/// - `InvalidNumber` if the normalized value has characters outside `[0-9.-]`
/// - `InvalidPrecision` for a non-positive tick size or a fractional digit count
///
/// # Example
/// ```
/// use exchange_precision::prelude::*;
///
/// let price = format_to_precision(
///     123.4567,
///     RoundingMode::Round,
///     2,
///     CountingMode::DecimalPlaces,
///     PaddingMode::NoPadding,
/// ).unwrap();
/// assert_eq!(price, "123.46");
///
/// let stepped = format_to_precision(
///     "12.3456",
///     RoundingMode::Round,
///     "0.05",
///     CountingMode::TickSize,
///     PaddingMode::NoPadding,
/// ).unwrap();
/// assert_eq!(stepped, "12.35");
/// ```
pub fn format_to_precision<V, D>(
    value: V,
    rounding: RoundingMode,
    digits: D,
    counting: CountingMode,
    padding: PaddingMode,
) -> NumericResult<String>
where
    V: Into<NumericInput>,
    D: Into<NumericInput>,
{
    let value: NumericInput = value.into();
    let digits: NumericInput = digits.into();

    if counting == CountingMode::TickSize {
        let tick = digits.to_f64()?;
        if !(tick > 0.0 && tick.is_finite()) {
            return Err(NumericError::InvalidPrecision(format!(
                "tick size must be positive, got {}",
                digits
            )));
        }
        return quantize_to_tick(&value, rounding, tick, padding);
    }

    let places = digits.to_digit_count()?;
    if places < 0 {
        return round_to_power_of_ten(&value, rounding, places, counting, padding);
    }

    round_digits(&value.normalize(), rounding, places as usize, counting, padding)
}

/// [`format_to_precision`] with decimal places and no padding.
pub fn decimal_to_precision<V, D>(value: V, rounding: RoundingMode, digits: D) -> NumericResult<String>
where
    V: Into<NumericInput>,
    D: Into<NumericInput>,
{
    format_to_precision(
        value,
        rounding,
        digits,
        CountingMode::DecimalPlaces,
        PaddingMode::NoPadding,
    )
}

// ============================================================================
// Negative Digit Counts
// ============================================================================

fn round_to_power_of_ten(
    value: &NumericInput,
    rounding: RoundingMode,
    places: i32,
    counting: CountingMode,
    padding: PaddingMode,
) -> NumericResult<String> {
    let shift = places.unsigned_abs();
    if shift > MAX_DECIMALS {
        return Err(NumericError::InvalidPrecision(format!(
            "cannot round to the nearest 10^{}",
            shift
        )));
    }

    // value / 10^shift, exactly; both exponents are bounded so the sum fits
    let exact = Precise::try_from(value.clone())?;
    let scaled = Precise::new(exact.integer().clone(), exact.decimals() + shift as i32);
    let whole = match rounding {
        RoundingMode::Round => round_digits(&scaled.to_string(), rounding, 0, counting, padding)?,
        RoundingMode::Truncate => round_digits(
            &scaled.to_string(),
            rounding,
            0,
            CountingMode::DecimalPlaces,
            PaddingMode::NoPadding,
        )?,
    };

    let whole = Precise::parse(&whole)?;
    Ok(Precise::new(whole.integer().clone(), whole.decimals() - shift as i32).to_string())
}

// ============================================================================
// Tick Size Quantization
// ============================================================================

fn quantize_to_tick(
    value: &NumericInput,
    rounding: RoundingMode,
    tick: f64,
    padding: PaddingMode,
) -> NumericResult<String> {
    let tick_text = round_digits(
        &NumericInput::from(tick).normalize(),
        RoundingMode::Round,
        TICK_RENDER_DIGITS,
        CountingMode::DecimalPlaces,
        PaddingMode::NoPadding,
    )?;
    let tick_places = precision_from_string(&tick_text)?.max(0) as usize;

    let x = value.to_f64()?;
    let missing = absorb_float_noise(x % tick, FLOAT_NOISE_DIGITS)?;
    let steps = round_digits(
        &NumericInput::from(missing / tick).normalize(),
        RoundingMode::Round,
        tick_places.max(FLOAT_NOISE_DIGITS),
        CountingMode::DecimalPlaces,
        PaddingMode::NoPadding,
    )?;

    let text = if precision_from_string(&steps)? != 0 {
        let half = tick / 2.0;
        let snapped = match rounding {
            RoundingMode::Round if x > 0.0 && missing >= half => x - missing + tick,
            RoundingMode::Round if x < 0.0 && -missing >= half => x - missing - tick,
            RoundingMode::Round | RoundingMode::Truncate => x - missing,
        };
        tracing::trace!(value = x, tick, snapped, "snapped value onto tick grid");
        NumericInput::from(snapped).normalize()
    } else {
        value.normalize()
    };

    round_digits(
        &text,
        RoundingMode::Round,
        tick_places,
        CountingMode::DecimalPlaces,
        padding,
    )
}

/// Re-round a float at `places` decimals and read it back.
fn absorb_float_noise(x: f64, places: usize) -> NumericResult<f64> {
    let text = round_digits(
        &NumericInput::from(x).normalize(),
        RoundingMode::Round,
        places,
        CountingMode::DecimalPlaces,
        PaddingMode::NoPadding,
    )?;
    text.parse()
        .map_err(|_| NumericError::invalid_number(&text, "not a decimal number"))
}

// ============================================================================
// Digit Rounding
// ============================================================================

/// Round or truncate a plain decimal string digit by digit.
///
/// For `-123.4567` the working buffer holds `01234567`: slot 0 is reserved
/// for a carry out of the leading digit (`999.9 -> 1000`). The sweep runs from
/// the last digit to slot 0, replacing every digit past the cut with `0` or
/// with an overflow that propagates as a carry.
fn round_digits(
    text: &str,
    rounding: RoundingMode,
    digits: usize,
    counting: CountingMode,
    padding: PaddingMode,
) -> NumericResult<String> {
    let bytes = text.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let body = &bytes[usize::from(negative)..];
    let has_dot = body.contains(&b'.');

    let len = body.len() + usize::from(!has_dot);
    let mut buf: SmallVec<[u8; 64]> = smallvec![b'0'; len];

    let mut after_dot = len;
    let mut first_significant = None;
    let mut seen_dot = false;
    let mut seen_digit = false;
    let mut i = 1;
    for &c in body {
        match c {
            b'.' if seen_dot => {
                return Err(NumericError::invalid_number(text, "more than one decimal point"));
            }
            b'.' => {
                seen_dot = true;
                after_dot = i;
            }
            b'0'..=b'9' => {
                buf[i] = c;
                if c != b'0' && first_significant.is_none() {
                    first_significant = Some(i);
                }
                seen_digit = true;
                i += 1;
            }
            _ => {
                return Err(NumericError::invalid_number(
                    text,
                    format!("illegal character {:?}", c as char),
                ));
            }
        }
    }
    if !seen_digit {
        return Err(NumericError::invalid_number(text, "no digits"));
    }

    let mut digits_start = first_significant.unwrap_or(1);
    let mut precision_end = match counting {
        CountingMode::SignificantDigits => digits_start,
        _ => after_dot,
    } + digits;

    let mut all_zeros = true;
    let mut digits_end: Option<usize> = None;
    let mut carry = 0u8;
    for i in (0..len).rev() {
        let mut c = buf[i];
        if i != 0 {
            c += carry;
            if i >= precision_end {
                // a '5' made by an incoming carry was already rounded once
                let round_up = rounding == RoundingMode::Round
                    && c >= b'5'
                    && !(c == b'5' && carry != 0);
                c = if round_up { b'9' + 1 } else { b'0' };
            }
            if c > b'9' {
                c = b'0';
                carry = 1;
            } else {
                carry = 0;
            }
        } else if carry != 0 {
            c = b'1';
        }
        buf[i] = c;

        if c != b'0' {
            all_zeros = false;
            digits_start = i;
            digits_end.get_or_insert(i + 1);
        }
    }

    if counting == CountingMode::SignificantDigits {
        precision_end = digits_start + digits;
    }

    let sign_needed = negative && !all_zeros;
    let read_start = if all_zeros || digits_start >= after_dot {
        after_dot - 1
    } else {
        digits_start
    };
    let read_end = digits_end
        .filter(|&end| end >= after_dot)
        .unwrap_or(after_dot);

    let fraction_len = read_end - after_dot;
    let actual_len = (read_end - read_start) as isize;
    let desired_len = match padding {
        PaddingMode::NoPadding => actual_len,
        PaddingMode::PadWithZero => precision_end as isize - read_start as isize,
    };
    let pad = (desired_len - actual_len).max(0) as usize;
    let is_integer = fraction_len + pad == 0;

    let mut out = String::with_capacity(usize::from(sign_needed) + (read_end - read_start) + 1 + pad);
    if sign_needed {
        out.push('-');
    }
    out.extend(buf[read_start..after_dot].iter().map(|&b| b as char));
    if !is_integer {
        out.push('.');
        out.extend(buf[after_dot..read_end].iter().map(|&b| b as char));
        out.extend(std::iter::repeat('0').take(pad));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use CountingMode::*;
    use PaddingMode::*;
    use RoundingMode::*;

    fn fmt<V: Into<NumericInput>, D: Into<NumericInput>>(
        value: V,
        rounding: RoundingMode,
        digits: D,
        counting: CountingMode,
        padding: PaddingMode,
    ) -> String {
        format_to_precision(value, rounding, digits, counting, padding).unwrap()
    }

    #[test]
    fn test_round_decimal_places() {
        assert_eq!(fmt(123.4567, Round, 2, DecimalPlaces, NoPadding), "123.46");
        assert_eq!(fmt("12.3456", Round, 3, DecimalPlaces, NoPadding), "12.346");
        assert_eq!(fmt("12.3456", Round, 2, DecimalPlaces, NoPadding), "12.35");
        assert_eq!(fmt("12.3456", Round, 1, DecimalPlaces, NoPadding), "12.3");
        assert_eq!(fmt("12.3456", Round, 0, DecimalPlaces, NoPadding), "12");
        assert_eq!(fmt("10000", Round, 6, DecimalPlaces, NoPadding), "10000");
        assert_eq!(fmt("0.00003186", Round, 8, DecimalPlaces, NoPadding), "0.00003186");
    }

    #[test]
    fn test_round_carries_into_reserved_slot() {
        assert_eq!(fmt("9.999", Round, 3, DecimalPlaces, NoPadding), "9.999");
        assert_eq!(fmt("9.999", Round, 2, DecimalPlaces, NoPadding), "10");
        assert_eq!(fmt("999.96", Round, 1, DecimalPlaces, NoPadding), "1000");
        assert_eq!(fmt("0.996", Round, 2, DecimalPlaces, NoPadding), "1");
    }

    #[test]
    fn test_round_half_up_without_double_rounding() {
        assert_eq!(fmt("0.5", Round, 0, DecimalPlaces, NoPadding), "1");
        assert_eq!(fmt("1.45", Round, 1, DecimalPlaces, NoPadding), "1.5");
        assert_eq!(fmt("1.445", Round, 1, DecimalPlaces, NoPadding), "1.4");
        assert_eq!(fmt("1.4951", Round, 1, DecimalPlaces, NoPadding), "1.5");
        assert_eq!(fmt("1.44999", Round, 1, DecimalPlaces, NoPadding), "1.4");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(fmt("-0.123456789", Round, 5, DecimalPlaces, NoPadding), "-0.12346");
        assert_eq!(fmt("-123.456789", Round, 5, DecimalPlaces, NoPadding), "-123.45679");
        assert_eq!(fmt("-0.9", Truncate, 0, DecimalPlaces, NoPadding), "0");
        assert_eq!(fmt("-0.0001", Round, 2, DecimalPlaces, NoPadding), "0");
    }

    #[test]
    fn test_truncate_decimal_places() {
        assert_eq!(fmt("12.3456000", Truncate, 100, DecimalPlaces, NoPadding), "12.3456");
        assert_eq!(fmt("12.3456", Truncate, 4, DecimalPlaces, NoPadding), "12.3456");
        assert_eq!(fmt("12.3456", Truncate, 3, DecimalPlaces, NoPadding), "12.345");
        assert_eq!(fmt("12.3456", Truncate, 0, DecimalPlaces, NoPadding), "12");
        assert_eq!(fmt("0.0000001", Truncate, 8, DecimalPlaces, NoPadding), "0.0000001");
        assert_eq!(fmt("0.00000001", Truncate, 8, DecimalPlaces, NoPadding), "0.00000001");
        assert_eq!(fmt("0", Truncate, 0, DecimalPlaces, NoPadding), "0");
    }

    #[test]
    fn test_padding() {
        assert_eq!(fmt(123.4, Round, 2, DecimalPlaces, PadWithZero), "123.40");
        assert_eq!(fmt(123, Round, 2, DecimalPlaces, PadWithZero), "123.00");
        assert_eq!(fmt("0.000000000", Truncate, 9, DecimalPlaces, PadWithZero), "0.000000000");
        assert_eq!(fmt("0.000000001", Truncate, 9, DecimalPlaces, PadWithZero), "0.000000001");
        assert_eq!(fmt("1.1", Round, 3, SignificantDigits, PadWithZero), "1.10");
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(fmt(0.00012345, Round, 3, SignificantDigits, NoPadding), "0.000123");
        assert_eq!(fmt("0.000123456789", Round, 8, SignificantDigits, NoPadding), "0.00012345679");
        assert_eq!(fmt("0.000123456789", Truncate, 8, SignificantDigits, NoPadding), "0.00012345678");
        assert_eq!(fmt("0.00098765", Truncate, 2, SignificantDigits, NoPadding), "0.00098");
        assert_eq!(fmt("0.00098765", Round, 2, SignificantDigits, NoPadding), "0.00099");
        assert_eq!(fmt("1234", Round, 2, SignificantDigits, NoPadding), "1200");
        assert_eq!(fmt("1250", Round, 2, SignificantDigits, NoPadding), "1300");
        assert_eq!(fmt("123.456", Round, 5, SignificantDigits, NoPadding), "123.46");
        assert_eq!(fmt("9.96", Round, 2, SignificantDigits, NoPadding), "10");
    }

    #[test]
    fn test_negative_digit_counts() {
        assert_eq!(fmt(101, Truncate, -1, DecimalPlaces, NoPadding), "100");
        assert_eq!(fmt("12.3456", Truncate, -1, DecimalPlaces, NoPadding), "10");
        assert_eq!(fmt("123.456", Truncate, -2, DecimalPlaces, NoPadding), "100");
        assert_eq!(fmt("99.9999", Truncate, -1, DecimalPlaces, NoPadding), "90");
        assert_eq!(fmt("99.9999", Truncate, -2, DecimalPlaces, NoPadding), "0");
        assert_eq!(fmt("12.3456", Round, -1, DecimalPlaces, NoPadding), "10");
        assert_eq!(fmt("123.456", Round, -1, DecimalPlaces, NoPadding), "120");
        assert_eq!(fmt("9.99999", Round, -1, DecimalPlaces, NoPadding), "10");
        assert_eq!(fmt("99.9999", Round, -2, DecimalPlaces, NoPadding), "100");
        assert_eq!(fmt(-15, Round, -1, DecimalPlaces, NoPadding), "-20");
        assert_eq!(fmt(-15, Truncate, -1, DecimalPlaces, NoPadding), "-10");
        assert_eq!(fmt(-5, Truncate, -1, DecimalPlaces, NoPadding), "0");
    }

    #[test]
    fn test_negative_digit_counts_beyond_f64_range() {
        assert_eq!(fmt(5, Round, -309, DecimalPlaces, NoPadding), "0");
        assert_eq!(fmt(5, Round, -400, DecimalPlaces, NoPadding), "0");
        assert_eq!(fmt(5, Truncate, -400, DecimalPlaces, NoPadding), "0");

        let big = format!("6{}", "0".repeat(400));
        assert_eq!(
            fmt(big.as_str(), Round, -401, DecimalPlaces, NoPadding),
            format!("1{}", "0".repeat(401))
        );
        assert!(matches!(
            format_to_precision(5, Round, -10_001, DecimalPlaces, NoPadding),
            Err(NumericError::InvalidPrecision(_))
        ));
        assert!(matches!(
            format_to_precision(f64::INFINITY, Round, -1, DecimalPlaces, NoPadding),
            Err(NumericError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_negative_digit_counts_keep_string_digits() {
        assert_eq!(
            fmt("123456789012345678901234567891", Truncate, -1, DecimalPlaces, NoPadding),
            "123456789012345678901234567890"
        );
        assert_eq!(
            fmt("123456789012345678901234567895.5", Round, -1, DecimalPlaces, NoPadding),
            "123456789012345678901234567900"
        );
        assert_eq!(
            fmt("-98765432109876543210.5", Truncate, -3, DecimalPlaces, NoPadding),
            "-98765432109876543000"
        );
    }

    #[test]
    fn test_tick_size() {
        assert_eq!(fmt("12.3456", Truncate, 0.01, TickSize, NoPadding), "12.34");
        assert_eq!(fmt("12.3456", Round, 0.05, TickSize, NoPadding), "12.35");
        assert_eq!(fmt("12.3256", Truncate, "0.05", TickSize, NoPadding), "12.3");
        assert_eq!(fmt("12.3256", Truncate, "0.05", TickSize, PadWithZero), "12.30");
        assert_eq!(fmt("0.000123456789", Round, 0.00000012, TickSize, NoPadding), "0.00012348");
        assert_eq!(fmt("0.000123456789", Truncate, 0.00000012, TickSize, NoPadding), "0.00012336");
        assert_eq!(fmt("0.000273398", Round, 1e-7, TickSize, NoPadding), "0.0002734");
        assert_eq!(fmt("0.00000004", Round, 0.00000001, TickSize, NoPadding), "0.00000004");
        assert_eq!(fmt("0.000000004", Round, 0.00000001, TickSize, NoPadding), "0");
        assert_eq!(fmt("0.000000005", Round, 0.00000001, TickSize, NoPadding), "0.00000001");
        assert_eq!(fmt(0.1 + 0.2, Round, 0.1, TickSize, NoPadding), "0.3");
        assert_eq!(fmt(1234, Round, 10, TickSize, NoPadding), "1230");
        assert_eq!(fmt(1235, Round, 10, TickSize, NoPadding), "1240");
    }

    #[test]
    fn test_tick_size_absorbs_remainders_below_eight_places() {
        // a remainder within 5e-9 of a whole tick counts as on-grid, and the
        // final re-format rounds, even under truncation
        assert_eq!(fmt("1.824118995", Truncate, "0.000001", TickSize, NoPadding), "1.824119");
        assert_eq!(fmt("-1.824118995", Truncate, "0.000001", TickSize, NoPadding), "-1.824119");
        assert_eq!(fmt("-8.208503495", Round, "0.000001", TickSize, NoPadding), "-8.208504");
        assert_eq!(fmt("1.824118994", Truncate, "0.000001", TickSize, NoPadding), "1.824118");
        assert_eq!(fmt("1.8241185", Truncate, "0.000001", TickSize, NoPadding), "1.824118");
    }

    #[test]
    fn test_tick_size_negative_values() {
        assert_eq!(fmt(-1.26, Round, 0.1, TickSize, NoPadding), "-1.3");
        assert_eq!(fmt(-1.22, Round, 0.1, TickSize, NoPadding), "-1.2");
        assert_eq!(fmt(-1.26, Truncate, 0.1, TickSize, NoPadding), "-1.2");
    }

    #[test]
    fn test_large_float_expands_exponent() {
        assert_eq!(fmt(1e21, Round, 0, DecimalPlaces, NoPadding), "1000000000000000000000");
        assert_eq!(fmt(1.5e-7, Round, 8, DecimalPlaces, NoPadding), "0.00000015");
    }

    #[test]
    fn test_decimal_to_precision_defaults() {
        assert_eq!(decimal_to_precision(2.675, Truncate, 2).unwrap(), "2.67");
        assert_eq!(decimal_to_precision("0.1000", Round, 4).unwrap(), "0.1");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            format_to_precision("1.2.3", Round, 2, DecimalPlaces, NoPadding),
            Err(NumericError::InvalidNumber { .. })
        ));
        assert!(matches!(
            format_to_precision("1e-5", Round, 2, DecimalPlaces, NoPadding),
            Err(NumericError::InvalidNumber { .. })
        ));
        assert!(matches!(
            format_to_precision("", Round, 2, DecimalPlaces, NoPadding),
            Err(NumericError::InvalidNumber { .. })
        ));
        assert!(matches!(
            format_to_precision(f64::NAN, Round, 2, DecimalPlaces, NoPadding),
            Err(NumericError::InvalidNumber { .. })
        ));
        assert!(matches!(
            format_to_precision(1.0, Round, 0, TickSize, NoPadding),
            Err(NumericError::InvalidPrecision(_))
        ));
        assert!(matches!(
            format_to_precision(1.0, Round, -0.5, TickSize, NoPadding),
            Err(NumericError::InvalidPrecision(_))
        ));
        assert!(matches!(
            format_to_precision(1.0, Round, 1.5, DecimalPlaces, NoPadding),
            Err(NumericError::InvalidPrecision(_))
        ));
    }
}
