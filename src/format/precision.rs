// ============================================================================
// Precision Helpers
// Digit counting and tick-size conversions for precision metadata
// ============================================================================

use crate::numeric::{NumericError, NumericInput, NumericResult};

/// Number of fractional digits carried by a precision string.
///
/// Used to learn how many decimal places a tick size has:
/// - `"0.0010"` -> 3 (trailing zeros do not count)
/// - `"100"` -> 0
/// - `"1e-5"` -> 5, `"1e3"` -> -3
///
/// # Errors
/// `InvalidNumber` if an exponent marker is followed by something that is not an integer.
pub fn precision_from_string(value: &str) -> NumericResult<i32> {
    if let Some(pos) = value.find(['e', 'E']) {
        let exponent = &value[pos + 1..];
        return exponent
            .parse::<i32>()
            .map(|e| -e)
            .map_err(|_| NumericError::invalid_number(value, "malformed exponent"));
    }

    let trimmed = value.trim_end_matches('0');
    Ok(trimmed
        .split_once('.')
        .map(|(_, fraction)| fraction.len() as i32)
        .unwrap_or(0))
}

/// Convert a decimal-place count into the equivalent tick size string
/// (`"3"` -> `"0.001"`, `"0"` -> `"1"`, `"-2"` -> `"100"`).
pub fn parse_precision(precision: &str) -> NumericResult<String> {
    let places = NumericInput::from(precision).to_digit_count()?;
    Ok(match places {
        0 => "1".to_string(),
        n if n > 0 => format!("0.{}1", "0".repeat(n as usize - 1)),
        n => format!("1{}", "0".repeat(n.unsigned_abs() as usize)),
    })
}

/// Drop values that are empty or numerically zero.
///
/// Exchanges report missing prices and amounts as `"0"`, `"0.00"` or `""`;
/// all of those mean "not set".
pub fn omit_zero(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed == 0.0 => None,
        _ => Some(value),
    }
}
