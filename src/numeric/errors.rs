// ============================================================================
// Numeric Errors
// Error types for decimal formatting and arbitrary-precision arithmetic
// ============================================================================

use thiserror::Error;

/// Errors that can occur while formatting or computing decimal values.
///
/// Every variant aborts the current call; no partially formatted string is
/// ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum NumericError {
    /// Input contains characters outside the decimal-number grammar
    #[error("invalid number {input:?}: {reason}")]
    InvalidNumber { input: String, reason: String },

    /// Digit count or tick size is not usable for the requested counting mode
    #[error("invalid precision: {0}")]
    InvalidPrecision(String),

    /// Attempted division (or remainder) by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Value does not fit the target representation
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

impl NumericError {
    pub(crate) fn invalid_number(input: &str, reason: impl Into<String>) -> Self {
        NumericError::InvalidNumber {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
