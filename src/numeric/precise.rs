// ============================================================================
// Precise Decimal
// Arbitrary-precision decimal arithmetic on a scaled big integer
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::input::NumericInput;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Fractional digits kept by [`Precise::checked_div`]
pub const DEFAULT_DIV_PRECISION: i32 = 18;

/// Largest `|decimals|` accepted by [`Precise::parse`] and produced by the
/// checked operations
pub const MAX_DECIMALS: u32 = 10_000;

/// Exact decimal number: `integer × 10^(-decimals)`.
///
/// `decimals` may be negative, in which case the value is a multiple of
/// `10^|decimals|`. The sign lives on `integer`. Instances are immutable;
/// every operation returns a new value.
///
/// Equality, ordering and hashing compare values, so `"12.0"` and `"12"`
/// are equal even though their representations differ.
///
/// # Example
/// ```
/// use exchange_precision::numeric::Precise;
///
/// let a: Precise = "1.1".parse().unwrap();
/// let b: Precise = "2.2".parse().unwrap();
/// assert_eq!((&a + &b).to_string(), "3.3");
/// ```
#[derive(Clone)]
pub struct Precise {
    integer: BigInt,
    decimals: i32,
}

#[inline]
fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

/// Narrow a decimal exponent to `i32`, rejecting anything beyond [`MAX_DECIMALS`].
fn bounded_decimals(decimals: i64) -> NumericResult<i32> {
    if decimals.unsigned_abs() > u64::from(MAX_DECIMALS) {
        return Err(NumericError::Overflow(format!(
            "decimal exponent {} is outside ±{}",
            decimals, MAX_DECIMALS
        )));
    }
    Ok(decimals as i32)
}

impl Precise {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from an unscaled integer and a decimal exponent.
    pub fn new(integer: impl Into<BigInt>, decimals: i32) -> Self {
        Self {
            integer: integer.into(),
            decimals,
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Parse a decimal string such as `"-12.340"`, `".5"` or `"1.5e-3"`.
    ///
    /// # Errors
    /// - `InvalidNumber` for anything that is not a plain or exponent-notation decimal
    /// - `Overflow` if the resulting exponent is beyond [`MAX_DECIMALS`]
    pub fn parse(input: &str) -> NumericResult<Self> {
        let lowered = input.trim().to_ascii_lowercase();
        let (number, modifier) = match lowered.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent = exponent
                    .parse::<i64>()
                    .map_err(|_| NumericError::invalid_number(input, "malformed exponent"))?;
                (mantissa, exponent)
            }
            None => (lowered.as_str(), 0),
        };

        let unsigned = number.strip_prefix(['-', '+']).unwrap_or(number);
        let dots = unsigned.bytes().filter(|&b| b == b'.').count();
        let has_digit = unsigned.bytes().any(|b| b.is_ascii_digit());
        if dots > 1 || !has_digit || unsigned.bytes().any(|b| b != b'.' && !b.is_ascii_digit()) {
            return Err(NumericError::invalid_number(input, "not a decimal number"));
        }

        let fraction_digits = number
            .find('.')
            .map(|pos| number.len() - pos - 1)
            .unwrap_or(0);
        let fraction_digits = i64::try_from(fraction_digits)
            .map_err(|_| NumericError::Overflow(format!("{} has too many fractional digits", input)))?;
        let decimals = bounded_decimals(fraction_digits.saturating_sub(modifier))?;
        let integer = BigInt::from_str(&number.replacen('.', "", 1))
            .map_err(|_| NumericError::invalid_number(input, "not a decimal number"))?;

        Ok(Self::new(integer, decimals))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The unscaled integer (carries the sign).
    #[inline]
    pub fn integer(&self) -> &BigInt {
        &self.integer
    }

    /// The decimal exponent.
    #[inline]
    pub fn decimals(&self) -> i32 {
        self.decimals
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.integer.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.integer.is_positive()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.integer.is_negative()
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    pub fn abs(&self) -> Self {
        Self::new(self.integer.abs(), self.decimals)
    }

    /// Division keeping [`DEFAULT_DIV_PRECISION`] fractional digits (truncated).
    ///
    /// # Errors
    /// `DivisionByZero` if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> NumericResult<Self> {
        self.checked_div_with_precision(other, DEFAULT_DIV_PRECISION)
    }

    /// Division keeping `precision` fractional digits (truncated toward zero).
    ///
    /// The dividend is rescaled by `10^(precision - (self.decimals - other.decimals))`,
    /// or divided by the reciprocal power when that exponent is negative, before
    /// the big-integer division.
    ///
    /// # Errors
    /// - `DivisionByZero` if `other` is zero
    /// - `Overflow` if `precision` or the rescaling exponent is beyond [`MAX_DECIMALS`]
    pub fn checked_div_with_precision(&self, other: &Self, precision: i32) -> NumericResult<Self> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let precision = bounded_decimals(i64::from(precision))?;
        let distance = i64::from(precision) - i64::from(self.decimals) + i64::from(other.decimals);
        let shift = bounded_decimals(distance)?.unsigned_abs();
        let numerator = match distance.cmp(&0) {
            Ordering::Equal => self.integer.clone(),
            Ordering::Less => &self.integer / pow10(shift),
            Ordering::Greater => &self.integer * pow10(shift),
        };

        Ok(Self::new(numerator / &other.integer, precision))
    }

    /// Remainder of truncated division; the sign follows the dividend.
    ///
    /// # Errors
    /// `DivisionByZero` if `other` is zero.
    pub fn checked_rem(&self, other: &Self) -> NumericResult<Self> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let common = self.decimals.max(other.decimals);
        let numerator = &self.integer * pow10(common.abs_diff(self.decimals));
        let denominator = &other.integer * pow10(common.abs_diff(other.decimals));

        Ok(Self::new(numerator % denominator, common))
    }

    /// Multiplication with the result exponent checked.
    ///
    /// # Errors
    /// `Overflow` if the combined exponent is beyond [`MAX_DECIMALS`].
    pub fn checked_mul(&self, other: &Self) -> NumericResult<Self> {
        let decimals = bounded_decimals(i64::from(self.decimals) + i64::from(other.decimals))?;
        Ok(Self::new(&self.integer * &other.integer, decimals))
    }

    /// Canonical form: trailing zeros moved from `integer` into `decimals`.
    ///
    /// Zero always reduces to `0 × 10^0`.
    pub fn reduce(&self) -> Self {
        if self.integer.is_zero() {
            return Self::zero();
        }

        let digits = self.integer.magnitude().to_string();
        // never push decimals below i32::MIN
        let room = (i64::from(self.decimals) - i64::from(i32::MIN)) as usize;
        let trailing = (digits.len() - digits.trim_end_matches('0').len()).min(room);
        if trailing == 0 {
            return self.clone();
        }

        Self::new(
            &self.integer / pow10(trailing as u32),
            self.decimals - trailing as i32,
        )
    }

    // ========================================================================
    // Conversion to rust_decimal (for API boundaries)
    // ========================================================================

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// `Overflow` if the value needs more than 96 bits of mantissa or more
    /// than 28 fractional digits.
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let reduced = self.reduce();
        // 10^29 is already past the 96-bit mantissa
        if reduced.decimals < -28 {
            return Err(NumericError::Overflow(format!("{} exceeds Decimal range", self)));
        }
        let (integer, scale) = if reduced.decimals < 0 {
            (&reduced.integer * pow10(reduced.decimals.unsigned_abs()), 0)
        } else {
            (reduced.integer, reduced.decimals as u32)
        };

        let mantissa = integer
            .to_i128()
            .ok_or_else(|| NumericError::Overflow(format!("{} exceeds Decimal range", self)))?;
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, scale)
            .map_err(|e| NumericError::Overflow(e.to_string()))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Precise {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Precise {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<NumericInput> for Precise {
    type Error = NumericError;

    /// Goes through the same plain-decimal rendering the formatter uses.
    fn try_from(value: NumericInput) -> Result<Self, Self::Error> {
        Self::parse(&value.normalize())
    }
}

impl From<i64> for Precise {
    fn from(value: i64) -> Self {
        Self::new(value, 0)
    }
}

impl From<BigInt> for Precise {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<rust_decimal::Decimal> for Precise {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self::new(value.mantissa(), value.scale() as i32)
    }
}

impl PartialEq for Precise {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.reduce(), other.reduce());
        a.decimals == b.decimals && a.integer == b.integer
    }
}

impl Eq for Precise {}

impl PartialOrd for Precise {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precise {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self - other).integer.sign() {
            Sign::Minus => Ordering::Less,
            Sign::NoSign => Ordering::Equal,
            Sign::Plus => Ordering::Greater,
        }
    }
}

impl Hash for Precise {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let reduced = self.reduce();
        reduced.integer.hash(state);
        reduced.decimals.hash(state);
    }
}

impl Add for &Precise {
    type Output = Precise;

    fn add(self, other: &Precise) -> Precise {
        match self.decimals.cmp(&other.decimals) {
            Ordering::Equal => Precise::new(&self.integer + &other.integer, self.decimals),
            Ordering::Less => {
                let scaled = &self.integer * pow10(other.decimals.abs_diff(self.decimals));
                Precise::new(scaled + &other.integer, other.decimals)
            }
            Ordering::Greater => {
                let scaled = &other.integer * pow10(self.decimals.abs_diff(other.decimals));
                Precise::new(&self.integer + scaled, self.decimals)
            }
        }
    }
}

impl Sub for &Precise {
    type Output = Precise;

    fn sub(self, other: &Precise) -> Precise {
        self + &(-other)
    }
}

// Infallible Mul for ergonomics (panics on i32 exponent overflow - use checked_mul on untrusted values)
impl Mul for &Precise {
    type Output = Precise;

    fn mul(self, other: &Precise) -> Precise {
        let decimals = self
            .decimals
            .checked_add(other.decimals)
            .expect("Precise multiplication exponent overflow");
        Precise::new(&self.integer * &other.integer, decimals)
    }
}

impl Neg for &Precise {
    type Output = Precise;

    fn neg(self) -> Precise {
        Precise::new(-&self.integer, self.decimals)
    }
}

impl Neg for Precise {
    type Output = Precise;

    fn neg(self) -> Precise {
        -&self
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident :: $method:ident),*) => {
        $(impl $trait for Precise {
            type Output = Precise;

            #[inline]
            fn $method(self, other: Precise) -> Precise {
                (&self).$method(&other)
            }
        })*
    };
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul);

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for Precise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reduced = self.reduce();
        if reduced.is_negative() {
            f.write_str("-")?;
        }
        let digits = reduced.integer.magnitude().to_string();

        if reduced.decimals <= 0 {
            f.write_str(&digits)?;
            return f.write_str(&"0".repeat(reduced.decimals.unsigned_abs() as usize));
        }

        let decimals = reduced.decimals as usize;
        let padded = format!("{:0>width$}", digits, width = decimals);
        let split = padded.len() - decimals;
        if split == 0 {
            write!(f, "0.{}", padded)
        } else {
            write!(f, "{}.{}", &padded[..split], &padded[split..])
        }
    }
}

impl fmt::Debug for Precise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Precise({}, integer={}, decimals={})", self, self.integer, self.decimals)
    }
}

// ============================================================================
// Tests
// ============================================================================
