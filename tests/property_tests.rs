//! Property-based tests for precision formatting and exact arithmetic.
//!
//! These tests verify invariants hold under random inputs.

use exchange_precision::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

// Strategies for generating test data
fn decimal_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..=1_000_000_000_000i64, 0u32..=8u32)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

// At most 4 places against ticks of 1e-4 or coarser: tick quantization
// treats remainders under 5e-9 as on-grid, so finer inputs may land one
// tick away from a strict truncation
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..=100_000_000i64, 0u32..=4u32)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale)) // up to ±100M
}

fn fine_price_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000i64..=10_000_000_000i64).prop_map(|mantissa| Decimal::new(mantissa, 9))
}

fn tick_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "0.0001", "0.001", "0.01", "0.05", "0.1", "0.25", "0.5", "1", "5",
    ])
}

fn rounding_strategy() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![Just(RoundingMode::Round), Just(RoundingMode::Truncate)]
}

fn padding_strategy() -> impl Strategy<Value = PaddingMode> {
    prop_oneof![Just(PaddingMode::NoPadding), Just(PaddingMode::PadWithZero)]
}

fn parse(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

proptest! {
    /// Truncating to the digits already present only drops trailing zeros
    #[test]
    fn truncate_round_trip(value in decimal_strategy()) {
        let text = value.to_string();
        let out = format_to_precision(
            text.as_str(),
            RoundingMode::Truncate,
            value.scale(),
            CountingMode::DecimalPlaces,
            PaddingMode::NoPadding,
        ).unwrap();
        prop_assert_eq!(out, value.normalize().to_string());
    }

    /// Formatting an already formatted value changes nothing
    #[test]
    fn formatting_is_idempotent(
        value in decimal_strategy(),
        rounding in rounding_strategy(),
        padding in padding_strategy(),
        significant in any::<bool>(),
        digits in 1i32..=8,
    ) {
        let counting = if significant {
            CountingMode::SignificantDigits
        } else {
            CountingMode::DecimalPlaces
        };
        let once = format_to_precision(value.to_string(), rounding, digits, counting, padding).unwrap();
        let twice = format_to_precision(once.as_str(), rounding, digits, counting, padding).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Truncation never grows the magnitude
    #[test]
    fn truncate_never_exceeds_value(
        value in decimal_strategy(),
        significant in any::<bool>(),
        digits in 1i32..=8,
    ) {
        let counting = if significant {
            CountingMode::SignificantDigits
        } else {
            CountingMode::DecimalPlaces
        };
        let out = format_to_precision(
            value.to_string(),
            RoundingMode::Truncate,
            digits,
            counting,
            PaddingMode::NoPadding,
        ).unwrap();
        prop_assert!(parse(&out).abs() <= value.abs(), "{} truncated to {}", value, out);
    }

    /// Rounding to d places moves the value by at most half a unit in place d
    #[test]
    fn round_within_half_unit(value in decimal_strategy(), digits in 0u32..=8) {
        let out = format_to_precision(
            value.to_string(),
            RoundingMode::Round,
            digits,
            CountingMode::DecimalPlaces,
            PaddingMode::NoPadding,
        ).unwrap();
        prop_assert!((parse(&out) - value).abs() <= Decimal::new(5, digits + 1));
    }

    /// Tick-size output is always a whole number of ticks
    #[test]
    fn tick_size_output_is_multiple_of_tick(
        value in price_strategy(),
        tick in tick_strategy(),
        rounding in rounding_strategy(),
    ) {
        let out = format_to_precision(
            value.to_string(),
            rounding,
            tick,
            CountingMode::TickSize,
            PaddingMode::NoPadding,
        ).unwrap();
        prop_assert_eq!(parse(&out) % parse(tick), Decimal::ZERO, "{} at tick {} gave {}", value, tick, out);
        if rounding == RoundingMode::Truncate {
            prop_assert!(parse(&out).abs() <= value.abs());
        }
    }

    /// Fine inputs still land on the grid, within one tick of the value
    #[test]
    fn tick_size_fine_inputs_stay_on_grid(
        value in fine_price_strategy(),
        tick in prop::sample::select(vec!["0.000001", "0.0005", "0.07", "0.3", "2.5"]),
        rounding in rounding_strategy(),
    ) {
        let out = format_to_precision(
            value.to_string(),
            rounding,
            tick,
            CountingMode::TickSize,
            PaddingMode::NoPadding,
        ).unwrap();
        let (out, tick) = (parse(&out), parse(tick));
        prop_assert_eq!(out % tick, Decimal::ZERO);
        prop_assert!((out - value).abs() <= tick);
    }

    /// Negative digit counts are exact on long strings
    #[test]
    fn negative_digits_truncate_exactly(
        head in 1u64..=u64::MAX,
        tail in 0u64..1_000_000_000_000,
        places in 1u32..=12,
    ) {
        let text = format!("{}{:012}", head, tail);
        let out = format_to_precision(
            text.as_str(),
            RoundingMode::Truncate,
            -(places as i32),
            CountingMode::DecimalPlaces,
            PaddingMode::NoPadding,
        ).unwrap();
        let keep = text.len() - places as usize;
        prop_assert_eq!(out, format!("{}{}", &text[..keep], "0".repeat(places as usize)));
    }

    /// Addition is associative and agrees with rust_decimal
    #[test]
    fn precise_addition(a in decimal_strategy(), b in decimal_strategy(), c in decimal_strategy()) {
        let (pa, pb, pc) = (Precise::from(a), Precise::from(b), Precise::from(c));
        prop_assert_eq!(&(&pa + &pb) + &pc, &pa + &(&pb + &pc));
        prop_assert_eq!((&pa + &pb).to_decimal().unwrap(), a + b);
    }

    /// Multiplication is commutative
    #[test]
    fn precise_multiplication_commutes(a in decimal_strategy(), b in decimal_strategy()) {
        let (pa, pb) = (Precise::from(a), Precise::from(b));
        prop_assert_eq!(&pa * &pb, &pb * &pa);
    }

    /// a - a reduces to canonical zero
    #[test]
    fn precise_sub_self_is_zero(a in decimal_strategy()) {
        let pa = Precise::from(a);
        let zero = (&pa - &pa).reduce();
        prop_assert_eq!(zero.decimals(), 0);
        prop_assert_eq!(zero, Precise::parse("0").unwrap());
    }

    /// Rendering and parsing a Precise value loses nothing
    #[test]
    fn precise_display_round_trip(a in decimal_strategy()) {
        let pa = Precise::from(a);
        let reparsed = Precise::parse(&pa.to_string()).unwrap();
        prop_assert_eq!(parse(&pa.to_string()), a);
        prop_assert_eq!(reparsed, pa);
    }

    /// Remainder matches rust_decimal for a non-zero divisor
    #[test]
    fn precise_remainder(a in decimal_strategy(), b in price_strategy()) {
        prop_assume!(!b.is_zero());
        let rem = Precise::from(a).checked_rem(&Precise::from(b)).unwrap();
        prop_assert_eq!(rem.to_decimal().unwrap(), a % b);
    }
}
