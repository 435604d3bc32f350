// ============================================================================
// Basic Usage Example
// ============================================================================

use exchange_precision::prelude::*;

fn main() -> Result<(), MarketError> {
    #[cfg(feature = "logging")]
    exchange_precision::utils::init_logging(tracing::Level::DEBUG).ok();

    println!("=== Exchange Precision Example ===\n");

    // Raw formatting in each counting mode
    println!("Formatting 1234.56789:");
    for (label, digits, counting) in [
        ("2 decimal places", NumericInput::from(2), CountingMode::DecimalPlaces),
        ("3 significant digits", NumericInput::from(3), CountingMode::SignificantDigits),
        ("tick 0.25", NumericInput::from("0.25"), CountingMode::TickSize),
        ("nearest 100", NumericInput::from(-2), CountingMode::DecimalPlaces),
    ] {
        let rounded = format_to_precision(1234.56789, RoundingMode::Round, &digits, counting, PaddingMode::NoPadding)?;
        let truncated = format_to_precision(1234.56789, RoundingMode::Truncate, &digits, counting, PaddingMode::NoPadding)?;
        println!("  {:<22} round={:<10} truncate={}", label, rounded, truncated);
    }

    // Markets described with tick sizes
    let registry = MarketRegistry::new(ExchangePrecision::tick_size())
        .with_market(
            Market::spot("BTC/USDT", "BTC", "USDT")
                .with_price_precision("0.01")
                .with_amount_precision("0.00001")
                .with_fees("0.001", "0.0008"),
        )
        .with_currency(Currency::new("USDT").with_precision("0.01").with_network("TRC20", "0.000001"));
    registry.validate()?;

    println!("\n=== Order for BTC/USDT ===");
    let price = registry.price_to_precision("BTC/USDT", 43250.126)?;
    let amount = registry.amount_to_precision("BTC/USDT", 0.123456789)?;
    println!("  price:  {}", price);
    println!("  amount: {}", amount);

    let fee = registry.calculate_fee(
        "BTC/USDT",
        OrderType::Limit,
        Side::Buy,
        amount.as_str(),
        price.as_str(),
        TakerOrMaker::Maker,
    )?;
    println!(
        "  {} fee: {} {} (rate {})",
        fee.kind.as_str(),
        fee.cost,
        fee.currency,
        fee.rate
    );
    println!("  fee rounded: {}", registry.fee_to_precision("BTC/USDT", fee.cost.to_string())?);
    println!(
        "  withdrawal on TRC20: {}",
        registry.currency_to_precision("USDT", 12.3456789, Some("TRC20"))?
    );

    if let Err(e) = registry.amount_to_precision("BTC/USDT", 0.000001) {
        println!("  rejected: {}", e);
    }

    // Exact arithmetic
    println!("\n=== Precise ===");
    let a = Precise::parse("0.1")?;
    let b = Precise::parse("0.2")?;
    println!("  0.1 + 0.2 = {} (f64 gives {})", &a + &b, 0.1f64 + 0.2f64);
    println!("  1 / 3     = {}", Precise::from(1i64).checked_div(&Precise::from(3i64))?);

    Ok(())
}
