/// classic calculator - ath distance from an all-time-high price and
/// ringgit formatting with whole amounts
use rahnu_overlap::{
    format_percent, format_ringgit, try_compute, CalculatorConfig, Field, FeeMode, Money, PawnInputs,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = CalculatorConfig::classic();
    let decimals = config.currency_decimals;

    let inputs = PawnInputs::new()
        .fee_mode(FeeMode::FlatMonthly)
        .set(Field::WeightGrams, dec!(50))
        .set(Field::OldPawnPrice, dec!(300))
        .set(Field::CurrentPrice, dec!(370))
        .set(Field::LoanPercent, dec!(75))
        .set(Field::MonthlyFee, dec!(90))
        .set(Field::HoldMonths, dec!(4))
        .set(Field::HoldDays, dec!(15))
        .set(Field::AthPrice, dec!(420));

    let result = try_compute(&inputs, &config)?;
    let money = |m: Money| format_ringgit(m, decimals);

    println!("holding period:   {}", result.holding_period);
    println!("old loan:         {}", money(result.old_loan_amount));
    println!("new loan:         {}", money(result.new_loan_amount));
    println!("difference:       {}", money(result.loan_difference));
    println!("total fees:       {}", money(result.total_fees));
    println!("net profit:       {}", money(result.net_profit));
    println!("margin:           {}", format_percent(result.profit_margin_percent, 2));
    println!("breakeven/gram:   {}", money(result.breakeven_price_per_gram));
    println!("ath distance:     {}", format_percent(result.ath_distance_percent, 1));
    println!(
        "risk:             {} ({:?}) - {}",
        result.risk_level(),
        result.signal(),
        result.recommendation()
    );

    if let (Some(up), Some(down)) = (result.up_scenario, result.down_scenario) {
        println!("price +10%:       {} -> {}", money(up.price), money(up.profit));
        println!("price -10%:       {} -> {}", money(down.price), money(down.profit));
    }

    // a loan percent above the cap is rejected, not clamped
    let capped = inputs.set(Field::LoanPercent, dec!(120));
    if let Err(e) = try_compute(&capped, &config) {
        println!("rejected: {}", e);
    }

    Ok(())
}
