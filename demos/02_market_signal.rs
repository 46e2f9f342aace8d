/// market-signal calculator - fee rate on marhun value, contract dates and
/// a market status driving the risk table
use rahnu_overlap::{
    chrono::NaiveDate, compute, format_ringgit, CalculatorConfig, FeeBasis, FeeMode, Field,
    MarketStatus, PawnInputs,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = CalculatorConfig::market_signal();

    let base = PawnInputs::new()
        .fee_mode(FeeMode::Rate(FeeBasis::MarhunValue))
        .set(Field::WeightGrams, dec!(110))
        .set(Field::OldPawnPrice, dec!(565.71))
        .set(Field::CurrentPrice, dec!(579.82))
        .set(Field::LoanPercent, dec!(80))
        .set(Field::FeeRatePercent, dec!(0.85))
        .set(Field::AthDistance, dec!(12))
        .set(Field::OlScore, dec!(7.5))
        .dates(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 2, 16),
        );

    for status in [
        MarketStatus::Safe,
        MarketStatus::Wait,
        MarketStatus::Caution,
        MarketStatus::Avoid,
    ] {
        let inputs = base.clone().market_status(status);
        let Some(result) = compute(&inputs, &config) else {
            println!("{:?}: inputs incomplete", status);
            continue;
        };

        println!(
            "{:?}: net {} over {}, {} / {:?} / {}",
            status,
            format_ringgit(result.net_profit, config.currency_decimals),
            result.holding_period,
            result.risk_level(),
            result.signal(),
            result.recommendation().description(),
        );
    }

    // fee on the new loan amount instead of the marhun value
    let on_loan = base
        .clone()
        .market_status(MarketStatus::Safe)
        .fee_mode(FeeMode::Rate(FeeBasis::LoanAmount));
    if let Some(result) = compute(&on_loan, &config) {
        println!(
            "fee on loan amount: monthly {}, net {}",
            format_ringgit(result.calculated_monthly_fee, config.currency_decimals),
            format_ringgit(result.net_profit, config.currency_decimals),
        );
    }

    Ok(())
}
