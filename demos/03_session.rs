/// session - commit field edits one at a time the way a form would, with a
/// controllable clock for the new contract date
use rahnu_overlap::chrono::{Duration, TimeZone, Utc};
use rahnu_overlap::{
    CalculatorConfig, FeeBasis, FeeMode, Field, MarketStatus, OverlapSession, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    ));

    let mut session = OverlapSession::new(CalculatorConfig::market_signal());
    session.set_fee_mode(FeeMode::Rate(FeeBasis::MarhunValue));
    session.set_market_status(Some(MarketStatus::Safe));

    for (field, text) in [
        (Field::WeightGrams, "110"),
        (Field::OldPawnPrice, "565.71"),
        (Field::CurrentPrice, "579.82"),
        (Field::LoanPercent, "80"),
        (Field::FeeRatePercent, "0.85"),
        (Field::AthDistance, "12"),
    ] {
        session.apply(field, text)?;
    }
    session.apply_f64(Field::OlScore, 7.5)?;
    println!("before dates: result = {}", session.result().is_some());

    // a typo is rejected and the previous value stays
    if let Err(e) = session.apply(Field::CurrentPrice, "57a.82") {
        println!("rejected: {}", e);
    }

    session.set_dates("2024-01-31", "");
    session.set_new_pawn_date_today(&time);
    report(&session);

    // a month later on the same contract
    time.test_control().unwrap().advance(Duration::days(30));
    session.set_new_pawn_date_today(&time);
    report(&session);

    println!("{}", session.json());

    Ok(())
}

fn report(session: &OverlapSession) {
    match session.result() {
        Some(result) => println!(
            "{}: net {} ({})",
            result.holding_period,
            session.format_money(result.net_profit),
            result.recommendation()
        ),
        None => println!("inputs incomplete"),
    }
}
