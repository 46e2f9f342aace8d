/// quick start - one overlap estimate with flat monthly fees
use rahnu_overlap::{compute, CalculatorConfig, Field, FeeMode, PawnInputs};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100g pawned at RM280/g, gold now at RM350/g, 70% margin, 6 months
    let inputs = PawnInputs::new()
        .fee_mode(FeeMode::FlatMonthly)
        .set(Field::WeightGrams, dec!(100))
        .set(Field::OldPawnPrice, dec!(280))
        .set(Field::CurrentPrice, dec!(350))
        .set(Field::LoanPercent, dec!(70))
        .set(Field::MonthlyFee, dec!(200))
        .set(Field::HoldMonths, dec!(6));

    match compute(&inputs, &CalculatorConfig::classic()) {
        Some(result) => println!("{}", result.json()),
        None => println!("inputs incomplete"),
    }

    Ok(())
}
