use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{OverlapError, Result};
use crate::period::HoldingPeriod;
use crate::types::{FeeMode, MarketStatus};

/// numeric fields the collaborator can edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    WeightGrams,
    OldPawnPrice,
    CurrentPrice,
    LoanPercent,
    MonthlyFee,
    FeeRatePercent,
    HoldMonths,
    HoldDays,
    AthPrice,
    AthDistance,
    OlScore,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::WeightGrams => "weight_grams",
            Field::OldPawnPrice => "old_pawn_price",
            Field::CurrentPrice => "current_price",
            Field::LoanPercent => "loan_percent",
            Field::MonthlyFee => "monthly_fee",
            Field::FeeRatePercent => "fee_rate_percent",
            Field::HoldMonths => "hold_months",
            Field::HoldDays => "hold_days",
            Field::AthPrice => "ath_price",
            Field::AthDistance => "ath_distance_percent",
            Field::OlScore => "ol_score",
        }
    }

    /// ath distance is the only signed field
    pub fn allows_negative(&self) -> bool {
        matches!(self, Field::AthDistance)
    }

    /// month and day counts must be whole numbers
    pub fn is_whole(&self) -> bool {
        matches!(self, Field::HoldMonths | Field::HoldDays)
    }

    /// convert a float entry, rejecting NaN and infinities
    pub fn from_f64(&self, value: f64) -> Result<FieldInput> {
        if !value.is_finite() {
            return Err(OverlapError::InvalidNumber {
                field: *self,
                text: value.to_string(),
            });
        }
        let decimal = Decimal::from_f64(value).ok_or_else(|| OverlapError::InvalidNumber {
            field: *self,
            text: value.to_string(),
        })?;
        self.check(decimal).map(FieldInput::Value)
    }

    fn check(&self, value: Decimal) -> Result<Decimal> {
        if value.is_sign_negative() && !value.is_zero() && !self.allows_negative() {
            return Err(OverlapError::InvalidInput {
                field: *self,
                value: value.to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        if self.is_whole() {
            whole_count(*self, Some(value))?;
        }
        Ok(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// a committed field entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    /// the user emptied the field
    Cleared,
    Value(Decimal),
}

impl FieldInput {
    /// parse collaborator text; empty text clears the field, anything that
    /// is not a number is rejected and must not be committed
    pub fn parse(field: Field, text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(FieldInput::Cleared);
        }
        let value = Decimal::from_str(trimmed).map_err(|_| OverlapError::InvalidNumber {
            field,
            text: text.to_string(),
        })?;
        field.check(value).map(FieldInput::Value)
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            FieldInput::Cleared => None,
            FieldInput::Value(v) => Some(*v),
        }
    }
}

/// immutable snapshot of everything the user has entered
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PawnInputs {
    pub weight_grams: Option<Decimal>,
    pub old_pawn_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub loan_percent: Option<Decimal>,
    pub fee_mode: FeeMode,
    pub monthly_fee: Option<Decimal>,
    pub fee_rate_percent: Option<Decimal>,
    pub hold_months: Option<Decimal>,
    pub hold_days: Option<Decimal>,
    pub old_pawn_date: Option<NaiveDate>,
    pub new_pawn_date: Option<NaiveDate>,
    pub ath_price: Option<Decimal>,
    pub ath_distance_percent: Option<Decimal>,
    pub market_status: Option<MarketStatus>,
    pub ol_score: Option<Decimal>,
}

impl PawnInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::WeightGrams => self.weight_grams,
            Field::OldPawnPrice => self.old_pawn_price,
            Field::CurrentPrice => self.current_price,
            Field::LoanPercent => self.loan_percent,
            Field::MonthlyFee => self.monthly_fee,
            Field::FeeRatePercent => self.fee_rate_percent,
            Field::HoldMonths => self.hold_months,
            Field::HoldDays => self.hold_days,
            Field::AthPrice => self.ath_price,
            Field::AthDistance => self.ath_distance_percent,
            Field::OlScore => self.ol_score,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<Decimal> {
        match field {
            Field::WeightGrams => &mut self.weight_grams,
            Field::OldPawnPrice => &mut self.old_pawn_price,
            Field::CurrentPrice => &mut self.current_price,
            Field::LoanPercent => &mut self.loan_percent,
            Field::MonthlyFee => &mut self.monthly_fee,
            Field::FeeRatePercent => &mut self.fee_rate_percent,
            Field::HoldMonths => &mut self.hold_months,
            Field::HoldDays => &mut self.hold_days,
            Field::AthPrice => &mut self.ath_price,
            Field::AthDistance => &mut self.ath_distance_percent,
            Field::OlScore => &mut self.ol_score,
        }
    }

    /// new snapshot with one field replaced
    pub fn with_field(&self, field: Field, input: FieldInput) -> Self {
        let mut next = self.clone();
        *next.slot(field) = input.value();
        next
    }

    /// builder-style setter for a value already known to be valid
    pub fn set(mut self, field: Field, value: Decimal) -> Self {
        *self.slot(field) = Some(value);
        self
    }

    pub fn fee_mode(mut self, mode: FeeMode) -> Self {
        self.fee_mode = mode;
        self
    }

    pub fn market_status(mut self, status: MarketStatus) -> Self {
        self.market_status = Some(status);
        self
    }

    pub fn dates(mut self, old_pawn: Option<NaiveDate>, new_pawn: Option<NaiveDate>) -> Self {
        self.old_pawn_date = old_pawn;
        self.new_pawn_date = new_pawn;
        self
    }

    /// both dates set means the dates decide; otherwise the typed months
    /// and days are used
    pub fn holding_period(&self) -> Result<HoldingPeriod> {
        if self.old_pawn_date.is_some() && self.new_pawn_date.is_some() {
            return Ok(HoldingPeriod::from_dates(self.old_pawn_date, self.new_pawn_date));
        }
        Ok(HoldingPeriod::new(
            whole_count(Field::HoldMonths, self.hold_months)?,
            whole_count(Field::HoldDays, self.hold_days)?,
        ))
    }
}

/// a typed month or day count; absent counts as zero
fn whole_count(field: Field, value: Option<Decimal>) -> Result<u32> {
    let Some(value) = value else {
        return Ok(0);
    };
    let count = if value.fract().is_zero() { value.to_u32() } else { None };
    count.ok_or_else(|| OverlapError::InvalidInput {
        field,
        value: value.to_string(),
        reason: format!("must be a whole count from 0 to {}", u32::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_empty_is_cleared() {
        assert_eq!(FieldInput::parse(Field::WeightGrams, "").unwrap(), FieldInput::Cleared);
        assert_eq!(FieldInput::parse(Field::WeightGrams, "   ").unwrap(), FieldInput::Cleared);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = FieldInput::parse(Field::CurrentPrice, "abc").unwrap_err();
        assert!(matches!(err, OverlapError::InvalidNumber { field: Field::CurrentPrice, .. }));
        assert!(FieldInput::parse(Field::CurrentPrice, "NaN").is_err());
    }

    #[test]
    fn test_parse_negative_only_for_ath_distance() {
        assert!(FieldInput::parse(Field::OldPawnPrice, "-5").is_err());
        assert_eq!(
            FieldInput::parse(Field::AthDistance, "-3.5").unwrap(),
            FieldInput::Value(dec!(-3.5))
        );
    }

    #[test]
    fn test_parse_zero_is_a_value_not_cleared() {
        assert_eq!(
            FieldInput::parse(Field::OldPawnPrice, "0").unwrap(),
            FieldInput::Value(dec!(0))
        );
    }

    #[test]
    fn test_hold_months_must_be_whole() {
        assert!(FieldInput::parse(Field::HoldMonths, "1.5").is_err());
        assert!(FieldInput::parse(Field::OlScore, "7.5").is_ok());
    }

    #[test]
    fn test_counts_must_fit_the_period() {
        assert_eq!(
            FieldInput::parse(Field::HoldMonths, "4294967295").unwrap(),
            FieldInput::Value(dec!(4294967295))
        );
        let err = FieldInput::parse(Field::HoldMonths, "4294967296").unwrap_err();
        assert!(matches!(err, OverlapError::InvalidInput { field: Field::HoldMonths, .. }));

        // a snapshot built without parsing is checked when the period is derived
        let inputs = PawnInputs::new()
            .set(Field::HoldMonths, dec!(4294967296))
            .set(Field::HoldDays, dec!(15));
        assert!(matches!(
            inputs.holding_period(),
            Err(OverlapError::InvalidInput { field: Field::HoldMonths, .. })
        ));

        let fractional = PawnInputs::new().set(Field::HoldDays, dec!(2.5));
        assert!(fractional.holding_period().is_err());
    }

    #[test]
    fn test_from_f64_rejects_nan() {
        assert!(Field::WeightGrams.from_f64(f64::NAN).is_err());
        assert!(Field::WeightGrams.from_f64(f64::NEG_INFINITY).is_err());
        assert_eq!(
            Field::WeightGrams.from_f64(110.0).unwrap(),
            FieldInput::Value(dec!(110))
        );
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let original = PawnInputs::new().set(Field::WeightGrams, dec!(100));
        let cleared = original.with_field(Field::WeightGrams, FieldInput::Cleared);

        assert_eq!(original.weight_grams, Some(dec!(100)));
        assert_eq!(cleared.weight_grams, None);
    }

    #[test]
    fn test_dates_override_typed_period() {
        let inputs = PawnInputs::new()
            .set(Field::HoldMonths, dec!(6))
            .set(Field::HoldDays, dec!(3));
        assert_eq!(inputs.holding_period().unwrap(), HoldingPeriod::new(6, 3));

        let dated = inputs.clone().dates(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 2, 16),
        );
        assert_eq!(dated.holding_period().unwrap(), HoldingPeriod::new(1, 15));

        // reversed dates still win, and yield zero
        let reversed = inputs.dates(
            NaiveDate::from_ymd_opt(2024, 2, 16),
            NaiveDate::from_ymd_opt(2024, 1, 1),
        );
        assert!(reversed.holding_period().unwrap().is_empty());
    }

    #[test]
    fn test_single_date_falls_back_to_typed_period() {
        let inputs = PawnInputs::new()
            .set(Field::HoldMonths, dec!(2))
            .dates(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        assert_eq!(inputs.holding_period().unwrap(), HoldingPeriod::new(2, 0));
    }
}
