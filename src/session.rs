use hourglass_rs::SafeTimeProvider;
use serde::Serialize;
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::engine::{self, CalculationResult};
use crate::errors::Result;
use crate::format::format_ringgit;
use crate::inputs::{Field, FieldInput, PawnInputs};
use crate::period::{parse_date, HoldingPeriod};
use crate::types::{FeeMode, MarketStatus};

/// the collaborator-facing calculator: holds the latest input snapshot and
/// its result, recomputed after every committed change
#[derive(Debug, Clone)]
pub struct OverlapSession {
    config: CalculatorConfig,
    inputs: PawnInputs,
    result: Option<CalculationResult>,
}

#[derive(Serialize)]
struct SessionView<'a> {
    inputs: &'a PawnInputs,
    holding_period: Option<HoldingPeriod>,
    result: Option<&'a CalculationResult>,
}

impl OverlapSession {
    pub fn new(config: CalculatorConfig) -> Self {
        Self::with_inputs(PawnInputs::default(), config)
    }

    pub fn with_inputs(inputs: PawnInputs, config: CalculatorConfig) -> Self {
        let result = engine::compute(&inputs, &config);
        Self {
            config,
            inputs,
            result,
        }
    }

    /// commit text typed into a field. Non-numeric text is rejected and
    /// leaves the snapshot and result as they were; empty text clears the
    /// field.
    pub fn apply(&mut self, field: Field, text: &str) -> Result<Option<&CalculationResult>> {
        let input = match FieldInput::parse(field, text) {
            Ok(input) => input,
            Err(e) => {
                debug!(%field, text, "entry rejected");
                return Err(e);
            }
        };
        self.commit(self.inputs.with_field(field, input));
        Ok(self.result.as_ref())
    }

    /// commit a value from a numeric widget such as the ol score slider
    pub fn apply_f64(&mut self, field: Field, value: f64) -> Result<Option<&CalculationResult>> {
        let input = match field.from_f64(value) {
            Ok(input) => input,
            Err(e) => {
                debug!(%field, value, "entry rejected");
                return Err(e);
            }
        };
        self.commit(self.inputs.with_field(field, input));
        Ok(self.result.as_ref())
    }

    pub fn set_fee_mode(&mut self, mode: FeeMode) -> Option<&CalculationResult> {
        let next = self.inputs.clone().fee_mode(mode);
        self.commit(next);
        self.result.as_ref()
    }

    pub fn set_market_status(&mut self, status: Option<MarketStatus>) -> Option<&CalculationResult> {
        let mut next = self.inputs.clone();
        next.market_status = status;
        self.commit(next);
        self.result.as_ref()
    }

    /// set both contract dates from `YYYY-MM-DD` text; text that is not a
    /// date leaves that date unset
    pub fn set_dates(&mut self, old_pawn: &str, new_pawn: &str) -> Option<&CalculationResult> {
        let next = self
            .inputs
            .clone()
            .dates(parse_date(old_pawn), parse_date(new_pawn));
        self.commit(next);
        self.result.as_ref()
    }

    /// use today, per the supplied clock, as the new contract date
    pub fn set_new_pawn_date_today(&mut self, time_provider: &SafeTimeProvider) -> Option<&CalculationResult> {
        let mut next = self.inputs.clone();
        next.new_pawn_date = Some(time_provider.now().date_naive());
        self.commit(next);
        self.result.as_ref()
    }

    pub fn clear_dates(&mut self) -> Option<&CalculationResult> {
        let next = self.inputs.clone().dates(None, None);
        self.commit(next);
        self.result.as_ref()
    }

    /// swap configuration and recompute the current snapshot under it
    pub fn reconfigure(&mut self, config: CalculatorConfig) -> Option<&CalculationResult> {
        self.config = config;
        self.result = engine::compute(&self.inputs, &self.config);
        self.result.as_ref()
    }

    pub fn inputs(&self) -> &PawnInputs {
        &self.inputs
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    /// period the fees are charged over; an error when a typed count is
    /// out of range
    pub fn holding_period(&self) -> Result<HoldingPeriod> {
        self.inputs.holding_period()
    }

    /// ringgit string using the configured precision
    pub fn format_money(&self, amount: Money) -> String {
        format_ringgit(amount, self.config.currency_decimals)
    }

    /// snapshot, derived period and result as pretty json
    pub fn json(&self) -> String {
        let view = SessionView {
            inputs: &self.inputs,
            holding_period: self.holding_period().ok(),
            result: self.result.as_ref(),
        };
        serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
    }

    fn commit(&mut self, next: PawnInputs) {
        self.result = engine::compute(&next, &self.config);
        self.inputs = next;
    }
}

impl Default for OverlapSession {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OverlapError;
    use crate::types::{FeeBasis, RiskLevel};
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn classic_session() -> OverlapSession {
        let mut session = OverlapSession::new(CalculatorConfig::classic());
        session.set_fee_mode(FeeMode::FlatMonthly);
        for (field, text) in [
            (Field::WeightGrams, "100"),
            (Field::OldPawnPrice, "280"),
            (Field::CurrentPrice, "350"),
            (Field::LoanPercent, "70"),
            (Field::MonthlyFee, "200"),
            (Field::HoldMonths, "6"),
        ] {
            session.apply(field, text).unwrap();
        }
        session
    }

    fn market_session() -> OverlapSession {
        let mut session = OverlapSession::default();
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
            session.apply(field, text).unwrap();
        }
        session.apply_f64(Field::OlScore, 7.5).unwrap();
        session
    }

    #[test]
    fn test_result_appears_once_complete() {
        let mut session = OverlapSession::new(CalculatorConfig::classic());
        session.set_fee_mode(FeeMode::FlatMonthly);
        assert!(session.apply(Field::WeightGrams, "100").unwrap().is_none());

        let session = classic_session();
        let result = session.result().unwrap();
        assert_eq!(result.net_profit, Money::from_major(3_700));
        assert_eq!(session.format_money(result.net_profit), "RM3,700");
    }

    #[test]
    fn test_rejected_entry_keeps_previous_state() {
        let mut session = classic_session();
        let before = session.result().cloned();

        let err = session.apply(Field::CurrentPrice, "35o").unwrap_err();
        assert!(matches!(err, OverlapError::InvalidNumber { .. }));
        assert_eq!(session.inputs().current_price, Some(dec!(350)));
        assert_eq!(session.result().cloned(), before);
    }

    #[test]
    fn test_clearing_a_field_waits_for_input() {
        let mut session = classic_session();
        assert!(session.apply(Field::OldPawnPrice, "").unwrap().is_none());
        assert_eq!(session.inputs().old_pawn_price, None);

        assert!(session.apply(Field::OldPawnPrice, "280").unwrap().is_some());
    }

    #[test]
    fn test_dates_drive_the_period() {
        let mut session = market_session();
        assert!(session.result().is_none()); // no months or days yet

        let result = session.set_dates("2024-01-01", "2024-02-16").unwrap();
        assert_eq!(result.holding_period, HoldingPeriod::new(1, 15));
        assert_eq!(result.net_profit.round_dp(2), Money::from_decimal(dec!(428.48)));

        // reversed dates collapse to zero
        assert!(session.set_dates("2024-02-16", "2024-01-01").is_none());

        // malformed date unsets it, the typed period then applies
        session.apply(Field::HoldMonths, "2").unwrap();
        let result = session.set_dates("2024-13-01", "2024-02-16").unwrap();
        assert_eq!(result.holding_period, HoldingPeriod::new(2, 0));
    }

    #[test]
    fn test_new_pawn_date_today() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
        ));

        let mut session = market_session();
        session.set_dates("2024-01-31", "");
        assert!(session.result().is_none());

        let result = session.set_new_pawn_date_today(&time).unwrap();
        assert_eq!(result.holding_period, HoldingPeriod::new(1, 1));
        assert_eq!(session.inputs().new_pawn_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_market_status_change_reclassifies() {
        let mut session = market_session();
        session.apply(Field::HoldMonths, "1").unwrap();
        assert_eq!(session.result().unwrap().risk_level(), RiskLevel::Moderate);

        let result = session.set_market_status(Some(MarketStatus::Avoid)).unwrap();
        assert_eq!(result.risk_level(), RiskLevel::Extreme);

        assert!(session.set_market_status(None).is_none());
    }

    #[test]
    fn test_reconfigure_recomputes() {
        let mut session = classic_session();
        assert!(session.reconfigure(CalculatorConfig::market_signal()).is_none());
        assert!(session.reconfigure(CalculatorConfig::classic()).is_some());
    }

    #[test]
    fn test_slider_rejects_nan() {
        let mut session = market_session();
        assert!(session.apply_f64(Field::OlScore, f64::NAN).is_err());
        assert_eq!(session.inputs().ol_score, Some(dec!(7.5)));
    }

    #[test]
    fn test_oversized_entries_leave_no_result() {
        let mut session = market_session();
        session.apply(Field::HoldMonths, "1").unwrap();
        assert!(session.result().is_some());

        let result = session.apply(Field::WeightGrams, "100000000000000000000").unwrap();
        assert!(result.is_some());

        // accepted by the parser, but weight times price no longer fits a decimal
        let result = session.apply(Field::CurrentPrice, "100000000000000000000").unwrap();
        assert!(result.is_none());

        assert!(session.apply(Field::HoldMonths, "4294967296").is_err());
        assert_eq!(session.holding_period().unwrap(), HoldingPeriod::new(1, 0));
    }

    #[test]
    fn test_json_contains_inputs_and_result() {
        let session = classic_session();
        let value: serde_json::Value = serde_json::from_str(&session.json()).unwrap();
        assert!(value["inputs"].is_object());
        assert_eq!(value["holding_period"]["months"], 6);
        assert_eq!(value["result"]["recommendation"], "PriceElevated");
    }
}
