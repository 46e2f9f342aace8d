pub mod fees;
pub mod risk;
pub mod scenario;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{CalculatorConfig, RiskPolicy, ValidationPolicy};
use crate::decimal::{Money, Rate};
use crate::errors::{OverlapError, Result};
use crate::inputs::{Field, PawnInputs};
use crate::period::HoldingPeriod;
use crate::types::{FeeMode, MarketStatus, Recommendation, RiskLevel, Signal};

pub use fees::{total_fees, FeeSchedule, DAYS_PER_FEE_MONTH};
pub use risk::{classify, RiskAssessment, RiskFactors};
pub use scenario::{scenario, ScenarioOutcome};

/// everything the engine derives from one input snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub old_loan_amount: Money,
    pub new_loan_amount: Money,
    pub loan_difference: Money,
    pub calculated_monthly_fee: Money,
    pub total_fees: Money,
    pub net_profit: Money,
    pub profit_margin_percent: Decimal,
    pub breakeven_price_per_gram: Money,
    #[serde(flatten)]
    pub risk: RiskAssessment,
    pub ath_distance_percent: Decimal,
    pub price_change_percent: Decimal,
    pub holding_period: HoldingPeriod,
    pub up_scenario: Option<ScenarioOutcome>,
    pub down_scenario: Option<ScenarioOutcome>,
}

impl CalculationResult {
    pub fn risk_level(&self) -> RiskLevel {
        self.risk.risk_level
    }

    pub fn signal(&self) -> Signal {
        self.risk.signal
    }

    pub fn recommendation(&self) -> Recommendation {
        self.risk.recommendation
    }

    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// validated numeric terms of one overlap
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapTerms {
    pub weight_grams: Decimal,
    pub old_price: Money,
    pub current_price: Money,
    pub loan_margin: Rate,
    pub fees: FeeSchedule,
    pub period: HoldingPeriod,
    pub ath_distance: Decimal,
    pub market: Option<(MarketStatus, Decimal)>,
}

impl OverlapTerms {
    /// validate a snapshot against the configured policy
    pub fn resolve(inputs: &PawnInputs, config: &CalculatorConfig) -> Result<Self> {
        let policy = config.validation;

        let weight_grams = denominator(inputs, Field::WeightGrams)?;
        let loan_percent = denominator(inputs, Field::LoanPercent)?;
        if let Some(max) = config.max_loan_percent {
            if loan_percent > max {
                return Err(OverlapError::InvalidInput {
                    field: Field::LoanPercent,
                    value: loan_percent.to_string(),
                    reason: format!("must not exceed {}", max),
                });
            }
        }
        let loan_margin = Rate::from_percent(loan_percent);
        if loan_margin.as_decimal().is_zero() {
            // below the smallest representable ratio
            return Err(OverlapError::ZeroDenominator { field: Field::LoanPercent });
        }

        let old_price = Money::from_decimal(amount(inputs, Field::OldPawnPrice, policy)?);
        let current_price = Money::from_decimal(amount(inputs, Field::CurrentPrice, policy)?);

        let fees = match inputs.fee_mode {
            FeeMode::FlatMonthly => FeeSchedule::Flat {
                monthly_fee: Money::from_decimal(amount(inputs, Field::MonthlyFee, policy)?),
            },
            FeeMode::Rate(basis) => FeeSchedule::Rate {
                basis,
                rate: Rate::from_percent(amount(inputs, Field::FeeRatePercent, policy)?),
            },
        };

        let period = holding_period(inputs)?;
        let ath_distance = ath_distance(inputs, config, current_price)?;

        let market = match config.risk_policy {
            RiskPolicy::AthOnly => None,
            RiskPolicy::MarketSignal => {
                let status = inputs.market_status.ok_or(OverlapError::MissingMarketStatus)?;
                Some((status, ol_score(inputs)?))
            }
        };

        Ok(Self {
            weight_grams,
            old_price,
            current_price,
            loan_margin,
            fees,
            period,
            ath_distance,
            market,
        })
    }

    /// loan advanced on the full weight at `price` per gram
    pub fn loan_at(&self, price: Money) -> Result<Money> {
        price
            .checked_mul(self.weight_grams)
            .and_then(|valuation| valuation.apply_rate(self.loan_margin))
            .ok_or_else(|| overflow("loan amount"))
    }

    pub fn old_loan(&self) -> Result<Money> {
        self.loan_at(self.old_price)
    }

    pub fn new_loan(&self) -> Result<Money> {
        self.loan_at(self.current_price)
    }

    pub fn marhun_value(&self) -> Result<Money> {
        self.current_price
            .checked_mul(self.weight_grams)
            .ok_or_else(|| overflow("marhun value"))
    }

    pub fn monthly_fee(&self) -> Result<Money> {
        self.fees
            .monthly_fee(self.marhun_value()?, self.new_loan()?)
            .ok_or_else(|| overflow("monthly fee"))
    }

    pub fn total_fees(&self) -> Result<Money> {
        total_fees(self.monthly_fee()?, self.period).ok_or_else(|| overflow("total fees"))
    }

    /// net profit if re-pawned at `price`, with fees fixed at `total_fees`
    pub fn net_profit_at(&self, price: Money, total_fees: Money) -> Result<Money> {
        let difference = self.loan_at(price)? - self.old_loan()?;
        difference
            .checked_sub(total_fees)
            .ok_or_else(|| overflow("net profit"))
    }

    /// price per gram at which the new loan exactly covers the old loan
    /// plus fees; zero when there is no old loan
    pub fn breakeven_price(&self, total_fees: Money) -> Result<Money> {
        let old_loan = self.old_loan()?;
        if !old_loan.is_positive() {
            return Ok(Money::ZERO);
        }
        old_loan
            .checked_add(total_fees)
            .and_then(|owed| owed.checked_div(self.weight_grams))
            .and_then(|per_gram| per_gram.checked_div(self.loan_margin.as_decimal()))
            .ok_or_else(|| overflow("breakeven price"))
    }

    pub fn price_change_percent(&self) -> Result<Decimal> {
        if self.old_price.is_zero() {
            return Ok(Decimal::ZERO);
        }
        (self.current_price - self.old_price)
            .ratio_to(self.old_price)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| overflow("price change"))
    }

    pub fn risk_factors(&self, net_profit: Money) -> Result<RiskFactors> {
        Ok(match self.market {
            Some((status, ol_score)) => RiskFactors::MarketSignal {
                status,
                ol_score,
                ath_distance: self.ath_distance,
                net_profit,
            },
            None => RiskFactors::AthOnly {
                ath_distance: self.ath_distance,
                price_change: self.price_change_percent()?,
            },
        })
    }
}

/// run the engine; `None` means the inputs are not complete yet
pub fn compute(inputs: &PawnInputs, config: &CalculatorConfig) -> Option<CalculationResult> {
    match try_compute(inputs, config) {
        Ok(result) => {
            trace!(
                net_profit = %result.net_profit,
                risk_level = %result.risk_level(),
                "overlap computed"
            );
            Some(result)
        }
        Err(reason) => {
            debug!(%reason, "overlap incomplete");
            None
        }
    }
}

/// run the engine, reporting why the result is absent
pub fn try_compute(inputs: &PawnInputs, config: &CalculatorConfig) -> Result<CalculationResult> {
    let terms = OverlapTerms::resolve(inputs, config)?;

    let old_loan_amount = terms.old_loan()?;
    let new_loan_amount = terms.new_loan()?;
    let loan_difference = new_loan_amount - old_loan_amount;

    let calculated_monthly_fee = terms.monthly_fee()?;
    let total_fees = total_fees(calculated_monthly_fee, terms.period)
        .ok_or_else(|| overflow("total fees"))?;

    let net_profit = loan_difference
        .checked_sub(total_fees)
        .ok_or_else(|| overflow("net profit"))?;

    let profit_margin_percent = if old_loan_amount.is_positive() {
        net_profit
            .ratio_to(old_loan_amount)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| overflow("profit margin"))?
    } else {
        Decimal::ZERO
    };

    let breakeven_price_per_gram = terms.breakeven_price(total_fees)?;
    let risk = classify(&terms.risk_factors(net_profit)?);
    let price_change_percent = terms.price_change_percent()?;

    let (up_scenario, down_scenario) = match config.scenario_shift {
        Some(shift) => terms.scenarios(shift, total_fees),
        None => (None, None),
    };

    Ok(CalculationResult {
        old_loan_amount,
        new_loan_amount,
        loan_difference,
        calculated_monthly_fee,
        total_fees,
        net_profit,
        profit_margin_percent,
        breakeven_price_per_gram,
        risk,
        ath_distance_percent: terms.ath_distance,
        price_change_percent,
        holding_period: terms.period,
        up_scenario,
        down_scenario,
    })
}

fn overflow(quantity: &'static str) -> OverlapError {
    OverlapError::Overflow { quantity }
}

fn required(inputs: &PawnInputs, field: Field) -> Result<Decimal> {
    let value = inputs.get(field).ok_or(OverlapError::MissingInput { field })?;
    if value < Decimal::ZERO {
        return Err(OverlapError::InvalidInput {
            field,
            value: value.to_string(),
            reason: "must not be negative".to_string(),
        });
    }
    Ok(value)
}

/// a price or fee; zero allowed only under the non-negative policy
fn amount(inputs: &PawnInputs, field: Field, policy: ValidationPolicy) -> Result<Decimal> {
    let value = required(inputs, field)?;
    if policy == ValidationPolicy::StrictPositive && value.is_zero() {
        return Err(OverlapError::InvalidInput {
            field,
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

/// a value the engine divides by
fn denominator(inputs: &PawnInputs, field: Field) -> Result<Decimal> {
    let value = required(inputs, field)?;
    if value.is_zero() {
        return Err(OverlapError::ZeroDenominator { field });
    }
    Ok(value)
}

fn holding_period(inputs: &PawnInputs) -> Result<HoldingPeriod> {
    let period = inputs.holding_period()?;
    if period.is_empty() {
        return Err(OverlapError::EmptyHoldingPeriod);
    }
    Ok(period)
}

fn ath_distance(inputs: &PawnInputs, config: &CalculatorConfig, current_price: Money) -> Result<Decimal> {
    if let Some(distance) = inputs.ath_distance_percent {
        return Ok(distance);
    }

    let ath = match inputs.ath_price {
        Some(_) => Money::from_decimal(denominator(inputs, Field::AthPrice)?),
        None => config
            .default_ath_price
            .ok_or(OverlapError::MissingInput { field: Field::AthDistance })?,
    };
    if ath.is_zero() {
        return Err(OverlapError::ZeroDenominator { field: Field::AthPrice });
    }

    ath.checked_sub(current_price)
        .and_then(|gap| gap.ratio_to(ath))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow("ath distance"))
}

fn ol_score(inputs: &PawnInputs) -> Result<Decimal> {
    let score = required(inputs, Field::OlScore)?;
    if score > Decimal::TEN {
        return Err(OverlapError::InvalidInput {
            field: Field::OlScore,
            value: score.to_string(),
            reason: "must be between 0 and 10".to_string(),
        });
    }
    Ok(score)
}
