use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{OverlapError, Result};

/// which rule table classifies the overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskPolicy {
    /// fixed ath-distance thresholds (5/10/20%) and price change only
    AthOnly,
    /// market status and ol score gates ahead of ath distance and profit
    MarketSignal,
}

/// how strict the engine is about zero values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationPolicy {
    /// every required numeric input must be greater than zero
    StrictPositive,
    /// prices and fees may be zero; weight and loan percent stay > 0
    NonNegative,
}

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub risk_policy: RiskPolicy,
    pub validation: ValidationPolicy,
    /// upper bound on loan percent, `None` for unbounded
    pub max_loan_percent: Option<Decimal>,
    /// ath reference used when the user enters neither a distance nor a price
    pub default_ath_price: Option<Money>,
    /// price shift for the up/down scenarios, `None` to skip them
    pub scenario_shift: Option<Rate>,
    /// decimal places when formatting ringgit amounts
    pub currency_decimals: u32,
}

impl CalculatorConfig {
    /// first release of the calculator: flat monthly fee, fixed RM400/g
    /// ath, ath-only risk table, whole-ringgit display
    pub fn classic() -> Self {
        Self {
            risk_policy: RiskPolicy::AthOnly,
            validation: ValidationPolicy::StrictPositive,
            max_loan_percent: Some(dec!(100)),
            default_ath_price: Some(Money::from_major(400)),
            scenario_shift: Some(Rate::from_percentage(10)),
            currency_decimals: 0,
        }
    }

    /// current calculator: market status and ol score gates, 2dp display
    pub fn market_signal() -> Self {
        Self {
            risk_policy: RiskPolicy::MarketSignal,
            validation: ValidationPolicy::NonNegative,
            max_loan_percent: None,
            default_ath_price: None,
            scenario_shift: Some(Rate::from_percentage(10)),
            currency_decimals: 2,
        }
    }

    /// load and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json).map_err(|e| {
            OverlapError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_loan_percent {
            if max <= Decimal::ZERO {
                return Err(OverlapError::InvalidConfiguration {
                    message: format!("max_loan_percent must be positive, got {}", max),
                });
            }
        }

        if let Some(ath) = self.default_ath_price {
            if !ath.is_positive() {
                return Err(OverlapError::InvalidConfiguration {
                    message: format!("default_ath_price must be positive, got {}", ath),
                });
            }
        }

        if let Some(shift) = self.scenario_shift {
            let s = shift.as_decimal();
            if s <= Decimal::ZERO || s >= Decimal::ONE {
                return Err(OverlapError::InvalidConfiguration {
                    message: format!("scenario_shift must be between 0% and 100%, got {}", shift),
                });
            }
        }

        if self.currency_decimals > 8 {
            return Err(OverlapError::InvalidConfiguration {
                message: format!("currency_decimals must be at most 8, got {}", self.currency_decimals),
            });
        }

        Ok(())
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::market_signal()
    }
}
