use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::engine::{overflow, OverlapTerms};
use crate::errors::Result;
use crate::inputs::PawnInputs;

/// net profit if the current price moved by some multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub price: Money,
    pub profit: Money,
}

/// profit at `current_price × multiplier`, fees held at their unshifted
/// amount; `None` when the inputs are incomplete or the shifted figures
/// overflow
pub fn scenario(
    inputs: &PawnInputs,
    config: &CalculatorConfig,
    multiplier: Decimal,
) -> Option<ScenarioOutcome> {
    let terms = OverlapTerms::resolve(inputs, config).ok()?;
    let fees = terms.total_fees().ok()?;
    terms.scenario(multiplier, fees).ok()
}

impl OverlapTerms {
    pub(crate) fn scenario(&self, multiplier: Decimal, total_fees: Money) -> Result<ScenarioOutcome> {
        let price = self
            .current_price
            .checked_mul(multiplier)
            .ok_or_else(|| overflow("scenario price"))?;
        Ok(ScenarioOutcome {
            price,
            profit: self.net_profit_at(price, total_fees)?,
        })
    }

    /// up and down scenarios for a symmetric shift; a side that overflows
    /// is left out
    pub(crate) fn scenarios(
        &self,
        shift: Rate,
        total_fees: Money,
    ) -> (Option<ScenarioOutcome>, Option<ScenarioOutcome>) {
        let s = shift.as_decimal();
        let up = Decimal::ONE
            .checked_add(s)
            .and_then(|m| self.scenario(m, total_fees).ok());
        let down = Decimal::ONE
            .checked_sub(s)
            .and_then(|m| self.scenario(m, total_fees).ok());
        (up, down)
    }
}
