use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::period::HoldingPeriod;
use crate::types::FeeBasis;

/// partial months are prorated over a fixed 30-day month
pub const DAYS_PER_FEE_MONTH: u32 = 30;

/// resolved monthly ujrah terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeeSchedule {
    Flat { monthly_fee: Money },
    Rate { basis: FeeBasis, rate: Rate },
}

impl FeeSchedule {
    /// fee charged for one full month; `None` if it overflows
    pub fn monthly_fee(&self, marhun_value: Money, new_loan: Money) -> Option<Money> {
        match self {
            FeeSchedule::Flat { monthly_fee } => Some(*monthly_fee),
            FeeSchedule::Rate { basis, rate } => {
                let base = match basis {
                    FeeBasis::MarhunValue => marhun_value,
                    FeeBasis::LoanAmount => new_loan,
                };
                base.apply_rate(*rate)
            }
        }
    }
}

/// fee over the whole holding period: full months plus days prorated at
/// monthly_fee / 30
pub fn total_fees(monthly_fee: Money, period: HoldingPeriod) -> Option<Money> {
    let monthly = monthly_fee.as_decimal();
    let full_months = monthly.checked_mul(Decimal::from(period.months))?;
    let partial = monthly
        .checked_mul(Decimal::from(period.days))?
        .checked_div(Decimal::from(DAYS_PER_FEE_MONTH))?;
    full_months.checked_add(partial).map(Money::from_decimal)
}
