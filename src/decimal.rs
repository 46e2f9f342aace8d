use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// ringgit amount, kept at 8 decimal places so per-gram prices survive
/// multiplication by fractional weights without drift
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8))
    }

    /// create from whole ringgit
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// `None` when the sum leaves the decimal range
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money::from_decimal)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money::from_decimal)
    }

    /// scale by a plain factor such as a weight or price multiplier
    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money::from_decimal)
    }

    /// `None` on a zero divisor or overflow
    pub fn checked_div(self, divisor: Decimal) -> Option<Money> {
        self.0.checked_div(divisor).map(Money::from_decimal)
    }

    /// apply a ratio (e.g. 0.0085 for 0.85%)
    pub fn apply_rate(&self, rate: Rate) -> Option<Money> {
        self.checked_mul(rate.as_decimal())
    }

    /// ratio of this amount to `base`, or `None` when base is zero or the
    /// ratio overflows
    pub fn ratio_to(&self, base: Money) -> Option<Decimal> {
        self.0.checked_div(base.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// only for differences of two non-negative amounts, which cannot overflow
impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(8))
    }
}

/// ratio type for loan margins, fee rates and price shifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// create from whole percentage (e.g., 10 for 10%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::ONE_HUNDRED)
    }

    /// create from a fractional percentage (e.g., 0.85 for 0.85%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0.saturating_mul(Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_decimal(dec!(565.123456789));
        assert_eq!(m.to_string(), "565.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_sign_checks_exclude_zero() {
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert!(Money::from_major(-5).is_negative());
        assert!(Money::from_decimal(dec!(0.01)).is_positive());
    }

    #[test]
    fn test_rate_application() {
        let loan_margin = Rate::from_percent(dec!(70));
        assert_eq!(Money::from_major(28_000).apply_rate(loan_margin), Some(Money::from_major(19_600)));

        let fee_rate = Rate::from_percent(dec!(0.85));
        assert_eq!(fee_rate.as_decimal(), dec!(0.0085));
        assert_eq!(Money::from_major(10_000).apply_rate(fee_rate), Some(Money::from_major(85)));
        assert_eq!(fee_rate.to_string(), "0.85%");
        assert_eq!(Rate::from_percentage(10).to_string(), "10%");
    }

    #[test]
    fn test_ratio_to_zero_base() {
        assert_eq!(Money::from_major(10).ratio_to(Money::ZERO), None);
        assert_eq!(Money::from_major(10).ratio_to(Money::from_major(40)), Some(dec!(0.25)));
    }

    #[test]
    fn test_checked_ops_stop_at_the_decimal_range() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge.checked_mul(dec!(2)), None);
        assert_eq!(huge.checked_add(Money::from_major(1)), None);
        assert_eq!(Money::from_decimal(Decimal::MIN).checked_sub(huge), None);
        assert_eq!(huge.apply_rate(Rate::from_percent(dec!(200))), None);
        assert_eq!(Money::from_major(1).checked_div(Decimal::ZERO), None);
        assert_eq!(
            Money::from_major(1).ratio_to(Money::from_decimal(dec!(0.00000001))),
            Some(dec!(100000000))
        );

        assert_eq!(Money::from_major(300).checked_div(dec!(30)), Some(Money::from_major(10)));
    }
}
