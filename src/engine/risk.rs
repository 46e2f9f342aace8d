use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{MarketStatus, Recommendation, RiskLevel, Signal};

/// outcome of the risk rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub signal: Signal,
    pub recommendation: Recommendation,
}

impl RiskAssessment {
    fn new(risk_level: RiskLevel, signal: Signal, recommendation: Recommendation) -> Self {
        Self {
            risk_level,
            signal,
            recommendation,
        }
    }
}

/// what each rule table looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskFactors {
    AthOnly {
        ath_distance: Decimal,
        price_change: Decimal,
    },
    MarketSignal {
        status: MarketStatus,
        ol_score: Decimal,
        ath_distance: Decimal,
        net_profit: Money,
    },
}

/// how a market status bears on the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusGate {
    Block,
    Warn,
    Favourable,
    Neutral,
}

// no wildcard: a new status must be placed here explicitly
fn gate(status: MarketStatus) -> StatusGate {
    match status {
        MarketStatus::Avoid => StatusGate::Block,
        MarketStatus::Caution => StatusGate::Warn,
        MarketStatus::Safe => StatusGate::Favourable,
        MarketStatus::Wait => StatusGate::Neutral,
    }
}

/// classify an overlap; rules are evaluated in order and the first match wins
pub fn classify(factors: &RiskFactors) -> RiskAssessment {
    match *factors {
        RiskFactors::AthOnly {
            ath_distance,
            price_change,
        } => classify_ath_only(ath_distance, price_change),
        RiskFactors::MarketSignal {
            status,
            ol_score,
            ath_distance,
            net_profit,
        } => classify_market_signal(gate(status), ol_score, ath_distance, net_profit),
    }
}

fn classify_ath_only(ath_distance: Decimal, price_change: Decimal) -> RiskAssessment {
    if ath_distance < dec!(5) {
        RiskAssessment::new(RiskLevel::VeryHigh, Signal::Red, Recommendation::TooCloseToAth)
    } else if ath_distance < dec!(10) {
        RiskAssessment::new(RiskLevel::High, Signal::Orange, Recommendation::NearAth)
    } else if ath_distance < dec!(20) {
        RiskAssessment::new(RiskLevel::Moderate, Signal::Yellow, Recommendation::PriceElevated)
    } else if price_change > dec!(5) && ath_distance > dec!(20) {
        RiskAssessment::new(RiskLevel::Low, Signal::Green, Recommendation::SuitableForOverlap)
    } else {
        RiskAssessment::new(RiskLevel::Low, Signal::Green, Recommendation::Suitable)
    }
}

fn classify_market_signal(
    gate: StatusGate,
    ol_score: Decimal,
    ath_distance: Decimal,
    net_profit: Money,
) -> RiskAssessment {
    let profitable = net_profit.is_positive();

    if gate == StatusGate::Block || ol_score < dec!(3) || ath_distance < dec!(5) {
        RiskAssessment::new(RiskLevel::Extreme, Signal::Red, Recommendation::DoNotOverlap)
    } else if gate == StatusGate::Warn || ol_score < dec!(5) || ath_distance < dec!(10) {
        RiskAssessment::new(RiskLevel::High, Signal::Orange, Recommendation::NeedsDeeperStudy)
    } else if gate == StatusGate::Favourable && ol_score >= dec!(8) && profitable {
        RiskAssessment::new(RiskLevel::Low, Signal::Green, Recommendation::BestOpportunity)
    } else if gate == StatusGate::Favourable && ol_score >= dec!(6) && profitable {
        RiskAssessment::new(RiskLevel::Moderate, Signal::Green, Recommendation::GoodPotential)
    } else if !profitable && ol_score < dec!(8) {
        RiskAssessment::new(RiskLevel::Moderate, Signal::Yellow, Recommendation::LossMaking)
    } else {
        RiskAssessment::new(
            RiskLevel::Moderate,
            Signal::Yellow,
            Recommendation::WaitForClearerSignal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(status: MarketStatus, ol: Decimal, ath: Decimal, profit: i64) -> RiskAssessment {
        classify(&RiskFactors::MarketSignal {
            status,
            ol_score: ol,
            ath_distance: ath,
            net_profit: Money::from_major(profit),
        })
    }

    fn ath_only(ath: Decimal, change: Decimal) -> RiskAssessment {
        classify(&RiskFactors::AthOnly {
            ath_distance: ath,
            price_change: change,
        })
    }

    #[test]
    fn test_avoid_dominates_favourable_signals() {
        let a = market(MarketStatus::Avoid, dec!(9), dec!(50), 1000);
        assert_eq!(a.risk_level, RiskLevel::Extreme);
        assert_eq!(a.signal, Signal::Red);
        assert_eq!(a.recommendation, Recommendation::DoNotOverlap);
    }

    #[test]
    fn test_low_score_or_near_ath_is_extreme() {
        assert_eq!(market(MarketStatus::Safe, dec!(2.5), dec!(40), 500).risk_level, RiskLevel::Extreme);
        assert_eq!(market(MarketStatus::Safe, dec!(9), dec!(4.9), 500).risk_level, RiskLevel::Extreme);
        assert_eq!(market(MarketStatus::Safe, dec!(9), dec!(-2), 500).risk_level, RiskLevel::Extreme);
    }

    #[test]
    fn test_caution_is_high() {
        let a = market(MarketStatus::Caution, dec!(9), dec!(30), 500);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.signal, Signal::Orange);

        assert_eq!(market(MarketStatus::Safe, dec!(4.5), dec!(30), 500).risk_level, RiskLevel::High);
        assert_eq!(market(MarketStatus::Safe, dec!(9), dec!(9.9), 500).risk_level, RiskLevel::High);
    }

    #[test]
    fn test_safe_market_grades_by_score() {
        let best = market(MarketStatus::Safe, dec!(8), dec!(25), 1);
        assert_eq!(best.risk_level, RiskLevel::Low);
        assert_eq!(best.signal, Signal::Green);
        assert_eq!(best.recommendation, Recommendation::BestOpportunity);

        let good = market(MarketStatus::Safe, dec!(6), dec!(25), 1);
        assert_eq!(good.risk_level, RiskLevel::Moderate);
        assert_eq!(good.signal, Signal::Green);
        assert_eq!(good.recommendation, Recommendation::GoodPotential);
    }

    #[test]
    fn test_loss_with_middling_score() {
        let a = market(MarketStatus::Safe, dec!(7), dec!(25), 0);
        assert_eq!(a.signal, Signal::Yellow);
        assert_eq!(a.recommendation, Recommendation::LossMaking);

        let wait = market(MarketStatus::Wait, dec!(7), dec!(25), -100);
        assert_eq!(wait.recommendation, Recommendation::LossMaking);
    }

    #[test]
    fn test_fallthrough_waits() {
        // profitable but not safe
        let a = market(MarketStatus::Wait, dec!(9), dec!(25), 100);
        assert_eq!(a.risk_level, RiskLevel::Moderate);
        assert_eq!(a.recommendation, Recommendation::WaitForClearerSignal);

        // safe, high score, but a loss
        let b = market(MarketStatus::Safe, dec!(8.5), dec!(25), -1);
        assert_eq!(b.recommendation, Recommendation::WaitForClearerSignal);

        // safe and profitable but score just under 6
        let c = market(MarketStatus::Safe, dec!(5.5), dec!(25), 100);
        assert_eq!(c.recommendation, Recommendation::WaitForClearerSignal);
    }

    #[test]
    fn test_ath_only_thresholds() {
        assert_eq!(ath_only(dec!(4), dec!(0)).risk_level, RiskLevel::VeryHigh);
        assert_eq!(ath_only(dec!(4), dec!(0)).signal, Signal::Red);
        assert_eq!(ath_only(dec!(5), dec!(0)).risk_level, RiskLevel::High);
        assert_eq!(ath_only(dec!(12.5), dec!(25)).recommendation, Recommendation::PriceElevated);
        assert_eq!(ath_only(dec!(20), dec!(25)).recommendation, Recommendation::Suitable);
        assert_eq!(ath_only(dec!(30), dec!(6)).recommendation, Recommendation::SuitableForOverlap);
        assert_eq!(ath_only(dec!(30), dec!(5)).recommendation, Recommendation::Suitable);
        assert_eq!(ath_only(dec!(30), dec!(5)).risk_level, RiskLevel::Low);
    }
}
