use serde::{Deserialize, Serialize};
use std::fmt;

/// what the monthly ujrah (safekeeping fee) is charged against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeBasis {
    /// current value of the pawned gold
    MarhunValue,
    /// principal of the new loan
    LoanAmount,
}

/// how the monthly fee is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeMode {
    /// fixed ringgit amount per month
    FlatMonthly,
    /// percentage of the chosen basis per month
    Rate(FeeBasis),
}

impl Default for FeeMode {
    fn default() -> Self {
        FeeMode::Rate(FeeBasis::MarhunValue)
    }
}

/// user's read of the gold market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    Safe,
    Caution,
    Avoid,
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY HIGH",
            RiskLevel::Extreme => "EXTREME",
        };
        f.write_str(label)
    }
}

/// traffic-light colour shown next to the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Green,
    Yellow,
    Orange,
    Red,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::Green => "green",
            Signal::Yellow => "yellow",
            Signal::Orange => "orange",
            Signal::Red => "red",
        };
        f.write_str(label)
    }
}

/// advice attached to a risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    // market-signal table
    DoNotOverlap,
    NeedsDeeperStudy,
    BestOpportunity,
    GoodPotential,
    LossMaking,
    WaitForClearerSignal,

    // ath-only table
    TooCloseToAth,
    NearAth,
    PriceElevated,
    SuitableForOverlap,
    Suitable,
}

impl Recommendation {
    /// label as shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::DoNotOverlap => "JANGAN OL - DEKAT ATH ATAU ISYARAT PASARAN NEGATIF",
            Recommendation::NeedsDeeperStudy => "BERISIKO - PERLU KAJIAN LANJUT",
            Recommendation::BestOpportunity => "PELUANG TERBAIK - SEMUA PETUNJUK POSITIF",
            Recommendation::GoodPotential => "SESUAI - POTENSI BAIK",
            Recommendation::LossMaking => "BERHATI-HATI - OVERLAP INI RUGI",
            Recommendation::WaitForClearerSignal => "TUNGGU ISYARAT LEBIH JELAS",
            Recommendation::TooCloseToAth => "JANGAN OL - TERLALU DEKAT ATH",
            Recommendation::NearAth => "BERISIKO - HAMPIR ATH",
            Recommendation::PriceElevated => "BERHATI-HATI - HARGA TINGGI",
            Recommendation::SuitableForOverlap => "SESUAI UNTUK OVERLAP",
            Recommendation::Suitable => "SESUAI",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Recommendation::DoNotOverlap => {
                "do not overlap: near all-time high or negative market signal"
            }
            Recommendation::NeedsDeeperStudy => "risky: needs deeper study",
            Recommendation::BestOpportunity => "best opportunity: all indicators positive",
            Recommendation::GoodPotential => "suitable: good potential",
            Recommendation::LossMaking => "caution: this overlap is a loss",
            Recommendation::WaitForClearerSignal => "wait for a clearer signal",
            Recommendation::TooCloseToAth => "do not overlap: too close to all-time high",
            Recommendation::NearAth => "risky: almost at all-time high",
            Recommendation::PriceElevated => "caution: price elevated",
            Recommendation::SuitableForOverlap => "suitable for overlap",
            Recommendation::Suitable => "suitable",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
