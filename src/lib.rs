pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod format;
pub mod inputs;
pub mod period;
pub mod session;
pub mod types;

// re-export key types
pub use config::{CalculatorConfig, RiskPolicy, ValidationPolicy};
pub use decimal::{Money, Rate};
pub use engine::{
    compute, scenario, try_compute, CalculationResult, FeeSchedule, OverlapTerms, RiskAssessment,
    ScenarioOutcome,
};
pub use errors::{OverlapError, Result};
pub use format::{format_percent, format_ringgit};
pub use inputs::{Field, FieldInput, PawnInputs};
pub use period::HoldingPeriod;
pub use session::OverlapSession;
pub use types::{FeeBasis, FeeMode, MarketStatus, Recommendation, RiskLevel, Signal};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
