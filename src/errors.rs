use thiserror::Error;

use crate::inputs::Field;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlapError {
    #[error("missing input: {field}")]
    MissingInput {
        field: Field,
    },

    #[error("invalid input for {field}: {value} ({reason})")]
    InvalidInput {
        field: Field,
        value: String,
        reason: String,
    },

    #[error("not a number for {field}: {text:?}")]
    InvalidNumber {
        field: Field,
        text: String,
    },

    #[error("zero denominator: {field} must be greater than zero")]
    ZeroDenominator {
        field: Field,
    },

    #[error("market status not selected")]
    MissingMarketStatus,

    #[error("arithmetic overflow computing {quantity}")]
    Overflow {
        quantity: &'static str,
    },

    #[error("holding period is empty")]
    EmptyHoldingPeriod,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, OverlapError>;
