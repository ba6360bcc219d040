//! Error types for the indicator engine.

use thiserror::Error;

/// Indicator calculation and registry errors.
///
/// Calculations never return these: insufficient data and invalid parameters
/// are recorded as diagnostics and yield an empty output. Only registry
/// lookups and parameter decoding surface as `Err`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Unknown indicator type: {0}")]
    UnknownIndicatorType(String),

    #[error("Parameters for `{found}` passed to `{expected}`")]
    ParamsMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid parameters for `{type_id}`: {reason}")]
    InvalidParams { type_id: String, reason: String },
}

/// Bar data errors raised while loading or validating a series.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available at {0}")]
    NoDataAvailable(String),

    #[error("Bars out of order at index {index}: {time} follows {previous}")]
    OutOfOrder {
        index: usize,
        previous: i64,
        time: i64,
    },

    #[error("Duplicate bar time {time} at index {index}")]
    DuplicateTime { index: usize, time: i64 },

    #[error("Negative volume {volume} at index {index}")]
    NegativeVolume { index: usize, volume: f64 },

    #[error("Parse error: {0}")]
    ParseError(String),
}
