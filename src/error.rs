//! Error types for the NPV engine
//!
//! Validation problems with a request are not errors: they are reported
//! through [`crate::validation::ValidationOutcome`]. The types here cover
//! what can go wrong once numbers are actually being crunched.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type used throughout the engine
pub type EngineResult<T> = Result<T, NpvError>;

/// Failures raised by the evaluator and the calculation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NpvError {
    /// The caller passed something the engine cannot work with
    #[error("Invalid input for `{parameter}`: {reason}")]
    InvalidInput {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Discount rate fraction at or below -1, so `1 + r` is not positive
    #[error("Discount rate {rate} is outside the domain of the discount factor (must be greater than -1)")]
    RateOutOfDomain {
        /// The fractional rate that was rejected
        rate: Decimal,
    },

    /// Decimal overflow or a non-finite discount factor
    #[error("Arithmetic overflow while {context}")]
    Overflow {
        /// What the engine was doing when it overflowed
        context: String,
    },

    /// The caller cancelled the calculation
    #[error("Calculation was cancelled")]
    Cancelled,
}

impl NpvError {
    /// Create an invalid input error for a named parameter
    pub fn invalid_input(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }

    /// Create an overflow error
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }
}

/// Errors raised while loading engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
