//! # Error Types
//!
//! Structured error types for wind_core. Every rejected input names the
//! offending field, the value received and the admissible domain, so a
//! caller (human or program) can correct the request without guessing.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::errors::{CalcError, CalcResult};
//!
//! fn validate_probability(p: f64) -> CalcResult<()> {
//!     if !(p > 0.0 && p < 1.0) {
//!         return Err(CalcError::InvalidInput {
//!             field: "probability".to_string(),
//!             value: p.to_string(),
//!             reason: "Probability must lie strictly between 0 and 1".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_probability(0.02).is_ok());
//! assert!(validate_probability(1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wind_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for wind action calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value lies outside the domain admitted by the standard
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A calculation produced a value that cannot be reported (NaN, infinite)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization_error(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization_error(err.to_string())
    }
}
