//! # Wind Action Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, with documented defaults)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`wind_action`] - Peak wind speed pressure q_p(z) per SANS 10160-3 7.4

pub mod wind_action;

// Re-export commonly used types
pub use wind_action::{calculate, peak_wind_speed_pressure, WindActionInput, WindActionResult};
