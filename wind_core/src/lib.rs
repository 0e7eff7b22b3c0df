//! # wind_core - Wind Action Calculation Engine
//!
//! `wind_core` computes wind-load design parameters per SANS 10160-3:2011:
//! peak wind speed pressure, peak wind speed, terrain roughness factor, air
//! density and the probability-adjusted basic wind speed.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Typed domains**: Wind speeds and terrain categories are enums, parsed once
//! - **Rich Errors**: Out-of-domain input is a structured error, never a 0.0 sentinel
//! - **JSON-First**: Inputs, results and errors implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use wind_core::peak_wind_speed_pressure;
//!
//! // Altitude 1500 m, v_b,0 = 28 m/s, p = 0.02, z = 12 m, terrain A, flat
//! let qp = peak_wind_speed_pressure(1500, 28, 0.02, 12, 'A', 1.0).unwrap();
//! assert!((qp - 929.47).abs() < 0.01);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Peak wind speed pressure entry points
//! - [`equations`] - The individual formulas and their metadata
//! - [`wind_params`] - Validated wind speed and terrain category types
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod wind_params;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, peak_wind_speed_pressure, WindActionInput, WindActionResult};
pub use errors::{CalcError, CalcResult};
pub use wind_params::{
    validate_basic_wind_speed, validate_terrain_category, FundamentalBasicWindSpeed, TerrainCategory,
    TerrainParameters,
};
