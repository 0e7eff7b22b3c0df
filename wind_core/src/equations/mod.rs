//! # Wind Action Equations
//!
//! All formulas used by the calculations live here, in one place, so they
//! can be checked line by line against SANS 10160-3:2011.
//!
//! ## Modules
//!
//! - [`wind`] - Air density, probability factor, roughness, peak speed and pressure
//! - [`registry`] - Equation metadata for audit trails and reports
//!
//! ## Units
//!
//! SI throughout: metres, metres per second, kg/m³ and pascals. No unit
//! conversion is performed anywhere in the crate.

pub mod registry;
pub mod wind;

pub use wind::{
    air_density,
    basic_wind_speed,
    peak_velocity_pressure,
    peak_wind_speed,
    peak_wind_speed_breakdown,
    probability_factor,
    terrain_roughness,
    PeakWindSpeedBreakdown,
};

pub use registry::{generate_equations_markdown, Equation, EquationMetadata, EquationTracker, Variable};
