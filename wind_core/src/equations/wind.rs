//! # Wind Action Formulas
//!
//! The five formulas of the peak velocity pressure chain, SANS 10160-3:2011
//! clause 7. Each function is pure; the only state is the static tables below.
//!
//! ## Notation
//!
//! - `ρ` = Air density (kg/m³)
//! - `v_b,0` = Fundamental basic wind speed (m/s)
//! - `p` = Annual probability of exceedance
//! - `c_prob` = Probability factor
//! - `v_b` = Basic wind speed (m/s)
//! - `z` = Height above terrain (m)
//! - `c_r(z)` = Terrain roughness factor
//! - `c_o(z)` = Topography factor
//! - `v_p(z)` = Peak wind speed (m/s)
//! - `q_p(z)` = Peak wind speed pressure (Pa)
//!
//! ## Dependency Chain
//!
//! ```text
//! q_p ── ρ(altitude)
//!     └─ v_p ── v_b(v_b,0, p)
//!            └─ c_r(z, category)
//! ```
//!
//! ## References
//!
//! - SANS 10160-3:2011 Section 7.2.2 (basic wind speed)
//! - SANS 10160-3:2011 Section 7.3 (peak wind speed, roughness)
//! - SANS 10160-3:2011 Section 7.4 (peak wind speed pressure, air density)

use serde::{Deserialize, Serialize};

use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::wind_params::{sans_ref, FundamentalBasicWindSpeed, TerrainCategory};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Air density breakpoints: (altitude above sea level in m, ρ in kg/m³)
pub const AIR_DENSITY_TABLE: [(u32, f64); 5] = [
    (0, 1.20),
    (500, 1.12),
    (1000, 1.06),
    (1500, 1.00),
    (2000, 0.94),
];

/// Shape parameter K of the probability factor
pub const PROBABILITY_SHAPE_K: f64 = 0.2;

/// Exponent n of the probability factor
pub const PROBABILITY_EXPONENT_N: f64 = 0.5;

/// Annual exceedance probability the wind map is drawn for (50 year return)
pub const REFERENCE_PROBABILITY: f64 = 0.02;

/// Converts the mean basic wind speed to the peak (gust) basic wind speed
pub const PEAK_GUST_FACTOR: f64 = 1.4;

/// Leading coefficient of the roughness power law
pub const ROUGHNESS_COEFFICIENT: f64 = 1.36;

// =============================================================================
// AIR DENSITY
// =============================================================================

/// Air density at a site altitude.
///
/// Linear interpolation between the [`AIR_DENSITY_TABLE`] breakpoints. Each
/// band is `(lo, hi]`, so a breakpoint altitude is evaluated by the band
/// ending there:
///
/// ```text
/// m = (ρ2 - ρ1) / (x2 - x1)
/// ρ = m·x + (ρ1 - m·x1)
/// ```
///
/// Above 2000 m the density stays at 0.94 kg/m³ (no extrapolation).
///
/// # Example
/// ```rust
/// use wind_core::equations::wind::air_density;
///
/// assert_eq!(air_density(0), 1.20);
/// assert!((air_density(750) - 1.09).abs() < 1e-12);
/// assert_eq!(air_density(3000), 0.94);
/// ```
///
/// # Reference
/// SANS 10160-3 7.4
pub fn air_density(altitude_m: u32) -> f64 {
    let (base_altitude, base_density) = AIR_DENSITY_TABLE[0];
    if altitude_m == base_altitude {
        return base_density;
    }

    for band in AIR_DENSITY_TABLE.windows(2) {
        let (x1, y1) = band[0];
        let (x2, y2) = band[1];
        if altitude_m > x1 && altitude_m <= x2 {
            let slope = (y2 - y1) / f64::from(x2 - x1);
            return slope * f64::from(altitude_m) + (y1 - slope * f64::from(x1));
        }
    }

    let (_, capped_density) = AIR_DENSITY_TABLE[AIR_DENSITY_TABLE.len() - 1];
    capped_density
}

// =============================================================================
// BASIC WIND SPEED
// =============================================================================

/// Probability factor c_prob for a given annual probability of exceedance.
///
/// # Formula (SANS 10160-3 7.2.2)
/// ```text
/// c_prob = ( (1 - K·ln(-ln(1 - p))) / (1 - K·ln(-ln(0.98))) )^n
/// ```
/// with K = 0.2 and n = 0.5. c_prob is 1.0 at p = 0.02.
///
/// # Errors
/// `InvalidInput` unless `0 < p < 1`. A probability so close to zero that
/// `1 - p` rounds to 1 yields `CalculationFailed`.
pub fn probability_factor(probability: f64) -> CalcResult<f64> {
    if !(probability > 0.0 && probability < 1.0) {
        return Err(CalcError::invalid_input(
            "probability",
            probability.to_string(),
            "Probability of exceedance must lie strictly between 0 and 1",
        ));
    }

    let numerator = 1.0 - PROBABILITY_SHAPE_K * (-(1.0 - probability).ln()).ln();
    let denominator = 1.0 - PROBABILITY_SHAPE_K * (-(1.0 - REFERENCE_PROBABILITY).ln()).ln();
    let c_prob = (numerator / denominator).powf(PROBABILITY_EXPONENT_N);

    if !c_prob.is_finite() {
        return Err(CalcError::calculation_failed(
            "probability factor",
            format!("c_prob is not finite for p = {}", probability),
        ));
    }
    Ok(c_prob)
}

/// Basic wind speed v_b = c_prob × v_b,0 (m/s).
///
/// # Example
/// ```rust
/// use wind_core::equations::wind::basic_wind_speed;
/// use wind_core::wind_params::FundamentalBasicWindSpeed;
///
/// // At the map's own probability the speed is unchanged
/// let vb = basic_wind_speed(FundamentalBasicWindSpeed::V32, 0.02).unwrap();
/// assert!((vb - 32.0).abs() < 1e-12);
///
/// // A rarer event gives a higher design speed
/// let vb_rare = basic_wind_speed(FundamentalBasicWindSpeed::V32, 0.01).unwrap();
/// assert!(vb_rare > 32.0);
/// ```
///
/// # Reference
/// SANS 10160-3 7.2.2
pub fn basic_wind_speed(fundamental: FundamentalBasicWindSpeed, probability: f64) -> CalcResult<f64> {
    Ok(probability_factor(probability)? * fundamental.value())
}

// =============================================================================
// TERRAIN ROUGHNESS
// =============================================================================

/// Terrain roughness factor c_r(z).
///
/// # Formula (SANS 10160-3 7.3.2)
/// ```text
/// c_r(z) = 1.36 × ( (z - z0) / (zg - zc) )^α
/// ```
/// with z0, zg, zc and α taken from [`TerrainCategory::parameters`].
///
/// # Errors
/// `InvalidInput` when `height_m` is below the category's minimum height zc.
///
/// # Example
/// ```rust
/// use wind_core::equations::wind::terrain_roughness;
/// use wind_core::wind_params::TerrainCategory;
///
/// let cr = terrain_roughness(12, TerrainCategory::A).unwrap();
/// assert!((cr - 1.0999).abs() < 1e-4);
///
/// // Category D requires z >= 10 m
/// assert!(terrain_roughness(5, TerrainCategory::D).is_err());
/// ```
pub fn terrain_roughness(height_m: i32, category: TerrainCategory) -> CalcResult<f64> {
    let params = category.parameters();
    if height_m < params.zc_m {
        return Err(CalcError::invalid_input(
            "height_m",
            height_m.to_string(),
            format!(
                "Height must be at least z_c = {} m for terrain category {} ({})",
                params.zc_m,
                category,
                sans_ref::TERRAIN_ROUGHNESS
            ),
        ));
    }

    let ratio = f64::from(height_m - params.z0_m) / f64::from(params.zg_m - params.zc_m);
    Ok(ROUGHNESS_COEFFICIENT * ratio.powf(params.exponent))
}

// =============================================================================
// PEAK WIND SPEED
// =============================================================================

/// Intermediate values of the peak wind speed chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakWindSpeedBreakdown {
    /// Probability factor c_prob
    pub probability_factor: f64,
    /// Basic wind speed v_b (m/s)
    pub basic_wind_speed_m_s: f64,
    /// Peak basic wind speed v_b,peak = 1.4 × v_b (m/s)
    pub peak_basic_wind_speed_m_s: f64,
    /// Terrain roughness factor c_r(z)
    pub roughness_factor: f64,
    /// Peak wind speed v_p(z) (m/s)
    pub peak_wind_speed_m_s: f64,
}

/// Peak wind speed v_p(z) with every intermediate value.
///
/// Each equation is recorded in `tracker` once it has been evaluated;
/// on error the tracker holds the equations that succeeded before it.
///
/// # Formula (SANS 10160-3 7.3)
/// ```text
/// v_b,peak = 1.4 × v_b
/// v_p(z)   = v_b,peak × c_r(z) × c_o(z)
/// ```
///
/// The topography factor is taken as given.
pub fn peak_wind_speed_breakdown(
    fundamental: FundamentalBasicWindSpeed,
    probability: f64,
    height_m: i32,
    category: TerrainCategory,
    topography_factor: f64,
    tracker: &mut EquationTracker,
) -> CalcResult<PeakWindSpeedBreakdown> {
    let c_prob = probability_factor(probability)?;
    tracker.record(Equation::ProbabilityFactor);

    let basic = basic_wind_speed(fundamental, probability)?;
    tracker.record(Equation::BasicWindSpeed);

    let roughness = terrain_roughness(height_m, category)?;
    tracker.record(Equation::TerrainRoughness);

    let peak_basic = PEAK_GUST_FACTOR * basic;
    let peak = peak_basic * roughness * topography_factor;
    tracker.record(Equation::PeakWindSpeed);

    Ok(PeakWindSpeedBreakdown {
        probability_factor: c_prob,
        basic_wind_speed_m_s: basic,
        peak_basic_wind_speed_m_s: peak_basic,
        roughness_factor: roughness,
        peak_wind_speed_m_s: peak,
    })
}

/// Peak wind speed v_p(z) (m/s).
///
/// See [`peak_wind_speed_breakdown`] for the formula and the intermediate values.
///
/// # Example
/// ```rust
/// use wind_core::equations::wind::peak_wind_speed;
/// use wind_core::wind_params::{FundamentalBasicWindSpeed, TerrainCategory};
///
/// let vp = peak_wind_speed(FundamentalBasicWindSpeed::V28, 0.02, 12, TerrainCategory::A, 1.0).unwrap();
/// assert!((vp - 43.1155).abs() < 1e-4);
/// ```
pub fn peak_wind_speed(
    fundamental: FundamentalBasicWindSpeed,
    probability: f64,
    height_m: i32,
    category: TerrainCategory,
    topography_factor: f64,
) -> CalcResult<f64> {
    let mut tracker = EquationTracker::new();
    peak_wind_speed_breakdown(fundamental, probability, height_m, category, topography_factor, &mut tracker)
        .map(|breakdown| breakdown.peak_wind_speed_m_s)
}

// =============================================================================
// PEAK WIND SPEED PRESSURE
// =============================================================================

/// Dynamic pressure of the peak wind speed, q_p = ½·ρ·v_p² (Pa).
///
/// # Reference
/// SANS 10160-3 7.4
#[inline]
pub fn peak_velocity_pressure(air_density_kg_m3: f64, peak_wind_speed_m_s: f64) -> f64 {
    0.5 * air_density_kg_m3 * peak_wind_speed_m_s.powi(2)
}
