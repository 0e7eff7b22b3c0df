//! # Peak Wind Speed Pressure Calculation
//!
//! Computes the peak wind speed pressure q_p(z) for a site per
//! SANS 10160-3:2011 clause 7.4, together with every intermediate value of
//! the chain (air density, probability factor, basic and peak wind speeds,
//! roughness factor).
//!
//! ## Inputs and Defaults
//!
//! | Field                          | Default | Domain                     |
//! |--------------------------------|---------|----------------------------|
//! | `altitude_m`                   | 0       | ≥ 0                        |
//! | `fundamental_basic_wind_speed` | 28      | 28, 32, 36 m/s             |
//! | `probability`                  | 0.02    | 0 < p < 1                  |
//! | `height_m`                     | 1       | ≥ z_c of terrain category  |
//! | `terrain_category`             | A       | A, B, C, D                 |
//! | `topography_factor`            | 1.0     | finite, > 0                |
//!
//! ## Example
//!
//! ```rust
//! use wind_core::calculations::wind_action::{calculate, WindActionInput};
//! use wind_core::wind_params::TerrainCategory;
//!
//! let input = WindActionInput::default()
//!     .with_altitude_m(1500)
//!     .with_height_m(12)
//!     .with_terrain_category(TerrainCategory::A);
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.peak_velocity_pressure_pa - 929.474_374_812_1).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::wind::{air_density, peak_velocity_pressure, peak_wind_speed_breakdown};
use crate::errors::{CalcError, CalcResult};
use crate::wind_params::{
    validate_basic_wind_speed, validate_terrain_category, FundamentalBasicWindSpeed, TerrainCategory,
    TerrainParameters,
};

/// Input parameters for a peak wind speed pressure calculation.
///
/// Missing JSON fields take the documented defaults.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Roof level",
///   "altitude_m": 1500,
///   "fundamental_basic_wind_speed": 28,
///   "probability": 0.02,
///   "height_m": 12,
///   "terrain_category": "A",
///   "topography_factor": 1.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindActionInput {
    /// User label for this calculation (e.g., "Roof level", "Sign board")
    pub label: String,

    /// Site altitude above sea level (m)
    pub altitude_m: u32,

    /// Fundamental basic wind speed v_b,0 from the wind map (m/s)
    pub fundamental_basic_wind_speed: FundamentalBasicWindSpeed,

    /// Annual probability of exceedance (0.02 = 50 year return period)
    pub probability: f64,

    /// Height above terrain (m)
    pub height_m: i32,

    /// Terrain roughness category
    pub terrain_category: TerrainCategory,

    /// Topography factor c_o(z) (1.0 = flat terrain)
    pub topography_factor: f64,
}

impl Default for WindActionInput {
    fn default() -> Self {
        WindActionInput {
            label: String::new(),
            altitude_m: 0,
            fundamental_basic_wind_speed: FundamentalBasicWindSpeed::V28,
            probability: 0.02,
            height_m: 1,
            terrain_category: TerrainCategory::A,
            topography_factor: 1.0,
        }
    }
}

impl WindActionInput {
    /// Parse input from JSON; absent fields fall back to the defaults.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_altitude_m(mut self, altitude_m: u32) -> Self {
        self.altitude_m = altitude_m;
        self
    }

    pub fn with_fundamental_basic_wind_speed(mut self, speed: FundamentalBasicWindSpeed) -> Self {
        self.fundamental_basic_wind_speed = speed;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_height_m(mut self, height_m: i32) -> Self {
        self.height_m = height_m;
        self
    }

    pub fn with_terrain_category(mut self, category: TerrainCategory) -> Self {
        self.terrain_category = category;
        self
    }

    pub fn with_topography_factor(mut self, factor: f64) -> Self {
        self.topography_factor = factor;
        self
    }

    /// Validate input parameters.
    ///
    /// Wind speed and terrain category are valid by construction. Probability
    /// and height are checked by the formulas that consume them; this covers
    /// the topography factor, which the formulas take as given.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.topography_factor.is_finite() || self.topography_factor <= 0.0 {
            return Err(CalcError::invalid_input(
                "topography_factor",
                self.topography_factor.to_string(),
                "Topography factor must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Results from a peak wind speed pressure calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "air_density_kg_m3": 1.0,
///   "probability_factor": 1.0,
///   "basic_wind_speed_m_s": 28.0,
///   "peak_basic_wind_speed_m_s": 39.2,
///   "roughness_factor": 1.0999,
///   "peak_wind_speed_m_s": 43.116,
///   "peak_velocity_pressure_pa": 929.47
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindActionResult {
    /// Air density ρ at the site altitude (kg/m³)
    pub air_density_kg_m3: f64,

    /// Probability factor c_prob
    pub probability_factor: f64,

    /// Basic wind speed v_b = c_prob × v_b,0 (m/s)
    pub basic_wind_speed_m_s: f64,

    /// Peak basic wind speed v_b,peak = 1.4 × v_b (m/s)
    pub peak_basic_wind_speed_m_s: f64,

    /// Terrain roughness factor c_r(z)
    pub roughness_factor: f64,

    /// Peak wind speed v_p(z) (m/s)
    pub peak_wind_speed_m_s: f64,

    /// Peak wind speed pressure q_p(z) (Pa)
    pub peak_velocity_pressure_pa: f64,

    /// Constants of the terrain category used
    pub terrain: TerrainParameters,

    /// Equations evaluated, in order
    pub equations_used: Vec<Equation>,
}

impl WindActionResult {
    /// Peak wind speed pressure in kPa
    pub fn peak_velocity_pressure_kpa(&self) -> f64 {
        self.peak_velocity_pressure_pa / 1000.0
    }
}

/// Calculate the peak wind speed pressure and its intermediate values.
///
/// # Returns
///
/// * `Ok(WindActionResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are outside the standard's domain
pub fn calculate(input: &WindActionInput) -> CalcResult<WindActionResult> {
    match evaluate(input) {
        Ok(result) => Ok(result),
        Err(err) => {
            warn!(label = %input.label, error = %err, "rejected wind action input");
            Err(err)
        }
    }
}

fn evaluate(input: &WindActionInput) -> CalcResult<WindActionResult> {
    input.validate()?;

    let mut tracker = EquationTracker::new();

    let density = air_density(input.altitude_m);
    tracker.record(Equation::AirDensity);

    let speed = peak_wind_speed_breakdown(
        input.fundamental_basic_wind_speed,
        input.probability,
        input.height_m,
        input.terrain_category,
        input.topography_factor,
        &mut tracker,
    )?;

    let pressure = peak_velocity_pressure(density, speed.peak_wind_speed_m_s);
    tracker.record(Equation::PeakVelocityPressure);

    if !pressure.is_finite() {
        return Err(CalcError::calculation_failed(
            "peak wind speed pressure",
            format!("q_p is not finite ({})", pressure),
        ));
    }

    debug!(
        label = %input.label,
        air_density = density,
        c_prob = speed.probability_factor,
        basic_speed = speed.basic_wind_speed_m_s,
        roughness = speed.roughness_factor,
        peak_speed = speed.peak_wind_speed_m_s,
        pressure,
        "peak wind speed pressure computed"
    );

    Ok(WindActionResult {
        air_density_kg_m3: density,
        probability_factor: speed.probability_factor,
        basic_wind_speed_m_s: speed.basic_wind_speed_m_s,
        peak_basic_wind_speed_m_s: speed.peak_basic_wind_speed_m_s,
        roughness_factor: speed.roughness_factor,
        peak_wind_speed_m_s: speed.peak_wind_speed_m_s,
        peak_velocity_pressure_pa: pressure,
        terrain: input.terrain_category.parameters(),
        equations_used: tracker.into_equations(),
    })
}

/// Peak wind speed pressure q_p(z) in Pa from raw parameters.
///
/// Validates the fundamental basic wind speed first, then the terrain
/// category; either failure aborts the calculation with `InvalidInput`.
/// Invalid input never yields a numeric result.
///
/// # Example
/// ```rust
/// use wind_core::peak_wind_speed_pressure;
///
/// let qp = peak_wind_speed_pressure(1500, 28, 0.02, 12, 'A', 1.0).unwrap();
/// assert!((qp - 929.474_374_812_1).abs() < 1e-6);
///
/// assert!(peak_wind_speed_pressure(1500, 30, 0.02, 12, 'A', 1.0).is_err());
/// ```
pub fn peak_wind_speed_pressure(
    altitude_m: u32,
    fundamental_basic_wind_speed: i32,
    probability: f64,
    height_m: i32,
    terrain_category: char,
    topography_factor: f64,
) -> CalcResult<f64> {
    let input = WindActionInput {
        label: String::new(),
        altitude_m,
        fundamental_basic_wind_speed: validate_basic_wind_speed(fundamental_basic_wind_speed)?,
        probability,
        height_m,
        terrain_category: validate_terrain_category(terrain_category)?,
        topography_factor,
    };
    calculate(&input).map(|result| result.peak_velocity_pressure_pa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::wind::{peak_wind_speed, probability_factor, terrain_roughness};

    fn test_input() -> WindActionInput {
        WindActionInput::default()
            .with_label("Test Site")
            .with_altitude_m(1500)
            .with_height_m(12)
    }

    #[test]
    fn test_regression_value() {
        let qp = peak_wind_speed_pressure(1500, 28, 0.02, 12, 'A', 1.0).unwrap();
        assert_eq!(qp, 929.47437481210955);
    }

    #[test]
    fn test_intermediate_values() {
        let result = calculate(&test_input()).unwrap();

        assert!((result.air_density_kg_m3 - 1.0).abs() < 1e-12);
        assert!((result.probability_factor - 1.0).abs() < 1e-12);
        assert!((result.basic_wind_speed_m_s - 28.0).abs() < 1e-9);
        assert!((result.peak_basic_wind_speed_m_s - 39.2).abs() < 1e-9);
        assert!((result.roughness_factor - 1.099886).abs() < 1e-6);
        assert!((result.peak_wind_speed_m_s - 43.115528).abs() < 1e-6);
        assert!((result.peak_velocity_pressure_kpa() - 0.929474).abs() < 1e-6);
        assert_eq!(result.terrain, TerrainCategory::A.parameters());
        assert_eq!(
            result.equations_used,
            vec![
                Equation::AirDensity,
                Equation::ProbabilityFactor,
                Equation::BasicWindSpeed,
                Equation::TerrainRoughness,
                Equation::PeakWindSpeed,
                Equation::PeakVelocityPressure,
            ]
        );
    }

    #[test]
    fn test_matches_formula_chain() {
        let input = test_input()
            .with_fundamental_basic_wind_speed(FundamentalBasicWindSpeed::V36)
            .with_terrain_category(TerrainCategory::C)
            .with_height_m(20)
            .with_topography_factor(1.1);
        let result = calculate(&input).unwrap();

        let vp = peak_wind_speed(
            input.fundamental_basic_wind_speed,
            input.probability,
            input.height_m,
            input.terrain_category,
            input.topography_factor,
        )
        .unwrap();
        assert!((result.peak_wind_speed_m_s - vp).abs() < 1e-12);
    }

    #[test]
    fn test_defaults() {
        let input = WindActionInput::default();
        assert_eq!(input.altitude_m, 0);
        assert_eq!(input.fundamental_basic_wind_speed, FundamentalBasicWindSpeed::V28);
        assert_eq!(input.probability, 0.02);
        assert_eq!(input.height_m, 1);
        assert_eq!(input.terrain_category, TerrainCategory::A);
        assert_eq!(input.topography_factor, 1.0);

        // ½ × 1.2 × (39.2 × 1.36 × (1/249)^0.07)² = 787.65 Pa
        let result = calculate(&input).unwrap();
        assert!((result.peak_velocity_pressure_pa - 787.650028).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_wind_speed() {
        let err = peak_wind_speed_pressure(1500, 30, 0.02, 12, 'A', 1.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "fundamental_basic_wind_speed"));
    }

    #[test]
    fn test_invalid_terrain_category() {
        let err = peak_wind_speed_pressure(1500, 28, 0.02, 12, 'E', 1.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "terrain_category"));
    }

    #[test]
    fn test_wind_speed_checked_before_terrain() {
        let err = peak_wind_speed_pressure(0, 30, 0.02, 12, 'E', 1.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "fundamental_basic_wind_speed"));
    }

    #[test]
    fn test_invalid_continuous_inputs() {
        assert!(peak_wind_speed_pressure(0, 28, 0.0, 12, 'A', 1.0).is_err());
        assert!(peak_wind_speed_pressure(0, 28, 1.0, 12, 'A', 1.0).is_err());
        assert!(peak_wind_speed_pressure(0, 28, 0.02, 9, 'D', 1.0).is_err());
        assert!(peak_wind_speed_pressure(0, 28, 0.02, 12, 'A', 0.0).is_err());
        assert!(peak_wind_speed_pressure(0, 28, 0.02, 12, 'A', -1.0).is_err());
        assert!(peak_wind_speed_pressure(0, 28, 0.02, 12, 'A', f64::INFINITY).is_err());

        let err = calculate(&test_input().with_height_m(0)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "height_m"));
    }

    #[test]
    fn test_domain_errors_come_from_formulas() {
        let input = test_input().with_terrain_category(TerrainCategory::D).with_height_m(9);
        assert_eq!(
            calculate(&input).unwrap_err(),
            terrain_roughness(9, TerrainCategory::D).unwrap_err()
        );

        let input = test_input().with_probability(1.0);
        assert_eq!(calculate(&input).unwrap_err(), probability_factor(1.0).unwrap_err());

        // Topography is checked before the chain runs
        let input = test_input().with_probability(1.0).with_topography_factor(0.0);
        assert!(matches!(calculate(&input).unwrap_err(),
            CalcError::InvalidInput { ref field, .. } if field == "topography_factor"));
    }

    #[test]
    fn test_topography_scaling() {
        let base = peak_wind_speed_pressure(800, 32, 0.02, 15, 'B', 1.0).unwrap();
        let doubled = peak_wind_speed_pressure(800, 32, 0.02, 15, 'B', 2.0).unwrap();
        assert_eq!(doubled, base * 4.0);
    }

    #[test]
    fn test_pressure_increases_with_height() {
        let low = peak_wind_speed_pressure(0, 32, 0.02, 10, 'D', 1.0).unwrap();
        let high = peak_wind_speed_pressure(0, 32, 0.02, 50, 'D', 1.0).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_pressure_decreases_with_altitude() {
        let coast = peak_wind_speed_pressure(0, 28, 0.02, 12, 'A', 1.0).unwrap();
        let highveld = peak_wind_speed_pressure(1750, 28, 0.02, 12, 'A', 1.0).unwrap();
        assert!(highveld < coast);
        assert!((highveld / coast - 0.97 / 1.20).abs() < 1e-9);
    }

    #[test]
    fn test_from_json_partial() {
        let input = WindActionInput::from_json(r#"{"altitude_m": 1500, "height_m": 12}"#).unwrap();
        assert_eq!(input.fundamental_basic_wind_speed, FundamentalBasicWindSpeed::V28);
        assert_eq!(input.terrain_category, TerrainCategory::A);

        let result = calculate(&input).unwrap();
        assert_eq!(result.peak_velocity_pressure_pa, 929.47437481210955);
    }

    #[test]
    fn test_from_json_rejects_out_of_domain() {
        let err = WindActionInput::from_json(r#"{"fundamental_basic_wind_speed": 30}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        assert!(WindActionInput::from_json(r#"{"terrain_category": "E"}"#).is_err());
        assert!(WindActionInput::from_json(r#"{"altitude_m": -10}"#).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = test_input().with_terrain_category(TerrainCategory::D).with_height_m(25);
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"terrain_category\": \"D\""));
        let roundtrip: WindActionInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }

    #[test]
    fn test_concurrent_callers_agree() {
        let expected = peak_wind_speed_pressure(1500, 28, 0.02, 12, 'A', 1.0).unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| peak_wind_speed_pressure(1500, 28, 0.02, 12, 'A', 1.0).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&test_input()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("peak_velocity_pressure_pa"));
        assert!(json.contains("\"equations_used\":[\"AirDensity\""));
    }
}
