//! # Wind Parameters
//!
//! Enumerated inputs for wind action design per SANS 10160-3:2011.
//!
//! ## Overview
//!
//! Two inputs of the peak velocity pressure chain are closed enumerations
//! fixed by the standard:
//!
//! | Input                         | Admissible values | Clause          |
//! |-------------------------------|-------------------|-----------------|
//! | Fundamental basic wind speed  | 28, 32, 36 m/s    | 7.2, Figure 1   |
//! | Terrain category              | A, B, C, D        | 7.3.2.1         |
//!
//! Raw integers and characters are parsed into [`FundamentalBasicWindSpeed`]
//! and [`TerrainCategory`] once, at the boundary. Downstream formulas take the
//! typed values, so an unrecognized code can never reach the roughness table.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::wind_params::{validate_basic_wind_speed, validate_terrain_category};
//!
//! let speed = validate_basic_wind_speed(32).unwrap();
//! assert_eq!(speed.m_per_s(), 32);
//!
//! let terrain = validate_terrain_category('C').unwrap();
//! assert_eq!(terrain.parameters().zg_m, 350);
//!
//! assert!(validate_basic_wind_speed(30).is_err());
//! assert!(validate_terrain_category('E').is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// SANS Clause References
// ============================================================================

/// SANS 10160-3:2011 clause references for every step of the calculation.
pub mod sans_ref {
    /// Fundamental basic wind speed map
    pub const FUNDAMENTAL_BASIC_WIND_SPEED: &str = "SANS 10160-3 7.2, Figure 1";
    /// Probability factor and basic wind speed
    pub const BASIC_WIND_SPEED: &str = "SANS 10160-3 7.2.2";
    /// Peak wind speed
    pub const PEAK_WIND_SPEED: &str = "SANS 10160-3 7.3";
    /// Terrain roughness factor
    pub const TERRAIN_ROUGHNESS: &str = "SANS 10160-3 7.3.2";
    /// Terrain categories
    pub const TERRAIN_CATEGORY: &str = "SANS 10160-3 7.3.2.1";
    /// Peak wind speed pressure
    pub const PEAK_VELOCITY_PRESSURE: &str = "SANS 10160-3 7.4";
    /// Air density table
    pub const AIR_DENSITY: &str = "SANS 10160-3 7.4";
}

// ============================================================================
// Fundamental Basic Wind Speed
// ============================================================================

/// Admissible fundamental basic wind speeds (m/s at 10 m above ground)
pub const BASIC_WIND_SPEEDS_M_S: [i32; 3] = [28, 32, 36];

/// Fundamental basic wind speed v_b,0 from the national wind map.
///
/// Serializes as the plain integer (`28`, `32`, `36`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum FundamentalBasicWindSpeed {
    /// 28 m/s
    #[default]
    V28,
    /// 32 m/s
    V32,
    /// 36 m/s
    V36,
}

impl FundamentalBasicWindSpeed {
    /// All variants for UI selection
    pub const ALL: [FundamentalBasicWindSpeed; 3] = [
        FundamentalBasicWindSpeed::V28,
        FundamentalBasicWindSpeed::V32,
        FundamentalBasicWindSpeed::V36,
    ];

    /// Speed in metres per second
    pub fn m_per_s(&self) -> i32 {
        match self {
            FundamentalBasicWindSpeed::V28 => 28,
            FundamentalBasicWindSpeed::V32 => 32,
            FundamentalBasicWindSpeed::V36 => 36,
        }
    }

    /// Speed in metres per second as f64
    pub fn value(&self) -> f64 {
        f64::from(self.m_per_s())
    }
}

impl TryFrom<i32> for FundamentalBasicWindSpeed {
    type Error = CalcError;

    fn try_from(speed: i32) -> Result<Self, Self::Error> {
        match speed {
            28 => Ok(FundamentalBasicWindSpeed::V28),
            32 => Ok(FundamentalBasicWindSpeed::V32),
            36 => Ok(FundamentalBasicWindSpeed::V36),
            other => Err(CalcError::invalid_input(
                "fundamental_basic_wind_speed",
                other.to_string(),
                format!(
                    "Fundamental basic wind speed must be one of {:?} m/s ({})",
                    BASIC_WIND_SPEEDS_M_S,
                    sans_ref::FUNDAMENTAL_BASIC_WIND_SPEED
                ),
            )),
        }
    }
}

impl From<FundamentalBasicWindSpeed> for i32 {
    fn from(speed: FundamentalBasicWindSpeed) -> Self {
        speed.m_per_s()
    }
}

impl std::fmt::Display for FundamentalBasicWindSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m/s", self.m_per_s())
    }
}

/// Check a raw fundamental basic wind speed against the wind map values.
///
/// Returns the typed speed, or `InvalidInput` when `speed` is not 28, 32 or 36.
pub fn validate_basic_wind_speed(speed: i32) -> CalcResult<FundamentalBasicWindSpeed> {
    FundamentalBasicWindSpeed::try_from(speed)
}

// ============================================================================
// Terrain Category
// ============================================================================

/// Admissible terrain category codes
pub const TERRAIN_CATEGORY_CODES: [char; 4] = ['A', 'B', 'C', 'D'];

/// Physical constants of a terrain category (SANS 10160-3 7.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParameters {
    /// Height of the reference plane z_0 (m)
    pub z0_m: i32,
    /// Gradient height z_g (m)
    pub zg_m: i32,
    /// Height below which no further reduction in wind speed is allowed z_c (m)
    pub zc_m: i32,
    /// Power-law exponent α
    pub exponent: f64,
}

const TERRAIN_A: TerrainParameters = TerrainParameters { z0_m: 0, zg_m: 250, zc_m: 1, exponent: 0.070 };
const TERRAIN_B: TerrainParameters = TerrainParameters { z0_m: 0, zg_m: 300, zc_m: 2, exponent: 0.095 };
const TERRAIN_C: TerrainParameters = TerrainParameters { z0_m: 3, zg_m: 350, zc_m: 5, exponent: 0.120 };
const TERRAIN_D: TerrainParameters = TerrainParameters { z0_m: 5, zg_m: 400, zc_m: 10, exponent: 0.150 };

/// Terrain roughness category per SANS 10160-3 7.3.2.1.
///
/// Serializes as its single-letter code (`"A"` .. `"D"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "char", into = "char")]
pub enum TerrainCategory {
    /// A - Flat, open terrain with negligible vegetation (sea coast, open lakeshore)
    #[default]
    A,
    /// B - Farmland with scattered trees and hedges
    B,
    /// C - Suburban, industrial or permanent forest areas
    C,
    /// D - Urban areas with densely spaced tall buildings
    D,
}

impl TerrainCategory {
    /// All categories in standard order
    pub const ALL: [TerrainCategory; 4] = [
        TerrainCategory::A,
        TerrainCategory::B,
        TerrainCategory::C,
        TerrainCategory::D,
    ];

    /// Single-letter code
    pub fn code(&self) -> char {
        match self {
            TerrainCategory::A => 'A',
            TerrainCategory::B => 'B',
            TerrainCategory::C => 'C',
            TerrainCategory::D => 'D',
        }
    }

    /// Roughness constants for this category
    pub fn parameters(&self) -> TerrainParameters {
        match self {
            TerrainCategory::A => TERRAIN_A,
            TerrainCategory::B => TERRAIN_B,
            TerrainCategory::C => TERRAIN_C,
            TerrainCategory::D => TERRAIN_D,
        }
    }
}

impl TryFrom<char> for TerrainCategory {
    type Error = CalcError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'A' => Ok(TerrainCategory::A),
            'B' => Ok(TerrainCategory::B),
            'C' => Ok(TerrainCategory::C),
            'D' => Ok(TerrainCategory::D),
            other => Err(CalcError::invalid_input(
                "terrain_category",
                other.to_string(),
                format!(
                    "Terrain category must be one of {:?} ({})",
                    TERRAIN_CATEGORY_CODES,
                    sans_ref::TERRAIN_CATEGORY
                ),
            )),
        }
    }
}

impl From<TerrainCategory> for char {
    fn from(category: TerrainCategory) -> Self {
        category.code()
    }
}

impl std::fmt::Display for TerrainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Check a raw terrain category code.
///
/// Codes are case-sensitive: only `'A'`, `'B'`, `'C'` and `'D'` are accepted.
pub fn validate_terrain_category(code: char) -> CalcResult<TerrainCategory> {
    TerrainCategory::try_from(code)
}
