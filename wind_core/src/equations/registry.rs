//! # Equation Registry
//!
//! Metadata for every formula of the wind action chain: name, plain-text
//! formula, SANS clause, variables and the function implementing it.
//! Results carry the list of equations they used, so a report can cite
//! exactly what was evaluated.
//!
//! ## Usage
//!
//! ```rust
//! use wind_core::equations::registry::Equation;
//!
//! let meta = Equation::TerrainRoughness.metadata();
//! assert_eq!(meta.reference, "SANS 10160-3 7.3.2");
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

use crate::wind_params::sans_ref;

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "ρ", "z", "v_b")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "m", "m/s", "Pa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// SANS 10160-3 clause
    pub reference: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas of the peak wind speed pressure chain, leaves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// ρ by linear interpolation on altitude
    AirDensity,
    /// c_prob = ((1 - K ln(-ln(1-p))) / (1 - K ln(-ln 0.98)))^n
    ProbabilityFactor,
    /// v_b = c_prob × v_b,0
    BasicWindSpeed,
    /// c_r(z) = 1.36 ((z - z0) / (zg - zc))^α
    TerrainRoughness,
    /// v_p(z) = 1.4 v_b × c_r(z) × c_o(z)
    PeakWindSpeed,
    /// q_p(z) = ½ ρ v_p²(z)
    PeakVelocityPressure,
}

impl Equation {
    /// Every equation in evaluation order
    pub const ALL: [Equation; 6] = [
        Equation::AirDensity,
        Equation::ProbabilityFactor,
        Equation::BasicWindSpeed,
        Equation::TerrainRoughness,
        Equation::PeakWindSpeed,
        Equation::PeakVelocityPressure,
    ];

    /// Full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::AirDensity => EquationMetadata {
                name: "Air Density",
                description: "Density of air at the site altitude, interpolated between tabulated values.",
                formula_plain: "ρ = m·x + (ρ1 - m·x1), m = (ρ2 - ρ1)/(x2 - x1)",
                reference: sans_ref::AIR_DENSITY,
                variables: vec![
                    Variable::new("x", "Altitude above sea level", "m"),
                    Variable::new("ρ", "Air density", "kg/m³"),
                ],
                assumptions: vec![
                    "Breakpoints 0/500/1000/1500/2000 m → 1.20/1.12/1.06/1.00/0.94 kg/m³",
                    "ρ = 0.94 kg/m³ above 2000 m",
                ],
                source_function: "equations::wind::air_density",
            },
            Equation::ProbabilityFactor => EquationMetadata {
                name: "Probability Factor",
                description: "Adjusts the 50-year basic wind speed to another annual probability of exceedance.",
                formula_plain: "c_prob = ((1 - K·ln(-ln(1 - p))) / (1 - K·ln(-ln(0.98))))^n",
                reference: sans_ref::BASIC_WIND_SPEED,
                variables: vec![
                    Variable::new("p", "Annual probability of exceedance", "-"),
                    Variable::new("K", "Shape parameter (0.2)", "-"),
                    Variable::new("n", "Exponent (0.5)", "-"),
                ],
                assumptions: vec!["0 < p < 1", "c_prob = 1.0 at p = 0.02"],
                source_function: "equations::wind::probability_factor",
            },
            Equation::BasicWindSpeed => EquationMetadata {
                name: "Basic Wind Speed",
                description: "Fundamental basic wind speed from the wind map scaled by the probability factor.",
                formula_plain: "v_b = c_prob × v_b,0",
                reference: sans_ref::BASIC_WIND_SPEED,
                variables: vec![
                    Variable::new("v_b,0", "Fundamental basic wind speed (28, 32 or 36)", "m/s"),
                    Variable::new("v_b", "Basic wind speed", "m/s"),
                ],
                assumptions: vec![],
                source_function: "equations::wind::basic_wind_speed",
            },
            Equation::TerrainRoughness => EquationMetadata {
                name: "Terrain Roughness Factor",
                description: "Power-law variation of mean wind speed with height for the terrain category.",
                formula_plain: "c_r(z) = 1.36 × ((z - z0) / (zg - zc))^α",
                reference: sans_ref::TERRAIN_ROUGHNESS,
                variables: vec![
                    Variable::new("z", "Height above terrain", "m"),
                    Variable::new("z0", "Height of reference plane", "m"),
                    Variable::new("zg", "Gradient height", "m"),
                    Variable::new("zc", "Height below which no further reduction applies", "m"),
                    Variable::new("α", "Power-law exponent", "-"),
                ],
                assumptions: vec!["z ≥ zc", "Terrain category A, B, C or D"],
                source_function: "equations::wind::terrain_roughness",
            },
            Equation::PeakWindSpeed => EquationMetadata {
                name: "Peak Wind Speed",
                description: "Gust wind speed at height z including roughness and topography.",
                formula_plain: "v_p(z) = 1.4 × v_b × c_r(z) × c_o(z)",
                reference: sans_ref::PEAK_WIND_SPEED,
                variables: vec![
                    Variable::new("c_o(z)", "Topography factor (1.0 for flat terrain)", "-"),
                    Variable::new("v_p(z)", "Peak wind speed", "m/s"),
                ],
                assumptions: vec!["Peak-to-mean factor 1.4"],
                source_function: "equations::wind::peak_wind_speed",
            },
            Equation::PeakVelocityPressure => EquationMetadata {
                name: "Peak Wind Speed Pressure",
                description: "Dynamic pressure of the peak wind speed.",
                formula_plain: "q_p(z) = ½ × ρ × v_p²(z)",
                reference: sans_ref::PEAK_VELOCITY_PRESSURE,
                variables: vec![
                    Variable::new("ρ", "Air density", "kg/m³"),
                    Variable::new("q_p(z)", "Peak wind speed pressure", "Pa"),
                ],
                assumptions: vec![],
                source_function: "equations::wind::peak_velocity_pressure",
            },
        }
    }
}

// ============================================================================
// Equation Tracking
// ============================================================================

/// Records equations in the order a calculation evaluates them.
///
/// ```rust
/// use wind_core::equations::registry::{Equation, EquationTracker};
///
/// let mut tracker = EquationTracker::new();
/// tracker.record(Equation::AirDensity);
/// tracker.record(Equation::PeakVelocityPressure);
/// assert_eq!(tracker.equations(), &[Equation::AirDensity, Equation::PeakVelocityPressure]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquationTracker {
    equations: Vec<Equation>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was evaluated
    pub fn record(&mut self, equation: Equation) {
        self.equations.push(equation);
    }

    /// Equations recorded so far, in evaluation order
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Check if an equation has been recorded
    pub fn contains(&self, equation: Equation) -> bool {
        self.equations.contains(&equation)
    }

    pub fn into_equations(self) -> Vec<Equation> {
        self.equations
    }
}

/// Markdown reference of every equation, in evaluation order.
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(4_000);

    output.push_str("# Wind Action Equations Reference\n\n");
    output.push_str("Formulas used to compute the peak wind speed pressure per SANS 10160-3:2011.\n\n---\n\n");

    for equation in Equation::ALL {
        let meta = equation.metadata();

        output.push_str(&format!("## {}\n\n", meta.name));
        output.push_str(&format!("{}\n\n", meta.description));
        output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

        if !meta.variables.is_empty() {
            output.push_str("**Variables:**\n\n");
            output.push_str("| Symbol | Description | Units |\n");
            output.push_str("|--------|-------------|-------|\n");
            for var in &meta.variables {
                output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
            }
            output.push('\n');
        }

        if !meta.assumptions.is_empty() {
            output.push_str("**Assumptions:**\n\n");
            for assumption in &meta.assumptions {
                output.push_str(&format!("- {}\n", assumption));
            }
            output.push('\n');
        }

        output.push_str(&format!("**Reference:** {}\n\n", meta.reference));
        output.push_str(&format!("**Source:** `{}`\n\n---\n\n", meta.source_function));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        for equation in Equation::ALL {
            let meta = equation.metadata();
            assert!(!meta.name.is_empty(), "{:?}", equation);
            assert!(meta.reference.starts_with("SANS 10160-3"), "{:?}", equation);
            assert!(meta.source_function.starts_with("equations::wind::"), "{:?}", equation);
        }
    }

    #[test]
    fn test_markdown_lists_every_equation() {
        let md = generate_equations_markdown();
        for equation in Equation::ALL {
            assert!(md.contains(&format!("## {}", equation.metadata().name)));
        }
        assert!(md.contains("SANS 10160-3 7.3.2"));
    }

    #[test]
    fn test_tracker_keeps_evaluation_order() {
        let mut tracker = EquationTracker::new();
        assert!(tracker.equations().is_empty());

        tracker.record(Equation::TerrainRoughness);
        tracker.record(Equation::ProbabilityFactor);

        assert!(tracker.contains(Equation::TerrainRoughness));
        assert!(!tracker.contains(Equation::AirDensity));
        assert_eq!(
            tracker.into_equations(),
            vec![Equation::TerrainRoughness, Equation::ProbabilityFactor]
        );
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Equation::PeakWindSpeed).unwrap();
        assert_eq!(json, "\"PeakWindSpeed\"");
        let parsed: Equation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Equation::PeakWindSpeed);
    }
}
