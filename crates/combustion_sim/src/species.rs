//! Molecule species taking part in the reaction

use serde::{Deserialize, Serialize};

/// One of the four molecule kinds in `C3H8 + 5 O2 -> 3 CO2 + 4 H2O`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// C3H8, the fuel
    Propane,
    /// O2, the oxidizer
    Oxygen,
    /// CO2, first product
    CarbonDioxide,
    /// H2O, second product
    Water,
}

impl Species {
    /// All species, in population storage order
    pub const ALL: [Species; 4] = [
        Species::Propane,
        Species::Oxygen,
        Species::CarbonDioxide,
        Species::Water,
    ];

    /// Chemical formula as plain ASCII
    pub fn formula(self) -> &'static str {
        match self {
            Species::Propane => "C3H8",
            Species::Oxygen => "O2",
            Species::CarbonDioxide => "CO2",
            Species::Water => "H2O",
        }
    }

    /// Whether the species is consumed by the reaction
    pub fn is_reactant(self) -> bool {
        matches!(self, Species::Propane | Species::Oxygen)
    }

    /// Factor applied to the temperature speed multiplier
    ///
    /// Products drift slightly slower than reactants.
    pub fn speed_factor(self) -> f32 {
        if self.is_reactant() {
            1.0
        } else {
            0.9
        }
    }

    /// Index into per-species arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Species::Propane => 0,
            Species::Oxygen => 1,
            Species::CarbonDioxide => 2,
            Species::Water => 3,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.formula())
    }
}
