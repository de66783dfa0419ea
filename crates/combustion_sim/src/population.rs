//! Simulation state store
//!
//! Four ordered collections of particles, one per species. Order is insertion
//! order and removal keeps the relative order of the remaining particles, which
//! the reaction pass relies on.

use crate::particle::Particle;
use crate::species::Species;

/// Count of live particles per species
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub propane: usize,
    pub oxygen: usize,
    pub carbon_dioxide: usize,
    pub water: usize,
}

impl Tally {
    /// Count for one species
    pub fn get(&self, species: Species) -> usize {
        match species {
            Species::Propane => self.propane,
            Species::Oxygen => self.oxygen,
            Species::CarbonDioxide => self.carbon_dioxide,
            Species::Water => self.water,
        }
    }

    /// Total number of molecules
    pub fn total(&self) -> usize {
        self.propane + self.oxygen + self.carbon_dioxide + self.water
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "C3H8 {} | O2 {} | CO2 {} | H2O {}",
            self.propane, self.oxygen, self.carbon_dioxide, self.water
        )
    }
}

/// All live particles, grouped by species
#[derive(Clone, Debug, Default)]
pub struct Population {
    propane: Vec<Particle>,
    oxygen: Vec<Particle>,
    carbon_dioxide: Vec<Particle>,
    water: Vec<Particle>,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every particle
    pub fn clear(&mut self) {
        for species in Species::ALL {
            self.collection_mut(species).clear();
        }
    }

    /// Append a particle to its species collection
    pub fn push(&mut self, particle: Particle) {
        self.collection_mut(particle.species()).push(particle);
    }

    /// Particles of one species, in storage order
    pub fn of(&self, species: Species) -> &[Particle] {
        match species {
            Species::Propane => &self.propane,
            Species::Oxygen => &self.oxygen,
            Species::CarbonDioxide => &self.carbon_dioxide,
            Species::Water => &self.water,
        }
    }

    /// Mutable particles of one species
    pub fn of_mut(&mut self, species: Species) -> &mut [Particle] {
        self.collection_mut(species).as_mut_slice()
    }

    /// Number of particles of one species
    pub fn count(&self, species: Species) -> usize {
        self.of(species).len()
    }

    /// Current count per species
    pub fn tally(&self) -> Tally {
        Tally {
            propane: self.propane.len(),
            oxygen: self.oxygen.len(),
            carbon_dioxide: self.carbon_dioxide.len(),
            water: self.water.len(),
        }
    }

    /// Whether no particle of any species is alive
    pub fn is_empty(&self) -> bool {
        self.tally().total() == 0
    }

    /// Iterate over every particle, species by species
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        Species::ALL.into_iter().flat_map(move |s| self.of(s).iter())
    }

    /// Both reactant collections at once, for the reaction pass
    pub(crate) fn reactants_mut(&mut self) -> (&mut Vec<Particle>, &mut Vec<Particle>) {
        (&mut self.propane, &mut self.oxygen)
    }

    fn collection_mut(&mut self, species: Species) -> &mut Vec<Particle> {
        match species {
            Species::Propane => &mut self.propane,
            Species::Oxygen => &mut self.oxygen,
            Species::CarbonDioxide => &mut self.carbon_dioxide,
            Species::Water => &mut self.water,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combustion_math::Vec2;

    fn at(species: Species, x: f32) -> Particle {
        Particle::new(species, Vec2::new(x, 0.0))
    }

    #[test]
    fn test_push_routes_by_species() {
        let mut population = Population::new();
        population.push(at(Species::Propane, 1.0));
        population.push(at(Species::Oxygen, 2.0));
        population.push(at(Species::Oxygen, 3.0));
        population.push(at(Species::Water, 4.0));

        let tally = population.tally();
        assert_eq!(tally.propane, 1);
        assert_eq!(tally.oxygen, 2);
        assert_eq!(tally.carbon_dioxide, 0);
        assert_eq!(tally.water, 1);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut population = Population::new();
        for x in [1.0, 2.0, 3.0] {
            population.push(at(Species::Oxygen, x));
        }

        let xs: Vec<f32> = population.of(Species::Oxygen).iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_clear() {
        let mut population = Population::new();
        population.push(at(Species::Propane, 1.0));
        population.push(at(Species::CarbonDioxide, 1.0));
        assert!(!population.is_empty());

        population.clear();
        assert!(population.is_empty());
        assert_eq!(population.tally(), Tally::default());
    }

    #[test]
    fn test_iter_visits_all_species() {
        let mut population = Population::new();
        for species in Species::ALL {
            population.push(at(species, 0.0));
        }
        assert_eq!(population.iter().count(), 4);
    }

    #[test]
    fn test_tally_get_and_display() {
        let tally = Tally {
            propane: 1,
            oxygen: 2,
            carbon_dioxide: 3,
            water: 4,
        };
        assert_eq!(tally.get(Species::CarbonDioxide), 3);
        assert_eq!(tally.to_string(), "C3H8 1 | O2 2 | CO2 3 | H2O 4");
    }
}
