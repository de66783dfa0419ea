//! Molecule layout: species to atom clusters
//!
//! Each molecule is drawn as a fixed cluster of atoms around its position.
//! Offsets and radii are in units of the base atom radius, so one setting
//! scales the whole picture. Nothing here touches the GPU, which keeps the
//! layout testable.

use combustion_sim::{Population, Species};

use crate::pipeline::ParticleInstance;

/// Hydrogen radius relative to the base atom radius
const SMALL_ATOM: f32 = 0.8;
/// Badge height above the molecule center, in base radii
const BADGE_OFFSET: f32 = 2.0;
/// Badge radius, in base radii
const BADGE_RADIUS: f32 = 0.45;
/// Atom marker radius relative to its atom
const MARKER_RADIUS: f32 = 0.25;

/// Chemical element of a drawn atom
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Atom {
    Carbon,
    Hydrogen,
    Oxygen,
}

impl Atom {
    /// Fill color (sRGB, dark gray / white / red)
    pub fn color(self) -> [f32; 4] {
        match self {
            Atom::Carbon => [0.267, 0.267, 0.267, 1.0],
            Atom::Hydrogen => [1.0, 1.0, 1.0, 1.0],
            Atom::Oxygen => [0.816, 0.125, 0.125, 1.0],
        }
    }

    /// Color of the marker dot drawn on the atom when labels are shown
    pub fn marker_color(self) -> [f32; 4] {
        match self {
            Atom::Hydrogen => [0.067, 0.067, 0.067, 0.9],
            _ => [1.0, 1.0, 1.0, 0.9],
        }
    }
}

/// One atom of a molecule template
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomSpec {
    pub atom: Atom,
    /// Offset from the molecule center, in base radii (y down)
    pub offset: [f32; 2],
    /// Radius, in base radii
    pub scale: f32,
}

const fn atom(atom: Atom, x: f32, y: f32, scale: f32) -> AtomSpec {
    AtomSpec {
        atom,
        offset: [x, y],
        scale,
    }
}

const PROPANE: [AtomSpec; 9] = [
    atom(Atom::Carbon, -1.2, 0.0, 1.0),
    atom(Atom::Carbon, 0.0, 0.0, 1.0),
    atom(Atom::Carbon, 1.2, 0.0, 1.0),
    atom(Atom::Hydrogen, -1.2, -1.4, SMALL_ATOM),
    atom(Atom::Hydrogen, -1.2, 1.4, SMALL_ATOM),
    atom(Atom::Hydrogen, 0.0, -1.4, SMALL_ATOM),
    atom(Atom::Hydrogen, 0.0, 1.4, SMALL_ATOM),
    atom(Atom::Hydrogen, 1.2, -1.4, SMALL_ATOM),
    atom(Atom::Hydrogen, 1.2, 1.4, SMALL_ATOM),
];

const OXYGEN: [AtomSpec; 2] = [
    atom(Atom::Oxygen, -0.7, 0.0, 1.0),
    atom(Atom::Oxygen, 0.7, 0.0, 1.0),
];

const CARBON_DIOXIDE: [AtomSpec; 3] = [
    atom(Atom::Carbon, 0.0, 0.0, 1.0),
    atom(Atom::Oxygen, -1.2, 0.0, 1.0),
    atom(Atom::Oxygen, 1.2, 0.0, 1.0),
];

const WATER: [AtomSpec; 3] = [
    atom(Atom::Oxygen, 0.0, 0.0, 1.0),
    atom(Atom::Hydrogen, -1.0, 1.0, SMALL_ATOM),
    atom(Atom::Hydrogen, 1.0, 1.0, SMALL_ATOM),
];

/// Atom template for a species, in draw order
pub fn atom_layout(species: Species) -> &'static [AtomSpec] {
    match species {
        Species::Propane => &PROPANE,
        Species::Oxygen => &OXYGEN,
        Species::CarbonDioxide => &CARBON_DIOXIDE,
        Species::Water => &WATER,
    }
}

/// Badge color identifying a species
pub fn badge_color(species: Species) -> [f32; 4] {
    match species {
        Species::Propane => [0.95, 0.6, 0.1, 1.0],
        Species::Oxygen => [0.25, 0.55, 0.95, 1.0],
        Species::CarbonDioxide => [0.45, 0.45, 0.5, 1.0],
        Species::Water => [0.1, 0.75, 0.8, 1.0],
    }
}

/// Size settings for molecule drawing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoleculeStyle {
    /// Base atom radius in canvas pixels
    pub atom_radius: f32,
}

impl Default for MoleculeStyle {
    fn default() -> Self {
        Self { atom_radius: 14.0 }
    }
}

impl MoleculeStyle {
    pub fn new(atom_radius: f32) -> Self {
        Self {
            atom_radius: if atom_radius.is_finite() && atom_radius > 0.0 {
                atom_radius
            } else {
                Self::default().atom_radius
            },
        }
    }

    /// Append the discs for one molecule centered at `center`
    pub fn push_molecule(
        &self,
        out: &mut Vec<ParticleInstance>,
        species: Species,
        center: [f32; 2],
        labels: bool,
    ) {
        let r = self.atom_radius;

        for spec in atom_layout(species) {
            let position = [center[0] + spec.offset[0] * r, center[1] + spec.offset[1] * r];
            let radius = spec.scale * r;
            out.push(ParticleInstance::new(position, radius, spec.atom.color()));

            if labels {
                out.push(
                    ParticleInstance::new(position, radius * MARKER_RADIUS, spec.atom.marker_color())
                        .flat(),
                );
            }
        }

        if labels {
            let badge = [center[0], center[1] - BADGE_OFFSET * r];
            out.push(ParticleInstance::new(badge, BADGE_RADIUS * r, badge_color(species)));
        }
    }
}

/// Build the instance list for a whole population
///
/// Species are drawn in the order propane, oxygen, carbon dioxide, water, each
/// in collection order, so later molecules overlap earlier ones.
pub fn build_instances(
    population: &Population,
    labels: bool,
    style: &MoleculeStyle,
) -> Vec<ParticleInstance> {
    let mut instances = Vec::with_capacity(instance_estimate(population, labels));

    for species in Species::ALL {
        for particle in population.of(species) {
            style.push_molecule(&mut instances, species, particle.position.to_array(), labels);
        }
    }

    instances
}

/// Exact number of instances `build_instances` produces
pub fn instance_estimate(population: &Population, labels: bool) -> usize {
    Species::ALL
        .iter()
        .map(|&species| {
            let atoms = atom_layout(species).len();
            let per_molecule = if labels { atoms * 2 + 1 } else { atoms };
            per_molecule * population.count(species)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use combustion_math::Vec2;
    use combustion_sim::Particle;

    fn count_atoms(species: Species, atom: Atom) -> usize {
        atom_layout(species).iter().filter(|s| s.atom == atom).count()
    }

    #[test]
    fn test_atom_counts_match_formulas() {
        assert_eq!(count_atoms(Species::Propane, Atom::Carbon), 3);
        assert_eq!(count_atoms(Species::Propane, Atom::Hydrogen), 8 - 2);
        assert_eq!(count_atoms(Species::Oxygen, Atom::Oxygen), 2);
        assert_eq!(count_atoms(Species::CarbonDioxide, Atom::Carbon), 1);
        assert_eq!(count_atoms(Species::CarbonDioxide, Atom::Oxygen), 2);
        assert_eq!(count_atoms(Species::Water, Atom::Oxygen), 1);
        assert_eq!(count_atoms(Species::Water, Atom::Hydrogen), 2);
    }

    #[test]
    fn test_hydrogen_drawn_after_carbon() {
        let layout = atom_layout(Species::Propane);
        let last_carbon = layout.iter().rposition(|s| s.atom == Atom::Carbon).unwrap();
        let first_hydrogen = layout.iter().position(|s| s.atom == Atom::Hydrogen).unwrap();
        assert!(last_carbon < first_hydrogen);
    }

    #[test]
    fn test_molecule_scaled_by_radius() {
        let style = MoleculeStyle::new(10.0);
        let mut out = Vec::new();
        style.push_molecule(&mut out, Species::Oxygen, [100.0, 50.0], false);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].center, [93.0, 50.0]);
        assert_eq!(out[1].center, [107.0, 50.0]);
        assert_eq!(out[0].radius, 10.0);
        assert_eq!(out[0].color, Atom::Oxygen.color());
    }

    #[test]
    fn test_labels_add_markers_and_badge() {
        let style = MoleculeStyle::default();
        let mut out = Vec::new();
        style.push_molecule(&mut out, Species::Water, [200.0, 200.0], true);

        // 3 atoms + 3 markers + 1 badge
        assert_eq!(out.len(), 7);
        let badge = out.last().unwrap();
        assert_eq!(badge.center, [200.0, 200.0 - 28.0]);
        assert_eq!(badge.color, badge_color(Species::Water));
    }

    #[test]
    fn test_invalid_radius_falls_back() {
        assert_eq!(MoleculeStyle::new(0.0), MoleculeStyle::default());
        assert_eq!(MoleculeStyle::new(f32::NAN), MoleculeStyle::default());
        assert_eq!(MoleculeStyle::new(8.0).atom_radius, 8.0);
    }

    #[test]
    fn test_build_instances_order_and_count() {
        let mut population = Population::new();
        population.push(Particle::new(Species::Water, Vec2::new(10.0, 10.0)));
        population.push(Particle::new(Species::Propane, Vec2::new(300.0, 300.0)));
        population.push(Particle::new(Species::Oxygen, Vec2::new(500.0, 100.0)));

        let style = MoleculeStyle::default();
        let plain = build_instances(&population, false, &style);
        assert_eq!(plain.len(), 9 + 2 + 3);
        assert_eq!(plain.len(), instance_estimate(&population, false));

        // Propane first even though water was pushed first
        assert_eq!(plain[0].color, Atom::Carbon.color());
        assert_eq!(plain[1].center, [300.0, 300.0]);

        let labelled = build_instances(&population, true, &style);
        assert_eq!(labelled.len(), instance_estimate(&population, true));
        assert_eq!(labelled.len(), (9 * 2 + 1) + (2 * 2 + 1) + (3 * 2 + 1));
    }

    #[test]
    fn test_empty_population() {
        let population = Population::new();
        assert!(build_instances(&population, true, &MoleculeStyle::default()).is_empty());
    }
}
