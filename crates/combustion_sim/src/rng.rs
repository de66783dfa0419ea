//! Random source abstraction for the simulation
//!
//! Every random draw the simulation makes (seeding, velocities, acceptance,
//! product jitter) goes through [`SimRng`], so a seeded generator makes a run
//! fully reproducible.

use rand_xoshiro::Xoshiro256StarStar;

/// Generator used by the application unless a test supplies its own
pub type DefaultRng = Xoshiro256StarStar;

/// Random number generator trait for the simulation
pub trait SimRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Uniform f32 in [low, high), or `low` when the range is empty
    fn gen_range_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        low + (high - low) * self.gen_f32()
    }

    /// Uniform f32 in [-half_extent, half_extent)
    fn gen_signed(&mut self, half_extent: f32) -> f32 {
        (self.gen_f32() - 0.5) * 2.0 * half_extent
    }

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

// Covers seeded generators in tests and entropy-seeded ones in the app
impl<T: ?Sized + rand::Rng> SimRng for T {
    fn gen_f32(&mut self) -> f32 {
        rand::Rng::gen(self)
    }
}
