//! Motion integration with reflective walls
//!
//! Particles move in straight lines and bounce off the play-field edges with no
//! energy loss. Temperature only enters through the speed multiplier, so hotter
//! settings mean faster motion and more frequent encounters.

use combustion_math::PlayField;

use crate::particle::Particle;

/// Default constant in `multiplier = temperature^2 * scale`
pub const DEFAULT_SPEED_SCALE: f32 = 0.25;

/// Speed multiplier for a temperature setting
///
/// Non-finite temperatures give a multiplier of zero.
pub fn speed_multiplier(temperature: f32, scale: f32) -> f32 {
    let m = temperature * temperature * scale;
    if m.is_finite() {
        m.max(0.0)
    } else {
        0.0
    }
}

/// Advance every particle by `velocity * dt * multiplier`
///
/// After moving, each axis is checked independently: a coordinate outside the
/// field is clamped onto the wall and that velocity component is inverted.
/// Returns the number of wall contacts.
pub fn integrate(particles: &mut [Particle], dt: f32, multiplier: f32, field: &PlayField) -> usize {
    let scale = dt * multiplier;
    let mut contacts = 0;

    for particle in particles.iter_mut() {
        particle.position += particle.velocity * scale;

        if particle.position.x < field.min.x {
            particle.position.x = field.min.x;
            particle.velocity.x = -particle.velocity.x;
            contacts += 1;
        } else if particle.position.x > field.max.x {
            particle.position.x = field.max.x;
            particle.velocity.x = -particle.velocity.x;
            contacts += 1;
        }

        if particle.position.y < field.min.y {
            particle.position.y = field.min.y;
            particle.velocity.y = -particle.velocity.y;
            contacts += 1;
        } else if particle.position.y > field.max.y {
            particle.position.y = field.max.y;
            particle.velocity.y = -particle.velocity.y;
            contacts += 1;
        }
    }

    contacts
}
