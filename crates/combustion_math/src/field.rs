//! Play-field rectangle
//!
//! The region particles are confined to. Walls are the rectangle edges and
//! reflect particles without energy loss.

use serde::{Deserialize, Serialize};

use crate::Vec2;

/// Axis-aligned rectangle in canvas units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    /// Top-left corner (smallest x and y)
    pub min: Vec2,
    /// Bottom-right corner (largest x and y)
    pub max: Vec2,
}

impl PlayField {
    /// Margin kept clear along every canvas edge
    pub const EDGE_MARGIN: f32 = 20.0;
    /// Canvas strip at the bottom reserved for the HUD
    pub const HUD_HEIGHT: f32 = 100.0;

    /// Create a field from its corners
    ///
    /// Corners are reordered so that `min <= max` on both axes.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Play field for a canvas of the given size
    ///
    /// Keeps [`Self::EDGE_MARGIN`] clear on every side and leaves the bottom
    /// [`Self::HUD_HEIGHT`] for the HUD.
    pub fn for_canvas(width: f32, height: f32) -> Self {
        let m = Self::EDGE_MARGIN;
        let max_x = (width - m).max(m);
        let max_y = (height - m - Self::HUD_HEIGHT).max(m);
        Self::new(Vec2::new(m, m), Vec2::new(max_x, max_y))
    }

    /// Width and height
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether the point lies inside the field (edges included)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Nearest point inside the field
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp_components(self.min, self.max)
    }

    /// Shrink the far edges by the given amounts
    ///
    /// Used to derive the seeding area, which stays clear of the HUD strip by an
    /// extra margin. Collapses to a zero-size rectangle rather than inverting.
    pub fn inset_far(&self, dx: f32, dy: f32) -> Self {
        let max = Vec2::new(
            (self.max.x - dx).max(self.min.x),
            (self.max.y - dy).max(self.min.y),
        );
        Self { min: self.min, max }
    }
}

impl Default for PlayField {
    /// Field for the default 900x600 canvas
    fn default() -> Self {
        Self::for_canvas(900.0, 600.0)
    }
}
