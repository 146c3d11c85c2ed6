//! View offset for vertical panning.

use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};

/// Vertical pan applied to committed and in-progress strokes when drawing.
///
/// Stroke coordinates are stored unpanned; only the view moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_y: f64,
}

impl Camera {
    /// Camera with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform from stroke coordinates to surface coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(0.0, self.pan_y))
    }

    /// Shift the view vertically. Non-finite deltas are ignored.
    pub fn pan(&mut self, dy: f64) {
        if dy.is_finite() {
            self.pan_y += dy;
        }
    }
}
