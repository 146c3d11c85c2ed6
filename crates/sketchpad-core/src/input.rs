//! Pointer input samples and palm rejection.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Contact size above which a touch is treated as a resting palm.
pub const PALM_CONTACT_LIMIT: f64 = 40.0;

/// Device that produced a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// One pointer sample, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointerSample {
    pub position: Point,
    pub pointer_type: PointerType,
    pub is_primary: bool,
    pub contact_width: f64,
    pub contact_height: f64,
    pub button: i32,
}

impl Default for PointerSample {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            pointer_type: PointerType::Mouse,
            is_primary: true,
            contact_width: 1.0,
            contact_height: 1.0,
            button: 0,
        }
    }
}

impl PointerSample {
    /// Primary mouse sample at `position`.
    pub fn mouse(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Primary stylus sample at `position`.
    pub fn pen(position: Point) -> Self {
        Self {
            position,
            pointer_type: PointerType::Pen,
            ..Self::default()
        }
    }

    /// Primary touch sample with a fingertip-sized contact.
    pub fn touch(position: Point) -> Self {
        Self {
            position,
            pointer_type: PointerType::Touch,
            ..Self::default()
        }
    }

    pub fn with_contact(mut self, width: f64, height: f64) -> Self {
        self.contact_width = width;
        self.contact_height = height;
        self
    }

    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    pub fn with_button(mut self, button: i32) -> Self {
        self.button = button;
        self
    }

    /// Touch that is not the primary pointer or has an oversized contact.
    pub fn is_palm(&self) -> bool {
        self.pointer_type == PointerType::Touch
            && (!self.is_primary
                || self.contact_width > PALM_CONTACT_LIMIT
                || self.contact_height > PALM_CONTACT_LIMIT)
    }

    /// Touch gesture that pans the view instead of drawing.
    pub fn is_touch_pan(&self) -> bool {
        self.pointer_type == PointerType::Touch && self.button == 1
    }
}

/// Input delivered to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(PointerSample),
    Move(PointerSample),
    Up(PointerSample),
    Leave(PointerSample),
    /// Wheel rotation; negative `delta_y` scrolls up.
    Wheel { position: Point, delta_y: f64 },
}
