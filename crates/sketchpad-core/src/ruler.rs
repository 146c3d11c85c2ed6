//! Ruler: a straight line snapped to 15° increments, committed as a pen stroke.

use crate::color::SerializableColor;
use crate::geometry::snap_to_angle;
use crate::stroke::Stroke;
use crate::tools::ToolKind;
use kurbo::Point;

/// Transient state of one ruler drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerState {
    pub start: Point,
    pub end: Point,
}

impl RulerState {
    pub fn begin(position: Point) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Move the free end, snapping its angle.
    pub fn update(&mut self, position: Point) {
        self.end = snap_to_angle(self.start, position);
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    /// Finish the drag as a two-point pen stroke.
    pub fn into_stroke(self, color: SerializableColor, thickness: f64) -> Stroke {
        Stroke {
            tool: ToolKind::Pen,
            color,
            thickness,
            points: vec![self.start, self.end],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruler_snaps_to_horizontal() {
        let mut ruler = RulerState::begin(Point::ZERO);
        ruler.update(Point::new(10.0, 1.0));
        assert!((ruler.end.y).abs() < 1e-9);
        assert!((ruler.length() - 101f64.sqrt()).abs() < 1e-9);

        let stroke = ruler.into_stroke(SerializableColor::black(), 3.0);
        assert_eq!(stroke.tool, ToolKind::Pen);
        assert_eq!(stroke.points.len(), 2);
        assert_eq!(stroke.points[0], Point::ZERO);
        assert!((stroke.thickness - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ruler_without_move_is_zero_length() {
        let ruler = RulerState::begin(Point::new(4.0, 4.0));
        assert_eq!(ruler.length(), 0.0);
        let stroke = ruler.into_stroke(SerializableColor::black(), 3.0);
        assert_eq!(stroke.points, vec![Point::new(4.0, 4.0), Point::new(4.0, 4.0)]);
    }
}
