//! Lasso selection: polygon capture, membership and transforms of the
//! selected strokes.

use crate::geometry::{centroid, point_in_polygon};
use crate::store::StrokeStore;
use crate::stroke::{Stroke, StrokeId};
use kurbo::{Point, Vec2};

/// Offset applied to copied strokes.
pub const COPY_OFFSET: Vec2 = Vec2::new(30.0, 30.0);
/// Scale factor of one "zoom in" wheel tick.
pub const SCALE_UP: f64 = 1.05;
/// Scale factor of one "zoom out" wheel tick.
pub const SCALE_DOWN: f64 = 0.95;

/// A stroke belongs to a lasso if **any** of its points is inside.
pub fn stroke_in_lasso(stroke: &Stroke, polygon: &[Point]) -> bool {
    stroke.points.iter().any(|p| point_in_polygon(*p, polygon))
}

/// Selection polygon and the handles of the strokes it picked up.
#[derive(Debug, Clone, Default)]
pub struct LassoSelection {
    /// Boundary points; closed (first == last) once capture finishes.
    polygon: Vec<Point>,
    /// Selected strokes, in store order at selection time.
    selected: Vec<StrokeId>,
}

impl LassoSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline points, closed once capture finishes.
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    /// Handles of the selected strokes.
    pub fn selected(&self) -> &[StrokeId] {
        &self.selected
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Start a new capture at `point`, dropping any previous selection.
    pub fn begin_capture(&mut self, point: Point) {
        self.selected.clear();
        self.polygon.clear();
        self.polygon.push(point);
    }

    /// Add a boundary point to the polygon being captured.
    pub fn extend_capture(&mut self, point: Point) {
        self.polygon.push(point);
    }

    /// Close the polygon and select the strokes it touches.
    ///
    /// Polygons with two points or fewer select nothing. Returns the number of
    /// selected strokes.
    pub fn finish_capture(&mut self, store: &StrokeStore) -> usize {
        self.selected.clear();
        let Some(&first) = self.polygon.first() else {
            return 0;
        };
        if self.polygon.len() <= 2 {
            return 0;
        }

        self.polygon.push(first);
        self.selected = store
            .iter_with_ids()
            .filter(|(_, stroke)| stroke_in_lasso(stroke, &self.polygon))
            .map(|(id, _)| id)
            .collect();
        self.selected.len()
    }

    /// Whether a press at `point` should pick up the current selection.
    pub fn hit(&self, point: Point) -> bool {
        self.has_selection() && point_in_polygon(point, &self.polygon)
    }

    /// Translate the selected strokes and the outline together.
    pub fn drag_by(&mut self, store: &mut StrokeStore, delta: Vec2) {
        if !self.has_selection() {
            return;
        }
        for id in &self.selected {
            if let Some(stroke) = store.get_mut(*id) {
                stroke.translate(delta);
            }
        }
        for point in &mut self.polygon {
            *point += delta;
        }
    }

    /// Scale the selected strokes about the polygon centroid.
    ///
    /// The centroid is taken from the current polygon on every call, so a
    /// dragged selection scales about its new position. The outline itself is
    /// not scaled.
    pub fn scale(&self, store: &mut StrokeStore, factor: f64) -> bool {
        if !self.has_selection() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let center = centroid(&self.polygon);
        for id in &self.selected {
            if let Some(stroke) = store.get_mut(*id) {
                stroke.scale_about(center, factor);
            }
        }
        true
    }

    /// Remove the selected strokes from the store and reset the lasso.
    /// Returns the number of removed strokes.
    pub fn delete(&mut self, store: &mut StrokeStore) -> usize {
        if !self.has_selection() {
            return 0;
        }
        let removed = store.delete_strokes(&self.selected);
        self.clear();
        removed
    }

    /// Append offset deep copies of the selected strokes to the store.
    ///
    /// The selection itself is unchanged; copies are not selected.
    pub fn copy(&self, store: &mut StrokeStore) -> Vec<StrokeId> {
        let copies: Vec<Stroke> = self
            .selected
            .iter()
            .filter_map(|id| store.get(*id))
            .map(|stroke| stroke.offset_copy(COPY_OFFSET))
            .collect();
        copies.into_iter().map(|s| store.commit(s)).collect()
    }

    /// Forget handles of strokes that are no longer in the store.
    pub fn retain_existing(&mut self, store: &StrokeStore) {
        self.selected.retain(|id| store.contains(*id));
    }

    pub fn clear(&mut self) {
        self.polygon.clear();
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use crate::tools::ToolKind;

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke::from_points(
            ToolKind::Pen,
            SerializableColor::black(),
            2.0,
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        )
        .unwrap()
    }

    fn capture_square(lasso: &mut LassoSelection, store: &StrokeStore) -> usize {
        lasso.begin_capture(Point::new(0.0, 0.0));
        lasso.extend_capture(Point::new(100.0, 0.0));
        lasso.extend_capture(Point::new(100.0, 100.0));
        lasso.extend_capture(Point::new(0.0, 100.0));
        lasso.finish_capture(store)
    }

    #[test]
    fn test_select_contained_stroke() {
        let mut store = StrokeStore::new();
        let inside = store.commit(stroke(&[(10.0, 10.0), (20.0, 30.0), (50.0, 50.0)]));
        store.commit(stroke(&[(200.0, 200.0), (250.0, 250.0)]));

        let mut lasso = LassoSelection::new();
        assert_eq!(capture_square(&mut lasso, &store), 1);
        assert_eq!(lasso.selected(), &[inside]);
        assert_eq!(lasso.polygon().first(), lasso.polygon().last());
    }

    #[test]
    fn test_partial_overlap_is_selected() {
        let mut store = StrokeStore::new();
        let crossing = store.commit(stroke(&[(50.0, 50.0), (300.0, 300.0)]));

        let mut lasso = LassoSelection::new();
        capture_square(&mut lasso, &store);
        assert_eq!(lasso.selected(), &[crossing]);
    }

    #[test]
    fn test_small_polygon_selects_nothing() {
        let mut store = StrokeStore::new();
        store.commit(stroke(&[(1.0, 1.0)]));

        let mut lasso = LassoSelection::new();
        lasso.begin_capture(Point::new(0.0, 0.0));
        lasso.extend_capture(Point::new(10.0, 10.0));
        assert_eq!(lasso.finish_capture(&store), 0);
        assert!(!lasso.has_selection());
        assert_eq!(lasso.polygon().len(), 2);
    }

    #[test]
    fn test_drag_moves_strokes_and_outline() {
        let mut store = StrokeStore::new();
        let id = store.commit(stroke(&[(10.0, 10.0)]));
        let mut lasso = LassoSelection::new();
        capture_square(&mut lasso, &store);

        assert!(lasso.hit(Point::new(50.0, 50.0)));
        lasso.drag_by(&mut store, Vec2::new(5.0, -2.0));

        assert_eq!(store.get(id).unwrap().points, vec![Point::new(15.0, 8.0)]);
        assert_eq!(lasso.polygon()[0], Point::new(5.0, -2.0));
        assert!(lasso.hit(Point::new(104.0, 50.0)));
    }

    #[test]
    fn test_scale_about_current_centroid() {
        let mut store = StrokeStore::new();
        let id = store.commit(stroke(&[(10.0, 10.0), (90.0, 90.0)]));
        let mut lasso = LassoSelection::new();
        capture_square(&mut lasso, &store);

        let center = centroid(lasso.polygon());
        assert!(lasso.scale(&mut store, SCALE_UP));
        let pts = &store.get(id).unwrap().points;
        let expected = center + (Point::new(10.0, 10.0) - center) * SCALE_UP;
        assert!((pts[0].x - expected.x).abs() < 1e-9);
        assert!((pts[0].y - expected.y).abs() < 1e-9);

        // Outline is not scaled.
        assert_eq!(lasso.polygon()[1], Point::new(100.0, 0.0));
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut store = StrokeStore::new();
        store.commit(stroke(&[(10.0, 10.0)]));
        let keep = store.commit(stroke(&[(500.0, 500.0)]));
        let mut lasso = LassoSelection::new();
        capture_square(&mut lasso, &store);

        assert_eq!(lasso.delete(&mut store), 1);
        assert_eq!(store.ids(), &[keep]);
        assert!(lasso.polygon().is_empty());
        assert!(!lasso.has_selection());
        assert_eq!(lasso.delete(&mut store), 0);
    }

    #[test]
    fn test_copy_offsets_new_strokes() {
        let mut store = StrokeStore::new();
        let original = store.commit(stroke(&[(5.0, 5.0)]));
        let mut lasso = LassoSelection::new();
        capture_square(&mut lasso, &store);

        let copies = lasso.copy(&mut store);
        assert_eq!(copies.len(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(copies[0]).unwrap().points, vec![Point::new(35.0, 35.0)]);
        assert_eq!(store.get(original).unwrap().points, vec![Point::new(5.0, 5.0)]);
        assert_eq!(lasso.selected(), &[original]);
    }

    #[test]
    fn test_empty_selection_actions_are_noops() {
        let mut store = StrokeStore::new();
        let id = store.commit(stroke(&[(5.0, 5.0)]));
        let mut lasso = LassoSelection::new();

        assert!(lasso.copy(&mut store).is_empty());
        assert!(!lasso.scale(&mut store, SCALE_DOWN));
        lasso.drag_by(&mut store, Vec2::new(1.0, 1.0));
        assert_eq!(store.get(id).unwrap().points, vec![Point::new(5.0, 5.0)]);
        assert!(!lasso.hit(Point::new(5.0, 5.0)));
    }
}
