//! Geometry helpers shared by the input, lasso and ruler paths.

use kurbo::Point;

/// Default minimum spacing between recorded samples (surface units).
pub const DEFAULT_MIN_DISTANCE: f64 = 1.5;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// Added to the edge denominator so horizontal edges never divide by zero.
const EDGE_EPSILON: f64 = 1e-5;

/// Ray-casting parity test.
///
/// The polygon is treated as closed (last vertex wraps to the first) whether or
/// not the caller repeated the first vertex. Polygons with fewer than three
/// vertices have no area and never contain anything.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        let crosses = (pi.y > point.y) != (pj.y > point.y);
        if crosses {
            let x_at = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y + EDGE_EPSILON) + pi.x;
            if point.x < x_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Snap `end` to the nearest [`ANGLE_SNAP_INCREMENT`] around `start`,
/// preserving the distance between the two points.
pub fn snap_to_angle(start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let distance = dx.hypot(dy);

    let step = ANGLE_SNAP_INCREMENT.to_radians();
    let snapped = (dy.atan2(dx) / step).round() * step;

    Point::new(
        start.x + snapped.cos() * distance,
        start.y + snapped.sin() * distance,
    )
}

/// Append `point` unless it lies within `min_dist` of the last recorded point.
///
/// The first point is always accepted. Returns whether the point was kept.
pub fn add_point(points: &mut Vec<Point>, point: Point, min_dist: f64) -> bool {
    if let Some(last) = points.last() {
        let dx = point.x - last.x;
        let dy = point.y - last.y;
        if dx * dx + dy * dy <= min_dist * min_dist {
            return false;
        }
    }
    points.push(point);
    true
}

/// Arithmetic mean of the vertices (origin for an empty slice).
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
    let n = points.len() as f64;
    Point::new(sum_x / n, sum_y / n)
}
