//! Stroke smoothing: moving-average pre-filter followed by Catmull-Rom
//! interpolation.
//!
//! Both the on-surface renderer and the exporters go through [`smooth`], so the
//! exported geometry is exactly what was drawn.

use kurbo::{BezPath, Point};

/// Neighbours on each side averaged by the pre-filter.
pub const DEFAULT_WINDOW: usize = 3;

/// Interpolated samples per input interval.
pub const DEFAULT_SEGMENTS: usize = 20;

/// Centered moving average.
///
/// Each output point is the mean of the input points within `window` positions
/// of it, with fewer neighbours near the ends. Sequences no longer than
/// `window` are returned unchanged.
pub fn moving_average(points: &[Point], window: usize) -> Vec<Point> {
    if points.len() <= window {
        return points.to_vec();
    }

    let last = points.len() - 1;
    (0..points.len())
        .map(|i| {
            let lo = i.saturating_sub(window);
            let hi = (i + window).min(last);
            let slice = &points[lo..=hi];
            let (sx, sy) = slice
                .iter()
                .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
            let n = slice.len() as f64;
            Point::new(sx / n, sy / n)
        })
        .collect()
}

/// Uniform Catmull-Rom interpolation through `points`.
///
/// Generates `segments` samples per interval, using each endpoint as its own
/// missing neighbour, and finishes with the last input point verbatim.
pub fn catmull_rom(points: &[Point], segments: usize) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let segments = segments.max(1);
    let last = points.len() - 1;
    let mut out = Vec::with_capacity(last * segments + 1);

    for i in 0..last {
        let p1 = points[i];
        let p0 = if i > 0 { points[i - 1] } else { p1 };
        let p2 = points[i + 1];
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        for step in 0..segments {
            let s = step as f64 / segments as f64;
            out.push(Point::new(
                catmull_rom_axis(p0.x, p1.x, p2.x, p3.x, s),
                catmull_rom_axis(p0.y, p1.y, p2.y, p3.y, s),
            ));
        }
    }

    out.push(points[last]);
    out
}

fn catmull_rom_axis(p0: f64, p1: f64, p2: f64, p3: f64, s: f64) -> f64 {
    let s2 = s * s;
    let s3 = s2 * s;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * s
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * s2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * s3)
}

/// Full pipeline with the default parameters.
///
/// Strokes with fewer than two points pass through untouched; they render as
/// dots.
pub fn smooth(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    catmull_rom(&moving_average(points, DEFAULT_WINDOW), DEFAULT_SEGMENTS)
}

/// Polyline path through already smoothed points.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new(i as f64 * 4.0, if i % 2 == 0 { 0.0 } else { 6.0 }))
            .collect()
    }

    #[test]
    fn test_moving_average_short_input_unchanged() {
        let pts = zigzag(3);
        assert_eq!(moving_average(&pts, 3), pts);
    }

    #[test]
    fn test_moving_average_clamps_at_ends() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 0.0)).collect();
        let avg = moving_average(&pts, 1);
        assert_eq!(avg.len(), 5);
        // First point averages indices 0..=1, middle point 1..=3.
        assert!((avg[0].x - 0.5).abs() < 1e-12);
        assert!((avg[2].x - 2.0).abs() < 1e-12);
        assert!((avg[4].x - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_catmull_rom_passes_through_controls() {
        let pts = zigzag(4);
        let curve = catmull_rom(&pts, 10);
        assert_eq!(curve.len(), 3 * 10 + 1);
        // Sample 0 of each interval is the interval start.
        for (i, p) in pts.iter().enumerate().take(3) {
            let q = curve[i * 10];
            assert!((q.x - p.x).abs() < 1e-12 && (q.y - p.y).abs() < 1e-12);
        }
        assert_eq!(*curve.last().unwrap(), pts[3]);
    }

    #[test]
    fn test_catmull_rom_two_points_is_straight() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let curve = catmull_rom(&pts, 20);
        assert_eq!(curve.len(), 21);
        assert!(curve.iter().all(|p| p.y.abs() < 1e-12));
        assert!(curve.windows(2).all(|w| w[1].x >= w[0].x));
    }

    #[test]
    fn test_smooth_is_deterministic() {
        let pts = zigzag(17);
        let a = smooth(&pts);
        let b = smooth(&pts);
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
    }

    #[test]
    fn test_smooth_single_point_passthrough() {
        let pts = vec![Point::new(5.0, 5.0)];
        assert_eq!(smooth(&pts), pts);
    }

    #[test]
    fn test_polyline_path() {
        let path = polyline_path(&zigzag(4));
        assert_eq!(path.elements().len(), 4);
        assert!(polyline_path(&[]).elements().is_empty());
    }
}
