//! Linear mapping from projected grid coordinates into percentage space.

use crate::geometry::{Bounds, Point};

/// Spreads smaller than this are treated as zero.
const SPREAD_EPSILON: f64 = 1e-9;

/// Maps grid-space points into `bounds` with one uniform scale.
///
/// The larger of the two axis spreads fills the bounds; the other axis is
/// centered so grid cells stay square. An axis with zero spread (a single
/// room, or every room on one row) maps to the midpoint instead of dividing
/// by zero.
pub fn fit_to_bounds(points: &[Point], bounds: Bounds) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for point in &points[1..] {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }

    let spread = (max_x - min_x).max(max_y - min_y);
    let center = bounds.center();
    if spread < SPREAD_EPSILON {
        return vec![center; points.len()];
    }

    let scale = bounds.span() / spread;
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    points
        .iter()
        .map(|point| {
            bounds.clamp_point(Point::new(
                center.x + (point.x - mid_x) * scale,
                center.y + (point.y - mid_y) * scale,
            ))
        })
        .collect()
}
