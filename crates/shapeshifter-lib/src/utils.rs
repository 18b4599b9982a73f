//! Utility functions for planar distance, area and angle measurements

use geo::Coord;

/// Euclidean distance between two coordinates
#[inline(always)]
pub fn point_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Distance from `point` to the segment `start`-`end`
///
/// Points whose projection falls beyond either end of the segment measure to the nearest
/// endpoint. A zero-length segment falls back to the
/// point-to-point distance.
///
/// # Arguments
/// * `point` - The point being measured
/// * `start` - First endpoint of the segment
/// * `end` - Second endpoint of the segment
///
/// # Returns
/// The non-negative distance, in the same units as the coordinates
#[inline(always)]
pub fn perpendicular_distance(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let line = end - start;
    let line_len_sq = line.x * line.x + line.y * line.y;

    if line_len_sq == 0.0 {
        return point_distance(point, start);
    }

    let offset = point - start;
    let projection = (offset.x * line.x + offset.y * line.y) / line_len_sq;
    if projection <= 0.0 {
        return point_distance(point, start);
    }
    if projection >= 1.0 {
        return point_distance(point, end);
    }

    let closest = Coord {
        x: start.x + projection * line.x,
        y: start.y + projection * line.y,
    };
    point_distance(point, closest)
}

/// Area of the triangle `p1`, `p2`, `p3` (shoelace formula, always non-negative)
#[inline(always)]
pub fn triangle_area(p1: Coord<f64>, p2: Coord<f64>, p3: Coord<f64>) -> f64 {
    ((p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y)) / 2.0).abs()
}

/// Interior angle at `vertex` between the edges towards `prev` and `next`, in `[0, π]`
///
/// Computed from the law of cosines on the two incident edge vectors. A zero-length edge
/// is treated as a straight line and yields `π`.
#[inline]
pub fn turning_angle(prev: Coord<f64>, vertex: Coord<f64>, next: Coord<f64>) -> f64 {
    let v1 = prev - vertex;
    let v2 = next - vertex;
    let norm_v1 = v1.x.hypot(v1.y);
    let norm_v2 = v2.x.hypot(v2.y);

    if norm_v1 == 0.0 || norm_v2 == 0.0 {
        return std::f64::consts::PI;
    }

    let cos_angle = (v1.x * v2.x + v1.y * v2.y) / (norm_v1 * norm_v2);
    cos_angle.clamp(-1.0, 1.0).acos()
}
