//! Radial distance simplification.

use super::MIN_SIMPLIFIABLE_LEN;
use crate::utils;
use geo::Coord;

/// Keep each interior point farther than `tolerance` from the last kept point
///
/// The reference point moves forward to every kept point. The last input point is
/// always appended.
pub fn radial_distance(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    let n = coords.len();
    if n < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }

    let mut simplified = vec![coords[0]];
    let mut reference = coords[0];

    for &point in &coords[1..n - 1] {
        if utils::point_distance(point, reference) > tolerance {
            simplified.push(point);
            reference = point;
        }
    }
    simplified.push(coords[n - 1]);

    simplified
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_drops_clustered_points() {
        let line = coords(&[
            (0.0, 0.0),
            (0.5, 0.0),
            (1.5, 0.0),
            (2.0, 0.0),
            (2.4, 0.0),
            (5.0, 0.0),
        ]);
        let simplified = radial_distance(&line, 1.0);
        assert_eq!(simplified, coords(&[(0.0, 0.0), (1.5, 0.0), (5.0, 0.0)]));
    }

    #[test]
    fn test_boundary_is_strict() {
        // Exactly at the tolerance is not far enough
        let line = coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(radial_distance(&line, 1.0), coords(&[(0.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn test_last_point_always_kept() {
        // The last point is appended even when it sits on the previous kept point
        let line = coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 0.0)]);
        assert_eq!(radial_distance(&line, 1.0), line);
    }
}
