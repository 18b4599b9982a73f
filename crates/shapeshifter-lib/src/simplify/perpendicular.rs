//! Perpendicular distance simplification.

use super::MIN_SIMPLIFIABLE_LEN;
use crate::utils;
use geo::Coord;

/// Keep each interior point whose distance to the segment between its original
/// neighbours is at least `tolerance`
///
/// Every decision is made against the input sequence, so removing one point never
/// changes the verdict for another.
pub fn perpendicular_distance(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    let n = coords.len();
    if n < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }

    let mut simplified = Vec::with_capacity(n);
    simplified.push(coords[0]);
    simplified.extend(
        coords
            .windows(3)
            .filter(|w| utils::perpendicular_distance(w[1], w[0], w[2]) >= tolerance)
            .map(|w| w[1]),
    );
    simplified.push(coords[n - 1]);

    simplified
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_keeps_points_at_or_above_tolerance() {
        let line = coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 0.2), (4.0, 0.0)]);
        let simplified = perpendicular_distance(&line, 1.0);
        assert_eq!(simplified, coords(&[(0.0, 0.0), (1.0, 1.0), (4.0, 0.0)]));
    }

    #[test]
    fn test_decisions_use_original_neighbours() {
        // Index 2 is measured against (1, 3) even though index 1 is removed
        let line = coords(&[(0.0, 0.0), (1.0, 0.1), (2.0, 1.0), (3.0, 0.1), (4.0, 0.0)]);
        let simplified = perpendicular_distance(&line, 0.5);
        assert_eq!(simplified, coords(&[(0.0, 0.0), (2.0, 1.0), (4.0, 0.0)]));
    }

    #[test]
    fn test_zero_tolerance_keeps_everything() {
        let line = coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(perpendicular_distance(&line, 0.0), line);
    }
}
