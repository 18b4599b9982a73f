//! Reumann-Witkam corridor simplification.

use super::MIN_SIMPLIFIABLE_LEN;
use crate::utils;
use geo::Coord;

/// Simplify a sequence with a single forward Reumann-Witkam pass
///
/// Walks the points keeping an anchor and the last kept point. A candidate is dropped
/// while its distance to the segment (anchor, last kept) stays within `tolerance`; the
/// first point beyond it is kept and becomes both the new last kept point and the new
/// anchor. The final point is always kept.
pub fn reumann_witkam(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    let n = coords.len();
    if n < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }

    let mut simplified = vec![coords[0]];
    let mut anchor = coords[0];
    let mut last_kept = 0;

    for (i, &point) in coords.iter().enumerate().skip(1) {
        let distance = utils::perpendicular_distance(point, anchor, coords[last_kept]);
        if distance > tolerance {
            simplified.push(point);
            anchor = point;
            last_kept = i;
        }
    }

    if last_kept != n - 1 {
        simplified.push(coords[n - 1]);
    }

    simplified
}
