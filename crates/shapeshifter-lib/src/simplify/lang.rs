//! Lang lookahead simplification.

use super::MIN_SIMPLIFIABLE_LEN;
use crate::utils;
use geo::Coord;

/// Simplify a sequence with the Lang algorithm and a lookahead window of `lookahead` points
///
/// From the current point `i`, the window ends at `min(i + lookahead, last)`. If any point
/// inside the window lies farther than `tolerance` from the chord spanning it, the
/// farthest one is kept and becomes the new `i`; otherwise the window end is kept and
/// the scan jumps there. A `lookahead` below 2 cannot hold an interior point and returns
/// the input unchanged.
pub fn lang(coords: &[Coord<f64>], tolerance: f64, lookahead: usize) -> Vec<Coord<f64>> {
    let n = coords.len();
    if n < MIN_SIMPLIFIABLE_LEN || lookahead < 2 {
        return coords.to_vec();
    }

    let mut simplified = vec![coords[0]];
    let mut i = 0;

    while i < n - 1 {
        let end = (i + lookahead).min(n - 1);
        let (start_point, end_point) = (coords[i], coords[end]);

        let mut max_distance = 0.0;
        let mut max_index = end;
        for (j, &point) in coords.iter().enumerate().take(end).skip(i + 1) {
            let distance = utils::perpendicular_distance(point, start_point, end_point);
            if distance > max_distance {
                max_distance = distance;
                max_index = j;
            }
        }

        i = if max_distance > tolerance { max_index } else { end };
        simplified.push(coords[i]);
    }

    simplified
}
