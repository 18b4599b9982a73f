//! Random decimation.
//!
//! Unlike every other algorithm in this module the tolerance is a fraction of the
//! sequence to remove, not a distance, and the output is not reproducible between runs.

use super::MIN_SIMPLIFIABLE_LEN;
use geo::Coord;
use rand::Rng;
use rand::seq::index;

/// Remove `floor(len × fraction)` interior points chosen uniformly at random
///
/// The count is capped at the number of interior points; the first and last points are
/// always kept. `fraction` is expected in `[0, 1]`.
pub fn random(coords: &[Coord<f64>], fraction: f64) -> Vec<Coord<f64>> {
    random_with_rng(coords, fraction, &mut rand::rng())
}

/// [`random`] with a caller-supplied generator, for reproducible runs
pub fn random_with_rng<R: Rng + ?Sized>(
    coords: &[Coord<f64>],
    fraction: f64,
    rng: &mut R,
) -> Vec<Coord<f64>> {
    let n = coords.len();
    if n < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }

    let interior = n - 2;
    let drop_count = ((n as f64 * fraction.max(0.0)).floor() as usize).min(interior);
    if drop_count == 0 {
        return coords.to_vec();
    }

    let mut dropped = vec![false; n];
    for i in index::sample(rng, interior, drop_count) {
        dropped[i + 1] = true;
    }

    coords
        .iter()
        .zip(&dropped)
        .filter(|&(_, &d)| !d)
        .map(|(&p, _)| p)
        .collect()
}
