//! Nth-point decimation.

use super::MIN_SIMPLIFIABLE_LEN;
use geo::Coord;

/// Stride used by [`nth_point`] for a tolerance: `ceil(tolerance)`, at least 0
#[inline]
pub fn stride_from_tolerance(tolerance: f64) -> usize {
    if tolerance.is_finite() && tolerance > 0.0 {
        tolerance.ceil() as usize
    } else {
        0
    }
}

/// Keep the first point, every point whose index is a multiple of the stride, and the
/// last point
///
/// The stride is derived from `tolerance` with [`stride_from_tolerance`]. A stride of 1
/// or less returns the input unchanged.
pub fn nth_point(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    let n = coords.len();
    let stride = stride_from_tolerance(tolerance);
    if n < MIN_SIMPLIFIABLE_LEN || stride <= 1 {
        return coords.to_vec();
    }

    let mut simplified = Vec::with_capacity(n / stride + 2);
    simplified.extend(coords[..n - 1].iter().step_by(stride).copied());
    simplified.push(coords[n - 1]);

    simplified
}
