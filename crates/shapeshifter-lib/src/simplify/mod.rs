//! Coordinate-sequence simplification algorithms
//!
//! Every function here maps an ordered sequence of points and a tolerance to a reduced
//! sequence. They share one contract:
//!
//! - sequences shorter than [`MIN_SIMPLIFIABLE_LEN`] are returned unchanged
//! - the first and last input points are always present in the output
//! - surviving points keep their original order
//!
//! The unit of the tolerance depends on the algorithm: a distance for most of them, an
//! area for [`visvalingam_whyatt`], a stride for [`nth_point`] and a removal fraction
//! for [`random`].

mod douglas_peucker;
mod lang;
mod nth_point;
mod perpendicular;
mod radial;
mod random;
mod reumann_witkam;
mod visvalingam;

pub use douglas_peucker::{
    douglas_peucker, douglas_peucker_indices, geo_douglas_peucker, improved_douglas_peucker,
    select_anchor_indices,
};
pub use lang::lang;
pub use nth_point::{nth_point, stride_from_tolerance};
pub use perpendicular::perpendicular_distance;
pub use radial::radial_distance;
pub use random::{random, random_with_rng};
pub use reumann_witkam::reumann_witkam;
pub use visvalingam::{visvalingam_whyatt, visvalingam_whyatt_indices};

use geo::Coord;

/// Sequences shorter than this cannot be simplified
pub const MIN_SIMPLIFIABLE_LEN: usize = 3;

/// Collect the points at `indices` (which must be sorted and in range)
#[inline]
pub(crate) fn select(coords: &[Coord<f64>], indices: &[usize]) -> Vec<Coord<f64>> {
    indices.iter().map(|&i| coords[i]).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use geo::Coord;

    pub fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    pub fn coords(points: &[(f64, f64)]) -> Vec<Coord<f64>> {
        points.iter().map(|&(x, y)| c(x, y)).collect()
    }

    /// A wavy line with no collinear triples, 200 points long
    pub fn wavy_line() -> Vec<Coord<f64>> {
        (0..200)
            .map(|i| {
                let t = i as f64 / 10.0;
                c(t, (t * 1.7).sin() * 3.0 + (t * 0.3).cos() + 0.01 * t * t)
            })
            .collect()
    }

    /// A wavy line whose x and y both increase strictly, 200 points long
    pub fn rising_wave() -> Vec<Coord<f64>> {
        (0..200)
            .map(|i| {
                let t = i as f64 / 10.0;
                c(t, 2.0 * (t + 0.8 * t.sin()))
            })
            .collect()
    }

    /// A closed ring approximating a circle, first point repeated at the end
    pub fn circle_ring(n: usize, radius: f64) -> Vec<Coord<f64>> {
        let mut ring: Vec<Coord<f64>> = (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::TAU;
                c(radius * a.cos(), radius * a.sin())
            })
            .collect();
        ring.push(ring[0]);
        ring
    }

    /// True if `simplified` is an order-preserving subsequence of `original`
    pub fn is_subsequence(original: &[Coord<f64>], simplified: &[Coord<f64>]) -> bool {
        let mut it = original.iter();
        simplified.iter().all(|p| it.any(|q| q == p))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    type SequenceFn = fn(&[Coord<f64>], f64) -> Vec<Coord<f64>>;

    fn improved_dp(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
        improved_douglas_peucker(coords, tolerance, 60f64.to_radians(), 1.0)
    }

    fn lang_4(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
        lang(coords, tolerance, 4)
    }

    fn all_algorithms() -> Vec<(&'static str, SequenceFn, f64)> {
        vec![
            ("douglas_peucker", douglas_peucker as SequenceFn, 0.5),
            ("geo_douglas_peucker", geo_douglas_peucker as SequenceFn, 0.5),
            ("improved_douglas_peucker", improved_dp as SequenceFn, 0.5),
            ("visvalingam_whyatt", visvalingam_whyatt as SequenceFn, 0.5),
            ("reumann_witkam", reumann_witkam as SequenceFn, 0.5),
            ("perpendicular_distance", perpendicular_distance as SequenceFn, 0.5),
            ("radial_distance", radial_distance as SequenceFn, 0.5),
            ("nth_point", nth_point as SequenceFn, 4.0),
            ("lang", lang_4 as SequenceFn, 0.5),
            ("random", random as SequenceFn, 0.5),
        ]
    }

    #[test]
    fn test_endpoints_preserved_by_all_algorithms() {
        let line = wavy_line();
        let ring = circle_ring(64, 10.0);

        for (name, f, tolerance) in all_algorithms() {
            for input in [&line, &ring] {
                for tol in [0.0, tolerance, tolerance * 10.0] {
                    let tol = if name == "random" { tol.min(1.0) } else { tol };
                    let out = f(input, tol);
                    assert_eq!(out.first(), input.first(), "{name} dropped the first point");
                    assert_eq!(out.last(), input.last(), "{name} dropped the last point");
                    assert!(out.len() <= input.len(), "{name} added points");
                }
            }
        }
    }

    #[test]
    fn test_outputs_are_ordered_subsequences() {
        let line = wavy_line();
        for (name, f, tolerance) in all_algorithms() {
            let out = f(&line, tolerance);
            assert!(is_subsequence(&line, &out), "{name} reordered points");
        }
    }

    #[test]
    fn test_short_sequences_unchanged() {
        let two = coords(&[(0.0, 0.0), (5.0, 5.0)]);
        let one = coords(&[(1.0, 1.0)]);
        let empty: Vec<Coord<f64>> = Vec::new();

        for (name, f, _) in all_algorithms() {
            let tol = if name == "random" { 1.0 } else { 100.0 };
            assert_eq!(f(&two, tol), two, "{name}");
            assert_eq!(f(&one, tol), one, "{name}");
            assert_eq!(f(&empty, tol), empty, "{name}");
        }
    }

    #[test]
    fn test_monotonic_reduction() {
        let line = rising_wave();
        let monotonic: [(&str, SequenceFn); 5] = [
            ("douglas_peucker", douglas_peucker as SequenceFn),
            ("visvalingam_whyatt", visvalingam_whyatt as SequenceFn),
            ("reumann_witkam", reumann_witkam as SequenceFn),
            ("perpendicular_distance", perpendicular_distance as SequenceFn),
            ("radial_distance", radial_distance as SequenceFn),
        ];

        for (name, f) in monotonic {
            let mut previous = usize::MAX;
            for tol in [0.0, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0] {
                let len = f(&line, tol).len();
                assert!(
                    len <= previous,
                    "{name}: tolerance {tol} produced {len} points, more than {previous}"
                );
                previous = len;
            }
        }
    }
}
