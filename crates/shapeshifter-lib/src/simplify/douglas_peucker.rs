//! Douglas-Peucker family: the classic split-at-farthest-point algorithm, an
//! anchor-segmented variant, and an adapter over the `geo` crate's implementation.

use super::{MIN_SIMPLIFIABLE_LEN, select};
use crate::utils;
use geo::{Coord, LineString, Simplify};

/// Simplify a sequence with the Douglas-Peucker algorithm
///
/// Finds the interior point farthest from the chord joining the first and last points.
/// If that distance exceeds `tolerance`, the sequence is split there and both halves are
/// processed again; otherwise the whole range collapses to its two endpoints. Ties go to
/// the first point reaching the maximum.
///
/// # Example
/// ```
/// use geo::Coord;
/// use shapeshifter_lib::simplify::douglas_peucker;
///
/// let line = vec![
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.1 },
///     Coord { x: 2.0, y: -0.1 },
///     Coord { x: 3.0, y: 0.0 },
/// ];
/// let simplified = douglas_peucker(&line, 0.5);
/// assert_eq!(simplified, vec![line[0], line[3]]);
/// ```
pub fn douglas_peucker(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    if coords.len() < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }
    select(coords, &douglas_peucker_indices(coords, tolerance))
}

/// Douglas-Peucker returning the indices of retained points, in ascending order
///
/// Ranges are processed from an explicit work stack instead of recursion, so very long
/// sequences cannot overflow the call stack.
pub fn douglas_peucker_indices(coords: &[Coord<f64>], tolerance: f64) -> Vec<usize> {
    let n = coords.len();
    if n < MIN_SIMPLIFIABLE_LEN {
        return (0..n).collect();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let (first, last) = (coords[start], coords[end]);
        let mut max_distance = 0.0;
        let mut max_index = start;
        for (i, &point) in coords.iter().enumerate().take(end).skip(start + 1) {
            let distance = utils::perpendicular_distance(point, first, last);
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }

        if max_distance > tolerance {
            keep[max_index] = true;
            stack.push((max_index, end));
            stack.push((start, max_index));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}

/// Indices of the anchor points used by [`improved_douglas_peucker`]
///
/// The first and last points are always anchors. An interior point becomes an anchor when
/// its turning angle is below `angle_threshold` (radians) and it lies at least
/// `distance_threshold` away from the previously selected anchor.
pub fn select_anchor_indices(
    coords: &[Coord<f64>],
    angle_threshold: f64,
    distance_threshold: f64,
) -> Vec<usize> {
    let n = coords.len();
    if n < 2 {
        return (0..n).collect();
    }

    let mut anchors = vec![0];
    for i in 1..n - 1 {
        let angle = utils::turning_angle(coords[i - 1], coords[i], coords[i + 1]);
        if angle >= angle_threshold {
            continue;
        }
        // anchors is never empty
        let previous = coords[anchors[anchors.len() - 1]];
        if utils::point_distance(coords[i], previous) >= distance_threshold {
            anchors.push(i);
        }
    }
    anchors.push(n - 1);
    anchors
}

/// Douglas-Peucker applied independently between sharp-corner anchors
///
/// Sharp turns (see [`select_anchor_indices`]) are pinned before simplification so the
/// corners of a shape survive tolerances that would otherwise cut across them. Each
/// anchor-to-anchor slice is simplified with [`douglas_peucker`] and the results are
/// joined, keeping every junction once.
pub fn improved_douglas_peucker(
    coords: &[Coord<f64>],
    tolerance: f64,
    angle_threshold: f64,
    distance_threshold: f64,
) -> Vec<Coord<f64>> {
    if coords.len() < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }

    let anchors = select_anchor_indices(coords, angle_threshold, distance_threshold);
    let mut simplified = Vec::with_capacity(anchors.len() * 2);

    for pair in anchors.windows(2) {
        let segment = &coords[pair[0]..=pair[1]];
        let indices = douglas_peucker_indices(segment, tolerance);
        // The segment end is the next segment's start
        simplified.extend(indices[..indices.len() - 1].iter().map(|&i| segment[i]));
    }
    simplified.push(coords[coords.len() - 1]);

    simplified
}

/// Douglas-Peucker as implemented by the `geo` crate
pub fn geo_douglas_peucker(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    if coords.len() < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }
    LineString::from(coords.to_vec()).simplify(tolerance).0
}
