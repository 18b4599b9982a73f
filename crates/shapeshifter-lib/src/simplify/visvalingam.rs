//! Visvalingam-Whyatt simplification by effective triangle area.

use super::{MIN_SIMPLIFIABLE_LEN, select};
use crate::utils;
use geo::Coord;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Candidate removal in the priority queue
#[derive(Debug, Clone, Copy)]
struct Candidate {
    area: f64,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Smallest area first, then the earliest point
    fn cmp(&self, other: &Self) -> Ordering {
        self.area
            .total_cmp(&other.area)
            .then(self.index.cmp(&other.index))
    }
}

/// Simplify a sequence with the Visvalingam-Whyatt algorithm
///
/// Each interior point is weighted by the area of the triangle it forms with its two
/// neighbours. The point with the globally smallest area is removed and its neighbours
/// are re-weighted, until the smallest remaining area is at least `tolerance` or only
/// two points are left. Equal areas are removed in sequence order.
///
/// `tolerance` is an area, in squared coordinate units. A tolerance of zero removes nothing.
pub fn visvalingam_whyatt(coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    if coords.len() < MIN_SIMPLIFIABLE_LEN {
        return coords.to_vec();
    }
    select(coords, &visvalingam_whyatt_indices(coords, tolerance))
}

/// Visvalingam-Whyatt returning the indices of retained points, in ascending order
///
/// Uses a min-heap with lazy invalidation, O(n log n) overall.
pub fn visvalingam_whyatt_indices(coords: &[Coord<f64>], tolerance: f64) -> Vec<usize> {
    let n = coords.len();
    if n < MIN_SIMPLIFIABLE_LEN {
        return (0..n).collect();
    }

    // Doubly linked list over the surviving points
    let mut prev: Vec<usize> = (0..n).map(|i| i.wrapping_sub(1)).collect();
    let mut next: Vec<usize> = (1..=n).collect();
    let mut areas = vec![f64::INFINITY; n];
    let mut removed = vec![false; n];
    let mut remaining = n;

    let mut heap = BinaryHeap::with_capacity(n);
    for i in 1..n - 1 {
        areas[i] = utils::triangle_area(coords[i - 1], coords[i], coords[i + 1]);
        heap.push(Reverse(Candidate {
            area: areas[i],
            index: i,
        }));
    }

    while remaining >= MIN_SIMPLIFIABLE_LEN {
        let Some(Reverse(candidate)) = heap.pop() else {
            break;
        };
        let i = candidate.index;

        // Stale entry: the point is gone or its area changed since it was queued
        if removed[i] || candidate.area.to_bits() != areas[i].to_bits() {
            continue;
        }
        if candidate.area >= tolerance {
            break;
        }

        removed[i] = true;
        remaining -= 1;
        let (p, q) = (prev[i], next[i]);
        next[p] = q;
        prev[q] = p;

        for neighbour in [p, q] {
            // Endpoints are never weighted
            if neighbour == 0 || neighbour == n - 1 {
                continue;
            }
            areas[neighbour] = utils::triangle_area(
                coords[prev[neighbour]],
                coords[neighbour],
                coords[next[neighbour]],
            );
            heap.push(Reverse(Candidate {
                area: areas[neighbour],
                index: neighbour,
            }));
        }
    }

    (0..n).filter(|&i| !removed[i]).collect()
}
