//! Geometry traversal: applies a sequence algorithm to every line and ring of a collection
//!
//! The traversal is written once and parameterised over the sequence function, so every
//! algorithm gets the same ring-validity rules:
//!
//! - a polygon whose exterior falls below [`MIN_RING_LEN`] points becomes absent
//! - a hole that falls to [`MIN_HOLE_LEN`] points or fewer is dropped
//! - a multi-polygon drops collapsed parts and is absent when none survive
//! - lines are simplified as-is; other geometries pass through unchanged

use crate::{Algorithm, AlgorithmKind, AlgorithmParams, GeometryCollection, Result, metrics};
use geo::{Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};

/// A closed ring needs three distinct vertices plus the repeated closing point
pub const MIN_RING_LEN: usize = 4;

/// Holes with this many points or fewer are removed
pub const MIN_HOLE_LEN: usize = 2;

/// Simplify every entry of `original` with one algorithm and tolerance
///
/// The result has the same length as the input and is index-aligned with it. The
/// tolerance is validated up front (see [`Algorithm::validate_tolerance`]).
///
/// # Arguments
/// * `original` - The input collection, never modified
/// * `algorithm` - Which algorithm to run
/// * `tolerance` - Tolerance in the algorithm's own unit
/// * `params` - Algorithm-specific constants
pub fn simplify_collection(
    original: &[Option<Geometry<f64>>],
    algorithm: AlgorithmKind,
    tolerance: f64,
    params: &AlgorithmParams,
) -> Result<GeometryCollection> {
    #[cfg(feature = "profiling")]
    profiling::scope!("traversal::simplify_collection");

    let algorithm = Algorithm::new(algorithm, params);
    algorithm.validate_tolerance(tolerance)?;

    let simplified = simplify_collection_with(original, |coords| {
        algorithm.simplify(coords, tolerance)
    });

    tracing::debug!(
        algorithm = %algorithm.kind(),
        tolerance,
        vertices_before = metrics::count_vertices(original),
        vertices_after = metrics::count_vertices(&simplified),
        "Simplified collection"
    );

    Ok(simplified)
}

/// Apply an arbitrary sequence function to every line and ring of `original`
pub fn simplify_collection_with<F>(
    original: &[Option<Geometry<f64>>],
    simplify: F,
) -> GeometryCollection
where
    F: Fn(&[Coord<f64>]) -> Vec<Coord<f64>>,
{
    original
        .iter()
        .map(|entry| entry.as_ref().and_then(|geometry| simplify_geometry(geometry, &simplify)))
        .collect()
}

/// Simplify one geometry; `None` when a polygon collapsed
fn simplify_geometry<F>(geometry: &Geometry<f64>, simplify: &F) -> Option<Geometry<f64>>
where
    F: Fn(&[Coord<f64>]) -> Vec<Coord<f64>>,
{
    match geometry {
        Geometry::LineString(line) => Some(Geometry::LineString(simplify_line(line, simplify))),
        Geometry::MultiLineString(lines) => Some(Geometry::MultiLineString(MultiLineString::new(
            lines.iter().map(|line| simplify_line(line, simplify)).collect(),
        ))),
        Geometry::Polygon(polygon) => simplify_polygon(polygon, simplify).map(Geometry::Polygon),
        Geometry::MultiPolygon(multi) => {
            let parts: Vec<Polygon<f64>> = multi
                .iter()
                .filter_map(|polygon| simplify_polygon(polygon, simplify))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(Geometry::MultiPolygon(MultiPolygon::new(parts)))
            }
        }
        other => Some(other.clone()),
    }
}

#[inline]
fn simplify_line<F>(line: &LineString<f64>, simplify: &F) -> LineString<f64>
where
    F: Fn(&[Coord<f64>]) -> Vec<Coord<f64>>,
{
    LineString::new(simplify(&line.0))
}

/// Simplify exterior and holes; `None` when the exterior is no longer a ring
fn simplify_polygon<F>(polygon: &Polygon<f64>, simplify: &F) -> Option<Polygon<f64>>
where
    F: Fn(&[Coord<f64>]) -> Vec<Coord<f64>>,
{
    let exterior = simplify(&polygon.exterior().0);
    if exterior.len() < MIN_RING_LEN {
        return None;
    }

    let interiors = polygon
        .interiors()
        .iter()
        .map(|ring| simplify(&ring.0))
        .filter(|ring| ring.len() > MIN_HOLE_LEN)
        .map(LineString::new)
        .collect();

    Some(Polygon::new(LineString::new(exterior), interiors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeError;
    use crate::simplify::test_support::*;
    use geo::{Point, polygon};

    fn params() -> AlgorithmParams {
        AlgorithmParams::default()
    }

    fn square(size: f64) -> LineString<f64> {
        LineString::new(coords(&[
            (0.0, 0.0),
            (size, 0.0),
            (size, size),
            (0.0, size),
            (0.0, 0.0),
        ]))
    }

    #[test]
    fn test_line_simplified_directly() {
        let line = LineString::new(coords(&[(0.0, 0.0), (1.0, 0.1), (2.0, -0.1), (3.0, 0.0)]));
        let input = vec![Some(Geometry::LineString(line))];

        let out =
            simplify_collection(&input, AlgorithmKind::DouglasPeucker, 0.5, &params()).unwrap();
        assert_eq!(
            out,
            vec![Some(Geometry::LineString(LineString::new(coords(&[
                (0.0, 0.0),
                (3.0, 0.0)
            ]))))]
        );
    }

    #[test]
    fn test_collapsed_triangle_becomes_absent() {
        // A closed triangle has exactly 4 points; DP with a large tolerance keeps only the
        // repeated start point twice
        let triangle = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 2.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ];
        let input = vec![Some(Geometry::Polygon(triangle))];

        let out =
            simplify_collection(&input, AlgorithmKind::DouglasPeucker, 100.0, &params()).unwrap();
        assert_eq!(out, vec![None]);
        assert_eq!(metrics::count_vertices(&out), 0);
    }

    #[test]
    fn test_polygon_survives_small_tolerance() {
        let input = vec![Some(Geometry::Polygon(Polygon::new(square(10.0), vec![])))];
        let out =
            simplify_collection(&input, AlgorithmKind::DouglasPeucker, 0.1, &params()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_degenerate_holes_are_dropped() {
        let hole = LineString::new(coords(&[
            (4.0, 4.0),
            (4.5, 4.0),
            (4.5, 4.5),
            (4.0, 4.5),
            (4.0, 4.0),
        ]));
        let polygon = Polygon::new(square(100.0), vec![hole]);
        let input = vec![Some(Geometry::Polygon(polygon))];

        // Radial distance 5 keeps the exterior corners but reduces the tiny hole to its
        // two endpoints
        let out =
            simplify_collection(&input, AlgorithmKind::RadialDistance, 5.0, &params()).unwrap();
        let Some(Geometry::Polygon(simplified)) = &out[0] else {
            panic!("expected a polygon, got {:?}", out[0]);
        };
        assert_eq!(simplified.exterior(), &square(100.0));
        assert!(simplified.interiors().is_empty());
    }

    #[test]
    fn test_multipolygon_drops_collapsed_parts() {
        let big = Polygon::new(square(100.0), vec![]);
        let tiny = Polygon::new(
            LineString::new(coords(&[
                (200.0, 200.0),
                (200.5, 200.0),
                (200.5, 200.5),
                (200.0, 200.0),
            ])),
            vec![],
        );
        let input = vec![Some(Geometry::MultiPolygon(MultiPolygon::new(vec![
            big.clone(),
            tiny,
        ])))];

        let out =
            simplify_collection(&input, AlgorithmKind::DouglasPeucker, 1.0, &params()).unwrap();
        assert_eq!(
            out,
            vec![Some(Geometry::MultiPolygon(MultiPolygon::new(vec![big])))]
        );
    }

    #[test]
    fn test_multipolygon_fully_collapsed_is_absent() {
        let tiny = Polygon::new(
            LineString::new(coords(&[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5), (0.0, 0.0)])),
            vec![],
        );
        let input = vec![Some(Geometry::MultiPolygon(MultiPolygon::new(vec![
            tiny.clone(),
            tiny,
        ])))];

        let out =
            simplify_collection(&input, AlgorithmKind::DouglasPeucker, 1.0, &params()).unwrap();
        assert_eq!(out, vec![None]);
    }

    #[test]
    fn test_other_geometries_pass_through() {
        let input = vec![
            Some(Geometry::Point(Point::new(1.0, 2.0))),
            None,
            Some(Geometry::Point(Point::new(3.0, 4.0))),
        ];
        let out =
            simplify_collection(&input, AlgorithmKind::VisvalingamWhyatt, 10.0, &params())
                .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_multilinestring_members_simplified() {
        let a = LineString::new(coords(&[(0.0, 0.0), (1.0, 0.1), (2.0, 0.0)]));
        let b = LineString::new(coords(&[(5.0, 5.0), (6.0, 9.0), (7.0, 5.0)]));
        let input = vec![Some(Geometry::MultiLineString(MultiLineString::new(vec![a, b.clone()])))];

        let out =
            simplify_collection(&input, AlgorithmKind::DouglasPeucker, 1.0, &params()).unwrap();
        let expected_a = LineString::new(coords(&[(0.0, 0.0), (2.0, 0.0)]));
        assert_eq!(
            out,
            vec![Some(Geometry::MultiLineString(MultiLineString::new(vec![
                expected_a, b
            ])))]
        );
    }

    #[test]
    fn test_alignment_preserved() {
        let input: GeometryCollection = (0..10)
            .map(|i| {
                if i % 3 == 0 {
                    None
                } else {
                    Some(Geometry::LineString(LineString::new(wavy_line())))
                }
            })
            .collect();
        for kind in AlgorithmKind::ALL {
            let out = simplify_collection(&input, kind, 0.5, &params()).unwrap();
            assert_eq!(out.len(), input.len(), "{kind}");
            for (a, b) in input.iter().zip(&out) {
                assert_eq!(a.is_none(), b.is_none(), "{kind}");
            }
        }
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let input = vec![Some(Geometry::Polygon(Polygon::new(square(1.0), vec![])))];
        let err = simplify_collection(&input, AlgorithmKind::Random, 2.0, &params()).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidTolerance { .. }));
    }

    #[test]
    fn test_original_left_untouched() {
        let input = vec![Some(Geometry::LineString(LineString::new(wavy_line())))];
        let snapshot = input.clone();
        let _ = simplify_collection(&input, AlgorithmKind::VisvalingamWhyatt, 5.0, &params());
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_custom_sequence_function() {
        let input = vec![Some(Geometry::Polygon(Polygon::new(square(10.0), vec![])))];
        // A function that keeps only the endpoints always collapses rings
        let out = simplify_collection_with(&input, |coords| {
            vec![coords[0], coords[coords.len() - 1]]
        });
        assert_eq!(out, vec![None]);
    }
}
