//! Accuracy metrics for comparing a simplified collection against its original
//!
//! Positional error is an approximation: it walks the original points while tracking the
//! simplified segment they belong to, which assumes the simplified sequence is a literal
//! subsequence of the original. Every algorithm in [`crate::simplify`] satisfies that.

use crate::{AlgorithmKind, Result, ResultTable, ShapeError, utils};
use geo::{Coord, Euclidean, Geometry, Length, LineString, Polygon};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metrics of one (algorithm, tolerance) cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricsEntry {
    pub algorithm: AlgorithmKind,
    pub tolerance: f64,
    /// Vertices left after simplification
    pub vertices: u64,
    pub positional_error: f64,
}

/// Metrics of a whole result table against its original collection
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricsReport {
    pub original_vertices: u64,
    pub perimeter: f64,
    /// One entry per table cell, in table order
    pub entries: Vec<MetricsEntry>,
}

impl MetricsReport {
    /// Entry for one cell, if the table had it
    pub fn get(&self, algorithm: AlgorithmKind, tolerance: f64) -> Option<&MetricsEntry> {
        self.entries
            .iter()
            .find(|entry| entry.algorithm == algorithm && entry.tolerance == tolerance)
    }
}

/// Total number of vertices in a collection
///
/// Rings count their repeated closing point. Absent entries, rects, triangles and lines
/// (single segments) contribute nothing.
pub fn count_vertices(collection: &[Option<Geometry<f64>>]) -> u64 {
    collection
        .iter()
        .flatten()
        .map(geometry_vertices)
        .sum()
}

fn geometry_vertices(geometry: &Geometry<f64>) -> u64 {
    match geometry {
        Geometry::Point(_) => 1,
        Geometry::MultiPoint(points) => points.0.len() as u64,
        Geometry::LineString(line) => line.0.len() as u64,
        Geometry::MultiLineString(lines) => lines.iter().map(|line| line.0.len() as u64).sum(),
        Geometry::Polygon(polygon) => polygon_vertices(polygon),
        Geometry::MultiPolygon(polygons) => polygons.iter().map(polygon_vertices).sum(),
        // Nested collections only count their polygons and lines
        Geometry::GeometryCollection(members) => members
            .iter()
            .map(|member| match member {
                Geometry::Polygon(polygon) => polygon_vertices(polygon),
                Geometry::LineString(line) => line.0.len() as u64,
                _ => 0,
            })
            .sum(),
        _ => 0,
    }
}

#[inline]
fn polygon_vertices(polygon: &Polygon<f64>) -> u64 {
    polygon.exterior().0.len() as u64
        + polygon
            .interiors()
            .iter()
            .map(|ring| ring.0.len() as u64)
            .sum::<u64>()
}

/// Positional error between an original sequence and its simplification
///
/// For each original point, adds its distance to the current simplified segment. The
/// segment advances when the original point equals the segment's end, and the walk stops
/// once the last segment is reached.
///
/// # Arguments
/// * `original` - The unsimplified points
/// * `simplified` - An ordered subsequence of `original` sharing its endpoints
///
/// # Returns
/// The summed distance, or [`ShapeError::InvalidShape`] if a changed `simplified` has
/// fewer than two points while `original` has any
pub fn sequence_positional_error(
    original: &[Coord<f64>],
    simplified: &[Coord<f64>],
) -> Result<f64> {
    // Untouched single-point sequences have nothing to measure
    if original.is_empty() || original == simplified {
        return Ok(0.0);
    }
    if simplified.len() < 2 {
        return Err(ShapeError::InvalidShape(format!(
            "simplified sequence has {} points, at least 2 are needed to measure error",
            simplified.len()
        )));
    }

    let mut total = 0.0;
    let mut segment = 0;
    for &point in original {
        let (start, end) = (simplified[segment], simplified[segment + 1]);
        total += utils::perpendicular_distance(point, start, end);

        if point == end {
            segment += 1;
            if segment >= simplified.len() - 1 {
                break;
            }
        }
    }
    Ok(total)
}

/// Positional error summed over two index-aligned collections
///
/// Pairs where either side is absent contribute nothing. Each simplified hole, part or
/// member line is measured against the next original one starting at the same
/// coordinate, so rings dropped by the traversal are skipped instead of shifting the
/// pairing. Originals without a partner are ignored.
///
/// # Errors
/// [`ShapeError::LengthMismatch`] when the collections differ in length, and
/// [`ShapeError::InvalidShape`] when an aligned pair has different geometry kinds.
pub fn positional_error(
    original: &[Option<Geometry<f64>>],
    simplified: &[Option<Geometry<f64>>],
) -> Result<f64> {
    #[cfg(feature = "profiling")]
    profiling::scope!("metrics::positional_error");

    if original.len() != simplified.len() {
        return Err(ShapeError::LengthMismatch {
            original: original.len(),
            simplified: simplified.len(),
        });
    }

    original
        .iter()
        .zip(simplified)
        .enumerate()
        .filter_map(|(index, pair)| match pair {
            (Some(a), Some(b)) => Some((index, a, b)),
            _ => None,
        })
        .try_fold(0.0, |total, (index, a, b)| {
            geometry_positional_error(a, b)
                .map(|error| total + error)
                .map_err(|err| match err {
                    ShapeError::InvalidShape(reason) => {
                        ShapeError::InvalidShape(format!("entry {index}: {reason}"))
                    }
                    other => other,
                })
        })
}

fn geometry_positional_error(
    original: &Geometry<f64>,
    simplified: &Geometry<f64>,
) -> Result<f64> {
    match (original, simplified) {
        (Geometry::LineString(a), Geometry::LineString(b)) => line_error(a, b),
        (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
            pair_by_start(&a.0, &b.0, line_start)
                .try_fold(0.0, |total, (a, b)| Ok(total + line_error(a, b)?))
        }
        (Geometry::Polygon(a), Geometry::Polygon(b)) => polygon_error(a, b),
        (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => {
            pair_by_start(&a.0, &b.0, |polygon: &Polygon<f64>| line_start(polygon.exterior()))
                .try_fold(0.0, |total, (a, b)| Ok(total + polygon_error(a, b)?))
        }
        (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => Ok(0.0),
        (a, b) => Err(ShapeError::InvalidShape(format!(
            "cannot compare {} with {}",
            kind_name(a),
            kind_name(b)
        ))),
    }
}

#[inline]
fn line_error(original: &LineString<f64>, simplified: &LineString<f64>) -> Result<f64> {
    sequence_positional_error(&original.0, &simplified.0)
}

fn polygon_error(original: &Polygon<f64>, simplified: &Polygon<f64>) -> Result<f64> {
    let mut total = line_error(original.exterior(), simplified.exterior())?;
    for (a, b) in pair_by_start(original.interiors(), simplified.interiors(), line_start) {
        total += line_error(a, b)?;
    }
    Ok(total)
}

#[inline]
fn line_start(line: &LineString<f64>) -> Option<Coord<f64>> {
    line.0.first().copied()
}

/// Match each simplified item with the next original item sharing its start
///
/// Simplification keeps endpoints and the order of surviving rings, so a single forward
/// scan over `original` finds every partner.
fn pair_by_start<'a, T, K>(
    original: &'a [T],
    simplified: &'a [T],
    start: K,
) -> impl Iterator<Item = (&'a T, &'a T)>
where
    K: Fn(&T) -> Option<Coord<f64>>,
{
    let mut remaining = original.iter();
    simplified.iter().filter_map(move |item| {
        let key = start(item);
        remaining
            .by_ref()
            .find(|candidate| start(*candidate) == key)
            .map(|partner| (partner, item))
    })
}

fn kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Total length of every line and polygon ring in a collection
pub fn perimeter(collection: &[Option<Geometry<f64>>]) -> f64 {
    collection.iter().flatten().map(geometry_length).sum()
}

fn geometry_length(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::LineString(line) => Euclidean.length(line),
        Geometry::MultiLineString(lines) => Euclidean.length(lines),
        Geometry::Polygon(polygon) => polygon_length(polygon),
        Geometry::MultiPolygon(polygons) => polygons.iter().map(polygon_length).sum(),
        Geometry::GeometryCollection(members) => members.iter().map(geometry_length).sum(),
        _ => 0.0,
    }
}

#[inline]
fn polygon_length(polygon: &Polygon<f64>) -> f64 {
    Euclidean.length(polygon.exterior())
        + polygon
            .interiors()
            .iter()
            .map(|ring| Euclidean.length(ring))
            .sum::<f64>()
}

/// Vertex counts and positional error for every cell of a result table
///
/// Cells are measured in parallel on the current rayon pool.
pub fn evaluate(
    original: &[Option<Geometry<f64>>],
    table: &ResultTable,
) -> Result<MetricsReport> {
    #[cfg(feature = "profiling")]
    profiling::scope!("metrics::evaluate");

    let cells: Vec<_> = table.iter().collect();
    let entries = cells
        .par_iter()
        .map(|&(algorithm, tolerance, simplified)| -> Result<MetricsEntry> {
            Ok(MetricsEntry {
                algorithm,
                tolerance: tolerance.value(),
                vertices: count_vertices(simplified),
                positional_error: positional_error(original, simplified)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MetricsReport {
        original_vertices: count_vertices(original),
        perimeter: perimeter(original),
        entries,
    })
}
