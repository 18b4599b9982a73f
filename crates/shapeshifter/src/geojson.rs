//! GeoJSON documents and their conversion to and from `geo` geometries
//!
//! Only what the simplifier reads and writes is modelled: feature collections of
//! features whose geometry may be `null`. Positions keep their first two values;
//! altitudes are dropped.

use crate::error::CliError;
use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON position: `[x, y]` or `[x, y, z]`
pub type Position = Vec<f64>;

/// GeoJSON geometry object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<GeoJsonGeometry> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionTag {
    #[default]
    FeatureCollection,
}

/// GeoJSON feature; a `null` geometry is kept as `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// GeoJSON feature collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub tag: FeatureCollectionTag,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse a feature collection from JSON text
    pub fn from_json(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Convert every feature geometry, keeping `null` geometries as absent entries
    pub fn to_geometries(&self) -> Result<Vec<Option<Geometry<f64>>>, CliError> {
        self.features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                feature
                    .geometry
                    .as_ref()
                    .map(GeoJsonGeometry::to_geo)
                    .transpose()
                    .map_err(|err| match err {
                        CliError::InvalidGeoJson(reason) => {
                            CliError::InvalidGeoJson(format!("feature {index}: {reason}"))
                        }
                        other => other,
                    })
            })
            .collect()
    }

    /// A copy of this collection with geometries replaced, keeping ids and properties
    ///
    /// `geometries` must be index-aligned with the features.
    pub fn with_geometries(&self, geometries: &[Option<Geometry<f64>>]) -> FeatureCollection {
        FeatureCollection {
            tag: FeatureCollectionTag::FeatureCollection,
            features: self
                .features
                .iter()
                .zip(geometries)
                .map(|(feature, geometry)| Feature {
                    tag: FeatureTag::Feature,
                    id: feature.id.clone(),
                    geometry: geometry.as_ref().map(GeoJsonGeometry::from_geo),
                    properties: feature.properties.clone(),
                })
                .collect(),
        }
    }
}

fn coord(position: &Position) -> Result<Coord<f64>, CliError> {
    match position.as_slice() {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(CliError::InvalidGeoJson(format!(
            "position needs at least 2 values, got {}",
            position.len()
        ))),
    }
}

fn line(positions: &[Position]) -> Result<LineString<f64>, CliError> {
    positions
        .iter()
        .map(coord)
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>, CliError> {
    let mut rings = rings.iter().map(|ring| line(ring));
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString::new(vec![]));
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

#[inline]
fn position(coord: Coord<f64>) -> Position {
    vec![coord.x, coord.y]
}

fn positions(line: &LineString<f64>) -> Vec<Position> {
    line.0.iter().copied().map(position).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}

impl GeoJsonGeometry {
    /// Convert to a `geo` geometry
    pub fn to_geo(&self) -> Result<Geometry<f64>, CliError> {
        Ok(match self {
            GeoJsonGeometry::Point { coordinates } => Geometry::Point(Point(coord(coordinates)?)),
            GeoJsonGeometry::MultiPoint { coordinates } => Geometry::MultiPoint(MultiPoint::new(
                coordinates
                    .iter()
                    .map(|p| coord(p).map(Point))
                    .collect::<Result<_, _>>()?,
            )),
            GeoJsonGeometry::LineString { coordinates } => Geometry::LineString(line(coordinates)?),
            GeoJsonGeometry::MultiLineString { coordinates } => {
                Geometry::MultiLineString(MultiLineString::new(
                    coordinates
                        .iter()
                        .map(|l| line(l))
                        .collect::<Result<_, _>>()?,
                ))
            }
            GeoJsonGeometry::Polygon { coordinates } => Geometry::Polygon(polygon(coordinates)?),
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                Geometry::MultiPolygon(MultiPolygon::new(
                    coordinates
                        .iter()
                        .map(|p| polygon(p))
                        .collect::<Result<_, _>>()?,
                ))
            }
            GeoJsonGeometry::GeometryCollection { geometries } => {
                Geometry::GeometryCollection(geo::GeometryCollection(
                    geometries
                        .iter()
                        .map(GeoJsonGeometry::to_geo)
                        .collect::<Result<_, _>>()?,
                ))
            }
        })
    }

    /// Convert from a `geo` geometry; lines, rects and triangles become their GeoJSON
    /// equivalents
    pub fn from_geo(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(p) => GeoJsonGeometry::Point {
                coordinates: position(p.0),
            },
            Geometry::MultiPoint(points) => GeoJsonGeometry::MultiPoint {
                coordinates: points.iter().map(|p| position(p.0)).collect(),
            },
            Geometry::Line(l) => GeoJsonGeometry::LineString {
                coordinates: vec![position(l.start), position(l.end)],
            },
            Geometry::LineString(l) => GeoJsonGeometry::LineString {
                coordinates: positions(l),
            },
            Geometry::MultiLineString(lines) => GeoJsonGeometry::MultiLineString {
                coordinates: lines.iter().map(positions).collect(),
            },
            Geometry::Polygon(p) => GeoJsonGeometry::Polygon {
                coordinates: rings(p),
            },
            Geometry::MultiPolygon(polygons) => GeoJsonGeometry::MultiPolygon {
                coordinates: polygons.iter().map(rings).collect(),
            },
            Geometry::GeometryCollection(members) => GeoJsonGeometry::GeometryCollection {
                geometries: members.iter().map(GeoJsonGeometry::from_geo).collect(),
            },
            Geometry::Rect(r) => GeoJsonGeometry::Polygon {
                coordinates: rings(&r.to_polygon()),
            },
            Geometry::Triangle(t) => GeoJsonGeometry::Polygon {
                coordinates: rings(&t.to_polygon()),
            },
        }
    }
}
