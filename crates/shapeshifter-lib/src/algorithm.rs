//! Algorithm identifiers, parameters and dispatch
//!
//! [`AlgorithmKind`] names an algorithm (what a request asks for); [`Algorithm`] is the
//! same choice with its parameters attached, matched exhaustively when simplifying.

use crate::{Result, ShapeError, simplify};
use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a simplification algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AlgorithmKind {
    DouglasPeucker,
    /// Douglas-Peucker from the `geo` crate, for comparison with the local one
    GeoDouglasPeucker,
    ImprovedDouglasPeucker,
    VisvalingamWhyatt,
    ReumannWitkam,
    PerpendicularDistance,
    RadialDistance,
    NthPoint,
    Lang,
    /// Removes a random fraction of points; not reproducible
    Random,
}

impl AlgorithmKind {
    /// Every algorithm, in display order
    pub const ALL: [AlgorithmKind; 10] = [
        AlgorithmKind::DouglasPeucker,
        AlgorithmKind::GeoDouglasPeucker,
        AlgorithmKind::ImprovedDouglasPeucker,
        AlgorithmKind::VisvalingamWhyatt,
        AlgorithmKind::ReumannWitkam,
        AlgorithmKind::PerpendicularDistance,
        AlgorithmKind::RadialDistance,
        AlgorithmKind::NthPoint,
        AlgorithmKind::Lang,
        AlgorithmKind::Random,
    ];

    /// Canonical kebab-case name
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmKind::DouglasPeucker => "douglas-peucker",
            AlgorithmKind::GeoDouglasPeucker => "geo-douglas-peucker",
            AlgorithmKind::ImprovedDouglasPeucker => "improved-douglas-peucker",
            AlgorithmKind::VisvalingamWhyatt => "visvalingam-whyatt",
            AlgorithmKind::ReumannWitkam => "reumann-witkam",
            AlgorithmKind::PerpendicularDistance => "perpendicular-distance",
            AlgorithmKind::RadialDistance => "radial-distance",
            AlgorithmKind::NthPoint => "nth-point",
            AlgorithmKind::Lang => "lang",
            AlgorithmKind::Random => "random",
        }
    }

    /// Short alias accepted by [`FromStr`]
    pub fn alias(self) -> &'static str {
        match self {
            AlgorithmKind::DouglasPeucker => "dp",
            AlgorithmKind::GeoDouglasPeucker => "geo-dp",
            AlgorithmKind::ImprovedDouglasPeucker => "idp",
            AlgorithmKind::VisvalingamWhyatt => "vw",
            AlgorithmKind::ReumannWitkam => "rw",
            AlgorithmKind::PerpendicularDistance => "pd",
            AlgorithmKind::RadialDistance => "rd",
            AlgorithmKind::NthPoint => "nth",
            AlgorithmKind::Lang => "lang",
            AlgorithmKind::Random => "random",
        }
    }

    /// Map a user-facing tolerance onto this algorithm's own unit
    ///
    /// One slider value drives every algorithm in a batch, but areas, strides and
    /// distances live on different scales: Visvalingam-Whyatt gets `t / 10`,
    /// perpendicular distance `t / 100`, Nth-point `t × 10`, everything else `t`.
    pub fn scale_tolerance(self, tolerance: f64) -> f64 {
        match self {
            AlgorithmKind::VisvalingamWhyatt => tolerance / 10.0,
            AlgorithmKind::PerpendicularDistance => tolerance / 100.0,
            AlgorithmKind::NthPoint => tolerance * 10.0,
            _ => tolerance,
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted || kind.alias() == wanted)
            .ok_or_else(|| ShapeError::UnknownAlgorithm(s.to_string()))
    }
}

/// Parameters of the improved Douglas-Peucker anchor selection
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImprovedDouglasPeuckerParams {
    /// Turning angle (radians) below which a point is a corner candidate
    pub angle_threshold: f64,
    /// Minimum distance between consecutive anchors
    pub distance_threshold: f64,
}

impl Default for ImprovedDouglasPeuckerParams {
    fn default() -> Self {
        Self {
            angle_threshold: 60f64.to_radians(),
            distance_threshold: 10.0,
        }
    }
}

/// Parameters of the Lang algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LangParams {
    /// Number of points spanned by each lookahead window
    pub lookahead: usize,
}

impl Default for LangParams {
    fn default() -> Self {
        Self { lookahead: 4 }
    }
}

/// Algorithm-specific constants, shared by every tolerance of a batch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlgorithmParams {
    pub improved_douglas_peucker: ImprovedDouglasPeuckerParams,
    pub lang: LangParams,
}

/// A simplification algorithm with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    DouglasPeucker,
    GeoDouglasPeucker,
    ImprovedDouglasPeucker(ImprovedDouglasPeuckerParams),
    VisvalingamWhyatt,
    ReumannWitkam,
    PerpendicularDistance,
    RadialDistance,
    NthPoint,
    Lang(LangParams),
    Random,
}

impl Algorithm {
    /// Attach the relevant parameters to an algorithm identifier
    pub fn new(kind: AlgorithmKind, params: &AlgorithmParams) -> Self {
        match kind {
            AlgorithmKind::DouglasPeucker => Algorithm::DouglasPeucker,
            AlgorithmKind::GeoDouglasPeucker => Algorithm::GeoDouglasPeucker,
            AlgorithmKind::ImprovedDouglasPeucker => {
                Algorithm::ImprovedDouglasPeucker(params.improved_douglas_peucker)
            }
            AlgorithmKind::VisvalingamWhyatt => Algorithm::VisvalingamWhyatt,
            AlgorithmKind::ReumannWitkam => Algorithm::ReumannWitkam,
            AlgorithmKind::PerpendicularDistance => Algorithm::PerpendicularDistance,
            AlgorithmKind::RadialDistance => Algorithm::RadialDistance,
            AlgorithmKind::NthPoint => Algorithm::NthPoint,
            AlgorithmKind::Lang => Algorithm::Lang(params.lang),
            AlgorithmKind::Random => Algorithm::Random,
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::DouglasPeucker => AlgorithmKind::DouglasPeucker,
            Algorithm::GeoDouglasPeucker => AlgorithmKind::GeoDouglasPeucker,
            Algorithm::ImprovedDouglasPeucker(_) => AlgorithmKind::ImprovedDouglasPeucker,
            Algorithm::VisvalingamWhyatt => AlgorithmKind::VisvalingamWhyatt,
            Algorithm::ReumannWitkam => AlgorithmKind::ReumannWitkam,
            Algorithm::PerpendicularDistance => AlgorithmKind::PerpendicularDistance,
            Algorithm::RadialDistance => AlgorithmKind::RadialDistance,
            Algorithm::NthPoint => AlgorithmKind::NthPoint,
            Algorithm::Lang(_) => AlgorithmKind::Lang,
            Algorithm::Random => AlgorithmKind::Random,
        }
    }

    /// Reject tolerances the algorithm cannot interpret
    ///
    /// Every tolerance must be finite and non-negative; [`Algorithm::Random`] also needs
    /// it to be a fraction no greater than 1.
    pub fn validate_tolerance(&self, tolerance: f64) -> Result<()> {
        let reason = if !tolerance.is_finite() {
            Some("tolerance must be finite")
        } else if tolerance < 0.0 {
            Some("tolerance must not be negative")
        } else if matches!(self, Algorithm::Random) && tolerance > 1.0 {
            Some("random removal fraction must be within [0, 1]")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ShapeError::InvalidTolerance {
                algorithm: self.kind(),
                tolerance,
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Simplify one coordinate sequence
    pub fn simplify(&self, coords: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
        match self {
            Algorithm::DouglasPeucker => simplify::douglas_peucker(coords, tolerance),
            Algorithm::GeoDouglasPeucker => simplify::geo_douglas_peucker(coords, tolerance),
            Algorithm::ImprovedDouglasPeucker(params) => simplify::improved_douglas_peucker(
                coords,
                tolerance,
                params.angle_threshold,
                params.distance_threshold,
            ),
            Algorithm::VisvalingamWhyatt => simplify::visvalingam_whyatt(coords, tolerance),
            Algorithm::ReumannWitkam => simplify::reumann_witkam(coords, tolerance),
            Algorithm::PerpendicularDistance => simplify::perpendicular_distance(coords, tolerance),
            Algorithm::RadialDistance => simplify::radial_distance(coords, tolerance),
            Algorithm::NthPoint => simplify::nth_point(coords, tolerance),
            Algorithm::Lang(params) => simplify::lang(coords, tolerance, params.lookahead),
            Algorithm::Random => simplify::random(coords, tolerance),
        }
    }
}
