//! Shapeshifter Library - Vector Geometry Simplification Core
//!
//! This library reduces the vertex count of 2D geometries (lines, polygons with holes,
//! multi-polygons) while bounding the deviation from the original shape, and measures how
//! well each reduction preserves it.
//!
//! # Architecture
//!
//! - **[`simplify`]**: Coordinate-sequence algorithms (Douglas-Peucker, Visvalingam-Whyatt, ...)
//! - **[`Algorithm`]** / **[`AlgorithmKind`]**: Closed enum dispatch over those algorithms
//! - **[`simplify_collection`]**: Applies one algorithm to every ring and line of a collection
//! - **[`Simplifier`]**: Runs every (algorithm × tolerance) combination on a worker pool
//! - **[`metrics`]**: Vertex counts, positional error and perimeter
//!
//! # Collections
//!
//! A [`GeometryCollection`] is index-aligned with its source: entry `i` of a simplified
//! collection always corresponds to entry `i` of the original. An entry is `None` when
//! simplification collapsed a polygon below a valid ring.

mod algorithm;
mod batch;
pub mod metrics;
pub mod simplify;
mod traversal;
pub mod utils;

use geo::Geometry;

// Public API exports
pub use algorithm::{
    Algorithm, AlgorithmKind, AlgorithmParams, ImprovedDouglasPeuckerParams, LangParams,
};
pub use batch::{
    BatchOutput, BatchStats, Config, MemoryStats, ResultTable, Simplifier, Tolerance, run_batch,
};
pub use metrics::{
    MetricsEntry, MetricsReport, count_vertices, evaluate, perimeter, positional_error,
};
pub use traversal::{simplify_collection, simplify_collection_with};

/// Index-aligned list of optional geometries; `None` marks an absent entry
pub type GeometryCollection = Vec<Option<Geometry<f64>>>;

/// Error types for simplification and metrics
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid tolerance {tolerance} for {algorithm}: {reason}")]
    InvalidTolerance {
        algorithm: AlgorithmKind,
        tolerance: f64,
        reason: &'static str,
    },

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Collection length mismatch: original has {original} entries, simplified has {simplified}")]
    LengthMismatch { original: usize, simplified: usize },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, ShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(Config) -> Result<Simplifier> = Simplifier::new;
        let _: fn() -> Config = Config::default;
        let _: fn(&[Option<Geometry<f64>>]) -> u64 = count_vertices;
    }

    #[test]
    fn test_error_messages() {
        let err = ShapeError::LengthMismatch {
            original: 3,
            simplified: 2,
        };
        assert_eq!(
            err.to_string(),
            "Collection length mismatch: original has 3 entries, simplified has 2"
        );

        let err = ShapeError::UnknownAlgorithm("foo".to_string());
        assert_eq!(err.to_string(), "Unknown algorithm: foo");
    }
}
