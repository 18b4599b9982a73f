//! JSON reports written by the `simplify` and `metrics` commands

use crate::geojson::FeatureCollection;
use serde::Serialize;
use shapeshifter_lib::{BatchOutput, MemoryStats, MetricsReport};
use std::collections::BTreeMap;

/// Values keyed by algorithm name, then by tolerance
pub type ByAlgorithm<T> = BTreeMap<String, BTreeMap<String, T>>;

/// Output of `shapeshifter simplify`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyReport {
    pub simplified_data: ByAlgorithm<FeatureCollection>,
    /// Seconds spent in the batch
    pub elapsed_time: f64,
    /// Coordinate storage estimated from vertex counts
    pub estimated_memory: MemoryStats,
}

impl SimplifyReport {
    pub fn new(source: &FeatureCollection, output: &BatchOutput) -> Self {
        let mut simplified_data = ByAlgorithm::new();
        for (algorithm, tolerance, collection) in output.table.iter() {
            simplified_data
                .entry(algorithm.to_string())
                .or_default()
                .insert(tolerance.to_string(), source.with_geometries(collection));
        }

        Self {
            simplified_data,
            elapsed_time: output.stats.elapsed.as_secs_f64(),
            estimated_memory: output.stats.memory,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PointCounts {
    pub original: u64,
    pub simplified: ByAlgorithm<u64>,
}

/// Output of `shapeshifter metrics`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub point_counts: PointCounts,
    pub positional_errors: ByAlgorithm<f64>,
    pub perimeter: f64,
    /// Seconds spent in the batch, excluding the metrics themselves
    pub elapsed_time: f64,
}

impl MetricsSummary {
    pub fn new(report: &MetricsReport, output: &BatchOutput) -> Self {
        let mut simplified = ByAlgorithm::new();
        let mut positional_errors = ByAlgorithm::new();
        for entry in &report.entries {
            let algorithm = entry.algorithm.to_string();
            let tolerance = entry.tolerance.to_string();
            simplified
                .entry(algorithm.clone())
                .or_insert_with(BTreeMap::new)
                .insert(tolerance.clone(), entry.vertices);
            positional_errors
                .entry(algorithm)
                .or_insert_with(BTreeMap::new)
                .insert(tolerance, entry.positional_error);
        }

        Self {
            point_counts: PointCounts {
                original: report.original_vertices,
                simplified,
            },
            positional_errors,
            perimeter: report.perimeter,
            elapsed_time: output.stats.elapsed.as_secs_f64(),
        }
    }
}
