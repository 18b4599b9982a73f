//! Simplifier - Runs every (algorithm, tolerance) combination over one collection
//!
//! Each combination is an independent unit of work reading the same original collection.
//! Units run on a dedicated rayon pool and the batch returns once all of them finished,
//! or with the first error encountered.

use crate::{
    AlgorithmKind, AlgorithmParams, GeometryCollection, Result, metrics, simplify_collection,
};

use geo::{Coord, Geometry};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Configuration for the simplifier
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Algorithm-specific constants shared by every unit
    pub params: AlgorithmParams,
    /// Map requested tolerances onto each algorithm's unit with
    /// [`AlgorithmKind::scale_tolerance`] before simplifying.
    /// Results stay keyed by the requested value.
    /// Default: false
    pub scale_tolerances: bool,
    /// Upper bound on worker threads; never more than the available parallelism.
    /// Default: None (use all available cores)
    pub max_workers: Option<usize>,
}

/// A tolerance usable as a map key
///
/// Ordered with [`f64::total_cmp`], so every value (including NaN) has a place.
/// Negative zero is stored as zero, so both spellings name the same cell.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct Tolerance(f64);

impl Tolerance {
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Tolerance {
    fn from(value: f64) -> Self {
        if value == 0.0 { Self(0.0) } else { Self(value) }
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

impl PartialEq for Tolerance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Tolerance {}

impl PartialOrd for Tolerance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tolerance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Tolerance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Simplified collections keyed by (algorithm, requested tolerance)
///
/// Every cell is index-aligned with the original collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    cells: BTreeMap<(AlgorithmKind, Tolerance), GeometryCollection>,
}

impl ResultTable {
    pub fn get(&self, algorithm: AlgorithmKind, tolerance: f64) -> Option<&GeometryCollection> {
        self.cells.get(&(algorithm, Tolerance::from(tolerance)))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells ordered by algorithm, then tolerance
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (AlgorithmKind, Tolerance, &GeometryCollection)> + '_ {
        self.cells
            .iter()
            .map(|(&(algorithm, tolerance), collection)| (algorithm, tolerance, collection))
    }

    /// Distinct algorithms present in the table
    pub fn algorithms(&self) -> Vec<AlgorithmKind> {
        let mut algorithms: Vec<_> = self.cells.keys().map(|&(algorithm, _)| algorithm).collect();
        algorithms.dedup();
        algorithms
    }

    /// Distinct tolerances present in the table, ascending
    pub fn tolerances(&self) -> Vec<f64> {
        let mut tolerances: Vec<_> = self.cells.keys().map(|&(_, tolerance)| tolerance).collect();
        tolerances.sort();
        tolerances.dedup();
        tolerances.into_iter().map(Tolerance::value).collect()
    }

    fn insert(
        &mut self,
        algorithm: AlgorithmKind,
        tolerance: Tolerance,
        collection: GeometryCollection,
    ) {
        self.cells.insert((algorithm, tolerance), collection);
    }
}

/// Estimated coordinate storage of a batch
///
/// Counts vertices and multiplies by the size of one coordinate. Allocator overhead and
/// the rest of the process are not measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MemoryStats {
    /// Bytes of coordinates in the original collection
    pub input_bytes: u64,
    /// Bytes of coordinates across every simplified collection
    pub output_bytes: u64,
}

impl MemoryStats {
    const BYTES_PER_VERTEX: u64 = std::mem::size_of::<Coord<f64>>() as u64;

    fn estimate(original: &[Option<Geometry<f64>>], table: &ResultTable) -> Self {
        let output_vertices: u64 = table
            .iter()
            .map(|(_, _, collection)| metrics::count_vertices(collection))
            .sum();
        Self {
            input_bytes: metrics::count_vertices(original) * Self::BYTES_PER_VERTEX,
            output_bytes: output_vertices * Self::BYTES_PER_VERTEX,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.input_bytes + self.output_bytes
    }
}

/// Statistics of one batch run
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchStats {
    /// Number of (algorithm, tolerance) units executed
    pub units: usize,
    /// Wall-clock time of the whole batch
    pub elapsed: Duration,
    pub memory: MemoryStats,
}

/// Result of [`Simplifier::run_batch`]
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub table: ResultTable,
    pub stats: BatchStats,
}

/// Runs simplification batches on a dedicated worker pool
pub struct Simplifier {
    config: Config,
    pool: rayon::ThreadPool,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Simplifier {
    /// Create a simplifier and its worker pool
    ///
    /// The pool has `min(max_workers, available parallelism)` threads, at least one.
    pub fn new(config: Config) -> Result<Self> {
        let available = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let workers = config
            .max_workers
            .map_or(available, |max| max.clamp(1, available));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("shapeshifter-worker-{i}"))
            .build()?;

        tracing::debug!(workers, "Created simplifier pool");
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of worker threads in the pool
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Simplify `original` with every combination of `algorithms` and `tolerances`
    ///
    /// Duplicate algorithms or tolerances are run once. The original collection is only
    /// read. If any unit fails (for instance a tolerance the algorithm rejects), the whole
    /// batch fails and no partial table is returned.
    ///
    /// # Arguments
    /// * `original` - The collection to simplify
    /// * `algorithms` - Algorithms to run
    /// * `tolerances` - Requested tolerances; table cells are keyed by these values
    ///
    /// # Returns
    /// The result table with timing and memory statistics
    pub fn run_batch(
        &self,
        original: &[Option<Geometry<f64>>],
        algorithms: &[AlgorithmKind],
        tolerances: &[f64],
    ) -> Result<BatchOutput> {
        #[cfg(feature = "profiling")]
        profiling::scope!("batch::run_batch");

        let start = instant::Instant::now();

        let algorithms = dedup_in_order(algorithms.iter().copied(), "algorithm");
        let tolerances =
            dedup_in_order(tolerances.iter().copied().map(Tolerance::from), "tolerance");

        let units: Vec<(AlgorithmKind, Tolerance)> = algorithms
            .iter()
            .flat_map(|&algorithm| tolerances.iter().map(move |&tolerance| (algorithm, tolerance)))
            .collect();

        tracing::info!(
            entries = original.len(),
            units = units.len(),
            workers = self.workers(),
            "Starting simplification batch"
        );

        let params = &self.config.params;
        let scale = self.config.scale_tolerances;
        let results = self.pool.install(|| {
            units
                .par_iter()
                .map(|&(algorithm, tolerance)| {
                    let effective = if scale {
                        algorithm.scale_tolerance(tolerance.value())
                    } else {
                        tolerance.value()
                    };
                    let simplified = simplify_collection(original, algorithm, effective, params)?;
                    Ok((algorithm, tolerance, simplified))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut table = ResultTable::default();
        for (algorithm, tolerance, simplified) in results {
            table.insert(algorithm, tolerance, simplified);
        }

        let stats = BatchStats {
            units: units.len(),
            elapsed: start.elapsed(),
            memory: MemoryStats::estimate(original, &table),
        };

        tracing::info!(
            units = stats.units,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            memory_bytes = stats.memory.total_bytes(),
            "Finished simplification batch"
        );

        Ok(BatchOutput { table, stats })
    }
}

/// Keep the first occurrence of every value, warning about the rest
fn dedup_in_order<T>(values: impl IntoIterator<Item = T>, what: &str) -> Vec<T>
where
    T: PartialEq + fmt::Display,
{
    let mut unique: Vec<T> = Vec::new();
    for value in values {
        if unique.contains(&value) {
            tracing::warn!("Ignoring duplicate {what} {value}");
        } else {
            unique.push(value);
        }
    }
    unique
}

/// Run a batch with [`Config::default`]
pub fn run_batch(
    original: &[Option<Geometry<f64>>],
    algorithms: &[AlgorithmKind],
    tolerances: &[f64],
) -> Result<BatchOutput> {
    Simplifier::new(Config::default())?.run_batch(original, algorithms, tolerances)
}
