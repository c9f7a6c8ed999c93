//! Timing harness
//!
//! Generates distinct random values, times each tree operation over a fixed
//! number of repetitions per input size, and reports mean and standard
//! deviation per operation in a plain-text report. Inputs come from a
//! seeded multiplicative congruential generator, so runs are reproducible.
//!
//! The harness consumes the tree only through its public operations; it is
//! a collaborator, not part of the core.

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::tree::BlockTree;
use crate::Result;

/// Repetitions per (operation, size) pair
const REPETITIONS: usize = 15;

/// Harness parameters
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Input sizes to sweep
    pub sizes: Vec<usize>,
    /// Leaf capacity of the benchmarked trees
    pub capacity: usize,
    /// Generator seed
    pub seed: u64,
}

impl BenchConfig {
    /// Default sweep: 5, 50 and 500 elements at capacity 16
    pub fn new() -> Self {
        Self {
            sizes: vec![5, 50, 500],
            capacity: 16,
            seed: 0x5EED,
        }
    }
}

/// Mean and spread for one timed operation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct OperationStats {
    /// Operation label
    pub operation: String,
    /// Mean wall time in milliseconds
    pub mean_ms: f64,
    /// Square root of the timing variance, reported as `MSE (ms)`
    pub std_dev_ms: f64,
}

/// All operations timed at one input size
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SizeReport {
    /// Number of elements inserted before timing
    pub elements: usize,
    /// Per-operation statistics
    pub operations: Vec<OperationStats>,
}

/// Full benchmark report
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct BenchReport {
    /// One entry per swept input size
    pub runs: Vec<SizeReport>,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            writeln!(f, "Elements: {}", run.elements)?;
            for op in &run.operations {
                writeln!(
                    f,
                    "\tOperation - {}: Mean (ms): {:.6}; MSE (ms): {:.6}",
                    op.operation, op.mean_ms, op.std_dev_ms
                )?;
            }
        }
        Ok(())
    }
}

/// Seeded multiplicative congruential generator
#[derive(Debug)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        self.state
    }
}

/// Distinct random values, insertion-deduplicated through an ordered set
fn generate_elements(rng: &mut Lcg, count: usize) -> Vec<i64> {
    let mut set = BTreeSet::new();
    while set.len() < count {
        set.insert((rng.next() >> 16) as i64 - (1i64 << 46));
    }
    set.into_iter().collect()
}

fn statistics(times_ms: &[f64]) -> (f64, f64) {
    let n = times_ms.len() as f64;
    let mean = times_ms.iter().sum::<f64>() / n;
    let variance = times_ms
        .iter()
        .map(|t| (t - mean) * (t - mean))
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

/// Time `op` over fresh trees, one per repetition
///
/// `prepare` builds the tree the operation runs against; only `op` itself
/// is inside the timed window.
fn time_operation<P, O>(
    operation: &str,
    rng: &mut Lcg,
    elements: usize,
    capacity: usize,
    mut prepare: P,
    mut op: O,
) -> OperationStats
where
    P: FnMut(&mut BlockTree<i64>, &[i64]),
    O: FnMut(&mut BlockTree<i64>, &[i64]),
{
    let mut times = Vec::with_capacity(REPETITIONS);
    for _ in 0..REPETITIONS {
        let values = generate_elements(rng, elements);
        let mut tree = BlockTree::new(capacity);
        prepare(&mut tree, &values);
        let start = Instant::now();
        op(&mut tree, &values);
        times.push(start.elapsed().as_secs_f64() * 1_000.0);
    }
    let (mean_ms, std_dev_ms) = statistics(&times);
    OperationStats {
        operation: operation.to_string(),
        mean_ms,
        std_dev_ms,
    }
}

fn fill(tree: &mut BlockTree<i64>, values: &[i64]) {
    for &v in values {
        tree.insert(v);
    }
}

/// Run the full sweep
pub fn run(config: &BenchConfig) -> BenchReport {
    let mut rng = Lcg::new(config.seed);
    let mut runs = Vec::with_capacity(config.sizes.len());

    for &elements in &config.sizes {
        info!(elements, "benchmarking");
        let capacity = config.capacity;
        let operations = vec![
            time_operation("Insert", &mut rng, elements, capacity, |_, _| {}, fill),
            time_operation("Sorting", &mut rng, elements, capacity, fill, |tree, _| {
                let _ = tree.sort();
            }),
            time_operation(
                "Removing by element",
                &mut rng,
                elements,
                capacity,
                fill,
                |tree, values| {
                    tree.remove(values[0]);
                    tree.remove(values[values.len() / 2]);
                    tree.remove(values[values.len() - 1]);
                },
            ),
            time_operation(
                "Removing by index",
                &mut rng,
                elements,
                capacity,
                fill,
                |tree, values| {
                    let _ = tree.remove_by_index(values.len() - 1);
                    let _ = tree.remove_by_index(values.len() / 2);
                    let _ = tree.remove_by_index(0);
                },
            ),
            time_operation(
                "Getting by index",
                &mut rng,
                elements,
                capacity,
                fill,
                |tree, values| {
                    let _ = tree.get_by_index(0);
                    let _ = tree.get_by_index(values.len() / 2);
                    let _ = tree.get_by_index(values.len() - 1);
                },
            ),
            time_operation("Traversal", &mut rng, elements, capacity, fill, |tree, _| {
                let _ = tree.to_vec();
            }),
        ];
        runs.push(SizeReport {
            elements,
            operations,
        });
    }
    BenchReport { runs }
}

/// Write the report to `path` through a scoped buffered writer
pub fn write_report(report: &BenchReport, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write!(writer, "{report}")?;
    writer.flush()?;
    Ok(())
}
