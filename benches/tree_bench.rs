//! Performance benchmarks

use blocktree::BlockTree;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn filled_tree(n: i64, capacity: usize) -> BlockTree<i64> {
    let mut tree = BlockTree::new(capacity);
    // Deterministic scramble so inserts hit many leaves
    for i in 0..n {
        tree.insert((i * 2_654_435_761) % n);
    }
    tree
}

fn benchmark_insert(c: &mut Criterion) {
    c.bench_function("insert_1000_cap16", |b| {
        b.iter(|| black_box(filled_tree(1_000, 16)));
    });
}

fn benchmark_get_by_index(c: &mut Criterion) {
    let tree = filled_tree(1_000, 16);
    c.bench_function("get_by_index_1000_cap16", |b| {
        b.iter(|| {
            for i in (0..1_000).step_by(37) {
                black_box(tree.get_by_index(i).unwrap());
            }
        });
    });
}

fn benchmark_sort(c: &mut Criterion) {
    c.bench_function("sort_1000_cap16", |b| {
        b.iter_batched(
            || filled_tree(1_000, 16),
            |mut tree| {
                tree.sort().unwrap();
                black_box(tree)
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_remove_by_index(c: &mut Criterion) {
    c.bench_function("drain_front_1000_cap16", |b| {
        b.iter_batched(
            || filled_tree(1_000, 16),
            |mut tree| {
                while !tree.is_empty() {
                    tree.remove_by_index(0).unwrap();
                }
                black_box(tree)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_get_by_index,
    benchmark_sort,
    benchmark_remove_by_index
);
criterion_main!(benches);
