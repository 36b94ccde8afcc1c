use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rb_ordered_tree::RbTree;
use std::hint::black_box;

struct KeyGenerator {
    rng: StdRng,
}

impl KeyGenerator {
    fn new() -> Self {
        Self {
            rng: StdRng::from_seed([0; 32]),
        }
    }

    fn next(&mut self) -> u64 {
        self.rng.gen()
    }
}

fn random_keys(count: usize) -> Vec<u64> {
    let mut gen = KeyGenerator::new();
    std::iter::repeat_with(|| gen.next()).take(count).collect()
}

// insert helper fn
fn tree_insert(keys: &[u64], bench: &mut Bencher) {
    bench.iter(|| {
        let mut tree: RbTree<u64> = RbTree::with_capacity(keys.len());
        for &key in keys {
            black_box(tree.insert(key));
        }
        tree
    });
}

// search helper fn, half of the lookups miss
fn tree_search(count: usize, bench: &mut Bencher) {
    let keys = random_keys(count * 2);
    let tree: RbTree<u64> = keys[..count].iter().copied().collect();
    bench.iter(|| {
        for key in &keys {
            black_box(tree.contains(key));
        }
    });
}

// in-order iteration helper fn
fn tree_iter(count: usize, bench: &mut Bencher) {
    let tree: RbTree<u64> = random_keys(count).into_iter().collect();
    bench.iter(|| black_box(tree.iter().fold(0u64, |acc, k| acc.wrapping_add(*k))));
}

fn bench_tree_insert(c: &mut Criterion) {
    for count in [100, 1000, 10_000, 100_000] {
        let keys = random_keys(count);
        c.bench_function(&format!("bench_tree_insert_random_{count}"), |b| {
            tree_insert(&keys, b)
        });
    }
    for count in [1000, 100_000] {
        let keys: Vec<u64> = (0..count as u64).collect();
        c.bench_function(&format!("bench_tree_insert_ascending_{count}"), |b| {
            tree_insert(&keys, b)
        });
    }
}

fn bench_tree_search(c: &mut Criterion) {
    c.bench_function("bench_tree_search_1000", |b| tree_search(1000, b));
    c.bench_function("bench_tree_search_100,000", |b| tree_search(100_000, b));
}

fn bench_tree_iter(c: &mut Criterion) {
    c.bench_function("bench_tree_iter_1000", |b| tree_iter(1000, b));
    c.bench_function("bench_tree_iter_100,000", |b| tree_iter(100_000, b));
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_tree_insert, bench_tree_search,
}

criterion_group! {
    name = benches_iter;
    config = criterion_config();
    targets = bench_tree_iter
}

criterion_main!(benches_basic_op, benches_iter);
