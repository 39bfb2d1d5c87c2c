use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;

use lexitree::{Mode, WordIndex};

const N: usize = 10_000;

// ─── Helper functions to generate word sequences ────────────────────────────

fn ordered_words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("w{i:06}")).collect()
}

fn random_words(n: usize) -> Vec<String> {
    // Use a simple LCG for a deterministic pseudo-random sequence
    let mut words = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        words.push(format!("w{:06}", (x >> 33) % 1_000_000));
    }
    words
}

fn filled_index(words: &[String]) -> WordIndex {
    let mut index = WordIndex::new();
    for word in words {
        index.insert(word).unwrap();
    }
    index
}

// ─── Insert benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");
    let words = ordered_words(N);

    group.bench_function(BenchmarkId::new("WordIndex/rbt", N), |b| {
        b.iter(|| {
            let mut index = WordIndex::new();
            for word in &words {
                index.insert(word).unwrap();
            }
            index
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map: BTreeMap<&str, u32> = BTreeMap::new();
            for word in &words {
                *map.entry(word).or_insert(0) += 1;
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    let words = random_words(N);

    group.bench_function(BenchmarkId::new("WordIndex/rbt", N), |b| {
        b.iter(|| {
            let mut index = WordIndex::new();
            for word in &words {
                index.insert(word).unwrap();
            }
            index
        });
    });

    // Random input keeps an unbalanced BST honest enough to compare.
    group.bench_function(BenchmarkId::new("WordIndex/bst", N), |b| {
        b.iter(|| {
            let mut index = WordIndex::with_mode(Mode::Bst);
            for word in &words {
                index.insert(word).unwrap();
            }
            index
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map: BTreeMap<&str, u32> = BTreeMap::new();
            for word in &words {
                *map.entry(word).or_insert(0) += 1;
            }
            map
        });
    });

    group.finish();
}

// ─── Search benchmarks ──────────────────────────────────────────────────────

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_random");
    let words = random_words(N);
    let probes = random_words(N);

    let index = filled_index(&words);
    group.bench_function(BenchmarkId::new("WordIndex/rbt", N), |b| {
        b.iter(|| probes.iter().filter(|word| index.contains(word)).count());
    });

    let mut map: BTreeMap<&str, u32> = BTreeMap::new();
    for word in &words {
        *map.entry(word).or_insert(0) += 1;
    }
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| probes.iter().filter(|word| map.contains_key(word.as_str())).count());
    });

    group.finish();
}

// ─── Remove benchmarks ──────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_random");
    let words = random_words(N);

    group.bench_function(BenchmarkId::new("WordIndex/rbt", N), |b| {
        b.iter_with_setup(
            || filled_index(&words),
            |mut index| {
                for word in &words {
                    index.remove(word);
                }
                index
            },
        );
    });

    group.finish();
}

criterion_group!(benches, bench_insert_ordered, bench_insert_random, bench_search, bench_remove);
criterion_main!(benches);
