//! Criterion benchmarks for the CV objective.
//!
//! Measures objective evaluation across matrix sizes to characterise how the
//! Beta CDF cost scales with the number of cells.

use connectivity_core::{ConnectivityMatrix, Count};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build an `n x n` matrix with a deterministic, uneven count pattern.
fn generate_matrix(n: usize) -> ConnectivityMatrix {
    let names: Vec<String> = (0..n).map(|i| format!("site-{}", i)).collect();
    let mut matrix = ConnectivityMatrix::new(names.clone(), names).unwrap();
    let counts: Vec<Vec<Count>> = (0..n)
        .map(|i| (0..n).map(|j| ((i * 7 + j * 13) % 50) as Count).collect())
        .collect();
    matrix.update(&counts).unwrap();
    matrix
}

fn bench_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("obj_fn_cv");

    for size in [5, 20, 80] {
        let matrix = generate_matrix(size);
        group.bench_with_input(BenchmarkId::new("matrix", size), &matrix, |b, m| {
            b.iter(|| black_box(m).obj_fn_cv());
        });
        group.bench_with_input(BenchmarkId::new("origin", size), &matrix, |b, m| {
            b.iter(|| black_box(m).obj_fn_cv_origin(0));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_objective);
criterion_main!(benches);
