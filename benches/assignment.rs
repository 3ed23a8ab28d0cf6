//! Criterion benchmarks for the assignment solver.
//!
//! Run with: cargo bench
//! Run one size: cargo bench -- solve/64

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DMatrix;

use siap_eval_rs::{AssignmentSolver, JonkerVolgenant};

/// Deterministic pseudo-random cost in [0, 100).
fn cost_at(row: usize, col: usize) -> f64 {
    let hash = row.wrapping_mul(2654435761).wrapping_add(col.wrapping_mul(40503)) % 10000;
    hash as f64 / 100.0
}

/// An association-shaped matrix: a dense truth block over a synthetic
/// diagonal, as the engine builds per timestep.
fn association_matrix(num_truth: usize, num_track: usize) -> DMatrix<f64> {
    let mut cost = DMatrix::from_element(num_truth + num_track, num_track, 1.0e10);
    for i in 0..num_truth {
        for j in 0..num_track {
            cost[(i, j)] = cost_at(i, j);
        }
    }
    for j in 0..num_track {
        cost[(num_truth + j, j)] = 200.0;
    }
    cost
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for &size in &[8usize, 32, 64, 128] {
        let cost = association_matrix(size, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &cost, |b, cost| {
            b.iter(|| JonkerVolgenant.solve(cost).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
