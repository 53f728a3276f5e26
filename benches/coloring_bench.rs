//! Criterion benchmarks for the coloring engine.
//!
//! Uses random graphs with a planted proper coloring so every instance is
//! solvable with the benchmarked `k`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_kcolor::coloring::ColoringState;
use u_kcolor::descent::{DescentConfig, DescentRunner};
use u_kcolor::greedy::GreedyColoring;
use u_kcolor::random::create_rng;
use u_kcolor::sa::{SaConfig, SaRunner};

// ===========================================================================
// Instances
// ===========================================================================

/// `n` nodes split into `k` classes by `i % k`, `m` random edges between
/// different classes.
fn planted(n: usize, m: usize, k: usize, seed: u64) -> ColoringState {
    let mut rng = create_rng(seed);
    let mut state = ColoringState::new(n);
    let mut added = 0;
    while added < m {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if u % k != v % k {
            state.add_edge(u, v).unwrap();
            added += 1;
        }
    }
    state
}

fn greedy(mut state: ColoringState, k: usize) -> ColoringState {
    GreedyColoring::run(&mut state, k).unwrap();
    state
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    group.sample_size(10);

    for &(n, m) in &[(500usize, 5_000usize), (2_000, 40_000)] {
        let state = planted(n, m, 5, 42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_m{}", n, m), n),
            &state,
            |b, s| {
                b.iter(|| {
                    let mut copy = s.clone();
                    black_box(GreedyColoring::run(&mut copy, 5).unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_recolor(c: &mut Criterion) {
    let mut group = c.benchmark_group("recolor");

    let mut state = greedy(planted(2_000, 40_000, 5, 7), 5);
    let mut rng = create_rng(1);
    group.bench_function("single_node", |b| {
        b.iter(|| {
            let id = rng.random_range(0..2_000);
            let color = rng.random_range(0..5);
            state.recolor(black_box(id), black_box(color)).unwrap();
        })
    });
    group.finish();
}

fn bench_sa(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa");
    group.sample_size(10);

    for &n in &[200usize, 1_000] {
        let state = greedy(planted(n, n * 8, 4, 3), 4);
        let config = SaConfig::default()
            .with_initial_temperature(2.0)
            .with_max_iterations(10_000)
            .with_stop_when_proper(false)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(state, config), |b, (s, c)| {
            b.iter(|| {
                let result = SaRunner::run(black_box(s), 4, black_box(c)).unwrap();
                black_box(result.best_cost)
            })
        });
    }
    group.finish();
}

fn bench_descent(c: &mut Criterion) {
    let mut group = c.benchmark_group("descent");
    group.sample_size(10);

    let state = greedy(planted(1_000, 8_000, 4, 9), 4);
    let config = DescentConfig::default().with_max_iterations(10_000).with_seed(42);
    group.bench_function("n1000", |b| {
        b.iter(|| {
            let mut copy = state.clone();
            black_box(DescentRunner::run(&mut copy, 4, &config).unwrap())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_recolor, bench_sa, bench_descent);
criterion_main!(benches);
