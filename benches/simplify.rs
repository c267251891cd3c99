//! Normalization and decision-procedure benchmarks.
//!
//! One `criterion` group per pipeline stage, built from a handful of
//! representative expressions rather than a combinatorial grid.

use ahash::AHashSet;
use criterion::{Criterion, criterion_group, criterion_main};
use rand::{RngExt, SeedableRng, rngs::StdRng};
use std::hint::black_box;

use loop_arith::{
    CmpOp, add, big_sum, const_, digest, gcd, if_then_else, int_div, is_smaller, mul, pos_var,
    pow, simplify, size_var, var,
};

fn init() {
    let _ = dotenvy::dotenv();
}

// =============================================================================
// Construction (smart-constructor normalization as the tree is built)
// =============================================================================

fn polynomial(x: &std::sync::Arc<loop_arith::Expr>) -> std::sync::Arc<loop_arith::Expr> {
    // 3*x^2 + 2*x + 1, built bottom-up through the public smart constructors.
    add(
        add(
            mul(const_(3), pow(std::sync::Arc::clone(x), const_(2))),
            mul(const_(2), std::sync::Arc::clone(x)),
        ),
        const_(1),
    )
}

fn wide_sum(n: &std::sync::Arc<loop_arith::Expr>, terms: i64) -> std::sync::Arc<loop_arith::Expr> {
    (0..terms).fold(const_(0), |acc, k| add(acc, mul(const_(k + 1), std::sync::Arc::clone(n))))
}

fn bench_construction(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("construction");
    let x = pos_var("x");
    let n = size_var("n");

    group.bench_function("polynomial", |b| b.iter(|| polynomial(black_box(&x))));
    group.bench_function("wide_sum_32", |b| b.iter(|| wide_sum(black_box(&n), 32)));

    group.finish();
}

// =============================================================================
// Re-simplification (the fixpoint driver on an already-normal tree)
// =============================================================================

fn bench_resimplify(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("resimplify");
    let x = pos_var("x");
    let n = size_var("n");
    let poly = polynomial(&x);
    let wide = wide_sum(&n, 32);

    group.bench_function("polynomial", |b| {
        b.iter(|| simplify(std::sync::Arc::clone(black_box(&poly))));
    });
    group.bench_function("wide_sum_32", |b| {
        b.iter(|| simplify(std::sync::Arc::clone(black_box(&wide))));
    });

    group.finish();
}

// =============================================================================
// Closed-form BigSum evaluation
// =============================================================================

fn bench_big_sum(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("big_sum");

    group.bench_function("arithmetic_series", |b| {
        b.iter(|| big_sum("i", const_(0), black_box(const_(999)), |i| i));
    });

    group.bench_function("conditional_split", |b| {
        b.iter(|| {
            big_sum("i", const_(0), black_box(const_(999)), |i| {
                if_then_else(
                    std::sync::Arc::clone(&i),
                    CmpOp::Lt,
                    const_(500),
                    std::sync::Arc::clone(&i),
                    mul(const_(2), i),
                )
            })
        });
    });

    group.finish();
}

// =============================================================================
// Randomized construction (dedup by digest before timing the batch)
// =============================================================================

const VAR_NAMES: [&str; 4] = ["x0", "x1", "x2", "x3"];

/// A random sum-of-products, in the shape of a loop trip-count
/// polynomial: each term is a small constant times 1-3 variables.
fn random_poly(rng: &mut StdRng, num_terms: usize) -> std::sync::Arc<loop_arith::Expr> {
    let mut terms = Vec::with_capacity(num_terms);
    for _ in 0..num_terms {
        let coeff = rng.random_range(-9..=9);
        let num_factors = rng.random_range(1..=3);
        let mut factors = vec![const_(coeff)];
        for _ in 0..num_factors {
            let name = VAR_NAMES[rng.random_range(0..VAR_NAMES.len())];
            factors.push(var(name, None));
        }
        terms.push(factors.into_iter().reduce(mul).unwrap_or_else(|| const_(0)));
    }
    terms.into_iter().reduce(add).unwrap_or_else(|| const_(0))
}

fn bench_randomized_construction(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("randomized_construction");
    let seed: u64 = rand::random();
    let mut rng = StdRng::seed_from_u64(seed);
    let batch: Vec<_> = (0..64).map(|_| random_poly(&mut rng, 8)).collect();

    group.bench_function("generate_batch", |b| {
        let mut rng = StdRng::seed_from_u64(seed);
        b.iter(|| (0..64).map(|_| random_poly(black_box(&mut rng), 8)).count());
    });

    group.bench_function("dedup_by_digest", |b| {
        b.iter(|| {
            let mut seen: AHashSet<u64> = AHashSet::default();
            batch.iter().filter(|e| seen.insert(digest(e))).count()
        });
    });

    group.finish();
}

// =============================================================================
// Decision procedures
// =============================================================================

fn bench_decision(c: &mut Criterion) {
    init();
    let mut group = c.benchmark_group("decision");
    let n = size_var("n");
    let a = mul(const_(12), std::sync::Arc::clone(&n));
    let b = mul(const_(18), std::sync::Arc::clone(&n));
    let lo = int_div(std::sync::Arc::clone(&n), const_(2)).expect("nonzero divisor");
    let hi = std::sync::Arc::clone(&n);

    group.bench_function("gcd", |b_| b_.iter(|| gcd(black_box(&a), black_box(&b))));
    group.bench_function("is_smaller", |b_| b_.iter(|| is_smaller(black_box(&lo), black_box(&hi))));

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_resimplify,
    bench_big_sum,
    bench_randomized_construction,
    bench_decision,
);
criterion_main!(benches);
