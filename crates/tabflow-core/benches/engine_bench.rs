//! Benchmarks for the transform engine.
//!
//! Run with: cargo bench -p tabflow-core

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tabflow_core::{PanelStrip, Reconciler, ScrollObservation, TrackingState, TransformEngine};

/// Strip of `n` tabs with alternating widths.
fn make_strip(n: usize) -> PanelStrip {
    let widths: Vec<f64> = (0..n)
        .map(|i| if i % 2 == 0 { 96.0 } else { 148.0 })
        .collect();
    PanelStrip::contiguous(&widths, 390.0).expect("valid strip")
}

/// Dense swipe across every panel and back, 60 samples per panel.
fn sweep(n: usize) -> Vec<f64> {
    let per_panel = 60;
    let total = (n - 1) * per_panel;
    let forward = (0..=total).map(|i| i as f64 / per_panel as f64);
    let backward = (0..total).rev().map(|i| i as f64 / per_panel as f64);
    forward.chain(backward).collect()
}

fn bench_engine_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/sweep");
    let engine = TransformEngine::new();

    for n in [2, 5, 10, 50] {
        let strip = make_strip(n);
        let samples = sweep(n);
        group.bench_with_input(BenchmarkId::new("step", n), &samples, |b, samples| {
            b.iter(|| {
                let mut tracking = TrackingState::anchored(0);
                for &s in samples {
                    let step = engine.step(&tracking, black_box(s), &strip);
                    tracking = step.tracking;
                }
                black_box(tracking)
            })
        });
    }

    group.finish();
}

fn bench_reconciled_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/reconciled_sweep");
    let engine = TransformEngine::new();

    for n in [5, 50] {
        let strip = make_strip(n);
        let samples = sweep(n);
        group.bench_with_input(BenchmarkId::new("step+observe", n), &samples, |b, samples| {
            b.iter(|| {
                let mut tracking = TrackingState::anchored(0);
                let mut reconciler = Reconciler::new(0, n).expect("valid index");
                for &s in samples {
                    let step = engine.step(&tracking, black_box(s), &strip);
                    tracking = step.tracking;
                    black_box(reconciler.observe(&ScrollObservation {
                        relative_scroll: step.relative_scroll,
                        crossed: step.crossed,
                        settled: step.is_settled(),
                        touching: false,
                    }));
                }
                black_box(reconciler.index())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine_sweep, bench_reconciled_sweep);
criterion_main!(benches);
