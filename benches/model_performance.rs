//! Performance benchmarks for the experiment models
//!
//! # What We're Measuring
//!
//! 1. **Outcome table build**: 160 cells × 201 spectrum samples, done once
//!    per process
//! 2. **Cyclic voltammetry**: point count scales as 1 / scan rate, so the
//!    slowest scans are the most expensive
//! 3. **Distillation and NMR**: small, included as a baseline
//! 4. **Sweeps**: sequential against the rayon path (`--features parallel`)
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench model_performance
//! cargo bench --bench model_performance voltammetry
//! cargo bench --bench model_performance --features parallel sweep
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

use labsim::engine::{set_parallel_threshold, sweep};
use labsim::models::{
    ButlerVolmerCell, DistillationColumn, LineShapeSynthesizer, Multiplicity, NmrPeak, NmrSample,
    OutcomeTable, VoltammetryParameters,
};
use labsim::physics::{ExperimentModel, Noise};

fn benchmark_outcome_table(c: &mut Criterion) {
    c.bench_function("outcome_table_build", |b| {
        b.iter(|| OutcomeTable::build(black_box(&mut Noise::seeded(1))))
    });
}

fn benchmark_voltammetry(c: &mut Criterion) {
    let mut group = c.benchmark_group("voltammetry");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(30);

    let cell = ButlerVolmerCell::default();
    for scan_rate in [0.5, 0.1, 0.01].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(scan_rate),
            scan_rate,
            |b, &scan_rate| {
                let mut noise = Noise::seeded(1);
                b.iter(|| cell.simulate(black_box(scan_rate), black_box(5.0), &mut noise))
            },
        );
    }

    group.finish();
}

fn benchmark_small_models(c: &mut Criterion) {
    let column = DistillationColumn::default();
    c.bench_function("distillation_30_trays", |b| {
        b.iter(|| column.simulate(black_box(2.5), black_box(30)))
    });

    let synthesizer = LineShapeSynthesizer::default();
    let sample = NmrSample::new(vec![
        NmrPeak::new(1.22, Multiplicity::Triplet, 3.0),
        NmrPeak::new(3.68, Multiplicity::Quartet, 2.0),
        NmrPeak::new(2.50, Multiplicity::Singlet, 1.0),
        NmrPeak::new(7.26, Multiplicity::Multiplet, 5.0),
    ]);
    c.bench_function("nmr_four_peaks", |b| {
        let mut noise = Noise::seeded(1);
        b.iter(|| synthesizer.run(black_box(&sample), &mut noise))
    });
}

fn benchmark_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(20);

    let cell = ButlerVolmerCell::default();
    let records: Vec<_> = (1..=50)
        .map(|i| VoltammetryParameters::new(i as f64 * 0.01, 5.0))
        .collect();
    let noise = Noise::seeded(1);

    for (label, threshold) in [("sequential", usize::MAX), ("threshold_8", 8)] {
        group.bench_function(label, |b| {
            set_parallel_threshold(threshold);
            b.iter(|| sweep(&cell, black_box(&records), &noise))
        });
    }
    set_parallel_threshold(8);

    group.finish();
}

criterion_group!(
    benches,
    benchmark_outcome_table,
    benchmark_voltammetry,
    benchmark_small_models,
    benchmark_sweep
);
criterion_main!(benches);
