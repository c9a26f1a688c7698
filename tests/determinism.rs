//! Integration tests: noise modes and reproducibility

use labsim::engine::sweep;
use approx::assert_abs_diff_eq;
use labsim::models::{
    ButlerVolmerCell, LineShapeSynthesizer, NanoparticleModel, NanoparticleParameters,
    OutcomeTable, VoltammetryParameters,
};
use labsim::physics::{ExperimentModel, Noise};

mod common;
use common::{assert_traces_close, ethanol};

#[test]
fn test_disabled_noise_is_repeatable() {
    let cell = ButlerVolmerCell::default();
    let parameters = VoltammetryParameters::new(0.2, 8.0);

    let a = cell.run(&parameters, &mut Noise::disabled());
    let b = cell.run(&parameters, &mut Noise::disabled());
    assert_eq!(a, b);
}

#[test]
fn test_disabled_noise_spectrum_is_repeatable() {
    let synthesizer = LineShapeSynthesizer::default();

    let a = synthesizer.run(&ethanol(), &mut Noise::disabled());
    let b = synthesizer.run(&ethanol(), &mut Noise::disabled());
    assert_eq!(a, b);
}

#[test]
fn test_disabled_noise_table_is_repeatable() {
    let a = OutcomeTable::build(&mut Noise::disabled());
    let b = OutcomeTable::build(&mut Noise::disabled());

    assert_eq!(a.len(), b.len());
    for key in a.keys() {
        assert_eq!(a.get(key), b.get(key), "cell {}", key);
    }
}

#[test]
fn test_same_seed_same_spectrum() {
    let synthesizer = LineShapeSynthesizer::default();

    let a = synthesizer.run(&ethanol(), &mut Noise::seeded(2024));
    let b = synthesizer.run(&ethanol(), &mut Noise::seeded(2024));
    assert_traces_close(&a.to_trace(), &b.to_trace(), 1e-12, "seeded NMR");

    let c = synthesizer.run(&ethanol(), &mut Noise::seeded(2025));
    assert_ne!(a, c);
}

#[test]
fn test_seeded_table_is_reproducible() {
    let a = NanoparticleModel::new(&mut Noise::seeded(9));
    let b = NanoparticleModel::new(&mut Noise::seeded(9));

    let parameters = NanoparticleParameters::new(0.3, 45.0);
    assert_eq!(
        a.run(&parameters, &mut Noise::disabled()),
        b.run(&parameters, &mut Noise::disabled())
    );
}

#[test]
fn test_jitter_stays_within_amplitude() {
    let cell = ButlerVolmerCell::default();
    let clean = cell.simulate(0.1, 5.0, &mut Noise::disabled());
    let noisy = cell.simulate(0.1, 5.0, &mut Noise::seeded(1));

    assert_eq!(clean.points.len(), noisy.points.len());
    for (c, n) in clean.points.iter().zip(&noisy.points) {
        assert_eq!(c.voltage, n.voltage);
        assert_abs_diff_eq!(n.current, c.current, epsilon = cell.jitter / 2.0);
    }
}

#[test]
fn test_seeded_sweep_independent_of_batch_shape() {
    let cell = ButlerVolmerCell::default();
    let records: Vec<_> = [0.05, 0.1, 0.15]
        .iter()
        .map(|&v| VoltammetryParameters::new(v, 5.0))
        .collect();

    let full = sweep(&cell, &records, &Noise::seeded(3));
    let head = sweep(&cell, &records[..1], &Noise::seeded(3));
    assert_eq!(full[0], head[0]);
}
