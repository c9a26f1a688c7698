//! Example: Cyclic voltammetry at increasing scan rates
//!
//! Runs the Butler-Volmer cell at several scan rates and concentrations and
//! shows the Randles-Sevcik behaviour: the anodic peak current grows with the
//! square root of the scan rate and linearly with concentration.
//!
//! **Cell** (defaults):
//! - E0 = 0.25 V, k0 = 1e-2, α = 0.5, n = 1, T = 298.15 K
//! - Sweep: -0.2 V → 0.7 V → -0.2 V, dt = 1 ms

use labsim::{
    engine::{randles_sevcik, sweep},
    models::{ButlerVolmerCell, VoltammetryParameters},
    physics::Noise,
};

use std::time::Instant;

fn main() {
    println!("═══════════════════════════════════════════════════════");
    println!("  Cyclic Voltammetry - Scan Rate Study");
    println!("═══════════════════════════════════════════════════════\n");

    let cell = ButlerVolmerCell::default();
    let scan_rates = [0.01, 0.02, 0.05, 0.1, 0.2, 0.5];

    // ====== Voltammograms ======

    let records: Vec<_> = scan_rates
        .iter()
        .map(|&v| VoltammetryParameters::new(v, 5.0))
        .collect();

    let start = Instant::now();
    let results = sweep(&cell, &records, &Noise::seeded(7));
    let elapsed = start.elapsed();

    println!("  v (V/s)   points       ipa       Epa (V)   ipc       Epc (V)");
    for (v, result) in scan_rates.iter().zip(&results) {
        println!(
            "  {:<8} {:>8} {:>10.3} {:>9.3} {:>10.3} {:>9.3}",
            v,
            result.points.len(),
            result.ipa.unwrap_or(f64::NAN),
            result.epa.unwrap_or(f64::NAN),
            result.ipc.unwrap_or(f64::NAN),
            result.epc.unwrap_or(f64::NAN),
        );
    }
    println!("\n  {} scans in {:.2?}", results.len(), elapsed);

    // ====== Randles-Sevcik ======

    let trace = randles_sevcik(&cell, &scan_rates, 5.0, &Noise::disabled());
    println!("\nipa / sqrt(v) (constant for diffusion control):");
    for (sqrt_v, ipa) in trace.points() {
        println!("  sqrt(v) = {:.3}: ipa / sqrt(v) = {:.2}", sqrt_v, ipa / sqrt_v);
    }

    // ====== Concentration ======

    println!("\nConcentration at 0.1 V/s:");
    for c in [1.0, 5.0, 10.0, 20.0] {
        let result = cell.simulate(0.1, c, &mut Noise::disabled());
        println!("  {:>4} mM: ipa = {:.3}", c, result.ipa.unwrap_or(f64::NAN));
    }
}
