//! Example: Gold nanoparticle synthesis over the whole condition grid
//!
//! Builds the outcome table once and prints particle size and plasmon peak
//! position for every (concentration, temperature) cell, the way the
//! interactive sliders would walk through it. The nine measured anchor
//! conditions are marked with `*`.
//!
//! Optionally writes the spectra at 0.5 mM for 25, 60 and 100 °C to
//! `nanoparticle_spectra.csv` when run with `--csv`.

use labsim::{
    models::{NanoparticleModel, NanoparticleParameters, OutcomeKey, OutcomeTable},
    output::{CsvConfig, CsvExporter, CsvMetadata, Exporter},
    physics::{ExperimentModel, Noise},
};

use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Gold Nanoparticle Synthesis - Condition Grid");
    println!("═══════════════════════════════════════════════════════\n");

    let model = NanoparticleModel::new(&mut Noise::seeded(42));
    println!("Outcome table: {} cells\n", model.table().len());

    // ====== Size table ======

    print!("  c \\ T ");
    for t in (25..=100).step_by(15) {
        print!("{:>10}", format!("{} °C", t));
    }
    println!();

    for i in 1..=10 {
        let c = i as f64 / 10.0;
        print!("  {:>5.1} ", c);
        for t in (25..=100).step_by(15) {
            let key = OutcomeKey::from_values(c, t as f64);
            let outcome = model.lookup(c, t as f64);
            let marker = if OutcomeTable::is_anchor(&key) { "*" } else { " " };
            print!("{:>8.1}{} ", outcome.particle_size, marker);
        }
        println!();
    }

    // ====== Plasmon band ======

    println!("\nPlasmon peak at 0.5 mM:");
    for t in [25.0, 40.0, 60.0, 80.0, 100.0] {
        let outcome = model.run(&NanoparticleParameters::new(0.5, t), &mut Noise::disabled());
        if let Some(peak) = outcome.peak() {
            println!(
                "  {:>5.0} °C: λmax = {:.0} nm, A = {:.3}, colour {}",
                t, peak.wavelength, peak.absorbance, outcome.solution_color
            );
        }
    }

    // ====== Export ======

    if std::env::args().any(|a| a == "--csv") {
        let traces: Vec<_> = [25.0, 60.0, 100.0]
            .iter()
            .map(|&t| {
                model.lookup(0.5, t).to_trace().with_name(format!("{} C", t))
            })
            .collect();

        let metadata = CsvMetadata::new("Gold Nanoparticle Synthesis", model.name())
            .parameter("concentration", 0.5);
        let exporter = CsvExporter::new(CsvConfig::default().precision(4).with_metadata(metadata));

        let path = Path::new("nanoparticle_spectra.csv");
        exporter.export_traces(&traces, None, path)?;
        println!("\nSpectra written to {}", path.display());
    }

    Ok(())
}
