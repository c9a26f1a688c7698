//! Example: ¹H NMR spectrum of ethanol through the orchestrator
//!
//! Drives the line-shape synthesizer the way the interactive page does: the
//! peak list is edited twice in quick succession, the first edit is
//! superseded before its latency elapses, and only the final spectrum is
//! computed.
//!
//! - CH3: 1.22 ppm, triplet, 3H
//! - CH2: 3.68 ppm, quartet, 2H
//! - OH:  2.50 ppm, singlet, 1H

use std::time::Duration;

use labsim::{
    engine::{OrchestratorConfig, SimulationOrchestrator},
    models::{LineShapeSynthesizer, NmrPeak, NmrSample},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  ¹H NMR - Ethanol");
    println!("═══════════════════════════════════════════════════════\n");

    let ethanol: Vec<NmrPeak> = ["1.22:t:3", "3.68:q:2", "2.50:s:1"]
        .iter()
        .map(|s| s.parse())
        .collect::<Result<_, _>>()?;

    let lab = SimulationOrchestrator::new(
        LineShapeSynthesizer::default(),
        NmrSample::default(),
        OrchestratorConfig::default().latency(Duration::from_millis(300)),
    );
    println!("Initial spectrum: {} points (baseline only)", lab.result().points.len());

    // First edit: methyl group only, replaced 100 ms later
    lab.set_parameters(NmrSample::new(ethanol[..1].to_vec()));
    tokio::time::sleep(Duration::from_millis(100)).await;
    lab.set_parameters(NmrSample::new(ethanol.clone()));
    println!("Computing: {}", lab.is_computing());

    lab.settle().await;
    let spectrum = lab.result();
    println!(
        "Final spectrum: {} points after {} model runs\n",
        spectrum.points.len(),
        lab.completed_runs()
    );

    // ====== Tallest line of each resonance ======

    for peak in &ethanol {
        let tallest = spectrum
            .points
            .iter()
            .filter(|p| (p.shift - peak.shift).abs() < 0.1)
            .map(|p| p.intensity)
            .fold(0.0_f64, f64::max);
        println!(
            "  {:.2} ppm  {:<8}  {}H  max intensity {:.1}",
            peak.shift,
            peak.multiplicity.to_string(),
            peak.integration,
            tallest
        );
    }

    Ok(())
}
