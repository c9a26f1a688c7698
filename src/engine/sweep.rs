//! Batch evaluation of a model over many parameter records
//!
//! Results come back in input order. Item `i` gets its own noise source
//! forked from the caller's (`Noise::fork(i)`), so a seeded sweep gives the
//! same output whether it runs sequentially or on the rayon pool.

use crate::models::ButlerVolmerCell;
use crate::physics::{ExperimentModel, Noise, ParameterSet, PhysicalQuantity, Trace};

/// Run `model` once per record
pub fn sweep<M: ExperimentModel>(
    model: &M,
    records: &[M::Parameters],
    noise: &Noise,
) -> Vec<M::Output> {
    let run_one = |(i, record): (usize, &M::Parameters)| -> M::Output {
        let mut noise = noise.fork(i as u64);
        model.run(&record.normalized(), &mut noise)
    };

    if records.len() > crate::engine::parallel_threshold() {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            log::debug!("{}: parallel sweep over {} records", model.name(), records.len());
            return records.par_iter().enumerate().map(run_one).collect();
        }
    }

    records.iter().enumerate().map(run_one).collect()
}

/// Anodic peak current against the square root of the scan rate
///
/// A diffusion-controlled couple gives a straight line. Scan rates that
/// produce no anodic peak are left out.
pub fn randles_sevcik(
    cell: &ButlerVolmerCell,
    scan_rates: &[f64],
    concentration: f64,
    noise: &Noise,
) -> Trace {
    let records: Vec<_> = scan_rates
        .iter()
        .map(|&v| crate::models::VoltammetryParameters::new(v, concentration))
        .collect();

    let points: Vec<(f64, f64)> = sweep(cell, &records, noise)
        .into_iter()
        .zip(&records)
        .filter_map(|(result, record)| {
            let record = record.normalized();
            result.ipa.map(|ipa| (record.scan_rate.sqrt(), ipa))
        })
        .collect();

    Trace::from_points(
        "Randles-Sevcik",
        PhysicalQuantity::Custom("Square root of scan rate"),
        PhysicalQuantity::Current,
        points,
    )
}
