//! Gold nanoparticle synthesis outcome model
//!
//! Maps the reductant concentration and the reaction temperature to a particle
//! size, a solution colour and a UV-Vis absorbance spectrum.
//!
//! # Outcome table
//!
//! Only nine conditions are authored (three concentration buckets times three
//! temperature buckets). [`OutcomeTable::build`] completes the remaining cells
//! of the 10 × 16 parameter grid once, from the nearest lower anchor:
//!
//! ```text
//! size  = anchor.size + 30·t̂ + 10·ĉ
//! λmax  = anchor.λmax + 40·t̂ + 15·ĉ
//! Amax  = anchor.Amax + 0.4·t̂ + 0.2·ĉ
//! width = 40 + 20·t̂
//! ```
//!
//! where `t̂` and `ĉ` are the temperature and concentration normalised to
//! `[0, 1]` over their full domains. The table is read-only afterwards.
//!
//! # Example
//!
//! ```rust
//! use labsim::models::{NanoparticleModel, NanoparticleParameters};
//! use labsim::physics::{ExperimentModel, Noise};
//!
//! let model = NanoparticleModel::new(&mut Noise::disabled());
//! let outcome = model.run(&NanoparticleParameters::new(0.5, 25.0), &mut Noise::disabled());
//!
//! assert_eq!(outcome.particle_size, 15.0);
//! assert_eq!(outcome.display_color, "red-400");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::LineShape;
use crate::physics::{
    ExperimentModel, Noise, ParameterRange, ParameterSet, PhysicalQuantity, Trace,
};

/// Reductant concentration domain
pub const CONCENTRATION_RANGE: ParameterRange = ParameterRange::new(0.1, 1.0, 0.1);

/// Reaction temperature domain (°C)
pub const TEMPERATURE_RANGE: ParameterRange = ParameterRange::new(25.0, 100.0, 5.0);

/// UV-Vis acquisition window (nm)
pub const WAVELENGTH_START: f64 = 400.0;
pub const WAVELENGTH_END: f64 = 800.0;
pub const WAVELENGTH_STEP: f64 = 2.0;

/// Upper bound of the absorbance jitter
const ABSORBANCE_JITTER: f64 = 0.02;

/// Condition returned when a key has no entry
const DEFAULT_CONDITION: (f64, f64) = (0.5, 25.0);

// =================================================================================================
// Parameters & results
// =================================================================================================

/// Synthesis conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NanoparticleParameters {
    /// Reductant concentration
    pub concentration: f64,
    /// Temperature (°C)
    pub temperature: f64,
}

impl NanoparticleParameters {
    pub fn new(concentration: f64, temperature: f64) -> Self {
        Self { concentration, temperature }
    }
}

impl Default for NanoparticleParameters {
    fn default() -> Self {
        Self::new(DEFAULT_CONDITION.0, DEFAULT_CONDITION.1)
    }
}

impl ParameterSet for NanoparticleParameters {
    fn normalized(&self) -> Self {
        Self {
            concentration: CONCENTRATION_RANGE.quantize(self.concentration),
            temperature: TEMPERATURE_RANGE.quantize(self.temperature),
        }
    }
}

/// One UV-Vis sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumPoint {
    /// Wavelength (nm)
    pub wavelength: f64,
    /// Absorbance (a.u.), never negative
    pub absorbance: f64,
}

/// Result of one synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NanoparticleOutcome {
    /// Mean particle diameter (nm)
    pub particle_size: f64,
    /// Symbolic colour id for the particle rendering
    pub display_color: String,
    /// RGB hex colour of the solution
    pub solution_color: String,
    /// Absorbance spectrum ordered by increasing wavelength
    pub spectrum: Vec<SpectrumPoint>,
}

impl NanoparticleOutcome {
    /// Sample of maximum absorbance (first one on ties)
    pub fn peak(&self) -> Option<SpectrumPoint> {
        let mut best: Option<SpectrumPoint> = None;
        for point in &self.spectrum {
            match best {
                Some(b) if point.absorbance <= b.absorbance => {}
                _ => best = Some(*point),
            }
        }
        best
    }

    /// Spectrum as a wavelength/absorbance trace
    pub fn to_trace(&self) -> Trace {
        Trace::from_points(
            "UV-Vis spectrum",
            PhysicalQuantity::Wavelength,
            PhysicalQuantity::Absorbance,
            self.spectrum.iter().map(|p| (p.wavelength, p.absorbance)),
        )
    }
}

/// Generate a Gaussian plasmon band over the acquisition window
///
/// Every sample gets a uniform jitter in `[0, 0.02)` and is floor-clamped at 0.
pub fn generate_uv_spectrum(
    peak_wavelength: f64,
    peak_absorbance: f64,
    width: f64,
    noise: &mut Noise,
) -> Vec<SpectrumPoint> {
    LineShape::gaussian(peak_wavelength, width, peak_absorbance)
        .sample(
            WAVELENGTH_START,
            WAVELENGTH_END,
            WAVELENGTH_STEP,
            ABSORBANCE_JITTER,
            noise,
        )
        .into_iter()
        .map(|(wavelength, absorbance)| SpectrumPoint {
            wavelength,
            absorbance: absorbance.max(0.0),
        })
        .collect()
}

// =================================================================================================
// Outcome table
// =================================================================================================

/// Grid cell of the outcome table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutcomeKey {
    concentration_index: usize,
    temperature_index: usize,
}

impl OutcomeKey {
    /// Key of the grid cell nearest to the given condition
    pub fn from_values(concentration: f64, temperature: f64) -> Self {
        Self {
            concentration_index: CONCENTRATION_RANGE.index_of(concentration),
            temperature_index: TEMPERATURE_RANGE.index_of(temperature),
        }
    }

    /// Quantised concentration of the cell
    pub fn concentration(&self) -> f64 {
        CONCENTRATION_RANGE.value_at(self.concentration_index)
    }

    /// Quantised temperature of the cell
    pub fn temperature(&self) -> f64 {
        TEMPERATURE_RANGE.value_at(self.temperature_index)
    }

    /// Every cell of the declared grid
    pub fn grid() -> impl Iterator<Item = OutcomeKey> {
        (0..CONCENTRATION_RANGE.grid_len()).flat_map(|concentration_index| {
            (0..TEMPERATURE_RANGE.grid_len()).map(move |temperature_index| OutcomeKey {
                concentration_index,
                temperature_index,
            })
        })
    }
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}-{}", self.concentration(), self.temperature())
    }
}

struct Anchor {
    concentration: f64,
    temperature: f64,
    particle_size: f64,
    display_color: &'static str,
    solution_color: &'static str,
    peak_wavelength: f64,
    peak_absorbance: f64,
    width: f64,
}

const fn anchor(
    concentration: f64,
    temperature: f64,
    particle_size: f64,
    display_color: &'static str,
    solution_color: &'static str,
    peak_wavelength: f64,
    peak_absorbance: f64,
    width: f64,
) -> Anchor {
    Anchor {
        concentration,
        temperature,
        particle_size,
        display_color,
        solution_color,
        peak_wavelength,
        peak_absorbance,
        width,
    }
}

#[rustfmt::skip]
const ANCHORS: [Anchor; 9] = [
    anchor(0.1, 25.0, 10.0, "red-500", "#ef4444", 520.0, 0.4, 30.0),
    anchor(0.5, 25.0, 15.0, "red-400", "#f87171", 525.0, 0.6, 35.0),
    anchor(1.0, 25.0, 20.0, "red-300", "#fca5a5", 530.0, 0.8, 40.0),

    anchor(0.1, 60.0, 25.0, "purple-500", "#a855f7", 535.0, 0.7, 45.0),
    anchor(0.5, 60.0, 40.0, "purple-400", "#c084fc", 550.0, 0.9, 50.0),
    anchor(1.0, 60.0, 60.0, "purple-300", "#d8b4fe", 565.0, 1.1, 55.0),

    anchor(0.1, 100.0, 70.0, "blue-500", "#3b82f6", 575.0, 1.0, 60.0),
    anchor(0.5, 100.0, 85.0, "blue-400", "#60a5fa", 590.0, 1.2, 65.0),
    anchor(1.0, 100.0, 100.0, "blue-300", "#93c5fd", 610.0, 1.4, 70.0),
];

/// Temperature anchor used to complete a cell
fn temperature_bucket(temperature: f64) -> f64 {
    if temperature < 60.0 {
        25.0
    } else if temperature < 100.0 {
        60.0
    } else {
        100.0
    }
}

/// Concentration anchor used to complete a cell
fn concentration_bucket(concentration: f64) -> f64 {
    if concentration < 0.5 {
        0.1
    } else if concentration < 1.0 {
        0.5
    } else {
        1.0
    }
}

/// Immutable map from grid cell to synthesis outcome
#[derive(Debug, Clone)]
pub struct OutcomeTable {
    entries: BTreeMap<OutcomeKey, NanoparticleOutcome>,
    default: NanoparticleOutcome,
}

impl OutcomeTable {
    /// Table holding only the nine authored anchors
    pub fn from_anchors(noise: &mut Noise) -> Self {
        let entries: BTreeMap<OutcomeKey, NanoparticleOutcome> = ANCHORS
            .iter()
            .map(|a| {
                let outcome = NanoparticleOutcome {
                    particle_size: a.particle_size,
                    display_color: a.display_color.to_string(),
                    solution_color: a.solution_color.to_string(),
                    spectrum: generate_uv_spectrum(
                        a.peak_wavelength,
                        a.peak_absorbance,
                        a.width,
                        noise,
                    ),
                };
                (OutcomeKey::from_values(a.concentration, a.temperature), outcome)
            })
            .collect();

        let default_key = OutcomeKey::from_values(DEFAULT_CONDITION.0, DEFAULT_CONDITION.1);
        let default = entries
            .get(&default_key)
            .cloned()
            .unwrap_or_else(|| NanoparticleOutcome {
                particle_size: 15.0,
                display_color: "red-400".to_string(),
                solution_color: "#f87171".to_string(),
                spectrum: generate_uv_spectrum(525.0, 0.6, 35.0, noise),
            });

        Self { entries, default }
    }

    /// Anchors plus a synthesised entry for every other grid cell
    pub fn build(noise: &mut Noise) -> Self {
        let mut table = Self::from_anchors(noise);
        let mut completed = 0usize;

        for key in OutcomeKey::grid() {
            if table.entries.contains_key(&key) {
                continue;
            }

            let concentration = key.concentration();
            let temperature = key.temperature();
            let base_key = OutcomeKey::from_values(
                concentration_bucket(concentration),
                temperature_bucket(temperature),
            );

            let Some(base) = table.entries.get(&base_key) else {
                continue;
            };
            let Some(peak) = base.peak() else {
                continue;
            };

            let temp_factor = TEMPERATURE_RANGE.normalize(temperature);
            let conc_factor = CONCENTRATION_RANGE.normalize(concentration);

            let outcome = NanoparticleOutcome {
                particle_size: base.particle_size + temp_factor * 30.0 + conc_factor * 10.0,
                display_color: base.display_color.clone(),
                solution_color: base.solution_color.clone(),
                spectrum: generate_uv_spectrum(
                    peak.wavelength + temp_factor * 40.0 + conc_factor * 15.0,
                    peak.absorbance + temp_factor * 0.4 + conc_factor * 0.2,
                    40.0 + temp_factor * 20.0,
                    noise,
                ),
            };

            table.entries.insert(key, outcome);
            completed += 1;
        }

        log::debug!(
            "Outcome table completed: {} anchors + {} synthesised cells",
            ANCHORS.len(),
            completed
        );

        table
    }

    /// Entry of a cell, if present
    pub fn get(&self, key: &OutcomeKey) -> Option<&NanoparticleOutcome> {
        self.entries.get(key)
    }

    /// Entry nearest to a condition, or the default entry when the cell is missing
    pub fn lookup(&self, concentration: f64, temperature: f64) -> &NanoparticleOutcome {
        let key = OutcomeKey::from_values(concentration, temperature);
        match self.entries.get(&key) {
            Some(outcome) => outcome,
            None => {
                log::warn!("No outcome for {}, falling back to the default entry", key);
                &self.default
            }
        }
    }

    /// Designated fallback entry
    pub fn default_outcome(&self) -> &NanoparticleOutcome {
        &self.default
    }

    /// True for the nine authored conditions
    pub fn is_anchor(key: &OutcomeKey) -> bool {
        ANCHORS
            .iter()
            .any(|a| OutcomeKey::from_values(a.concentration, a.temperature) == *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cells in key order
    pub fn keys(&self) -> impl Iterator<Item = &OutcomeKey> {
        self.entries.keys()
    }
}

// =================================================================================================
// Model
// =================================================================================================

/// Nanoparticle synthesis model over a shared outcome table
#[derive(Debug, Clone)]
pub struct NanoparticleModel {
    table: Arc<OutcomeTable>,
}

impl NanoparticleModel {
    /// Build the complete table once, drawing spectrum jitter from `noise`
    pub fn new(noise: &mut Noise) -> Self {
        Self::from_table(Arc::new(OutcomeTable::build(noise)))
    }

    /// Share an existing table
    pub fn from_table(table: Arc<OutcomeTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &OutcomeTable {
        &self.table
    }

    /// Outcome for a condition (clamped and quantised first)
    pub fn lookup(&self, concentration: f64, temperature: f64) -> &NanoparticleOutcome {
        self.table.lookup(concentration, temperature)
    }
}

impl ExperimentModel for NanoparticleModel {
    type Parameters = NanoparticleParameters;
    type Output = NanoparticleOutcome;

    /// Table lookup; the jitter was drawn when the table was built
    fn run(&self, parameters: &NanoparticleParameters, _noise: &mut Noise) -> NanoparticleOutcome {
        self.lookup(parameters.concentration, parameters.temperature).clone()
    }

    fn name(&self) -> &str {
        "Gold nanoparticle synthesis"
    }

    fn description(&self) -> Option<&str> {
        Some("Outcome table lookup: particle size, solution colour and UV-Vis spectrum")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn deterministic_table() -> OutcomeTable {
        OutcomeTable::build(&mut Noise::disabled())
    }

    #[test]
    fn test_table_covers_grid() {
        let table = deterministic_table();
        assert_eq!(table.len(), 160);
        for key in OutcomeKey::grid() {
            assert!(table.get(&key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_anchor_values() {
        let table = deterministic_table();
        let outcome = table.lookup(0.5, 25.0);

        assert_eq!(outcome.particle_size, 15.0);
        assert_eq!(outcome.solution_color, "#f87171");

        let peak = outcome.peak().unwrap();
        assert_eq!(peak.wavelength, 524.0);
        assert_abs_diff_eq!(peak.absorbance, 0.6, epsilon = 0.01);
        assert_eq!(outcome.spectrum.len(), 201);
    }

    #[test]
    fn test_completed_cell() {
        let table = deterministic_table();
        // Bucket (0.5, 60): t̂ = 35/75, ĉ = 0.7/0.9
        let outcome = table.lookup(0.8, 60.0);
        let t = 35.0 / 75.0;
        let c = 0.7 / 0.9;

        assert_relative_eq!(outcome.particle_size, 40.0 + 30.0 * t + 10.0 * c, epsilon = 1e-9);
        assert_eq!(outcome.display_color, "purple-400");

        let peak = outcome.peak().unwrap();
        let expected = 550.0 + 40.0 * t + 15.0 * c;
        assert_abs_diff_eq!(peak.wavelength, expected, epsilon = 1.0);
    }

    #[test]
    fn test_lookup_quantizes_and_clamps() {
        let table = deterministic_table();
        assert_eq!(table.lookup(0.52, 23.0), table.lookup(0.5, 25.0));
        assert_eq!(table.lookup(7.0, 400.0).particle_size, 100.0);
        assert_eq!(table.lookup(f64::NAN, 25.0).particle_size, 10.0);
    }

    #[test]
    fn test_missing_cell_falls_back_to_default() {
        let table = OutcomeTable::from_anchors(&mut Noise::disabled());
        assert_eq!(table.len(), 9);
        assert_eq!(table.lookup(0.3, 45.0), table.default_outcome());
        assert_eq!(table.lookup(0.3, 45.0).particle_size, 15.0);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(OutcomeKey::from_values(0.5, 25.0).to_string(), "0.5-25");
        assert_eq!(OutcomeKey::from_values(1.0, 100.0).to_string(), "1.0-100");
        assert!(OutcomeTable::is_anchor(&OutcomeKey::from_values(1.0, 60.0)));
        assert!(!OutcomeTable::is_anchor(&OutcomeKey::from_values(0.9, 60.0)));
    }

    #[test]
    fn test_spectrum_never_negative() {
        let spectrum = generate_uv_spectrum(600.0, 1.0, 40.0, &mut Noise::seeded(9));
        assert!(spectrum.iter().all(|p| p.absorbance >= 0.0));
        assert_eq!(spectrum.first().unwrap().wavelength, 400.0);
        assert_eq!(spectrum.last().unwrap().wavelength, 800.0);
    }
}
