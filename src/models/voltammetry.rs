//! Cyclic voltammetry with Butler–Volmer electrode kinetics
//!
//! The potential follows a triangular waveform from `E_start` up to `E_switch`
//! (anodic sweep) and back down to `E_start` (cathodic sweep). At every step
//! the current is computed from the heterogeneous rate constants:
//!
//! ```text
//! kf = k0 · exp(-α n F (E - E0) / RT)
//! kb = k0 · exp((1 - α) n F (E - E0) / RT)
//! i  = n F C (kf - kb) / (1 + exp(n F (E - E0) / RT)) · √v
//! ```
//!
//! The √v factor reproduces the Randles–Sevcik scaling of the peak current
//! without any diffusion transport.
//!
//! # Example
//!
//! ```rust
//! use labsim::models::{ButlerVolmerCell, VoltammetryParameters};
//! use labsim::physics::{ExperimentModel, Noise};
//!
//! let cell = ButlerVolmerCell::default();
//! let result = cell.run(&VoltammetryParameters::new(0.1, 5.0), &mut Noise::disabled());
//!
//! assert_eq!(result.points[0].voltage, -0.2);
//! assert!(result.ipa.unwrap() > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::physics::{
    ExperimentModel, Noise, ParameterRange, ParameterSet, PhysicalQuantity, Trace,
};

/// Scan rate domain (V/s)
pub const SCAN_RATE_RANGE: ParameterRange = ParameterRange::new(0.01, 0.5, 0.01);

/// Analyte concentration domain (mM)
pub const CONCENTRATION_RANGE: ParameterRange = ParameterRange::new(1.0, 20.0, 0.5);

/// Faraday constant (C/mol)
pub const FARADAY: f64 = 96485.0;

/// Gas constant (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314;

/// Points per sweep never exceed this
pub const MAX_POINTS_PER_SWEEP: usize = 1_000_000;

// =================================================================================================
// Parameters & results
// =================================================================================================

/// Scan conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltammetryParameters {
    /// Potential scan rate (V/s)
    pub scan_rate: f64,
    /// Analyte concentration (mM)
    pub concentration: f64,
}

impl VoltammetryParameters {
    pub fn new(scan_rate: f64, concentration: f64) -> Self {
        Self { scan_rate, concentration }
    }
}

impl Default for VoltammetryParameters {
    fn default() -> Self {
        Self::new(0.1, 5.0)
    }
}

impl ParameterSet for VoltammetryParameters {
    fn normalized(&self) -> Self {
        Self {
            scan_rate: SCAN_RATE_RANGE.quantize(self.scan_rate),
            concentration: CONCENTRATION_RANGE.quantize(self.concentration),
        }
    }
}

/// One (voltage, current) sample of the voltammogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CvDataPoint {
    /// Electrode potential (V)
    pub voltage: f64,
    /// Current (display units)
    pub current: f64,
}

/// Voltammogram and its peak statistics
///
/// The peaks are derived from `points` by [`CvResult::from_points`]; all four
/// peak fields are `None` exactly when `points` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvResult {
    /// Forward sweep followed by reverse sweep
    pub points: Vec<CvDataPoint>,
    /// Anodic peak current (maximum current)
    pub ipa: Option<f64>,
    /// Cathodic peak current, reported as |minimum current|
    pub ipc: Option<f64>,
    /// Anodic peak potential
    pub epa: Option<f64>,
    /// Cathodic peak potential
    pub epc: Option<f64>,
}

impl CvResult {
    /// Extract the peaks in one pass (first occurrence wins on ties)
    pub fn from_points(points: Vec<CvDataPoint>) -> Self {
        let mut anodic: Option<CvDataPoint> = None;
        let mut cathodic: Option<CvDataPoint> = None;

        for p in &points {
            if anodic.map_or(true, |a| p.current > a.current) {
                anodic = Some(*p);
            }
            if cathodic.map_or(true, |c| p.current < c.current) {
                cathodic = Some(*p);
            }
        }

        Self {
            ipa: anodic.map(|p| p.current),
            epa: anodic.map(|p| p.voltage),
            ipc: cathodic.map(|p| p.current.abs()),
            epc: cathodic.map(|p| p.voltage),
            points,
        }
    }

    /// Empty voltammogram
    pub fn empty() -> Self {
        Self::from_points(Vec::new())
    }

    /// Peak separation ΔEp = Epa - Epc
    pub fn peak_separation(&self) -> Option<f64> {
        Some(self.epa? - self.epc?)
    }

    /// Current against potential
    pub fn to_trace(&self) -> Trace {
        Trace::from_points(
            "Cyclic voltammogram",
            PhysicalQuantity::Potential,
            PhysicalQuantity::Current,
            self.points.iter().map(|p| (p.voltage, p.current)),
        )
    }
}

// =================================================================================================
// Model
// =================================================================================================

/// Electrode with a single reversible couple
///
/// # Fields
///
/// Defaults are the classroom cell: E0 = 0.25 V, k0 = 1e-2, α = 0.5, n = 1,
/// T = 298.15 K, sweep from -0.2 V to 0.7 V with dt = 1 ms.
#[derive(Debug, Clone, PartialEq)]
pub struct ButlerVolmerCell {
    /// Standard potential E0 (V)
    pub standard_potential: f64,
    /// Standard rate constant k0
    pub rate_constant: f64,
    /// Transfer coefficient α
    pub transfer_coefficient: f64,
    /// Electrons transferred n
    pub electrons: f64,
    /// Absolute temperature (K)
    pub temperature: f64,
    /// Sweep start and end potential (V)
    pub start_potential: f64,
    /// Vertex potential (V)
    pub switch_potential: f64,
    /// Time step (s)
    pub time_step: f64,
    /// Multiplier applied to the raw current
    pub display_scale: f64,
    /// Amplitude of the centred current jitter
    pub jitter: f64,
}

impl Default for ButlerVolmerCell {
    fn default() -> Self {
        Self {
            standard_potential: 0.25,
            rate_constant: 1e-2,
            transfer_coefficient: 0.5,
            electrons: 1.0,
            temperature: 298.15,
            start_potential: -0.2,
            switch_potential: 0.7,
            time_step: 0.001,
            display_scale: 5e5,
            jitter: 0.1,
        }
    }
}

impl ButlerVolmerCell {
    /// Noise-free scaled current at potential `e`
    pub fn current(&self, e: f64, scan_rate: f64, concentration: f64) -> f64 {
        let nf_rt = self.electrons * FARADAY / (GAS_CONSTANT * self.temperature);
        let overpotential = e - self.standard_potential;

        let kf = self.rate_constant * (-self.transfer_coefficient * nf_rt * overpotential).exp();
        let kb = self.rate_constant
            * ((1.0 - self.transfer_coefficient) * nf_rt * overpotential).exp();

        let raw = self.electrons * FARADAY * concentration * (kf - kb)
            / (1.0 + (nf_rt * overpotential).exp())
            * scan_rate.sqrt();

        raw * self.display_scale
    }

    /// Run the full forward + reverse scan
    ///
    /// Non-positive or non-finite scan rates and non-finite concentrations
    /// give an empty result.
    pub fn simulate(&self, scan_rate: f64, concentration: f64, noise: &mut Noise) -> CvResult {
        if !(scan_rate > 0.0 && scan_rate.is_finite() && concentration.is_finite()) {
            log::debug!(
                "Degenerate scan (rate {}, concentration {}): empty voltammogram",
                scan_rate,
                concentration
            );
            return CvResult::empty();
        }

        let step = scan_rate * self.time_step;
        let mut points = Vec::new();
        let sample = |e: f64, noise: &mut Noise| CvDataPoint {
            voltage: e,
            current: self.current(e, scan_rate, concentration) + noise.centered(self.jitter),
        };

        // Forward (anodic) sweep
        let mut e = self.start_potential;
        let mut count = 0;
        while e < self.switch_potential && count < MAX_POINTS_PER_SWEEP {
            points.push(sample(e, noise));
            e += step;
            count += 1;
        }

        // Reverse (cathodic) sweep
        count = 0;
        while e > self.start_potential && count < MAX_POINTS_PER_SWEEP {
            points.push(sample(e, noise));
            e -= step;
            count += 1;
        }

        let result = CvResult::from_points(points);
        log::trace!(
            "CV v={} C={}: {} points, ipa={:?} ipc={:?}",
            scan_rate,
            concentration,
            result.points.len(),
            result.ipa,
            result.ipc
        );
        result
    }
}

impl ExperimentModel for ButlerVolmerCell {
    type Parameters = VoltammetryParameters;
    type Output = CvResult;

    fn run(&self, parameters: &VoltammetryParameters, noise: &mut Noise) -> CvResult {
        self.simulate(parameters.scan_rate, parameters.concentration, noise)
    }

    fn name(&self) -> &str {
        "Cyclic voltammetry"
    }

    fn description(&self) -> Option<&str> {
        Some("Butler-Volmer kinetics over a triangular potential waveform")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
