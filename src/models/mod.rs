//! Numerical experiment models
//!
//! All models implement the [`ExperimentModel`](crate::physics::ExperimentModel) trait.
//! A model turns one normalised parameter record into one result record; the
//! orchestrator decides when that happens.
//!
//! # Available Models
//!
//! ## [`NanoparticleModel`]: gold nanoparticle synthesis
//!
//! Concentration and temperature select an entry of a precomputed outcome
//! table: particle size, solution colour and UV-Vis absorbance spectrum.
//!
//! ## [`ButlerVolmerCell`]: cyclic voltammetry
//!
//! Triangular potential sweep with Butler–Volmer kinetics. Reports the full
//! current/voltage loop and the anodic and cathodic peaks.
//!
//! ## [`DistillationColumn`]: ethanol/water fractionation
//!
//! Tray-by-tray equilibrium recursion giving the composition profile and the
//! product purities.
//!
//! ## [`LineShapeSynthesizer`]: ¹H NMR
//!
//! Expands peak records into J-coupled Lorentzian lines.
//!
//! # Line shapes
//!
//! The UV-Vis and NMR models both sample a [`LineShape`] on a regular grid.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod line_shape;
pub mod nanoparticle;
pub mod voltammetry;
pub mod distillation;
pub mod nmr;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use line_shape::LineShape;
pub use nanoparticle::{
    NanoparticleModel, NanoparticleOutcome, NanoparticleParameters, OutcomeKey, OutcomeTable,
    SpectrumPoint,
};
pub use voltammetry::{ButlerVolmerCell, CvDataPoint, CvResult, VoltammetryParameters};
pub use distillation::{
    DistillationColumn, DistillationParameters, DistillationResult, TrayComposition,
};
pub use nmr::{LinePoint, LineShapeSynthesizer, Multiplicity, NmrPeak, NmrSample, NmrSpectrum};
