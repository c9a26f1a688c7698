//! Experiment model traits and types
//!
//! This module defines the core API for simulated experiments:
//! - `ExperimentModel`: trait for all numerical models
//! - `ParameterSet`: parameter records that know how to normalise themselves
//! - `PhysicalQuantity`: type-safe axis identifiers

use std::fmt;

use crate::physics::Noise;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities (type-safe enum)
///
/// Used to label the axes of a [`Trace`](crate::physics::Trace) and to build
/// export headers.
///
/// # Enum type safety
///
/// If you need an axis which is not listed here, use `Custom` with a static
/// name instead of passing strings around.
///
/// # Example
/// ```
/// use labsim::physics::PhysicalQuantity;
///
/// assert_eq!(PhysicalQuantity::Wavelength.header(), "Wavelength (nm)");
/// assert_eq!(PhysicalQuantity::Custom("Sqrt scan rate").header(), "Sqrt scan rate");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Wavelength (nm)
    Wavelength,

    /// UV-Vis absorbance (a.u.)
    Absorbance,

    /// Electrode potential (V)
    Potential,

    /// Electrode current (display units)
    Current,

    /// NMR chemical shift (ppm)
    ChemicalShift,

    /// Relative signal intensity
    Intensity,

    /// Tray index counted from the reboiler
    TrayNumber,

    /// Ethanol content of a liquid phase (%)
    EthanolFraction,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl PhysicalQuantity {
    /// Short label without unit
    pub fn label(&self) -> &'static str {
        match self {
            PhysicalQuantity::Wavelength => "Wavelength",
            PhysicalQuantity::Absorbance => "Absorbance",
            PhysicalQuantity::Potential => "Potential",
            PhysicalQuantity::Current => "Current",
            PhysicalQuantity::ChemicalShift => "Chemical shift",
            PhysicalQuantity::Intensity => "Intensity",
            PhysicalQuantity::TrayNumber => "Tray",
            PhysicalQuantity::EthanolFraction => "Ethanol",
            PhysicalQuantity::Custom(name) => name,
        }
    }

    /// Unit symbol, `None` for dimensionless or custom quantities
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            PhysicalQuantity::Wavelength => Some("nm"),
            PhysicalQuantity::Absorbance => Some("a.u."),
            PhysicalQuantity::Potential => Some("V"),
            PhysicalQuantity::ChemicalShift => Some("ppm"),
            PhysicalQuantity::EthanolFraction => Some("%"),
            PhysicalQuantity::Current
            | PhysicalQuantity::Intensity
            | PhysicalQuantity::TrayNumber
            | PhysicalQuantity::Custom(_) => None,
        }
    }

    /// Column header, e.g. `"Potential (V)"`
    pub fn header(&self) -> String {
        match self.unit() {
            Some(unit) => format!("{} ({})", self.label(), unit),
            None => self.label().to_string(),
        }
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =================================================================================================
// Parameter records
// =================================================================================================

/// Parameter record of one experiment
///
/// Every field has a declared range and step. `normalized` clamps and
/// quantises all fields; the orchestrator never hands raw user values to a
/// model.
pub trait ParameterSet: Clone + fmt::Debug + Send + Sync + 'static {
    /// Copy of the record with every field clamped and quantised
    fn normalized(&self) -> Self;
}

// =================================================================================================
// Experiment Model Trait
// =================================================================================================

/// Trait for experiment models
///
/// # Responsibility
/// Turns a parameter record into a result record. Models are pure functions
/// of their parameters except for the jitter drawn from the injected
/// [`Noise`]; with `Noise::disabled()` two runs are identical.
///
/// Scheduling, latency and cancellation are NOT the model's job (that's the
/// [`SimulationOrchestrator`](crate::engine::SimulationOrchestrator)).
///
/// # Mandatory Point
/// All new experiment models MUST implement this trait.
pub trait ExperimentModel: Send + Sync + 'static {
    /// Input record
    type Parameters: ParameterSet;

    /// Result record, superseded (never merged) by the next run
    type Output: Clone + fmt::Debug + Send + 'static;

    /// Computes the result for a parameter record
    ///
    /// # Arguments
    /// * `parameters` - Already normalised parameter record
    /// * `noise` - Jitter source (use `Noise::disabled()` for reproducible output)
    fn run(&self, parameters: &Self::Parameters, noise: &mut Noise) -> Self::Output;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}
