//! labsim: simulation engine of a virtual chemistry laboratory
//!
//! Four numerical models turn a handful of user-adjustable parameters into
//! spectral or time-series datasets ready for plotting:
//!
//! | Experiment | Model | Result |
//! |---|---|---|
//! | Gold nanoparticle synthesis | [`NanoparticleModel`](models::NanoparticleModel) | size, colour, UV-Vis spectrum |
//! | Cyclic voltammetry | [`ButlerVolmerCell`](models::ButlerVolmerCell) | I/E loop, peak currents |
//! | Fractional distillation | [`DistillationColumn`](models::DistillationColumn) | tray profile, purities |
//! | ¹H NMR | [`LineShapeSynthesizer`](models::LineShapeSynthesizer) | Lorentzian line shape |
//!
//! # Architecture
//!
//! 1. **Models are pure functions of their parameters**
//!    - Every model implements [`ExperimentModel`](physics::ExperimentModel)
//!    - Random jitter comes from an explicit [`Noise`](physics::Noise) value,
//!      so runs can be made deterministic or reproducible
//!
//! 2. **Coordination is separate from computation**
//!    - [`SimulationOrchestrator`](engine::SimulationOrchestrator) decides
//!      *when* a model runs (simulated latency, latest update wins)
//!    - The models decide *what* comes out
//!
//! # Quick Start
//!
//! ```rust
//! use labsim::prelude::*;
//!
//! let cell = ButlerVolmerCell::default();
//! let parameters = VoltammetryParameters::new(0.1, 5.0);
//!
//! let result = cell.run(&parameters, &mut Noise::disabled());
//! println!("ipa = {:?}, Epa = {:?}", result.ipa, result.epa);
//! assert!(result.ipa.is_some());
//! ```
//!
//! # Modules
//!
//! - [`physics`]: model traits, parameter ranges, noise, traces
//! - [`models`]: the four experiment models
//! - [`engine`]: orchestrator, deferred timer, experiment catalogue, sweeps
//! - [`output`]: CSV export
//! - [`config`]: TOML engine configuration
//! - [`error`]: crate error type

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod output;
pub mod physics;

pub use error::{LabError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use labsim::prelude::*;
    //! ```
    pub use crate::config::EngineConfig;
    pub use crate::engine::{Experiment, OrchestratorConfig, SimulationOrchestrator};
    pub use crate::error::{LabError, Result};
    pub use crate::models::{
        ButlerVolmerCell, CvResult, DistillationColumn, DistillationParameters,
        DistillationResult, LineShapeSynthesizer, Multiplicity, NanoparticleModel,
        NanoparticleOutcome, NanoparticleParameters, NmrPeak, NmrSample, NmrSpectrum,
        VoltammetryParameters,
    };
    pub use crate::output::{CsvConfig, CsvExporter, Exporter};
    pub use crate::physics::{
        ExperimentModel, Noise, NoiseMode, ParameterSet, PhysicalQuantity, Trace,
    };
}
