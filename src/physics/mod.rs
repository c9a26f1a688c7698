//! Shared vocabulary of the simulation engine
//!
//! This module provides the traits and types every experiment model is built
//! on. A model encapsulates one simplified numerical experiment (UV-Vis
//! synthesis outcome, cyclic voltammetry, distillation, NMR line shapes).
//!
//! # Core Concepts
//!
//! - **Experiment Model**: turns a parameter record into a result record
//! - **Parameter Set**: a record that can clamp/quantise itself onto its grid
//! - **Trace**: labelled x/y dataset used for export and rendering
//! - **Noise**: injectable jitter, disabled for deterministic output
//!
//! # Architecture
//!
//! Models are **separate from scheduling**:
//! - The model provides the **numbers** (pure, synchronous)
//! - The orchestrator provides the **timing** (latency, cancellation)
//!
//! # Example
//!
//! ```rust
//! use labsim::physics::{ExperimentModel, Noise, ParameterSet};
//! use labsim::models::{DistillationColumn, DistillationParameters};
//!
//! let model = DistillationColumn::default();
//! let parameters = DistillationParameters::new(2.54, 10).normalized();
//!
//! let result = model.run(&parameters, &mut Noise::disabled());
//! assert_eq!(result.compositions.len(), 10);
//! ```

// module declaration
pub mod traits;
pub mod data;
pub mod noise;
pub mod parameters;

// re-export commonly used types for convenience
pub use data::Trace;
pub use noise::{Noise, NoiseMode};
pub use parameters::ParameterRange;
pub use traits::{
    ExperimentModel,
    ParameterSet,
    PhysicalQuantity, };
