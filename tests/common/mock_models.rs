//! Mock experiment models for testing
//!
//! These models have trivially known outputs and record how often they run,
//! which makes them ideal for checking the orchestration layer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use labsim::physics::{ExperimentModel, Noise, ParameterSet};

// =================================================================================================
// Level: one clamped number
// =================================================================================================

/// Parameter record holding a single value clamped to [0, 100]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level(pub f64);

impl ParameterSet for Level {
    fn normalized(&self) -> Self {
        Level(self.0.clamp(0.0, 100.0))
    }
}

// =================================================================================================
// Counting model: y = 2 * level
// =================================================================================================

/// Doubles its input and counts invocations
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct CountingModel {
    runs: Arc<AtomicUsize>,
}

impl CountingModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `run` calls so far
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl ExperimentModel for CountingModel {
    type Parameters = Level;
    type Output = f64;

    fn run(&self, parameters: &Level, noise: &mut Noise) -> f64 {
        self.runs.fetch_add(1, Ordering::SeqCst);
        2.0 * parameters.0 + noise.centered(1e-3)
    }

    fn name(&self) -> &str {
        "Counting model"
    }
}
