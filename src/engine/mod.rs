//! Coordination layer between the models and their consumers
//!
//! - [`SimulationOrchestrator`]: per-experiment state with delayed,
//!   cancel-on-supersede recomputation
//! - [`DeferredTask`]: the cancellable timer it is built on
//! - [`Experiment`]: the experiment catalogue
//! - [`sweep`] / [`randles_sevcik`]: batch evaluation
//!
//! # Parallel sweeps
//!
//! With the `parallel` feature, [`sweep`] dispatches to rayon once the batch
//! holds more records than [`parallel_threshold()`]. Below that, thread
//! start-up costs more than a few model runs.

use std::sync::atomic::{AtomicUsize, Ordering};

pub mod experiment;
pub mod orchestrator;
pub mod scheduler;
pub mod sweep;

pub use experiment::Experiment;
pub use orchestrator::{OrchestratorConfig, SimulationOrchestrator, Snapshot, DEFAULT_LATENCY};
pub use scheduler::DeferredTask;
pub use sweep::{randles_sevcik, sweep};

// Relaxed ordering: the value is a performance hint, not a synchronisation
// point.
const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Number of records above which a sweep goes parallel
///
/// ```rust
/// use labsim::engine::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Change the sweep parallelisation threshold
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// ```rust
/// use labsim::engine::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(64);
/// assert_eq!(parallel_threshold(), 64);
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Restores the previous threshold on drop
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}
