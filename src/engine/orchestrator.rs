//! Per-experiment coordination
//!
//! A [`SimulationOrchestrator`] owns one model, the current parameter record
//! and the latest result. Every parameter update is stored immediately and
//! flags the experiment as computing; the model runs after a simulated
//! backend latency.
//!
//! # Ordering
//!
//! An update supersedes any recomputation still waiting: its timer is
//! aborted. Each job also carries the generation number of the update that
//! scheduled it and only stores its result while that generation is current,
//! so a stale result can never overwrite a newer one.
//!
//! # Example
//!
//! ```rust
//! use labsim::engine::{OrchestratorConfig, SimulationOrchestrator};
//! use labsim::models::{DistillationColumn, DistillationParameters};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let column = SimulationOrchestrator::new(
//!     DistillationColumn::default(),
//!     DistillationParameters::default(),
//!     OrchestratorConfig::deterministic(),
//! );
//!
//! column.update_parameters(|p| p.tray_count = 20);
//! assert!(column.is_computing());
//!
//! column.settle().await;
//! assert_eq!(column.result().compositions.len(), 20);
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;

use crate::engine::DeferredTask;
use crate::physics::{ExperimentModel, Noise, NoiseMode, ParameterSet};

/// Default simulated backend latency
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Orchestrator settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorConfig {
    /// Delay between a parameter update and the recomputation
    pub latency: Duration,
    /// Jitter source handed to the model
    pub noise: NoiseMode,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            noise: NoiseMode::Entropy,
        }
    }
}

impl OrchestratorConfig {
    /// Default latency, no jitter
    pub fn deterministic() -> Self {
        Self {
            noise: NoiseMode::Disabled,
            ..Self::default()
        }
    }

    /// Builder pattern: set latency
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Consistent copy of the orchestrator state
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<P, O> {
    pub parameters: P,
    pub result: O,
    pub computing: bool,
    /// Update epoch, see [`SimulationOrchestrator::generation`]
    pub generation: u64,
}

struct Shared<M: ExperimentModel> {
    parameters: M::Parameters,
    result: M::Output,
    computing: bool,
    generation: u64,
    completed: u64,
    noise: Noise,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Latest-wins recomputation of one experiment
pub struct SimulationOrchestrator<M: ExperimentModel> {
    model: Arc<M>,
    shared: Arc<Mutex<Shared<M>>>,
    timer: Mutex<DeferredTask>,
    done: Arc<Notify>,
    latency: Duration,
}

impl<M: ExperimentModel> SimulationOrchestrator<M> {
    /// Create the orchestrator and compute the initial result synchronously
    pub fn new(model: M, initial: M::Parameters, config: OrchestratorConfig) -> Self {
        let parameters = initial.normalized();
        let mut noise = Noise::from_mode(config.noise);
        let result = model.run(&parameters, &mut noise);

        log::debug!(
            "{}: initial result computed, latency {:?}",
            model.name(),
            config.latency
        );

        Self {
            model: Arc::new(model),
            shared: Arc::new(Mutex::new(Shared {
                parameters,
                result,
                computing: false,
                generation: 0,
                completed: 1,
                noise,
            })),
            timer: Mutex::new(DeferredTask::new()),
            done: Arc::new(Notify::new()),
            latency: config.latency,
        }
    }

    /// Store a new parameter record and schedule its recomputation
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn set_parameters(&self, parameters: M::Parameters) {
        let parameters = parameters.normalized();

        // The timer lock serialises concurrent updates: generation order
        // matches scheduling order.
        let mut timer = lock(&self.timer);

        let generation = {
            let mut shared = lock(&self.shared);
            shared.parameters = parameters;
            shared.generation += 1;
            shared.computing = true;
            shared.generation
        };

        let model = Arc::clone(&self.model);
        let shared = Arc::clone(&self.shared);
        let done = Arc::clone(&self.done);

        let superseded = timer.schedule(self.latency, move || {
            let mut guard = lock(&shared);
            if guard.generation != generation {
                log::debug!("{}: dropping stale result (generation {})", model.name(), generation);
                return;
            }

            let state = &mut *guard;
            state.result = model.run(&state.parameters, &mut state.noise);
            state.computing = false;
            state.completed += 1;
            drop(guard);

            log::debug!("{}: generation {} complete", model.name(), generation);
            done.notify_waiters();
        });

        if superseded {
            log::debug!(
                "{}: generation {} supersedes a pending recomputation",
                self.model.name(),
                generation
            );
        } else {
            log::debug!("{}: generation {} scheduled", self.model.name(), generation);
        }
    }

    /// Edit the current parameter record in place, then reschedule
    pub fn update_parameters<F>(&self, edit: F)
    where
        F: FnOnce(&mut M::Parameters),
    {
        let mut parameters = self.parameters();
        edit(&mut parameters);
        self.set_parameters(parameters);
    }

    /// Abort the pending recomputation, keeping the last result
    ///
    /// Returns `true` when a recomputation was pending.
    pub fn cancel(&self) -> bool {
        let mut timer = lock(&self.timer);
        let aborted = timer.cancel();
        {
            let mut shared = lock(&self.shared);
            if shared.computing {
                // A job already past its delay may be waiting on the lock
                shared.generation += 1;
                shared.computing = false;
            }
        }
        self.done.notify_waiters();

        if aborted {
            log::debug!("{}: pending recomputation cancelled", self.model.name());
        }
        aborted
    }

    /// Wait until no recomputation is pending
    pub async fn settle(&self) {
        loop {
            let finished = self.done.notified();
            if !self.is_computing() {
                return;
            }
            finished.await;
        }
    }

    /// Current (normalised) parameters
    pub fn parameters(&self) -> M::Parameters {
        lock(&self.shared).parameters.clone()
    }

    /// Latest completed result
    pub fn result(&self) -> M::Output {
        lock(&self.shared).result.clone()
    }

    /// True between an update and its recomputation
    pub fn is_computing(&self) -> bool {
        lock(&self.shared).computing
    }

    /// Update epoch
    ///
    /// Bumped by every parameter update and by a [`cancel`](Self::cancel)
    /// that aborts a pending recomputation. A cancel while idle leaves it
    /// unchanged.
    pub fn generation(&self) -> u64 {
        lock(&self.shared).generation
    }

    /// Number of model runs, the initial one included
    pub fn completed_runs(&self) -> u64 {
        lock(&self.shared).completed
    }

    /// Parameters, result and flags read under one lock
    pub fn snapshot(&self) -> Snapshot<M::Parameters, M::Output> {
        let shared = lock(&self.shared);
        Snapshot {
            parameters: shared.parameters.clone(),
            result: shared.result.clone(),
            computing: shared.computing,
            generation: shared.generation,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}
