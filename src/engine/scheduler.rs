//! Cancellable delayed job
//!
//! A [`DeferredTask`] holds at most one pending job. Scheduling a new job
//! aborts the previous one if it has not run yet, so a superseded job can
//! never complete after its replacement.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use labsim::engine::DeferredTask;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let runs = Arc::new(AtomicUsize::new(0));
//! let mut task = DeferredTask::new();
//!
//! for _ in 0..3 {
//!     let runs = Arc::clone(&runs);
//!     task.schedule(Duration::from_millis(10), move || {
//!         runs.fetch_add(1, Ordering::SeqCst);
//!     });
//! }
//!
//! task.join().await;
//! assert_eq!(runs.load(Ordering::SeqCst), 1);
//! # }
//! ```

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Single-slot timer: run `job` after `delay` unless superseded
#[derive(Debug, Default)]
pub struct DeferredTask {
    handle: Option<JoinHandle<()>>,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Schedule `job` to run once `delay` has elapsed, aborting any pending job
    ///
    /// The deadline is taken when this is called, not when the runtime first
    /// polls the task. Returns `true` when a pending job was aborted.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let superseded = self.cancel();
        let deadline = Instant::now() + delay;

        self.handle = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            job();
        }));

        superseded
    }

    /// Abort the pending job; `true` if one was still waiting or running
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// True while a job is scheduled and has not finished
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the pending job, if any
    ///
    /// Returns immediately when nothing is scheduled. An aborted job counts
    /// as finished.
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    log::error!("Deferred job panicked: {}", err);
                }
            }
        }
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
