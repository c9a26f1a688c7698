//! Export module for experiment results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, working
//! on [`Trace`]s so every experiment result can be exported the same way.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use labsim::models::{ButlerVolmerCell, VoltammetryParameters};
//! use labsim::output::export::{CsvExporter, Exporter};
//! use labsim::physics::{ExperimentModel, Noise};
//!
//! let result = ButlerVolmerCell::default()
//!     .run(&VoltammetryParameters::default(), &mut Noise::from_entropy());
//! let exporter = CsvExporter::default();
//!
//! // Full export
//! exporter.export_trace(&result.to_trace(), None, Path::new("cv.csv"))?;
//!
//! // Downsampled export to 500 points
//! exporter.export_trace(&result.to_trace(), Some(500), Path::new("cv_light.csv"))?;
//! # Ok::<(), labsim::output::export::CsvError>(())
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter, CsvMetadata};

use std::path::Path;

use crate::physics::Trace;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type instead of
/// boxing, so the caller can react precisely.
///
/// # Parameter `n_points`
///
/// - `None`: exports every point
/// - `Some(n)`: uniformly downsamples to `n` points, always keeping the
///   **first and last** points
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one trace.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `trace` is empty or holds non-finite values
    fn export_trace(
        &self,
        trace: &Trace,
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), Self::Error>;

    /// Exports traces sharing one x axis (for instance voltammograms at
    /// several concentrations).
    ///
    /// # Errors
    ///
    /// Returns an error if the traces differ in length or x values, or for
    /// the same reasons as [`export_trace`](Exporter::export_trace).
    fn export_traces(
        &self,
        traces: &[Trace],
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), Self::Error>;
}
