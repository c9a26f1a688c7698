//! Crate error type
//!
//! The models themselves are total and never fail. Errors only come from the
//! edges: configuration files, exports and user-supplied text.

use crate::output::CsvError;

/// Errors raised outside the numerical core
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    /// I/O error reading or writing a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration
    #[error("Failed to parse TOML configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected export
    #[error("Export failed: {0}")]
    Export(#[from] CsvError),

    /// Experiment id not in the catalogue
    #[error("Unknown experiment: {0}")]
    UnknownExperiment(String),

    /// Unparseable NMR peak descriptor
    #[error("Invalid NMR peak: {0}")]
    InvalidPeak(String),
}

/// Result alias for fallible crate operations
pub type Result<T> = std::result::Result<T, LabError>;
