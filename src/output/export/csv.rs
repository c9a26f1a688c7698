//! CSV export of experiment traces
//!
//! Writes one [`Trace`] (two columns) or several traces sharing an x axis
//! (one x column followed by one column per trace). The output opens directly
//! in spreadsheets, pandas or MATLAB.
//!
//! # Features
//!
//! - **Metadata support**: Optional `#` comment header with experiment,
//!   model, parameters and generation time
//! - **Customizable**: Delimiter, decimal separator and precision
//! - **Downsampling**: Uniform, always keeping the first and last point
//! - **Validation**: Checks for empty data, mismatched axes and non-finite values
//!
//! # Example
//!
//! ```rust
//! use labsim::output::export::{CsvConfig, CsvExporter};
//! use labsim::physics::{PhysicalQuantity, Trace};
//!
//! let trace = Trace::from_points(
//!     "profile",
//!     PhysicalQuantity::TrayNumber,
//!     PhysicalQuantity::EthanolFraction,
//!     vec![(1.0, 9.7), (2.0, 9.3)],
//! );
//!
//! let exporter = CsvExporter::new(CsvConfig::default().precision(1));
//! let mut buffer = Vec::new();
//! exporter.write_trace(&trace, None, &mut buffer).unwrap();
//!
//! assert_eq!(String::from_utf8(buffer).unwrap(), "Tray,Ethanol (%)\n1.0,9.7\n2.0,9.3\n");
//! ```
//!
//! **Output with metadata**:
//! ```csv
//! # Simulated Chemistry Experiment Data
//! # Generated: 2026-10-14T09:30:00+00:00
//! # Experiment: Electrochemical analysis
//! # Model: Cyclic voltammetry
//! # scanRate: 0.1
//! #
//! Potential (V),Current
//! -0.200000,512.318221
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::output::export::Exporter;
use crate::physics::Trace;

/// Tolerance when checking that traces share their x axis
const AXIS_TOLERANCE: f64 = 1e-12;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while exporting to CSV
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty data: nothing to export")]
    EmptyData,

    #[error("Data length mismatch: '{name}' has {found} points, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Traces do not share an x axis: '{name}' differs at point {index}")]
    AxisMismatch { name: String, index: usize },

    #[error("Invalid data: NaN or Inf detected in '{0}'")]
    NonFinite(String),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of decimal places (default: 6)
/// - `include_metadata`: Add header comments with experiment info
/// - `metadata`: Experiment metadata to include
#[derive(Debug, Clone)]
pub struct CsvConfig {
    pub delimiter: char,
    pub decimal_separator: char,
    pub precision: usize,
    pub include_metadata: bool,
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter with comma decimals
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Experiment title
    pub experiment: Option<String>,
    /// Model name
    pub model_name: Option<String>,
    /// Parameter names and values, in insertion order
    pub parameters: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn new(experiment: &str, model: &str) -> Self {
        Self {
            experiment: Some(experiment.to_string()),
            model_name: Some(model.to_string()),
            parameters: Vec::new(),
        }
    }

    /// Add parameter (builder pattern)
    pub fn parameter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((key.into(), value.to_string()));
        self
    }

    /// Add parameter
    pub fn add_parameter(&mut self, key: impl Into<String>, value: impl ToString) {
        self.parameters.push((key.into(), value.to_string()));
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Write one trace as two columns
    pub fn write_trace<W: Write>(
        &self,
        trace: &Trace,
        n_points: Option<usize>,
        writer: &mut W,
    ) -> Result<(), CsvError> {
        self.write_traces(std::slice::from_ref(trace), n_points, writer)
    }

    /// Write traces sharing an x axis: the x column of the first trace, then
    /// one column per trace
    ///
    /// A single trace is headed by its axis quantities; several traces by
    /// their names.
    pub fn write_traces<W: Write>(
        &self,
        traces: &[Trace],
        n_points: Option<usize>,
        writer: &mut W,
    ) -> Result<(), CsvError> {

        // ============================= Validation =============================

        validate(traces)?;

        let columns: Vec<Trace> = match n_points {
            Some(n) => traces.iter().map(|t| t.downsample(n)).collect(),
            None => traces.to_vec(),
        };
        let Some(first) = columns.first() else {
            return Err(CsvError::EmptyData);
        };

        // ============================= Write Metadata =========================

        if self.config.include_metadata {
            if let Some(metadata) = &self.config.metadata {
                write_metadata_header(writer, metadata)?;
            }
        }

        // ============================= Write Header ===========================

        let d = self.config.delimiter;
        write!(writer, "{}", first.x_quantity().header())?;
        if columns.len() == 1 {
            write!(writer, "{}{}", d, first.y_quantity().header())?;
        } else {
            for trace in &columns {
                write!(writer, "{}{}", d, trace.name())?;
            }
        }
        writeln!(writer)?;

        // ============================= Write Data =============================

        for i in 0..first.len() {
            write!(writer, "{}", format_number(first.x()[i], &self.config))?;
            for trace in &columns {
                write!(writer, "{}{}", d, format_number(trace.y()[i], &self.config))?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_trace(
        &self,
        trace: &Trace,
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), CsvError> {
        self.export_traces(std::slice::from_ref(trace), n_points, path)
    }

    fn export_traces(
        &self,
        traces: &[Trace],
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), CsvError> {
        // No file is created for invalid data
        validate(traces)?;

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_traces(traces, n_points, &mut writer)?;

        log::debug!("Exported {} trace(s) to {}", traces.len(), path.display());
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn validate(traces: &[Trace]) -> Result<(), CsvError> {
    let Some(first) = traces.first() else {
        return Err(CsvError::EmptyData);
    };
    if first.is_empty() {
        return Err(CsvError::EmptyData);
    }

    for trace in traces {
        if trace.len() != first.len() {
            return Err(CsvError::LengthMismatch {
                name: trace.name().to_string(),
                expected: first.len(),
                found: trace.len(),
            });
        }
        if !trace.is_finite() {
            return Err(CsvError::NonFinite(trace.name().to_string()));
        }
        if let Some(index) = first
            .x()
            .iter()
            .zip(trace.x().iter())
            .position(|(a, b)| (a - b).abs() > AXIS_TOLERANCE)
        {
            return Err(CsvError::AxisMismatch {
                name: trace.name().to_string(),
                index,
            });
        }
    }

    Ok(())
}

/// Write metadata header comments
fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(writer, "# Simulated Chemistry Experiment Data")?;

    // Timestamp (current time)
    let now = chrono::Utc::now();
    writeln!(writer, "# Generated: {}", now.to_rfc3339())?;

    if let Some(experiment) = &metadata.experiment {
        writeln!(writer, "# Experiment: {}", experiment)?;
    }
    if let Some(model) = &metadata.model_name {
        writeln!(writer, "# Model: {}", model)?;
    }
    for (key, value) in &metadata.parameters {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    // Separator
    writeln!(writer, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =================================================================================================
// Tests
// =================================================================================================
