//! Output module for experiment results
//!
//! Results are flattened into [`Trace`](crate::physics::Trace)s and written
//! by an [`Exporter`](export::Exporter). Rendering is left to the presentation
//! layer.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use labsim::models::{DistillationColumn, DistillationParameters};
//! use labsim::output::{CsvExporter, Exporter};
//! use labsim::physics::{ExperimentModel, Noise};
//!
//! let result = DistillationColumn::default()
//!     .run(&DistillationParameters::default(), &mut Noise::disabled());
//!
//! CsvExporter::default().export_trace(&result.to_trace(), None, Path::new("trays.csv"))?;
//! # Ok::<(), labsim::output::CsvError>(())
//! ```

pub mod export;

// Re-export commonly used items for convenience
pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};

use std::path::Path;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::physics::Trace;

/// Write `trace` to `path` with the `[export]` settings of `config`
///
/// `metadata` is only written when the configuration enables the header.
pub fn export_csv(
    config: &EngineConfig,
    trace: &Trace,
    metadata: Option<CsvMetadata>,
    path: &Path,
) -> Result<()> {
    let mut csv = config.csv();
    if let Some(metadata) = metadata.filter(|_| csv.include_metadata) {
        csv = csv.with_metadata(metadata);
    }

    CsvExporter::new(csv).export_trace(trace, config.export.points, path)?;
    log::debug!("Exported {} points to {}", trace.len(), path.display());
    Ok(())
}

/// Pretty-printed JSON rendering of a result or report
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;
    use crate::models::{DistillationColumn, DistillationParameters};
    use crate::physics::{ExperimentModel, Noise, PhysicalQuantity};
    use std::fs;
    use tempfile::NamedTempFile;

    fn profile() -> Trace {
        DistillationColumn::default()
            .run(&DistillationParameters::new(2.5, 5), &mut Noise::disabled())
            .to_trace()
    }

    #[test]
    fn test_export_csv_applies_config() {
        let config = EngineConfig::from_str(
            "[export]\ndelimiter = ';'\nprecision = 2\ninclude_metadata = false\n",
        )
        .unwrap();
        let file = NamedTempFile::new().unwrap();
        let metadata = CsvMetadata::new("Fractional distillation", "column");

        export_csv(&config, &profile(), Some(metadata), file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(!content.starts_with('#'));
        assert_eq!(content.lines().count(), 6);
        assert!(content.lines().nth(1).unwrap().starts_with("1.00;"));
    }

    #[test]
    fn test_export_csv_writes_metadata_by_default() {
        let file = NamedTempFile::new().unwrap();
        let metadata = CsvMetadata::new("Fractional distillation", "column").parameter("trays", 5);

        export_csv(&EngineConfig::default(), &profile(), Some(metadata), file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("# Experiment: Fractional distillation\n"));
        assert!(content.contains("# trays: 5\n"));
    }

    #[test]
    fn test_export_csv_error_is_lab_error() {
        let file = NamedTempFile::new().unwrap();
        let empty = Trace::from_points(
            "empty",
            PhysicalQuantity::TrayNumber,
            PhysicalQuantity::EthanolFraction,
            Vec::new(),
        );

        let err = export_csv(&EngineConfig::default(), &empty, None, file.path()).unwrap_err();
        assert!(matches!(err, LabError::Export(CsvError::EmptyData)));
        assert!(err.to_string().starts_with("Export failed: "));
    }

    #[test]
    fn test_to_json() {
        let parameters = DistillationParameters::new(2.5, 5);
        let json = to_json(&parameters).unwrap();

        let back: DistillationParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parameters);
    }

    #[test]
    fn test_to_json_error_is_lab_error() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1.0);

        assert!(matches!(to_json(&map), Err(LabError::Json(_))));
    }
}
