//! TOML engine configuration
//!
//! Every section and key is optional:
//!
//! ```toml
//! # labsim.toml
//! [orchestrator]
//! latency_ms = 300
//!
//! [noise]
//! mode = "seeded"     # "entropy" | "seeded" | "disabled"
//! seed = 42
//!
//! [export]
//! delimiter = ";"
//! precision = 4
//! include_metadata = true
//! points = 500
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::OrchestratorConfig;
use crate::error::Result;
use crate::output::CsvConfig;
use crate::physics::{Noise, NoiseMode};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub orchestrator: OrchestratorSection,

    #[serde(default)]
    pub noise: NoiseSection,

    #[serde(default)]
    pub export: ExportSection,
}

/// `[orchestrator]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSection {
    /// Simulated backend latency in milliseconds
    pub latency_ms: u64,
}

impl Default for OrchestratorSection {
    fn default() -> Self {
        Self { latency_ms: 300 }
    }
}

/// Noise source selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    #[default]
    Entropy,
    Seeded,
    Disabled,
}

/// `[noise]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSection {
    pub mode: NoiseKind,
    pub seed: Option<u64>,
}

/// `[export]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub delimiter: char,
    pub precision: usize,
    pub include_metadata: bool,
    /// Downsample exports to this many points
    pub points: Option<usize>,
}

impl Default for ExportSection {
    fn default() -> Self {
        let csv = CsvConfig::default();
        Self {
            delimiter: csv.delimiter,
            precision: csv.precision,
            include_metadata: true,
            points: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Noise mode selected by the `[noise]` section
    ///
    /// `seeded` without a `seed` uses seed 0.
    pub fn noise_mode(&self) -> NoiseMode {
        match self.noise.mode {
            NoiseKind::Entropy => NoiseMode::Entropy,
            NoiseKind::Disabled => NoiseMode::Disabled,
            NoiseKind::Seeded => {
                let seed = self.noise.seed.unwrap_or_else(|| {
                    log::warn!("Noise mode 'seeded' without a seed, using 0");
                    0
                });
                NoiseMode::Seeded(seed)
            }
        }
    }

    /// Fresh noise source for the configured mode
    pub fn noise(&self) -> Noise {
        Noise::from_mode(self.noise_mode())
    }

    /// Orchestrator settings
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            latency: Duration::from_millis(self.orchestrator.latency_ms),
            noise: self.noise_mode(),
        }
    }

    /// CSV exporter settings (metadata content is filled in per export)
    pub fn csv(&self) -> CsvConfig {
        CsvConfig {
            delimiter: self.export.delimiter,
            precision: self.export.precision,
            include_metadata: self.export.include_metadata,
            ..CsvConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [orchestrator]
            latency_ms = 50

            [noise]
            mode = "seeded"
            seed = 42

            [export]
            delimiter = ";"
            precision = 3
            include_metadata = false
            points = 500
        "#;

        let config = EngineConfig::from_str(toml).unwrap();
        assert_eq!(config.orchestrator.latency_ms, 50);
        assert_eq!(config.noise_mode(), NoiseMode::Seeded(42));
        assert_eq!(config.export.delimiter, ';');
        assert_eq!(config.export.points, Some(500));

        let orchestrator = config.orchestrator();
        assert_eq!(orchestrator.latency, Duration::from_millis(50));

        let csv = config.csv();
        assert_eq!(csv.precision, 3);
        assert!(!csv.include_metadata);
    }

    #[test]
    fn test_partial_config() {
        let config = EngineConfig::from_str("[noise]\nmode = \"disabled\"\n").unwrap();
        assert_eq!(config.noise_mode(), NoiseMode::Disabled);
        assert_eq!(config.orchestrator.latency_ms, 300);
        assert_eq!(config.export, ExportSection::default());
    }

    #[test]
    fn test_empty_config() {
        let config = EngineConfig::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.noise_mode(), NoiseMode::Entropy);
    }

    #[test]
    fn test_seeded_without_seed() {
        let config = EngineConfig::from_str("[noise]\nmode = \"seeded\"\n").unwrap();
        assert_eq!(config.noise_mode(), NoiseMode::Seeded(0));
    }

    #[test]
    fn test_invalid_config() {
        let err = EngineConfig::from_str("[noise]\nmode = \"loud\"\n").unwrap_err();
        assert!(matches!(err, crate::error::LabError::ConfigParse(_)));
    }
}
