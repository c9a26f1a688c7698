//! Catalogue of the simulated experiments

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabError;

/// One simulated experiment of the virtual laboratory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Experiment {
    #[serde(rename = "nanomaterials-synthesis")]
    NanomaterialsSynthesis,
    #[serde(rename = "spectroscopy-analysis")]
    SpectroscopyAnalysis,
    #[serde(rename = "electrochemical-analysis")]
    ElectrochemicalAnalysis,
    #[serde(rename = "chemical-engineering-simulation")]
    ChemicalEngineering,
}

impl Experiment {
    const ALL: [Experiment; 4] = [
        Experiment::NanomaterialsSynthesis,
        Experiment::SpectroscopyAnalysis,
        Experiment::ElectrochemicalAnalysis,
        Experiment::ChemicalEngineering,
    ];

    pub fn all() -> &'static [Experiment] {
        &Self::ALL
    }

    /// Stable kebab-case identifier
    pub fn id(&self) -> &'static str {
        match self {
            Experiment::NanomaterialsSynthesis => "nanomaterials-synthesis",
            Experiment::SpectroscopyAnalysis => "spectroscopy-analysis",
            Experiment::ElectrochemicalAnalysis => "electrochemical-analysis",
            Experiment::ChemicalEngineering => "chemical-engineering-simulation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Experiment::NanomaterialsSynthesis => "Gold Nanoparticle Synthesis",
            Experiment::SpectroscopyAnalysis => "NMR Spectroscopy Analysis",
            Experiment::ElectrochemicalAnalysis => "Cyclic Voltammetry",
            Experiment::ChemicalEngineering => "Fractional Distillation",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Experiment::NanomaterialsSynthesis => "Nanotechnology",
            Experiment::SpectroscopyAnalysis => "Analytical Chemistry",
            Experiment::ElectrochemicalAnalysis => "Physical Chemistry",
            Experiment::ChemicalEngineering => "Chemical Engineering",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Experiment::NanomaterialsSynthesis => {
                "Citrate reduction of gold salt: particle size, colour and UV-Vis plasmon band"
            }
            Experiment::SpectroscopyAnalysis => {
                "Proton NMR line shapes from chemical shift, multiplicity and integration"
            }
            Experiment::ElectrochemicalAnalysis => {
                "Butler-Volmer cyclic voltammogram and its peak currents"
            }
            Experiment::ChemicalEngineering => {
                "Tray-by-tray ethanol enrichment in a reflux distillation column"
            }
        }
    }

    /// Parse an identifier, `None` when it is not in the catalogue
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.id() == id)
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Experiment {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s.trim()).ok_or_else(|| LabError::UnknownExperiment(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for experiment in Experiment::all() {
            assert_eq!(Experiment::from_id(experiment.id()), Some(*experiment));
        }
        assert_eq!(Experiment::all().len(), 4);
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(Experiment::from_id("chemical-engineering"), None);

        let err = "alchemy".parse::<Experiment>().unwrap_err();
        assert!(matches!(err, LabError::UnknownExperiment(ref id) if id == "alchemy"));
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Experiment::ChemicalEngineering).unwrap();
        assert_eq!(json, "\"chemical-engineering-simulation\"");

        let parsed: Experiment = serde_json::from_str("\"spectroscopy-analysis\"").unwrap();
        assert_eq!(parsed, Experiment::SpectroscopyAnalysis);
    }

    #[test]
    fn test_categories() {
        assert_eq!(Experiment::NanomaterialsSynthesis.category(), "Nanotechnology");
        assert_eq!(Experiment::ElectrochemicalAnalysis.category(), "Physical Chemistry");
        assert_eq!(Experiment::SpectroscopyAnalysis.to_string(), "spectroscopy-analysis");
    }
}
