//! ¹H NMR line-shape synthesis
//!
//! Expands discrete peak records (shift, multiplicity, integration) into a
//! sampled spectrum. Every peak is split by first-order J-coupling into 1 to 4
//! Lorentzian sub-peaks following the n+1 rule:
//!
//! | Multiplicity | Offsets (× J)            | Weights                  |
//! |--------------|--------------------------|--------------------------|
//! | singlet      | 0                        | 1                        |
//! | doublet      | -½, +½                   | ½, ½                     |
//! | triplet      | -1, 0, +1                | ¼, ½, ¼                  |
//! | quartet      | -3/2, -½, +½, +3/2       | ⅛, ⅜, ⅜, ⅛               |
//! | multiplet    | 0 (broad line)           | 1                        |
//!
//! The sub-peak samples are concatenated, sorted by decreasing shift and
//! framed by two zero-intensity anchors at 10 ppm and 0 ppm.
//!
//! # Example
//!
//! ```rust
//! use labsim::models::{LineShapeSynthesizer, NmrPeak};
//! use labsim::physics::Noise;
//!
//! let synth = LineShapeSynthesizer::default();
//! let methyl: NmrPeak = "1.22:t:3".parse().unwrap();
//!
//! let points = synth.synthesize(&[methyl], &mut Noise::disabled());
//! assert_eq!(points.first().unwrap().shift, 10.0);
//! assert_eq!(points.last().unwrap().shift, 0.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabError;
use crate::models::line_shape::{grid, LineShape};
use crate::physics::{ExperimentModel, Noise, ParameterSet, PhysicalQuantity, Trace};

// =================================================================================================
// Peak records
// =================================================================================================

/// Splitting pattern of a resonance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplicity {
    #[serde(rename = "s")]
    Singlet,
    #[serde(rename = "d")]
    Doublet,
    #[serde(rename = "t")]
    Triplet,
    #[serde(rename = "q")]
    Quartet,
    #[serde(rename = "m")]
    Multiplet,
}

impl Multiplicity {
    /// Sub-peak offsets in units of J
    pub fn offsets(&self) -> &'static [f64] {
        match self {
            Self::Singlet | Self::Multiplet => &[0.0],
            Self::Doublet => &[-0.5, 0.5],
            Self::Triplet => &[-1.0, 0.0, 1.0],
            Self::Quartet => &[-1.5, -0.5, 0.5, 1.5],
        }
    }

    /// Share of the total height carried by each sub-peak
    pub fn weights(&self) -> &'static [f64] {
        match self {
            Self::Singlet | Self::Multiplet => &[1.0],
            Self::Doublet => &[0.5, 0.5],
            Self::Triplet => &[0.25, 0.5, 0.25],
            Self::Quartet => &[0.125, 0.375, 0.375, 0.125],
        }
    }

    /// Single-letter tag
    pub fn tag(&self) -> char {
        match self {
            Self::Singlet => 's',
            Self::Doublet => 'd',
            Self::Triplet => 't',
            Self::Quartet => 'q',
            Self::Multiplet => 'm',
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Multiplicity {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "singlet" => Ok(Self::Singlet),
            "d" | "doublet" => Ok(Self::Doublet),
            "t" | "triplet" => Ok(Self::Triplet),
            "q" | "quartet" => Ok(Self::Quartet),
            "m" | "multiplet" => Ok(Self::Multiplet),
            other => Err(LabError::InvalidPeak(format!(
                "unknown multiplicity '{}' (expected s, d, t, q or m)",
                other
            ))),
        }
    }
}

/// One resonance of a ¹H spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NmrPeak {
    /// Chemical shift (ppm)
    pub shift: f64,
    pub multiplicity: Multiplicity,
    /// Relative integration (number of protons)
    pub integration: f64,
}

impl NmrPeak {
    pub fn new(shift: f64, multiplicity: Multiplicity, integration: f64) -> Self {
        Self { shift, multiplicity, integration }
    }
}

/// Parses `shift:multiplicity:integration`, e.g. `1.22:t:3`
impl FromStr for NmrPeak {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        let [shift, multiplicity, integration] = fields.as_slice() else {
            return Err(LabError::InvalidPeak(format!(
                "'{}' is not of the form shift:multiplicity:integration",
                s
            )));
        };

        let number = |field: &str, what: &str| -> Result<f64, LabError> {
            field
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    LabError::InvalidPeak(format!("invalid {} '{}' in '{}'", what, field, s))
                })
        };

        Ok(Self {
            shift: number(*shift, "shift")?,
            multiplicity: multiplicity.parse()?,
            integration: number(*integration, "integration")?,
        })
    }
}

/// Sampled point of the synthesised spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    /// Chemical shift (ppm)
    pub shift: f64,
    pub intensity: f64,
}

// =================================================================================================
// Synthesizer
// =================================================================================================

/// Lorentzian spectrum generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShapeSynthesizer {
    /// Scalar coupling J (ppm)
    pub coupling: f64,
    /// Half width of resolved lines (ppm)
    pub half_width: f64,
    /// Half width of the broad multiplet line (ppm)
    pub multiplet_half_width: f64,
    /// Sampling step (ppm)
    pub step: f64,
    /// Sampling window in half widths on each side of a line
    pub window: f64,
    /// Total height per unit of integration
    pub height_per_integration: f64,
    /// Upper bound of the per-sample jitter
    pub jitter: f64,
    /// Baseline anchor on the high-shift side (ppm)
    pub axis_high: f64,
    /// Baseline anchor on the low-shift side (ppm)
    pub axis_low: f64,
}

impl Default for LineShapeSynthesizer {
    fn default() -> Self {
        Self {
            coupling: 0.015,
            half_width: 0.005,
            multiplet_half_width: 0.02,
            step: 0.005,
            window: 4.0,
            height_per_integration: 20.0,
            jitter: 0.5,
            axis_high: 10.0,
            axis_low: 0.0,
        }
    }
}

impl LineShapeSynthesizer {
    /// Line half width used for a multiplicity
    pub fn line_half_width(&self, multiplicity: Multiplicity) -> f64 {
        match multiplicity {
            Multiplicity::Multiplet => self.multiplet_half_width,
            _ => self.half_width,
        }
    }

    /// Sub-peaks of one resonance
    pub fn expand(&self, peak: &NmrPeak) -> Vec<LineShape> {
        let total = peak.integration * self.height_per_integration;
        let half_width = self.line_half_width(peak.multiplicity);

        peak.multiplicity
            .offsets()
            .iter()
            .zip(peak.multiplicity.weights())
            .map(|(k, weight)| {
                LineShape::lorentzian(peak.shift + k * self.coupling, half_width, total * weight)
            })
            .collect()
    }

    /// Sampled line for one sub-peak over ±window half widths
    fn render(&self, line: &LineShape, half_width: f64, noise: &mut Noise) -> Vec<LinePoint> {
        let reach = half_width * self.window;
        let center = line.center();
        grid(center - reach, center + reach, self.step)
            .map(|shift| LinePoint {
                shift,
                intensity: line.evaluate(shift) + noise.uniform(self.jitter),
            })
            .collect()
    }

    /// Full spectrum, sorted by decreasing shift and framed by baseline anchors
    pub fn synthesize(&self, peaks: &[NmrPeak], noise: &mut Noise) -> Vec<LinePoint> {
        let mut points: Vec<LinePoint> = Vec::new();

        for peak in peaks {
            let half_width = self.line_half_width(peak.multiplicity);
            for line in self.expand(peak) {
                points.extend(self.render(&line, half_width, noise));
            }
        }

        points.sort_by(|a, b| b.shift.total_cmp(&a.shift));

        let mut framed = Vec::with_capacity(points.len() + 2);
        framed.push(LinePoint { shift: self.axis_high, intensity: 0.0 });
        framed.extend(points);
        framed.push(LinePoint { shift: self.axis_low, intensity: 0.0 });

        log::trace!("NMR synthesis: {} peaks -> {} points", peaks.len(), framed.len());
        framed
    }
}

// =================================================================================================
// Experiment wrapper
// =================================================================================================

/// Peak list of one sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NmrSample {
    pub peaks: Vec<NmrPeak>,
}

impl NmrSample {
    pub fn new(peaks: Vec<NmrPeak>) -> Self {
        Self { peaks }
    }
}

impl ParameterSet for NmrSample {
    /// Drops peaks with non-finite fields
    fn normalized(&self) -> Self {
        Self {
            peaks: self
                .peaks
                .iter()
                .filter(|p| p.shift.is_finite() && p.integration.is_finite())
                .copied()
                .collect(),
        }
    }
}

/// Synthesised spectrum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NmrSpectrum {
    pub points: Vec<LinePoint>,
}

impl NmrSpectrum {
    /// Intensity against chemical shift (decreasing shift order)
    pub fn to_trace(&self) -> Trace {
        Trace::from_points(
            "1H NMR spectrum",
            PhysicalQuantity::ChemicalShift,
            PhysicalQuantity::Intensity,
            self.points.iter().map(|p| (p.shift, p.intensity)),
        )
    }
}

impl ExperimentModel for LineShapeSynthesizer {
    type Parameters = NmrSample;
    type Output = NmrSpectrum;

    fn run(&self, parameters: &NmrSample, noise: &mut Noise) -> NmrSpectrum {
        NmrSpectrum {
            points: self.synthesize(&parameters.peaks, noise),
        }
    }

    fn name(&self) -> &str {
        "1H NMR line shapes"
    }

    fn description(&self) -> Option<&str> {
        Some("Lorentzian lines with first-order J-coupling splitting")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_input_is_baseline() {
        let points = LineShapeSynthesizer::default().synthesize(&[], &mut Noise::disabled());
        assert_eq!(
            points,
            vec![
                LinePoint { shift: 10.0, intensity: 0.0 },
                LinePoint { shift: 0.0, intensity: 0.0 },
            ]
        );
    }

    #[test]
    fn test_expand_triplet() {
        let synth = LineShapeSynthesizer::default();
        let lines = synth.expand(&NmrPeak::new(1.22, Multiplicity::Triplet, 3.0));

        assert_eq!(lines.len(), 3);
        assert_relative_eq!(lines[0].center(), 1.205, epsilon = 1e-12);
        assert_relative_eq!(lines[1].center(), 1.22, epsilon = 1e-12);
        assert_relative_eq!(lines[2].center(), 1.235, epsilon = 1e-12);

        let heights: Vec<f64> = lines.iter().map(|l| l.height()).collect();
        assert_eq!(heights, vec![15.0, 30.0, 15.0]);
    }

    #[test]
    fn test_weights_sum_to_one() {
        for m in [
            Multiplicity::Singlet,
            Multiplicity::Doublet,
            Multiplicity::Triplet,
            Multiplicity::Quartet,
            Multiplicity::Multiplet,
        ] {
            let sum: f64 = m.weights().iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
            assert_eq!(m.weights().len(), m.offsets().len());
        }
    }

    #[test]
    fn test_point_counts() {
        let synth = LineShapeSynthesizer::default();
        let mut noise = Noise::disabled();

        // 9 samples per resolved line, 33 for the broad multiplet line
        let quartet = synth.synthesize(&[NmrPeak::new(3.68, Multiplicity::Quartet, 2.0)], &mut noise);
        assert_eq!(quartet.len(), 4 * 9 + 2);

        let broad = synth.synthesize(&[NmrPeak::new(7.2, Multiplicity::Multiplet, 5.0)], &mut noise);
        assert_eq!(broad.len(), 33 + 2);
    }

    #[test]
    fn test_sorted_descending() {
        let synth = LineShapeSynthesizer::default();
        let peaks = [
            NmrPeak::new(1.22, Multiplicity::Triplet, 3.0),
            NmrPeak::new(3.68, Multiplicity::Quartet, 2.0),
            NmrPeak::new(2.5, Multiplicity::Singlet, 1.0),
        ];
        let points = synth.synthesize(&peaks, &mut Noise::seeded(1));
        for w in points.windows(2) {
            assert!(w[0].shift >= w[1].shift);
        }
    }

    #[test]
    fn test_parse_peak() {
        let peak: NmrPeak = "3.68:q:2".parse().unwrap();
        assert_eq!(peak, NmrPeak::new(3.68, Multiplicity::Quartet, 2.0));

        let peak: NmrPeak = " 7.26 : multiplet : 5 ".parse().unwrap();
        assert_eq!(peak.multiplicity, Multiplicity::Multiplet);

        assert!("1.22:x:3".parse::<NmrPeak>().is_err());
        assert!("1.22:t".parse::<NmrPeak>().is_err());
        assert!("abc:t:3".parse::<NmrPeak>().is_err());
        assert!("1.22:t:inf".parse::<NmrPeak>().is_err());
    }

    #[test]
    fn test_multiplicity_serde_tags() {
        let json = serde_json::to_string(&NmrPeak::new(2.16, Multiplicity::Singlet, 6.0)).unwrap();
        assert_eq!(json, r#"{"shift":2.16,"multiplicity":"s","integration":6.0}"#);

        let back: NmrPeak = serde_json::from_str(r#"{"shift":1.0,"multiplicity":"q","integration":2}"#).unwrap();
        assert_eq!(back.multiplicity, Multiplicity::Quartet);
    }

    #[test]
    fn test_normalized_drops_non_finite() {
        let sample = NmrSample::new(vec![
            NmrPeak::new(f64::NAN, Multiplicity::Singlet, 1.0),
            NmrPeak::new(2.0, Multiplicity::Doublet, 1.0),
        ]);
        assert_eq!(sample.normalized().peaks.len(), 1);
    }
}
