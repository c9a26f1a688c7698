//! Ethanol/water fractionating column
//!
//! Stage recursion from the reboiler upward. On every tray the vapour is in
//! ideal equilibrium with the liquid, and the reflux ratio moderates the
//! liquid composition carried to the next tray:
//!
//! ```text
//! y  = α x / (1 + x (α - 1))
//! x' = y / (1 + R / 2)
//! ```
//!
//! Products:
//!
//! ```text
//! distillate = min(95.6, y_last · (1 + 0.1 R) · 100)
//! bottoms    = tray₁ / (1 + 0.05 R)
//! ```

use serde::{Deserialize, Serialize};

use crate::physics::{
    ExperimentModel, Noise, ParameterRange, ParameterSet, PhysicalQuantity, Trace,
};

/// Reflux ratio domain
pub const REFLUX_RATIO_RANGE: ParameterRange = ParameterRange::new(1.0, 10.0, 0.1);

/// Tray count domain
pub const TRAY_COUNT_RANGE: ParameterRange = ParameterRange::new(3.0, 30.0, 1.0);

/// Ethanol/water azeotrope ceiling (%)
pub const AZEOTROPE_LIMIT: f64 = 95.6;

/// Column operating conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistillationParameters {
    pub reflux_ratio: f64,
    pub tray_count: usize,
}

impl DistillationParameters {
    pub fn new(reflux_ratio: f64, tray_count: usize) -> Self {
        Self { reflux_ratio, tray_count }
    }
}

impl Default for DistillationParameters {
    fn default() -> Self {
        Self::new(2.5, 10)
    }
}

impl ParameterSet for DistillationParameters {
    fn normalized(&self) -> Self {
        Self {
            reflux_ratio: REFLUX_RATIO_RANGE.quantize(self.reflux_ratio),
            tray_count: TRAY_COUNT_RANGE.quantize(self.tray_count as f64) as usize,
        }
    }
}

/// Liquid composition on one tray
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrayComposition {
    /// 1 is the tray just above the reboiler
    pub tray_number: usize,
    /// Ethanol content (%)
    pub ethanol_concentration: f64,
}

/// Product purities and tray profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistillationResult {
    /// Overhead product purity (%)
    pub distillate_concentration: f64,
    /// Bottoms product purity (%)
    pub bottoms_concentration: f64,
    /// Profile from tray 1 upward
    pub compositions: Vec<TrayComposition>,
}

impl DistillationResult {
    /// Ethanol content against tray number
    pub fn to_trace(&self) -> Trace {
        Trace::from_points(
            "Tray profile",
            PhysicalQuantity::TrayNumber,
            PhysicalQuantity::EthanolFraction,
            self.compositions
                .iter()
                .map(|c| (c.tray_number as f64, c.ethanol_concentration)),
        )
    }
}

/// Binary column with constant relative volatility
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistillationColumn {
    /// Relative volatility α
    pub relative_volatility: f64,
    /// Liquid mole fraction entering tray 1
    pub bottoms_fraction: f64,
    /// Feed composition (fraction), informational only
    pub feed_fraction: f64,
}

impl Default for DistillationColumn {
    fn default() -> Self {
        Self {
            relative_volatility: 2.5,
            bottoms_fraction: 0.1,
            feed_fraction: 0.5,
        }
    }
}

impl DistillationColumn {
    /// Vapour fraction in equilibrium with liquid fraction `x`
    pub fn equilibrium_vapour(&self, x: f64) -> f64 {
        let alpha = self.relative_volatility;
        alpha * x / (1.0 + x * (alpha - 1.0))
    }

    /// Solve the column
    ///
    /// A zero tray count yields zero purities and an empty profile. Negative
    /// or non-finite reflux ratios are treated as 0.
    pub fn simulate(&self, reflux_ratio: f64, tray_count: usize) -> DistillationResult {
        let reflux = if reflux_ratio.is_finite() { reflux_ratio.max(0.0) } else { 0.0 };

        let mut compositions = Vec::with_capacity(tray_count);
        let mut x = self.bottoms_fraction;
        let mut y: Option<f64> = None;

        for tray_number in 1..=tray_count {
            let vapour = self.equilibrium_vapour(x);
            x = vapour / (1.0 + reflux / 2.0);
            y = Some(vapour);
            compositions.push(TrayComposition {
                tray_number,
                ethanol_concentration: x * 100.0,
            });
        }

        let distillate_concentration = match y {
            Some(y) => (y * (1.0 + reflux * 0.1) * 100.0).min(AZEOTROPE_LIMIT),
            None => 0.0,
        };
        let bottoms_concentration = compositions
            .first()
            .map_or(0.0, |c| c.ethanol_concentration / (1.0 + reflux * 0.05));

        log::trace!(
            "Column R={} N={}: distillate {:.2}%, bottoms {:.2}%",
            reflux,
            tray_count,
            distillate_concentration,
            bottoms_concentration
        );

        DistillationResult {
            distillate_concentration,
            bottoms_concentration,
            compositions,
        }
    }
}

impl ExperimentModel for DistillationColumn {
    type Parameters = DistillationParameters;
    type Output = DistillationResult;

    fn run(&self, parameters: &DistillationParameters, _noise: &mut Noise) -> DistillationResult {
        self.simulate(parameters.reflux_ratio, parameters.tray_count)
    }

    fn name(&self) -> &str {
        "Fractional distillation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ten_trays() {
        let result = DistillationColumn::default().simulate(2.5, 10);

        assert_eq!(result.compositions.len(), 10);
        assert_eq!(result.compositions[0].tray_number, 1);
        assert_eq!(result.compositions[9].tray_number, 10);
        assert!(result.distillate_concentration <= AZEOTROPE_LIMIT);
    }

    #[test]
    fn test_first_tray_by_hand() {
        // y = 0.25 / 1.15, x' = y / 2.25
        let result = DistillationColumn::default().simulate(2.5, 1);
        let y = 0.25 / 1.15;
        let x = y / 2.25;

        assert_relative_eq!(result.compositions[0].ethanol_concentration, x * 100.0, epsilon = 1e-10);
        assert_relative_eq!(result.distillate_concentration, y * 1.25 * 100.0, epsilon = 1e-10);
        assert_relative_eq!(result.bottoms_concentration, x * 100.0 / 1.125, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_trays() {
        let result = DistillationColumn::default().simulate(2.5, 0);
        assert!(result.compositions.is_empty());
        assert_eq!(result.distillate_concentration, 0.0);
        assert_eq!(result.bottoms_concentration, 0.0);
    }

    #[test]
    fn test_low_reflux_enriches_upward() {
        let result = DistillationColumn::default().simulate(1.0, 10);
        for w in result.compositions.windows(2) {
            assert!(w[1].ethanol_concentration >= w[0].ethanol_concentration);
        }
    }

    #[test]
    fn test_azeotrope_cap() {
        let column = DistillationColumn {
            bottoms_fraction: 0.9,
            ..DistillationColumn::default()
        };
        let result = column.simulate(10.0, 3);
        assert!(result.distillate_concentration <= AZEOTROPE_LIMIT);
    }

    #[test]
    fn test_normalized_parameters() {
        let p = DistillationParameters::new(0.2, 50).normalized();
        assert_eq!(p.reflux_ratio, 1.0);
        assert_eq!(p.tray_count, 30);

        let p = DistillationParameters::new(2.54, 1).normalized();
        assert_eq!(p.reflux_ratio, 2.5);
        assert_eq!(p.tray_count, 3);
    }

    #[test]
    fn test_negative_reflux_treated_as_zero() {
        let column = DistillationColumn::default();
        assert_eq!(column.simulate(-4.0, 5), column.simulate(0.0, 5));
        assert_eq!(column.simulate(f64::NAN, 5), column.simulate(0.0, 5));
    }
}
