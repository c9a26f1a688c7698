//! Parameter domains
//!
//! A [`ParameterRange`] describes one user-adjustable field: its bounds and
//! its step granularity. Quantisation is the only way values reach a model,
//! so out-of-domain input is resolved silently instead of being rejected.

use serde::{Deserialize, Serialize};

/// Decimal places kept after quantisation (removes `0.30000000000000004`)
const QUANTIZE_SCALE: f64 = 1e9;

/// Closed interval with a step grid anchored at `min`
///
/// # Example
///
/// ```rust
/// use labsim::physics::ParameterRange;
///
/// let temperature = ParameterRange::new(25.0, 100.0, 5.0);
///
/// assert_eq!(temperature.quantize(62.4), 60.0);
/// assert_eq!(temperature.quantize(140.0), 100.0);
/// assert_eq!(temperature.index_of(30.0), 1);
/// assert_eq!(temperature.grid_len(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
    /// Grid spacing
    pub step: f64,
}

impl ParameterRange {
    /// Create a range
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Number of grid values between `min` and `max`
    pub fn grid_len(&self) -> usize {
        ((self.max - self.min) / self.step).round() as usize + 1
    }

    /// Grid index of the value nearest to `value`
    ///
    /// Non-finite input maps to index 0.
    pub fn index_of(&self, value: f64) -> usize {
        if !value.is_finite() {
            return 0;
        }
        let clamped = value.clamp(self.min, self.max);
        let index = ((clamped - self.min) / self.step).round() as usize;
        index.min(self.grid_len() - 1)
    }

    /// Grid value at `index` (saturates at `max`)
    pub fn value_at(&self, index: usize) -> f64 {
        let index = index.min(self.grid_len() - 1);
        let raw = self.min + index as f64 * self.step;
        (raw * QUANTIZE_SCALE).round() / QUANTIZE_SCALE
    }

    /// Clamp then round to the nearest grid value
    pub fn quantize(&self, value: f64) -> f64 {
        self.value_at(self.index_of(value))
    }

    /// Position of `value` inside the range, 0 at `min` and 1 at `max`
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Check membership (bounds inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Every grid value in increasing order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.grid_len()).map(move |i| self.value_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CONCENTRATION: ParameterRange = ParameterRange::new(0.1, 1.0, 0.1);

    #[test]
    fn test_grid_len() {
        assert_eq!(CONCENTRATION.grid_len(), 10);
        assert_eq!(ParameterRange::new(3.0, 30.0, 1.0).grid_len(), 28);
        assert_eq!(ParameterRange::new(0.01, 0.5, 0.01).grid_len(), 50);
    }

    #[test]
    fn test_quantize_is_exact_decimal() {
        assert_eq!(CONCENTRATION.quantize(0.29), 0.3);
        assert_eq!(CONCENTRATION.quantize(0.74), 0.7);
        assert_eq!(CONCENTRATION.quantize(0.5), 0.5);
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(CONCENTRATION.quantize(-3.0), 0.1);
        assert_eq!(CONCENTRATION.quantize(12.0), 1.0);
        assert_eq!(CONCENTRATION.quantize(f64::NAN), 0.1);
        assert_eq!(CONCENTRATION.quantize(f64::INFINITY), 0.1);
    }

    #[test]
    fn test_index_round_trip() {
        for (i, value) in CONCENTRATION.values().enumerate() {
            assert_eq!(CONCENTRATION.index_of(value), i);
        }
    }

    #[test]
    fn test_normalize() {
        let temperature = ParameterRange::new(25.0, 100.0, 5.0);
        assert_eq!(temperature.normalize(25.0), 0.0);
        assert_eq!(temperature.normalize(100.0), 1.0);
        assert_relative_eq!(temperature.normalize(62.5), 0.5, epsilon = 1e-12);
        assert!(temperature.contains(25.0));
        assert!(!temperature.contains(101.0));
    }
}
