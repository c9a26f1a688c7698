//! Peak profiles shared by the spectral models
//!
//! Both the UV-Vis absorbance curves and the NMR resonance lines are built from
//! a single bell-shaped profile sampled on a regular grid.
//!
//! # Profiles
//!
//! - **Gaussian**: UV-Vis plasmon band, `h · exp(-(x - c)² / (2σ²))`
//! - **Lorentzian**: NMR resonance, `h · w² / ((x - c)² + w²)`
//!
//! # Example
//!
//! ```rust
//! use approx::assert_relative_eq;
//! use labsim::models::LineShape;
//! // Lorentzian line at 1.22 ppm, half-width 0.005 ppm, height 30
//! let line = LineShape::lorentzian(1.22, 0.005, 30.0);
//!
//! assert_relative_eq!(line.evaluate(1.22), 30.0, epsilon = 1e-10);  // Peak
//! assert_relative_eq!(line.evaluate(1.225), 15.0, epsilon = 1e-10); // Half height at ±w
//! assert!(line.evaluate(2.0) < 0.01);                                // Far tail
//! ```

use crate::physics::Noise;

/// Tolerance absorbing float error when counting grid points
const GRID_EPSILON: f64 = 1e-9;

/// Bell-shaped peak profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineShape {
    /// Gaussian band
    ///
    /// # Parameters
    ///
    /// - `center` : Position of the maximum
    /// - `width` : Standard deviation σ
    /// - `height` : Value at the maximum
    Gaussian {
        center: f64,
        width: f64,
        height: f64,
    },

    /// Lorentzian line
    ///
    /// # Parameters
    ///
    /// - `center` : Position of the maximum
    /// - `half_width` : Half width at half maximum w
    /// - `height` : Value at the maximum
    Lorentzian {
        center: f64,
        half_width: f64,
        height: f64,
    },
}

impl LineShape {
    /// Create a Gaussian band
    pub fn gaussian(center: f64, width: f64, height: f64) -> Self {
        Self::Gaussian { center, width, height }
    }

    /// Create a Lorentzian line
    pub fn lorentzian(center: f64, half_width: f64, height: f64) -> Self {
        Self::Lorentzian { center, half_width, height }
    }

    /// Position of the maximum
    pub fn center(&self) -> f64 {
        match self {
            Self::Gaussian { center, .. } | Self::Lorentzian { center, .. } => *center,
        }
    }

    /// Value at the maximum
    pub fn height(&self) -> f64 {
        match self {
            Self::Gaussian { height, .. } | Self::Lorentzian { height, .. } => *height,
        }
    }

    /// Evaluate the profile at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Gaussian { center, width, height } => {
                let distance = x - center;
                height * (-(distance * distance) / (2.0 * width * width)).exp()
            }

            Self::Lorentzian { center, half_width, height } => {
                let distance = x - center;
                let w2 = half_width * half_width;
                height * w2 / (distance * distance + w2)
            }
        }
    }

    /// Sample from `start` to `end` (inclusive) every `step`, adding
    /// `noise.uniform(jitter)` to every value
    pub fn sample(
        &self,
        start: f64,
        end: f64,
        step: f64,
        jitter: f64,
        noise: &mut Noise,
    ) -> Vec<(f64, f64)> {
        grid(start, end, step)
            .map(|x| (x, self.evaluate(x) + noise.uniform(jitter)))
            .collect()
    }
}

/// Regular grid from `start` to `end` inclusive
///
/// Points are computed as `start + i·step` so no accumulated float drift
/// can drop the final point. Empty for non-positive steps or `end < start`.
pub fn grid(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && end >= start && (end - start).is_finite() {
        ((end - start) / step + GRID_EPSILON).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| start + i as f64 * step)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_profile() {
        let band = LineShape::gaussian(525.0, 35.0, 0.6);

        assert_relative_eq!(band.evaluate(525.0), 0.6, epsilon = 1e-12);

        // At ±σ should be exp(-0.5) ≈ 0.606 of peak
        let expected = 0.6 * (-0.5f64).exp();
        assert_relative_eq!(band.evaluate(490.0), expected, epsilon = 1e-12);
        assert_relative_eq!(band.evaluate(560.0), expected, epsilon = 1e-12);
        assert!(band.evaluate(800.0) < 1e-6);
    }

    #[test]
    fn test_lorentzian_profile() {
        let line = LineShape::lorentzian(0.0, 0.02, 20.0);

        assert_eq!(line.evaluate(0.0), 20.0);
        assert_relative_eq!(line.evaluate(0.02), 10.0, epsilon = 1e-12);
        assert_relative_eq!(line.evaluate(-0.02), 10.0, epsilon = 1e-12);
        // ±4w → 1/17 of the height
        assert_relative_eq!(line.evaluate(0.08), 20.0 / 17.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_counts() {
        assert_eq!(grid(400.0, 800.0, 2.0).count(), 201);
        assert_eq!(grid(-0.02, 0.02, 0.005).count(), 9);
        assert_eq!(grid(-0.08, 0.08, 0.005).count(), 33);
        assert_eq!(grid(1.0, 0.0, 0.1).count(), 0);
        assert_eq!(grid(0.0, 1.0, 0.0).count(), 0);
    }

    #[test]
    fn test_grid_endpoints() {
        let points: Vec<f64> = grid(400.0, 800.0, 2.0).collect();
        assert_eq!(points[0], 400.0);
        assert_eq!(points[200], 800.0);
    }

    #[test]
    fn test_sample_without_noise() {
        let line = LineShape::lorentzian(1.0, 0.005, 10.0);
        let samples = line.sample(0.98, 1.02, 0.005, 0.5, &mut Noise::disabled());

        assert_eq!(samples.len(), 9);
        assert_relative_eq!(samples[4].0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(samples[4].1, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sample_jitter_bounds() {
        let band = LineShape::gaussian(500.0, 30.0, 1.0);
        let clean = band.sample(400.0, 600.0, 2.0, 0.0, &mut Noise::disabled());
        let noisy = band.sample(400.0, 600.0, 2.0, 0.02, &mut Noise::seeded(3));

        for ((_, a), (_, b)) in clean.iter().zip(noisy.iter()) {
            let delta = b - a;
            assert!((0.0..0.02).contains(&delta));
        }
    }
}
