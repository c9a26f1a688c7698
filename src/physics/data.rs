//! Dataset container
//!
//! Every model result can be flattened into one or more [`Trace`]s: an
//! ordered x/y series whose axes are labelled with a [`PhysicalQuantity`].
//! Traces are what the export layer writes and what a presentation layer
//! plots.

use nalgebra::DVector;
use std::fmt;

use crate::physics::PhysicalQuantity;

/// Named x/y dataset
///
/// # Storage
///
/// Both columns are `DVector<f64>` of identical length. Traces are built
/// fresh from each model result and never mutated in place.
///
/// # Example
///
/// ```rust
/// use labsim::physics::{PhysicalQuantity, Trace};
///
/// let trace = Trace::from_points(
///     "demo",
///     PhysicalQuantity::Wavelength,
///     PhysicalQuantity::Absorbance,
///     vec![(400.0, 0.1), (402.0, 0.3), (404.0, 0.2)],
/// );
///
/// assert_eq!(trace.len(), 3);
/// assert_eq!(trace.argmax(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    name: String,
    x_quantity: PhysicalQuantity,
    y_quantity: PhysicalQuantity,
    x: DVector<f64>,
    y: DVector<f64>,
}

impl Trace {

    // ======================================= constructors =======================================

    /// Create from two columns
    ///
    /// # Panics
    ///
    /// Panics when the columns differ in length.
    pub fn new(
        name: impl Into<String>,
        x_quantity: PhysicalQuantity,
        y_quantity: PhysicalQuantity,
        x: DVector<f64>,
        y: DVector<f64>,
    ) -> Self {
        assert_eq!(
            x.len(),
            y.len(),
            "Trace columns must have the same length ({} vs {})",
            x.len(),
            y.len()
        );

        Self {
            name: name.into(),
            x_quantity,
            y_quantity,
            x,
            y,
        }
    }

    /// Create from (x, y) pairs
    pub fn from_points<I>(
        name: impl Into<String>,
        x_quantity: PhysicalQuantity,
        y_quantity: PhysicalQuantity,
        points: I,
    ) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        Self::new(
            name,
            x_quantity,
            y_quantity,
            DVector::from_vec(x),
            DVector::from_vec(y),
        )
    }

    // ========================================== Queries ==========================================

    /// Dataset name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quantity on the x axis
    pub fn x_quantity(&self) -> PhysicalQuantity {
        self.x_quantity
    }

    /// Quantity on the y axis
    pub fn y_quantity(&self) -> PhysicalQuantity {
        self.y_quantity
    }

    /// x column
    pub fn x(&self) -> &DVector<f64> {
        &self.x
    }

    /// y column
    pub fn y(&self) -> &DVector<f64> {
        &self.y
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over (x, y) pairs in order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// True when no column holds NaN or infinity
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.y.iter()).all(|v| v.is_finite())
    }

    /// Index of the largest y value (first occurrence wins)
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &value) in self.y.iter().enumerate() {
            match best {
                Some(b) if value <= self.y[b] => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Index of the smallest y value (first occurrence wins)
    pub fn argmin(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &value) in self.y.iter().enumerate() {
            match best {
                Some(b) if value >= self.y[b] => {}
                _ => best = Some(i),
            }
        }
        best
    }

    // ====================================== Transformations ======================================

    /// Rename the dataset
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Uniformly downsample to at most `n_points`
    ///
    /// The first and last points are always kept. Requests for fewer than
    /// two points, or for more points than available, return a copy.
    pub fn downsample(&self, n_points: usize) -> Self {
        let len = self.len();
        if n_points < 2 || n_points >= len {
            return self.clone();
        }

        let last = len - 1;
        let indices: Vec<usize> = (0..n_points)
            .map(|k| (k * last + (n_points - 1) / 2) / (n_points - 1))
            .collect();

        Self::from_points(
            self.name.clone(),
            self.x_quantity,
            self.y_quantity,
            indices.into_iter().map(|i| (self.x[i], self.y[i])),
        )
    }
}

// ======================== Display ============================

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} points, {} vs {}]",
            self.name,
            self.len(),
            self.y_quantity,
            self.x_quantity
        )
    }
}

// ==================== Tests ====================
