//! Helper functions for integration tests

use labsim::models::{NmrPeak, NmrSample, Multiplicity};
use approx::abs_diff_eq;
use labsim::physics::Trace;

/// Assert that two traces hold the same points (within tolerance)
pub fn assert_traces_close(a: &Trace, b: &Trace, tolerance: f64, message: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", message);

    for (i, ((xa, ya), (xb, yb))) in a.points().zip(b.points()).enumerate() {
        assert!(
            abs_diff_eq!(xa, xb, epsilon = tolerance) && abs_diff_eq!(ya, yb, epsilon = tolerance),
            "{}: point {} differs: ({}, {}) vs ({}, {})",
            message, i, xa, ya, xb, yb
        );
    }
}

/// The three ethanol resonances (CH3 triplet, CH2 quartet, OH singlet)
pub fn ethanol() -> NmrSample {
    NmrSample::new(vec![
        NmrPeak::new(1.22, Multiplicity::Triplet, 3.0),
        NmrPeak::new(3.68, Multiplicity::Quartet, 2.0),
        NmrPeak::new(2.50, Multiplicity::Singlet, 1.0),
    ])
}

/// Every value of a `[min, max]` grid with step `step`
pub fn grid(min: f64, max: f64, step: f64) -> Vec<f64> {
    let n = ((max - min) / step).round() as usize;
    (0..=n).map(|i| min + i as f64 * step).collect()
}
