//! Thresholds for the coefficient-of-variation objective.

use crate::types::ConnectivityError;

/// Default probability threshold below which a transition is immaterial.
pub const DEFAULT_DELTA: f64 = 0.005;

/// Default confidence required that a transition exceeds `delta`.
pub const DEFAULT_PI: f64 = 0.05;

/// Parameters of the CV objective.
///
/// A cell `(i, j)` enters the objective only if its posterior mean is at
/// least `delta` and the posterior probability `P(p_ij > delta)` is at
/// least `pi`.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `delta` | 0.005 | Materiality threshold on the transition probability |
/// | `pi` | 0.05 | Required confidence that the threshold is exceeded |
///
/// # Examples
///
/// ```rust
/// use connectivity_core::objective::ObjectiveParams;
///
/// let params = ObjectiveParams::default();
/// assert_eq!(params.delta(), 0.005);
/// assert_eq!(params.pi(), 0.05);
///
/// assert!(ObjectiveParams::new(0.01, 0.1).is_ok());
/// assert!(ObjectiveParams::new(-0.1, 0.1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveParams {
    delta: f64,
    pi: f64,
}

impl Default for ObjectiveParams {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            pi: DEFAULT_PI,
        }
    }
}

impl ObjectiveParams {
    /// Creates validated objective parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectivityError::InvalidParameter`] if either value is
    /// NaN or lies outside `[0, 1]`.
    pub fn new(delta: f64, pi: f64) -> Result<Self, ConnectivityError> {
        check_unit_interval("delta", delta)?;
        check_unit_interval("pi", pi)?;
        Ok(Self { delta, pi })
    }

    /// Materiality threshold on transition probabilities.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Confidence threshold for `P(p > delta)`.
    #[inline]
    pub fn pi(&self) -> f64 {
        self.pi
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), ConnectivityError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConnectivityError::InvalidParameter {
            name,
            value: format!("{} is outside [0, 1]", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ObjectiveParams::default();
        assert_eq!(params.delta(), DEFAULT_DELTA);
        assert_eq!(params.pi(), DEFAULT_PI);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(ObjectiveParams::new(0.0, 0.0).is_ok());
        assert!(ObjectiveParams::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let result = ObjectiveParams::new(1.5, 0.05);
        assert!(matches!(
            result,
            Err(ConnectivityError::InvalidParameter { name: "delta", .. })
        ));

        let result = ObjectiveParams::new(0.005, -0.01);
        assert!(matches!(
            result,
            Err(ConnectivityError::InvalidParameter { name: "pi", .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        assert!(ObjectiveParams::new(f64::NAN, 0.05).is_err());
        assert!(ObjectiveParams::new(0.005, f64::NAN).is_err());
    }
}
