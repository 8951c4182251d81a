use num_traits::Float;

use crate::{RollingMoments, RollingStatistic, WindowCounts, helper};

/// Rolling population (biased) variance of the non-NaN values in the window
///
/// Computed as `sum(x^2) / n - mean^2` from running power sums.
#[derive(Debug, Clone)]
pub struct Variance<T>(RollingMoments<T>);

impl<T: Float + Default> Variance<T> {
    /// Creates an empty rolling variance
    ///
    /// # Arguments
    ///
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    pub fn new(skip_nan: bool) -> Self {
        Self(RollingMoments::new(2, skip_nan))
    }

    /// Rebuilds the running sums from the window, see [`RollingMoments::recompute`]
    pub fn recompute(&mut self) -> &mut Self {
        self.0.recompute();
        self
    }
}

impl<T: Float + Default> Default for Variance<T> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<T: Float + Default> RollingStatistic<T> for Variance<T> {
    fn name(&self) -> &'static str {
        "RollingVariance"
    }

    fn counts(&self) -> &WindowCounts {
        self.0.counts()
    }

    fn clear(&mut self) {
        self.0.reset();
    }

    fn push(&mut self, value: T) {
        self.0.push(value);
    }

    fn pop(&mut self) {
        self.0.pop();
    }

    fn front(&self) -> Option<T> {
        self.0.front()
    }

    fn evaluate(&self) -> T {
        helper::variance(self.0.sum(1), self.0.sum(2), self.0.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_variance_works() {
        let mut variance = Variance::default();
        let inputs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        for v in inputs {
            variance.push(v);
        }
        assert_approx_eq!(variance.compute(), 4.0);

        // window of 3 sliding over the tail: [5, 7, 9]
        for _ in 0..5 {
            variance.pop();
        }
        assert_approx_eq!(variance.compute(), 8.0 / 3.0);
    }

    #[test]
    fn test_single_value_has_zero_variance() {
        let mut variance = Variance::new(true);
        variance.push(3.5);
        variance.push(f64::NAN);
        assert_approx_eq!(variance.compute(), 0.0);
    }

    #[test]
    fn test_propagate_mode_poisons_window() {
        let mut variance = Variance::new(false);
        variance.push(f64::NAN);
        variance.push(1.0);
        variance.push(3.0);
        assert!(variance.compute().is_nan());

        variance.pop();
        assert_approx_eq!(variance.compute(), 1.0);
        assert_eq!(variance.front(), Some(1.0));
    }
}
