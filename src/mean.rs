use num_traits::Float;

use crate::{RollingMoments, RollingStatistic, WindowCounts, helper};

/// Rolling arithmetic mean of the non-NaN values in the window
///
/// # Examples
///
/// ```
/// # use rolling_axis::{Mean, RollingStatistic};
/// let mut mean = Mean::default();
/// mean.push(1.0);
/// mean.push(2.0);
/// mean.push(3.0);
/// assert_eq!(mean.compute(), 2.0);
///
/// mean.push(f64::NAN);
/// mean.push(4.0);
/// for _ in 0..3 {
///     mean.pop();
/// }
/// // window is [NaN, 4.0]
/// assert_eq!(mean.compute(), 4.0);
///
/// mean.pop();
/// mean.pop();
/// mean.push(f64::NAN);
/// assert!(mean.compute().is_nan());
/// ```
#[derive(Debug, Clone)]
pub struct Mean<T>(RollingMoments<T>);

impl<T: Float + Default> Mean<T> {
    /// Creates an empty rolling mean
    ///
    /// # Arguments
    ///
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    pub fn new(skip_nan: bool) -> Self {
        Self(RollingMoments::new(1, skip_nan))
    }

    /// Rebuilds the running sum from the window, see [`RollingMoments::recompute`]
    pub fn recompute(&mut self) -> &mut Self {
        self.0.recompute();
        self
    }
}

impl<T: Float + Default> Default for Mean<T> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<T: Float + Default> RollingStatistic<T> for Mean<T> {
    fn name(&self) -> &'static str {
        "RollingMean"
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
        helper::mean(self.0.sum(1), self.0.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_mean_skips_nans() {
        let mut mean = Mean::new(true);
        for v in [1.0, f64::NAN, 5.0] {
            mean.push(v);
        }
        assert_eq!(mean.size(), 3);
        assert_eq!(mean.size_nan(), 1);
        assert_approx_eq!(mean.compute(), 3.0);
    }

    #[test]
    fn test_mean_propagates_nans() {
        let mut mean = Mean::new(false);
        mean.push(1.0);
        mean.push(f64::NAN);
        mean.push(5.0);
        assert!(mean.compute().is_nan());

        mean.pop();
        mean.pop();
        assert_eq!(mean.compute(), 5.0);
    }

    #[test]
    fn test_clear_empties_window() {
        let mut mean = Mean::<f32>::default();
        mean.push(2.0);
        mean.push(f32::NAN);
        mean.clear();

        assert_eq!(mean.size(), 0);
        assert_eq!(mean.size_nan(), 0);
        assert_eq!(mean.size_notnan(), 0);
        assert_eq!(mean.front(), None);
        assert!(mean.compute().is_nan());
    }

    #[test]
    fn test_large_offsets_stay_accurate() {
        let mut mean = Mean::new(true);
        let inputs = [1_000_000.1, 1_000_000.2, 1_000_000.3, 1_000_000.4, 1_000_000.5];
        let mut results = vec![];
        for &v in &inputs {
            mean.push(v);
            if mean.size() > 3 {
                mean.pop();
            }
            results.push(mean.compute());
        }
        let expected = [1_000_000.1, 1_000_000.15, 1_000_000.2, 1_000_000.3, 1_000_000.4];
        for (e, r) in expected.iter().zip(&results) {
            assert_approx_eq!(e, r, 1e-6);
        }
        assert_eq!(mean.name(), "RollingMean");
    }
}
