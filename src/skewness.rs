use num_traits::Float;

use crate::{RollingMoments, RollingStatistic, WindowCounts, helper};

/// Rolling population (biased) skewness of the non-NaN values in the window
///
/// Third central moment over the variance to the power 1.5, both derived from
/// running sums of `x`, `x^2` and `x^3`. A window whose variance is below
/// `1e-16` has no defined skewness and yields NaN.
///
/// # Examples
///
/// ```
/// # use rolling_axis::{RollingStatistic, Skewness};
/// let mut skew = Skewness::<f64>::default();
/// for v in [1.0, 1.0, 1.0] {
///     skew.push(v);
/// }
/// assert!(skew.compute().is_nan());
///
/// skew.push(5.0);
/// assert!(skew.compute() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Skewness<T>(RollingMoments<T>);

impl<T: Float + Default> Skewness<T> {
    /// Creates an empty rolling skewness
    ///
    /// # Arguments
    ///
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    pub fn new(skip_nan: bool) -> Self {
        Self(RollingMoments::new(3, skip_nan))
    }

    /// Rebuilds the running sums from the window, see [`RollingMoments::recompute`]
    pub fn recompute(&mut self) -> &mut Self {
        self.0.recompute();
        self
    }
}

impl<T: Float + Default> Default for Skewness<T> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<T: Float + Default> RollingStatistic<T> for Skewness<T> {
    fn name(&self) -> &'static str {
        "RollingSkewness"
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
        helper::skewness(self.0.sum(1), self.0.sum(2), self.0.sum(3), self.0.count())
    }
}
