use num_traits::Float;

use crate::{RollingMoments, RollingStatistic, WindowCounts, helper};

/// Rolling z-score of the most recently pushed value
///
/// Standardizes the latest value against the mean and population standard
/// deviation of the non-NaN window. The latest value sits in its own single
/// slot: every push replaces it and pops never touch it, so the score keeps
/// referring to the newest observation even as old ones leave the window.
///
/// Yields NaN when the window variance is below `1e-16`, or when the latest
/// value itself is NaN.
///
/// # Examples
///
/// ```
/// # use rolling_axis::{RollingStatistic, ZScore};
/// # use assert_approx_eq::assert_approx_eq;
/// let mut zscore = ZScore::default();
/// for v in [1.0, 2.0, 3.0] {
///     zscore.push(v);
/// }
/// // mean 2, population std sqrt(2/3)
/// assert_approx_eq!(zscore.compute(), 1.0 / (2.0f64 / 3.0).sqrt());
///
/// zscore.pop();
/// zscore.pop();
/// // only 3 is left, the window is degenerate
/// assert!(zscore.compute().is_nan());
/// ```
#[derive(Debug, Clone)]
pub struct ZScore<T> {
    /// Sums of `x` and `x^2` over the window
    moments: RollingMoments<T>,
    /// Most recently pushed value
    latest: Option<T>,
}

impl<T: Float + Default> ZScore<T> {
    /// Creates an empty rolling z-score
    ///
    /// # Arguments
    ///
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    pub fn new(skip_nan: bool) -> Self {
        Self {
            moments: RollingMoments::new(2, skip_nan),
            latest: None,
        }
    }

    /// Returns the value the score is computed for
    pub const fn latest(&self) -> Option<T> {
        self.latest
    }

    /// Rebuilds the running sums from the window, see [`RollingMoments::recompute`]
    pub fn recompute(&mut self) -> &mut Self {
        self.moments.recompute();
        self
    }
}

impl<T: Float + Default> Default for ZScore<T> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<T: Float + Default> RollingStatistic<T> for ZScore<T> {
    fn name(&self) -> &'static str {
        "RollingZScore"
    }

    fn counts(&self) -> &WindowCounts {
        self.moments.counts()
    }

    fn clear(&mut self) {
        self.moments.reset();
        self.latest = None;
    }

    fn push(&mut self, value: T) {
        self.latest = Some(value);
        self.moments.push(value);
    }

    fn pop(&mut self) {
        self.moments.pop();
    }

    fn front(&self) -> Option<T> {
        self.moments.front()
    }

    fn evaluate(&self) -> T {
        match self.latest {
            Some(value) if !value.is_nan() => helper::zscore(
                value,
                self.moments.sum(1),
                self.moments.sum(2),
                self.moments.count(),
            ),
            _ => T::nan(),
        }
    }
}
