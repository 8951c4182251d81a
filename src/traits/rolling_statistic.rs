use num_traits::Float;

use crate::WindowCounts;

/// Contract shared by every sliding-window aggregator
///
/// An aggregator owns a FIFO window: values enter through [`push`](Self::push)
/// and leave, oldest first, through [`pop`](Self::pop). NaN marks a missing
/// value; it occupies a slot in the window but never enters the statistic.
///
/// [`compute`](Self::compute) is a pure read guarded by one gate common to all
/// statistics: it yields NaN when the window has no non-NaN element, or when
/// missing values are propagated and at least one is present. Only past the
/// gate is the statistic-specific [`evaluate`](Self::evaluate) consulted.
///
/// The trait is object safe, so a binding layer can hold any statistic as
/// `&mut dyn RollingStatistic<f64>`.
pub trait RollingStatistic<T: Float> {
    /// Stable identifier of the statistic
    fn name(&self) -> &'static str;

    /// The NaN bookkeeping of the current window
    fn counts(&self) -> &WindowCounts;

    /// Empties the window
    fn clear(&mut self);

    /// Appends a value as the newest element of the window
    fn push(&mut self, value: T);

    /// Removes the oldest element of the window
    ///
    /// # Panics
    ///
    /// Panics if the window is empty.
    fn pop(&mut self);

    /// Returns the oldest element, the one the next [`pop`](Self::pop) removes
    fn front(&self) -> Option<T>;

    /// Evaluates the statistic on a window that passed the NaN gate
    ///
    /// Callers should use [`compute`](Self::compute); this is only meaningful
    /// when `counts().is_ready()` holds.
    fn evaluate(&self) -> T;

    /// Returns the statistic over the current window, NaN when there is no
    /// usable data
    ///
    /// # Returns
    ///
    /// * `T` - The statistic, or NaN
    #[inline]
    fn compute(&self) -> T {
        if self.counts().is_ready() {
            self.evaluate()
        } else {
            T::nan()
        }
    }

    /// Whether missing values are skipped rather than propagated
    #[inline]
    fn skip_nan(&self) -> bool {
        self.counts().skip_nan()
    }

    /// Window length, NaNs included
    #[inline]
    fn size(&self) -> usize {
        self.counts().len()
    }

    /// Number of NaN elements in the window
    #[inline]
    fn size_nan(&self) -> usize {
        self.counts().nan()
    }

    /// Number of non-NaN elements in the window
    #[inline]
    fn size_notnan(&self) -> usize {
        self.counts().notnan()
    }

    /// Returns `true` when the window is empty
    #[inline]
    fn is_empty(&self) -> bool {
        self.counts().is_empty()
    }
}
