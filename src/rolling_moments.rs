use alloc::{boxed::Box, vec::Vec};
use num_traits::Float;

use crate::{Kbn, WindowCounts, utils::RingBuffer};

/// Initial per-feed capacity; feeds grow on demand past it
const INITIAL_CAPACITY: usize = 16;

/// FIFO of one power of the pushed values together with its running sum
#[derive(Debug, Clone)]
struct PowerFeed<T> {
    /// `x^j` for every element of the window, NaN kept in place
    values: RingBuffer<T>,
    /// Compensated sum of the non-NaN entries of `values`
    sum: Kbn<T>,
}

impl<T: Float + Default> PowerFeed<T> {
    fn new() -> Self {
        Self {
            values: RingBuffer::new(INITIAL_CAPACITY),
            sum: Kbn::default(),
        }
    }

    #[inline]
    fn push(&mut self, value: T) {
        self.values.push_back(value);
        if !value.is_nan() {
            self.sum += value;
        }
    }

    #[inline]
    fn pop(&mut self) {
        if let Some(value) = self.values.pop_front() {
            if !value.is_nan() {
                self.sum -= value;
            }
        }
    }

    fn reset(&mut self) {
        self.values.reset();
        self.sum = Kbn::default();
    }

    fn recompute(&mut self) {
        self.sum = Kbn::default();
        for &v in self.values.iter() {
            if !v.is_nan() {
                self.sum += v;
            }
        }
    }
}

/// Running power sums over a sliding window with NaN bookkeeping.
///
/// Keeps one feed per power `1..=order`; a push enqueues `x, x^2, ..` into the
/// matching feeds and a pop dequeues and subtracts exactly what was enqueued,
/// so every feed stays positionally aligned with the window even across NaNs.
/// The sums use Kahan-Babuska-Neumaier compensated summation; long-running
/// windows can still call [`RollingMoments::recompute`] to shed drift.
#[derive(Debug, Clone)]
pub struct RollingMoments<T> {
    /// NaN / non-NaN counters of the window
    counts: WindowCounts,
    /// Feed `j` holds the `(j + 1)`-th power of the window's values
    feeds: Box<[PowerFeed<T>]>,
}

impl<T: Float + Default> RollingMoments<T> {
    /// Creates empty power sums up to `order`.
    ///
    /// # Arguments
    ///
    /// * `order` - Highest power to maintain, at least 1
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    ///
    /// # Returns
    ///
    /// * `Self` - The rolling moments object
    pub fn new(order: usize, skip_nan: bool) -> Self {
        assert!(order > 0, "order can not be zero");

        Self {
            counts: WindowCounts::new(skip_nan),
            feeds: (0..order).map(|_| PowerFeed::new()).collect::<Vec<_>>().into_boxed_slice(),
        }
    }

    /// Highest maintained power
    #[inline]
    pub fn order(&self) -> usize {
        self.feeds.len()
    }

    /// NaN bookkeeping of the window
    #[inline]
    pub const fn counts(&self) -> &WindowCounts {
        &self.counts
    }

    /// Number of non-NaN values, in the element type
    #[inline]
    pub fn count(&self) -> T {
        crate::helper::count_as(self.counts.notnan())
    }

    /// Sum of the non-NaN values raised to `power`
    ///
    /// # Arguments
    ///
    /// * `power` - One based power, at most [`order`](Self::order)
    #[inline]
    pub fn sum(&self, power: usize) -> T {
        self.feeds[power - 1].sum.total()
    }

    /// Resets the rolling moments
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The rolling moments object
    pub fn reset(&mut self) -> &mut Self {
        self.counts.reset();
        self.feeds.iter_mut().for_each(PowerFeed::reset);
        self
    }

    /// Appends a value to every feed
    ///
    /// # Arguments
    ///
    /// * `value` - The value entering the window
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The rolling moments object
    #[inline]
    pub fn push(&mut self, value: T) -> &mut Self {
        let mut power = value;
        for (j, feed) in self.feeds.iter_mut().enumerate() {
            if j > 0 {
                power = power * value;
            }
            feed.push(power);
        }
        self.counts.record_push(value.is_nan());
        self
    }

    /// Removes the oldest value from every feed
    ///
    /// # Panics
    ///
    /// Panics if the window is empty.
    ///
    /// # Returns
    ///
    /// * `T` - The value that left the window
    #[inline]
    pub fn pop(&mut self) -> T {
        let Some(value) = self.front() else {
            panic!("pop on an empty window");
        };
        self.feeds.iter_mut().for_each(PowerFeed::pop);
        self.counts.record_pop(value.is_nan());
        value
    }

    /// Returns the oldest value of the window
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.feeds[0].values.front()
    }

    /// Rebuilds every power sum from the retained values, could be called to
    /// avoid prolonged compounding of floating rounding errors
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The rolling moments object
    pub fn recompute(&mut self) -> &mut Self {
        self.feeds.iter_mut().for_each(PowerFeed::recompute);
        self
    }
}
