use num_traits::Float;
use ordered_float::FloatCore;

use crate::{
    Result, RollingError, RollingStatistic, WindowCounts, helper,
    utils::{RbTree, RingBuffer},
};

/// Initial capacity of the value FIFO and the order-statistics tree
const INITIAL_CAPACITY: usize = 16;

/// Rolling order statistic (k-th smallest value) of the window
///
/// With `normalize` off, `order` is the zero based index `k` into the sorted
/// non-NaN values (fractional orders are floored). With `normalize` on, `k` is
/// `floor(order * n)` for `n` non-NaN values, which makes an order in `[0, 1]`
/// an empirical quantile. `k` is clamped to the last element, so any order at
/// or past the end selects the maximum.
///
/// # Examples
///
/// ```
/// # use rolling_axis::{Quantile, RollingStatistic};
/// let mut median = Quantile::new(0.5, true, true)?;
/// for v in [7.0, 1.0, f64::NAN, 3.0, 9.0] {
///     median.push(v);
/// }
/// // floor(0.5 * 4) = 2 -> sorted [1, 3, 7, 9]
/// assert_eq!(median.compute(), 7.0);
///
/// median.set_order(0.0)?;
/// assert_eq!(median.compute(), 1.0);
/// assert!(median.set_order(-1.0).is_err());
/// # Ok::<(), rolling_axis::RollingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Quantile<T> {
    /// Every value of the window, oldest first
    values: RingBuffer<T>,
    /// Non-NaN values of the window
    tree: RbTree<T>,
    /// Requested order, finite and non-negative
    order: T,
    /// Scale `order` by the number of non-NaN elements
    normalize: bool,
    counts: WindowCounts,
}

impl<T: Float + FloatCore + Default> Quantile<T> {
    /// Creates an empty rolling order statistic
    ///
    /// # Arguments
    ///
    /// * `order` - Index into the sorted window, or fraction of it when normalized
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    /// * `normalize` - Interpret `order` as a fraction of the non-NaN elements
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The statistic, or [`RollingError::InvalidOrder`]
    pub fn new(order: T, skip_nan: bool, normalize: bool) -> Result<Self> {
        let mut quantile = Self {
            values: RingBuffer::new(INITIAL_CAPACITY),
            tree: RbTree::new(INITIAL_CAPACITY),
            order: T::zero(),
            normalize,
            counts: WindowCounts::new(skip_nan),
        };
        quantile.set_order(order)?;
        Ok(quantile)
    }

    /// Returns the requested order
    pub const fn order(&self) -> T {
        self.order
    }

    /// Changes the requested order, the window is kept
    ///
    /// # Arguments
    ///
    /// * `order` - Finite, non-negative order
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self>` - The statistic, or [`RollingError::InvalidOrder`]
    pub fn set_order(&mut self, order: T) -> Result<&mut Self> {
        if !Float::is_finite(order) || order < T::zero() {
            return Err(RollingError::InvalidOrder {
                order: order.to_f64().unwrap_or(f64::NAN),
            });
        }
        self.order = order;
        Ok(self)
    }

    /// Whether the order is scaled by the number of non-NaN elements
    pub const fn normalize(&self) -> bool {
        self.normalize
    }

    /// Zero based index selected for `n` non-NaN elements
    fn target_index(&self, n: usize) -> usize {
        let position = if self.normalize {
            self.order * helper::count_as(n)
        } else {
            self.order
        };
        let last = n.saturating_sub(1);
        Float::floor(position).to_usize().map_or(last, |k| k.min(last))
    }
}

impl<T: Float + FloatCore + Default> Default for Quantile<T> {
    fn default() -> Self {
        Self {
            values: RingBuffer::new(INITIAL_CAPACITY),
            tree: RbTree::new(INITIAL_CAPACITY),
            order: T::zero(),
            normalize: false,
            counts: WindowCounts::new(true),
        }
    }
}

impl<T: Float + FloatCore + Default> RollingStatistic<T> for Quantile<T> {
    fn name(&self) -> &'static str {
        "RollingOrderStatistics"
    }

    fn counts(&self) -> &WindowCounts {
        &self.counts
    }

    fn clear(&mut self) {
        self.values.reset();
        self.tree.reset();
        self.counts.reset();
    }

    fn push(&mut self, value: T) {
        self.values.push_back(value);
        let is_nan = Float::is_nan(value);
        if !is_nan {
            self.tree.insert(value);
        }
        self.counts.record_push(is_nan);
    }

    fn pop(&mut self) {
        let Some(value) = self.values.pop_front() else {
            panic!("pop on an empty window");
        };
        let is_nan = Float::is_nan(value);
        if !is_nan {
            self.tree.remove(value);
        }
        self.counts.record_pop(is_nan);
    }

    fn front(&self) -> Option<T> {
        self.values.front()
    }

    fn evaluate(&self) -> T {
        let n = self.tree.total_count();
        let k = self.target_index(n);
        let selected = if k == 0 {
            self.tree.min()
        } else if k + 1 == n {
            self.tree.max()
        } else {
            self.tree.select(k)
        };
        selected.unwrap_or_else(<T as Float>::nan)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_order_zero_is_minimum_and_last_is_maximum() {
        let mut quantile = Quantile::new(0.0, true, false).unwrap();
        for v in [4.0, f64::NAN, -2.0, 8.0, 3.0] {
            quantile.push(v);
        }
        assert_eq!(quantile.compute(), -2.0);

        let last = (quantile.size_notnan() - 1) as f64;
        quantile.set_order(last).unwrap();
        assert_eq!(quantile.compute(), 8.0);

        // past the end clamps to the maximum
        quantile.set_order(100.0).unwrap();
        assert_eq!(quantile.compute(), 8.0);
    }

    #[test]
    fn test_fractional_orders_are_floored() {
        let mut quantile = Quantile::new(1.9, true, false).unwrap();
        for v in [10.0, 30.0, 20.0] {
            quantile.push(v);
        }
        assert_eq!(quantile.compute(), 20.0);
    }

    #[test]
    fn test_normalized_order_is_empirical_quantile() {
        let mut quantile = Quantile::new(0.25, true, true).unwrap();
        for v in [8.0, 6.0, 7.0, 5.0, 1.0, 4.0, 3.0, 2.0] {
            quantile.push(v);
        }
        // floor(0.25 * 8) = 2
        assert_eq!(quantile.compute(), 3.0);

        quantile.set_order(1.0).unwrap();
        assert_eq!(quantile.compute(), 8.0);
    }

    #[test]
    fn test_duplicates_are_removed_one_at_a_time() {
        let mut quantile = Quantile::new(1.0, true, false).unwrap();
        for v in [5.0, 5.0, 9.0] {
            quantile.push(v);
        }
        assert_eq!(quantile.compute(), 5.0);

        quantile.pop();
        assert_eq!(quantile.compute(), 9.0);
        quantile.set_order(0.0).unwrap();
        assert_eq!(quantile.compute(), 5.0);
    }

    #[test]
    fn test_invalid_orders_are_rejected() {
        assert_eq!(
            Quantile::<f64>::new(-0.5, true, false).unwrap_err(),
            RollingError::InvalidOrder { order: -0.5 }
        );
        assert!(Quantile::<f64>::new(f64::INFINITY, true, false).is_err());
        assert!(Quantile::<f32>::new(f32::NAN, true, true).is_err());

        let mut quantile = Quantile::<f64>::default();
        assert!(quantile.set_order(f64::NAN).is_err());
        assert_eq!(quantile.order(), 0.0);
        assert!(!quantile.normalize());
        assert_eq!(quantile.name(), "RollingOrderStatistics");
    }

    #[test]
    fn test_matches_sorted_window_on_random_sequences() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut quantile = Quantile::new(0.0, true, false).unwrap();
        let mut window: Vec<f64> = Vec::new();

        for _ in 0..2_000 {
            let v = if rng.gen_bool(0.1) {
                f64::NAN
            } else {
                rng.gen_range(0..8) as f64
            };
            quantile.push(v);
            window.push(v);
            if window.len() > 7 {
                quantile.pop();
                window.remove(0);
            }

            let mut sorted: Vec<f64> = window.iter().copied().filter(|x| !x.is_nan()).collect();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let order = rng.gen_range(0..10);
            quantile.set_order(order as f64).unwrap();

            let result = quantile.compute();
            if sorted.is_empty() {
                assert!(result.is_nan());
            } else {
                assert_eq!(result, sorted[order.min(sorted.len() - 1)]);
            }
        }
    }
}
