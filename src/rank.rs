use num_traits::Float;
use ordered_float::FloatCore;

use crate::{
    RollingStatistic, WindowCounts, helper,
    utils::{RbTree, RingBuffer},
};

/// Initial capacity of the value FIFO and the order-statistics tree
const INITIAL_CAPACITY: usize = 16;

/// Rolling rank of the most recently pushed value
///
/// The rank is the number of non-NaN window elements strictly smaller than
/// the latest pushed value, optionally normalized by the number of non-NaN
/// elements. Ties therefore share the lowest rank. Values are kept in an
/// order-statistics tree so each push, pop and rank query is O(log window).
///
/// The latest value is tracked apart from the window: popping never changes
/// which value is ranked. A NaN latest value has no rank and yields NaN.
///
/// # Examples
///
/// ```
/// # use rolling_axis::{Rank, RollingStatistic};
/// let mut rank = Rank::new(true, false);
/// for v in [3.0, 1.0, 4.0, 1.0, 5.0, 2.0] {
///     rank.push(v);
/// }
/// // 1.0 and 1.0 are below 2.0
/// assert_eq!(rank.compute(), 2.0);
///
/// let mut rank = Rank::new(true, true);
/// for v in [3.0, 1.0, 4.0, 1.0, 5.0, 2.0] {
///     rank.push(v);
/// }
/// assert_eq!(rank.compute(), 2.0 / 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct Rank<T> {
    /// Every value of the window, oldest first
    values: RingBuffer<T>,
    /// Non-NaN values of the window
    tree: RbTree<T>,
    /// Most recently pushed value
    latest: Option<T>,
    /// Divide the rank by the number of non-NaN elements
    normalize: bool,
    counts: WindowCounts,
}

impl<T: Float + FloatCore + Default> Rank<T> {
    /// Creates an empty rolling rank
    ///
    /// # Arguments
    ///
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    /// * `normalize` - Report the rank as a fraction of the non-NaN elements
    pub fn new(skip_nan: bool, normalize: bool) -> Self {
        Self {
            values: RingBuffer::new(INITIAL_CAPACITY),
            tree: RbTree::new(INITIAL_CAPACITY),
            latest: None,
            normalize,
            counts: WindowCounts::new(skip_nan),
        }
    }

    /// Whether ranks are normalized
    pub const fn normalize(&self) -> bool {
        self.normalize
    }

    /// Returns the value being ranked
    pub const fn latest(&self) -> Option<T> {
        self.latest
    }
}

impl<T: Float + FloatCore + Default> Default for Rank<T> {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl<T: Float + FloatCore + Default> RollingStatistic<T> for Rank<T> {
    fn name(&self) -> &'static str {
        "RollingRank"
    }

    fn counts(&self) -> &WindowCounts {
        &self.counts
    }

    fn clear(&mut self) {
        self.values.reset();
        self.tree.reset();
        self.latest = None;
        self.counts.reset();
    }

    fn push(&mut self, value: T) {
        self.values.push_back(value);
        self.latest = Some(value);
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
        match self.latest {
            Some(value) if !Float::is_nan(value) => {
                let rank = helper::count_as::<T>(self.tree.rank(value));
                if self.normalize {
                    rank / helper::count_as(self.counts.notnan())
                } else {
                    rank
                }
            }
            _ => <T as Float>::nan(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_rank_counts_strictly_smaller() {
        let mut rank = Rank::default();
        for v in [2.0, 2.0, 1.0, 2.0] {
            rank.push(v);
        }
        assert_eq!(rank.compute(), 1.0);

        rank.push(f64::NAN);
        assert!(rank.compute().is_nan());
        assert_eq!(rank.size_nan(), 1);
    }

    #[test]
    fn test_latest_is_kept_across_pops() {
        let mut rank = Rank::new(true, false);
        for v in [0.5, 0.1, 0.9, 0.3] {
            rank.push(v);
        }
        assert_eq!(rank.compute(), 1.0);

        rank.pop();
        rank.pop();
        // window [0.9, 0.3], still ranking 0.3
        assert_eq!(rank.latest(), Some(0.3));
        assert_eq!(rank.compute(), 0.0);
    }

    #[test]
    fn test_matches_brute_force_on_random_sequences() {
        let mut rng = StdRng::seed_from_u64(3);

        for normalize in [false, true] {
            let mut rank = Rank::new(true, normalize);
            let mut window: Vec<f64> = Vec::new();

            for _ in 0..2_000 {
                let v = if rng.gen_bool(0.15) {
                    f64::NAN
                } else {
                    rng.gen_range(-5..5) as f64
                };
                rank.push(v);
                window.push(v);
                if window.len() > 6 {
                    rank.pop();
                    window.remove(0);
                }

                let valid: Vec<f64> = window.iter().copied().filter(|x| !x.is_nan()).collect();
                let result = rank.compute();
                if valid.is_empty() || v.is_nan() {
                    assert!(result.is_nan());
                    continue;
                }
                let below = valid.iter().filter(|&&x| x < v).count() as f64;
                let expected = if normalize { below / valid.len() as f64 } else { below };
                assert_eq!(result, expected);
            }
        }
    }

    #[test]
    fn test_propagate_mode_poisons_window() {
        let mut rank = Rank::<f32>::new(false, false);
        rank.push(f32::NAN);
        rank.push(1.0);
        assert!(rank.compute().is_nan());
        rank.pop();
        assert_eq!(rank.compute(), 0.0);
        assert!(!rank.normalize());
        assert_eq!(rank.name(), "RollingRank");
    }
}
