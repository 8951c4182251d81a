use num_traits::Float;

use crate::{
    RollingStatistic, WindowCounts,
    utils::{Max, MonotonicQueue, RingBuffer},
};

/// Initial capacity of the value FIFO and candidate queue
const INITIAL_CAPACITY: usize = 16;

/// # Maximum Value Calculation for Rolling Windows
///
/// Tracks the largest non-NaN value of the window with a monotonic candidate
/// queue: each value enters the queue once and is evicted at most once, so
/// push and pop are amortized O(1) and the maximum is read off the front.
/// NaNs are counted but never become candidates.
///
/// # Examples
///
/// ```
/// # use rolling_axis::{Maximum, RollingStatistic};
/// let mut max = Maximum::default();
/// for v in [3.0, f64::NAN, 1.0, 2.0] {
///     max.push(v);
/// }
/// assert_eq!(max.compute(), 3.0);
///
/// max.pop();
/// assert_eq!(max.compute(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Maximum<T> {
    /// Every value of the window, oldest first
    values: RingBuffer<T>,
    /// Non-increasing candidates, front is the maximum
    candidates: MonotonicQueue<T, Max>,
    counts: WindowCounts,
}

impl<T: Float + Default> Maximum<T> {
    /// Creates an empty rolling maximum
    ///
    /// # Arguments
    ///
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    pub fn new(skip_nan: bool) -> Self {
        Self {
            values: RingBuffer::new(INITIAL_CAPACITY),
            candidates: MonotonicQueue::new(INITIAL_CAPACITY),
            counts: WindowCounts::new(skip_nan),
        }
    }
}

impl<T: Float + Default> Default for Maximum<T> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<T: Float + Default> RollingStatistic<T> for Maximum<T> {
    fn name(&self) -> &'static str {
        "RollingMax"
    }

    fn counts(&self) -> &WindowCounts {
        &self.counts
    }

    fn clear(&mut self) {
        self.values.reset();
        self.candidates.reset();
        self.counts.reset();
    }

    fn push(&mut self, value: T) {
        self.values.push_back(value);
        let is_nan = value.is_nan();
        if !is_nan {
            self.candidates.push(value);
            debug_assert!(!self.candidates.is_empty());
        }
        self.counts.record_push(is_nan);
    }

    fn pop(&mut self) {
        let Some(value) = self.values.pop_front() else {
            panic!("pop on an empty window");
        };
        let is_nan = value.is_nan();
        if !is_nan {
            self.candidates.pop(value);
        }
        self.counts.record_pop(is_nan);
        debug_assert!(self.candidates.len() <= self.counts.notnan());
    }

    fn front(&self) -> Option<T> {
        self.values.front()
    }

    fn evaluate(&self) -> T {
        self.candidates.front().unwrap_or_else(T::nan)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_matches_brute_force_on_random_sequences() {
        let mut rng = StdRng::seed_from_u64(42);

        for skip_nan in [true, false] {
            let mut max = Maximum::new(skip_nan);
            let mut window: Vec<f64> = Vec::new();

            for _ in 0..3_000 {
                if window.is_empty() || rng.gen_bool(0.55) {
                    let v = if rng.gen_bool(0.1) {
                        f64::NAN
                    } else {
                        rng.gen_range(0..20) as f64
                    };
                    max.push(v);
                    window.push(v);
                } else {
                    max.pop();
                    window.remove(0);
                }

                let valid: Vec<f64> = window.iter().copied().filter(|v| !v.is_nan()).collect();
                let has_nan = valid.len() < window.len();
                let result = max.compute();
                if valid.is_empty() || (!skip_nan && has_nan) {
                    assert!(result.is_nan());
                } else {
                    let expected = valid.iter().copied().fold(f64::NEG_INFINITY, |a, b| if b > a { b } else { a });
                    assert_eq!(result, expected);
                }
                assert_eq!(max.size(), window.len());
                assert_eq!(max.size(), max.size_nan() + max.size_notnan());
                assert_eq!(
                    max.front().map(f64::to_bits),
                    window.first().map(|v| v.to_bits())
                );
            }
        }
    }

    #[test]
    fn test_duplicates_leave_one_at_a_time() {
        let mut max = Maximum::new(true);
        max.push(4.0);
        max.push(4.0);
        max.push(1.0);

        max.pop();
        assert_eq!(max.compute(), 4.0);
        max.pop();
        assert_eq!(max.compute(), 1.0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut max = Maximum::<f32>::new(true);
        max.push(8.0);
        max.push(f32::NAN);
        max.clear();
        assert_eq!(max.size(), 0);
        assert!(max.compute().is_nan());
        max.push(-1.0);
        assert_eq!(max.compute(), -1.0);
        assert_eq!(max.name(), "RollingMax");
    }

    #[test]
    #[should_panic(expected = "pop on an empty window")]
    fn test_pop_on_empty_window_panics() {
        Maximum::<f64>::default().pop();
    }
}
