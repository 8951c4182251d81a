use num_traits::Float;

use crate::{
    RollingStatistic, WindowCounts,
    utils::{Min, MonotonicQueue, RingBuffer},
};

/// Initial capacity of the value FIFO and candidate queue
const INITIAL_CAPACITY: usize = 16;

/// # Minimum Value Calculation for Rolling Windows
///
/// Tracks the smallest non-NaN value of the window with a monotonic candidate
/// queue: each value enters the queue once and is evicted at most once, so
/// push and pop are amortized O(1) and the minimum is read off the front.
/// NaNs are counted but never become candidates.
///
/// # Examples
///
/// ```
/// # use rolling_axis::{Minimum, RollingStatistic};
/// let mut min = Minimum::default();
/// for v in [1.0, f64::NAN, 3.0, 2.0] {
///     min.push(v);
/// }
/// assert_eq!(min.compute(), 1.0);
///
/// min.pop();
/// assert_eq!(min.compute(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Minimum<T> {
    /// Every value of the window, oldest first
    values: RingBuffer<T>,
    /// Non-decreasing candidates, front is the minimum
    candidates: MonotonicQueue<T, Min>,
    counts: WindowCounts,
}

impl<T: Float + Default> Minimum<T> {
    /// Creates an empty rolling minimum
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

impl<T: Float + Default> Default for Minimum<T> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<T: Float + Default> RollingStatistic<T> for Minimum<T> {
    fn name(&self) -> &'static str {
        "RollingMin"
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
        let mut rng = StdRng::seed_from_u64(17);

        for skip_nan in [true, false] {
            let mut min = Minimum::new(skip_nan);
            let mut window: Vec<f64> = Vec::new();

            for _ in 0..3_000 {
                if window.is_empty() || rng.gen_bool(0.55) {
                    let v = if rng.gen_bool(0.1) {
                        f64::NAN
                    } else {
                        rng.gen_range(0..20) as f64
                    };
                    min.push(v);
                    window.push(v);
                } else {
                    min.pop();
                    window.remove(0);
                }

                let valid: Vec<f64> = window.iter().copied().filter(|v| !v.is_nan()).collect();
                let has_nan = valid.len() < window.len();
                let result = min.compute();
                if valid.is_empty() || (!skip_nan && has_nan) {
                    assert!(result.is_nan());
                } else {
                    let expected = valid.iter().copied().fold(f64::INFINITY, |a, b| if b < a { b } else { a });
                    assert_eq!(result, expected);
                }
                assert_eq!(min.size(), window.len());
                assert_eq!(min.size(), min.size_nan() + min.size_notnan());
                assert_eq!(
                    min.front().map(f64::to_bits),
                    window.first().map(|v| v.to_bits())
                );
            }
        }
    }

    #[test]
    fn test_duplicates_leave_one_at_a_time() {
        let mut min = Minimum::new(true);
        min.push(-4.0);
        min.push(-4.0);
        min.push(1.0);

        min.pop();
        assert_eq!(min.compute(), -4.0);
        min.pop();
        assert_eq!(min.compute(), 1.0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut min = Minimum::<f32>::new(true);
        min.push(8.0);
        min.push(f32::NAN);
        min.clear();
        assert_eq!(min.size(), 0);
        assert!(min.compute().is_nan());
        min.push(11.0);
        assert_eq!(min.compute(), 11.0);
        assert_eq!(min.name(), "RollingMin");
    }

    #[test]
    #[should_panic(expected = "pop on an empty window")]
    fn test_pop_on_empty_window_panics() {
        Minimum::<f64>::default().pop();
    }
}
