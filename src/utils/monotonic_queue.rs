use core::marker::PhantomData;

use super::RingBuffer;

/// Trait for defining order policies for monotonic queue
///
/// # Type Parameters
///
/// * `T` - The type of the elements in the queue
///
/// # Methods
///
/// * `dominates(new: &T, existing: &T) -> bool` - Returns true if `new` makes `existing`
///   irrelevant for as long as `new` stays in the window
///
pub trait OrderPolicy<T> {
    fn dominates(new: &T, existing: &T) -> bool;
}

/// Order policy for minimum
#[derive(Debug, Clone)]
pub struct Min;

/// Order policy for maximum
#[derive(Debug, Clone)]
pub struct Max;

impl<T: PartialOrd> OrderPolicy<T> for Min {
    #[inline]
    fn dominates(new: &T, existing: &T) -> bool {
        existing > new
    }
}

impl<T: PartialOrd> OrderPolicy<T> for Max {
    #[inline]
    fn dominates(new: &T, existing: &T) -> bool {
        existing < new
    }
}

/// Monotonic candidate queue for sliding extrema.
///
/// Holds the values that may still become the window's extremum, in
/// non-increasing order for [`Max`] and non-decreasing order for [`Min`], so
/// the front is always the answer. Expiry is driven by the caller: every value
/// leaving the window is handed to [`MonotonicQueue::pop`], which removes it
/// only if it is still the front candidate. Equal values are all kept, so a
/// departing duplicate never takes its twin with it.
///
/// # Type Parameters
///
/// * `T` - The type of the elements in the queue
/// * `O` - The order policy for the queue
#[derive(Debug, Clone)]
pub struct MonotonicQueue<T, O> {
    deque: RingBuffer<T>,
    _order: PhantomData<O>,
}

impl<T, O> MonotonicQueue<T, O>
where
    T: PartialOrd + Copy + Default,
    O: OrderPolicy<T>,
{
    /// Creates a new `MonotonicQueue` instance with the specified initial capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Candidates held before the backing buffer grows
    ///
    /// # Returns
    ///
    /// * `Self` - The `MonotonicQueue` instance
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            deque: RingBuffer::new(capacity),
            _order: PhantomData,
        }
    }

    /// Pushes a new value, evicting every tail candidate it dominates
    ///
    /// # Arguments
    ///
    /// * `value` - The value entering the window
    #[inline]
    pub fn push(&mut self, value: T) {
        while let Some(existing) = self.deque.back() {
            if O::dominates(&value, &existing) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back(value);
    }

    /// Retires a value leaving the window
    ///
    /// # Arguments
    ///
    /// * `value` - The value leaving the window, oldest first
    #[inline]
    pub fn pop(&mut self, value: T) {
        if self.deque.front() == Some(value) {
            self.deque.pop_front();
        }
    }

    /// Returns the front element of the queue
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The front element of the queue, or `None` if the queue is empty
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.deque.front()
    }

    /// Resets the queue to its initial state
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The queue object
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.deque.reset();
        self
    }

    /// Returns the number of candidates currently held
    #[inline]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    /// Returns true if the queue is empty
    ///
    /// # Returns
    ///
    /// * `bool` - True if the queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use super::{Max, Min, MonotonicQueue, OrderPolicy};
    use crate::utils::RingBuffer;
    use alloc::vec::Vec;

    fn slide<O: OrderPolicy<i32>>(input: &[i32], window: usize) -> Vec<i32> {
        let mut mq = MonotonicQueue::<_, O>::new(window);
        let mut fifo = RingBuffer::new(window);
        let mut result = vec![];

        for (i, &val) in input.iter().enumerate() {
            mq.push(val);
            fifo.push_back(val);
            if fifo.len() > window {
                mq.pop(fifo.pop_front().unwrap());
            }
            if i >= window - 1 {
                result.push(mq.front().unwrap());
            }
        }
        result
    }

    #[test]
    fn test_monotonic_queue_max_sliding_window() {
        let input = [
            31, 4, 52, 60, 61, 15, 28, 2, 36, 1, 4, 39, 12, 96, 1, 21, 95, 20, 35, 83,
        ];
        assert_eq!(
            slide::<Max>(&input, 3),
            vec![
                52, 60, 61, 61, 61, 28, 36, 36, 36, 39, 39, 96, 96, 96, 95, 95, 95, 83,
            ]
        );
    }

    #[test]
    fn test_monotonic_queue_min_sliding_window() {
        let input = [5, 1, 3, 8, 6, 2, 9];
        assert_eq!(slide::<Min>(&input, 3), vec![1, 1, 3, 2, 2]);
    }

    #[test]
    fn test_duplicated_values() {
        let input = [3, 3, 3, 3, 2, 2, 2, 4, 4];
        assert_eq!(slide::<Min>(&input, 3), vec![3, 3, 2, 2, 2, 2, 2]);
        assert_eq!(slide::<Max>(&input, 3), vec![3, 3, 3, 3, 2, 4, 4]);
    }

    #[test]
    fn test_equal_values_are_all_kept() {
        let mut mq = MonotonicQueue::<_, Max>::new(2);
        mq.push(5);
        mq.push(5);
        assert_eq!(mq.len(), 2);

        mq.pop(5);
        assert_eq!(mq.front(), Some(5));
    }

    #[test]
    fn test_pop_of_evicted_value_is_noop() {
        let mut mq = MonotonicQueue::<_, Max>::new(3);
        mq.push(1);
        mq.push(4);
        assert_eq!(mq.len(), 1);

        mq.pop(1);
        assert_eq!(mq.front(), Some(4));
        mq.pop(4);
        assert!(mq.is_empty());
    }

    #[test]
    fn test_edge_case_window_size_one() {
        let input = [5, 2, 9, 1, 7, 3];
        assert_eq!(slide::<Min>(&input, 1), input.to_vec());
        assert_eq!(slide::<Max>(&input, 1), input.to_vec());
    }

    #[test]
    fn test_monotonic_reset() {
        let mut mq = MonotonicQueue::<_, Min>::new(3);
        mq.push(14);
        mq.push(13);
        mq.push(12);
        assert_eq!(mq.front(), Some(12));
        mq.reset();
        assert!(mq.front().is_none());
        mq.push(10);
        assert_eq!(mq.front(), Some(10));
    }
}
