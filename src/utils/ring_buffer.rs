use alloc::vec::Vec;

/// A growable circular buffer holding the elements of a sliding window.
///
/// Elements live in a single arena addressed by a head index and a length, so
/// steady-state push/pop never allocates. When the arena is full it doubles and
/// the live elements are laid out again from index zero.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Backing storage, every slot initialised with `T::default()`.
    data: Vec<T>,
    /// The index of the oldest element in the buffer (the "head").
    head: usize,
    /// The current number of live elements.
    len: usize,
}

impl<T: Default + Copy> RingBuffer<T> {
    /// Creates an empty buffer with room for `capacity` elements before growing.
    pub fn new(capacity: usize) -> Self {
        let mut data = Vec::with_capacity(capacity.max(1));
        data.resize_with(capacity.max(1), T::default);
        Self {
            data,
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn slot(&self, i: usize) -> usize {
        (self.head + i) % self.capacity()
    }

    fn grow(&mut self) {
        let cap = self.capacity();
        let mut data = Vec::with_capacity(cap * 2);
        data.extend(self.iter().copied());
        data.resize_with(cap * 2, T::default);
        self.data = data;
        self.head = 0;
    }

    /// Appends a value after the newest element.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        if self.len() == self.capacity() {
            self.grow();
        }
        let at = self.slot(self.len);
        self.data[at] = value;
        self.len += 1;
    }

    /// Removes and returns the oldest element.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = core::mem::take(&mut self.data[self.head]);
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the newest element.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let at = self.slot(self.len - 1);
        self.len -= 1;
        Some(core::mem::take(&mut self.data[at]))
    }

    /// Returns the oldest element.
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.get(0)
    }

    /// Returns the newest element.
    #[inline]
    pub fn back(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns the element `i` positions after the oldest one.
    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        (i < self.len).then(|| self.data[self.slot(i)])
    }

    /// Drops every element, keeping the allocation.
    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
        self.data.fill(T::default());
    }

    /// Iterates from the oldest to the newest element.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).map(move |i| &self.data[self.slot(i)])
    }
}
