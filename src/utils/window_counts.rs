/// Missing-value bookkeeping shared by every rolling statistic.
///
/// Tracks how many NaN and non-NaN elements are currently in the window,
/// together with the immutable skip/propagate mode. The sum of both counters
/// is always the window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCounts {
    /// Whether NaNs are excluded (`true`) or poison the result (`false`)
    skip_nan: bool,
    /// NaN elements in the window
    nan: usize,
    /// Non-NaN elements in the window
    notnan: usize,
}

impl WindowCounts {
    /// Creates empty counters for the given NaN mode.
    ///
    /// # Arguments
    ///
    /// * `skip_nan` - Skip missing values when `true`, propagate them when `false`
    ///
    /// # Returns
    ///
    /// * `Self` - Counters for an empty window
    pub const fn new(skip_nan: bool) -> Self {
        Self {
            skip_nan,
            nan: 0,
            notnan: 0,
        }
    }

    /// Returns `true` when missing values are skipped
    #[inline]
    pub const fn skip_nan(&self) -> bool {
        self.skip_nan
    }

    /// Number of NaN elements in the window
    #[inline]
    pub const fn nan(&self) -> usize {
        self.nan
    }

    /// Number of non-NaN elements in the window
    #[inline]
    pub const fn notnan(&self) -> usize {
        self.notnan
    }

    /// Total window length
    #[inline]
    pub const fn len(&self) -> usize {
        self.nan + self.notnan
    }

    /// Returns `true` when the window holds no element at all
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when a statistic may be evaluated on the current window.
    ///
    /// A window without any non-NaN element never qualifies, and in propagate
    /// mode a single NaN disqualifies it.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.notnan > 0 && (self.skip_nan || self.nan == 0)
    }

    /// Records an element entering the window
    #[inline]
    pub const fn record_push(&mut self, is_nan: bool) {
        if is_nan {
            self.nan += 1;
        } else {
            self.notnan += 1;
        }
    }

    /// Records the oldest element leaving the window
    #[inline]
    pub const fn record_pop(&mut self, is_nan: bool) {
        if is_nan {
            self.nan -= 1;
        } else {
            self.notnan -= 1;
        }
    }

    /// Resets both counters, keeping the NaN mode
    #[inline]
    pub const fn reset(&mut self) {
        self.nan = 0;
        self.notnan = 0;
    }
}

impl Default for WindowCounts {
    fn default() -> Self {
        Self::new(true)
    }
}
