use alloc::boxed::Box;
use log::{debug, trace, warn};
use num_traits::Float;

use crate::{Odometer, Result, RollingError, RollingStatistic};

/// In-place rolling application of a statistic along one axis of an
/// n-dimensional strided buffer
///
/// The buffer is seen through a `shape` and per-dimension element `strides`.
/// Every line parallel to `axis` is rolled independently: the statistic is
/// cleared, fed the line in increasing axis order with a window of at most
/// `window` elements, and each element is overwritten with the statistic of
/// the window ending at it. Positions whose window holds fewer than
/// `min_periods` non-NaN values are overwritten with NaN.
///
/// The geometry is validated once, in the constructor, and again against the
/// buffer length before any element is written. A failed call leaves the
/// buffer untouched.
///
/// # Examples
///
/// ```
/// # use rolling_axis::{AxisRoller, Mean};
/// let nan = f64::NAN;
/// let mut data = [
///     2.0, 3.0, 1.0,
///     3.0, 3.5, nan,
///     nan, 4.0, 2.0,
///     -3.0, nan, nan,
/// ];
/// let roller = AxisRoller::new(&[4, 3], 0, 3, 2)?;
/// roller.roll(&mut data, &mut Mean::default())?;
///
/// assert!(data[..3].iter().all(|v| v.is_nan()));
/// assert_eq!(&data[3..5], &[2.5, 3.25]);
/// assert_eq!(&data[6..9], &[2.5, 3.5, 1.5]);
/// assert_eq!(&data[9..11], &[0.0, 3.75]);
/// # Ok::<(), rolling_axis::RollingError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisRoller {
    shape: Box<[usize]>,
    strides: Box<[usize]>,
    axis: usize,
    window: usize,
    min_periods: usize,
    /// Number of lines parallel to `axis`
    lines: usize,
    /// Largest reachable offset plus one, zero for an empty shape
    required_len: usize,
}

impl AxisRoller {
    /// Creates a roller over a row-major (C order) buffer
    ///
    /// # Arguments
    ///
    /// * `shape` - Size of every dimension
    /// * `axis` - The dimension to roll along
    /// * `window` - Maximum number of elements in the window, at least 1
    /// * `min_periods` - Non-NaN elements required for a result, at most `window`
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The validated roller
    pub fn new(shape: &[usize], axis: usize, window: usize, min_periods: usize) -> Result<Self> {
        Self::with_strides(shape, axis, window, min_periods, &[])
    }

    /// Creates a roller over a buffer with explicit element strides
    ///
    /// # Arguments
    ///
    /// * `shape` - Size of every dimension
    /// * `axis` - The dimension to roll along
    /// * `window` - Maximum number of elements in the window, at least 1
    /// * `min_periods` - Non-NaN elements required for a result, at most `window`
    /// * `strides` - Element stride of every dimension, empty for row-major
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The validated roller
    pub fn with_strides(
        shape: &[usize],
        axis: usize,
        window: usize,
        min_periods: usize,
        strides: &[usize],
    ) -> Result<Self> {
        validate(shape, axis, window, min_periods, strides).map_err(rejected)?;

        let strides = if strides.is_empty() {
            row_major(shape).map_err(rejected)?
        } else {
            strides.into()
        };

        let lines = Odometer::new(shape, axis)
            .count()
            .ok_or(RollingError::OffsetOverflow)
            .map_err(rejected)?;
        let required_len = required_len(shape, &strides).map_err(rejected)?;

        Ok(Self {
            shape: shape.into(),
            strides,
            axis,
            window,
            min_periods,
            lines,
            required_len,
        })
    }

    /// Rolls `stat` over a contiguous one dimensional buffer
    ///
    /// # Arguments
    ///
    /// * `buf` - The values, overwritten with the results
    /// * `window` - Maximum number of elements in the window, at least 1
    /// * `min_periods` - Non-NaN elements required for a result, at most `window`
    /// * `stat` - The statistic, cleared before use
    pub fn roll_slice<T, S>(buf: &mut [T], window: usize, min_periods: usize, stat: &mut S) -> Result<()>
    where
        T: Float,
        S: RollingStatistic<T> + ?Sized,
    {
        Self::new(&[buf.len()], 0, window, min_periods)?.roll(buf, stat)
    }

    /// Rolls `stat` along the axis of every line of `buf`
    ///
    /// # Arguments
    ///
    /// * `buf` - The values, overwritten with the results
    /// * `stat` - The statistic, cleared before every line
    ///
    /// # Returns
    ///
    /// * `Result<()>` - [`RollingError::OutOfBounds`] if `buf` is shorter than
    ///   [`required_len`](Self::required_len), in which case nothing is written
    pub fn roll<T, S>(&self, buf: &mut [T], stat: &mut S) -> Result<()>
    where
        T: Float,
        S: RollingStatistic<T> + ?Sized,
    {
        if buf.len() < self.required_len {
            return Err(rejected(RollingError::OutOfBounds {
                offset: self.required_len - 1,
                len: buf.len(),
            }));
        }

        debug!(
            "rolling {} along axis {} of {:?}: lines = {}, window = {}, min_periods = {}",
            stat.name(),
            self.axis,
            self.shape,
            self.lines,
            self.window,
            self.min_periods
        );

        let length = self.shape[self.axis];
        let step = self.strides[self.axis];
        let mut lines = Odometer::new(&self.shape, self.axis);

        while let Some(coords) = lines.advance() {
            let base: usize = coords.iter().zip(self.strides.iter()).map(|(&c, &s)| c * s).sum();
            trace!("line at offset {base}");

            stat.clear();
            for i in 0..length {
                let offset = base + i * step;
                stat.push(buf[offset]);
                if i >= self.window {
                    stat.pop();
                }
                buf[offset] = if stat.size_notnan() >= self.min_periods {
                    stat.compute()
                } else {
                    T::nan()
                };
            }
        }

        Ok(())
    }

    /// Size of every dimension
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Element stride of every dimension
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The dimension rolled along
    pub const fn axis(&self) -> usize {
        self.axis
    }

    /// Maximum number of elements in the window
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Non-NaN elements required for a result
    pub const fn min_periods(&self) -> usize {
        self.min_periods
    }

    /// Number of independent lines rolled per call
    pub const fn line_count(&self) -> usize {
        self.lines
    }

    /// Minimum buffer length, the largest reachable offset plus one
    pub const fn required_len(&self) -> usize {
        self.required_len
    }
}

fn rejected(err: RollingError) -> RollingError {
    warn!("{err}");
    err
}

fn validate(
    shape: &[usize],
    axis: usize,
    window: usize,
    min_periods: usize,
    strides: &[usize],
) -> Result<()> {
    if shape.is_empty() {
        return Err(RollingError::EmptyShape);
    }
    if !strides.is_empty() && strides.len() != shape.len() {
        return Err(RollingError::StridesMismatch {
            expected: shape.len(),
            got: strides.len(),
        });
    }
    if axis >= shape.len() {
        return Err(RollingError::AxisOutOfRange {
            axis,
            ndim: shape.len(),
        });
    }
    if window == 0 {
        return Err(RollingError::InvalidWindow);
    }
    if min_periods > window {
        return Err(RollingError::InvalidMinPeriods {
            min_periods,
            window,
        });
    }
    Ok(())
}

/// Strides of a contiguous buffer with the last dimension fastest
fn row_major(shape: &[usize]) -> Result<Box<[usize]>> {
    let mut strides = vec![1usize; shape.len()];
    for d in (0..shape.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1]
            .checked_mul(shape[d + 1])
            .ok_or(RollingError::OffsetOverflow)?;
    }
    Ok(strides.into_boxed_slice())
}

fn required_len(shape: &[usize], strides: &[usize]) -> Result<usize> {
    if shape.contains(&0) {
        return Ok(0);
    }
    shape
        .iter()
        .zip(strides)
        .try_fold(1usize, |acc, (&size, &stride)| {
            (size - 1).checked_mul(stride)?.checked_add(acc)
        })
        .ok_or(RollingError::OffsetOverflow)
}
