use thiserror::Error;

/// Errors raised while validating rolling parameters
///
/// Every variant is a caller error: the offending call performs no work and
/// leaves its inputs untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RollingError {
    /// The shape has no dimension
    #[error("rolling: shape must have at least one dimension")]
    EmptyShape,
    /// Strides were given for a different number of dimensions than the shape
    #[error("rolling: strides length mismatch: expected = {expected}, got = {got}")]
    StridesMismatch {
        /// Number of dimensions of the shape
        expected: usize,
        /// Number of strides supplied
        got: usize,
    },
    /// The rolling axis does not exist
    #[error("rolling: axis out of range: axis = {axis}, ndim = {ndim}")]
    AxisOutOfRange {
        /// Requested axis
        axis: usize,
        /// Number of dimensions of the shape
        ndim: usize,
    },
    /// The window is empty
    #[error("rolling: window must be at least 1")]
    InvalidWindow,
    /// More valid elements are required than the window can hold
    #[error("rolling: invalid min_periods: min_periods = {min_periods}, window = {window}")]
    InvalidMinPeriods {
        /// Requested minimum number of valid elements
        min_periods: usize,
        /// Window size
        window: usize,
    },
    /// The largest reachable offset does not fit in `usize`
    #[error("rolling: offset computation overflows for the given shape and strides")]
    OffsetOverflow,
    /// The buffer is too short for the shape and strides
    #[error("rolling: offset out of bounds: offset = {offset}, len = {len}")]
    OutOfBounds {
        /// Largest offset the traversal would touch
        offset: usize,
        /// Length of the supplied buffer
        len: usize,
    },
    /// A quantile order that is negative, infinite or NaN
    #[error("rolling: invalid quantile order: {order}")]
    InvalidOrder {
        /// The rejected order
        order: f64,
    },
}

/// Result alias for fallible rolling operations
pub type Result<T> = core::result::Result<T, RollingError>;
