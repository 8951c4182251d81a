use num_traits::Float;

/// Variance below this threshold is treated as zero by standardized statistics
pub const EPSILON: f64 = 1.0e-16;

/// Returns [`EPSILON`] in the element type
#[inline]
pub fn epsilon<T: Float>() -> T {
    T::from(EPSILON).unwrap_or_else(T::zero)
}

/// Converts a count into the element type
#[inline]
pub fn count_as<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}

/// Returns the population mean from a raw power sum
///
/// # Arguments
///
/// * `sum` - Sum of the values
/// * `n` - Number of values
#[inline]
pub fn mean<T: Float>(sum: T, n: T) -> T {
    sum / n
}

/// Returns the biased (population) variance from raw power sums
///
/// # Arguments
///
/// * `sum` - Sum of the values
/// * `sum_sq` - Sum of the squared values
/// * `n` - Number of values
#[inline]
pub fn variance<T: Float>(sum: T, sum_sq: T, n: T) -> T {
    let m = mean(sum, n);
    sum_sq / n - m * m
}

/// Returns the biased skewness from raw power sums, NaN for a degenerate variance
///
/// # Arguments
///
/// * `sum` - Sum of the values
/// * `sum_sq` - Sum of the squared values
/// * `sum_cube` - Sum of the cubed values
/// * `n` - Number of values
#[inline]
pub fn skewness<T: Float>(sum: T, sum_sq: T, sum_cube: T, n: T) -> T {
    let _2 = T::one() + T::one();
    let _3 = _2 + T::one();

    let m = mean(sum, n);
    let var = variance(sum, sum_sq, n);
    if var < epsilon() {
        return T::nan();
    }
    let m3 = sum_cube / n - _3 * (sum_sq / n) * m + _2 * m * m * m;
    m3 / (var * var.sqrt())
}

/// Returns how many standard deviations `value` lies from the mean, NaN for a
/// degenerate variance
///
/// # Arguments
///
/// * `value` - The value to standardize
/// * `sum` - Sum of the values
/// * `sum_sq` - Sum of the squared values
/// * `n` - Number of values
#[inline]
pub fn zscore<T: Float>(value: T, sum: T, sum_sq: T, n: T) -> T {
    let var = variance(sum, sum_sq, n);
    if var < epsilon() {
        return T::nan();
    }
    (value - mean(sum, n)) / var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_variance_from_sums() {
        // 1, 2, 3, 4
        assert_approx_eq!(variance(10.0, 30.0, 4.0), 1.25);
    }

    #[test]
    fn test_skewness_from_sums() {
        // 1, 2, 6: mean 3, var 14/3, m3 = (-8 - 1 + 27) / 3 = 6
        let expected = 6.0 / (14.0f64 / 3.0).powf(1.5);
        assert_approx_eq!(skewness(9.0, 41.0, 225.0, 3.0), expected);
    }

    #[test]
    fn test_degenerate_variance_is_nan() {
        assert!(skewness(6.0, 12.0, 24.0, 3.0).is_nan());
        assert!(zscore(2.0, 6.0, 12.0, 3.0).is_nan());
    }

    #[test]
    fn test_zscore_from_sums() {
        // 1, 2, 3: mean 2, var 2/3
        assert_approx_eq!(zscore(3.0, 6.0, 14.0, 3.0), 1.0 / (2.0f64 / 3.0).sqrt());
    }

    #[test]
    fn test_epsilon_in_single_precision() {
        assert!(epsilon::<f32>() > 0.0);
        assert_eq!(count_as::<f32>(7), 7.0);
    }
}
