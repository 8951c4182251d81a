use alloc::boxed::Box;

/// Mixed-radix counter over every coordinate of a shape except one dimension.
///
/// Each call to [`Odometer::advance`] yields the next coordinate vector in
/// row-major order (last dimension fastest) with the skipped dimension pinned
/// at zero. Every combination is produced exactly once; a shape with a zero
/// sized free dimension yields nothing.
///
/// ```
/// # use rolling_axis::Odometer;
/// let mut odometer = Odometer::new(&[2, 3, 2], 1);
/// let mut seen = vec![];
/// while let Some(coords) = odometer.advance() {
///     seen.push(coords.to_vec());
/// }
/// assert_eq!(seen, [[0, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Odometer {
    /// Radix of every digit
    shape: Box<[usize]>,
    /// The dimension left out of the count
    skip: usize,
    /// Current digits
    coords: Box<[usize]>,
    /// Whether `coords` has been handed out yet
    started: bool,
    /// Whether every combination has been produced
    done: bool,
}

impl Odometer {
    /// Creates an odometer over `shape` that leaves dimension `skip` out.
    ///
    /// # Arguments
    ///
    /// * `shape` - Size of every dimension
    /// * `skip` - The dimension whose coordinate stays at zero
    ///
    /// # Returns
    ///
    /// * `Self` - An odometer positioned before the first combination
    pub fn new(shape: &[usize], skip: usize) -> Self {
        let empty = shape
            .iter()
            .enumerate()
            .any(|(d, &size)| d != skip && size == 0);
        Self {
            shape: shape.into(),
            skip,
            coords: vec![0; shape.len()].into_boxed_slice(),
            started: false,
            done: empty,
        }
    }

    /// Number of combinations the odometer produces in total
    ///
    /// # Returns
    ///
    /// * `Option<usize>` - The count, or `None` if it does not fit in `usize`
    pub fn count(&self) -> Option<usize> {
        self.shape
            .iter()
            .enumerate()
            .filter(|&(d, _)| d != self.skip)
            .try_fold(1usize, |acc, (_, &size)| acc.checked_mul(size))
    }

    /// Moves to the next combination.
    ///
    /// # Returns
    ///
    /// * `Option<&[usize]>` - The coordinates, or `None` once every combination was produced
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.coords);
        }

        for d in (0..self.shape.len()).rev() {
            if d == self.skip {
                continue;
            }
            if self.coords[d] + 1 < self.shape[d] {
                self.coords[d] += 1;
                return Some(&self.coords);
            }
            self.coords[d] = 0;
        }

        self.done = true;
        None
    }

    /// Rewinds to the position before the first combination.
    pub fn reset(&mut self) {
        self.coords.fill(0);
        self.started = false;
        self.done = self
            .shape
            .iter()
            .enumerate()
            .any(|(d, &size)| d != self.skip && size == 0);
    }
}
