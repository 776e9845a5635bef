//! Enumeration of truth assignments.
//!
//! For `n` identifiers, row `i` (for `i` in `0..2^n`) is the `n`-bit binary
//! representation of `i`, most significant bit first, where `1` is `true`.
//! So the first identifier is the most significant bit, and rows appear in
//! ascending numeric order:
//!
//! ```text
//! n = 2:  [F, F]  [F, T]  [T, F]  [T, T]
//! ```

/// Iterator over all `2^n` assignment vectors of length `n`.
#[derive(Debug, Clone)]
pub struct Assignments {
    n: usize,
    next: u64,
    total: u64,
}

impl Assignments {
    /// # Panics
    ///
    /// Panics if `n >= 64`.
    pub fn new(n: usize) -> Self {
        assert!(n < 64, "Number of identifiers should be in the range 0..64");
        Self {
            n,
            next: 0,
            total: 1 << n,
        }
    }

    /// The assignment vector with the given row index.
    pub fn row(&self, index: u64) -> Vec<bool> {
        debug_assert!(index < self.total);
        (0..self.n).rev().map(|bit| (index >> bit) & 1 == 1).collect()
    }
}

impl Iterator for Assignments {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let row = self.row(self.next);
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

/// All assignments for `n` identifiers, in canonical order.
///
/// # Examples
///
/// ```
/// use whopper::enumerate::assignments;
///
/// let rows: Vec<Vec<bool>> = assignments(2).collect();
/// assert_eq!(
///     rows,
///     [
///         [false, false],
///         [false, true],
///         [true, false],
///         [true, true],
///     ]
/// );
/// ```
pub fn assignments(n: usize) -> Assignments {
    Assignments::new(n)
}
