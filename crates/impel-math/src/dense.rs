//! Dense matrix storage for contact influence systems.
//!
//! Contact systems are small (a handful to a few hundred rows) and
//! fully coupled, so the matrix is stored dense, row-major `f64`.
//! The buffer is reusable in place across resolution calls.

use serde::{Deserialize, Serialize};

/// Dense row-major matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row-major entries, length `rows * cols`.
    pub values: Vec<f64>,
}

impl Default for DenseMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl DenseMatrix {
    /// Creates a zero matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Creates an empty matrix intended to be sized later with [`reset`].
    ///
    /// [`reset`]: DenseMatrix::reset
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Re-dimensions the matrix in place and zeroes every entry,
    /// keeping the allocation when the new size fits.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.values.clear();
        self.values.resize(rows * cols, 0.0);
    }

    /// Returns the entry at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Sets the entry at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.cols + col] = value;
    }

    /// Computes `out = self * x`.
    ///
    /// `x` must have `cols` entries and `out` must have `rows` entries.
    pub fn mul_vec(&self, x: &[f64], out: &mut [f64]) {
        debug_assert_eq!(x.len(), self.cols);
        debug_assert_eq!(out.len(), self.rows);
        for (row, slot) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (col, &xv) in x.iter().enumerate() {
                acc += self.get(row, col) * xv;
            }
            *slot = acc;
        }
    }

    /// Gathers the principal submatrix indexed by `rows` into `into`.
    ///
    /// Used by the serial strategy to extract the sub-system for the
    /// contact subset resolved in one iteration.
    pub fn gather(&self, rows: &[usize], into: &mut DenseMatrix) {
        into.reset(rows.len(), rows.len());
        for (i, &r) in rows.iter().enumerate() {
            for (k, &c) in rows.iter().enumerate() {
                into.set(i, k, self.get(r, c));
            }
        }
    }

    /// Returns the largest relative asymmetry `|a_ij − a_ji| / max(|a_ij|, 1)`
    /// over all off-diagonal pairs. Zero for a symmetric matrix.
    pub fn max_asymmetry(&self) -> f64 {
        let mut worst = 0.0_f64;
        for i in 0..self.rows {
            for j in (i + 1)..self.cols.min(self.rows) {
                let diff = (self.get(i, j) - self.get(j, i)).abs();
                let scale = self.get(i, j).abs().max(1.0);
                worst = worst.max(diff / scale);
            }
        }
        worst
    }
}
