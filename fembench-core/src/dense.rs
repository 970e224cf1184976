//! Dense row-major matrix storage.
//!
//! The global stiffness and every matrix handed to a solver live in a single
//! contiguous buffer with a fixed row stride.

use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// Dense matrix stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            data: vec![0.0; nrows * ncols],
        }
    }

    /// Square identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Square diagonal matrix.
    pub fn from_diagonal(diagonal: &[f64]) -> Self {
        let n = diagonal.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diagonal.iter().enumerate() {
            m[(i, i)] = d;
        }
        m
    }

    /// Build from values listed row by row.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != nrows * ncols`.
    pub fn from_row_slice(nrows: usize, ncols: usize, values: &[f64]) -> Self {
        assert_eq!(
            values.len(),
            nrows * ncols,
            "DenseMatrix::from_row_slice: expected {} values",
            nrows * ncols
        );
        Self {
            nrows,
            ncols,
            data: values.to_vec(),
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Borrow row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Mutably borrow row `i`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Swap rows `a` and `b` in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * self.ncols);
        head[lo * self.ncols..(lo + 1) * self.ncols].swap_with_slice(&mut tail[..self.ncols]);
    }

    /// Compute `y = A·x` into an existing buffer.
    pub fn mul_vec_into(&self, x: &[f64], y: &mut [f64]) {
        debug_assert_eq!(x.len(), self.ncols);
        debug_assert_eq!(y.len(), self.nrows);
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = self.row(i).iter().zip(x).map(|(a, b)| a * b).sum();
        }
    }

    /// Compute `A·x`.
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; self.nrows];
        self.mul_vec_into(x, &mut y);
        y
    }

    /// Check symmetry with a tolerance relative to the largest entry.
    pub fn is_symmetric(&self, rel_tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let scale = self.data.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);
        for i in 0..self.nrows {
            for j in (i + 1)..self.ncols {
                if (self[(i, j)] - self[(j, i)]).abs() > rel_tol * scale {
                    return false;
                }
            }
        }
        true
    }

    /// Number of entries with magnitude strictly above `threshold`.
    pub fn count_above(&self, threshold: f64) -> usize {
        self.data.iter().filter(|v| v.abs() > threshold).count()
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.ncols + j]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.ncols + j]
    }
}

impl From<&DMatrix<f64>> for DenseMatrix {
    fn from(m: &DMatrix<f64>) -> Self {
        let mut dense = Self::zeros(m.nrows(), m.ncols());
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                dense[(i, j)] = m[(i, j)];
            }
        }
        dense
    }
}

impl From<&DenseMatrix> for DMatrix<f64> {
    fn from(m: &DenseMatrix) -> Self {
        DMatrix::from_row_slice(m.nrows, m.ncols, &m.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let m = DenseMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_swap_rows() {
        let mut m = DenseMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        m.swap_rows(2, 0);
        assert_eq!(m.as_slice(), &[5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        m.swap_rows(1, 1);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_mul_vec() {
        let m = DenseMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        assert_eq!(m.mul_vec(&[1.0, 2.0]), vec![4.0, 7.0]);
        assert_eq!(DenseMatrix::identity(3).mul_vec(&[1.0, 2.0, 3.0]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_symmetry_check() {
        let sym = DenseMatrix::from_row_slice(2, 2, &[4.0, 2.0, 2.0, 3.0]);
        let asym = DenseMatrix::from_row_slice(2, 2, &[4.0, 2.0, 1.0, 3.0]);
        assert!(sym.is_symmetric(1e-12));
        assert!(!asym.is_symmetric(1e-12));
        assert!(!DenseMatrix::zeros(2, 3).is_symmetric(1e-12));
    }

    #[test]
    fn test_nalgebra_conversion() {
        let m = DenseMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let na = DMatrix::from(&m);
        assert_eq!(na[(1, 2)], 6.0);
        assert_eq!(DenseMatrix::from(&na), m);
    }

    #[test]
    fn test_count_above() {
        let m = DenseMatrix::from_diagonal(&[1.0, 1e-13, 0.0, -2.0]);
        assert_eq!(m.count_above(1e-12), 2);
    }
}
