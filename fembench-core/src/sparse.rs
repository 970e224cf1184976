//! Sparse matrix operations.
//!
//! Uses CSR (Compressed Sparse Row) format: the stored values, their column
//! indices, and `n + 1` row offsets. The sparse view is derived from a dense
//! matrix by dropping small entries and is rebuilt every time it is needed.

use crate::dense::DenseMatrix;
use log::debug;
use nalgebra_sparse::csr::CsrMatrix as NalgebraCsr;

/// Compressed Sparse Row matrix.
pub type CsrMatrix = NalgebraCsr<f64>;

/// Default magnitude at or below which dense entries are dropped.
pub const DEFAULT_DROP_THRESHOLD: f64 = 1e-12;

/// Convert a dense matrix to CSR, keeping entries with `|a_ij| > threshold`.
///
/// Columns within each row are stored in ascending order.
pub fn convert_to_sparse(dense: &DenseMatrix, threshold: f64) -> CsrMatrix {
    let nrows = dense.nrows();
    let ncols = dense.ncols();

    let mut row_offsets = Vec::with_capacity(nrows + 1);
    let mut col_indices = Vec::new();
    let mut values = Vec::new();
    row_offsets.push(0);

    for i in 0..nrows {
        for (j, &v) in dense.row(i).iter().enumerate() {
            if v.abs() > threshold {
                values.push(v);
                col_indices.push(j);
            }
        }
        row_offsets.push(values.len());
    }

    if nrows * ncols > 0 {
        debug!(
            "CSR conversion: {} of {} entries stored ({:.2}% sparse)",
            values.len(),
            nrows * ncols,
            100.0 * (1.0 - values.len() as f64 / (nrows * ncols) as f64)
        );
    }

    // Offsets are monotone and columns sorted and in range by construction
    CsrMatrix::try_from_csr_data(nrows, ncols, row_offsets, col_indices, values)
        .expect("CSR data built row by row is always valid")
}

/// Compute `y = A·x` for a CSR matrix into an existing buffer.
pub fn sparse_mul_vec_into(a: &CsrMatrix, x: &[f64], y: &mut [f64]) {
    debug_assert_eq!(x.len(), a.ncols());
    debug_assert_eq!(y.len(), a.nrows());

    let offsets = a.row_offsets();
    let cols = a.col_indices();
    let values = a.values();

    for (i, yi) in y.iter_mut().enumerate() {
        *yi = (offsets[i]..offsets[i + 1])
            .map(|k| values[k] * x[cols[k]])
            .sum();
    }
}

/// Compute `A·x` for a CSR matrix.
pub fn sparse_mul_vec(a: &CsrMatrix, x: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; a.nrows()];
    sparse_mul_vec_into(a, x, &mut y);
    y
}

/// Bytes held by a CSR matrix: one value and one column index per stored
/// entry plus the row offsets.
pub fn storage_bytes(a: &CsrMatrix) -> usize {
    let f = std::mem::size_of::<f64>();
    let u = std::mem::size_of::<usize>();
    a.nnz() * (f + u) + (a.nrows() + 1) * u
}
