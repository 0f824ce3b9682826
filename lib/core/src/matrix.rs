//! Matrix types shared by the similarity channels
//!
//! Text channels are CSR matrices from `sprs`, one row per recipe. The
//! numeric channel is a row-major `ndarray` matrix.

use crate::{Error, Result};
use ndarray::Array2;
use sprs::{CsMat, CsVecView, TriMat};

/// Document-term matrix of a text channel
pub type SparseMatrix = CsMat<f64>;

/// Recipe-by-feature matrix of the numeric channel
pub type NumericMatrix = Array2<f64>;

/// Build a CSR matrix from per-row `(column, value)` entries.
///
/// Entries inside a row may come in any order and duplicates are summed.
pub fn csr_from_rows(cols: usize, rows: Vec<Vec<(usize, f64)>>) -> Result<SparseMatrix> {
    let mut triplets = TriMat::new((rows.len(), cols));
    for (r, row) in rows.into_iter().enumerate() {
        for (col, value) in row {
            if col >= cols {
                return Err(Error::DimensionMismatch {
                    expected: cols,
                    actual: col + 1,
                });
            }
            triplets.add_triplet(r, col, value);
        }
    }
    Ok(triplets.to_csr())
}

/// Borrow row `index`, or `IndexOutOfRange`
pub fn sparse_row(matrix: &SparseMatrix, index: usize) -> Result<CsVecView<'_, f64>> {
    matrix.outer_view(index).ok_or(Error::IndexOutOfRange {
        index,
        len: matrix.rows(),
    })
}

/// L2 norm of every row
pub fn row_norms(matrix: &SparseMatrix) -> Vec<f64> {
    matrix.outer_iterator().map(|row| row.l2_norm()).collect()
}
