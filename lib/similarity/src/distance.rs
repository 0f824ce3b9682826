//! Distance calculations
//!
//! Each function compares one reference row against every row of a matrix
//! and returns one distance per row, in row order. All functions are pure
//! and can run concurrently on different channels.

use ndarray::{ArrayView1, Zip};
use rayon::prelude::*;
use recipex_core::{row_norms, sparse_row, Error, IdIndex, NumericMatrix, Result, SparseMatrix};
use sprs::CsVecView;

/// Weighted Euclidean distance of every row to row `reference_index`
///
/// `distance[r] = sqrt(sum_f weights[f] * (m[r, f] - m[ref, f])^2)`
pub fn euclidean_distance(
    matrix: &NumericMatrix,
    reference_index: usize,
    weights: &[f64],
) -> Result<Vec<f64>> {
    if reference_index >= matrix.nrows() {
        return Err(Error::IndexOutOfRange {
            index: reference_index,
            len: matrix.nrows(),
        });
    }
    if weights.len() != matrix.ncols() {
        return Err(Error::DimensionMismatch {
            expected: matrix.ncols(),
            actual: weights.len(),
        });
    }

    let reference = matrix.row(reference_index);
    let weights = ArrayView1::from(weights);
    let distances = (0..matrix.nrows())
        .into_par_iter()
        .map(|r| {
            Zip::from(matrix.row(r))
                .and(reference)
                .and(weights)
                .fold(0.0, |acc, value, ref_value, weight| {
                    let diff = value - ref_value;
                    acc + weight * diff * diff
                })
                .sqrt()
        })
        .collect();

    Ok(distances)
}

/// Cosine distance `1 - cos(row, reference)` of every row to the row of `reference_id`
pub fn cosine_distance_sparse(
    reference_id: u64,
    matrix: &SparseMatrix,
    id_index: &IdIndex,
) -> Result<Vec<f64>> {
    let reference_index = id_index
        .index_of(reference_id)
        .ok_or(Error::UnknownIdentifier(reference_id))?;
    cosine_distance_from_row(matrix, &row_norms(matrix), reference_index)
}

/// Cosine distances against row `reference_index` using precomputed row norms.
///
/// Zero rows have similarity 0 with everything. The reference row itself is
/// always at distance exactly 0 and results are clamped into `[0, 2]`.
pub fn cosine_distance_from_row(
    matrix: &SparseMatrix,
    norms: &[f64],
    reference_index: usize,
) -> Result<Vec<f64>> {
    if norms.len() != matrix.rows() {
        return Err(Error::DimensionMismatch {
            expected: matrix.rows(),
            actual: norms.len(),
        });
    }
    let reference = sparse_row(matrix, reference_index)?;
    let reference_norm = norms[reference_index];

    let distances = (0..matrix.rows())
        .into_par_iter()
        .map(|r| {
            if r == reference_index {
                return 0.0;
            }
            let similarity = matrix
                .outer_view(r)
                .map_or(0.0, |row| cosine_similarity(&reference, reference_norm, &row, norms[r]));
            (1.0 - similarity).clamp(0.0, 2.0)
        })
        .collect();

    Ok(distances)
}

/// Cosine distance between two rows of the same matrix
pub fn cosine_distance_pair(matrix: &SparseMatrix, a: usize, b: usize) -> Result<f64> {
    let (row_a, row_b) = (sparse_row(matrix, a)?, sparse_row(matrix, b)?);
    if a == b {
        return Ok(0.0);
    }
    let similarity = cosine_similarity(&row_a, row_a.l2_norm(), &row_b, row_b.l2_norm());
    Ok((1.0 - similarity).clamp(0.0, 2.0))
}

#[inline]
fn cosine_similarity(a: &CsVecView<'_, f64>, norm_a: f64, b: &CsVecView<'_, f64>, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}
