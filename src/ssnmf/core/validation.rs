//! Shape validation for SSNMF construction.
//!
//! Every check compares one axis of one matrix against the dimension it must
//! agree with and reports the first disagreement as
//! [`SSNMFError::DimensionMismatch`]. Checks run in a fixed order (A rows,
//! S cols, A cols vs k, S rows vs k, Y cols, B rows, B cols vs k, W rows,
//! W cols, L rows, L cols) so that the reported pair is deterministic when
//! several invariants fail at once.
//!
//! Entry values are not inspected: non-negativity and finiteness are the
//! caller's responsibility.
use crate::ssnmf::errors::{Factor, MatrixAxis, SSNMFError, SSNMFResult};
use ndarray::Array2;

/// Fail with `DimensionMismatch` unless `left_dim == right_dim`.
#[inline]
fn ensure_dim(
    left: Factor, right: Factor, axis: MatrixAxis, left_dim: usize, right_dim: usize,
) -> SSNMFResult<()> {
    if left_dim != right_dim {
        return Err(SSNMFError::DimensionMismatch { left, right, axis, left_dim, right_dim });
    }
    Ok(())
}

/// Validate the X ≈ A·S factorization shapes.
///
/// # Errors
/// - `DimensionMismatch { left: A, right: X, axis: Rows }` if rows(A) ≠ rows(X).
/// - `DimensionMismatch { left: S, right: X, axis: Cols }` if cols(S) ≠ cols(X).
/// - `DimensionMismatch { left: A, right: Rank, axis: Cols }` if cols(A) ≠ k.
/// - `DimensionMismatch { left: S, right: Rank, axis: Rows }` if rows(S) ≠ k.
pub fn validate_factors(
    x: &Array2<f64>, k: usize, a: &Array2<f64>, s: &Array2<f64>,
) -> SSNMFResult<()> {
    ensure_dim(Factor::A, Factor::X, MatrixAxis::Rows, a.nrows(), x.nrows())?;
    ensure_dim(Factor::S, Factor::X, MatrixAxis::Cols, s.ncols(), x.ncols())?;
    ensure_dim(Factor::A, Factor::Rank, MatrixAxis::Cols, a.ncols(), k)?;
    ensure_dim(Factor::S, Factor::Rank, MatrixAxis::Rows, s.nrows(), k)?;
    Ok(())
}

/// Validate the Y ≈ B·S classification shapes.
///
/// # Errors
/// - `DimensionMismatch { left: Y, right: X, axis: Cols }` if cols(Y) ≠ cols(X).
/// - `DimensionMismatch { left: B, right: Y, axis: Rows }` if rows(B) ≠ rows(Y).
/// - `DimensionMismatch { left: B, right: Rank, axis: Cols }` if cols(B) ≠ k.
pub fn validate_supervision(
    x: &Array2<f64>, k: usize, y: &Array2<f64>, b: &Array2<f64>,
) -> SSNMFResult<()> {
    ensure_dim(Factor::Y, Factor::X, MatrixAxis::Cols, y.ncols(), x.ncols())?;
    ensure_dim(Factor::B, Factor::Y, MatrixAxis::Rows, b.nrows(), y.nrows())?;
    ensure_dim(Factor::B, Factor::Rank, MatrixAxis::Cols, b.ncols(), k)?;
    Ok(())
}

/// Validate that the observation mask W has the shape of X.
pub fn validate_data_mask(x: &Array2<f64>, w: &Array2<f64>) -> SSNMFResult<()> {
    ensure_dim(Factor::W, Factor::X, MatrixAxis::Rows, w.nrows(), x.nrows())?;
    ensure_dim(Factor::W, Factor::X, MatrixAxis::Cols, w.ncols(), x.ncols())?;
    Ok(())
}

/// Validate that the label mask L has the shape of Y.
///
/// An absent `Y` is treated as a 0 × 0 partner, so any L supplied without
/// labels is rejected on the row axis (or on the column axis for a 0-row L).
pub fn validate_label_mask(y: Option<&Array2<f64>>, l: &Array2<f64>) -> SSNMFResult<()> {
    let (y_rows, y_cols) = y.map_or((0, 0), |y| y.dim());
    if y.is_none() && l.nrows() == 0 && l.ncols() == 0 {
        return Err(SSNMFError::DimensionMismatch {
            left: Factor::L,
            right: Factor::Y,
            axis: MatrixAxis::Rows,
            left_dim: 0,
            right_dim: 0,
        });
    }
    ensure_dim(Factor::L, Factor::Y, MatrixAxis::Rows, l.nrows(), y_rows)?;
    ensure_dim(Factor::L, Factor::Y, MatrixAxis::Cols, l.ncols(), y_cols)?;
    Ok(())
}
