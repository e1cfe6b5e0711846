//! Evaluation kernels: residual norms, classification accuracy and
//! generalized KL (I-)divergence.
//!
//! Purpose
//! -------
//! Provide the scalar metrics recorded during training and exposed by the
//! model's evaluation methods, computed directly from matrix views so they
//! can be reused without borrowing the whole model.
//!
//! Key behaviors
//! -------------
//! - [`masked_residual`]: `‖[M⊙]T − [M⊙](PR)‖_F`, the reconstruction error of
//!   X ≈ AS (mask W) and the Frobenius classification error of Y ≈ BS
//!   (mask L).
//! - [`classification_accuracy`]: fraction of columns whose predicted class
//!   (first-occurrence argmax of a column of BS) matches the true class.
//! - [`kl_divergence`]: ε-smoothed I-divergence D(Y‖BS).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs have the shapes validated at model construction.
//! - With a label mask, a column whose masked true labels are all zero and
//!   whose predicted argmax happens to coincide with the true argmax is
//!   dropped from the accuracy denominator; if the argmaxes differ it still
//!   counts as a miss. This asymmetry is kept as is.
//! - Degenerate inputs (no columns, no classes, or every column dropped from
//!   the denominator) give an accuracy of 0.0.
use crate::numerical_stability::{argmax_first, frobenius_distance};
use ndarray::{Array2, ArrayView2, Zip};

/// Residual `‖[M⊙]target − [M⊙](left · right)‖_F`.
pub fn masked_residual(
    target: ArrayView2<'_, f64>, left: ArrayView2<'_, f64>, right: ArrayView2<'_, f64>,
    mask: Option<ArrayView2<'_, f64>>,
) -> f64 {
    let approx = left.dot(&right);
    match mask {
        None => frobenius_distance(target, approx.view()),
        Some(mask) => {
            let masked_target = &mask * &target;
            let masked_approx = &mask * &approx;
            frobenius_distance(masked_target.view(), masked_approx.view())
        }
    }
}

/// Classification accuracy of `Ŷ = B·S` against `Y`, optionally under the
/// label mask `L`.
///
/// Without `L`, returns the fraction of the `n` columns for which
/// `argmax Y[:, i] == argmax Ŷ[:, i]`. With `L`, the comparison uses
/// `L⊙Y` and `L⊙Ŷ`; a match counts only if the matched `L⊙Y` entry is
/// nonzero, and a match on a zero entry removes the column from the
/// denominator.
pub fn classification_accuracy(
    y: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>, s: ArrayView2<'_, f64>,
    l: Option<ArrayView2<'_, f64>>,
) -> f64 {
    let numdata = y.ncols();
    if numdata == 0 || y.nrows() == 0 {
        return 0.0;
    }
    let y_hat = b.dot(&s);

    match l {
        None => {
            let numacc = (0..numdata)
                .filter(|&i| argmax_first(y.column(i)) == argmax_first(y_hat.column(i)))
                .count();
            numacc as f64 / numdata as f64
        }
        Some(l) => {
            let masked_y: Array2<f64> = &l * &y;
            let masked_hat: Array2<f64> = &l * &y_hat;
            let mut numacc = 0usize;
            let mut num_labels = numdata;
            for i in 0..numdata {
                let true_max = argmax_first(masked_y.column(i));
                let approx_max = argmax_first(masked_hat.column(i));
                if true_max == approx_max {
                    if masked_y[[true_max, i]] != 0.0 {
                        numacc += 1;
                    } else {
                        num_labels -= 1;
                    }
                }
            }
            if num_labels == 0 { 0.0 } else { numacc as f64 / num_labels as f64 }
        }
    }
}

/// ε-smoothed I-divergence
/// `D(Y‖Ŷ) = Σ [Y ln((Y + ε)/(Ŷ + ε)) − Y + Ŷ]` with `Ŷ = B·S`, or with
/// `L⊙Y` and `L⊙Ŷ` substituted throughout when `L` is set.
///
/// The smoothing introduces a small bias, so the result may dip marginally
/// below zero.
pub fn kl_divergence(
    y: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>, s: ArrayView2<'_, f64>,
    l: Option<ArrayView2<'_, f64>>, eps: f64,
) -> f64 {
    let y_hat = b.dot(&s);
    match l {
        None => divergence_sum(y, y_hat.view(), eps),
        Some(l) => {
            let masked_y = &l * &y;
            let masked_hat = &l * &y_hat;
            divergence_sum(masked_y.view(), masked_hat.view(), eps)
        }
    }
}

// ---- Helper Methods ----

fn divergence_sum(y: ArrayView2<'_, f64>, y_hat: ArrayView2<'_, f64>, eps: f64) -> f64 {
    Zip::from(y).and(y_hat).fold(0.0, |acc, &t, &h| acc + t * ((t + eps) / (h + eps)).ln() - t + h)
}
