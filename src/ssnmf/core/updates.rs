//! Multiplicative update rules for the SSNMF objectives.
//!
//! Purpose
//! -------
//! Implement one update of one factor for each objective:
//! - [`update_left_factor`]: A for ‖X − AS‖²_F, and B for λ‖Y − BS‖²_F
//!   (same rule with Y, B, L in place of X, A, W).
//! - [`update_shared_factor`]: S for the unsupervised objective.
//! - [`update_shared_factor_frobenius`]: S for ‖X − AS‖²_F + λ‖Y − BS‖²_F.
//! - [`update_classifier_divergence`]: B for λ·D(Y‖BS).
//! - [`update_shared_factor_divergence`]: S for ‖X − AS‖²_F + λ·D(Y‖BS).
//!
//! Key behaviors
//! -------------
//! - Every rule has the form `θ ← θ / (ε + D) ⊙ N` and is applied in place
//!   through [`multiplicative_step`].
//! - Masks wrap the *predicted* term (AS or BS) and the *observed* term
//!   (X or Y) right where they multiply a transposed factor, never the final
//!   product. Each rule spells out its masked and unmasked forms as separate
//!   match arms.
//! - Products keep the left-to-right association of the textbook formulas,
//!   e.g. `(AᵗA)S` and `(AS)Sᵗ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shapes were validated at model construction; rules panic on
//!   non-conforming inputs (internal invariant).
//! - With non-negative factors, data, labels and masks, every rule keeps the
//!   updated factor non-negative.
use crate::numerical_stability::{guarded_ratio, multiplicative_step};
use ndarray::{Array2, ArrayView2, Axis};

/// Update a left factor against its target: `F ← F / (ε + [M⊙](FS) Sᵗ) ⊙ ([M⊙]T Sᵗ)`.
///
/// Used for A (target X, mask W) in all three objectives and for B (target
/// Y, mask L) in the Frobenius classification objective.
pub fn update_left_factor(
    factor: &mut Array2<f64>, s: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>,
    mask: Option<ArrayView2<'_, f64>>, eps: f64,
) {
    let st = s.t();
    let (numer, denom) = match mask {
        None => (target.dot(&st), factor.dot(&s).dot(&st)),
        Some(mask) => ((&mask * &target).dot(&st), (&mask * &factor.dot(&s)).dot(&st)),
    };
    multiplicative_step(factor, &numer, &denom, eps);
}

/// Update S for the unsupervised objective:
/// `S ← S / (ε + Aᵗ[W⊙](AS)) ⊙ (Aᵗ[W⊙]X)`.
pub fn update_shared_factor(
    s: &mut Array2<f64>, a: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>,
    w: Option<ArrayView2<'_, f64>>, eps: f64,
) {
    let at = a.t();
    let (numer, denom) = match w {
        None => (at.dot(&x), at.dot(&a).dot(&*s)),
        Some(w) => (at.dot(&(&w * &x)), at.dot(&(&w * &a.dot(&*s)))),
    };
    multiplicative_step(s, &numer, &denom, eps);
}

/// Update S for the Frobenius (semi-)supervised objective:
/// `S ← S / (ε + Aᵗ[W⊙](AS) + λBᵗ[L⊙](BS)) ⊙ (Aᵗ[W⊙]X + λBᵗ[L⊙]Y)`.
///
/// `b` must already hold this iteration's classifier update.
#[allow(clippy::too_many_arguments)]
pub fn update_shared_factor_frobenius(
    s: &mut Array2<f64>, a: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>,
    b: ArrayView2<'_, f64>, y: ArrayView2<'_, f64>, lam: f64,
    w: Option<ArrayView2<'_, f64>>, l: Option<ArrayView2<'_, f64>>, eps: f64,
) {
    let at = a.t();
    let bt = b.t();
    let (numer, denom) = match (w, l) {
        // supervised, complete data
        (None, None) => (
            at.dot(&x) + lam * bt.dot(&y),
            at.dot(&a).dot(&*s) + lam * bt.dot(&b).dot(&*s),
        ),
        // supervised, missing data
        (Some(w), None) => (
            at.dot(&(&w * &x)) + lam * bt.dot(&y),
            at.dot(&(&w * &a.dot(&*s))) + lam * bt.dot(&b).dot(&*s),
        ),
        // semi-supervised, complete data
        (None, Some(l)) => (
            at.dot(&x) + lam * bt.dot(&(&l * &y)),
            at.dot(&a).dot(&*s) + lam * bt.dot(&(&l * &b.dot(&*s))),
        ),
        // semi-supervised, missing data
        (Some(w), Some(l)) => (
            at.dot(&(&w * &x)) + lam * bt.dot(&(&l * &y)),
            at.dot(&(&w * &a.dot(&*s))) + lam * bt.dot(&(&l * &b.dot(&*s))),
        ),
    };
    multiplicative_step(s, &numer, &denom, eps);
}

/// Update B for the I-divergence classification term:
/// `B ← B / (ε + ΛSᵗ) ⊙ (Q Sᵗ)`, with `Λ = 𝟙` and `Q = Y/(ε + BS)` when no
/// L is set, and `Λ = L`, `Q = (L⊙Y)/(ε + L⊙(BS))` otherwise.
pub fn update_classifier_divergence(
    b: &mut Array2<f64>, s: ArrayView2<'_, f64>, y: ArrayView2<'_, f64>,
    l: Option<ArrayView2<'_, f64>>, eps: f64,
) {
    let st = s.t();
    let (numer, denom) = match l {
        None => {
            let quotient = guarded_ratio(&y.to_owned(), &b.dot(&s), eps);
            (quotient.dot(&st), ones_times_transpose(s, b.nrows()))
        }
        Some(l) => {
            let quotient = guarded_ratio(&(&l * &y), &(&l * &b.dot(&s)), eps);
            (quotient.dot(&st), l.dot(&st))
        }
    };
    multiplicative_step(b, &numer, &denom, eps);
}

/// Update S for the I-divergence (semi-)supervised objective:
/// `S ← S / (ε + 2Aᵗ[W⊙](AS) + λBᵗΛ) ⊙ (2Aᵗ[W⊙]X + λBᵗQ)`, with Λ and Q as in
/// [`update_classifier_divergence`].
///
/// `b` must already hold this iteration's classifier update.
#[allow(clippy::too_many_arguments)]
pub fn update_shared_factor_divergence(
    s: &mut Array2<f64>, a: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>,
    b: ArrayView2<'_, f64>, y: ArrayView2<'_, f64>, lam: f64,
    w: Option<ArrayView2<'_, f64>>, l: Option<ArrayView2<'_, f64>>, eps: f64,
) {
    let at = a.t();
    let bt = b.t();
    let n = s.ncols();
    let (numer, denom) = match (w, l) {
        // supervised, complete data
        (None, None) => {
            let quotient = guarded_ratio(&y.to_owned(), &b.dot(&*s), eps);
            (
                2.0 * at.dot(&x) + lam * bt.dot(&quotient),
                2.0 * at.dot(&a).dot(&*s) + lam * transpose_times_ones(b, n),
            )
        }
        // supervised, missing data
        (Some(w), None) => {
            let quotient = guarded_ratio(&y.to_owned(), &b.dot(&*s), eps);
            (
                2.0 * at.dot(&(&w * &x)) + lam * bt.dot(&quotient),
                2.0 * at.dot(&(&w * &a.dot(&*s))) + lam * transpose_times_ones(b, n),
            )
        }
        // semi-supervised, complete data
        (None, Some(l)) => {
            let quotient = guarded_ratio(&(&l * &y), &(&l * &b.dot(&*s)), eps);
            (
                2.0 * at.dot(&x) + lam * bt.dot(&quotient),
                2.0 * at.dot(&a).dot(&*s) + lam * bt.dot(&l),
            )
        }
        // semi-supervised, missing data
        (Some(w), Some(l)) => {
            let quotient = guarded_ratio(&(&l * &y), &(&l * &b.dot(&*s)), eps);
            (
                2.0 * at.dot(&(&w * &x)) + lam * bt.dot(&quotient),
                2.0 * at.dot(&(&w * &a.dot(&*s))) + lam * bt.dot(&l),
            )
        }
    };
    multiplicative_step(s, &numer, &denom, eps);
}

// ---- Helper Methods ----

/// `𝟙_{p×n} Sᵗ`: every row equals the row sums of S.
fn ones_times_transpose(s: ArrayView2<'_, f64>, p: usize) -> Array2<f64> {
    let row_sums = s.sum_axis(Axis(1));
    Array2::from_shape_fn((p, s.nrows()), |(_, j)| row_sums[j])
}

/// `Bᵗ 𝟙_{p×n}`: every column equals the column sums of B.
fn transpose_times_ones(b: ArrayView2<'_, f64>, n: usize) -> Array2<f64> {
    let col_sums = b.sum_axis(Axis(0));
    Array2::from_shape_fn((b.ncols(), n), |(j, _)| col_sums[j])
}
