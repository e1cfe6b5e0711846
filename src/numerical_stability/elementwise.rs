//! ε-guarded element-wise kernels for multiplicative updates.
//!
//! Every multiplicative update in the crate has the shape
//! `θ ← θ / (ε + D) ⊙ N` with non-negative `θ`, `N`, `D`. The helpers here
//! apply that step in place and provide the small reductions (Frobenius
//! norms, first-occurrence argmax) the evaluation code needs.
//!
//! # Provided items
//! - [`DEFAULT_EPS`]: the denominator floor used when callers do not
//!   supply one (1e-10).
//! - [`multiplicative_step`]: in-place `θ ← θ / (ε + D) ⊙ N`.
//! - [`guarded_ratio`]: allocating `N / (ε + D)`.
//! - [`frobenius_distance`]: `‖P − Q‖_F` without materializing the
//!   difference.
//! - [`argmax_first`]: index of the first maximal entry of a column.
//!
//! The ε floor is a numerical device, not an error path: near-zero
//! denominators are never reported.
use ndarray::{Array2, ArrayView1, ArrayView2, Zip};

/// Denominator floor applied when no ε is supplied.
pub const DEFAULT_EPS: f64 = 1e-10;

/// Apply one multiplicative update in place: `factor ← factor / (eps + denom) ⊙ numer`.
///
/// The division is evaluated before the product so that the arithmetic
/// order matches the textbook Lee–Seung form `θ / (ε + D) · N`.
///
/// # Parameters
/// - `factor`: matrix being updated; must share its shape with `numer` and
///   `denom`.
/// - `numer`, `denom`: non-negative numerator and denominator terms.
/// - `eps`: strictly positive floor added to every denominator entry.
///
/// # Panics
/// Panics if the three shapes differ (an internal invariant; update rules
/// always build conforming terms).
pub fn multiplicative_step(
    factor: &mut Array2<f64>, numer: &Array2<f64>, denom: &Array2<f64>, eps: f64,
) {
    Zip::from(factor).and(numer).and(denom).for_each(|f, &n, &d| {
        *f = *f / (eps + d) * n;
    });
}

/// Return `numer / (eps + denom)` element-wise.
///
/// Used for the `Y / (ε + BS)` quotient of the I-divergence updates.
pub fn guarded_ratio(numer: &Array2<f64>, denom: &Array2<f64>, eps: f64) -> Array2<f64> {
    Zip::from(numer).and(denom).map_collect(|&n, &d| n / (eps + d))
}

/// Frobenius distance `‖p − q‖_F`, computed without allocating `p − q`.
///
/// # Panics
/// Panics if `p` and `q` have different shapes.
pub fn frobenius_distance(p: ArrayView2<'_, f64>, q: ArrayView2<'_, f64>) -> f64 {
    Zip::from(p).and(q).fold(0.0, |acc, &a, &b| acc + (a - b) * (a - b)).sqrt()
}

/// Index of the maximal entry of `col`, lowest index among ties.
///
/// An empty column yields `0`.
pub fn argmax_first(col: ArrayView1<'_, f64>) -> usize {
    let mut best_idx = 0;
    let mut best_val = f64::NEG_INFINITY;
    for (idx, &v) in col.iter().enumerate() {
        if idx == 0 || v > best_val {
            best_idx = idx;
            best_val = v;
        }
    }
    best_idx
}
