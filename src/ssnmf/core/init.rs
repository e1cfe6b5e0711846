//! Random initialization of factor matrices.
//!
//! Unsupplied factors (A, S and, when supervised, B) are drawn entry-wise
//! from Uniform[0, 1), which keeps every initial entry non-negative as the
//! multiplicative updates require.
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Build the RNG used for default factors: seeded when `seed` is set,
/// entropy-seeded otherwise.
pub fn factor_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw a `rows × cols` matrix with i.i.d. Uniform[0, 1) entries.
pub fn uniform_factor<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Array2<f64> {
    Array2::from_shape_simple_fn((rows, cols), || rng.gen::<f64>())
}
