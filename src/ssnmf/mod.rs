//! ssnmf — (semi-)supervised non-negative matrix factorization.
//!
//! Purpose
//! -------
//! Factor a non-negative data matrix X (m × n) as X ≈ A·S and, when a label
//! matrix Y (p × n) is available, jointly fit a classifier Y ≈ B·S sharing
//! the same representation S. Training uses multiplicative updates that keep
//! every factor non-negative.
//!
//! Key behaviors
//! -------------
//! - Build a validated model via [`SSNMFModel::new`] from X, a rank k and a
//!   [`ModelInit`] bundle of optional factors, labels, masks, λ and seed.
//! - Train in place with `mult` (Frobenius, unsupervised), `snmfmult`
//!   (Frobenius + λ‖Y − BS‖²) or `klsnmfmult` (Frobenius + λ·I-divergence),
//!   each configured by [`TrainOptions`].
//! - Evaluate with `accuracy`, `kldiv`, `reconstruction_error` and
//!   `classification_error`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every shape relation between X, A, S, Y, B, W and L is checked once at
//!   construction; training never changes shapes.
//! - Entry values are not validated. Non-negative inputs keep the factors
//!   non-negative; negative inputs give unspecified numerical results.
//! - The update order inside an iteration is A, then B, then S.
//!
//! Conventions
//! -----------
//! - Masks W and L are expected to be 0/1 and multiply elementwise.
//! - The four {W, L} combinations are dispatched explicitly; see
//!   [`MaskCase`].
//! - Failures are reported via [`SSNMFResult`]; panics indicate internal
//!   invariant violations only.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_ssnmf::ssnmf::prelude::*;
//! use ndarray::array;
//!
//! let x = array![[1.0, 0.0, 2.0], [0.0, 3.0, 1.0]];
//! let y = array![[1.0, 0.0, 1.0], [0.0, 1.0, 0.0]];
//! let init = ModelInit::new().with_labels(y).with_lam(0.5).with_seed(7);
//! let mut model = SSNMFModel::new(x, 2, init)?;
//! let trace = model.snmfmult(&TrainOptions::default().with_numiters(50).with_saveerrs(true))?;
//! assert_eq!(trace.map(|t| t.len()), Some(50));
//! let acc = model.accuracy()?;
//! assert!((0.0..=1.0).contains(&acc));
//! # Ok::<(), SSNMFError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Update rules, evaluation kernels, validation and options are unit-tested
//!   in their own modules under [`core`].
//! - Model-level behavior (construction, gating, golden iteration, branch
//!   coverage) is tested in [`models::ssnmf`]; convergence and property
//!   checks live in the crate's `tests/` directory.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    DEFAULT_LAM, DEFAULT_NUMITERS, MaskCase, ModelInit, ReconstructionTrace, SSNMFShape,
    SupervisedTrace, TrainOptions,
};
pub use self::errors::{Factor, MatrixAxis, SSNMFError, SSNMFResult};
pub use self::models::SSNMFModel;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_ssnmf::ssnmf::prelude::*;
//
// to import the model, its configuration and its error type in one line.

pub mod prelude {
    pub use super::core::{ModelInit, ReconstructionTrace, SupervisedTrace, TrainOptions};
    pub use super::errors::{SSNMFError, SSNMFResult};
    pub use super::models::SSNMFModel;
}
