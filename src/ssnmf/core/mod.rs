//! ssnmf::core — building blocks of the SSNMF model.
//!
//! Purpose
//! -------
//! Collect the pieces the model composes: shape validation, configuration,
//! random initialization, the mask-case tag, per-factor update rules,
//! evaluation kernels and training traces.
//!
//! Key behaviors
//! -------------
//! - [`validation`] enforces the construction-time shape invariants and
//!   reports the first violated pair as `DimensionMismatch`.
//! - [`options`] defines [`ModelInit`] and [`TrainOptions`] with their
//!   documented defaults.
//! - [`updates`] implements the multiplicative rules for A, B and S under
//!   every masking combination of the Frobenius and I-divergence objectives.
//! - [`evaluation`] computes residual norms, accuracy and I-divergence.
//! - [`trace`] holds the optional per-iteration diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - Matrix entries are assumed non-negative; no routine here checks them.
//! - Update rules and evaluation kernels assume validated shapes.

pub mod evaluation;
pub mod init;
pub mod mask_case;
pub mod options;
pub mod shape;
pub mod trace;
pub mod updates;
pub mod validation;

pub use self::mask_case::MaskCase;
pub use self::options::{DEFAULT_LAM, DEFAULT_NUMITERS, ModelInit, TrainOptions};
pub use self::shape::SSNMFShape;
pub use self::trace::{ReconstructionTrace, SupervisedTrace};
