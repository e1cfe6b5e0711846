//! numerical_stability — ε-guarded kernels shared by the update rules.
//!
//! Purpose
//! -------
//! Centralize the denominator floor and the small element-wise helpers the
//! multiplicative updates and evaluation routines rely on, so that every
//! update rule applies ε in exactly the same place.
//!
//! Key behaviors
//! -------------
//! - Expose [`DEFAULT_EPS`] as the shared denominator floor.
//! - Provide the in-place multiplicative step and the guarded quotient used
//!   by the I-divergence rules.
//! - Provide Frobenius reductions and a first-occurrence column argmax.
//!
//! Conventions
//! -----------
//! - All routines operate on `ndarray` matrices and views and never log or
//!   touch global state.
//! - Shape agreement is an internal invariant guaranteed by the callers.

pub mod elementwise;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::elementwise::{
    DEFAULT_EPS, argmax_first, frobenius_distance, guarded_ratio,
    multiplicative_step,
};
