//! ssnmf::models — user-facing SSNMF model.
//!
//! [`SSNMFModel`] owns X, A, S and, when supervised, Y, B, λ and L, and
//! exposes the three training procedures (`mult`, `snmfmult`, `klsnmfmult`)
//! plus the evaluation methods (`accuracy`, `kldiv`, residual errors).

pub mod ssnmf;

pub use self::ssnmf::SSNMFModel;
