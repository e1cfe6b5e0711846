//! Errors for SSNMF models (construction-time shape checks and supervision
//! requirements).
//!
//! This module defines the single model error type, [`SSNMFError`], used by
//! the Rust core and, behind the `python-bindings` feature, converted into a
//! Python `ValueError`.
//!
//! ## Conventions
//! - Matrices are named by their role in the objective (`X`, `A`, `S`, `Y`,
//!   `B`, `W`, `L`); the requested rank is reported as `k`.
//! - Numerical trouble (near-zero denominators, negative or non-finite
//!   inputs) is never an error: the ε floor absorbs the former and the latter
//!   are not validated.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for SSNMF operations.
pub type SSNMFResult<T> = Result<T, SSNMFError>;

/// Role of a matrix (or the rank) taking part in a shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    /// Data matrix, m × n.
    X,
    /// Left factor of X, m × k.
    A,
    /// Shared right factor, k × n.
    S,
    /// Label matrix, p × n.
    Y,
    /// Classifier (left factor of Y), p × k.
    B,
    /// Observation mask for X, m × n.
    W,
    /// Observation mask for Y, p × n.
    L,
    /// The requested number of topics.
    Rank,
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Factor::X => "X",
            Factor::A => "A",
            Factor::S => "S",
            Factor::Y => "Y",
            Factor::B => "B",
            Factor::W => "W",
            Factor::L => "L",
            Factor::Rank => "k",
        };
        f.write_str(name)
    }
}

/// Matrix axis on which two dimensions disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixAxis {
    Rows,
    Cols,
}

impl std::fmt::Display for MatrixAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixAxis::Rows => f.write_str("row"),
            MatrixAxis::Cols => f.write_str("column"),
        }
    }
}

/// Unified error type for SSNMF modeling.
///
/// Both variants are raised before any state is touched: a failed
/// construction returns no model, and a failed training or evaluation call
/// leaves A, S and B exactly as they were.
#[derive(Debug, Clone, PartialEq)]
pub enum SSNMFError {
    /// A shape invariant was violated at construction time.
    ///
    /// `axis` is the axis of `left` that was checked; `right_dim` is the
    /// dimension it had to equal (the rank itself when `right` is
    /// [`Factor::Rank`], `0` when `right` is an absent `Y`).
    DimensionMismatch {
        left: Factor,
        right: Factor,
        axis: MatrixAxis,
        left_dim: usize,
        right_dim: usize,
    },

    /// A supervised routine was called on a model built without `Y`.
    MissingSupervision { operation: &'static str },
}

impl std::error::Error for SSNMFError {}

impl std::fmt::Display for SSNMFError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SSNMFError::DimensionMismatch { left, right, axis, left_dim, right_dim } => {
                write!(
                    f,
                    "The {axis} dimension of {left} ({left_dim}) does not match {right} ({right_dim})."
                )
            }
            SSNMFError::MissingSupervision { operation } => {
                write!(
                    f,
                    "Label matrix Y not provided: `{operation}` needs a (semi-)supervised model; \
                     train with `mult` instead."
                )
            }
        }
    }
}

/// Convert an [`SSNMFError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<SSNMFError> for PyErr {
    fn from(err: SSNMFError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
