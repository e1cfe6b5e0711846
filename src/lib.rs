//! rust_ssnmf — (semi-)supervised non-negative matrix factorization with
//! optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the SSNMF model to Python via the `_rust_ssnmf` extension module when the
//! `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`ssnmf` and `numerical_stability`) as the
//!   public crate surface.
//! - Define the `SSNMF` `#[pyclass]` wrapper and the `#[pymodule]` initializer
//!   for the `_rust_ssnmf` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work happens in [`ssnmf`]; this file performs only FFI glue,
//!   argument conversion, and error mapping.
//! - Python callers see the same validation and errors as Rust callers;
//!   [`ssnmf::SSNMFError`] surfaces as `ValueError` with its `Display` text.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`ssnmf`] directly and can ignore the
//!   PyO3 items guarded by the `python-bindings` feature.
//! - The library never installs a logger; binaries and tests choose one (the
//!   crate's tests use `env_logger`).

pub mod numerical_stability;
pub mod ssnmf;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyList};

#[cfg(feature = "python-bindings")]
use crate::{
    numerical_stability::DEFAULT_EPS,
    ssnmf::{
        core::options::{DEFAULT_NUMITERS, ModelInit, TrainOptions},
        models::ssnmf::SSNMFModel,
    },
    utils::{
        extract_f64_matrix, extract_optional_matrix, reconstruction_trace_to_list,
        supervised_trace_to_list,
    },
};

/// SSNMF — Python-facing wrapper for [`SSNMFModel`].
///
/// Purpose
/// -------
/// Expose model construction, the three training procedures, and the
/// evaluation methods to Python while keeping the Rust invariants and errors.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `SSNMF(X, k, A=None, S=None, Y=None, B=None, W=None, L=None, lam=None, seed=None)`:
/// - `X`: 2-D array-like of `float64`, the m × n data matrix.
/// - `k`: `usize`, the factorization rank.
/// - `A`, `S`, `Y`, `B`, `W`, `L`: optional 2-D array-likes; missing factors
///   are drawn from Uniform[0, 1).
/// - `lam`: optional classification weight, default 1.0 when `Y` is given.
/// - `seed`: optional RNG seed for the default factors.
///
/// Notes
/// -----
/// - Training methods return `None` unless `saveerrs=True`; otherwise a list
///   of numpy arrays (`[errs]` for `mult`, four arrays for the supervised
///   procedures).
/// - `unsendable`: the model is mutated in place by training and is meant to
///   be driven from the thread that created it.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_ssnmf", unsendable)]
pub struct SSNMF {
    /// Underlying Rust model.
    pub inner: SSNMFModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SSNMF {
    #[new]
    #[pyo3(
        signature = (X, k, A = None, S = None, Y = None, B = None, W = None, L = None, lam = None, seed = None),
        text_signature = "(X, k, /, A=None, S=None, Y=None, B=None, W=None, L=None, lam=None, seed=None)"
    )]
    #[allow(non_snake_case, clippy::too_many_arguments)]
    pub fn new<'py>(
        X: &Bound<'py, PyAny>, k: usize, A: Option<&Bound<'py, PyAny>>,
        S: Option<&Bound<'py, PyAny>>, Y: Option<&Bound<'py, PyAny>>,
        B: Option<&Bound<'py, PyAny>>, W: Option<&Bound<'py, PyAny>>,
        L: Option<&Bound<'py, PyAny>>, lam: Option<f64>, seed: Option<u64>,
    ) -> PyResult<SSNMF> {
        let x = extract_f64_matrix("X", X)?;
        let init = ModelInit {
            a: extract_optional_matrix("A", A)?,
            s: extract_optional_matrix("S", S)?,
            y: extract_optional_matrix("Y", Y)?,
            b: extract_optional_matrix("B", B)?,
            w: extract_optional_matrix("W", W)?,
            l: extract_optional_matrix("L", L)?,
            lam,
            random_seed: seed,
        };
        let inner = SSNMFModel::new(x, k, init)?;
        Ok(SSNMF { inner })
    }

    /// Unsupervised multiplicative updates for ‖X − AS‖²_F.
    ///
    /// Returns `[errs]`, the per-iteration reconstruction errors, when
    /// `saveerrs=True`.
    #[pyo3(signature = (numiters = DEFAULT_NUMITERS, saveerrs = false, eps = DEFAULT_EPS))]
    pub fn mult<'py>(
        &mut self, py: Python<'py>, numiters: usize, saveerrs: bool, eps: f64,
    ) -> PyResult<Option<Bound<'py, PyList>>> {
        let trace = self.inner.mult(&TrainOptions::new(numiters, saveerrs, eps))?;
        trace.map(|t| reconstruction_trace_to_list(py, t)).transpose()
    }

    /// Frobenius (semi-)supervised updates for ‖X − AS‖²_F + λ‖Y − BS‖²_F.
    ///
    /// Returns `[errs, reconerrs, classerrs, classaccs]` when `saveerrs=True`.
    #[pyo3(signature = (numiters = DEFAULT_NUMITERS, saveerrs = false, eps = DEFAULT_EPS))]
    pub fn snmfmult<'py>(
        &mut self, py: Python<'py>, numiters: usize, saveerrs: bool, eps: f64,
    ) -> PyResult<Option<Bound<'py, PyList>>> {
        let trace = self.inner.snmfmult(&TrainOptions::new(numiters, saveerrs, eps))?;
        trace.map(|t| supervised_trace_to_list(py, t)).transpose()
    }

    /// I-divergence (semi-)supervised updates for ‖X − AS‖²_F + λ·D(Y‖BS).
    ///
    /// Returns `[errs, reconerrs, classerrs, classaccs]` when `saveerrs=True`.
    #[pyo3(signature = (numiters = DEFAULT_NUMITERS, saveerrs = false, eps = DEFAULT_EPS))]
    pub fn klsnmfmult<'py>(
        &mut self, py: Python<'py>, numiters: usize, saveerrs: bool, eps: f64,
    ) -> PyResult<Option<Bound<'py, PyList>>> {
        let trace = self.inner.klsnmfmult(&TrainOptions::new(numiters, saveerrs, eps))?;
        trace.map(|t| supervised_trace_to_list(py, t)).transpose()
    }

    /// Fraction of correctly classified data points.
    pub fn accuracy(&self) -> PyResult<f64> {
        Ok(self.inner.accuracy()?)
    }

    /// ε-smoothed I-divergence between Y and BS.
    #[pyo3(signature = (eps = DEFAULT_EPS))]
    pub fn kldiv(&self, eps: f64) -> PyResult<f64> {
        Ok(self.inner.kldiv(Some(eps))?)
    }

    #[getter]
    pub fn k(&self) -> usize {
        self.inner.shape().k
    }

    #[getter]
    pub fn lam(&self) -> Option<f64> {
        self.inner.lam()
    }

    #[getter(X)]
    pub fn x<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.x().to_owned().into_pyarray(py)
    }

    #[getter(A)]
    pub fn a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.a().to_owned().into_pyarray(py)
    }

    #[getter(S)]
    pub fn s<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.s().to_owned().into_pyarray(py)
    }

    #[getter(Y)]
    pub fn y<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.y().map(|y| y.to_owned().into_pyarray(py))
    }

    #[getter(B)]
    pub fn b<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.b().map(|b| b.to_owned().into_pyarray(py))
    }

    #[getter(W)]
    pub fn w<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.w().map(|w| w.to_owned().into_pyarray(py))
    }

    #[getter(L)]
    pub fn l<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.l().map(|l| l.to_owned().into_pyarray(py))
    }
}

/// _rust_ssnmf — PyO3 module initializer for the Python extension.
///
/// Registers the [`SSNMF`] class. Invoked by Python when importing the
/// compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_ssnmf<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<SSNMF>()?;
    Ok(())
}
