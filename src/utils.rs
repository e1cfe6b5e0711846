//! Conversion helpers for the PyO3 boundary.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray, // Array1 → PyArray
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyList};

#[cfg(feature = "python-bindings")]
use crate::ssnmf::core::trace::{ReconstructionTrace, SupervisedTrace};

/// Convert a Python 2-D array-like into an owned `f64` matrix.
///
/// Accepts a 2-D `float64` numpy array (any memory layout), an object with a
/// `to_numpy()` method (e.g. a pandas DataFrame), or a rectangular nested
/// sequence of floats. `name` only labels the error message.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(name: &str, raw: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method0("to_numpy") {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name} must be a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64"
        ))
    })?;
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(PyTypeError::new_err(format!("{name} must be rectangular")));
    }
    let nrows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| PyTypeError::new_err(format!("{name}: {e}")))
}

#[cfg(feature = "python-bindings")]
pub fn extract_optional_matrix<'py>(
    name: &str, raw: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<Array2<f64>>> {
    raw.filter(|obj| !obj.is_none()).map(|obj| extract_f64_matrix(name, obj)).transpose()
}

/// Convert a reconstruction trace into the one-element list `[errs]`.
#[cfg(feature = "python-bindings")]
pub fn reconstruction_trace_to_list<'py>(
    py: Python<'py>, trace: ReconstructionTrace,
) -> PyResult<Bound<'py, PyList>> {
    sequences_to_list(py, trace.into_sequences())
}

/// Convert a supervised trace into `[errs, reconerrs, classerrs, classaccs]`.
#[cfg(feature = "python-bindings")]
pub fn supervised_trace_to_list<'py>(
    py: Python<'py>, trace: SupervisedTrace,
) -> PyResult<Bound<'py, PyList>> {
    sequences_to_list(py, trace.into_sequences())
}

#[cfg(feature = "python-bindings")]
fn sequences_to_list<'py>(py: Python<'py>, seqs: Vec<Array1<f64>>) -> PyResult<Bound<'py, PyList>> {
    PyList::new(py, seqs.into_iter().map(|seq| seq.into_pyarray(py)))
}
