//! SSNMF options — construction and training configuration.
//!
//! Purpose
//! -------
//! Replace keyword-style optional arguments with two explicit configuration
//! carriers whose defaults are documented in one place:
//! - [`ModelInit`]: optional initial factors, labels, masks, classification
//!   weight and RNG seed used by `SSNMFModel::new`.
//! - [`TrainOptions`]: iteration count, trace recording and denominator
//!   floor used by every training procedure.
//!
//! Invariants & assumptions
//! ------------------------
//! - Neither type validates entries; shapes are checked by the model
//!   constructor and entry values are never checked.
//! - `b` and `lam` only take effect when `y` is set; they are ignored
//!   otherwise.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the documented defaults and that builder setters
//!   store their inputs unchanged.
use crate::numerical_stability::DEFAULT_EPS;
use ndarray::Array2;

/// Default number of multiplicative-update iterations per training call.
pub const DEFAULT_NUMITERS: usize = 1000;

/// Default classification weight λ when labels are supplied.
pub const DEFAULT_LAM: f64 = 1.0;

/// ModelInit — optional inputs for model construction.
///
/// Fields
/// ------
/// - `a`: initial left factor of X (m × k); uniform random when `None`.
/// - `s`: initial right factor (k × n); uniform random when `None`.
/// - `y`: label matrix (p × n); presence enables (semi-)supervised training.
/// - `b`: initial classifier (p × k); uniform random when `None` and `y` is set.
/// - `w`: observation mask for X (m × n).
/// - `l`: observation mask for Y (p × n); requires `y`.
/// - `lam`: classification weight; [`DEFAULT_LAM`] when `None` and `y` is set.
/// - `random_seed`: seed for the uniform initialization; entropy when `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInit {
    pub a: Option<Array2<f64>>,
    pub s: Option<Array2<f64>>,
    pub y: Option<Array2<f64>>,
    pub b: Option<Array2<f64>>,
    pub w: Option<Array2<f64>>,
    pub l: Option<Array2<f64>>,
    pub lam: Option<f64>,
    pub random_seed: Option<u64>,
}

impl ModelInit {
    /// Empty configuration: every matrix defaulted, unsupervised, no masks.
    pub fn new() -> ModelInit {
        ModelInit::default()
    }

    pub fn with_a(mut self, a: Array2<f64>) -> ModelInit {
        self.a = Some(a);
        self
    }

    pub fn with_s(mut self, s: Array2<f64>) -> ModelInit {
        self.s = Some(s);
        self
    }

    /// Supply the label matrix Y, switching the model to supervised mode.
    pub fn with_labels(mut self, y: Array2<f64>) -> ModelInit {
        self.y = Some(y);
        self
    }

    pub fn with_b(mut self, b: Array2<f64>) -> ModelInit {
        self.b = Some(b);
        self
    }

    /// Supply the observation mask W for X.
    pub fn with_data_mask(mut self, w: Array2<f64>) -> ModelInit {
        self.w = Some(w);
        self
    }

    /// Supply the observation mask L for Y.
    pub fn with_label_mask(mut self, l: Array2<f64>) -> ModelInit {
        self.l = Some(l);
        self
    }

    pub fn with_lam(mut self, lam: f64) -> ModelInit {
        self.lam = Some(lam);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> ModelInit {
        self.random_seed = Some(seed);
        self
    }
}

/// TrainOptions — per-call configuration shared by all training procedures.
///
/// Fields
/// ------
/// - `numiters`: number of update rounds; [`DEFAULT_NUMITERS`]. Zero runs no
///   update and yields empty traces.
/// - `saveerrs`: record per-iteration metrics; `false` by default, in which
///   case no trace is allocated.
/// - `eps`: floor added to every update denominator; [`DEFAULT_EPS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOptions {
    pub numiters: usize,
    pub saveerrs: bool,
    pub eps: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions { numiters: DEFAULT_NUMITERS, saveerrs: false, eps: DEFAULT_EPS }
    }
}

impl TrainOptions {
    pub fn new(numiters: usize, saveerrs: bool, eps: f64) -> TrainOptions {
        TrainOptions { numiters, saveerrs, eps }
    }

    pub fn with_numiters(mut self, numiters: usize) -> TrainOptions {
        self.numiters = numiters;
        self
    }

    pub fn with_saveerrs(mut self, saveerrs: bool) -> TrainOptions {
        self.saveerrs = saveerrs;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> TrainOptions {
        self.eps = eps;
        self
    }
}
