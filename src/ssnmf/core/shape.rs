//! Dimensions of an SSNMF problem.
//!
//! - `m`: number of features (rows of X and A).
//! - `n`: number of data points (columns of X, S, Y).
//! - `k`: number of topics (the factorization rank).
//! - `p`: number of classes (rows of Y and B), present only when supervised.

/// Validated dimensions of a constructed model.
///
/// Built by the model after all shape checks pass; it never changes over the
/// lifetime of a model since training only overwrites entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SSNMFShape {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub p: Option<usize>,
}

impl SSNMFShape {
    /// Construct an [`SSNMFShape`] from already-validated dimensions.
    pub fn new(m: usize, n: usize, k: usize, p: Option<usize>) -> SSNMFShape {
        SSNMFShape { m, n, k, p }
    }

    /// Whether the model carries a label matrix.
    pub fn is_supervised(&self) -> bool {
        self.p.is_some()
    }
}
