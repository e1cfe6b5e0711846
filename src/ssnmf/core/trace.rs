//! Per-iteration training diagnostics.
//!
//! Training procedures return `Option<Trace>`: `None` when `saveerrs` is
//! off, otherwise a trace whose sequences are pre-sized to `numiters` and
//! filled by index, so that entry `i` holds the metric *after* iteration
//! `i`'s updates.
use ndarray::Array1;

/// Diagnostics of the unsupervised objective ‖X − AS‖²_F.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionTrace {
    /// `‖[W⊙]X − [W⊙]AS‖_F` per iteration.
    pub recon_errs: Array1<f64>,
}

impl ReconstructionTrace {
    /// Zero-filled trace for `numiters` iterations.
    pub fn with_len(numiters: usize) -> ReconstructionTrace {
        ReconstructionTrace { recon_errs: Array1::zeros(numiters) }
    }

    pub fn len(&self) -> usize {
        self.recon_errs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recon_errs.is_empty()
    }

    /// Sequences in reporting order: `[errs]`.
    pub fn into_sequences(self) -> Vec<Array1<f64>> {
        vec![self.recon_errs]
    }
}

/// Diagnostics of the (semi-)supervised objectives.
///
/// For the Frobenius objective `class_errs` holds `‖[L⊙]Y − [L⊙]BS‖_F` and
/// `errs = recon² + λ·class²`; for the I-divergence objective `class_errs`
/// holds `D(Y‖BS)` and `errs = recon² + λ·class`.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisedTrace {
    /// Combined objective value per iteration.
    pub errs: Array1<f64>,
    /// Reconstruction error per iteration.
    pub recon_errs: Array1<f64>,
    /// Classification error or divergence per iteration.
    pub class_errs: Array1<f64>,
    /// Classification accuracy per iteration.
    pub class_accs: Array1<f64>,
}

impl SupervisedTrace {
    /// Zero-filled trace for `numiters` iterations.
    pub fn with_len(numiters: usize) -> SupervisedTrace {
        SupervisedTrace {
            errs: Array1::zeros(numiters),
            recon_errs: Array1::zeros(numiters),
            class_errs: Array1::zeros(numiters),
            class_accs: Array1::zeros(numiters),
        }
    }

    pub fn len(&self) -> usize {
        self.errs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errs.is_empty()
    }

    /// Store the metrics of iteration `i`.
    pub fn record(&mut self, i: usize, err: f64, recon: f64, class: f64, acc: f64) {
        self.errs[i] = err;
        self.recon_errs[i] = recon;
        self.class_errs[i] = class;
        self.class_accs[i] = acc;
    }

    /// Sequences in reporting order: `[errs, reconerrs, classerrs, classaccs]`.
    pub fn into_sequences(self) -> Vec<Array1<f64>> {
        vec![self.errs, self.recon_errs, self.class_errs, self.class_accs]
    }
}
