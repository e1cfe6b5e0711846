//! SSNMF model: construction, multiplicative-update training and evaluation.
//!
//! The model owns every matrix of the objective and is trained in place:
//! each training call continues from the current A, S (and B), so repeated
//! calls extend a run instead of restarting it.
//!
//! Objectives:
//! - `mult`:        ‖X − AS‖²_F
//! - `snmfmult`:    ‖X − AS‖²_F + λ‖Y − BS‖²_F
//! - `klsnmfmult`:  ‖X − AS‖²_F + λ·D(Y‖BS)
//!
//! each optionally masked by W (missing data) and/or L (missing labels).
//! Every iteration updates A, then B (when supervised), then S, always
//! using the freshest value of the other factors.
use crate::{
    numerical_stability::DEFAULT_EPS,
    ssnmf::{
        core::{
            evaluation::{classification_accuracy, kl_divergence, masked_residual},
            init::{factor_rng, uniform_factor},
            mask_case::MaskCase,
            options::{DEFAULT_LAM, ModelInit, TrainOptions},
            shape::SSNMFShape,
            trace::{ReconstructionTrace, SupervisedTrace},
            updates::{
                update_classifier_divergence, update_left_factor, update_shared_factor,
                update_shared_factor_divergence, update_shared_factor_frobenius,
            },
            validation::{
                validate_data_mask, validate_factors, validate_label_mask, validate_supervision,
            },
        },
        errors::{SSNMFError, SSNMFResult},
    },
};
use log::{debug, info};
use ndarray::{Array2, ArrayView2};

/// Label-side state of a (semi-)supervised model.
///
/// Exists only when a label matrix was supplied, which ties B, λ and L to
/// the presence of Y at the type level.
#[derive(Debug, Clone, PartialEq)]
pub struct Supervision {
    /// Label matrix, p × n. Never modified.
    y: Array2<f64>,
    /// Classifier, p × k. Updated in place by training.
    b: Array2<f64>,
    /// Classification weight.
    lam: f64,
    /// Optional label observation mask, p × n.
    l: Option<Array2<f64>>,
}

/// (Semi-)supervised NMF model trained by multiplicative updates.
///
/// Fields
/// ------
/// - `shape`: validated (m, n, k, p) dimensions.
/// - `x`: data matrix, m × n; never modified.
/// - `a`: left factor, m × k; updated in place.
/// - `s`: shared right factor, k × n; updated in place.
/// - `supervision`: labels, classifier, λ and label mask when supervised.
/// - `w`: optional data observation mask, m × n.
///
/// Invariants
/// ----------
/// - All shape invariants hold from construction onward; training only
///   overwrites entries.
/// - Given non-negative inputs and initial factors, A, S and B stay
///   non-negative. Entry values are never validated.
///
/// Notes
/// -----
/// - Training takes `&mut self`, so one instance cannot be trained from two
///   places at once.
#[derive(Debug, Clone, PartialEq)]
pub struct SSNMFModel {
    shape: SSNMFShape,
    x: Array2<f64>,
    a: Array2<f64>,
    s: Array2<f64>,
    supervision: Option<Supervision>,
    w: Option<Array2<f64>>,
}

impl SSNMFModel {
    /// Build a model for data `x` (m × n) with rank `k`.
    ///
    /// ## Behavior
    /// 1. Take A and S from `init`, drawing Uniform[0, 1) entries for any
    ///    factor not supplied (seeded by `init.random_seed` when set).
    /// 2. If `init.y` is set, take B (random when absent) and λ
    ///    (default 1.0); otherwise ignore any supplied B and λ.
    /// 3. Validate every shape invariant in the order A rows, S cols, A cols,
    ///    S rows, Y cols, B rows, B cols, W rows, W cols, L rows, L cols.
    ///
    /// ## Errors
    /// - [`SSNMFError::DimensionMismatch`] naming the first pair of matrices
    ///   (or matrix and rank) that disagree and the axis. An L supplied
    ///   without Y is reported against an empty Y.
    pub fn new(x: Array2<f64>, k: usize, init: ModelInit) -> SSNMFResult<SSNMFModel> {
        let (m, n) = x.dim();
        let ModelInit { a, s, y, b, w, l, lam, random_seed } = init;
        let mut rng = factor_rng(random_seed);

        let a = a.unwrap_or_else(|| uniform_factor(m, k, &mut rng));
        let s = s.unwrap_or_else(|| uniform_factor(k, n, &mut rng));
        validate_factors(&x, k, &a, &s)?;

        let labelled = match y {
            Some(y) => {
                let b = b.unwrap_or_else(|| uniform_factor(y.nrows(), k, &mut rng));
                validate_supervision(&x, k, &y, &b)?;
                Some((y, b, lam.unwrap_or(DEFAULT_LAM)))
            }
            None => None,
        };

        if let Some(w) = &w {
            validate_data_mask(&x, w)?;
        }
        if let Some(l) = &l {
            validate_label_mask(labelled.as_ref().map(|(y, _, _)| y), l)?;
        }

        let p = labelled.as_ref().map(|(y, _, _)| y.nrows());
        let supervision = labelled.map(|(y, b, lam)| Supervision { y, b, lam, l });

        Ok(SSNMFModel { shape: SSNMFShape::new(m, n, k, p), x, a, s, supervision, w })
    }

    /// Train the unsupervised model ‖X − AS‖²_F for `opts.numiters` rounds.
    ///
    /// ## Behavior
    /// - Each round: `A ← A/(ε + [W⊙](AS)Sᵗ) ⊙ ([W⊙]X Sᵗ)`, then
    ///   `S ← S/(ε + Aᵗ[W⊙](AS)) ⊙ (Aᵗ[W⊙]X)`.
    /// - Labels, if any, are ignored.
    ///
    /// ## Returns
    /// - `Some(ReconstructionTrace)` when `opts.saveerrs`, `None` otherwise.
    pub fn mult(&mut self, opts: &TrainOptions) -> SSNMFResult<Option<ReconstructionTrace>> {
        let case = MaskCase::from_masks(self.w.is_some(), false);
        let branch = case.describe(false);
        debug!("NMF: {} iterations, {branch}", opts.numiters);

        let SSNMFModel { x, a, s, w, .. } = self;
        let x = x.view();
        let w = w.as_ref().map(|w| w.view());
        let mut trace = opts.saveerrs.then(|| ReconstructionTrace::with_len(opts.numiters));

        for i in 0..opts.numiters {
            update_left_factor(a, s.view(), x, w, opts.eps);
            update_shared_factor(s, a.view(), x, w, opts.eps);

            if let Some(trace) = trace.as_mut() {
                trace.recon_errs[i] = masked_residual(x, a.view(), s.view(), w);
            }
        }

        info!("Completed NMF for {branch}.");
        Ok(trace)
    }

    /// Train the Frobenius (semi-)supervised model
    /// ‖X − AS‖²_F + λ‖Y − BS‖²_F for `opts.numiters` rounds.
    ///
    /// ## Behavior
    /// - Each round: A as in [`SSNMFModel::mult`]; then
    ///   `B ← B/(ε + [L⊙](BS)Sᵗ) ⊙ ([L⊙]Y Sᵗ)`; then
    ///   `S ← S/(ε + Aᵗ[W⊙](AS) + λBᵗ[L⊙](BS)) ⊙ (Aᵗ[W⊙]X + λBᵗ[L⊙]Y)`.
    ///
    /// ## Returns
    /// - `Some(SupervisedTrace)` with `class_errs = ‖[L⊙]Y − [L⊙]BS‖_F` and
    ///   `errs = recon² + λ·class²` when `opts.saveerrs`, `None` otherwise.
    ///
    /// ## Errors
    /// - [`SSNMFError::MissingSupervision`] if the model has no labels; no
    ///   factor is touched in that case.
    pub fn snmfmult(&mut self, opts: &TrainOptions) -> SSNMFResult<Option<SupervisedTrace>> {
        let case = self.mask_case();
        let SSNMFModel { x, a, s, supervision, w, .. } = self;
        let Supervision { y, b, lam, l } =
            supervision.as_mut().ok_or(SSNMFError::MissingSupervision { operation: "snmfmult" })?;
        let branch = case.describe(true);
        debug!("SSNMF: {} iterations, {branch}", opts.numiters);

        let (x, y, lam) = (x.view(), y.view(), *lam);
        let w = w.as_ref().map(|w| w.view());
        let l = l.as_ref().map(|l| l.view());
        let mut trace = opts.saveerrs.then(|| SupervisedTrace::with_len(opts.numiters));

        for i in 0..opts.numiters {
            update_left_factor(a, s.view(), x, w, opts.eps);
            update_left_factor(b, s.view(), y, l, opts.eps);
            update_shared_factor_frobenius(s, a.view(), x, b.view(), y, lam, w, l, opts.eps);

            if let Some(trace) = trace.as_mut() {
                let recon = masked_residual(x, a.view(), s.view(), w);
                let class = masked_residual(y, b.view(), s.view(), l);
                let acc = classification_accuracy(y, b.view(), s.view(), l);
                trace.record(i, recon * recon + lam * class * class, recon, class, acc);
            }
        }

        info!("Completed SSNMF for {branch}.");
        Ok(trace)
    }

    /// Train the I-divergence (semi-)supervised model
    /// ‖X − AS‖²_F + λ·D(Y‖BS) for `opts.numiters` rounds.
    ///
    /// ## Behavior
    /// - Each round: A as in [`SSNMFModel::mult`]; then
    ///   `B ← B/(ε + ΛSᵗ) ⊙ (Q Sᵗ)`; then
    ///   `S ← S/(ε + 2Aᵗ[W⊙](AS) + λBᵗΛ) ⊙ (2Aᵗ[W⊙]X + λBᵗQ)`,
    ///   where `Λ = 𝟙, Q = Y/(ε + BS)` without L and
    ///   `Λ = L, Q = (L⊙Y)/(ε + L⊙(BS))` with L.
    ///
    /// ## Returns
    /// - `Some(SupervisedTrace)` with `class_errs = D(Y‖BS)` (evaluated with
    ///   the default ε) and `errs = recon² + λ·class` when `opts.saveerrs`,
    ///   `None` otherwise.
    ///
    /// ## Errors
    /// - [`SSNMFError::MissingSupervision`] if the model has no labels.
    pub fn klsnmfmult(&mut self, opts: &TrainOptions) -> SSNMFResult<Option<SupervisedTrace>> {
        let case = self.mask_case();
        let SSNMFModel { x, a, s, supervision, w, .. } = self;
        let Supervision { y, b, lam, l } = supervision
            .as_mut()
            .ok_or(SSNMFError::MissingSupervision { operation: "klsnmfmult" })?;
        let branch = case.describe(true);
        debug!("I-SSNMF: {} iterations, {branch}", opts.numiters);

        let (x, y, lam) = (x.view(), y.view(), *lam);
        let w = w.as_ref().map(|w| w.view());
        let l = l.as_ref().map(|l| l.view());
        let mut trace = opts.saveerrs.then(|| SupervisedTrace::with_len(opts.numiters));

        for i in 0..opts.numiters {
            update_left_factor(a, s.view(), x, w, opts.eps);
            update_classifier_divergence(b, s.view(), y, l, opts.eps);
            update_shared_factor_divergence(s, a.view(), x, b.view(), y, lam, w, l, opts.eps);

            if let Some(trace) = trace.as_mut() {
                let recon = masked_residual(x, a.view(), s.view(), w);
                let class = kl_divergence(y, b.view(), s.view(), l, DEFAULT_EPS);
                let acc = classification_accuracy(y, b.view(), s.view(), l);
                trace.record(i, recon * recon + lam * class, recon, class, acc);
            }
        }

        info!("Completed I-SSNMF for {branch}.");
        Ok(trace)
    }

    /// Fraction of correctly classified data points, computed from Y, B, S
    /// (and L when set).
    ///
    /// ## Errors
    /// - [`SSNMFError::MissingSupervision`] if the model has no labels.
    pub fn accuracy(&self) -> SSNMFResult<f64> {
        let sup = self.supervision("accuracy")?;
        Ok(classification_accuracy(sup.y.view(), sup.b.view(), self.s.view(), sup.l_view()))
    }

    /// I-divergence D(Y‖BS) (with L⊙Y and L⊙BS when L is set), smoothed by
    /// `eps` (default [`DEFAULT_EPS`]).
    ///
    /// ## Errors
    /// - [`SSNMFError::MissingSupervision`] if the model has no labels.
    pub fn kldiv(&self, eps: Option<f64>) -> SSNMFResult<f64> {
        let sup = self.supervision("kldiv")?;
        let eps = eps.unwrap_or(DEFAULT_EPS);
        Ok(kl_divergence(sup.y.view(), sup.b.view(), self.s.view(), sup.l_view(), eps))
    }

    /// Current reconstruction error `‖[W⊙]X − [W⊙]AS‖_F`.
    pub fn reconstruction_error(&self) -> f64 {
        masked_residual(self.x.view(), self.a.view(), self.s.view(), self.w())
    }

    /// Current Frobenius classification error `‖[L⊙]Y − [L⊙]BS‖_F`.
    ///
    /// ## Errors
    /// - [`SSNMFError::MissingSupervision`] if the model has no labels.
    pub fn classification_error(&self) -> SSNMFResult<f64> {
        let sup = self.supervision("classification_error")?;
        Ok(masked_residual(sup.y.view(), sup.b.view(), self.s.view(), sup.l_view()))
    }

    /// Masking branch a supervised training call takes on this model.
    pub fn mask_case(&self) -> MaskCase {
        let has_l = self.supervision.as_ref().is_some_and(|sup| sup.l.is_some());
        MaskCase::from_masks(self.w.is_some(), has_l)
    }

    pub fn shape(&self) -> SSNMFShape {
        self.shape
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn a(&self) -> ArrayView2<'_, f64> {
        self.a.view()
    }

    pub fn s(&self) -> ArrayView2<'_, f64> {
        self.s.view()
    }

    pub fn w(&self) -> Option<ArrayView2<'_, f64>> {
        self.w.as_ref().map(|w| w.view())
    }

    pub fn y(&self) -> Option<ArrayView2<'_, f64>> {
        self.supervision.as_ref().map(|sup| sup.y.view())
    }

    pub fn b(&self) -> Option<ArrayView2<'_, f64>> {
        self.supervision.as_ref().map(|sup| sup.b.view())
    }

    pub fn l(&self) -> Option<ArrayView2<'_, f64>> {
        self.supervision.as_ref().and_then(|sup| sup.l_view())
    }

    /// Classification weight λ; `None` for unsupervised models.
    pub fn lam(&self) -> Option<f64> {
        self.supervision.as_ref().map(|sup| sup.lam)
    }

    // ---- Helper Methods ----

    fn supervision(&self, operation: &'static str) -> SSNMFResult<&Supervision> {
        self.supervision.as_ref().ok_or(SSNMFError::MissingSupervision { operation })
    }
}

impl Supervision {
    fn l_view(&self) -> Option<ArrayView2<'_, f64>> {
        self.l.as_ref().map(|l| l.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssnmf::errors::{Factor, MatrixAxis};
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Construction (defaults, ignored inputs, mismatch reporting), the
    // supervision gate, the golden `mult` iteration, trace shapes, continued
    // training, and non-negativity across every branch of every objective.
    // Convergence behavior on synthetic data lives in the integration tests.
    // -------------------------------------------------------------------------

    fn data() -> Array2<f64> {
        array![
            [1.0, 0.2, 0.0, 0.7, 0.3],
            [0.1, 1.3, 0.4, 0.0, 0.9],
            [0.6, 0.0, 1.1, 0.5, 0.2],
            [0.3, 0.8, 0.2, 1.0, 0.0],
        ]
    }

    fn labels() -> Array2<f64> {
        array![[1.0, 0.0, 1.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0, 0.0]]
    }

    fn data_mask() -> Array2<f64> {
        array![
            [1.0, 1.0, 0.0, 1.0, 1.0],
            [1.0, 0.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0, 1.0, 1.0],
        ]
    }

    fn label_mask() -> Array2<f64> {
        array![[1.0, 1.0, 0.0, 1.0, 0.0], [1.0, 1.0, 0.0, 1.0, 0.0]]
    }

    fn all_nonnegative(m: ArrayView2<'_, f64>) -> bool {
        m.iter().all(|&v| v >= 0.0)
    }

    #[test]
    // Purpose
    // -------
    // Default construction draws factors of the right shapes and leaves the
    // model unsupervised.
    //
    // Given
    // -----
    // - X 4×5, k = 3, empty `ModelInit`.
    //
    // Expect
    // ------
    // - A 4×3, S 3×5; no Y, B, λ, W, L.
    fn new_with_defaults_builds_unsupervised_model() {
        let model = SSNMFModel::new(data(), 3, ModelInit::new().with_seed(1)).unwrap();

        assert_eq!(model.a().dim(), (4, 3));
        assert_eq!(model.s().dim(), (3, 5));
        assert_eq!(model.shape(), SSNMFShape::new(4, 5, 3, None));
        assert!(model.y().is_none() && model.b().is_none() && model.lam().is_none());
        assert!(model.w().is_none() && model.l().is_none());
        assert!(all_nonnegative(model.a()) && all_nonnegative(model.s()));
    }

    #[test]
    // Purpose
    // -------
    // Supplying labels draws B with p rows and defaults λ to 1.
    //
    // Given
    // -----
    // - X 4×5, Y 2×5, k = 3.
    //
    // Expect
    // ------
    // - B 2×3, λ = 1, p = 2.
    fn new_with_labels_draws_classifier_and_defaults_lam() {
        let model =
            SSNMFModel::new(data(), 3, ModelInit::new().with_labels(labels()).with_seed(2))
                .unwrap();
        assert_eq!(model.b().unwrap().dim(), (2, 3));
        assert_eq!(model.lam(), Some(1.0));
        assert_eq!(model.shape().p, Some(2));
        assert!(model.shape().is_supervised());
    }

    #[test]
    fn new_ignores_classifier_and_lam_without_labels() {
        let init = ModelInit::new().with_b(Array2::ones((7, 7))).with_lam(0.3);
        let model = SSNMFModel::new(data(), 3, init).unwrap();
        assert!(model.b().is_none());
        assert!(model.lam().is_none());
    }

    #[test]
    fn seeded_construction_is_reproducible() {
        let m1 = SSNMFModel::new(data(), 2, ModelInit::new().with_seed(9)).unwrap();
        let m2 = SSNMFModel::new(data(), 2, ModelInit::new().with_seed(9)).unwrap();
        assert_eq!(m1, m2);
    }

    #[test]
    // Purpose
    // -------
    // A with the wrong row count is rejected before anything else.
    //
    // Given
    // -----
    // - X 4×5, k = 3, A 3×3.
    //
    // Expect
    // ------
    // - DimensionMismatch { A, X, Rows, 3, 4 }.
    fn new_rejects_left_factor_row_mismatch() {
        let x = Array2::<f64>::ones((4, 5));
        let init = ModelInit::new().with_a(Array2::ones((3, 3)));
        assert_eq!(
            SSNMFModel::new(x, 3, init),
            Err(SSNMFError::DimensionMismatch {
                left: Factor::A,
                right: Factor::X,
                axis: MatrixAxis::Rows,
                left_dim: 3,
                right_dim: 4,
            })
        );
    }

    #[test]
    // Purpose
    // -------
    // Y with a different column count than X is rejected.
    //
    // Given
    // -----
    // - X 4×5, k = 3, Y 2×6.
    //
    // Expect
    // ------
    // - DimensionMismatch { Y, X, Cols, 6, 5 }.
    fn new_rejects_label_column_mismatch() {
        let x = Array2::<f64>::ones((4, 5));
        let init = ModelInit::new().with_labels(Array2::ones((2, 6)));
        assert_eq!(
            SSNMFModel::new(x, 3, init),
            Err(SSNMFError::DimensionMismatch {
                left: Factor::Y,
                right: Factor::X,
                axis: MatrixAxis::Cols,
                left_dim: 6,
                right_dim: 5,
            })
        );
    }

    #[test]
    fn new_rejects_masks_with_wrong_shapes_and_orphan_label_mask() {
        let bad_w = ModelInit::new().with_data_mask(Array2::ones((4, 4)));
        match SSNMFModel::new(data(), 3, bad_w) {
            Err(SSNMFError::DimensionMismatch { left: Factor::W, axis: MatrixAxis::Cols, .. }) => {}
            other => panic!("expected W column mismatch, got {other:?}"),
        }

        let bad_l =
            ModelInit::new().with_labels(labels()).with_label_mask(Array2::ones((3, 5)));
        match SSNMFModel::new(data(), 3, bad_l) {
            Err(SSNMFError::DimensionMismatch { left: Factor::L, axis: MatrixAxis::Rows, .. }) => {}
            other => panic!("expected L row mismatch, got {other:?}"),
        }

        let orphan_l = ModelInit::new().with_label_mask(label_mask());
        match SSNMFModel::new(data(), 3, orphan_l) {
            Err(SSNMFError::DimensionMismatch { left: Factor::L, right: Factor::Y, .. }) => {}
            other => panic!("expected L/Y mismatch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Every supervised routine refuses to run without labels and leaves the
    // factors untouched.
    //
    // Given
    // -----
    // - An unsupervised model.
    //
    // Expect
    // ------
    // - `MissingSupervision` from snmfmult, klsnmfmult, accuracy, kldiv and
    //   classification_error; A and S unchanged.
    fn supervised_routines_require_labels() {
        let mut model = SSNMFModel::new(data(), 2, ModelInit::new().with_seed(3)).unwrap();
        let before = model.clone();
        let opts = TrainOptions::default().with_numiters(3);

        assert!(matches!(
            model.snmfmult(&opts),
            Err(SSNMFError::MissingSupervision { operation: "snmfmult" })
        ));
        assert!(matches!(
            model.klsnmfmult(&opts),
            Err(SSNMFError::MissingSupervision { operation: "klsnmfmult" })
        ));
        assert!(matches!(model.accuracy(), Err(SSNMFError::MissingSupervision { .. })));
        assert!(matches!(model.kldiv(None), Err(SSNMFError::MissingSupervision { .. })));
        assert!(matches!(
            model.classification_error(),
            Err(SSNMFError::MissingSupervision { .. })
        ));
        assert_eq!(model, before);
    }

    #[test]
    // Purpose
    // -------
    // One `mult` iteration reproduces the closed-form rank-1 update.
    //
    // Given
    // -----
    // - X = [[1, 2], [3, 4]], k = 1, A = [[1], [1]], S = [[1, 1]], ε = 1e-10.
    //
    // Expect
    // ------
    // - A = [[1.5], [3.5]], S = [[12/14.5, 17/14.5]].
    fn mult_single_iteration_matches_golden_values() {
        // Arrange
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let init = ModelInit::new().with_a(array![[1.0], [1.0]]).with_s(array![[1.0, 1.0]]);
        let mut model = SSNMFModel::new(x, 1, init).unwrap();

        // Act
        let out = model.mult(&TrainOptions::new(1, false, 1e-10)).unwrap();

        // Assert
        assert!(out.is_none());
        let eps = 1e-10;
        assert_relative_eq!(model.a()[[0, 0]], 3.0 / (eps + 2.0), max_relative = 1e-12);
        assert_relative_eq!(model.a()[[1, 0]], 7.0 / (eps + 2.0), max_relative = 1e-12);
        assert_relative_eq!(model.s()[[0, 0]], 12.0 / 14.5, max_relative = 1e-9);
        assert_relative_eq!(model.s()[[0, 1]], 17.0 / 14.5, max_relative = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Traces have length `numiters` and their last entry describes the
    // final state.
    //
    // Given
    // -----
    // - A supervised model trained 7 iterations with saveerrs on.
    //
    // Expect
    // ------
    // - All four sequences have length 7; the last entries equal the
    //   model's current metrics; errs = recon² + λ·class².
    fn snmfmult_trace_is_presized_and_ends_at_current_state() {
        let init = ModelInit::new().with_labels(labels()).with_lam(0.5).with_seed(4);
        let mut model = SSNMFModel::new(data(), 2, init).unwrap();

        let trace = model.snmfmult(&TrainOptions::default().with_numiters(7).with_saveerrs(true));
        let trace = trace.unwrap().expect("saveerrs should produce a trace");

        assert_eq!(trace.len(), 7);
        assert_eq!(trace.recon_errs.len(), 7);
        assert_eq!(trace.class_errs.len(), 7);
        assert_eq!(trace.class_accs.len(), 7);
        let recon = model.reconstruction_error();
        let class = model.classification_error().unwrap();
        assert_relative_eq!(trace.recon_errs[6], recon, max_relative = 1e-12);
        assert_relative_eq!(trace.class_errs[6], class, max_relative = 1e-12);
        assert_relative_eq!(trace.errs[6], recon * recon + 0.5 * class * class, max_relative = 1e-12);
        assert_relative_eq!(trace.class_accs[6], model.accuracy().unwrap());
    }

    #[test]
    fn klsnmfmult_trace_uses_divergence_for_class_error() {
        let init = ModelInit::new().with_labels(labels()).with_lam(2.0).with_seed(5);
        let mut model = SSNMFModel::new(data(), 2, init).unwrap();

        let trace = model
            .klsnmfmult(&TrainOptions::default().with_numiters(4).with_saveerrs(true))
            .unwrap()
            .unwrap();

        let recon = model.reconstruction_error();
        let div = model.kldiv(None).unwrap();
        assert_relative_eq!(trace.class_errs[3], div, max_relative = 1e-12);
        assert_relative_eq!(trace.errs[3], recon * recon + 2.0 * div, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Training continues from the current factors: two calls of one
    // iteration equal one call of two iterations.
    //
    // Given
    // -----
    // - Two identically seeded supervised models with W and L.
    //
    // Expect
    // ------
    // - Identical A, S, B after 1 + 1 vs 2 iterations of `snmfmult`.
    fn repeated_calls_continue_training() {
        let init = ModelInit::new()
            .with_labels(labels())
            .with_data_mask(data_mask())
            .with_label_mask(label_mask())
            .with_seed(6);
        let mut split = SSNMFModel::new(data(), 2, init.clone()).unwrap();
        let mut joint = SSNMFModel::new(data(), 2, init).unwrap();

        let one = TrainOptions::default().with_numiters(1);
        split.snmfmult(&one).unwrap();
        split.snmfmult(&one).unwrap();
        joint.snmfmult(&one.with_numiters(2)).unwrap();

        assert_eq!(split, joint);
    }

    #[test]
    fn mult_ignores_labels() {
        let base = ModelInit::new().with_seed(8);
        let mut plain = SSNMFModel::new(data(), 2, base.clone()).unwrap();
        // Same seed: A and S are drawn before B, so they coincide.
        let mut labelled = SSNMFModel::new(data(), 2, base.with_labels(labels())).unwrap();
        let b_before = labelled.b().unwrap().to_owned();

        let opts = TrainOptions::default().with_numiters(5);
        plain.mult(&opts).unwrap();
        labelled.mult(&opts).unwrap();

        assert_eq!(plain.a(), labelled.a());
        assert_eq!(plain.s(), labelled.s());
        assert_eq!(labelled.b().unwrap(), b_before.view());
    }

    #[test]
    fn zero_iterations_leave_state_and_yield_empty_trace() {
        let mut model = SSNMFModel::new(data(), 2, ModelInit::new().with_seed(10)).unwrap();
        let before = model.clone();
        let trace = model.mult(&TrainOptions::new(0, true, 1e-10)).unwrap().unwrap();
        assert!(trace.is_empty());
        assert_eq!(model, before);
    }

    #[test]
    // Purpose
    // -------
    // Every objective under every masking branch keeps A, S, B
    // non-negative and finite.
    //
    // Given
    // -----
    // - The four (W, L) combinations, each trained 25 iterations with
    //   `mult`, `snmfmult` and `klsnmfmult`.
    //
    // Expect
    // ------
    // - All entries ≥ 0 and finite; `mask_case` reports the branch.
    fn all_branches_preserve_nonnegativity() {
        let opts = TrainOptions::default().with_numiters(25);
        for (has_w, has_l) in [(false, false), (true, false), (false, true), (true, true)] {
            let mut init = ModelInit::new().with_labels(labels()).with_seed(12);
            if has_w {
                init = init.with_data_mask(data_mask());
            }
            if has_l {
                init = init.with_label_mask(label_mask());
            }
            let mut model = SSNMFModel::new(data(), 2, init).unwrap();
            assert_eq!(model.mask_case(), MaskCase::from_masks(has_w, has_l));

            model.mult(&opts).unwrap();
            model.snmfmult(&opts).unwrap();
            model.klsnmfmult(&opts).unwrap();

            for m in [model.a(), model.s(), model.b().unwrap()] {
                assert!(all_nonnegative(m), "negative entry for (W={has_w}, L={has_l})");
                assert!(m.iter().all(|v| v.is_finite()), "non-finite for (W={has_w}, L={has_l})");
            }
            let acc = model.accuracy().unwrap();
            assert!((0.0..=1.0).contains(&acc));
            assert!(model.kldiv(None).unwrap() >= -1e-8);
        }
    }
}
