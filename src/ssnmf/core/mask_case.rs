//! MaskCase — which observation masks are active for a training call.
//!
//! Purpose
//! -------
//! Name the {has W, has L} case split of the update rules. Each objective
//! has a distinct formula per case (the masks wrap the predicted and
//! observed terms at different positions); the update rules match on the
//! same four combinations, and the model reports the active one through
//! this tag and in its log messages.
//!
//! Conventions
//! -----------
//! - "Supervised" means Y is present and L is absent; "semi-supervised"
//!   means both Y and L are present.
//! - For the unsupervised objective only the W axis matters; L is ignored.

/// Active masking branch of a training procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskCase {
    /// Neither W nor L: every entry of X (and Y) participates.
    Complete,
    /// W only: missing entries of X are masked out.
    MissingData,
    /// L only: unknown labels are masked out.
    MissingLabels,
    /// Both W and L.
    MissingDataAndLabels,
}

impl MaskCase {
    /// Select the branch from mask presence.
    pub fn from_masks(has_w: bool, has_l: bool) -> MaskCase {
        match (has_w, has_l) {
            (false, false) => MaskCase::Complete,
            (true, false) => MaskCase::MissingData,
            (false, true) => MaskCase::MissingLabels,
            (true, true) => MaskCase::MissingDataAndLabels,
        }
    }

    /// Whether the reconstruction term is masked by W.
    pub fn has_data_mask(&self) -> bool {
        matches!(self, MaskCase::MissingData | MaskCase::MissingDataAndLabels)
    }

    /// Whether the classification term is masked by L.
    pub fn has_label_mask(&self) -> bool {
        matches!(self, MaskCase::MissingLabels | MaskCase::MissingDataAndLabels)
    }

    /// Human-readable branch description for completion notices.
    ///
    /// `supervised` selects between the unsupervised wording (L is
    /// irrelevant) and the (semi-)supervised wording.
    pub fn describe(&self, supervised: bool) -> &'static str {
        match (supervised, self) {
            (false, MaskCase::Complete | MaskCase::MissingLabels) => {
                "unsupervised learning without missing data"
            }
            (false, MaskCase::MissingData | MaskCase::MissingDataAndLabels) => {
                "unsupervised learning with missing data"
            }
            (true, MaskCase::Complete) => "supervised learning without missing data",
            (true, MaskCase::MissingData) => "supervised learning with missing data",
            (true, MaskCase::MissingLabels) => "semi-supervised learning without missing data",
            (true, MaskCase::MissingDataAndLabels) => "semi-supervised learning with missing data",
        }
    }
}
