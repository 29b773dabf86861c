//! Precision and Recall calculation.

use crate::types::MatchCounts;

/// Container for precision and recall values.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionRecall {
    pub precision: f64,
    pub recall: f64,
    pub counts: MatchCounts,
}

/// Calculate precision and recall from TP, FP, and FN counts.
///
/// When no true positive exists anywhere both values are 0.0, which also
/// covers the empty denominators.
///
/// # Example
///
/// ```
/// use detection_eval::metrics::precision_recall::calculate_precision_recall;
/// use detection_eval::MatchCounts;
///
/// let pr = calculate_precision_recall(MatchCounts {
///     true_positives: 8,
///     false_positives: 2,
///     false_negatives: 3,
/// });
/// assert_eq!(pr.precision, 0.8); // 8 / (8 + 2)
/// assert!((pr.recall - 0.7272).abs() < 0.001); // 8 / (8 + 3)
/// ```
pub fn calculate_precision_recall(counts: MatchCounts) -> PrecisionRecall {
    let tp = counts.true_positives;
    if tp == 0 {
        return PrecisionRecall { precision: 0.0, recall: 0.0, counts };
    }

    #[allow(clippy::cast_precision_loss)]
    let precision = tp as f64 / (tp + counts.false_positives) as f64;
    #[allow(clippy::cast_precision_loss)]
    let recall = tp as f64 / (tp + counts.false_negatives) as f64;

    debug_assert!(
        (0.0..=1.0).contains(&precision) && (0.0..=1.0).contains(&recall),
        "precision and recall must be in [0, 1], got {precision} / {recall}"
    );

    PrecisionRecall { precision, recall, counts }
}
