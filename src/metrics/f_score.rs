//! F-score calculation.

use crate::metrics::precision_recall::calculate_precision_recall;
use crate::types::MatchCounts;

/// Calculate the F-score (harmonic mean) of precision and recall.
///
/// F = 2 × (Precision × Recall) / (Precision + Recall)
///
/// Returns 0.0 if both precision and recall are 0.
///
/// # Example
///
/// ```
/// use detection_eval::metrics::f_score::calculate_f_score;
///
/// let f = calculate_f_score(0.8, 0.6);
/// assert!((f - 0.6857).abs() < 0.001);
/// ```
pub fn calculate_f_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }

    2.0 * (precision * recall) / (precision + recall)
}

/// Calculate the F-score directly from TP, FP, and FN counts.
pub fn calculate_f_score_from_counts(counts: MatchCounts) -> f64 {
    let pr = calculate_precision_recall(counts);
    calculate_f_score(pr.precision, pr.recall)
}
