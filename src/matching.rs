//! Matching predictions against ground-truth labels within one frame.

use crate::types::{MatchCounts, Rectangle};
use serde::{Deserialize, Serialize};

/// IoU a prediction must reach to match a label when none is given.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// How predictions claim labels when counting true positives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Every prediction matching at least one label is a true positive,
    /// even when another prediction already matched that label.
    #[default]
    ManyToOne,
    /// Greedy one-to-one assignment: predictions ranked by confidence
    /// claim the highest-IoU label nobody has claimed yet.
    Greedy,
}

impl Rectangle {
    /// Match this rectangle against `candidates`.
    ///
    /// Element `i` is true iff `candidates[i]` is related to this rectangle
    /// (same label and overlapping) and their IoU is at least `threshold`.
    /// IoU is only computed for related candidates.
    pub fn matches(&self, candidates: &[Rectangle], threshold: f64) -> Vec<bool> {
        candidates
            .iter()
            .map(|candidate| self.related_to(candidate) && self.iou(candidate) >= threshold)
            .collect()
    }
}

/// Count TP/FP/FN for one frame.
///
/// `predictions` must already be confidence-filtered. Iteration follows the
/// order of `predictions`; the counts do not depend on it for
/// [`MatchStrategy::ManyToOne`].
pub fn match_frame(
    labels: &[Rectangle],
    predictions: &[&Rectangle],
    iou_threshold: f64,
    strategy: MatchStrategy,
) -> MatchCounts {
    match strategy {
        MatchStrategy::ManyToOne => match_many_to_one(labels, predictions, iou_threshold),
        MatchStrategy::Greedy => match_greedy(labels, predictions, iou_threshold),
    }
}

fn match_many_to_one(
    labels: &[Rectangle],
    predictions: &[&Rectangle],
    iou_threshold: f64,
) -> MatchCounts {
    let mut counts = MatchCounts::default();
    let mut label_matched = vec![false; labels.len()];

    for prediction in predictions {
        let matches = prediction.matches(labels, iou_threshold);
        if matches.iter().any(|&m| m) {
            counts.true_positives += 1;
        } else {
            counts.false_positives += 1;
        }
        for (seen, hit) in label_matched.iter_mut().zip(matches) {
            *seen |= hit;
        }
    }

    counts.false_negatives = label_matched.iter().filter(|&&m| !m).count();
    counts
}

fn match_greedy(labels: &[Rectangle], predictions: &[&Rectangle], iou_threshold: f64) -> MatchCounts {
    // Predictions without a confidence rank as certain.
    let mut order: Vec<usize> = (0..predictions.len()).collect();
    order.sort_by(|&a, &b| {
        let ca = predictions[a].confidence().unwrap_or(1.0);
        let cb = predictions[b].confidence().unwrap_or(1.0);
        cb.partial_cmp(&ca).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut counts = MatchCounts::default();
    let mut claimed = vec![false; labels.len()];

    for idx in order {
        let prediction = predictions[idx];
        let mut best: Option<(usize, f64)> = None;

        for (label_idx, label) in labels.iter().enumerate() {
            if claimed[label_idx] || !prediction.related_to(label) {
                continue;
            }
            let iou = prediction.iou(label);
            if iou >= iou_threshold && best.map_or(true, |(_, b)| iou > b) {
                best = Some((label_idx, iou));
            }
        }

        match best {
            Some((label_idx, _)) => {
                claimed[label_idx] = true;
                counts.true_positives += 1;
            }
            None => counts.false_positives += 1,
        }
    }

    counts.false_negatives = claimed.iter().filter(|&&c| !c).count();
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(tl: (f64, f64), br: (f64, f64)) -> Rectangle {
        Rectangle::new(1, "A", tl, br)
    }

    fn pred(tl: (f64, f64), br: (f64, f64), confidence: f64) -> Rectangle {
        Rectangle::with_confidence(1, "A", tl, br, confidence)
    }

    #[test]
    fn test_match_vector() {
        let subject = label((0.0, 0.0), (10.0, 10.0));
        let candidates = vec![
            label((0.0, 0.0), (10.0, 10.0)),
            label((50.0, 50.0), (60.0, 60.0)),
            Rectangle::new(1, "B", (0.0, 0.0), (10.0, 10.0)),
            label((5.0, 0.0), (15.0, 10.0)),
        ];

        // last one: IoU = 50 / 150
        assert_eq!(subject.matches(&candidates, 0.5), vec![true, false, false, false]);
        assert_eq!(subject.matches(&candidates, 0.3), vec![true, false, false, true]);
    }

    #[test]
    fn test_match_vector_empty() {
        let subject = label((0.0, 0.0), (10.0, 10.0));
        assert!(subject.matches(&[], DEFAULT_IOU_THRESHOLD).is_empty());
    }

    #[test]
    fn test_many_to_one_duplicates_are_all_true_positives() {
        let labels = vec![label((0.0, 0.0), (10.0, 10.0))];
        let p1 = pred((0.0, 0.0), (10.0, 10.0), 0.9);
        let p2 = pred((0.5, 0.5), (10.0, 10.0), 0.8);

        let counts = match_frame(&labels, &[&p1, &p2], 0.5, MatchStrategy::ManyToOne);
        assert_eq!(counts.true_positives, 2);
        assert_eq!(counts.false_positives, 0);
        assert_eq!(counts.false_negatives, 0);
    }

    #[test]
    fn test_greedy_duplicates_become_false_positives() {
        let labels = vec![label((0.0, 0.0), (10.0, 10.0))];
        let p1 = pred((0.5, 0.5), (10.0, 10.0), 0.8);
        let p2 = pred((0.0, 0.0), (10.0, 10.0), 0.9);

        let counts = match_frame(&labels, &[&p1, &p2], 0.5, MatchStrategy::Greedy);
        assert_eq!(counts.true_positives, 1);
        assert_eq!(counts.false_positives, 1);
        assert_eq!(counts.false_negatives, 0);
    }

    #[test]
    fn test_greedy_picks_best_unclaimed_label() {
        let labels = vec![label((0.0, 0.0), (10.0, 10.0)), label((2.0, 0.0), (12.0, 10.0))];
        let p1 = pred((2.0, 0.0), (12.0, 10.0), 0.9);
        let p2 = pred((0.0, 0.0), (10.0, 10.0), 0.8);

        let counts = match_frame(&labels, &[&p1, &p2], 0.5, MatchStrategy::Greedy);
        assert_eq!(counts.true_positives, 2);
        assert_eq!(counts.false_negatives, 0);
    }

    #[test]
    fn test_unmatched_labels_are_false_negatives() {
        let labels = vec![label((0.0, 0.0), (10.0, 10.0)), label((40.0, 40.0), (50.0, 50.0))];
        let p = pred((0.0, 0.0), (10.0, 10.0), 0.9);

        for strategy in [MatchStrategy::ManyToOne, MatchStrategy::Greedy] {
            let counts = match_frame(&labels, &[&p], 0.5, strategy);
            assert_eq!(counts.true_positives, 1);
            assert_eq!(counts.false_negatives, 1);
        }
    }
}
