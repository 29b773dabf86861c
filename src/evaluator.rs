//! Precision / recall / F-score aggregation over frame-grouped detections.

use crate::config::MetricsConfig;
use crate::error::{DetectionEvalError, Result};
use crate::frames::{BoxInput, FrameCollection};
use crate::matching::match_frame;
use crate::metrics::f_score::calculate_f_score;
use crate::metrics::precision_recall::calculate_precision_recall;
use crate::records::collection_from_rows;
use crate::types::{DetectionMetrics, MatchCounts, Rectangle};
use log::debug;

/// Evaluate predictions against labels at one confidence/IoU threshold pair.
///
/// Iteration is driven by the labelled frames. A labelled frame with no
/// predictions turns every label into a false negative. Predictions below
/// `confidence_threshold` are treated as if never made. Frames that only
/// appear in `predictions` are not counted at all.
///
/// If no true positive exists anywhere, precision, recall and F-score are
/// all 0.0.
///
/// # Errors
///
/// Returns [`DetectionEvalError::InvalidThreshold`] when either threshold
/// lies outside `[0, 1]`.
///
/// # Example
///
/// ```
/// use detection_eval::evaluator::compute_metrics;
/// use detection_eval::frames::FrameCollection;
/// use detection_eval::MetricsConfig;
///
/// let labels = FrameCollection::try_from_inputs(vec![
///     (1, "A", (2.0, 2.0), (12.0, 22.0)),
///     (1, "A", (80.0, 80.0), (110.0, 120.0)),
/// ]).unwrap();
/// let predictions = FrameCollection::try_from_inputs(vec![
///     (1, "A", (4.0, 4.0), (14.0, 24.0)),
///     (1, "A", (50.0, 50.0), (80.0, 60.0)),
///     (1, "A", (80.0, 80.0), (110.0, 120.0)),
/// ]).unwrap();
///
/// let metrics = compute_metrics(&labels, &predictions, &MetricsConfig::default()).unwrap();
/// assert_eq!(metrics.precision, 2.0 / 3.0);
/// assert_eq!(metrics.recall, 1.0);
/// ```
pub fn compute_metrics(
    labels: &FrameCollection,
    predictions: &FrameCollection,
    config: &MetricsConfig,
) -> Result<DetectionMetrics> {
    config.validate()?;

    let mut metrics = DetectionMetrics::default();

    for (frame_id, frame_labels) in labels.iter() {
        let frame_counts = if predictions.contains_frame(frame_id) {
            evaluate_frame(frame_labels, predictions.get(frame_id), config)
        } else {
            MatchCounts {
                false_negatives: frame_labels.len(),
                ..MatchCounts::default()
            }
        };

        debug!(
            "frame {}: tp={} fp={} fn={}",
            frame_id,
            frame_counts.true_positives,
            frame_counts.false_positives,
            frame_counts.false_negatives
        );

        metrics.counts += frame_counts;
        metrics.per_frame.insert(frame_id.clone(), frame_counts);
    }

    for frame_id in predictions.frame_ids().filter(|id| !labels.contains_frame(id)) {
        debug!("frame {} has predictions but no labels; not counted", frame_id);
    }

    let pr = calculate_precision_recall(metrics.counts);
    metrics.precision = pr.precision;
    metrics.recall = pr.recall;
    metrics.f_score = calculate_f_score(pr.precision, pr.recall);

    Ok(metrics)
}

/// Count TP/FP/FN for a single frame after the confidence filter.
pub fn evaluate_frame(
    labels: &[Rectangle],
    predictions: &[Rectangle],
    config: &MetricsConfig,
) -> MatchCounts {
    let eligible: Vec<&Rectangle> = predictions
        .iter()
        .filter(|p| p.passes_confidence(config.confidence_threshold))
        .collect();

    match_frame(labels, &eligible, config.iou_threshold, config.strategy)
}

/// Labels and predictions for a set of frames.
///
/// Either side may be absent, in which case computing metrics fails. A
/// failed insertion resets the side it was applied to back to absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionDataset {
    labels: Option<FrameCollection>,
    predictions: Option<FrameCollection>,
}

impl DetectionDataset {
    /// An empty dataset with neither labels nor predictions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_collections(labels: FrameCollection, predictions: FrameCollection) -> Self {
        Self {
            labels: Some(labels),
            predictions: Some(predictions),
        }
    }

    /// Build both sides from already-split textual rows.
    pub fn from_rows<L, P, R, S>(label_rows: L, prediction_rows: P) -> Result<Self>
    where
        L: IntoIterator<Item = R>,
        P: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        Ok(Self::from_collections(
            collection_from_rows(label_rows)?,
            collection_from_rows(prediction_rows)?,
        ))
    }

    pub fn labels(&self) -> Option<&FrameCollection> {
        self.labels.as_ref()
    }

    pub fn predictions(&self) -> Option<&FrameCollection> {
        self.predictions.as_ref()
    }

    /// Replace the labels with `inputs`.
    pub fn set_labels<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<BoxInput>,
    {
        self.labels = None;
        self.extend_labels(inputs)
    }

    /// Replace the predictions with `inputs`.
    pub fn set_predictions<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<BoxInput>,
    {
        self.predictions = None;
        self.extend_predictions(inputs)
    }

    /// Add `inputs` to the labels, creating them if absent.
    pub fn extend_labels<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<BoxInput>,
    {
        extend_or_reset(&mut self.labels, inputs)
    }

    /// Add `inputs` to the predictions, creating them if absent.
    pub fn extend_predictions<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<BoxInput>,
    {
        extend_or_reset(&mut self.predictions, inputs)
    }

    /// Compute precision, recall and F-score.
    ///
    /// # Errors
    ///
    /// [`DetectionEvalError::MissingLabels`] or
    /// [`DetectionEvalError::MissingPredictions`] when a side is absent.
    pub fn metrics(&self, config: &MetricsConfig) -> Result<DetectionMetrics> {
        let labels = self.labels.as_ref().ok_or(DetectionEvalError::MissingLabels)?;
        let predictions = self
            .predictions
            .as_ref()
            .ok_or(DetectionEvalError::MissingPredictions)?;
        compute_metrics(labels, predictions, config)
    }
}

fn extend_or_reset<I, T>(slot: &mut Option<FrameCollection>, inputs: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<BoxInput>,
{
    let collection = slot.get_or_insert_with(FrameCollection::new);
    if let Err(err) = collection.extend_inputs(inputs) {
        *slot = None;
        return Err(err);
    }
    Ok(())
}
