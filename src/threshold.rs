//! Confidence score thresholding utilities.

use crate::error::{DetectionEvalError, Result};
use crate::frames::FrameCollection;

/// Filter a collection by confidence threshold.
///
/// Rectangles without a confidence (ground truth) are always kept. Frames
/// left without rectangles are dropped.
///
/// # Errors
///
/// Returns an error if the threshold is not in the valid range [0.0, 1.0].
///
/// # Example
///
/// ```
/// use detection_eval::frames::FrameCollection;
/// use detection_eval::threshold::filter_by_confidence;
///
/// let predictions = FrameCollection::try_from_inputs(vec![
///     (1, "car", 10.0, 20.0, 30.0, 40.0, 0.9),
///     (1, "car", 50.0, 60.0, 70.0, 80.0, 0.3),
/// ])
/// .unwrap();
///
/// let filtered = filter_by_confidence(&predictions, 0.5).unwrap();
/// assert_eq!(filtered.len(), 1);
/// ```
pub fn filter_by_confidence(collection: &FrameCollection, threshold: f64) -> Result<FrameCollection> {
    validate_threshold(threshold)?;

    Ok(collection
        .rectangles()
        .filter(|rect| rect.passes_confidence(threshold))
        .cloned()
        .collect())
}

/// Validate that a threshold is in the valid range [0.0, 1.0].
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(DetectionEvalError::InvalidThreshold(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}
