//! Core data types for labels, predictions and evaluation results.

use crate::error::{DetectionEvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

/// Identifier distinguishing one frame from another.
///
/// Rows read from text always produce [`FrameId::Name`]; numeric ids are
/// available for callers that key frames by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameId {
    Number(i64),
    Name(String),
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameId::Number(n) => write!(f, "{n}"),
            FrameId::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FrameId {
    fn from(value: i64) -> Self {
        FrameId::Number(value)
    }
}

impl From<i32> for FrameId {
    fn from(value: i32) -> Self {
        FrameId::Number(i64::from(value))
    }
}

impl From<u32> for FrameId {
    fn from(value: u32) -> Self {
        FrameId::Number(i64::from(value))
    }
}

impl From<&str> for FrameId {
    fn from(value: &str) -> Self {
        FrameId::Name(value.to_string())
    }
}

impl From<String> for FrameId {
    fn from(value: String) -> Self {
        FrameId::Name(value)
    }
}

/// A 2-D point with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle tagged with a frame, a class label and an
/// optional confidence.
///
/// A rectangle without a confidence is ground truth. Coordinates may be
/// normalized or in pixels, as long as every rectangle compared against
/// it uses the same scale. Equality is structural over every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    frame_id: FrameId,
    label: String,
    top_left: Point,
    bottom_right: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

impl Rectangle {
    /// Create a ground-truth rectangle from its two corners.
    pub fn new(
        frame_id: impl Into<FrameId>,
        label: impl Into<String>,
        top_left: impl Into<Point>,
        bottom_right: impl Into<Point>,
    ) -> Self {
        Self {
            frame_id: frame_id.into(),
            label: label.into(),
            top_left: top_left.into(),
            bottom_right: bottom_right.into(),
            confidence: None,
        }
    }

    /// Create a prediction rectangle carrying a confidence score.
    pub fn with_confidence(
        frame_id: impl Into<FrameId>,
        label: impl Into<String>,
        top_left: impl Into<Point>,
        bottom_right: impl Into<Point>,
        confidence: f64,
    ) -> Self {
        Self {
            confidence: Some(confidence),
            ..Self::new(frame_id, label, top_left, bottom_right)
        }
    }

    pub fn frame_id(&self) -> &FrameId {
        &self.frame_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    pub fn right(&self) -> f64 {
        self.bottom_right.x
    }

    pub fn bottom(&self) -> f64 {
        self.bottom_right.y
    }

    /// Width, `x2 - x1`.
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Height, `y2 - y1`.
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check that every corner is finite and that any confidence lies in
    /// `[0, 1]`. Corner order is not checked; inverted corners give a
    /// non-positive area.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionEvalError::InvalidBoundingBox`] describing the
    /// first violation.
    pub fn validate(&self) -> Result<()> {
        let corners = [self.left(), self.top(), self.right(), self.bottom()];
        if corners.iter().any(|v| !v.is_finite()) {
            return Err(DetectionEvalError::InvalidBoundingBox(format!(
                "non-finite corner in frame {} ({:?})",
                self.frame_id, corners
            )));
        }
        if let Some(confidence) = self.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(DetectionEvalError::InvalidBoundingBox(format!(
                    "confidence must be between 0.0 and 1.0, got {confidence}"
                )));
            }
        }
        Ok(())
    }

    /// Whether this rectangle passes a confidence filter. Ground truth
    /// always passes.
    pub fn passes_confidence(&self, threshold: f64) -> bool {
        self.confidence.map_or(true, |c| c >= threshold)
    }
}

/// Corners of a generated box, in the scale of the input rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCorners {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoxCorners {
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    /// Attach a frame and label, producing a ground-truth rectangle.
    pub fn into_rectangle(self, frame_id: impl Into<FrameId>, label: impl Into<String>) -> Rectangle {
        Rectangle::new(frame_id, label, self.top_left, self.bottom_right)
    }
}

/// True positive, false positive and false negative tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl AddAssign for MatchCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.true_positives += rhs.true_positives;
        self.false_positives += rhs.false_positives;
        self.false_negatives += rhs.false_negatives;
    }
}

/// Evaluation result for one confidence/IoU threshold pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
    /// Totals across every labelled frame
    pub counts: MatchCounts,
    /// Tallies for each labelled frame
    pub per_frame: BTreeMap<FrameId, MatchCounts>,
}

impl DetectionMetrics {
    /// The `(precision, recall, f_score)` triple.
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.precision, self.recall, self.f_score)
    }
}
