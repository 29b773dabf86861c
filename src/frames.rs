//! Frame-grouped rectangle collections and the input shapes they accept.

use crate::error::{DetectionEvalError, Result};
use crate::types::{FrameId, Rectangle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every shape a label or prediction may arrive in.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxInput {
    /// An already built rectangle.
    Prebuilt(Rectangle),
    /// `(frame_id, label, tlx, tly, brx, bry)`
    Flat {
        frame_id: FrameId,
        label: String,
        coords: [f64; 4],
    },
    /// `(frame_id, label, tlx, tly, brx, bry, confidence)`
    FlatWithConfidence {
        frame_id: FrameId,
        label: String,
        coords: [f64; 4],
        confidence: f64,
    },
    /// `(frame_id, label, (tlx, tly), (brx, bry))`
    Paired {
        frame_id: FrameId,
        label: String,
        top_left: (f64, f64),
        bottom_right: (f64, f64),
    },
    /// `(frame_id, label, (tlx, tly), (brx, bry), confidence)`
    PairedWithConfidence {
        frame_id: FrameId,
        label: String,
        top_left: (f64, f64),
        bottom_right: (f64, f64),
        confidence: f64,
    },
}

impl BoxInput {
    /// Build an input from positional numbers following the frame id and
    /// label: four corner coordinates, optionally followed by a confidence.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionEvalError::UnsupportedArity`] with the total field
    /// count (including frame id and label) for any other length.
    pub fn from_positional(
        frame_id: impl Into<FrameId>,
        label: impl Into<String>,
        values: &[f64],
    ) -> Result<Self> {
        let frame_id = frame_id.into();
        let label = label.into();
        match *values {
            [tlx, tly, brx, bry] => Ok(BoxInput::Flat {
                frame_id,
                label,
                coords: [tlx, tly, brx, bry],
            }),
            [tlx, tly, brx, bry, confidence] => Ok(BoxInput::FlatWithConfidence {
                frame_id,
                label,
                coords: [tlx, tly, brx, bry],
                confidence,
            }),
            _ => Err(DetectionEvalError::UnsupportedArity(values.len() + 2)),
        }
    }

    /// Normalize into a [`Rectangle`].
    ///
    /// # Errors
    ///
    /// Returns [`DetectionEvalError::InvalidBoundingBox`] when a coordinate
    /// is not finite or the confidence lies outside `[0, 1]`.
    pub fn into_rectangle(self) -> Result<Rectangle> {
        let rect = match self {
            BoxInput::Prebuilt(rect) => rect,
            BoxInput::Flat { frame_id, label, coords: [tlx, tly, brx, bry] } => {
                Rectangle::new(frame_id, label, (tlx, tly), (brx, bry))
            }
            BoxInput::FlatWithConfidence {
                frame_id,
                label,
                coords: [tlx, tly, brx, bry],
                confidence,
            } => Rectangle::with_confidence(frame_id, label, (tlx, tly), (brx, bry), confidence),
            BoxInput::Paired { frame_id, label, top_left, bottom_right } => {
                Rectangle::new(frame_id, label, top_left, bottom_right)
            }
            BoxInput::PairedWithConfidence {
                frame_id,
                label,
                top_left,
                bottom_right,
                confidence,
            } => Rectangle::with_confidence(frame_id, label, top_left, bottom_right, confidence),
        };

        rect.validate()?;
        Ok(rect)
    }
}

impl From<Rectangle> for BoxInput {
    fn from(rect: Rectangle) -> Self {
        BoxInput::Prebuilt(rect)
    }
}

impl<F: Into<FrameId>, L: Into<String>> From<(F, L, f64, f64, f64, f64)> for BoxInput {
    fn from((frame_id, label, tlx, tly, brx, bry): (F, L, f64, f64, f64, f64)) -> Self {
        BoxInput::Flat {
            frame_id: frame_id.into(),
            label: label.into(),
            coords: [tlx, tly, brx, bry],
        }
    }
}

impl<F: Into<FrameId>, L: Into<String>> From<(F, L, f64, f64, f64, f64, f64)> for BoxInput {
    fn from((frame_id, label, tlx, tly, brx, bry, confidence): (F, L, f64, f64, f64, f64, f64)) -> Self {
        BoxInput::FlatWithConfidence {
            frame_id: frame_id.into(),
            label: label.into(),
            coords: [tlx, tly, brx, bry],
            confidence,
        }
    }
}

impl<F: Into<FrameId>, L: Into<String>> From<(F, L, (f64, f64), (f64, f64))> for BoxInput {
    fn from((frame_id, label, top_left, bottom_right): (F, L, (f64, f64), (f64, f64))) -> Self {
        BoxInput::Paired {
            frame_id: frame_id.into(),
            label: label.into(),
            top_left,
            bottom_right,
        }
    }
}

impl<F: Into<FrameId>, L: Into<String>> From<(F, L, (f64, f64), (f64, f64), f64)> for BoxInput {
    fn from(
        (frame_id, label, top_left, bottom_right, confidence): (F, L, (f64, f64), (f64, f64), f64),
    ) -> Self {
        BoxInput::PairedWithConfidence {
            frame_id: frame_id.into(),
            label: label.into(),
            top_left,
            bottom_right,
            confidence,
        }
    }
}

/// Rectangles grouped by frame. Insertion order within a frame is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameCollection {
    frames: BTreeMap<FrameId, Vec<Rectangle>>,
}

impl FrameCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from any mix of input shapes, failing on the
    /// first input that cannot be normalized.
    pub fn try_from_inputs<I, T>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<BoxInput>,
    {
        let mut collection = Self::new();
        collection.extend_inputs(inputs)?;
        Ok(collection)
    }

    /// Insert one input under its frame.
    pub fn insert(&mut self, input: impl Into<BoxInput>) -> Result<()> {
        let rect = input.into().into_rectangle()?;
        self.push(rect);
        Ok(())
    }

    /// Insert every input in order. Inputs are all normalized before any
    /// is inserted, so on failure the collection is left unchanged.
    pub fn extend_inputs<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<BoxInput>,
    {
        let rects = inputs
            .into_iter()
            .map(|input| input.into().into_rectangle())
            .collect::<Result<Vec<Rectangle>>>()?;
        for rect in rects {
            self.push(rect);
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, rect: Rectangle) {
        self.frames
            .entry(rect.frame_id().clone())
            .or_default()
            .push(rect);
    }

    /// Rectangles of one frame, empty if the frame is unknown.
    pub fn get(&self, frame_id: &FrameId) -> &[Rectangle] {
        self.frames.get(frame_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_frame(&self, frame_id: &FrameId) -> bool {
        self.frames.contains_key(frame_id)
    }

    pub fn frame_ids(&self) -> impl Iterator<Item = &FrameId> {
        self.frames.keys()
    }

    /// Iterate frames in frame-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&FrameId, &[Rectangle])> {
        self.frames.iter().map(|(id, rects)| (id, rects.as_slice()))
    }

    /// Iterate every rectangle of every frame.
    pub fn rectangles(&self) -> impl Iterator<Item = &Rectangle> {
        self.frames.values().flatten()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Total number of rectangles across frames.
    pub fn len(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<Rectangle> for FrameCollection {
    fn from_iter<I: IntoIterator<Item = Rectangle>>(iter: I) -> Self {
        let mut collection = Self::new();
        for rect in iter {
            collection.push(rect);
        }
        collection
    }
}
