//! # detection-eval
//!
//! A Rust library for evaluating object detections against ground truth
//! with a single confidence/IoU threshold pair, plus synthesis of
//! non-overlapping background boxes.
//!
//! This library provides:
//! - **Geometry** on labelled rectangles: overlap, intersection, union, IoU
//! - **Matching** of a rectangle against candidates by label and IoU
//! - **Precision**, **Recall** and **F-score** aggregated over frames
//! - **Disjoint box generation** on an occupancy grid, for injecting
//!   background samples into a labelled dataset
//!
//! ## Quick Start
//!
//! ```rust
//! use detection_eval::{DetectionDataset, MetricsConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dataset = DetectionDataset::new();
//! dataset.set_labels(vec![
//!     (1, "A", (2.0, 2.0), (12.0, 22.0)),
//!     (1, "A", (80.0, 80.0), (110.0, 120.0)),
//! ])?;
//! dataset.set_predictions(vec![
//!     (1, "A", (4.0, 4.0), (14.0, 24.0), 0.9),
//!     (1, "A", (50.0, 50.0), (80.0, 60.0), 0.8),
//!     (1, "A", (80.0, 80.0), (110.0, 120.0), 0.7),
//! ])?;
//!
//! let (precision, recall, f_score) = dataset.metrics(&MetricsConfig::default())?.as_tuple();
//! assert_eq!(precision, 2.0 / 3.0);
//! assert_eq!(recall, 1.0);
//! println!("F-score: {:.4}", f_score);
//! # Ok(())
//! # }
//! ```
//!
//! ## Record format
//!
//! Labels and predictions may be given as rectangles, as flat tuples
//! `(frame_id, label, tlx, tly, brx, bry[, confidence])`, as paired tuples
//! `(frame_id, label, (tlx, tly), (brx, bry)[, confidence])`, or as textual
//! rows of 6 or 7 fields (see [`records`]).

pub mod annotations;
pub mod config;
pub mod disjoint;
pub mod error;
pub mod evaluator;
pub mod frames;
pub mod matching;
pub mod metrics;
pub mod records;
pub mod threshold;
pub mod types;

// Re-export commonly used types and functions
pub use config::{DisjointConfig, EvalConfig, MetricsConfig};
pub use disjoint::{generate_disjoint_boxes, DisjointBoxGenerator};
pub use error::{DetectionEvalError, Result};
pub use evaluator::{compute_metrics, DetectionDataset};
pub use frames::{BoxInput, FrameCollection};
pub use matching::{MatchStrategy, DEFAULT_IOU_THRESHOLD};
pub use threshold::filter_by_confidence;
pub use types::{BoxCorners, DetectionMetrics, FrameId, MatchCounts, Point, Rectangle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        let rect = Rectangle::new(0, "A", (0.0, 0.0), (10.0, 10.0));
        assert!(rect.validate().is_ok());
    }
}
