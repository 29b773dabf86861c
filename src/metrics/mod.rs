//! Metrics calculation modules for detection evaluation.

pub mod f_score;
pub mod iou;
pub mod precision_recall;

pub use f_score::{calculate_f_score, calculate_f_score_from_counts};
pub use iou::{calculate_iou, calculate_iou_matrix};
pub use precision_recall::{calculate_precision_recall, PrecisionRecall};
