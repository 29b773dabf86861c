//! Evaluation and box-synthesis settings, loadable from JSON.

use crate::error::{DetectionEvalError, Result};
use crate::matching::{MatchStrategy, DEFAULT_IOU_THRESHOLD};
use crate::threshold::validate_threshold;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Confidence threshold applied to predictions when none is given.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Settings for [`compute_metrics`](crate::evaluator::compute_metrics).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Predictions scoring below this are ignored
    pub confidence_threshold: f64,
    /// Minimum IoU for a prediction to match a label
    pub iou_threshold: f64,
    pub strategy: MatchStrategy,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            strategy: MatchStrategy::default(),
        }
    }
}

impl MetricsConfig {
    pub fn new(confidence_threshold: f64, iou_threshold: f64) -> Self {
        Self {
            confidence_threshold,
            iou_threshold,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.confidence_threshold)?;
        validate_threshold(self.iou_threshold)
    }
}

/// Settings for [`DisjointBoxGenerator`](crate::disjoint::DisjointBoxGenerator).
///
/// Sizes are in the coordinate scale of the rectangles the boxes are
/// placed around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisjointConfig {
    /// Boxes requested per frame
    pub count: usize,
    pub min_width: f64,
    pub min_height: f64,
    /// Failed placements tolerated per box before it is dropped
    pub max_retries: usize,
    /// Frame `[width, height]`; defaults to the extent of the existing boxes
    pub bounds: Option<[f64; 2]>,
    /// Seed for reproducible placement
    pub seed: Option<u64>,
}

impl Default for DisjointConfig {
    fn default() -> Self {
        Self {
            count: 1,
            min_width: 0.0,
            min_height: 0.0,
            max_retries: 100,
            bounds: None,
            seed: None,
        }
    }
}

impl DisjointConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("min_width", self.min_width), ("min_height", self.min_height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DetectionEvalError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if let Some([width, height]) = self.bounds {
            if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
                return Err(DetectionEvalError::InvalidConfig(format!(
                    "bounds must be positive, got [{width}, {height}]"
                )));
            }
        }
        Ok(())
    }

    /// Random generator for placement, seeded when `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub metrics: MetricsConfig,
    pub disjoint: DisjointConfig,
}

impl EvalConfig {
    /// Parse and validate a configuration from a JSON string. Missing
    /// fields take their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use detection_eval::config::EvalConfig;
    ///
    /// let config = EvalConfig::from_json_str(r#"{
    ///     "metrics": { "iou_threshold": 0.75, "strategy": "greedy" },
    ///     "disjoint": { "count": 4, "seed": 7 }
    /// }"#).unwrap();
    /// assert_eq!(config.metrics.iou_threshold, 0.75);
    /// assert_eq!(config.metrics.confidence_threshold, 0.5);
    /// assert_eq!(config.disjoint.count, 4);
    /// ```
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: EvalConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: EvalConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.metrics.validate()?;
        self.disjoint.validate()
    }
}
