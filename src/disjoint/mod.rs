//! Synthesis of boxes that overlap nothing else in their frame.
//!
//! Generated boxes serve as background (negative) samples. Each box starts
//! at a random empty cell of an [`OccupancyGrid`] and grows one cell at a
//! time along a random axis, first up to the minimum size and then until a
//! growing stop probability freezes it.

pub mod grid;

use crate::config::DisjointConfig;
use crate::error::Result;
use crate::frames::FrameCollection;
use crate::types::{BoxCorners, FrameId, Rectangle};
use grid::{Axis, Cell, CellBox, OccupancyGrid};
use log::{trace, warn};
use rand::Rng;

/// Added to the stop threshold (out of 1000) after every free growth step.
const DECAY_STEP: u32 = 25;
const DECAY_RANGE: u32 = 1000;

/// Places up to `count` non-overlapping boxes around existing rectangles.
#[derive(Debug, Clone, PartialEq)]
pub struct DisjointBoxGenerator {
    count: usize,
    min_width: f64,
    min_height: f64,
    max_retries: usize,
    bounds: Option<[f64; 2]>,
}

impl DisjointBoxGenerator {
    pub fn new(count: usize, min_width: f64, min_height: f64, max_retries: usize) -> Self {
        Self {
            count,
            min_width: min_width.max(0.0),
            min_height: min_height.max(0.0),
            max_retries,
            bounds: None,
        }
    }

    /// Size the grid to the frame rather than to the existing boxes.
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.bounds = Some([width, height]);
        self
    }

    pub fn from_config(config: &DisjointConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            count: config.count,
            min_width: config.min_width,
            min_height: config.min_height,
            max_retries: config.max_retries,
            bounds: config.bounds,
        })
    }

    /// Generate boxes disjoint from `existing` and from each other.
    ///
    /// Fewer than `count` boxes come back when placements run out of
    /// retries or the grid fills up.
    pub fn generate<R: Rng + ?Sized>(&self, existing: &[Rectangle], rng: &mut R) -> Vec<BoxCorners> {
        let mut grid = OccupancyGrid::build(existing, self.bounds);
        let min_w = (self.min_width * grid.scale()).ceil() as usize;
        let min_h = (self.min_height * grid.scale()).ceil() as usize;

        let mut boxes = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            if grid.empty_count() == 0 {
                break;
            }
            if let Some(cell_box) = self.place_box(&mut grid, min_w, min_h, rng) {
                boxes.push(grid.to_corners(&cell_box));
            }
        }

        if boxes.len() < self.count {
            warn!(
                "placed {} of {} disjoint boxes ({} empty cells left)",
                boxes.len(),
                self.count,
                grid.empty_count()
            );
        }
        boxes
    }

    /// Grow a single box, spending retries on occupied start cells and on
    /// collisions before the minimum size is reached.
    fn place_box<R: Rng + ?Sized>(
        &self,
        grid: &mut OccupancyGrid,
        min_w: usize,
        min_h: usize,
        rng: &mut R,
    ) -> Option<CellBox> {
        let mut retries_left = self.max_retries;

        'attempt: loop {
            let x = rng.gen_range(0..grid.width());
            let y = rng.gen_range(0..grid.height());
            if !grid.is_empty(x, y) {
                retries_left = retries_left.checked_sub(1)?;
                continue;
            }

            let mut cell_box = CellBox::point(x, y);
            while cell_box.width() < min_w || cell_box.height() < min_h {
                let axis = random_axis(rng);
                if !grid.can_grow(&cell_box, axis) {
                    trace!("collision growing from ({x}, {y}); {retries_left} retries left");
                    retries_left = retries_left.checked_sub(1)?;
                    continue 'attempt;
                }
                grow(&mut cell_box, axis);
            }

            let mut decay = 0;
            loop {
                if rng.gen_range(0..=DECAY_RANGE) < decay {
                    break;
                }
                let axis = random_axis(rng);
                if !grid.can_grow(&cell_box, axis) {
                    break;
                }
                grow(&mut cell_box, axis);
                decay += DECAY_STEP;
            }

            grid.fill(&cell_box, Cell::Generated);
            trace!("placed {:?}", cell_box);
            return Some(cell_box);
        }
    }

    /// Add generated boxes to every frame of `collection` as ground-truth
    /// rectangles labelled `label`. Returns how many were added.
    pub fn inject_background<R: Rng + ?Sized>(
        &self,
        collection: &mut FrameCollection,
        label: &str,
        rng: &mut R,
    ) -> usize {
        let frame_ids: Vec<FrameId> = collection.frame_ids().cloned().collect();
        let mut added = 0;
        for frame_id in frame_ids {
            let boxes = self.generate(collection.get(&frame_id), rng);
            added += boxes.len();
            for corners in boxes {
                collection.push(corners.into_rectangle(frame_id.clone(), label));
            }
        }
        added
    }
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> Axis {
    if rng.gen_bool(0.5) {
        Axis::X
    } else {
        Axis::Y
    }
}

fn grow(cell_box: &mut CellBox, axis: Axis) {
    match axis {
        Axis::X => cell_box.x1 += 1,
        Axis::Y => cell_box.y1 += 1,
    }
}

/// Generate up to `count` boxes disjoint from `existing` and from each
/// other, in the coordinate scale of `existing`.
///
/// # Example
///
/// ```
/// use detection_eval::disjoint::generate_disjoint_boxes;
/// use detection_eval::Rectangle;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let existing = vec![
///     Rectangle::new(1, "car", (0.0, 0.0), (50.0, 50.0)),
///     Rectangle::new(1, "car", (150.0, 150.0), (200.0, 200.0)),
/// ];
/// let mut rng = StdRng::seed_from_u64(7);
/// let boxes = generate_disjoint_boxes(&existing, 3, 5.0, 5.0, 50, &mut rng);
/// assert!(boxes.len() <= 3);
/// ```
pub fn generate_disjoint_boxes<R: Rng + ?Sized>(
    existing: &[Rectangle],
    count: usize,
    min_width: f64,
    min_height: f64,
    max_retries: usize,
    rng: &mut R,
) -> Vec<BoxCorners> {
    DisjointBoxGenerator::new(count, min_width, min_height, max_retries).generate(existing, rng)
}
