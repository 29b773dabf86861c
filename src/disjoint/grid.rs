//! Rasterized occupancy of a frame.
//!
//! Cells are lattice points: a rectangle covers every point from the floor
//! of its top-left corner to the ceiling of its bottom-right corner,
//! inclusive. Two boxes whose point sets are disjoint are therefore
//! separated by at least one cell on some axis and never touch.

use crate::types::{BoxCorners, Point, Rectangle};
use log::warn;

/// Grid multiplier applied to normalized (`<= 1.0`) coordinates.
pub const NORMALIZED_SCALE: f64 = 1000.0;

/// Largest grid that will be allocated, in cells.
pub const MAX_GRID_CELLS: usize = 1 << 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    /// Covered by a rectangle present before generation
    Existing = 1,
    /// Covered by a box generated during this call
    Generated = 2,
}

/// Inclusive span of lattice points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBox {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl CellBox {
    pub fn point(x: usize, y: usize) -> Self {
        Self { x0: x, y0: y, x1: x, y1: y }
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    scale: f64,
    cells: Vec<Cell>,
    empty: usize,
}

impl OccupancyGrid {
    /// Rasterize `existing` onto a grid sized by `bounds` or, without
    /// bounds, by the largest coordinate among the rectangles.
    ///
    /// Normalized input is scaled by [`NORMALIZED_SCALE`]. With no
    /// rectangles and no bounds the grid has no cells.
    pub fn build(existing: &[Rectangle], bounds: Option<[f64; 2]>) -> Self {
        let [extent_x, extent_y] = bounds.unwrap_or_else(|| {
            existing.iter().fold([0.0_f64, 0.0_f64], |[mx, my], rect| {
                [mx.max(rect.left()).max(rect.right()), my.max(rect.top()).max(rect.bottom())]
            })
        });

        let scale = if extent_x.max(extent_y) <= 1.0 { NORMALIZED_SCALE } else { 1.0 };
        let empty = Self { width: 0, height: 0, scale, cells: Vec::new(), empty: 0 };
        if extent_x <= 0.0 || extent_y <= 0.0 {
            return empty;
        }

        let Some((width, height)) = grid_size(extent_x * scale, extent_y * scale) else {
            warn!(
                "frame extent {}x{} needs more than {} grid cells; no boxes can be placed",
                extent_x, extent_y, MAX_GRID_CELLS
            );
            return empty;
        };
        let mut grid = Self {
            width,
            height,
            scale,
            cells: vec![Cell::Empty; width * height],
            empty: width * height,
        };

        for rect in existing {
            if let Some(cell_box) = grid.cover(rect) {
                grid.fill(&cell_box, Cell::Existing);
            }
        }
        grid
    }

    /// Lattice points covered by `rect`, clipped to the grid.
    /// Non-finite corners cover nothing.
    fn cover(&self, rect: &Rectangle) -> Option<CellBox> {
        let x0 = (rect.left() * self.scale).floor().max(0.0);
        let y0 = (rect.top() * self.scale).floor().max(0.0);
        let x1 = (rect.right() * self.scale).ceil();
        let y1 = (rect.bottom() * self.scale).ceil();
        if [x0, y0, x1, y1].iter().any(|v| !v.is_finite()) {
            return None;
        }
        if x1 < 0.0 || y1 < 0.0 || x0 >= self.width as f64 || y0 >= self.height as f64 {
            return None;
        }
        Some(CellBox {
            x0: x0 as usize,
            y0: y0 as usize,
            x1: (x1 as usize).min(self.width - 1),
            y1: (y1 as usize).min(self.height - 1),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Factor between input coordinates and cells.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn empty_count(&self) -> usize {
        self.empty
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) == Cell::Empty
    }

    pub fn fill(&mut self, cell_box: &CellBox, state: Cell) {
        for y in cell_box.y0..=cell_box.y1 {
            for x in cell_box.x0..=cell_box.x1 {
                let idx = y * self.width + x;
                if self.cells[idx] == Cell::Empty && state != Cell::Empty {
                    self.empty -= 1;
                }
                self.cells[idx] = state;
            }
        }
    }

    /// Whether `cell_box` can extend by one cell along `axis` without
    /// leaving the grid or touching an occupied cell.
    pub fn can_grow(&self, cell_box: &CellBox, axis: Axis) -> bool {
        match axis {
            Axis::X => {
                let x = cell_box.x1 + 1;
                x < self.width && (cell_box.y0..=cell_box.y1).all(|y| self.is_empty(x, y))
            }
            Axis::Y => {
                let y = cell_box.y1 + 1;
                y < self.height && (cell_box.x0..=cell_box.x1).all(|x| self.is_empty(x, y))
            }
        }
    }

    /// Convert a cell span back to input coordinates.
    pub fn to_corners(&self, cell_box: &CellBox) -> BoxCorners {
        BoxCorners {
            top_left: Point::new(cell_box.x0 as f64 / self.scale, cell_box.y0 as f64 / self.scale),
            bottom_right: Point::new(cell_box.x1 as f64 / self.scale, cell_box.y1 as f64 / self.scale),
        }
    }
}

/// Lattice dimensions for a scaled extent, or `None` when the grid would
/// exceed [`MAX_GRID_CELLS`].
fn grid_size(scaled_x: f64, scaled_y: f64) -> Option<(usize, usize)> {
    let limit = MAX_GRID_CELLS as f64;
    if !(scaled_x.is_finite() && scaled_y.is_finite()) || scaled_x >= limit || scaled_y >= limit {
        return None;
    }
    let width = scaled_x.ceil() as usize + 1;
    let height = scaled_y.ceil() as usize + 1;
    width
        .checked_mul(height)
        .filter(|&cells| cells <= MAX_GRID_CELLS)
        .map(|_| (width, height))
}
