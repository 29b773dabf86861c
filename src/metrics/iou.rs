//! Overlap tests and Intersection over Union (IoU) between rectangles.

use crate::types::Rectangle;

impl Rectangle {
    /// Whether the projections of both rectangles intersect on both axes.
    ///
    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        if self.right() < other.left() || self.left() > other.right() {
            return false;
        }
        if self.bottom() < other.top() || self.top() > other.bottom() {
            return false;
        }
        true
    }

    /// Whether the rectangles overlap and carry the same label.
    ///
    /// This gates every IoU computation during matching.
    pub fn related_to(&self, other: &Rectangle) -> bool {
        self.label() == other.label() && self.overlaps(other)
    }

    /// Area of the overlap rectangle; never negative.
    pub fn intersection_area(&self, other: &Rectangle) -> f64 {
        let x_left = self.left().max(other.left());
        let y_top = self.top().max(other.top());
        let x_right = self.right().min(other.right());
        let y_bottom = self.bottom().min(other.bottom());

        (x_right - x_left).max(0.0) * (y_bottom - y_top).max(0.0)
    }

    /// `area(self) + area(other) - intersection_area(other)`.
    pub fn union_area(&self, other: &Rectangle) -> f64 {
        self.area() + other.area() - self.intersection_area(other)
    }

    /// Intersection over Union of the two rectangles.
    ///
    /// Two zero-area rectangles have a union of zero; their IoU is defined
    /// as 0.0 instead of a division by zero.
    ///
    /// # Example
    ///
    /// ```
    /// use detection_eval::Rectangle;
    ///
    /// let a = Rectangle::new(1, "car", (0.0, 0.0), (1.0, 1.0));
    /// let b = Rectangle::new(1, "car", (0.5, 0.5), (1.5, 1.5));
    /// assert!((a.iou(&b) - 0.25 / 1.75).abs() < 1e-12);
    /// ```
    pub fn iou(&self, other: &Rectangle) -> f64 {
        let union_area = self.union_area(other);
        if union_area == 0.0 {
            return 0.0;
        }
        self.intersection_area(other) / union_area
    }
}

/// Calculate the IoU between two rectangles.
pub fn calculate_iou(a: &Rectangle, b: &Rectangle) -> f64 {
    a.iou(b)
}

/// Calculate the IoU matrix between two sets of rectangles.
///
/// `result[i][j]` is the IoU between `rects1[i]` and `rects2[j]`.
pub fn calculate_iou_matrix(rects1: &[Rectangle], rects2: &[Rectangle]) -> Vec<Vec<f64>> {
    rects1
        .iter()
        .map(|a| rects2.iter().map(|b| a.iou(b)).collect())
        .collect()
}
