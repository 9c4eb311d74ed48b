//! Inclusive cell rectangles used by the space partitioner

use serde::{Deserialize, Serialize};

/// A rectangle of cells with inclusive edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Rectangle covering `width` × `height` cells starting at `(x, y)`
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width - 1,
            bottom: y + height - 1,
        }
    }

    /// Rectangle reaching `dx` cells right and `dy` cells down from `(x, y)`
    ///
    /// Covers `dx + 1` × `dy + 1` cells. Corridors and roads are measured
    /// this way, which makes horizontal corridors three rows tall and
    /// vertical ones two columns wide.
    pub fn extent(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + dx,
            bottom: y + dy,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    pub fn area(&self) -> i32 {
        self.width().max(0) * self.height().max(0)
    }

    /// Horizontal centre, halves rounded up
    pub fn cx(&self) -> i32 {
        self.left + (self.right - self.left + 1) / 2
    }

    /// Vertical centre, halves rounded up
    pub fn cy(&self) -> i32 {
        self.top + (self.bottom - self.top + 1) / 2
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// True when `other` lies inside without touching any edge
    pub fn strictly_contains(&self, other: &Rect) -> bool {
        other.left > self.left
            && other.right < self.right
            && other.top > self.top
            && other.bottom < self.bottom
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    /// True when the cell lies on the outer ring
    pub fn on_border(&self, x: i32, y: i32) -> bool {
        self.contains_point(x, y)
            && (x == self.left || x == self.right || y == self.top || y == self.bottom)
    }

    /// Iterate all cells, column by column
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.left..=self.right).flat_map(move |x| (self.top..=self.bottom).map(move |y| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vs_extent() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!((r.width(), r.height()), (4, 5));
        assert_eq!(Rect::extent(2, 3, 3, 4), r);
    }

    #[test]
    fn test_centre_rounds_up() {
        // even span of 4 cells: 10..=13 -> 10 + round(1.5) = 12
        let r = Rect::new(10, 0, 4, 1);
        assert_eq!(r.cx(), 12);
        // odd span of 5 cells: 10..=14 -> 12
        let r = Rect::new(10, 0, 5, 1);
        assert_eq!(r.cx(), 12);
    }

    #[test]
    fn test_strict_containment() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.strictly_contains(&Rect::new(1, 1, 8, 8)));
        assert!(!outer.strictly_contains(&Rect::new(0, 1, 8, 8)));
        assert!(!outer.strictly_contains(&Rect::new(1, 1, 9, 8)));
    }

    #[test]
    fn test_cells_and_border() {
        let r = Rect::new(0, 0, 3, 3);
        assert_eq!(r.cells().count(), 9);
        assert_eq!(r.cells().filter(|&(x, y)| r.on_border(x, y)).count(), 8);
    }
}
