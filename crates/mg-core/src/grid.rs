//! Fixed-size 2D grids, points and compass directions

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point
    pub fn manhattan(&self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Step one cell in a direction
    pub fn step(&self, dir: Direction) -> Point {
        let (dx, dy) = dir.delta();
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Compass direction using numeric keypad codes (2 down, 4 left, 6 right, 8 up)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    #[default]
    Down = 2,
    Left = 4,
    Right = 6,
    Up = 8,
}

impl Direction {
    /// Numeric keypad code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parse a keypad code
    pub const fn from_code(code: u8) -> Option<Direction> {
        match code {
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            8 => Some(Direction::Up),
            _ => None,
        }
    }

    /// The geometric opposite (8↔2, 4↔6)
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit offset in grid coordinates (y grows downwards)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }

    /// All four directions in keypad order
    pub const fn all() -> [Direction; 4] {
        [Direction::Down, Direction::Left, Direction::Right, Direction::Up]
    }
}

/// A width × height array of cells, stored row-major
///
/// Bounds are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the cell storage matches the declared bounds
    ///
    /// Always holds for grids built here; a deserialized grid may not.
    pub fn is_well_formed(&self) -> bool {
        self.width.checked_mul(self.height) == Some(self.cells.len())
    }

    /// Check whether signed coordinates fall inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Read a cell; panics when out of bounds
    pub fn get(&self, x: usize, y: usize) -> T {
        self.cells[self.index(x, y)]
    }

    /// Read a cell with signed coordinates, `None` outside the grid
    pub fn at(&self, x: i32, y: i32) -> Option<T> {
        if self.in_bounds(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Read a cell at a point, `None` outside the grid
    pub fn at_point(&self, p: Point) -> Option<T> {
        self.at(p.x, p.y)
    }

    /// Write a cell; panics when out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Write a cell with signed coordinates; writes outside the grid are dropped
    pub fn put(&mut self, x: i32, y: i32, value: T) -> bool {
        if self.in_bounds(x, y) {
            self.set(x as usize, y as usize, value);
            true
        } else {
            false
        }
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Build a new grid of the same size by mapping every cell
    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Iterate `(x, y, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % self.width, i / self.width, v))
    }

    /// Number of cells holding `value`
    pub fn count(&self, value: T) -> usize
    where
        T: PartialEq,
    {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_is_opposite() {
        assert_eq!(Direction::Up.reverse(), Direction::Down);
        assert_eq!(Direction::Down.reverse(), Direction::Up);
        assert_eq!(Direction::Left.reverse(), Direction::Right);
        assert_eq!(Direction::Right.reverse(), Direction::Left);
        for dir in Direction::all() {
            assert_eq!(dir.reverse().reverse(), dir);
            let (dx, dy) = dir.delta();
            let (rx, ry) = dir.reverse().delta();
            assert_eq!((dx + rx, dy + ry), (0, 0));
        }
    }

    #[test]
    fn test_codes_round_trip() {
        for dir in Direction::all() {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code(5), None);
        assert_eq!(Direction::Up.code() + Direction::Down.code(), 10);
    }

    #[test]
    fn test_grid_bounds() {
        let mut grid = Grid::new(4, 3, 0u8);
        assert!(grid.in_bounds(3, 2));
        assert!(!grid.in_bounds(4, 0));
        assert!(!grid.in_bounds(-1, 0));
        assert_eq!(grid.at(0, 3), None);

        assert!(grid.put(1, 2, 7));
        assert!(!grid.put(9, 9, 7));
        assert_eq!(grid.get(1, 2), 7);
        assert_eq!(grid.count(7), 1);
    }

    #[test]
    fn test_grid_iter_order() {
        let mut grid = Grid::new(3, 2, 0u8);
        grid.set(2, 1, 5);
        let last = grid.iter().last().unwrap();
        assert_eq!(last, (2, 1, 5));
        assert_eq!(grid.iter().count(), 6);
    }
}
