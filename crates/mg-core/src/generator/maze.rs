//! Growing-tree maze generation
//!
//! Works on an odd-sized lattice whose even/even cells are wall posts. Wall
//! islands start at random posts and grow two cells at a time into empty
//! posts, filling the cell in between. A wall only ever grows into an empty
//! post, so wall trees never join each other and the open cells stay one
//! connected region. The lattice is then scaled up by the block size.

use serde::{Deserialize, Serialize};

use crate::consts::MAZE_COEFFICIENT;
use crate::grid::Grid;
use crate::rng::MapRng;

/// Maze output category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum MazeCell {
    /// Beyond the scaled maze extent
    Unset = -1,
    Wall = 1,
    Floor = 2,
}

/// Maze generator with nearest-neighbour block upscaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeCarver {
    block_size: usize,
}

impl MazeCarver {
    /// Create a carver; a block size of 0 is treated as 1
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Generate a `width` × `height` maze grid
    pub fn generate(&self, width: usize, height: usize, rng: &mut MapRng) -> Grid<MazeCell> {
        let lattice = self.carve_lattice(width / self.block_size, height / self.block_size, rng);

        let mut out = Grid::new(width, height, MazeCell::Unset);
        let b = self.block_size;
        for (lx, ly, cell) in lattice.iter() {
            for x in lx * b..(lx + 1) * b {
                for y in ly * b..(ly + 1) * b {
                    if x < width && y < height {
                        out.set(x, y, cell);
                    }
                }
            }
        }
        out
    }

    /// Carve the unscaled odd × odd lattice for a `cols` × `rows` area
    pub fn carve_lattice(&self, cols: usize, rows: usize, rng: &mut MapRng) -> Grid<MazeCell> {
        let shape_x = (cols / 2) * 2 + 1;
        let shape_y = (rows / 2) * 2 + 1;

        let complexity = (MAZE_COEFFICIENT * (5 * (shape_x + shape_y)) as f64).floor() as usize;
        let density =
            (MAZE_COEFFICIENT * ((shape_x / 2) * (shape_y / 2)) as f64).floor() as usize;

        let mut z = Grid::new(shape_x, shape_y, MazeCell::Floor);
        for x in 0..shape_x {
            z.set(x, 0, MazeCell::Wall);
            z.set(x, shape_y - 1, MazeCell::Wall);
        }
        for y in 0..shape_y {
            z.set(0, y, MazeCell::Wall);
            z.set(shape_x - 1, y, MazeCell::Wall);
        }

        let (sx, sy) = (shape_x as i32, shape_y as i32);
        for _ in 0..density {
            let mut x = rng.rand(0, sx / 2) * 2;
            let mut y = rng.rand(0, sy / 2) * 2;
            z.put(x, y, MazeCell::Wall);

            for _ in 0..complexity {
                let mut neighbours = Vec::with_capacity(4);
                if x > 1 {
                    neighbours.push((x - 2, y));
                }
                if x < sx - 2 {
                    neighbours.push((x + 2, y));
                }
                if y > 1 {
                    neighbours.push((x, y - 2));
                }
                if y < sy - 2 {
                    neighbours.push((x, y + 2));
                }

                let Some(pick) = rng.choose_index(neighbours.len()) else {
                    continue;
                };
                let (nx, ny) = neighbours[pick];
                if z.at(nx, ny) == Some(MazeCell::Floor) {
                    z.put(nx, ny, MazeCell::Wall);
                    z.put(nx + (x - nx) / 2, ny + (y - ny) / 2, MazeCell::Wall);
                    x = nx;
                    y = ny;
                }
            }
        }
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn floor_cells(grid: &Grid<MazeCell>) -> Vec<(usize, usize)> {
        grid.iter()
            .filter(|&(_, _, c)| c == MazeCell::Floor)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    fn reachable_from(grid: &Grid<MazeCell>, start: (usize, usize)) -> usize {
        let mut seen = Grid::new(grid.width(), grid.height(), false);
        let mut queue = VecDeque::from([start]);
        seen.set(start.0, start.1, true);
        let mut count = 0;
        while let Some((x, y)) = queue.pop_front() {
            count += 1;
            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if grid.at(nx, ny) == Some(MazeCell::Floor) && seen.at(nx, ny) == Some(false) {
                    seen.put(nx, ny, true);
                    queue.push_back((nx as usize, ny as usize));
                }
            }
        }
        count
    }

    #[test]
    fn test_lattice_is_odd_and_walled() {
        let mut rng = MapRng::new(1);
        let z = MazeCarver::new(1).carve_lattice(20, 14, &mut rng);
        assert_eq!((z.width(), z.height()), (21, 15));
        for x in 0..z.width() {
            assert_eq!(z.get(x, 0), MazeCell::Wall);
            assert_eq!(z.get(x, z.height() - 1), MazeCell::Wall);
        }
        // odd/odd cells are never built on
        for (x, y, c) in z.iter() {
            if x % 2 == 1 && y % 2 == 1 {
                assert_eq!(c, MazeCell::Floor);
            }
        }
    }

    #[test]
    fn test_maze_is_connected() {
        for seed in 0..20 {
            let mut rng = MapRng::new(seed);
            let grid = MazeCarver::new(1).generate(31, 25, &mut rng);
            let floors = floor_cells(&grid);
            assert!(!floors.is_empty());
            assert_eq!(reachable_from(&grid, floors[0]), floors.len(), "seed {seed}");
        }
    }

    #[test]
    fn test_block_upscaling() {
        let mut rng = MapRng::new(8);
        let carver = MazeCarver::new(2);
        let grid = carver.generate(7, 7, &mut rng);

        // 3x3 lattice scaled to 6x6, the last row and column stay unset
        for i in 0..7 {
            assert_eq!(grid.get(i, 6), MazeCell::Unset);
            assert_eq!(grid.get(6, i), MazeCell::Unset);
        }
        for y in 0..6 {
            for x in (0..6).step_by(2) {
                let c = grid.get(x, y);
                assert_ne!(c, MazeCell::Unset);
                assert_eq!(grid.get(x + 1, y), c);
            }
        }
    }

    #[test]
    fn test_degenerate_size_is_unset() {
        let mut rng = MapRng::new(3);
        let grid = MazeCarver::new(4).generate(3, 3, &mut rng);
        assert!(grid.iter().all(|(_, _, c)| c == MazeCell::Unset || c == MazeCell::Wall));
    }
}
