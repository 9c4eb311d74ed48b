//! Entrance and exit selection
//!
//! The entrance sits on a random side of the map and the exit on the
//! opposite one. Each side is searched along a line just inside the border,
//! moving inward one line at a time until an entry cell turns up.

use serde::{Deserialize, Serialize};

use super::template::random_side;
use crate::flavor::MapFlavor;
use crate::grid::{Direction, Grid, Point};
use crate::map::path::find_path;
use crate::rng::MapRng;
use crate::tiles::TileRole;

/// Entry and exit points of a generated map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceExit {
    pub entrance: Point,
    /// Side of the map the entrance is on
    pub entrance_side: Direction,
    pub exit: Point,
    /// Always the reverse of `entrance_side` when generated
    pub exit_side: Direction,
}

impl Default for EntranceExit {
    fn default() -> Self {
        Self {
            entrance: Point::default(),
            entrance_side: Direction::Up,
            exit: Point::default(),
            exit_side: Direction::Down,
        }
    }
}

impl EntranceExit {
    /// Move the entrance to a position and side
    pub fn refresh_entrance(&mut self, pos: Point, side: Direction) {
        self.entrance = pos;
        self.entrance_side = side;
    }
}

/// Cells of the search line `depth` lines inward from a side
///
/// `b` is one more than the border thickness. Returns an empty list once
/// the line passes the centre of the map.
pub fn side_line(side: Direction, depth: i32, b: i32, width: i32, height: i32) -> Vec<Point> {
    let across = |fixed_y: i32| (b..=width - b).map(move |x| Point::new(x, fixed_y));
    let down = |fixed_x: i32| (b..=height - b).map(move |y| Point::new(fixed_x, y));

    let cells: Vec<Point> = match side {
        Direction::Up => {
            let y = b + depth;
            if y > height / 2 {
                return Vec::new();
            }
            across(y).collect()
        }
        Direction::Down => {
            let y = height - b - depth;
            if y < height / 2 {
                return Vec::new();
            }
            across(y).collect()
        }
        Direction::Right => {
            let x = width - b - depth;
            if x < width / 2 {
                return Vec::new();
            }
            down(x).collect()
        }
        Direction::Left => {
            let x = b - 1 + depth;
            if x > width / 2 {
                return Vec::new();
            }
            down(x).collect()
        }
    };
    cells
        .into_iter()
        .filter(|p| p.x >= 0 && p.y >= 0 && p.x < width && p.y < height)
        .collect()
}

/// Entry cells on the outermost line of a side that has any
fn side_candidates(
    coarse: &Grid<TileRole>,
    flavor: &dyn MapFlavor,
    side: Direction,
    b: i32,
) -> Vec<Point> {
    let (w, h) = (coarse.width() as i32, coarse.height() as i32);
    let mut depth = 0;
    loop {
        let line = side_line(side, depth, b, w, h);
        if line.is_empty() {
            return Vec::new();
        }
        let found: Vec<Point> = line
            .into_iter()
            .filter(|&p| coarse.at_point(p).is_some_and(|r| flavor.is_entry_cell(r)))
            .collect();
        if !found.is_empty() {
            return found;
        }
        depth += 1;
    }
}

/// First cell of the outermost line, used when a side has no entry cell
fn side_fallback(side: Direction, b: i32, width: i32, height: i32) -> Point {
    match side {
        Direction::Up => Point::new(b, b),
        Direction::Right => Point::new(width - b, b),
        Direction::Down => Point::new(b, height - b),
        Direction::Left => Point::new(b - 1, b),
    }
}

/// Choose entrance and exit on opposite sides
///
/// The exit is the first candidate, in random order, that a path over open
/// roles connects to the entrance. Without such a candidate a random one is
/// kept.
pub fn place_entrance_exit(
    coarse: &Grid<TileRole>,
    flavor: &dyn MapFlavor,
    border: u32,
    rng: &mut MapRng,
) -> EntranceExit {
    let b = border as i32 + 1;
    let (w, h) = (coarse.width() as i32, coarse.height() as i32);

    let entrance_side = random_side(rng);
    let exit_side = entrance_side.reverse();

    let candidates = side_candidates(coarse, flavor, entrance_side, b);
    let entrance = match rng.choose_index(candidates.len()) {
        Some(i) => candidates[i],
        None => {
            let p = side_fallback(entrance_side, b, w, h);
            tracing::warn!("No entry cell on side {}, entrance kept at {:?}", entrance_side, p);
            p
        }
    };

    let mut candidates = side_candidates(coarse, flavor, exit_side, b);
    rng.shuffle(&mut candidates);
    let passable: Vec<TileRole> = flavor
        .roles()
        .iter()
        .copied()
        .filter(|r| !r.is_wall())
        .collect();
    let reachable = candidates
        .iter()
        .copied()
        .find(|&c| find_path(coarse, entrance, c, &passable).is_some());

    let exit = match (reachable, candidates.first()) {
        (Some(p), _) => p,
        (None, Some(&p)) => {
            tracing::warn!("No exit candidate is reachable from the entrance at {:?}", entrance);
            p
        }
        (None, None) => {
            let p = side_fallback(exit_side, b, w, h);
            tracing::warn!("No entry cell on side {}, exit kept at {:?}", exit_side, p);
            p
        }
    };

    EntranceExit {
        entrance,
        entrance_side,
        exit,
        exit_side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::Flavor;

    #[test]
    fn test_side_lines() {
        // border 2 on a 20x16 map
        let up = side_line(Direction::Up, 0, 3, 20, 16);
        assert!(up.iter().all(|p| p.y == 3));
        assert_eq!(up.first(), Some(&Point::new(3, 3)));
        assert_eq!(up.last(), Some(&Point::new(17, 3)));

        let left = side_line(Direction::Left, 0, 3, 20, 16);
        assert!(left.iter().all(|p| p.x == 2));
        let right = side_line(Direction::Right, 1, 3, 20, 16);
        assert!(right.iter().all(|p| p.x == 16));
        let down = side_line(Direction::Down, 0, 3, 20, 16);
        assert!(down.iter().all(|p| p.y == 13));

        assert!(side_line(Direction::Up, 6, 3, 20, 16).is_empty());
    }

    #[test]
    fn test_exit_opposite_entrance() {
        let mut grid = Grid::new(20, 16, TileRole::WallTop);
        for y in 3..=13 {
            for x in 2..=17 {
                grid.set(x, y, TileRole::Floor);
            }
        }
        let flavor = Flavor::Cave.generator();
        for seed in 0..16 {
            let mut rng = MapRng::new(seed);
            let ee = place_entrance_exit(&grid, flavor, 2, &mut rng);
            assert_eq!(ee.exit_side, ee.entrance_side.reverse());
            assert_eq!(grid.at_point(ee.entrance), Some(TileRole::Floor));
            assert_eq!(grid.at_point(ee.exit), Some(TileRole::Floor));
        }
    }

    #[test]
    fn test_search_moves_inward() {
        // only row 6 has floor
        let mut grid = Grid::new(20, 16, TileRole::WallTop);
        for x in 0..20 {
            grid.set(x, 6, TileRole::Floor);
        }
        let flavor = Flavor::Cave.generator();
        let found = side_candidates(&grid, flavor, Direction::Up, 3);
        assert!(!found.is_empty());
        assert!(found.iter().all(|p| p.y == 6));
        assert!(side_candidates(&grid, flavor, Direction::Down, 3).is_empty());
    }

    #[test]
    fn test_no_floor_keeps_fallback() {
        let grid = Grid::new(20, 16, TileRole::WallTop);
        let mut rng = MapRng::new(1);
        let ee = place_entrance_exit(&grid, Flavor::Maze.generator(), 2, &mut rng);
        let expected = side_fallback(ee.entrance_side, 3, 20, 16);
        assert_eq!(ee.entrance, expected);
    }
}
