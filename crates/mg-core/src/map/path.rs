//! Shortest paths over role grids

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::grid::{Direction, Grid, Point};
use crate::tiles::TileRole;

/// Shortest 4-connected path from `start` to `end` over passable roles
///
/// Best-first search ordered by steps taken plus Manhattan distance left.
/// The start cell itself need not be passable. Returns the cells from
/// `start` to `end` inclusive, or `None` when `end` cannot be reached.
pub fn find_path(
    grid: &Grid<TileRole>,
    start: Point,
    end: Point,
    passable: &[TileRole],
) -> Option<Vec<Point>> {
    let open_cell = |p: Point| grid.at_point(p).is_some_and(|r| passable.contains(&r));
    if !grid.in_bounds(start.x, start.y) || !(start == end || open_cell(end)) {
        return None;
    }

    let (w, h) = (grid.width(), grid.height());
    let mut cost = Grid::new(w, h, i32::MAX);
    let mut parent: Grid<Option<Point>> = Grid::new(w, h, None);
    let mut open = BinaryHeap::new();

    cost.put(start.x, start.y, 0);
    open.push(Reverse((start.manhattan(end), 0, start.x, start.y)));

    while let Some(Reverse((_, steps, x, y))) = open.pop() {
        let p = Point::new(x, y);
        if p == end {
            let mut path = vec![p];
            let mut cur = p;
            while let Some(prev) = parent.at_point(cur).flatten() {
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            return Some(path);
        }
        if cost.at_point(p).is_some_and(|best| steps > best) {
            continue;
        }

        for dir in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            let next = p.step(dir);
            if !open_cell(next) {
                continue;
            }
            let next_steps = steps + 1;
            if cost.at_point(next).is_some_and(|best| next_steps < best) {
                cost.put(next.x, next.y, next_steps);
                parent.put(next.x, next.y, Some(p));
                open.push(Reverse((next_steps + next.manhattan(end), next_steps, next.x, next.y)));
            }
        }
    }
    None
}

/// Paint `role` along a path, leaving cells whose role is in `exclude`
///
/// Returns the number of cells painted.
pub fn draw_path(grid: &mut Grid<TileRole>, path: &[Point], role: TileRole, exclude: &[TileRole]) -> usize {
    let mut painted = 0;
    for &p in path {
        match grid.at_point(p) {
            Some(current) if !exclude.contains(&current) => {
                grid.put(p.x, p.y, role);
                painted += 1;
            }
            _ => {}
        }
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use TileRole::{Floor, Road, WallTop};

    fn walled() -> Grid<TileRole> {
        // a wall across the middle with a gap at the bottom
        let mut g = Grid::new(7, 5, Floor);
        for y in 0..4 {
            g.set(3, y, WallTop);
        }
        g
    }

    #[test]
    fn test_path_goes_around_wall() {
        let g = walled();
        let path = find_path(&g, Point::new(0, 0), Point::new(6, 0), &[Floor]).unwrap();
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(6, 0)));
        // 6 across plus 4 down and 4 back up
        assert_eq!(path.len(), 15);
        assert!(path.contains(&Point::new(3, 4)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn test_unreachable() {
        let mut g = walled();
        g.set(3, 4, WallTop);
        assert!(find_path(&g, Point::new(0, 0), Point::new(6, 0), &[Floor]).is_none());
        assert!(find_path(&g, Point::new(0, 0), Point::new(3, 0), &[Floor]).is_none());
        assert!(find_path(&g, Point::new(0, 0), Point::new(9, 0), &[Floor]).is_none());
    }

    #[test]
    fn test_draw_path_respects_exclude() {
        let mut g = walled();
        let path = vec![Point::new(2, 1), Point::new(3, 1), Point::new(4, 1)];
        let painted = draw_path(&mut g, &path, Road, &[WallTop]);
        assert_eq!(painted, 2);
        assert_eq!(g.get(2, 1), Road);
        assert_eq!(g.get(3, 1), WallTop);
        assert_eq!(g.get(4, 1), Road);
    }
}
