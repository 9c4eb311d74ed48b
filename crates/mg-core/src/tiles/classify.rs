//! Neighbour rules for walled maps
//!
//! A floor cell takes an edge role from the walls around it, unless its
//! neighbours match one of the doorway patterns, in which case it stays
//! plain floor. Only cells with all eight neighbours inside the grid are
//! refined; the outer ring keeps its coarse role.

use super::role::TileRole;
use crate::grid::{Grid, Point};

/// The eight coarse neighbours of an interior cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbourhood {
    pub top_left: TileRole,
    pub top: TileRole,
    pub top_right: TileRole,
    pub right: TileRole,
    pub bottom_right: TileRole,
    pub bottom: TileRole,
    pub bottom_left: TileRole,
    pub left: TileRole,
}

impl Neighbourhood {
    /// Read the neighbours of `(x, y)`, `None` on the outer ring
    pub fn around(grid: &Grid<TileRole>, x: i32, y: i32) -> Option<Self> {
        if !grid.in_bounds(x - 1, y - 1) || !grid.in_bounds(x + 1, y + 1) {
            return None;
        }
        let at = |dx: i32, dy: i32| grid.at(x + dx, y + dy);
        Some(Self {
            top_left: at(-1, -1)?,
            top: at(0, -1)?,
            top_right: at(1, -1)?,
            right: at(1, 0)?,
            bottom_right: at(1, 1)?,
            bottom: at(0, 1)?,
            bottom_left: at(-1, 1)?,
            left: at(-1, 0)?,
        })
    }

    /// True when the cell is an opening through a wall
    pub fn is_door(&self) -> bool {
        use TileRole::{Floor, WallBase, WallTop};

        (self.top == WallBase && self.bottom == WallTop)
            || (self.left == WallTop && self.right == WallTop)
            || (self.left == WallBase && self.right == WallBase)
            || (self.left == Floor && self.top_left == WallBase && self.bottom_left == WallTop)
            || (self.right == Floor && self.top_right == WallBase && self.bottom_right == WallTop)
            || (self.top == Floor && self.top_left == WallBase && self.top_right == WallBase)
            || (self.bottom == Floor && self.bottom_left == WallTop && self.bottom_right == WallTop)
    }

    /// True when two walls meet at a right angle next to the cell
    pub fn is_corner(&self) -> bool {
        use TileRole::{WallBase, WallTop};

        let top_left = self.left.is_wall() && self.top == WallBase;
        let top_right = self.right.is_wall() && self.top == WallBase;
        let bottom_left = self.left == WallTop && self.bottom == WallTop;
        let bottom_right = self.right == WallTop && self.bottom == WallTop;
        top_left || top_right || bottom_left || bottom_right
    }

    /// Floor role implied by the walls around, ignoring doorways
    pub fn edge_role(&self) -> TileRole {
        if self.top == TileRole::WallBase {
            TileRole::FTop
        } else if self.bottom == TileRole::WallTop {
            TileRole::FBottom
        } else if self.right.is_wall() {
            TileRole::FRight
        } else if self.left.is_wall() {
            TileRole::FLeft
        } else if [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|&r| r == TileRole::Floor)
        {
            TileRole::FCenter
        } else {
            TileRole::Floor
        }
    }

    /// Whether the walls around support a proposed floor role
    pub fn supports(&self, role: TileRole) -> bool {
        match role {
            TileRole::FTop => self.top == TileRole::WallBase,
            TileRole::FRight => self.right.is_wall(),
            TileRole::FBottom => self.bottom == TileRole::WallTop,
            TileRole::FLeft => self.left.is_wall(),
            TileRole::FCenter => self.edge_role() == TileRole::FCenter,
            TileRole::Floor => self.edge_role() == TileRole::Floor,
            _ => false,
        }
    }
}

/// Fine role of a cell on a walled coarse grid
pub fn classify_walled(grid: &Grid<TileRole>, x: i32, y: i32) -> TileRole {
    let Some(coarse) = grid.at(x, y) else {
        return TileRole::WallTop;
    };
    if coarse != TileRole::Floor {
        return coarse;
    }
    match Neighbourhood::around(grid, x, y) {
        Some(n) if n.is_door() => TileRole::Floor,
        Some(n) => n.edge_role(),
        None => coarse,
    }
}

/// Whether a marker wanting `role` may stand on `(x, y)` of a walled grid
///
/// Floor roles need an interior floor cell that is neither a doorway nor
/// next to a wall corner, with walls that match the role. Wall markers may
/// only stand on wall bases.
pub fn can_place_walled(grid: &Grid<TileRole>, role: TileRole, x: i32, y: i32) -> bool {
    let Some(coarse) = grid.at(x, y) else {
        return false;
    };

    if coarse == TileRole::Floor && role.is_floor_family() {
        if let Some(n) = Neighbourhood::around(grid, x, y) {
            return !n.is_door() && !n.is_corner() && n.supports(role);
        }
    }
    role == TileRole::WallBase && coarse == TileRole::WallBase
}

/// Thicken wall tops with a one-row wall base
///
/// Every wall top standing on an open cell gets that cell turned into wall
/// base, or into wall top when the cell below it is also a wall top.
pub fn fix_block_tiles(grid: &mut Grid<TileRole>) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    for x in 0..w {
        for y in 0..h {
            if grid.at(x, y) != Some(TileRole::WallTop) {
                continue;
            }
            match grid.at(x, y + 1) {
                Some(below) if !below.is_wall() => {
                    let fill = if grid.at(x, y + 2) == Some(TileRole::WallTop) {
                        TileRole::WallTop
                    } else {
                        TileRole::WallBase
                    };
                    grid.put(x, y + 1, fill);
                }
                _ => {}
            }
        }
    }
}

/// Cells that receive a drop shadow
///
/// An open cell is shaded when its left neighbour is a wall and the cell
/// diagonally up-left is a wall top. Cells on the top row only need the
/// wall to the left.
pub fn shadow_cells(grid: &Grid<TileRole>) -> Vec<Point> {
    let mut cells = Vec::new();
    for (x, y, role) in grid.iter() {
        let (x, y) = (x as i32, y as i32);
        if x < 1 || role.is_wall() {
            continue;
        }
        let left_wall = grid.at(x - 1, y).is_some_and(TileRole::is_wall);
        let up_left_top = y == 0 || grid.at(x - 1, y - 1) == Some(TileRole::WallTop);
        if left_wall && up_left_top {
            cells.push(Point::new(x, y));
        }
    }
    cells
}
