//! Binary space partitioning into rooms joined by corridors or roads
//!
//! The tree is an arena: nodes live in one `Vec` and refer to their children
//! by index. Children are always pushed after their parent, so walking the
//! arena backwards visits every child before its parent.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::rect::Rect;
use crate::consts::{DEFAULT_MAX_LEAF_SIZE, MIN_LEAF_SIZE, MIN_ROOM_SIZE};
use crate::grid::Grid;
use crate::rng::MapRng;

/// Percentage roll a balanced leaf must beat to split
const SPLIT_ROLL: i32 = 25;

/// Aspect ratio that forces a split across the long axis
const SPLIT_RATIO: f64 = 1.25;

/// How the rooms of a partition are connected
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BspStyle {
    /// Sibling rooms joined by L-shaped corridors
    #[default]
    Dungeon,
    /// Walled blocks with a road to the nearest leaf edge
    City,
}

/// One node of the partition tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BspNode {
    pub area: Rect,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub room: Option<Rect>,
    pub road: Option<Rect>,
    pub halls: Vec<Rect>,
}

impl BspNode {
    fn new(area: Rect) -> Self {
        Self {
            area,
            left: None,
            right: None,
            room: None,
            road: None,
            halls: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A finished partition
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    style: BspStyle,
}

impl BspTree {
    pub const ROOT: usize = 0;

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &BspNode {
        &self.nodes[idx]
    }

    pub fn style(&self) -> BspStyle {
        self.style
    }

    /// Terminal leaves in creation order
    pub fn terminals(&self) -> impl Iterator<Item = &BspNode> {
        self.nodes.iter().filter(|n| n.is_terminal())
    }

    /// Rooms of every terminal leaf
    pub fn rooms(&self) -> impl Iterator<Item = Rect> + '_ {
        self.nodes.iter().filter_map(|n| n.room)
    }

    /// Paint the tree onto a grid
    ///
    /// `values` are background, corridor/road, room interior, room border
    /// (city only) and a reserved fifth category.
    pub fn paint<T: Copy + PartialEq>(&self, width: usize, height: usize, values: &[T; 5]) -> Grid<T> {
        let [background, passage, interior, border, _] = *values;
        let mut grid = Grid::new(width, height, background);

        for node in &self.nodes {
            match self.style {
                BspStyle::City => {
                    for (x, y) in node.area.cells() {
                        if node.area.on_border(x, y) {
                            grid.put(x, y, passage);
                        }
                    }
                }
                BspStyle::Dungeon => {
                    for hall in &node.halls {
                        for (x, y) in hall.cells() {
                            grid.put(x, y, passage);
                        }
                    }
                }
            }
        }

        for room in self.rooms() {
            for (x, y) in room.cells() {
                let value = if self.style == BspStyle::City && room.on_border(x, y) {
                    border
                } else {
                    interior
                };
                grid.put(x, y, value);
            }
        }

        for road in self.nodes.iter().filter_map(|n| n.road) {
            for (x, y) in road.cells() {
                grid.put(x, y, passage);

                // a road ending under a wall corner opens the wall instead
                let above = grid.at(x, y - 1);
                let corner = grid.at(x - 1, y - 1) == Some(border)
                    || grid.at(x + 1, y - 1) == Some(border);
                if above == Some(border) && corner {
                    grid.put(x, y, interior);
                    grid.put(x, y - 1, interior);
                }
            }
        }

        grid
    }
}

/// Recursive rectangle splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacePartitioner {
    style: BspStyle,
    max_leaf_size: i32,
}

impl SpacePartitioner {
    /// Create a partitioner; leaf sizes below the minimum are raised to it
    pub fn new(style: BspStyle, max_leaf_size: i32) -> Self {
        Self {
            style,
            max_leaf_size: max_leaf_size.max(MIN_LEAF_SIZE),
        }
    }

    pub fn style(&self) -> BspStyle {
        self.style
    }

    pub fn max_leaf_size(&self) -> i32 {
        self.max_leaf_size
    }

    /// Partition and paint in one call
    pub fn generate<T: Copy + PartialEq>(
        &self,
        width: usize,
        height: usize,
        values: &[T; 5],
        rng: &mut MapRng,
    ) -> Grid<T> {
        self.partition(width, height, rng).paint(width, height, values)
    }

    /// Build the tree, then its rooms, corridors and roads
    pub fn partition(&self, width: usize, height: usize, rng: &mut MapRng) -> BspTree {
        let mut nodes = vec![BspNode::new(Rect::new(0, 0, width as i32, height as i32))];

        let mut next = 0;
        while next < nodes.len() {
            let area = nodes[next].area;
            let oversized = area.width() > self.max_leaf_size || area.height() > self.max_leaf_size;
            if oversized || rng.rand(1, 100) > SPLIT_ROLL {
                if let Some((a, b)) = split_area(area, rng) {
                    let left = nodes.len();
                    nodes.push(BspNode::new(a));
                    nodes.push(BspNode::new(b));
                    nodes[next].left = Some(left);
                    nodes[next].right = Some(left + 1);
                }
            }
            next += 1;
        }

        let mut tree = BspTree {
            nodes,
            style: self.style,
        };
        for idx in (0..tree.nodes.len()).rev() {
            self.furnish(&mut tree, idx, rng);
        }
        tree
    }

    fn furnish(&self, tree: &mut BspTree, idx: usize, rng: &mut MapRng) {
        let node = &tree.nodes[idx];
        if let (Some(l), Some(r)) = (node.left, node.right) {
            let left_room = pick_room(tree, l, rng);
            let right_room = pick_room(tree, r, rng);
            if let (Some(a), Some(b)) = (left_room, right_room) {
                tree.nodes[idx].halls = connect_rooms(&a, &b, rng);
            }
            return;
        }

        let area = node.area;
        let Some(room) = carve_room(area, rng) else {
            return;
        };
        tree.nodes[idx].room = Some(room);
        if self.style == BspStyle::City {
            tree.nodes[idx].road = Some(nearest_road(area, &room));
        }
    }
}

impl Default for SpacePartitioner {
    fn default() -> Self {
        Self::new(BspStyle::Dungeon, DEFAULT_MAX_LEAF_SIZE)
    }
}

/// Split an area in two, or `None` when it is too small
fn split_area(area: Rect, rng: &mut MapRng) -> Option<(Rect, Rect)> {
    let (w, h) = (area.width(), area.height());

    let mut horizontal = rng.coin();
    if w > h && w as f64 / h as f64 >= SPLIT_RATIO {
        horizontal = false;
    } else if h > w && h as f64 / w as f64 >= SPLIT_RATIO {
        horizontal = true;
    }

    let max = if horizontal { h } else { w } - MIN_LEAF_SIZE;
    if max <= MIN_LEAF_SIZE {
        return None;
    }
    let split = rng.rand(MIN_LEAF_SIZE, max);

    let (x, y) = (area.left, area.top);
    Some(if horizontal {
        (Rect::new(x, y, w, split), Rect::new(x, y + split, w, h - split))
    } else {
        (Rect::new(x, y, split, h), Rect::new(x + split, y, w - split, h))
    })
}

/// A room strictly inside `area`, at least one free cell from every edge
fn carve_room(area: Rect, rng: &mut MapRng) -> Option<Rect> {
    let max_w = area.width() - 5;
    let max_h = area.height() - 5;
    if max_w < 1 || max_h < 1 {
        return None;
    }

    let w = rng.rand(MIN_ROOM_SIZE.min(max_w), max_w);
    let h = rng.rand(MIN_ROOM_SIZE.min(max_h), max_h);
    let x = rng.rand(area.left + 1, area.left + area.width() - w - 2);
    let y = rng.rand(area.top + 1, area.top + area.height() - h - 2);
    Some(Rect::new(x, y, w, h))
}

/// Some room below `idx`, choosing a random side when both have one
fn pick_room(tree: &BspTree, idx: usize, rng: &mut MapRng) -> Option<Rect> {
    let node = &tree.nodes[idx];
    if let Some(room) = node.room {
        return Some(room);
    }
    let left = node.left.and_then(|l| pick_room(tree, l, rng));
    let right = node.right.and_then(|r| pick_room(tree, r, rng));
    match (left, right) {
        (Some(l), Some(r)) => Some(if rng.coin() { l } else { r }),
        (l, r) => l.or(r),
    }
}

fn horizontal_hall(x: i32, y: i32, len: i32) -> Rect {
    Rect::extent(x, y, len, 2)
}

fn vertical_hall(x: i32, y: i32, len: i32) -> Rect {
    Rect::extent(x, y, 1, len)
}

/// Corridor segments joining the centres of two rooms
///
/// Straight when the centres share a row or column, otherwise an L whose
/// orientation is a coin flip.
pub fn connect_rooms(a: &Rect, b: &Rect, rng: &mut MapRng) -> Vec<Rect> {
    let (x1, y1) = (a.cx(), a.cy());
    let (x2, y2) = (b.cx(), b.cy());
    let (w, h) = (x2 - x1, y2 - y1);
    let (aw, ah) = (w.abs(), h.abs());

    use std::cmp::Ordering::*;
    match (w.cmp(&0), h.cmp(&0)) {
        (Less, Less) => {
            if rng.coin() {
                vec![horizontal_hall(x2, y1, aw), vertical_hall(x2, y2, ah)]
            } else {
                vec![horizontal_hall(x2, y2, aw), vertical_hall(x1, y2, ah)]
            }
        }
        (Less, Greater) => {
            if rng.coin() {
                vec![horizontal_hall(x2, y1, aw), vertical_hall(x2, y1, ah)]
            } else {
                vec![horizontal_hall(x2, y2, aw), vertical_hall(x1, y1, ah)]
            }
        }
        (Less, Equal) => vec![horizontal_hall(x2, y2, aw)],
        (Greater, Less) => {
            if rng.coin() {
                vec![horizontal_hall(x1, y2, aw), vertical_hall(x1, y2, ah)]
            } else {
                vec![horizontal_hall(x1, y1, aw), vertical_hall(x2, y2, ah)]
            }
        }
        (Greater, Greater) => {
            if rng.coin() {
                vec![horizontal_hall(x1, y1, aw), vertical_hall(x2, y1, ah)]
            } else {
                vec![horizontal_hall(x1, y2, aw), vertical_hall(x1, y1, ah)]
            }
        }
        (Greater, Equal) => vec![horizontal_hall(x1, y1, aw)],
        (Equal, Less) => vec![vertical_hall(x2, y2, ah)],
        (Equal, Greater) => vec![vertical_hall(x1, y1, ah)],
        (Equal, Equal) => Vec::new(),
    }
}

/// Road from a room to the nearest leaf edge
///
/// Ties go to the first side in the order up, right, bottom, left.
pub fn nearest_road(leaf: Rect, room: &Rect) -> Rect {
    let up = (room.top - leaf.top).abs();
    let right = (leaf.right - room.right).abs();
    let bottom = (leaf.bottom - room.bottom).abs();
    let left = (room.left - leaf.left).abs();
    let nearest = up.min(right).min(bottom).min(left);

    if nearest == up {
        Rect::extent(room.cx(), leaf.top, 1, up)
    } else if nearest == right {
        Rect::extent(room.right, room.cy(), right, 1)
    } else if nearest == bottom {
        Rect::extent(room.cx(), room.bottom + 1, 1, bottom)
    } else {
        Rect::extent(leaf.left, room.cy(), left, 1)
    }
}
