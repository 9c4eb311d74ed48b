//! Autotile shape resolution
//!
//! Autotile ids start at 2048 and come in runs of 48 shapes per kind. The
//! shape is picked from which neighbours belong to a different kind, using
//! the atlas layout of the target engine for each of the three groups.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::layers::TileLayers;
use crate::consts::{AUTOTILE_BASE, AUTOTILE_VARIANTS, LAYER_COUNT};

bitflags! {
    /// Neighbours that belong to a different autotile kind
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EdgeMask: u8 {
        const LEFT = 0x01;
        const UP = 0x02;
        const RIGHT = 0x04;
        const DOWN = 0x08;
        const UP_LEFT = 0x10;
        const UP_RIGHT = 0x20;
        const DOWN_LEFT = 0x40;
        const DOWN_RIGHT = 0x80;
    }
}

impl EdgeMask {
    /// The four orthogonal bits as a 0..=15 value (left 1, up 2, right 4, down 8)
    pub fn orthogonal(self) -> u32 {
        (self.bits() & 0x0f) as u32
    }
}

/// Neighbour-test family of an autotile kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[repr(u8)]
pub enum AutotileGroup {
    /// Edges and corners, 48 shapes
    Normal = 0,
    /// Edges only, 16 shapes
    Wall = 1,
    /// Left and right edges only, 4 shapes
    Waterfall = 2,
}

impl AutotileGroup {
    /// Group of an autotile kind
    pub fn of_kind(kind: u32) -> Self {
        match kind {
            5 | 7 | 9 | 11 | 13 | 15 => AutotileGroup::Waterfall,
            48..=79 | 88..=95 | 104..=111 | 120..=127 => AutotileGroup::Wall,
            _ => AutotileGroup::Normal,
        }
    }
}

/// Autotile kind of a tile id, `None` for plain tiles
pub fn autotile_kind(tile_id: u32) -> Option<u32> {
    tile_id
        .checked_sub(AUTOTILE_BASE)
        .map(|offset| offset / AUTOTILE_VARIANTS)
}

/// Tile id of a kind drawn with a shape index
pub fn autotile_id(kind: u32, index: u32) -> u32 {
    AUTOTILE_BASE + AUTOTILE_VARIANTS * kind + index
}

/// Shape index for a group and neighbour mask
pub fn resolve_tile_index(group: AutotileGroup, mask: EdgeMask) -> u32 {
    match group {
        AutotileGroup::Waterfall => {
            let mut index = 0;
            if mask.contains(EdgeMask::LEFT) {
                index += 1;
            }
            if mask.contains(EdgeMask::RIGHT) {
                index += 2;
            }
            index
        }
        AutotileGroup::Wall => mask.orthogonal(),
        AutotileGroup::Normal => normal_index(mask),
    }
}

fn normal_index(mask: EdgeMask) -> u32 {
    let ul = mask.contains(EdgeMask::UP_LEFT);
    let ur = mask.contains(EdgeMask::UP_RIGHT);
    let dl = mask.contains(EdgeMask::DOWN_LEFT);
    let dr = mask.contains(EdgeMask::DOWN_RIGHT);
    let bit = |b: bool, v: u32| if b { v } else { 0 };

    match mask.orthogonal() {
        0 => bit(ul, 1) + bit(ur, 2) + bit(dr, 4) + bit(dl, 8),
        1 => 16 + bit(ur, 1) + bit(dr, 2),
        2 => 20 + bit(dr, 1) + bit(dl, 2),
        4 => 24 + bit(dl, 1) + bit(ul, 2),
        8 => 28 + bit(ul, 1) + bit(ur, 2),
        5 => 32,
        10 => 33,
        3 => {
            if dr {
                35
            } else {
                34
            }
        }
        6 => {
            if dl {
                37
            } else {
                36
            }
        }
        12 => {
            if ul {
                39
            } else {
                38
            }
        }
        9 => {
            if ur {
                41
            } else {
                40
            }
        }
        7 => 42,
        11 => 43,
        13 => 44,
        14 => 45,
        15 => 46,
        _ => 47,
    }
}

/// Neighbour mask of an autotile at `(x, y)` on layer `z`
///
/// A neighbour is an edge when it lies inside the map and holds a different
/// kind. Wall kinds ignore a left or right neighbour whose kind is eight
/// below their own.
pub fn edge_mask(layers: &TileLayers, kind: u32, x: i32, y: i32, z: usize) -> EdgeMask {
    let inside = |nx: i32, ny: i32| {
        nx >= 0 && ny >= 0 && (nx as usize) < layers.width() && (ny as usize) < layers.height()
    };
    let kind_at = |nx: i32, ny: i32| autotile_kind(layers.get(nx, ny, z));
    let edge = |nx: i32, ny: i32| inside(nx, ny) && kind_at(nx, ny) != Some(kind);
    let wall_edge = |nx: i32, ny: i32| edge(nx, ny) && kind_at(nx, ny).map(|k| k + 8) != Some(kind);

    let group = AutotileGroup::of_kind(kind);
    let mut mask = EdgeMask::empty();
    let (left, right) = match group {
        AutotileGroup::Wall => (wall_edge(x - 1, y), wall_edge(x + 1, y)),
        _ => (edge(x - 1, y), edge(x + 1, y)),
    };
    mask.set(EdgeMask::LEFT, left);
    mask.set(EdgeMask::RIGHT, right);
    if group == AutotileGroup::Waterfall {
        return mask;
    }

    mask.set(EdgeMask::UP, edge(x, y - 1));
    mask.set(EdgeMask::DOWN, edge(x, y + 1));
    if group == AutotileGroup::Normal {
        mask.set(EdgeMask::UP_LEFT, edge(x - 1, y - 1));
        mask.set(EdgeMask::UP_RIGHT, edge(x + 1, y - 1));
        mask.set(EdgeMask::DOWN_LEFT, edge(x - 1, y + 1));
        mask.set(EdgeMask::DOWN_RIGHT, edge(x + 1, y + 1));
    }
    mask
}

/// Re-resolve the shape of every autotile on every layer
///
/// Kinds listed in `skip` keep their tile ids.
pub fn update_all(layers: &mut TileLayers, skip: &[u32]) {
    for x in 0..layers.width() {
        for y in 0..layers.height() {
            for z in 0..LAYER_COUNT {
                let Some(kind) = autotile_kind(layers.get(x as i32, y as i32, z)) else {
                    continue;
                };
                if skip.contains(&kind) {
                    continue;
                }
                let mask = edge_mask(layers, kind, x as i32, y as i32, z);
                let index = resolve_tile_index(AutotileGroup::of_kind(kind), mask);
                layers.set(x, y, z, autotile_id(kind, index));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_id() {
        assert_eq!(autotile_kind(2047), None);
        assert_eq!(autotile_kind(2048), Some(0));
        assert_eq!(autotile_kind(2048 + 48 * 3 + 47), Some(3));
        assert_eq!(autotile_id(3, 47), 2048 + 48 * 3 + 47);
    }

    #[test]
    fn test_groups() {
        assert_eq!(AutotileGroup::of_kind(0), AutotileGroup::Normal);
        assert_eq!(AutotileGroup::of_kind(5), AutotileGroup::Waterfall);
        assert_eq!(AutotileGroup::of_kind(6), AutotileGroup::Normal);
        assert_eq!(AutotileGroup::of_kind(48), AutotileGroup::Wall);
        assert_eq!(AutotileGroup::of_kind(80), AutotileGroup::Normal);
        assert_eq!(AutotileGroup::of_kind(127), AutotileGroup::Wall);
    }

    #[test]
    fn test_normal_table() {
        let m = |bits: u8| EdgeMask::from_bits_truncate(bits);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, EdgeMask::empty()), 0);
        // all four corners open with no edges
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0xf0)), 15);
        // left edge, up-right corner
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x01 | 0x20)), 17);
        // up edge, down-left corner
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x02 | 0x40)), 22);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x05)), 32);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x0a)), 33);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x03)), 34);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x03 | 0x80)), 35);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x09 | 0x20)), 41);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0x0f)), 46);
        assert_eq!(resolve_tile_index(AutotileGroup::Normal, m(0xff)), 46);
    }

    #[test]
    fn test_wall_and_waterfall_tables() {
        let m = |bits: u8| EdgeMask::from_bits_truncate(bits);
        for bits in 0..16u8 {
            assert_eq!(resolve_tile_index(AutotileGroup::Wall, m(bits | 0xf0)), bits as u32);
        }
        assert_eq!(resolve_tile_index(AutotileGroup::Waterfall, m(0x01)), 1);
        assert_eq!(resolve_tile_index(AutotileGroup::Waterfall, m(0x04)), 2);
        assert_eq!(resolve_tile_index(AutotileGroup::Waterfall, m(0x0f)), 3);
    }

    #[test]
    fn test_update_single_tile() {
        let mut layers = TileLayers::new(3, 3);
        let water = autotile_id(2, 0);
        layers.set(1, 1, 0, water);
        update_all(&mut layers, &[]);
        // surrounded by plain tiles on every side
        assert_eq!(layers.get(1, 1, 0), autotile_id(2, 46));

        let mut layers = TileLayers::new(3, 3);
        layers.set(1, 1, 0, water);
        update_all(&mut layers, &[2]);
        assert_eq!(layers.get(1, 1, 0), water);
    }

    #[test]
    fn test_map_edge_is_not_an_edge() {
        let mut layers = TileLayers::new(1, 1);
        layers.set(0, 0, 0, autotile_id(0, 10));
        update_all(&mut layers, &[]);
        assert_eq!(layers.get(0, 0, 0), autotile_id(0, 0));
    }

    #[test]
    fn test_wall_ignores_kind_eight_below() {
        let mut layers = TileLayers::new(3, 1);
        layers.set(0, 0, 0, autotile_id(48, 0));
        layers.set(1, 0, 0, autotile_id(56, 0));
        layers.set(2, 0, 0, autotile_id(56, 0));
        update_all(&mut layers, &[]);
        assert_eq!(layers.get(1, 0, 0), autotile_id(56, 0));
        // kind 48 sees 56 to its right as an edge
        assert_eq!(layers.get(0, 0, 0), autotile_id(48, 4));
    }
}
