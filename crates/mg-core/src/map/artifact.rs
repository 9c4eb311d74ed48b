//! The generated map handed to rendering and persistence

use serde::{Deserialize, Serialize};

use crate::config::MapMeta;
use crate::flavor::Flavor;
use crate::grid::{Direction, Grid, Point};
use crate::placement::{EntranceExit, PlacedMarker};
use crate::tiles::{TileLayers, TileRole};

/// A fully generated map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMap {
    pub flavor: Flavor,
    /// Seed the map was generated from
    pub seed: u64,
    /// Tags of the resource map, kept for revisits
    pub meta: MapMeta,
    /// Classified role of every cell
    pub roles: Grid<TileRole>,
    pub layers: TileLayers,
    /// Revealed cells; all true when the map has no fog of war
    pub fog: Grid<bool>,
    /// Tile drawn over unrevealed cells
    pub fog_tile: u32,
    /// Reveal radius when the map has fog of war
    pub fog_range: Option<u32>,
    pub markers: Vec<PlacedMarker>,
    pub entrance: EntranceExit,
}

impl GeneratedMap {
    /// Width in cells
    pub fn width(&self) -> usize {
        self.layers.width()
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.layers.height()
    }

    /// True when roles, fog and tile layers all cover the same cells
    pub fn is_well_formed(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        self.layers.is_well_formed()
            && [self.roles.width(), self.fog.width()] == [w, w]
            && [self.roles.height(), self.fog.height()] == [h, h]
            && self.roles.is_well_formed()
            && self.fog.is_well_formed()
    }

    /// Tile to draw at a cell, the fog tile while it is hidden
    pub fn visible_tile(&self, x: i32, y: i32, z: usize) -> u32 {
        match self.fog.at(x, y) {
            Some(true) => self.layers.get(x, y, z),
            Some(false) => self.fog_tile,
            None => 0,
        }
    }

    /// Whether a cell is revealed; cells outside the map never are
    pub fn is_revealed(&self, x: i32, y: i32) -> bool {
        self.fog.at(x, y).unwrap_or(false)
    }

    /// Reveal the view cone of a viewer at `(px, py)` facing `facing`
    ///
    /// The cone reaches `radius` cells ahead and `ceil(radius / 2)` cells to
    /// each side. The farthest line only includes the cells strictly inside
    /// the side limits. Returns the number of newly revealed cells.
    pub fn reveal(&mut self, px: i32, py: i32, facing: Direction, radius: u32) -> usize {
        let r = radius as i32;
        let mid = (r + 1) / 2;
        let mut revealed = 0;

        let mut uncover = |fog: &mut Grid<bool>, x: i32, y: i32| {
            if fog.at(x, y) == Some(false) {
                fog.put(x, y, true);
                revealed += 1;
            }
        };

        match facing {
            Direction::Up | Direction::Down => {
                let far = if facing == Direction::Up { py - r } else { py + r };
                let (y0, y1) = (py.min(far), py.max(far));
                for x in px - mid..=px + mid {
                    for y in y0..=y1 {
                        if y != far || (x > px - mid && x < px + mid) {
                            uncover(&mut self.fog, x, y);
                        }
                    }
                }
            }
            Direction::Left | Direction::Right => {
                let far = if facing == Direction::Left { px - r } else { px + r };
                let (x0, x1) = (px.min(far), px.max(far));
                for x in x0..=x1 {
                    for y in py - mid..=py + mid {
                        if x != far || (y > py - mid && y < py + mid) {
                            uncover(&mut self.fog, x, y);
                        }
                    }
                }
            }
        }
        revealed
    }

    /// Reveal around a viewer using the map's own fog range
    ///
    /// Does nothing on maps without fog of war.
    pub fn refresh_fog(&mut self, px: i32, py: i32, facing: Direction) -> usize {
        match self.fog_range {
            Some(radius) => self.reveal(px, py, facing, radius),
            None => 0,
        }
    }

    /// Move the entrance to where the player stands
    pub fn refresh_entrance(&mut self, x: i32, y: i32, side: Direction) {
        self.entrance.refresh_entrance(Point::new(x, y), side);
    }

    /// Role grid as text, one line per row
    pub fn ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for y in 0..self.height() {
            for x in 0..self.width() {
                let p = Point::new(x as i32, y as i32);
                let c = if p == self.entrance.entrance {
                    'E'
                } else if p == self.entrance.exit {
                    'X'
                } else if self.markers.iter().any(|m| m.x == p.x && m.y == p.y) {
                    '@'
                } else {
                    self.roles.get(x, y).glyph()
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}
