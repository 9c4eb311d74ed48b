//! Constrained random marker placement

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::template::{MarkerMeta, MarkerRules, MarkerTemplate};
use crate::flavor::MapFlavor;
use crate::grid::{Direction, Grid, Point};
use crate::rng::MapRng;
use crate::tiles::TileRole;

/// Cells of each classified role, in scan order
pub type Candidates = BTreeMap<TileRole, Vec<Point>>;

/// A template copied onto the generated map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    /// Position in the generated map's marker list, starting at 1
    pub id: usize,
    /// Id of the template on the resource map
    pub source_id: u32,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub meta: MarkerMeta,
}

/// Offset position of an attached marker
///
/// The gap between primary and attached marker is one cell plus both
/// footprints along the attachment axis.
pub fn attached_position(primary: &MarkerMeta, attached: &MarkerMeta, pos: Point, dir: Direction) -> Point {
    let w = footprint(primary.width.saturating_add(attached.width)).saturating_add(1);
    let h = footprint(primary.height.saturating_add(attached.height)).saturating_add(1);
    match dir {
        Direction::Down => Point::new(pos.x, pos.y.saturating_add(h)),
        Direction::Left => Point::new(pos.x.saturating_sub(w), pos.y),
        Direction::Right => Point::new(pos.x.saturating_add(w), pos.y),
        Direction::Up => Point::new(pos.x, pos.y.saturating_sub(h)),
    }
}

/// Footprint extent in grid units, clamped to `i32::MAX`
fn footprint(cells: u32) -> i32 {
    i32::try_from(cells).unwrap_or(i32::MAX)
}

/// Spawns markers onto a coarse grid
pub struct PlacementEngine<'a> {
    flavor: &'a dyn MapFlavor,
    coarse: &'a Grid<TileRole>,
    placed: Vec<PlacedMarker>,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(flavor: &'a dyn MapFlavor, coarse: &'a Grid<TileRole>) -> Self {
        Self {
            flavor,
            coarse,
            placed: Vec::new(),
        }
    }

    pub fn placed(&self) -> &[PlacedMarker] {
        &self.placed
    }

    pub fn into_placed(self) -> Vec<PlacedMarker> {
        self.placed
    }

    /// Copy a template to a position without any checks
    pub fn copy_marker(&mut self, template: &MarkerTemplate, x: i32, y: i32) -> usize {
        let id = self.placed.len() + 1;
        self.placed.push(PlacedMarker {
            id,
            source_id: template.id,
            name: template.name.clone(),
            x,
            y,
            meta: template.meta.clone(),
        });
        id
    }

    /// Spacing, margin and structure check for a marker at `(x, y)`
    ///
    /// Rejects positions with another marker within the footprint distance
    /// on either axis, footprints leaving the one-cell interior margin, and
    /// cells the flavor rejects for the marker's role. Attached markers skip
    /// the flavor check.
    pub fn can_place_marker(&self, meta: &MarkerMeta, x: i32, y: i32) -> bool {
        let crowded = self
            .placed
            .iter()
            .any(|m| m.x.abs_diff(x) <= meta.width && m.y.abs_diff(y) <= meta.height);
        if crowded {
            return false;
        }

        let (w, h) = (footprint(meta.width), footprint(meta.height));
        let left = x.saturating_sub(w / 2);
        let right = x.saturating_add(w / 2);
        let top = y.saturating_sub(h - 1);
        let bottom = y;
        let (mw, mh) = (self.coarse.width() as i32, self.coarse.height() as i32);
        if left < 1 || right >= mw - 1 || top < 1 || bottom >= mh - 1 {
            return false;
        }

        if meta.side_of.is_some() {
            return true;
        }
        match meta.tile {
            Some(role) => self.flavor.can_place(self.coarse, role, x, y),
            None => false,
        }
    }

    /// Spawn every role-bound template
    ///
    /// Roles with fewer candidates go first so that rare cells are not
    /// taken by markers that could have used common ones; roles without
    /// candidates go last. Within a role, templates with a minimum go first.
    pub fn spawn(&mut self, rules: &MarkerRules, candidates: &Candidates, rng: &mut MapRng) {
        let count = |role: &TileRole| candidates.get(role).map_or(0, Vec::len);
        let mut order: Vec<TileRole> = self.flavor.roles().to_vec();
        order.sort_by_key(|role| (count(role) == 0, count(role)));

        for role in order {
            let Some(templates) = rules.by_role.get(&role) else {
                continue;
            };
            let mut templates: Vec<&MarkerTemplate> = templates.iter().collect();
            templates.sort_by_key(|t| t.meta.min_count().is_none());

            let cells = candidates.get(&role).map(Vec::as_slice).unwrap_or_default();
            for template in templates {
                let attachments = rules.attachments(template);
                let spawned = self.spawn_template(template, cells.to_vec(), attachments, rng);
                tracing::debug!(
                    "Spawned {} x '{}' (template {}) on {}",
                    spawned,
                    template.name,
                    template.id,
                    role
                );
            }
        }
    }

    /// Spawn one template from its candidate pool, returning the count placed
    ///
    /// Minimum mode places until the minimum is met, maximum mode gates each
    /// valid pick by the rate until the maximum is met, and otherwise every
    /// candidate is tried once against the rate. Exhausting the pool ends the
    /// template early.
    pub fn spawn_template(
        &mut self,
        template: &MarkerTemplate,
        mut pool: Vec<Point>,
        attachments: Option<&HashMap<Direction, MarkerTemplate>>,
        rng: &mut MapRng,
    ) -> u32 {
        let meta = &template.meta;
        let rate = meta.rate_percent();
        let mut spawned = 0;

        if let Some(min) = meta.min_count() {
            while spawned < min {
                let Some(pos) = self.pick_valid(meta, &mut pool, rng) else {
                    tracing::warn!(
                        "Only {} of {} '{}' markers fit on the map",
                        spawned,
                        min,
                        template.name
                    );
                    break;
                };
                self.place_with_attachments(template, pos, attachments);
                spawned += 1;
            }
        } else if let Some(max) = meta.max_count() {
            while spawned < max {
                let Some(pos) = self.pick_valid(meta, &mut pool, rng) else {
                    break;
                };
                if rng.percent(rate) {
                    self.place_with_attachments(template, pos, attachments);
                    spawned += 1;
                }
            }
        } else {
            for pos in pool {
                if self.can_place_marker(meta, pos.x, pos.y) && rng.percent(rate) {
                    self.place_with_attachments(template, pos, attachments);
                    spawned += 1;
                }
            }
        }
        spawned
    }

    /// Draw random candidates until one passes, dropping every drawn cell
    fn pick_valid(&self, meta: &MarkerMeta, pool: &mut Vec<Point>, rng: &mut MapRng) -> Option<Point> {
        while let Some(idx) = rng.choose_index(pool.len()) {
            let pos = pool.swap_remove(idx);
            if self.can_place_marker(meta, pos.x, pos.y) {
                return Some(pos);
            }
        }
        None
    }

    fn place_with_attachments(
        &mut self,
        template: &MarkerTemplate,
        pos: Point,
        attachments: Option<&HashMap<Direction, MarkerTemplate>>,
    ) {
        self.copy_marker(template, pos.x, pos.y);

        let Some(attachments) = attachments else {
            return;
        };
        for dir in Direction::all() {
            let Some(attached) = attachments.get(&dir) else {
                continue;
            };
            let p = attached_position(&template.meta, &attached.meta, pos, dir);
            if self.can_place_marker(&attached.meta, p.x, p.y) {
                self.copy_marker(attached, p.x, p.y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::Flavor;
    use crate::placement::template::SideOf;

    /// Open floor surrounded by a one-cell wall frame
    fn open_room(w: usize, h: usize) -> Grid<TileRole> {
        let mut g = Grid::new(w, h, TileRole::Floor);
        for x in 0..w {
            g.set(x, 0, TileRole::WallTop);
            g.set(x, h - 1, TileRole::WallTop);
        }
        for y in 0..h {
            g.set(0, y, TileRole::WallTop);
            g.set(w - 1, y, TileRole::WallTop);
        }
        g
    }

    fn template(id: u32, meta: MarkerMeta) -> MarkerTemplate {
        MarkerTemplate {
            id,
            name: format!("marker{id}"),
            x: 0,
            y: 0,
            meta,
        }
    }

    fn center_meta() -> MarkerMeta {
        MarkerMeta {
            tile: Some(TileRole::FCenter),
            ..MarkerMeta::default()
        }
    }

    #[test]
    fn test_attached_offsets() {
        let a = MarkerMeta { width: 2, height: 3, ..MarkerMeta::default() };
        let b = MarkerMeta::default();
        let p = Point::new(10, 10);
        assert_eq!(attached_position(&a, &b, p, Direction::Down), Point::new(10, 15));
        assert_eq!(attached_position(&a, &b, p, Direction::Up), Point::new(10, 5));
        assert_eq!(attached_position(&a, &b, p, Direction::Left), Point::new(6, 10));
        assert_eq!(attached_position(&a, &b, p, Direction::Right), Point::new(14, 10));
    }

    #[test]
    fn test_spacing_and_margin() {
        let grid = open_room(20, 20);
        let flavor = Flavor::Cave.generator();
        let mut engine = PlacementEngine::new(flavor, &grid);
        let meta = center_meta();

        assert!(engine.can_place_marker(&meta, 5, 5));
        engine.copy_marker(&template(1, meta.clone()), 5, 5);
        assert!(!engine.can_place_marker(&meta, 6, 6));
        assert!(!engine.can_place_marker(&meta, 5, 4));
        assert!(engine.can_place_marker(&meta, 7, 5));

        // footprint leaves the interior margin
        let tall = MarkerMeta { height: 3, ..center_meta() };
        assert!(!engine.can_place_marker(&tall, 10, 2));
        assert!(engine.can_place_marker(&tall, 10, 12));

        // no role and no attachment means nowhere to go
        assert!(!engine.can_place_marker(&MarkerMeta::default(), 12, 12));
    }

    #[test]
    fn test_oversized_footprint_rejected() {
        let grid = open_room(20, 20);
        let mut engine = PlacementEngine::new(Flavor::Cave.generator(), &grid);
        let huge = MarkerMeta {
            width: u32::MAX,
            height: u32::MAX,
            ..center_meta()
        };
        assert!(!engine.can_place_marker(&huge, 10, 10));

        let p = Point::new(10, 10);
        assert_eq!(attached_position(&huge, &huge, p, Direction::Right), Point::new(i32::MAX, 10));
        assert_eq!(attached_position(&huge, &huge, p, Direction::Left), Point::new(10 - i32::MAX, 10));

        let side = MarkerMeta {
            side_of: Some(SideOf { target: "1".into(), direction: Some(Direction::Down) }),
            ..MarkerMeta::default()
        };
        let below = attached_position(&huge, &side, p, Direction::Down);
        assert_eq!(below, Point::new(10, i32::MAX));
        assert!(!engine.can_place_marker(&side, below.x, below.y));

        // far away markers never crowd a small one
        engine.copy_marker(&template(1, side.clone()), below.x, below.y);
        assert!(engine.can_place_marker(&center_meta(), 5, 5));
    }

    #[test]
    fn test_min_three_of_ten() {
        let grid = open_room(30, 30);
        let flavor = Flavor::Cave.generator();
        let mut engine = PlacementEngine::new(flavor, &grid);
        let pool: Vec<Point> = (0..10).map(|i| Point::new(3 + 2 * i, 10)).collect();
        let meta = MarkerMeta { min: Some(3), ..center_meta() };

        let mut rng = MapRng::new(3);
        let n = engine.spawn_template(&template(1, meta), pool.clone(), None, &mut rng);
        assert_eq!(n, 3);
        let placed = engine.placed();
        assert_eq!(placed.len(), 3);
        for (i, a) in placed.iter().enumerate() {
            assert!(pool.contains(&Point::new(a.x, a.y)));
            for b in &placed[i + 1..] {
                assert_ne!((a.x, a.y), (b.x, b.y));
            }
        }
    }

    #[test]
    fn test_min_three_of_one() {
        let grid = open_room(30, 30);
        let flavor = Flavor::Cave.generator();
        let mut engine = PlacementEngine::new(flavor, &grid);
        let meta = MarkerMeta { min: Some(3), ..center_meta() };
        let mut rng = MapRng::new(3);
        let n = engine.spawn_template(&template(1, meta), vec![Point::new(10, 10)], None, &mut rng);
        assert_eq!(n, 1);
        assert_eq!(engine.placed().len(), 1);
    }

    #[test]
    fn test_max_and_default_modes() {
        let grid = open_room(40, 40);
        let flavor = Flavor::Cave.generator();
        let pool: Vec<Point> = (0..12).map(|i| Point::new(3 + 3 * i, 20)).collect();
        let mut rng = MapRng::new(8);

        let mut engine = PlacementEngine::new(flavor, &grid);
        let meta = MarkerMeta { max: Some(4), rate: 100.0, ..center_meta() };
        assert_eq!(engine.spawn_template(&template(1, meta), pool.clone(), None, &mut rng), 4);

        let mut engine = PlacementEngine::new(flavor, &grid);
        let meta = MarkerMeta { max: Some(4), rate: 0.0, ..center_meta() };
        assert_eq!(engine.spawn_template(&template(1, meta), pool.clone(), None, &mut rng), 0);

        let mut engine = PlacementEngine::new(flavor, &grid);
        let meta = MarkerMeta { rate: 100.0, ..center_meta() };
        assert_eq!(engine.spawn_template(&template(1, meta), pool, None, &mut rng), 12);
    }

    #[test]
    fn test_attachment_follows_primary() {
        let grid = open_room(30, 30);
        let flavor = Flavor::Cave.generator();
        let mut engine = PlacementEngine::new(flavor, &grid);
        let primary = template(1, MarkerMeta { min: Some(1), ..center_meta() });
        let guard = template(
            2,
            MarkerMeta {
                side_of: Some(SideOf { target: "1".into(), direction: Some(Direction::Right) }),
                ..MarkerMeta::default()
            },
        );
        // the second attachment would land outside the map and is skipped
        let lost = template(
            3,
            MarkerMeta {
                side_of: Some(SideOf { target: "1".into(), direction: Some(Direction::Left) }),
                ..MarkerMeta::default()
            },
        );
        let attachments = HashMap::from([(Direction::Right, guard), (Direction::Left, lost)]);

        let mut rng = MapRng::new(0);
        let n = engine.spawn_template(&primary, vec![Point::new(3, 10)], Some(&attachments), &mut rng);
        assert_eq!(n, 1);
        let placed = engine.placed();
        assert_eq!(placed.len(), 2);
        assert_eq!((placed[1].source_id, placed[1].x, placed[1].y), (2, 6, 10));
    }
}
