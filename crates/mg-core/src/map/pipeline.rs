//! The generation pipeline
//!
//! Stages run in a fixed order on one owned working set: coarse grid,
//! border frame and wall thickening, entrance and exit, classification into
//! tile stacks, fog, shadows, autotiling and finally marker placement.

use super::artifact::GeneratedMap;
use super::resource::ResourceMap;
use crate::consts::{MIN_MAP_SIZE, SHADOW_BITS, SHADOW_LAYER};
use crate::error::GenError;
use crate::grid::{Grid, Point};
use crate::placement::{Candidates, MarkerRules, PlacementEngine, place_entrance_exit};
use crate::rng::MapRng;
use crate::tiles::{TileLayers, TileRole, TileRoleTable, autotile, fix_block_tiles, shadow_cells};

/// Generate a map from a resource map, seeding from its `seed` tag or entropy
pub fn generate(resource: &ResourceMap) -> Result<GeneratedMap, GenError> {
    let mut rng = match resource.meta.seed {
        Some(seed) => MapRng::new(seed),
        None => MapRng::from_entropy(),
    };
    generate_map(resource, &mut rng)
}

/// Generate a map from a resource map with a caller-provided generator
pub fn generate_map(resource: &ResourceMap, rng: &mut MapRng) -> Result<GeneratedMap, GenError> {
    resource.check_shape()?;
    let (width, height) = (resource.width, resource.height);
    if width < MIN_MAP_SIZE || height < MIN_MAP_SIZE {
        return Err(GenError::MapTooSmall {
            width,
            height,
            min: MIN_MAP_SIZE,
        });
    }

    let settings = resource.meta.validate(width, height)?;
    let flavor = settings.flavor.generator();
    let palette = TileRoleTable::load(resource, settings.flavor, flavor.palette())?;
    let rules = MarkerRules::from_templates(resource.templates(), rng);
    tracing::debug!(
        "Generating {}x{} {} map (seed {}, border {})",
        width,
        height,
        settings.flavor,
        rng.seed(),
        settings.border
    );

    let mut coarse = flavor.build_coarse_grid(width, height, &settings, rng);
    apply_border(&mut coarse, settings.border as usize);
    fix_block_tiles(&mut coarse);
    tracing::debug!(
        "Coarse grid ready: {} open cells",
        coarse.iter().filter(|(_, _, r)| !r.is_wall()).count()
    );

    let entrance = place_entrance_exit(&coarse, flavor, settings.border, rng);
    tracing::debug!(
        "Entrance at {:?} ({}), exit at {:?} ({})",
        entrance.entrance,
        entrance.entrance_side,
        entrance.exit,
        entrance.exit_side
    );

    let mut roles = Grid::new(width, height, TileRole::WallTop);
    let mut layers = TileLayers::new(width, height);
    let mut candidates = Candidates::new();
    for x in 0..width {
        for y in 0..height {
            let role = flavor.classify(&coarse, x as i32, y as i32);
            roles.set(x, y, role);
            layers.set_stack(x, y, &palette.stack(role));
            candidates
                .entry(role)
                .or_default()
                .push(Point::new(x as i32, y as i32));
        }
    }

    let fog = Grid::new(width, height, settings.fog_range.is_none());

    let shadows = shadow_cells(&roles);
    for p in &shadows {
        layers.set(p.x as usize, p.y as usize, SHADOW_LAYER, SHADOW_BITS);
    }
    autotile::update_all(&mut layers, &settings.skip);
    tracing::debug!("Tiles resolved, {} shadow cells", shadows.len());

    let mut engine = PlacementEngine::new(flavor, &coarse);
    if let Some(template) = &rules.entrance {
        engine.copy_marker(template, entrance.entrance.x, entrance.entrance.y);
    }
    if let Some(template) = &rules.exit {
        engine.copy_marker(template, entrance.exit.x, entrance.exit.y);
    }
    engine.spawn(&rules, &candidates, rng);
    let markers = engine.into_placed();
    tracing::debug!("Placed {} markers", markers.len());

    Ok(GeneratedMap {
        flavor: settings.flavor,
        seed: rng.seed(),
        meta: resource.meta.clone(),
        roles,
        layers,
        fog,
        fog_tile: settings.fog_tile,
        fog_range: settings.fog_range,
        markers,
        entrance,
    })
}

/// Force a wall-top frame `border` cells thick around the grid
fn apply_border(grid: &mut Grid<TileRole>, border: usize) {
    let (w, h) = (grid.width(), grid.height());
    for y in 0..h {
        for x in 0..w {
            if x < border || y < border || x >= w.saturating_sub(border) || y >= h.saturating_sub(border) {
                grid.set(x, y, TileRole::WallTop);
            }
        }
    }
}
