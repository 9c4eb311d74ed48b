use super::{Flavor, MapFlavor};
use crate::config::GenSettings;
use crate::generator::{MazeCarver, MazeCell};
use crate::grid::Grid;
use crate::rng::MapRng;
use crate::tiles::TileRole;

/// Block-scaled maze corridors
#[derive(Debug, Clone, Copy, Default)]
pub struct MazeFlavor;

impl MapFlavor for MazeFlavor {
    fn flavor(&self) -> Flavor {
        Flavor::Maze
    }

    fn build_coarse_grid(
        &self,
        width: usize,
        height: usize,
        settings: &GenSettings,
        rng: &mut MapRng,
    ) -> Grid<TileRole> {
        MazeCarver::new(settings.block_size)
            .generate(width, height, rng)
            .map(|cell| match cell {
                MazeCell::Floor => TileRole::Floor,
                MazeCell::Wall | MazeCell::Unset => TileRole::WallTop,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapMeta;

    #[test]
    fn test_unset_cells_become_walls() {
        let mut meta = MapMeta::for_flavor(Flavor::Maze);
        meta.block_size = Some(3);
        let settings = meta.validate(40, 31).unwrap();
        let mut rng = MapRng::new(9);
        let grid = MazeFlavor.build_coarse_grid(40, 31, &settings, &mut rng);
        // 13 lattice columns scale to 39, column 39 is beyond the maze
        for y in 0..31 {
            assert_eq!(grid.get(39, y), TileRole::WallTop);
        }
        assert!(grid.count(TileRole::Floor) > 0);
    }
}
