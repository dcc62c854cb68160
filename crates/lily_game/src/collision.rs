//! Tile-grid geometry and collision queries.
//!
//! Gameplay truth lives in the passive tile grid: every tile carries a
//! per-side solidity mask, and entities resolve movement against the cells
//! around the one their hit-box center maps onto. Movement is axis-separable:
//! horizontal first, then vertical, each snapping back to the previous
//! tile-aligned edge when the neighbouring cell blocks that side.

use crate::archetype::{Archetype, ArchetypeId, ArchetypeRegistry, Solidity};
use crate::entity::Entity;
use crate::level::TileGrid;
use lily_core::animation::Flip;

/// Width and height of one tile in logical pixels.
pub const TILE_SIZE: i32 = 16;
pub const SCREEN_COLUMNS: usize = 20;
pub const SCREEN_ROWS: usize = 15;
pub const SCREEN_TILES: usize = SCREEN_COLUMNS * SCREEN_ROWS;
/// Speed limit for any entity, in logical pixels per second. At the 41 ms
/// frame-time cap this stays under one tile per frame.
pub const MAX_VELOCITY: f64 = 384.0;

const TILE: f64 = TILE_SIZE as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    None,
    Left,
    Right,
}

/// Axis-aligned edges in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Borders {
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

/// Cell that the entity's hit-box center falls in, as `(row, col)`.
///
/// Uses floor division so positions above or left of the grid map to
/// negative cells instead of collapsing onto row/column zero.
pub fn nearest_cell(entity: &Entity) -> (i64, i64) {
    let body = entity.body;
    let row = ((entity.y + body.y as f64 + body.h as f64 / 2.0) / TILE).floor();
    let col = ((entity.x + body.x as f64 + body.w as f64 / 2.0) / TILE).floor();
    (row as i64, col as i64)
}

/// Hit-box edges of `entity`.
pub fn borders(entity: &Entity) -> Borders {
    let body = entity.body;
    let l = entity.x + body.x as f64;
    let t = entity.y + body.y as f64;
    Borders {
        l,
        r: l + body.w as f64,
        t,
        b: t + body.h as f64,
    }
}

/// Edges of the grid cell at `(row, col)`.
pub fn cell_borders(row: i64, col: i64) -> Borders {
    let l = TILE * col as f64;
    let t = TILE * row as f64;
    Borders {
        l,
        r: l + TILE,
        t,
        b: t + TILE,
    }
}

/// Edges of the full tile-sized box at the entity's position.
pub fn tile_box(entity: &Entity) -> Borders {
    Borders {
        l: entity.x,
        r: entity.x + TILE,
        t: entity.y,
        b: entity.y + TILE,
    }
}

pub fn overlap(a: &Entity, b: &Entity) -> bool {
    let a = borders(a);
    let b = borders(b);
    a.l < b.r && a.r > b.l && a.t < b.b && a.b > b.t
}

pub fn abs_limit(value: f64, limit: f64) -> f64 {
    value.clamp(-limit, limit)
}

/// Read-only view of the tile grid together with the archetypes it refers to.
#[derive(Clone, Copy)]
pub struct Terrain<'a> {
    pub grid: &'a TileGrid,
    pub registry: &'a ArchetypeRegistry,
}

impl<'a> Terrain<'a> {
    pub fn new(grid: &'a TileGrid, registry: &'a ArchetypeRegistry) -> Self {
        Self { grid, registry }
    }

    fn valid_col(&self, col: i64) -> bool {
        usize::try_from(col).is_ok_and(|c| c < self.grid.cols())
    }

    fn valid_row(&self, row: i64) -> bool {
        usize::try_from(row).is_ok_and(|r| r < self.grid.rows())
    }

    /// Archetype of the passive tile at `(row, col)`, if inside the grid.
    pub fn cell(&self, row: i64, col: i64) -> Option<&'a Archetype> {
        if !self.valid_row(row) || !self.valid_col(col) {
            return None;
        }
        let id = self.grid.get(row as usize, col as usize);
        Some(self.registry.get(id))
    }

    /// Columns past either end block; rows above or below the grid do not.
    pub fn is_solid(&self, row: i64, col: i64, sides: Solidity) -> bool {
        if !self.valid_col(col) {
            return true;
        }
        match self.cell(row, col) {
            Some(tile) => tile.solidity.contains(sides),
            None => false,
        }
    }

    fn is_family(&self, row: i64, col: i64, family: ArchetypeId) -> bool {
        self.cell(row, col)
            .is_some_and(|tile| tile.parent_id == family)
    }

    pub fn is_ladder(&self, row: i64, col: i64) -> bool {
        self.is_family(row, col, ArchetypeId::Ladder)
    }

    pub fn is_door(&self, row: i64, col: i64) -> bool {
        self.is_family(row, col, ArchetypeId::Door)
    }

    /// A ladder cell the player can stand on: supported from either side, or
    /// the top rung of the ladder.
    pub fn ladder_is_climbable(&self, row: i64, col: i64) -> bool {
        if !self.is_ladder(row, col) {
            return false;
        }
        self.is_solid(row, col - 1, Solidity::TOP)
            || self.is_solid(row, col + 1, Solidity::TOP)
            || !self.is_ladder(row - 1, col)
    }

    /// Integrate `vx` into `x` and stop at a solid neighbour.
    pub fn move_horizontal(&self, entity: &mut Entity, dt_ms: u64) -> Collision {
        let (row, col) = nearest_cell(entity);
        let passive = cell_borders(row, col);
        let dt = dt_ms as f64 / 1000.0;

        entity.vx = abs_limit(entity.vx, MAX_VELOCITY);
        entity.x += entity.vx * dt;
        let moved = tile_box(entity);

        if moved.l < passive.l && entity.vx <= 0.0 {
            if self.is_solid(row, col - 1, Solidity::RIGHT) {
                entity.x = passive.l;
                return Collision::Left;
            }
            return Collision::None;
        }

        if moved.r > passive.r
            && entity.vx >= 0.0
            && self.is_solid(row, col + 1, Solidity::LEFT)
        {
            entity.x = passive.l;
            return Collision::Right;
        }

        Collision::None
    }

    /// Whether `looker`, facing the way its flip says, can see `target` along
    /// their shared row without a solid tile in between.
    pub fn visible(&self, looker: &Entity, target: &Entity) -> bool {
        let (row, col) = nearest_cell(looker);
        let (target_row, target_col) = nearest_cell(target);
        if row != target_row {
            return false;
        }

        if looker.animation.flip == Flip::Horizontal {
            if col <= target_col {
                return false;
            }
            return (target_col..col).all(|c| !self.is_solid(row, c, Solidity::LEFT));
        }

        if col >= target_col {
            return false;
        }
        (col..target_col).all(|c| !self.is_solid(row, c, Solidity::RIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entity_at, grid_from_rows, registry};

    #[test]
    fn nearest_cell_floors_negative_positions() {
        let registry = registry();
        let mut player = entity_at(&registry, ArchetypeId::Player, 32.0, -10.0);
        assert_eq!(nearest_cell(&player), (-1, 2));
        player.y = -16.0;
        player.x = -8.0;
        // center x = -8 + 6 + 2 = 0
        assert_eq!(nearest_cell(&player), (-1, 0));
        player.x = -9.0;
        assert_eq!(nearest_cell(&player), (-1, -1));
    }

    #[test]
    fn borders_use_the_hit_box() {
        let registry = registry();
        let spider = entity_at(&registry, ArchetypeId::Spider, 16.0, 32.0);
        let b = borders(&spider);
        assert_eq!(b, Borders { l: 16.0, r: 31.0, t: 38.0, b: 48.0 });
    }

    #[test]
    fn overlap_is_half_open() {
        let registry = registry();
        let a = entity_at(&registry, ArchetypeId::Coin, 0.0, 0.0);
        let mut b = entity_at(&registry, ArchetypeId::Coin, 16.0, 0.0);
        assert!(!overlap(&a, &b));
        b.x = 15.5;
        assert!(overlap(&a, &b));
        b.y = 16.0;
        assert!(!overlap(&a, &b));
    }

    #[test]
    fn out_of_range_columns_are_solid_rows_are_not() {
        let registry = registry();
        let grid = grid_from_rows(&["=".repeat(20).as_str()]);
        let terrain = Terrain::new(&grid, &registry);
        for row in [-5, 0, 7, 14, 15, 99] {
            assert!(terrain.is_solid(row, -1, Solidity::ALL));
            assert!(terrain.is_solid(row, 20, Solidity::NONE));
        }
        for col in 0..20 {
            assert!(!terrain.is_solid(-1, col, Solidity::TOP));
            assert!(!terrain.is_solid(15, col, Solidity::TOP));
        }
        assert!(terrain.is_solid(0, 3, Solidity::ALL));
        assert!(!terrain.is_solid(1, 3, Solidity::TOP));
    }

    #[test]
    fn ladder_and_door_queries_use_parent_family() {
        let registry = registry();
        let grid = grid_from_rows(&["  L D", "  L  ", "==L=="]);
        let terrain = Terrain::new(&grid, &registry);
        assert!(terrain.is_ladder(0, 2));
        assert!(!terrain.is_ladder(0, 3));
        assert!(!terrain.is_ladder(-1, 2));
        assert!(terrain.is_door(0, 4));
        assert!(!terrain.is_door(0, 40));
    }

    #[test]
    fn ladder_climbable_needs_support_or_top_rung() {
        let registry = registry();
        let grid = grid_from_rows(&["  L  ", "  L  ", "  L= ", "  L  "]);
        let terrain = Terrain::new(&grid, &registry);
        // top rung
        assert!(terrain.ladder_is_climbable(0, 2));
        // mid ladder, no support
        assert!(!terrain.ladder_is_climbable(1, 2));
        // solid top to the right
        assert!(terrain.ladder_is_climbable(2, 2));
        assert!(!terrain.ladder_is_climbable(3, 2));
        assert!(!terrain.ladder_is_climbable(0, 0));
    }

    #[test]
    fn move_horizontal_blocks_left_and_snaps() {
        let registry = registry();
        let grid = grid_from_rows(&["", "", "*   "]);
        let terrain = Terrain::new(&grid, &registry);
        let mut spider = entity_at(&registry, ArchetypeId::Spider, 16.0, 32.0);
        spider.vx = -36.0;
        assert_eq!(terrain.move_horizontal(&mut spider, 20), Collision::Left);
        assert_eq!(spider.x, 16.0);
    }

    #[test]
    fn move_horizontal_blocks_right_and_snaps() {
        let registry = registry();
        let grid = grid_from_rows(&["", "", "   *"]);
        let terrain = Terrain::new(&grid, &registry);
        let mut spider = entity_at(&registry, ArchetypeId::Spider, 32.0, 32.0);
        spider.vx = 36.0;
        assert_eq!(terrain.move_horizontal(&mut spider, 20), Collision::Right);
        assert_eq!(spider.x, 32.0);
    }

    #[test]
    fn move_horizontal_free_path() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let terrain = Terrain::new(&grid, &registry);
        let mut spider = entity_at(&registry, ArchetypeId::Spider, 64.0, 0.0);
        spider.vx = 50.0;
        assert_eq!(terrain.move_horizontal(&mut spider, 20), Collision::None);
        assert!((spider.x - 65.0).abs() < 1e-9);
    }

    #[test]
    fn move_horizontal_stops_at_level_edges() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let terrain = Terrain::new(&grid, &registry);
        let mut spider = entity_at(&registry, ArchetypeId::Spider, 0.0, 0.0);
        spider.vx = -36.0;
        assert_eq!(terrain.move_horizontal(&mut spider, 20), Collision::Left);
        assert_eq!(spider.x, 0.0);

        spider.x = 19.0 * 16.0;
        spider.vx = 36.0;
        assert_eq!(terrain.move_horizontal(&mut spider, 20), Collision::Right);
        assert_eq!(spider.x, 19.0 * 16.0);
    }

    #[test]
    fn move_horizontal_limits_velocity() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let terrain = Terrain::new(&grid, &registry);
        let mut shot = entity_at(&registry, ArchetypeId::Shot, 64.0, 0.0);
        shot.vx = 10_000.0;
        terrain.move_horizontal(&mut shot, 10);
        assert_eq!(shot.vx, MAX_VELOCITY);
    }

    #[test]
    fn visibility_follows_facing_and_walls() {
        let registry = registry();
        let grid = grid_from_rows(&["", "     *"]);
        let terrain = Terrain::new(&grid, &registry);
        let mut ghost = entity_at(&registry, ArchetypeId::Ghost, 16.0, 16.0);
        let player = entity_at(&registry, ArchetypeId::Player, 64.0, 16.0);

        ghost.animation.flip = Flip::None;
        assert!(terrain.visible(&ghost, &player));
        ghost.animation.flip = Flip::Horizontal;
        assert!(!terrain.visible(&ghost, &player));

        let far = entity_at(&registry, ArchetypeId::Player, 128.0, 16.0);
        ghost.animation.flip = Flip::None;
        assert!(!terrain.visible(&ghost, &far));

        let above = entity_at(&registry, ArchetypeId::Player, 64.0, 0.0);
        assert!(!terrain.visible(&ghost, &above));
    }
}
