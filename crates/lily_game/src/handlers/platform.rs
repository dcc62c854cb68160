//! Moving platforms that carry the player.

use rand_pcg::Pcg32;

use super::{Behavior, HandlerContext};
use crate::collision::{borders, Collision, TILE_SIZE};
use crate::entity::Entity;
use crate::error::HandlerError;

const SPEED: f64 = 36.0;
/// Overlap tolerances. Without them the player snaps onto the top when
/// touching a platform from the side.
const TOLERANCE_X: f64 = 3.0;
const TOLERANCE_Y: f64 = 3.0;

#[derive(Debug)]
pub struct Platform;

pub static PLATFORM: Platform = Platform;

impl Behavior for Platform {
    fn init(&self, entity: &mut Entity, _rng: &mut Pcg32) -> Result<(), HandlerError> {
        entity.vx = SPEED;
        Ok(())
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        if ctx.terrain.move_horizontal(entity, ctx.dt_ms) != Collision::None {
            entity.vx = -entity.vx;
        }
        Ok(())
    }

    /// Resolve the overlap by the side the player touches: ride on top,
    /// bump the underside, or get pushed off either end.
    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        let dt = ctx.dt();
        let pa = borders(ctx.player_entity);
        let sa = borders(entity);
        let body = ctx.player_entity.body;
        let tile = TILE_SIZE as f64;
        let dh = (tile - body.h as f64) / 2.0;
        let dw = (tile - body.w as f64) / 2.0;

        let overlaps_x = pa.l + TOLERANCE_X <= sa.r && pa.r - TOLERANCE_X >= sa.l;
        let overlaps_y = pa.t + TOLERANCE_Y < sa.b && pa.b - TOLERANCE_Y > sa.t;
        let player = &mut *ctx.player_entity;

        if pa.b > sa.t && pa.b < sa.b && overlaps_x {
            if player.vx == 0.0 {
                player.x += entity.vx * dt;
            }
            player.y = sa.t - dh - body.h as f64;
            ctx.player.air = false;
            return Ok(());
        }

        if pa.t < sa.b && pa.t > sa.t && overlaps_x {
            player.y = sa.b - dh;
            return Ok(());
        }

        if pa.l < sa.r && pa.l > sa.l && overlaps_y {
            player.x = sa.r - dw;
            return Ok(());
        }

        if pa.r > sa.l && pa.r < sa.r && overlaps_y {
            player.x = sa.l - dw - body.w as f64;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::ArchetypeId;
    use crate::test_support::{entity_at, grid_from_rows, registry, Harness};

    #[test]
    fn reverses_at_level_edge() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let mut harness = Harness::new(&registry, 0.0, 200.0);
        let mut platform = entity_at(&registry, ArchetypeId::Platform, 19.0 * 16.0, 64.0);
        assert_eq!(platform.vx, SPEED);
        harness.frame(&grid, &mut platform).expect("frame");
        assert_eq!(platform.vx, -SPEED);
        assert_eq!(platform.x, 19.0 * 16.0);
    }

    #[test]
    fn standing_player_rides_along() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        // Player feet 2 px into the platform top.
        let mut harness = Harness::new(&registry, 64.0, 50.0);
        harness.session.player.air = true;
        let mut platform = entity_at(&registry, ArchetypeId::Platform, 64.0, 64.0);

        harness.hit(&grid, &mut platform).expect("hit");

        assert_eq!(harness.player_entity.y, 48.0);
        assert!((harness.player_entity.x - (64.0 + SPEED * 0.02)).abs() < 1e-9);
        assert!(!harness.session.player.air);
    }

    #[test]
    fn walking_player_is_not_dragged() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let mut harness = Harness::new(&registry, 64.0, 50.0);
        harness.player_entity.vx = -72.0;
        let mut platform = entity_at(&registry, ArchetypeId::Platform, 64.0, 64.0);
        harness.hit(&grid, &mut platform).expect("hit");
        assert_eq!(harness.player_entity.x, 64.0);
        assert_eq!(harness.player_entity.y, 48.0);
    }

    #[test]
    fn underside_bump_pushes_player_below() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let mut harness = Harness::new(&registry, 64.0, 78.0);
        let mut platform = entity_at(&registry, ArchetypeId::Platform, 64.0, 64.0);
        harness.hit(&grid, &mut platform).expect("hit");
        assert_eq!(harness.player_entity.y, 80.0);
    }

    #[test]
    fn side_touch_pushes_player_off() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        // Player body spans x + 6 .. x + 10; platform spans 64 .. 80.
        let mut harness = Harness::new(&registry, 72.0, 64.0);
        let mut platform = entity_at(&registry, ArchetypeId::Platform, 64.0, 64.0);
        harness.hit(&grid, &mut platform).expect("hit");
        assert_eq!(harness.player_entity.x, 74.0);

        let mut harness = Harness::new(&registry, 56.0, 64.0);
        harness.hit(&grid, &mut platform).expect("hit");
        assert_eq!(harness.player_entity.x, 54.0);
    }
}
