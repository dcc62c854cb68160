use rand_pcg::Pcg32;

use super::spider::{enemy_frame, enemy_hit, enemy_init, WALK};
use super::{Behavior, HandlerContext};
use crate::entity::Entity;
use crate::error::HandlerError;

/// Charging speed once the player is in sight.
const SPRINT: f64 = 142.0;

/// A spider-like walker that charges when it can see the player.
#[derive(Debug)]
pub struct Skeleton;

pub static SKELETON: Skeleton = Skeleton;

impl Behavior for Skeleton {
    fn init(&self, entity: &mut Entity, rng: &mut Pcg32) -> Result<(), HandlerError> {
        enemy_init(entity, rng)
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        let speed = if ctx.terrain.visible(entity, ctx.player_entity) {
            SPRINT
        } else {
            WALK
        };
        entity.vx = if entity.vx < 0.0 { -speed } else { speed };
        enemy_frame(entity, ctx)
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_hit(entity, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::ArchetypeId;
    use crate::handlers::spider::{face_left, face_right};
    use crate::test_support::{entity_at, grid_from_rows, registry, Harness};

    #[test]
    fn charges_when_player_is_in_sight() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let mut harness = Harness::new(&registry, 160.0, 0.0);
        let mut skeleton = entity_at(&registry, ArchetypeId::Skeleton, 32.0, 0.0);
        face_right(&mut skeleton).expect("enemy");

        harness.frame(&grid, &mut skeleton).expect("frame");
        assert_eq!(skeleton.vx, SPRINT);
    }

    #[test]
    fn walks_when_facing_away_or_blocked() {
        let registry = registry();
        let grid = grid_from_rows(&["     *"]);
        let mut harness = Harness::new(&registry, 160.0, 0.0);
        let mut skeleton = entity_at(&registry, ArchetypeId::Skeleton, 32.0, 0.0);

        face_left(&mut skeleton).expect("enemy");
        harness.frame(&grid, &mut skeleton).expect("frame");
        assert_eq!(skeleton.vx, -WALK);

        face_right(&mut skeleton).expect("enemy");
        skeleton.vx = SPRINT;
        harness.frame(&grid, &mut skeleton).expect("frame");
        assert_eq!(skeleton.vx, WALK);
    }
}
