use rand_pcg::Pcg32;

use super::{Behavior, HandlerContext};
use crate::entity::Entity;
use crate::error::HandlerError;

const ANIM_WATER: i64 = 4;

/// Animated water surface. Touching it is always fatal, even while blinking.
#[derive(Debug)]
pub struct WaterSurface;

pub static WATER_SURFACE: WaterSurface = WaterSurface;

impl Behavior for WaterSurface {
    fn init(&self, entity: &mut Entity, _rng: &mut Pcg32) -> Result<(), HandlerError> {
        entity.animation.set_frame(0, 3, ANIM_WATER);
        Ok(())
    }

    fn hit(&self, _entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        ctx.player.blink_timer.expire();
        ctx.kill_player();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::archetype::ArchetypeId;
    use crate::test_support::{entity_at, grid_from_rows, registry, Harness};

    #[test]
    fn kills_even_while_blinking() {
        let registry = registry();
        let grid = grid_from_rows(&[""]);
        let mut harness = Harness::new(&registry, 0.0, 0.0);
        harness.session.player.blink_timer.reset();
        let mut water = entity_at(&registry, ArchetypeId::WaterTop, 0.0, 0.0);

        harness.hit(&grid, &mut water).expect("hit");
        assert_eq!(harness.session.player.lives, 2);

        // The kill restarted blinking, water overrides it again.
        harness.hit(&grid, &mut water).expect("hit");
        assert_eq!(harness.session.player.lives, 1);
    }

    #[test]
    fn animates_four_frames() {
        let registry = registry();
        let water = entity_at(&registry, ArchetypeId::WaterTop, 0.0, 0.0);
        assert_eq!((water.animation.start, water.animation.end), (0, 3));
        assert_eq!(water.animation.delay_ms, 250);
    }
}
