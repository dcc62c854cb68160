use lily_core::animation::AnimationKind;
use lily_core::time::Timer;
use rand_pcg::Pcg32;

use super::{Behavior, HandlerContext};
use crate::entity::{Entity, EntityData, HelperData};
use crate::error::HandlerError;
use crate::sound::{Channel, Sound};

/// How long the spring stays compressed, in milliseconds.
const DELAY: u64 = 125;
/// Minimum downward speed that triggers a launch.
const THRESHOLD: f64 = 48.0;
const JUMP: f64 = 352.0;

#[derive(Debug)]
pub struct Spring;

pub static SPRING: Spring = Spring;

impl Behavior for Spring {
    fn init(&self, entity: &mut Entity, _rng: &mut Pcg32) -> Result<(), HandlerError> {
        entity.data = EntityData::Helper(HelperData {
            interaction_timer: Timer::new(DELAY),
        });
        entity.animation.kind = AnimationKind::FrameVertical;
        Ok(())
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        let timer = &mut entity.helper_mut()?.interaction_timer;
        timer.tick(ctx.dt_ms);
        if timer.done() {
            entity.animation.set_frame_vertical(0, 0, 0);
        }
        Ok(())
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        if ctx.player_entity.vy <= THRESHOLD {
            return Ok(());
        }

        ctx.audio.play(Sound::Spring, Channel::Player);
        ctx.player_entity.vy = -JUMP;
        entity.animation.set_frame_vertical(1, 1, 0);
        entity.helper_mut()?.interaction_timer.reset();
        Ok(())
    }

    fn destroy(&self, entity: &mut Entity) {
        entity.data = EntityData::None;
    }
}
