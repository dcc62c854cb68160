//! Walking enemies: spiders, sprinting spiders and bats.
//!
//! Skeletons and ghosts reuse these hooks and add their own rules on top.

use lily_core::animation::Flip;
use lily_core::time::Timer;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Behavior, HandlerContext};
use crate::collision::Collision;
use crate::entity::{Direction, EnemyData, Entity, EntityData};
use crate::error::HandlerError;
use crate::sound::{Channel, Sound};

/// Walking speed, logical pixels per second.
pub const WALK: f64 = 36.0;
/// Upward speed given to the player after a stomp.
pub const BOUNCE: f64 = 128.0;
const ANIM_WALK: i64 = 8;
const ANIM_FLY: i64 = 3;
/// How long a squished enemy stays on screen, in milliseconds.
const REMOVE_DELAY: u64 = 2000;
/// One in this many frames a sprinting spider doubles its speed.
const SPRINT_ODDS: u32 = 100;

pub(crate) fn face_left(entity: &mut Entity) -> Result<(), HandlerError> {
    entity.enemy_mut()?.direction = Direction::Left;
    entity.animation.flip = Flip::Horizontal;
    entity.vx = -WALK;
    Ok(())
}

pub(crate) fn face_right(entity: &mut Entity) -> Result<(), HandlerError> {
    entity.enemy_mut()?.direction = Direction::Right;
    entity.animation.flip = Flip::None;
    entity.vx = WALK;
    Ok(())
}

pub(crate) fn enemy_init(entity: &mut Entity, rng: &mut Pcg32) -> Result<(), HandlerError> {
    entity.data = EntityData::Enemy(EnemyData {
        direction: Direction::Right,
        alive: true,
        remove_timer: Timer::new(REMOVE_DELAY),
        shoot_timer: None,
    });

    if rng.gen_bool(0.5) {
        face_left(entity)?;
    } else {
        face_right(entity)?;
    }

    entity.animation.set_frame(1, 2, ANIM_WALK);
    Ok(())
}

/// Patrol while alive; count down to removal once squished.
pub(crate) fn enemy_frame(entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let enemy = entity.enemy_mut()?;
    if !enemy.alive {
        enemy.remove_timer.tick(ctx.dt_ms);
        if enemy.remove_timer.done() {
            entity.removed = true;
        }
        return Ok(());
    }

    match ctx.terrain.move_horizontal(entity, ctx.dt_ms) {
        Collision::Left => face_right(entity)?,
        Collision::Right => face_left(entity)?,
        Collision::None => {}
    }
    Ok(())
}

/// A falling player landing from above squishes the enemy; any other touch
/// kills the player.
pub(crate) fn enemy_hit(entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    if !entity.enemy_mut()?.alive {
        return Ok(());
    }

    let stomp = ctx.player.air && ctx.player_entity.y < entity.y && ctx.player_entity.vy > 0.0;
    if stomp {
        ctx.audio.play(Sound::Hit, Channel::Sprite);
        ctx.player_entity.vy = -BOUNCE;
        entity.enemy_mut()?.alive = false;
        entity.animation.set_frame(5, 5, 0);
        return Ok(());
    }

    ctx.kill_player();
    Ok(())
}

#[derive(Debug)]
pub struct Spider;

pub static SPIDER: Spider = Spider;

impl Behavior for Spider {
    fn init(&self, entity: &mut Entity, rng: &mut Pcg32) -> Result<(), HandlerError> {
        enemy_init(entity, rng)
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_frame(entity, ctx)
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_hit(entity, ctx)
    }
}

/// A spider that randomly bursts into double speed.
#[derive(Debug)]
pub struct SprintingSpider;

pub static SPRINTING_SPIDER: SprintingSpider = SprintingSpider;

impl Behavior for SprintingSpider {
    fn init(&self, entity: &mut Entity, rng: &mut Pcg32) -> Result<(), HandlerError> {
        enemy_init(entity, rng)
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_frame(entity, ctx)?;
        if ctx.rng.gen_range(0..SPRINT_ODDS) == 0 {
            entity.vx *= 2.0;
        }
        Ok(())
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_hit(entity, ctx)
    }
}

#[derive(Debug)]
pub struct Bat;

pub static BAT: Bat = Bat;

impl Behavior for Bat {
    fn init(&self, entity: &mut Entity, rng: &mut Pcg32) -> Result<(), HandlerError> {
        enemy_init(entity, rng)?;
        entity.animation.set_frame(0, 1, ANIM_FLY);
        Ok(())
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_frame(entity, ctx)
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_hit(entity, ctx)
    }
}
