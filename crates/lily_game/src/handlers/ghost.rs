//! Ghosts and the shots they fire.

use lily_core::animation::Flip;
use lily_core::time::Timer;
use rand_pcg::Pcg32;

use super::spider::{enemy_frame, enemy_hit, enemy_init};
use super::{Behavior, HandlerContext};
use crate::archetype::ArchetypeId;
use crate::collision::{nearest_cell, Collision, TILE_SIZE};
use crate::entity::Entity;
use crate::error::HandlerError;

const SHOOT_DELAY: u64 = 1000;
const SHOT_FPS: i64 = 9;
const SHOT_SPEED: f64 = 72.0;

#[derive(Debug)]
pub struct Shot;

pub static SHOT: Shot = Shot;

impl Behavior for Shot {
    fn init(&self, entity: &mut Entity, _rng: &mut Pcg32) -> Result<(), HandlerError> {
        entity.animation.set_frame(1, 2, SHOT_FPS);
        Ok(())
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        if entity.removed {
            return Ok(());
        }
        if ctx.terrain.move_horizontal(entity, ctx.dt_ms) != Collision::None {
            entity.removed = true;
        }
        Ok(())
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        entity.removed = true;
        ctx.kill_player();
        Ok(())
    }
}

/// A patrolling enemy that fires along its row when it sees the player.
#[derive(Debug)]
pub struct Ghost;

pub static GHOST: Ghost = Ghost;

impl Ghost {
    fn shoot(&self, ghost: &Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        let (row, col) = nearest_cell(ghost);
        let mut shot = Entity::spawn(ctx.terrain.registry, ArchetypeId::Shot, ctx.rng)?;
        // Cells above or left of the grid are negative; keep them.
        shot.x = (col * i64::from(TILE_SIZE)) as f64;
        shot.y = (row * i64::from(TILE_SIZE)) as f64;

        if ghost.vx > 0.0 {
            shot.vx = SHOT_SPEED;
            shot.animation.flip = Flip::None;
        } else {
            shot.vx = -SHOT_SPEED;
            shot.animation.flip = Flip::Horizontal;
        }

        log::trace!("ghost fired from ({row}, {col})");
        ctx.spawns.push(shot);
        Ok(())
    }
}

impl Behavior for Ghost {
    fn init(&self, entity: &mut Entity, rng: &mut Pcg32) -> Result<(), HandlerError> {
        enemy_init(entity, rng)?;
        entity.enemy_mut()?.shoot_timer = Some(Timer::new(SHOOT_DELAY));
        Ok(())
    }

    fn frame(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_frame(entity, ctx)?;

        let enemy = entity.enemy_mut()?;
        if !enemy.alive {
            enemy.shoot_timer = None;
            return Ok(());
        }
        let Some(timer) = enemy.shoot_timer.as_mut() else {
            return Ok(());
        };

        timer.tick(ctx.dt_ms);
        if !timer.done() {
            return Ok(());
        }

        if ctx.terrain.visible(entity, ctx.player_entity) {
            if let Some(timer) = entity.enemy_mut()?.shoot_timer.as_mut() {
                timer.reset();
            }
            self.shoot(entity, ctx)?;
        }
        Ok(())
    }

    fn hit(&self, entity: &mut Entity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        enemy_hit(entity, ctx)
    }
}
