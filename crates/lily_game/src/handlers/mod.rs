//! Per-archetype behavior hooks.
//!
//! Each archetype binds one [`Behavior`] implementation. Hooks that have
//! nothing to do keep the default no-op bodies.

use std::fmt::Debug;

use lily_core::input::InputState;
use rand_pcg::Pcg32;

use crate::collision::Terrain;
use crate::entity::Entity;
use crate::error::HandlerError;
use crate::game::ProgramState;
use crate::message::MessageBox;
use crate::player::Player;
use crate::sound::AudioQueue;

pub mod ghost;
pub mod helper;
pub mod item;
pub mod platform;
pub mod skeleton;
pub mod spider;
pub mod spring;
pub mod water;

/// Everything a frame or hit hook may read or change besides its own entity.
pub struct HandlerContext<'a> {
    pub terrain: Terrain<'a>,
    pub player: &'a mut Player,
    pub player_entity: &'a mut Entity,
    pub audio: &'a mut AudioQueue,
    pub message: &'a mut MessageBox,
    pub input: &'a InputState,
    pub rng: &'a mut Pcg32,
    pub state: &'a mut ProgramState,
    /// Entities created this frame; the level appends them after the hook.
    pub spawns: &'a mut Vec<Entity>,
    pub dt_ms: u64,
}

impl HandlerContext<'_> {
    /// Frame time in seconds.
    pub fn dt(&self) -> f64 {
        self.dt_ms as f64 / 1000.0
    }

    pub fn kill_player(&mut self) {
        self.player.kill(self.player_entity, self.audio, self.state);
    }
}

pub trait Behavior: Sync + Debug {
    fn init(&self, _entity: &mut Entity, _rng: &mut Pcg32) -> Result<(), HandlerError> {
        Ok(())
    }

    fn frame(&self, _entity: &mut Entity, _ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called after `frame` when the entity overlaps the player.
    fn hit(&self, _entity: &mut Entity, _ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
        Ok(())
    }

    fn destroy(&self, _entity: &mut Entity) {}
}

/// Tiles, the player entity and anything else without custom logic.
#[derive(Debug)]
pub struct Inert;

impl Behavior for Inert {}

pub static INERT: Inert = Inert;
