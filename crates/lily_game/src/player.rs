//! Player controller: input, platformer physics, ladders and lives.
//!
//! The player entity lives in the level's collection like any other active
//! entity; this module holds the controller state that outlives a level
//! (lives, coins, timers) and moves the entity each frame.

use lily_core::animation::Flip;
use lily_core::input::{InputState, Key};
use lily_core::time::Timer;

use crate::archetype::{ArchetypeId, ArchetypeRegistry, Solidity};
use crate::collision::{abs_limit, cell_borders, nearest_cell, tile_box, Terrain, MAX_VELOCITY, TILE_SIZE};
use crate::entity::Entity;
use crate::game::ProgramState;
use crate::message::MessageBox;
use crate::sound::{AudioQueue, Channel, Sound};

/// Invulnerability after a respawn, in milliseconds.
const BLINK_TIME: u64 = 2000;
/// Length of one visible/invisible half of the blink, in milliseconds.
const BLINK_INTERVAL: u64 = 200;

// Speeds in logical pixels per second (per second squared for gravity).
const GRAVITY: f64 = 600.0;
const WALK: f64 = 72.0;
const SPRINT: f64 = 96.0;
const LADDER: f64 = 64.0;
const FALL_MAX: f64 = 128.0;
const JUMP: f64 = 256.0;
const SHORT_JUMP: f64 = 192.0;

// Animation rates, frames per second.
const ANIM_WALK: i64 = 8;
const ANIM_SPRINT: i64 = 12;
const ANIM_LADDER: i64 = 6;

const CHARACTER_DELAY: u64 = 1000;
/// Sheet cells of the selectable characters, as `(row, col)`.
const CHARACTERS: [(i32, i32); 6] = [(1, 38), (2, 38), (1, 32), (2, 26), (2, 32), (1, 26)];

const STARTING_LIVES: u32 = 3;
const TILE: f64 = TILE_SIZE as f64;

#[derive(Debug, Clone)]
pub struct Player {
    pub air: bool,
    pub ladder: bool,
    pub sprint: bool,
    /// Cleared while climbing; set again once up and down are released.
    pub jump: bool,
    pub lives: u32,
    pub coins: u32,
    pub respawn_x: f64,
    pub respawn_y: f64,
    pub blink_timer: Timer,
    pub character_timer: Timer,
    /// Selected entry of the character table.
    pub index: usize,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let mut blink_timer = Timer::new(BLINK_TIME);
        // No blinking at the very start.
        blink_timer.expire();
        Self {
            air: false,
            ladder: false,
            sprint: false,
            jump: true,
            lives: STARTING_LIVES,
            coins: 0,
            respawn_x: 0.0,
            respawn_y: 0.0,
            blink_timer,
            character_timer: Timer::new(CHARACTER_DELAY),
            index: 0,
        }
    }

    pub fn set_respawn(&mut self, x: f64, y: f64) {
        self.respawn_x = x;
        self.respawn_y = y;
    }

    pub fn is_blinking(&self) -> bool {
        !self.blink_timer.done()
    }

    /// Switch to the next character look when Cycle is held and the
    /// cooldown has elapsed.
    pub fn cycle_character(
        &mut self,
        registry: &mut ArchetypeRegistry,
        input: &InputState,
        message: &mut MessageBox,
        audio: &mut AudioQueue,
    ) {
        if !input.is_held(Key::Cycle) || !self.character_timer.done() {
            return;
        }
        self.character_timer.reset();
        self.index = (self.index + 1) % CHARACTERS.len();

        let (row, col) = CHARACTERS[self.index];
        registry.change_visual(ArchetypeId::Player, row, col);
        message.set("Switched player character.", false, audio);
        log::info!("switched to player character {}", self.index);
    }

    /// Lose a life unless blinking; respawn, or end the game on the last life.
    pub fn kill(&mut self, entity: &mut Entity, audio: &mut AudioQueue, state: &mut ProgramState) {
        if self.is_blinking() {
            return;
        }

        entity.animation.set_frame(5, 5, 0);
        audio.play(Sound::Kill, Channel::Player);
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            log::info!("player lost the last life");
            *state = ProgramState::GameOver;
            return;
        }

        *state = ProgramState::GameKilled;
        self.respawn(entity);
    }

    fn respawn(&mut self, entity: &mut Entity) {
        entity.animation.set_frame(0, 0, 0);
        self.blink_timer.reset();
        self.ladder = false;
        self.air = false;
        entity.x = self.respawn_x;
        entity.y = self.respawn_y;
        log::info!(
            "player respawned at ({}, {}) with {} lives left",
            entity.x,
            entity.y,
            self.lives
        );
    }

    fn walk_animation(&self, entity: &mut Entity, fps: i64) {
        if self.ladder {
            return;
        }
        if self.air {
            entity.animation.set_frame(1, 1, ANIM_WALK);
        } else {
            entity.animation.set_frame(1, 2, fps);
        }
    }

    fn mount_ladder(entity: &mut Entity, col: i64, vy: f64) {
        entity.vy = vy;
        entity.x = col as f64 * TILE;
        entity.animation.set_flip(3, ANIM_LADDER);
    }

    fn process_keys(
        &mut self,
        entity: &mut Entity,
        terrain: &Terrain<'_>,
        input: &InputState,
        audio: &mut AudioQueue,
        state: &mut ProgramState,
    ) {
        self.sprint = input.is_held(Key::Sprint);
        let (speed, anim) = if self.sprint {
            (SPRINT, ANIM_SPRINT)
        } else {
            (WALK, ANIM_WALK)
        };

        if input.is_held(Key::Left) {
            entity.animation.flip = Flip::Horizontal;
            entity.vx = -speed;
            self.walk_animation(entity, anim);
        } else if input.is_held(Key::Right) {
            entity.animation.flip = Flip::None;
            entity.vx = speed;
            self.walk_animation(entity, anim);
        } else {
            entity.vx = 0.0;
            if self.air {
                entity.animation.set_frame(1, 1, ANIM_WALK);
            } else if !self.ladder {
                entity.animation.set_frame(0, 0, 0);
            }
        }

        if input.is_held(Key::Up) {
            let (row, col) = nearest_cell(entity);
            if terrain.is_ladder(row, col) {
                self.ladder = true;
                self.jump = false;
                Self::mount_ladder(entity, col, -LADDER);
            } else {
                self.ladder = false;
            }
        } else if input.is_held(Key::Down) {
            let (row, col) = nearest_cell(entity);
            if self.ladder || terrain.is_ladder(row + 1, col) {
                if !self.ladder {
                    // Step a little way onto the ladder below.
                    entity.y = row as f64 * TILE + TILE / 2.0 + 1.0;
                }
                self.ladder = true;
                Self::mount_ladder(entity, col, LADDER);
            }
        } else if self.ladder {
            entity.animation.set_frame(3, 3, 0);
            entity.vy = 0.0;
        } else {
            self.jump = true;
        }

        let short_jump = input.is_held(Key::ShortJump);
        if !self.air && self.jump && (input.is_held(Key::Jump) || short_jump) {
            let (sound, speed) = if short_jump {
                (Sound::ShortJump, SHORT_JUMP)
            } else {
                (Sound::Jump, JUMP)
            };
            audio.play(sound, Channel::Player);
            entity.vy = -speed;
        }

        if input.is_held(Key::Interact) {
            let (row, col) = nearest_cell(entity);
            if terrain.is_door(row, col) {
                audio.play(Sound::Door, Channel::Sprite);
                *state = ProgramState::GameLevelComplete;
            }
        }
    }

    /// One controller step: input, then horizontal and vertical movement
    /// against the grid, gravity, ladder exit and blinking.
    pub fn update(
        &mut self,
        entity: &mut Entity,
        terrain: &Terrain<'_>,
        input: &InputState,
        audio: &mut AudioQueue,
        state: &mut ProgramState,
        dt_ms: u64,
    ) {
        self.process_keys(entity, terrain, input, audio, state);

        self.character_timer.tick(dt_ms);
        self.blink_timer.tick(dt_ms);

        let dt = dt_ms as f64 / 1000.0;
        // Corner tolerance: how far the visual tile may overhang the body.
        let hit = (TILE - entity.body.w as f64) / 2.0;

        let (row, col) = nearest_cell(entity);
        let passive = cell_borders(row, col);

        entity.vx = abs_limit(entity.vx, MAX_VELOCITY);
        entity.vy = abs_limit(entity.vy, MAX_VELOCITY);

        entity.x += entity.vx * dt;
        let b = tile_box(entity);

        if b.l < passive.l && entity.vx <= 0.0 {
            let blocked = terrain.is_solid(row, col - 1, Solidity::RIGHT)
                || (b.t + hit < passive.t && terrain.is_solid(row - 1, col - 1, Solidity::RIGHT))
                || (b.b - hit > passive.b && terrain.is_solid(row + 1, col - 1, Solidity::RIGHT));
            if blocked {
                entity.x = passive.l;
                entity.vx = 0.0;
            }
        } else if b.r > passive.r && entity.vx >= 0.0 {
            let blocked = terrain.is_solid(row, col + 1, Solidity::LEFT)
                || (b.t + hit < passive.t && terrain.is_solid(row - 1, col + 1, Solidity::LEFT))
                || (b.b - hit > passive.b && terrain.is_solid(row + 1, col + 1, Solidity::LEFT));
            if blocked {
                entity.x = passive.l;
                entity.vx = 0.0;
            }
        }

        entity.y += entity.vy * dt;
        let b = tile_box(entity);

        if b.b > passive.b && entity.vy >= 0.0 {
            let landed = terrain.is_solid(row + 1, col, Solidity::TOP)
                || (b.l + hit < passive.l && terrain.is_solid(row + 1, col - 1, Solidity::TOP))
                || (b.r - hit > passive.r && terrain.is_solid(row + 1, col + 1, Solidity::TOP))
                || (!self.ladder && terrain.ladder_is_climbable(row + 1, col));
            if landed {
                entity.y = passive.t;
                entity.vy = 0.0;
                self.air = false;
                if self.ladder {
                    // Reached the foot of the ladder.
                    self.ladder = false;
                    entity.animation.set_frame(0, 0, 0);
                }
            } else {
                self.air = !self.ladder;
            }
        } else if b.t < passive.t && entity.vy <= 0.0 {
            self.air = !self.ladder;
            let bumped = terrain.is_solid(row - 1, col, Solidity::BOTTOM)
                || (b.l + hit < passive.l && terrain.is_solid(row - 1, col - 1, Solidity::BOTTOM))
                || (b.r - hit > passive.r && terrain.is_solid(row - 1, col + 1, Solidity::BOTTOM));
            if bumped {
                entity.y = passive.t;
                entity.vy += 1.0;
            }
        }

        let (row, col) = nearest_cell(entity);

        if !self.ladder {
            entity.vy += GRAVITY * dt;
            entity.vy = entity.vy.min(FALL_MAX);
        }

        if self.ladder && !terrain.is_ladder(row, col) {
            self.ladder = false;
            entity.animation.set_frame(0, 0, 0);
            if entity.vy < 0.0 {
                entity.vy = 0.0;
                entity.y = TILE * row as f64;
            }
        }

        if self.is_blinking() {
            let phase = (self.blink_timer.time_left() / BLINK_INTERVAL) % 2;
            entity.animation.alpha = 255 * (1 - phase as i64);
        }
    }
}
