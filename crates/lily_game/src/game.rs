//! Game session: program state, level progression and the per-frame step.

use std::path::PathBuf;

use lily_core::input::{InputState, Key};
use lily_core::time::Timer;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::archetype::ArchetypeRegistry;
use crate::camera::Camera;
use crate::catalog::{CUSTOM_TOKENS, LEVELS, LEVEL_COUNT};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::level::Level;
use crate::level_file::load_level_from_path;
use crate::message::MessageBox;
use crate::player::Player;
use crate::render::{render_frame, Frame, RenderSink};
use crate::sound::{AudioQueue, AudioSink};

const SECRET_DELAY: u64 = 250;

const START_MESSAGE: &str = "Press C to interact with people and to dismiss this message. Use the \
                             LEFT and RIGHT arrow keys to walk. Press Q to toggle character.";
const CUSTOM_START_MESSAGE: &str = "Loaded user-created level.";
const GAME_OVER_MESSAGE: &str = "Game over. Press ESC to return to menu.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    NotStarted,
    GameIn,
    /// The player just lost a life and respawned; play continues.
    GameKilled,
    GameOver,
    GameComplete,
    GameLevelComplete,
    Exit,
    Error,
}

impl ProgramState {
    /// Whether the frame loop should keep stepping.
    pub fn is_running(self) -> bool {
        matches!(
            self,
            Self::GameIn | Self::GameKilled | Self::GameOver | Self::GameLevelComplete
        )
    }
}

/// State that outlives a single level.
#[derive(Debug)]
pub struct Session {
    pub player: Player,
    pub audio: AudioQueue,
    pub message: MessageBox,
    pub rng: Pcg32,
    pub state: ProgramState,
}

impl Session {
    pub fn new(seed: u64, sound_enabled: bool) -> Self {
        Self {
            player: Player::new(),
            audio: AudioQueue::new(sound_enabled),
            message: MessageBox::default(),
            rng: Pcg32::seed_from_u64(seed),
            state: ProgramState::NotStarted,
        }
    }
}

pub struct Game {
    registry: ArchetypeRegistry,
    session: Session,
    level: Option<Level>,
    level_index: usize,
    levels_dir: PathBuf,
    custom_level: Option<PathBuf>,
    secret_timer: Timer,
    camera: Camera,
    game_over_message_set: bool,
}

impl Game {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        log::info!("game seed {seed}");
        Self {
            registry: ArchetypeRegistry::standard(),
            session: Session::new(seed, config.sound_enabled),
            level: None,
            level_index: config.start_level.min(LEVEL_COUNT - 1),
            levels_dir: config.levels_dir.clone(),
            custom_level: config.custom_level.clone(),
            secret_timer: Timer::new(SECRET_DELAY),
            camera: Camera::default(),
            game_over_message_set: false,
        }
    }

    /// Load the first level and show the opening message.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.session.state = ProgramState::GameIn;
        if let Err(err) = self.load_level() {
            self.session.state = ProgramState::Error;
            return Err(err);
        }

        let text = if self.custom_level.is_some() {
            CUSTOM_START_MESSAGE
        } else {
            START_MESSAGE
        };
        self.session.message.set(text, false, &mut self.session.audio);
        Ok(())
    }

    /// Load the current level. On failure the previous level stays active.
    pub fn load_level(&mut self) -> Result<(), GameError> {
        let (path, tokens) = match &self.custom_level {
            Some(path) => (path.clone(), CUSTOM_TOKENS),
            None => {
                let entry = &LEVELS[self.level_index];
                (entry.path(&self.levels_dir), entry.tokens)
            }
        };

        let level = load_level_from_path(&self.registry, &path, tokens, &mut self.session.rng)
            .map_err(|source| {
                log::error!("failed to load {}: {source}", path.display());
                GameError::LevelLoad {
                    path: path.clone(),
                    source,
                }
            })?;

        let (x, y) = level.spawn_point();
        self.session.player.set_respawn(x, y);
        self.camera = Camera::new(x, y, level.width(), level.height());
        self.level = Some(level);
        log::info!("level {} loaded from {}", self.level_index, path.display());
        Ok(())
    }

    /// Advance one frame. A failure also moves the program to the error state.
    pub fn step(&mut self, input: &InputState, dt_ms: u64) -> Result<(), GameError> {
        if !self.session.state.is_running() {
            return Ok(());
        }
        let result = self.advance(input, dt_ms);
        if result.is_err() {
            self.session.state = ProgramState::Error;
        }
        self.follow_player();
        result
    }

    fn advance(&mut self, input: &InputState, dt_ms: u64) -> Result<(), GameError> {
        if self.session.state == ProgramState::GameLevelComplete {
            self.level_index = (self.level_index + 1).min(LEVEL_COUNT);
            if self.level_index == LEVEL_COUNT {
                log::info!("all levels complete");
                self.session.state = ProgramState::GameComplete;
                return Ok(());
            }
            self.session.state = ProgramState::GameIn;
            self.load_level()?;
        }

        if input.is_held(Key::Escape) {
            log::info!("escape pressed, leaving the game");
            self.session.state = ProgramState::Exit;
            return Ok(());
        }

        if self.session.state == ProgramState::GameOver {
            if !self.game_over_message_set {
                self.session
                    .message
                    .set(GAME_OVER_MESSAGE, false, &mut self.session.audio);
                self.game_over_message_set = true;
            }
            return Ok(());
        }
        self.game_over_message_set = false;

        self.session.message.update(input.is_held(Key::Interact), dt_ms);
        if self.session.message.blocks() {
            return Ok(());
        }

        self.session.player.cycle_character(
            &mut self.registry,
            input,
            &mut self.session.message,
            &mut self.session.audio,
        );

        let level = self.level.as_mut().ok_or(GameError::NoLevel)?;
        if let Some((entity, terrain)) = level.player_and_terrain(&self.registry) {
            self.session.player.update(
                entity,
                &terrain,
                input,
                &mut self.session.audio,
                &mut self.session.state,
                dt_ms,
            );
        }
        level.advance_animations(dt_ms);
        level.update(&self.registry, &mut self.session, input, dt_ms)?;

        self.secret_timer.tick(dt_ms);
        if !self.secret_timer.done() {
            return Ok(());
        }
        let secret = [Key::LeftCtrl, Key::LeftShift, Key::Sprint, Key::Num0];
        if secret.iter().all(|key| input.is_held(*key)) {
            log::info!("level skip code entered");
            self.secret_timer.reset();
            self.session.state = ProgramState::GameLevelComplete;
        }
        Ok(())
    }

    fn follow_player(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        if let Some(player) = level.player() {
            self.camera
                .update(player.x, player.y, level.width(), level.height());
        }
    }

    /// Draw the current frame. Returns the number of sprite draws.
    pub fn render(&self, sink: &mut dyn RenderSink) -> Result<usize, GameError> {
        let level = self.level.as_ref().ok_or(GameError::NoLevel)?;
        let frame = Frame {
            level,
            registry: &self.registry,
            camera: &self.camera,
            player: &self.session.player,
            message: &self.session.message,
        };
        Ok(render_frame(&frame, sink))
    }

    /// Hand this frame's sound effects to `sink`.
    pub fn flush_audio(&mut self, sink: &mut dyn AudioSink) {
        self.session.audio.flush(sink);
    }

    pub fn state(&self) -> ProgramState {
        self.session.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }
}
