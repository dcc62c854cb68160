//! Headless runner: plays a scripted input sequence through the game at the
//! configured frame rate, logging draws and sounds instead of presenting them.

use std::path::{Path, PathBuf};
use std::thread;

use lily_core::animation::Flip;
use lily_core::input::InputState;
use lily_core::time::FramePacer;
use lily_game::archetype::Rect;
use lily_game::config::{load_config_from_path, CONFIG_PATH};
use lily_game::game::{Game, ProgramState};
use lily_game::render::RenderSink;
use lily_game::replay::{load_replay_from_path, DEMO_REPLAY_PATH};
use lily_game::sound::{AudioSink, Channel, Sound};

#[derive(Default)]
struct LogRenderer {
    draws: usize,
    last_text: Vec<String>,
}

impl RenderSink for LogRenderer {
    fn draw(&mut self, _src: Rect, _dst: Rect, _flip: Flip, _alpha: u8) {
        self.draws += 1;
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32) {
        self.last_text.push(text.to_string());
    }
}

impl LogRenderer {
    /// Log text only when it differs from the previous frame's.
    fn end_frame(&mut self, previous: &mut Vec<String>) {
        if *previous != self.last_text {
            for text in &self.last_text {
                log::info!("text: {}", text.replace('\n', " "));
            }
            std::mem::swap(previous, &mut self.last_text);
        }
        self.last_text.clear();
    }
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, sound: Sound, channel: Channel) {
        log::debug!("play {:?} ({}) on {:?}", sound, sound.file_name(), channel);
    }
}

fn usage() -> String {
    "Usage: cargo run -p lily_game -- [replay_json]\nExample: cargo run -p lily_game -- assets/replays/demo.json".to_string()
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        return Err(usage());
    }
    let replay_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEMO_REPLAY_PATH));

    log::info!("Lilypond starting...");

    let config = load_config_from_path(Path::new(CONFIG_PATH))?;
    let replay = load_replay_from_path(&replay_path)?;
    let inputs = replay.expanded_inputs();
    log::info!(
        "Replay {}: {} frames at {} ms",
        replay_path.display(),
        inputs.len(),
        replay.dt_ms
    );

    let mut game = Game::new(&config, config.seed());
    game.start().map_err(|e| format!("Failed to start game: {e}"))?;

    let mut pacer = FramePacer::new(config.frame_rate, config.min_frame_rate);
    let dt_ms = replay.dt_ms.min(pacer.max_frame_ms);
    let mut input = InputState::default();
    let mut renderer = LogRenderer::default();
    let mut shown_text = Vec::new();
    let mut audio = LogAudio;

    for keys in &inputs {
        pacer.begin_frame();

        input.set_held(keys.iter().copied());
        let state_before = game.state();
        if let Err(err) = game.step(&input, dt_ms) {
            log::error!("Game step failed: {err}");
        }
        if game.state() != state_before {
            log::info!("State {:?} -> {:?}", state_before, game.state());
        }

        game.flush_audio(&mut audio);
        renderer.draws = 0;
        game.render(&mut renderer)
            .map_err(|e| format!("Render failed: {e}"))?;
        log::trace!("{} sprites drawn", renderer.draws);
        renderer.end_frame(&mut shown_text);

        if !game.state().is_running() {
            break;
        }
        thread::sleep(pacer.remaining_delay());
    }

    let player = &game.session().player;
    log::info!(
        "Finished in state {:?} on level {}: {} lives, {} coins, {:.1} fps",
        game.state(),
        game.level_index(),
        player.lives,
        player.coins,
        pacer.average_fps()
    );

    if game.state() == ProgramState::Error {
        return Err("Game ended in the error state".to_string());
    }
    Ok(())
}
