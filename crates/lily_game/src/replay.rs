//! Scripted input: a JSON list of held-key runs, expanded one set per frame.

use lily_core::input::Key;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEMO_REPLAY_PATH: &str = "assets/replays/demo.json";

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt_ms")]
    pub dt_ms: u64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    /// Key names as accepted by [`Key::from_name`].
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// One held-key set per frame. Unknown names were rejected on load.
    pub fn expanded_inputs(&self) -> Vec<Vec<Key>> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let keys: Vec<Key> = frame
                .keys
                .iter()
                .filter_map(|name| Key::from_name(name))
                .collect();
            for _ in 0..frame.repeat.max(1) {
                out.push(keys.clone());
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

pub fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.dt_ms == 0 {
        return Err("Replay validation failed: dt_ms must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    for (index, frame) in replay.frames.iter().enumerate() {
        if let Some(name) = frame.keys.iter().find(|name| Key::from_name(name).is_none()) {
            return Err(format!(
                "Replay validation failed: frame {index} names unknown key '{name}'"
            ));
        }
    }
    Ok(())
}

const fn default_dt_ms() -> u64 {
    20
}

const fn default_repeat() -> u32 {
    1
}
