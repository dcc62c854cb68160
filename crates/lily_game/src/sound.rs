//! Sound effect identifiers and the per-frame playback queue.
//!
//! The simulation only records which effects should play. A backend drains
//! the queue once per frame into an [`AudioSink`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Coin,
    ExtraLife,
    Kill,
    Hit,
    Message,
    Door,
    Jump,
    ShortJump,
    Spring,
}

impl Sound {
    pub const ALL: [Sound; 9] = [
        Sound::Coin,
        Sound::ExtraLife,
        Sound::Kill,
        Sound::Hit,
        Sound::Message,
        Sound::Door,
        Sound::Jump,
        Sound::ShortJump,
        Sound::Spring,
    ];

    /// Asset path of the effect, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Coin => "share/sounds/retro_coin_01.ogg",
            Sound::ExtraLife => "share/sounds/sfx_sounds_powerup8.ogg",
            Sound::Kill => "share/sounds/retro_die_01.ogg",
            Sound::Hit => "share/sounds/sfx_damage_hit1.ogg",
            Sound::Message => "share/sounds/sfx_sounds_button12.ogg",
            Sound::Door => "share/sounds/sfx_movement_dooropen1.ogg",
            Sound::Jump | Sound::ShortJump => "share/sounds/sfx_movement_jump8.ogg",
            Sound::Spring => "share/sounds/sfx_movement_jump13.ogg",
        }
    }
}

/// Mixer channel. Effects on one channel cut each other off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Sounds the player makes.
    Player,
    /// Sounds of other entities reacting to the player.
    Sprite,
    Ui,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound, channel: Channel);
}

#[derive(Debug, Default)]
pub struct AudioQueue {
    pending: Vec<(Sound, Channel)>,
    enabled: bool,
}

impl AudioQueue {
    pub fn new(enabled: bool) -> Self {
        Self {
            pending: Vec::new(),
            enabled,
        }
    }

    pub fn play(&mut self, sound: Sound, channel: Channel) {
        if !self.enabled {
            return;
        }
        log::trace!("queue {sound:?} on {channel:?}");
        self.pending.push((sound, channel));
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, (Sound, Channel)> {
        self.pending.drain(..)
    }

    /// Hand every queued effect to `sink`, oldest first.
    pub fn flush(&mut self, sink: &mut dyn AudioSink) {
        for (sound, channel) in self.pending.drain(..) {
            sink.play(sound, channel);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
