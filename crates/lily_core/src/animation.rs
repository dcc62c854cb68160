//! Per-sprite animation state machine.
//!
//! A sprite cycles through a contiguous range of sheet frames, either along
//! the sheet's x axis (`Frame`), its y axis (`FrameVertical`), or by toggling
//! the horizontal flip (`Flip`). Timing is integer milliseconds so advancement
//! is deterministic for a given sequence of frame times.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationKind {
    #[default]
    Frame,
    FrameVertical,
    Flip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
}

impl Flip {
    pub fn toggled(self) -> Self {
        match self {
            Self::None => Self::Horizontal,
            Self::Horizontal => Self::None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }
}

pub const ALPHA_OPAQUE: i64 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteAnimation {
    pub kind: AnimationKind,
    pub frame: i64,
    pub start: i64,
    pub end: i64,
    /// Milliseconds per frame; zero means a static frame.
    pub delay_ms: i64,
    pub counter_ms: i64,
    pub flip: Flip,
    /// Opacity, 0 (invisible) to 255 (opaque).
    pub alpha: i64,
}

impl Default for SpriteAnimation {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Frame,
            frame: 0,
            start: 0,
            end: 0,
            delay_ms: 0,
            counter_ms: 0,
            flip: Flip::None,
            alpha: ALPHA_OPAQUE,
        }
    }
}

impl SpriteAnimation {
    pub fn set_frame(&mut self, start: i64, end: i64, fps: i64) {
        self.set(start, end, fps, AnimationKind::Frame);
    }

    pub fn set_frame_vertical(&mut self, start: i64, end: i64, fps: i64) {
        self.set(start, end, fps, AnimationKind::FrameVertical);
    }

    /// Hold `frame` and toggle the horizontal flip `fps` times per second.
    pub fn set_flip(&mut self, frame: i64, fps: i64) {
        self.set(frame, frame, fps, AnimationKind::Flip);
    }

    /// Switch to a new range and rate. A frame outside `[start, end]` moves
    /// to `start`. The countdown is refilled unless it lies in `(0, delay]`:
    /// zero counts as spent, so a fresh animation shows its first frame for a
    /// full delay instead of stepping on the next tick.
    fn set(&mut self, start: i64, end: i64, fps: i64, kind: AnimationKind) {
        self.kind = kind;
        self.start = start;
        self.end = end;
        self.delay_ms = if fps == 0 { 0 } else { 1000 / fps };

        if self.frame < start || self.frame > end {
            self.frame = start;
        }

        if self.counter_ms <= 0 || self.counter_ms > self.delay_ms {
            self.counter_ms = self.delay_ms;
        }
    }

    /// Advance by `dt_ms`. At most one frame step per call.
    pub fn advance(&mut self, dt_ms: u64) {
        let dt = i64::try_from(dt_ms).unwrap_or(i64::MAX);
        self.counter_ms = self.counter_ms.saturating_sub(dt);
        if self.counter_ms > 0 {
            return;
        }

        self.counter_ms = self.delay_ms;
        self.frame += 1;
        if self.frame > self.end {
            self.frame = self.start;
        }

        if self.kind == AnimationKind::Flip {
            self.flip = self.flip.toggled();
        }
    }

    pub fn alpha_u8(&self) -> u8 {
        self.alpha.clamp(0, ALPHA_OPAQUE) as u8
    }
}
