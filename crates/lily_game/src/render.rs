//! Read-only frame drawing through an abstract sink.
//!
//! Coordinates handed to the sink are logical pixels; any scaling to the
//! window is the backend's business.

use lily_core::animation::{AnimationKind, Flip, ALPHA_OPAQUE};

use crate::archetype::{ArchetypeId, ArchetypeRegistry, Rect};
use crate::camera::Camera;
use crate::collision::{SCREEN_ROWS, TILE_SIZE};
use crate::level::Level;
use crate::message::MessageBox;
use crate::player::Player;

const STATUS_PADDING: i32 = 4;
const MESSAGE_PADDING: i32 = 5;

pub trait RenderSink {
    /// Copy `src` from the sprite sheet to `dst` on screen.
    fn draw(&mut self, src: Rect, dst: Rect, flip: Flip, alpha: u8);
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
}

/// Everything one frame needs to draw.
pub struct Frame<'a> {
    pub level: &'a Level,
    pub registry: &'a ArchetypeRegistry,
    pub camera: &'a Camera,
    pub player: &'a Player,
    pub message: &'a MessageBox,
}

pub fn status_line(lives: u32, coins: u32) -> String {
    format!("LIVES: {lives}        COINS: {coins}")
}

/// Passive tiles, then active entities in collection order, then the
/// status line and the message box. Returns the number of sprite draws.
pub fn render_frame(frame: &Frame<'_>, sink: &mut dyn RenderSink) -> usize {
    let mut draws = passive_tiles(frame, sink);
    draws += active_entities(frame, sink);

    sink.draw_text(
        &status_line(frame.player.lives, frame.player.coins),
        STATUS_PADDING,
        STATUS_PADDING,
    );
    if !frame.message.is_empty() {
        let y = SCREEN_ROWS as i32 * TILE_SIZE + MESSAGE_PADDING;
        sink.draw_text(frame.message.current(), MESSAGE_PADDING, y);
    }

    log::trace!("rendered {draws} sprites");
    draws
}

fn passive_tiles(frame: &Frame<'_>, sink: &mut dyn RenderSink) -> usize {
    let grid = frame.level.grid();
    let mut draws = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let id = grid.get(row, col);
            if id == ArchetypeId::None {
                continue;
            }
            let src = frame.registry.get(id).sheet;
            let dst = Rect::new(TILE_SIZE * col as i32, TILE_SIZE * row as i32, src.w, src.h);
            if let Some(dst) = frame.camera.map(dst) {
                sink.draw(src, dst, Flip::None, ALPHA_OPAQUE as u8);
                draws += 1;
            }
        }
    }
    draws
}

fn active_entities(frame: &Frame<'_>, sink: &mut dyn RenderSink) -> usize {
    let mut draws = 0;
    for entity in frame.level.entities().iter().filter(|e| !e.removed) {
        let mut src = frame.registry.get(entity.archetype).sheet;
        let step = entity.animation.frame as i32;
        match entity.animation.kind {
            AnimationKind::FrameVertical => src.y += src.h * step,
            AnimationKind::Frame | AnimationKind::Flip => src.x += src.w * step,
        }

        let dst = Rect::new(entity.x as i32, entity.y as i32, src.w, src.h);
        let Some(dst) = frame.camera.map(dst) else {
            continue;
        };
        sink.draw(src, dst, entity.animation.flip, entity.animation.alpha_u8());
        draws += 1;
    }
    draws
}
