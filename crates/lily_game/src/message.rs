//! On-screen message box with paging for long texts.

use crate::sound::{AudioQueue, Channel, Sound};

/// Characters shown on one page.
pub const PAGE_LEN: usize = 146;
/// Longest text a single message may carry; the rest is dropped.
pub const MAX_LEN: usize = PAGE_LEN * 4;
/// Appended to a page when more text follows.
pub const CONTINUE_MARKER: &str = "\n ... ";
/// Minimum time between two page turns, in milliseconds.
const RESPONSE_DELAY: i64 = 250;

#[derive(Debug, Clone)]
pub struct MessageBox {
    current: String,
    buffer: String,
    blocking: bool,
    respond_ms: i64,
}

impl Default for MessageBox {
    fn default() -> Self {
        Self {
            current: String::new(),
            buffer: String::new(),
            blocking: false,
            respond_ms: RESPONSE_DELAY,
        }
    }
}

/// Split `text` after `n` characters.
fn split_chars(text: &str, n: usize) -> (&str, &str) {
    match text.char_indices().nth(n) {
        Some((index, _)) => text.split_at(index),
        None => (text, ""),
    }
}

impl MessageBox {
    /// Replace the message. A blocking message pauses the game until dismissed.
    pub fn set(&mut self, text: &str, blocking: bool, audio: &mut AudioQueue) {
        self.blocking = blocking;
        let (text, _) = split_chars(text, MAX_LEN);

        if !self.current.is_empty() || !text.is_empty() {
            audio.play(Sound::Message, Channel::Ui);
        }

        let (page, rest) = split_chars(text, PAGE_LEN);
        self.current.clear();
        self.current.push_str(page);
        self.buffer.clear();
        if !rest.is_empty() {
            self.current.push_str(CONTINUE_MARKER);
            self.buffer.push_str(rest);
        }
    }

    /// Turn the page (or close the box) when `pressed` and the response
    /// delay has passed.
    pub fn update(&mut self, pressed: bool, dt_ms: u64) {
        let dt = i64::try_from(dt_ms).unwrap_or(i64::MAX);
        self.respond_ms = self.respond_ms.saturating_sub(dt);
        if self.respond_ms > 0 || !pressed {
            return;
        }
        self.respond_ms = RESPONSE_DELAY;

        if self.buffer.is_empty() {
            self.current.clear();
            return;
        }

        let buffered = std::mem::take(&mut self.buffer);
        let (page, rest) = split_chars(&buffered, PAGE_LEN);
        self.current.clear();
        self.current.push_str(page);
        self.buffer.push_str(rest);
        if !self.buffer.is_empty() {
            self.current.push_str(CONTINUE_MARKER);
        }
    }

    pub fn blocks(&self) -> bool {
        self.blocking && !self.current.is_empty()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
