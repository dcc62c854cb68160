//! Side-scrolling camera that follows the player.

use crate::archetype::Rect;
use crate::collision::{SCREEN_COLUMNS, SCREEN_ROWS, TILE_SIZE};

const SCREEN_WIDTH: i32 = SCREEN_COLUMNS as i32 * TILE_SIZE;
const SCREEN_HEIGHT: i32 = SCREEN_ROWS as i32 * TILE_SIZE;

/// Top-left corner of the visible screen in world pixels; the view is
/// always one screen in size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
}

/// Scroll offset along one axis: keep the target centred, but never show
/// past either end of a level `screens` long.
fn follow(target: f64, half_screen: i32, screen: i32, screens: usize) -> i32 {
    let last = screens.saturating_sub(1) as i32 * screen;
    if target <= half_screen as f64 {
        0
    } else if target >= (last + half_screen) as f64 {
        last
    } else {
        (target - half_screen as f64) as i32
    }
}

impl Camera {
    pub fn new(target_x: f64, target_y: f64, width: usize, height: usize) -> Self {
        let mut camera = Self::default();
        camera.update(target_x, target_y, width, height);
        camera
    }

    /// Follow a target in a level `width` by `height` screens.
    pub fn update(&mut self, target_x: f64, target_y: f64, width: usize, height: usize) {
        let half_x = (SCREEN_COLUMNS as i32 / 2) * TILE_SIZE;
        let half_y = (SCREEN_ROWS as i32 / 2) * TILE_SIZE;
        self.x = follow(target_x, half_x, SCREEN_WIDTH, width);
        self.y = follow(target_y, half_y, SCREEN_HEIGHT, height);
    }

    /// Translate a world rectangle to screen space. `None` when it is
    /// entirely off screen.
    ///
    /// The vertical test uses the rectangle's width, not its height. Every
    /// draw is a square tile, so the two agree.
    pub fn map(&self, dst: Rect) -> Option<Rect> {
        let mapped = Rect::new(dst.x - self.x, dst.y - self.y, dst.w, dst.h);
        let visible_x = mapped.x + mapped.w > 0 && mapped.x < SCREEN_WIDTH;
        let visible_y = mapped.y + mapped.w > 0 && mapped.y < SCREEN_HEIGHT;
        (visible_x && visible_y).then_some(mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_screen_never_scrolls() {
        let mut camera = Camera::new(0.0, 0.0, 1, 1);
        assert_eq!(camera, Camera { x: 0, y: 0 });
        camera.update(320.0, 0.0, 1, 1);
        assert_eq!(camera.x, 0);
        camera.update(0.0, 240.0, 1, 1);
        assert_eq!(camera.y, 0);
        assert_eq!(
            camera.map(Rect::new(42, 42, 16, 16)),
            Some(Rect::new(42, 42, 16, 16))
        );
    }

    #[test]
    fn scrolls_horizontally_within_bounds() {
        let mut camera = Camera::new(0.0, 0.0, 2, 1);
        camera.update(640.0, 0.0, 2, 1);
        assert_eq!(camera.x, 320);
        camera.update(300.5, 0.0, 2, 1);
        assert_eq!(camera.x, 140);
        camera.update(160.0, 0.0, 2, 1);
        assert_eq!(camera.x, 0);
    }

    #[test]
    fn scrolls_vertically_within_bounds() {
        let mut camera = Camera::new(0.0, 0.0, 1, 3);
        camera.update(0.0, 1000.0, 1, 3);
        assert_eq!(camera.y, 480);
        camera.update(0.0, 300.0, 1, 3);
        assert_eq!(camera.y, 188);
    }

    #[test]
    fn map_culls_off_screen_rects() {
        let camera = Camera { x: 320, y: 0 };
        assert_eq!(camera.map(Rect::new(300, 0, 16, 16)), None);
        assert_eq!(
            camera.map(Rect::new(310, 0, 16, 16)),
            Some(Rect::new(-10, 0, 16, 16))
        );
        assert_eq!(camera.map(Rect::new(640, 0, 16, 16)), None);
        assert_eq!(camera.map(Rect::new(400, 240, 16, 16)), None);
    }

    #[test]
    fn vertical_cull_uses_width() {
        let camera = Camera::default();
        // A short, wide rect just above the screen still counts as visible.
        assert!(camera.map(Rect::new(0, -20, 32, 8)).is_some());
    }
}
