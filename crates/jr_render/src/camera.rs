//! Side-scrolling camera.
//!
//! The camera is an offset added to every world rectangle. It centres on the
//! target and then clamps so the view never shows more than the 32px border
//! tiles at any level edge. There is no easing: when the target walks toward
//! an edge the view stops and the target moves off-centre, which is the only
//! "lag" the camera has.

use glam::IVec2;
use jr_core::Rect;

/// Width of the border tile row/column hidden at every level edge.
pub const EDGE_INSET: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    /// Top-left of the viewport expressed as a translation applied to world coordinates.
    pub offset: IVec2,
    pub level_size: IVec2,
    pub screen_size: IVec2,
}

impl Camera {
    pub fn new(level_width: i32, level_height: i32, screen_width: i32, screen_height: i32) -> Self {
        if level_width < screen_width || level_height < screen_height {
            log::debug!(
                "Level {}x{} is smaller than the {}x{} screen, camera will not scroll on that axis",
                level_width,
                level_height,
                screen_width,
                screen_height
            );
        }
        Self {
            offset: IVec2::ZERO,
            level_size: IVec2::new(level_width, level_height),
            screen_size: IVec2::new(screen_width, screen_height),
        }
    }

    pub fn update(&mut self, target: &Rect) {
        let half = self.screen_size / 2;
        let mut left = -target.left() + half.x;
        let mut top = -target.top() + half.y;

        // Clamp order is significant when the level is narrower than the screen.
        left = left.min(-EDGE_INSET);
        left = left.max(-(self.level_size.x - self.screen_size.x) + EDGE_INSET);
        top = top.max(-(self.level_size.y - self.screen_size.y) + EDGE_INSET);
        top = top.min(-EDGE_INSET);

        self.offset = IVec2::new(left, top);
    }

    /// Screen-space destination of a world rectangle.
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.translated(self.offset.x, self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: i32, y: i32) -> Rect {
        Rect::new(x, y, 30, 44)
    }

    #[test]
    fn clamps_at_right_edge() {
        let mut camera = Camera::new(2336, 768, 800, 640);
        camera.update(&player_at(2300, 400));
        assert_eq!(camera.offset.x, -(2336 - 800) + 32);
        assert_eq!(camera.offset.x, -1504);
    }

    #[test]
    fn clamps_at_left_and_top_edges() {
        let mut camera = Camera::new(2336, 768, 800, 640);
        camera.update(&player_at(10, 10));
        assert_eq!(camera.offset, IVec2::new(-32, -32));
    }

    #[test]
    fn clamps_at_bottom_edge() {
        let mut camera = Camera::new(2336, 768, 800, 640);
        camera.update(&player_at(1000, 760));
        assert_eq!(camera.offset.y, -(768 - 640) + 32);
    }

    #[test]
    fn centres_target_inside_bounds() {
        let mut camera = Camera::new(4000, 2000, 800, 640);
        camera.update(&player_at(1000, 1000));
        assert_eq!(camera.offset, IVec2::new(-600, -680));
    }

    #[test]
    fn apply_translates_by_offset() {
        let mut camera = Camera::new(2336, 768, 800, 640);
        camera.update(&player_at(2300, 400));
        let placed = camera.apply(&Rect::new(2000, 300, 24, 24));
        assert_eq!(placed.x, 2000 - 1504);
        assert_eq!(placed.y, 300 + camera.offset.y);
        assert_eq!((placed.w, placed.h), (24, 24));
    }
}
