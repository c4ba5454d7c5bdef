//! Integer axis-aligned rectangle shared by simulation, camera and rendering.
//!
//! Coordinates are screen-style: `x` grows right, `y` grows down, and
//! `(x, y)` is the top-left corner. Edges are half-open, so two rectangles
//! that merely touch do not intersect.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose centre sits at `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self {
            x: cx - w / 2,
            y: cy - h / 2,
            w,
            h,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    pub fn set_center_x(&mut self, cx: i32) {
        self.x = cx - self.w / 2;
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Strict AABB overlap. Empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(32, 0, 32, 32);
        let c = Rect::new(0, 32, 32, 32);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn overlap_by_one_pixel_intersects() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(31, 31, 32, 32);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn zero_sized_rect_never_intersects() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(10, 10, 0, 5);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn edge_setters_keep_size() {
        let mut r = Rect::new(10, 20, 30, 40);
        r.set_right(100);
        assert_eq!(r.left(), 70);
        r.set_bottom(200);
        assert_eq!(r.top(), 160);
        assert_eq!((r.w, r.h), (30, 40));
        r.set_center_x(50);
        assert_eq!(r.center_x(), 50);
    }

    #[test]
    fn from_center_places_top_left() {
        let r = Rect::from_center(100, 550, 30, 44);
        assert_eq!(r, Rect::new(85, 528, 30, 44));
    }
}
