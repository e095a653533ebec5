//! Minimal windowing primitive.
//!
//! Only what the menu needs from a window tree: a rectangle in parent
//! coordinates, a vertical scroll offset over a content height, and a
//! redraw flag. Parent/child composition is expressed by ownership in the
//! widgets themselves.

mod focus;

pub use focus::{FocusTracker, WindowId};

/// Display coordinate, in pixels.
pub type Coord = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: Coord,
    pub y: Coord,
    pub w: Coord,
    pub h: Coord,
}

impl Rect {
    pub const fn new(x: Coord, y: Coord, w: Coord, h: Coord) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> Coord {
        self.x + self.w
    }

    pub fn bottom(&self) -> Coord {
        self.y + self.h
    }

    pub fn contains(&self, x: Coord, y: Coord) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection of two rectangles, empty (zero size) when disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Geometry, scroll and redraw state shared by every window.
#[derive(Debug, Clone)]
pub struct WindowState {
    id: WindowId,
    rect: Rect,
    scroll_y: Coord,
    inner_height: Coord,
    dirty: bool,
}

impl WindowState {
    pub fn new(rect: Rect) -> Self {
        Self {
            id: WindowId::new(),
            rect,
            scroll_y: 0,
            inner_height: rect.h,
            dirty: true,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        if self.rect != rect {
            self.rect = rect;
            self.clamp_scroll();
            self.invalidate();
        }
    }

    pub fn width(&self) -> Coord {
        self.rect.w
    }

    pub fn height(&self) -> Coord {
        self.rect.h
    }

    pub fn set_top(&mut self, y: Coord) {
        self.set_rect(Rect { y, ..self.rect });
    }

    pub fn set_height(&mut self, h: Coord) {
        self.set_rect(Rect { h, ..self.rect });
    }

    pub fn inner_height(&self) -> Coord {
        self.inner_height
    }

    /// Set the scrollable content height.
    pub fn set_inner_height(&mut self, height: Coord) {
        self.inner_height = height;
        self.clamp_scroll();
    }

    pub fn scroll_position_y(&self) -> Coord {
        self.scroll_y
    }

    /// Largest valid scroll offset for the current content and viewport.
    pub fn max_scroll_y(&self) -> Coord {
        (self.inner_height - self.rect.h).max(0)
    }

    /// Scroll to `y`, clamped to `[0, inner_height - height]`.
    pub fn set_scroll_position_y(&mut self, y: Coord) {
        let clamped = y.clamp(0, self.max_scroll_y());
        if clamped != self.scroll_y {
            self.scroll_y = clamped;
            self.invalidate();
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll_y());
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the redraw flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_excludes_far_edges() {
        let rect = Rect::new(10, 20, 100, 50);
        assert!(rect.contains(10, 20));
        assert!(rect.contains(109, 69));
        assert!(!rect.contains(110, 20));
        assert!(!rect.contains(10, 70));
        assert!(!rect.contains(9, 20));
    }

    #[test]
    fn test_rect_intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 10, 10);
        assert!(a.intersect(&b).is_empty());

        let c = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&c), Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut window = WindowState::new(Rect::new(0, 0, 100, 100));
        window.set_inner_height(250);

        window.set_scroll_position_y(-40);
        assert_eq!(window.scroll_position_y(), 0);

        window.set_scroll_position_y(500);
        assert_eq!(window.scroll_position_y(), 150);

        window.set_scroll_position_y(60);
        assert_eq!(window.scroll_position_y(), 60);
    }

    #[test]
    fn test_shrinking_content_pulls_scroll_back() {
        let mut window = WindowState::new(Rect::new(0, 0, 100, 100));
        window.set_inner_height(300);
        window.set_scroll_position_y(200);

        window.set_inner_height(120);
        assert_eq!(window.scroll_position_y(), 20);

        window.set_inner_height(50);
        assert_eq!(window.scroll_position_y(), 0);
    }

    #[test]
    fn test_take_dirty_clears_flag() {
        let mut window = WindowState::new(Rect::new(0, 0, 10, 10));
        assert!(window.take_dirty());
        assert!(!window.is_dirty());

        window.set_top(5);
        assert!(window.take_dirty());

        window.set_top(5);
        assert!(!window.is_dirty());
    }
}
