//! Drawing surface consumed by the widgets.
//!
//! Widgets paint in their own local coordinates; [`Canvas`] translates and
//! clips those calls onto whatever surface sits underneath, so a widget
//! never needs to know where it is on the display.

mod buffer;
mod recording;

pub use buffer::{BufferSurface, cell_to_pixel};
pub use recording::{DrawOp, RecordingSurface};

use crate::config::Color;
use crate::window::{Coord, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Normal,
    Bold,
}

/// Horizontal anchoring of a text's `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    /// `x` is the center of the text.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub font: Font,
    pub align: Align,
}

impl TextStyle {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            font: Font::Normal,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.font = Font::Bold;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// Primitive drawing operations, all in surface coordinates.
pub trait Surface {
    /// Fill the whole drawable area.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// One pixel high line starting at `(x, y)`.
    fn hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color);

    /// Draw `text` with its top edge at `y`.
    fn draw_text(&mut self, x: Coord, y: Coord, text: &str, style: TextStyle);

    fn font_height(&self, font: Font) -> Coord;
}

/// A translated, clipped view onto another surface.
pub struct Canvas<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    /// Where local (0, 0) lands on the underlying surface.
    origin: (Coord, Coord),
    /// Visible area on the underlying surface.
    clip: Rect,
}

impl<'a, S: Surface + ?Sized> Canvas<'a, S> {
    /// View of `rect` (in the underlying surface's coordinates).
    pub fn new(surface: &'a mut S, rect: Rect) -> Self {
        Self::scrolled(surface, rect, 0)
    }

    /// View of `rect` whose content is scrolled up by `scroll_y`.
    pub fn scrolled(surface: &'a mut S, rect: Rect, scroll_y: Coord) -> Self {
        Self {
            surface,
            origin: (rect.x, rect.y - scroll_y),
            clip: rect,
        }
    }

    /// The visible area in local coordinates.
    pub fn visible(&self) -> Rect {
        Rect::new(
            self.clip.x - self.origin.0,
            self.clip.y - self.origin.1,
            self.clip.w,
            self.clip.h,
        )
    }

    fn translate(&self, rect: Rect) -> Rect {
        Rect::new(rect.x + self.origin.0, rect.y + self.origin.1, rect.w, rect.h)
    }
}

impl<S: Surface + ?Sized> Surface for Canvas<'_, S> {
    fn clear(&mut self, color: Color) {
        let clip = self.clip;
        self.surface.fill_rect(clip, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let visible = self.translate(rect).intersect(&self.clip);
        if !visible.is_empty() {
            self.surface.fill_rect(visible, color);
        }
    }

    fn hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color) {
        let visible = self.translate(Rect::new(x, y, w, 1)).intersect(&self.clip);
        if !visible.is_empty() {
            self.surface.hline(visible.x, visible.y, visible.w, color);
        }
    }

    fn draw_text(&mut self, x: Coord, y: Coord, text: &str, style: TextStyle) {
        let (x, y) = (x + self.origin.0, y + self.origin.1);
        // Text is dropped whole when its top row falls outside the clip
        if y < self.clip.y || y >= self.clip.bottom() {
            return;
        }
        self.surface.draw_text(x, y, text, style);
    }

    fn font_height(&self, font: Font) -> Coord {
        self.surface.font_height(font)
    }
}
