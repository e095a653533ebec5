use ratatui::buffer::Buffer;
use ratatui::style::{Color as TermColor, Modifier};
use unicode_width::UnicodeWidthStr;

use crate::config::Color;
use crate::window::{Coord, Rect};

use super::{Align, Font, Surface, TextStyle};

/// Surface drawing a simulated display into a ratatui buffer.
///
/// Each terminal cell stands for a `scale_x` x `scale_y` block of pixels.
/// Font height is one cell row.
pub struct BufferSurface<'a> {
    buffer: &'a mut Buffer,
    area: ratatui::layout::Rect,
    scale_x: Coord,
    scale_y: Coord,
}

impl<'a> BufferSurface<'a> {
    pub fn new(
        buffer: &'a mut Buffer,
        area: ratatui::layout::Rect,
        scale_x: Coord,
        scale_y: Coord,
    ) -> Self {
        Self {
            buffer,
            area,
            scale_x: scale_x.max(1),
            scale_y: scale_y.max(1),
        }
    }

    /// Cell size in pixels needed to fit a `width` x `height` display in `area`.
    pub fn scale_for(area: ratatui::layout::Rect, width: Coord, height: Coord) -> (Coord, Coord) {
        let cols = Coord::from(area.width.max(1));
        let rows = Coord::from(area.height.max(1));
        ((width + cols - 1) / cols, (height + rows - 1) / rows)
    }

    fn row(&self, y: Coord) -> Option<u16> {
        if y < 0 {
            return None;
        }
        let row = y / self.scale_y;
        (row < Coord::from(self.area.height)).then(|| self.area.y + row as u16)
    }

    /// Cell span covering `[start, start + len)` pixels, at least one cell wide.
    fn span(start: Coord, len: Coord, scale: Coord, limit: u16) -> std::ops::Range<Coord> {
        let first = start.max(0) / scale;
        let last = ((start + len).max(0) / scale).max(first + 1);
        first.min(Coord::from(limit))..last.min(Coord::from(limit))
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

impl Surface for BufferSurface<'_> {
    fn clear(&mut self, color: Color) {
        let bg = term_color(color);
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(bg);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let bg = term_color(color);
        let cols = Self::span(rect.x, rect.w, self.scale_x, self.area.width);
        let rows = Self::span(rect.y, rect.h, self.scale_y, self.area.height);
        for row in rows {
            for col in cols.clone() {
                let pos = (self.area.x + col as u16, self.area.y + row as u16);
                if let Some(cell) = self.buffer.cell_mut(pos) {
                    cell.set_symbol(" ");
                    cell.set_bg(bg);
                }
            }
        }
    }

    fn hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color) {
        let Some(row) = self.row(y) else {
            return;
        };
        let fg = term_color(color);
        for col in Self::span(x, w, self.scale_x, self.area.width) {
            if let Some(cell) = self.buffer.cell_mut((self.area.x + col as u16, row)) {
                cell.set_symbol("─");
                cell.set_fg(fg);
            }
        }
    }

    fn draw_text(&mut self, x: Coord, y: Coord, text: &str, style: TextStyle) {
        let Some(row) = self.row(y) else {
            return;
        };
        let width = text.width() as Coord;
        let start = match style.align {
            Align::Left => x / self.scale_x,
            Align::Center => x / self.scale_x - width / 2,
        };

        let fg = term_color(style.color);
        let mut col = start;
        for ch in text.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0) as Coord;
            if col >= 0
                && col < Coord::from(self.area.width)
                && let Some(cell) = self.buffer.cell_mut((self.area.x + col as u16, row))
            {
                cell.set_char(ch);
                cell.set_fg(fg);
                if style.font == Font::Bold {
                    cell.modifier.insert(Modifier::BOLD);
                }
            }
            col += ch_width;
        }
    }

    fn font_height(&self, _font: Font) -> Coord {
        self.scale_y
    }
}

/// Pixel coordinates of the center of a terminal cell, relative to `area`.
pub fn cell_to_pixel(
    area: ratatui::layout::Rect,
    column: u16,
    row: u16,
    scale_x: Coord,
    scale_y: Coord,
) -> Option<(Coord, Coord)> {
    let position = ratatui::layout::Position::new(column, row);
    if !area.contains(position) {
        return None;
    }
    let col = Coord::from(column - area.x);
    let row = Coord::from(row - area.y);
    Some((col * scale_x + scale_x / 2, row * scale_y + scale_y / 2))
}
