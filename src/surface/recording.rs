use crate::config::Color;
use crate::window::{Coord, Rect};

use super::{Font, Surface, TextStyle};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    HLine { x: Coord, y: Coord, w: Coord, color: Color },
    Text { x: Coord, y: Coord, text: String, style: TextStyle },
}

/// Surface that records calls instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    font_height: Coord,
}

impl RecordingSurface {
    /// Create a recorder reporting `font_height` for every font.
    pub fn new(font_height: Coord) -> Self {
        Self {
            ops: Vec::new(),
            font_height,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Texts drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Y coordinates of horizontal lines, in order.
    pub fn hline_rows(&self) -> Vec<Coord> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::HLine { y, .. } => Some(*y),
                _ => None,
            })
            .collect()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn hline(&mut self, x: Coord, y: Coord, w: Coord, color: Color) {
        self.ops.push(DrawOp::HLine { x, y, w, color });
    }

    fn draw_text(&mut self, x: Coord, y: Coord, text: &str, style: TextStyle) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    fn font_height(&self, _font: Font) -> Coord {
        self.font_height
    }
}
