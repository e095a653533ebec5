use std::fmt;

use crate::config::Color;
use crate::surface::Surface;
use crate::window::Coord;

/// Label drawn for lines whose text is empty.
pub const EMPTY_LINE_PLACEHOLDER: &str = "---";

/// Action run when a line is activated.
pub type PressFn = Box<dyn FnMut()>;

/// Custom painter for a line: surface, x, y of the line's top-left corner,
/// and how the line should be drawn.
pub type DrawFn = Box<dyn Fn(&mut dyn Surface, Coord, Coord, LineFlags)>;

/// Drawing state handed to custom line painters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFlags {
    pub highlighted: bool,
    /// Foreground color matching the highlight state.
    pub color: Color,
}

pub enum LineKind {
    Label(String),
    Custom(DrawFn),
}

impl fmt::Debug for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Label(text) => f.debug_tuple("Label").field(text).finish(),
            LineKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One selectable menu entry.
pub struct Line {
    kind: LineKind,
    on_press: Option<PressFn>,
}

impl Line {
    pub fn label(text: impl Into<String>, on_press: impl FnMut() + 'static) -> Self {
        Self {
            kind: LineKind::Label(text.into()),
            on_press: Some(Box::new(on_press)),
        }
    }

    pub fn custom(
        draw: impl Fn(&mut dyn Surface, Coord, Coord, LineFlags) + 'static,
        on_press: impl FnMut() + 'static,
    ) -> Self {
        Self {
            kind: LineKind::Custom(Box::new(draw)),
            on_press: Some(Box::new(on_press)),
        }
    }

    /// A label that does nothing when activated.
    pub fn inert(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Label(text.into()),
            on_press: None,
        }
    }

    pub fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// The label text, `None` for custom lines.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Label(text) => Some(text),
            LineKind::Custom(_) => None,
        }
    }

    /// Text shown for a label line, with the placeholder for empty labels.
    pub fn display_text(&self) -> &str {
        match &self.kind {
            LineKind::Label(text) if text.is_empty() => EMPTY_LINE_PLACEHOLDER,
            LineKind::Label(text) => text,
            LineKind::Custom(_) => "",
        }
    }

    pub fn has_action(&self) -> bool {
        self.on_press.is_some()
    }

    /// Run the line's action, if any.
    pub fn press(&mut self) {
        if let Some(on_press) = self.on_press.as_mut() {
            on_press();
        }
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("kind", &self.kind)
            .field("has_action", &self.has_action())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_empty_label_uses_placeholder() {
        assert_eq!(Line::inert("").display_text(), "---");
        assert_eq!(Line::inert("Edit").display_text(), "Edit");
        assert_eq!(Line::inert("").text(), Some(""));
    }

    #[test]
    fn test_press_runs_action_each_time() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let mut line = Line::label("Copy", move || counter.set(counter.get() + 1));

        line.press();
        line.press();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_inert_press_is_noop() {
        let mut line = Line::inert("Nothing");
        assert!(!line.has_action());
        line.press();
    }

    #[test]
    fn test_custom_line_has_no_text() {
        let line = Line::custom(|_, _, _, _| {}, || {});
        assert_eq!(line.text(), None);
        assert!(matches!(line.kind(), LineKind::Custom(_)));
        assert_eq!(format!("{:?}", line), "Line { kind: Custom(..), has_action: true }");
    }
}
