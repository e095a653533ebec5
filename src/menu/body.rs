use crate::config::Theme;
use crate::debug_log;
#[cfg(feature = "hardware-keys")]
use crate::input::InputEvent;
use crate::surface::{Surface, TextStyle};
use crate::window::{Coord, Rect, WindowId, WindowState};

use super::line::{Line, LineFlags, LineKind, PressFn};

/// Lines kept above the selected one when scrolling to it.
pub const SCROLL_LOOKAHEAD_LINES: Coord = 3;

/// What a touch on the body did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// The line at this index was activated; the menu should close.
    Activated(usize),
    /// Nothing under the finger.
    Missed,
}

/// Scrollable list of selectable lines.
pub struct MenuBody {
    window: WindowState,
    lines: Vec<Line>,
    selected: Option<usize>,
    on_cancel: Option<PressFn>,
    line_height: Coord,
}

impl MenuBody {
    pub fn new(rect: Rect, line_height: Coord) -> Self {
        Self {
            window: WindowState::new(rect),
            lines: Vec::new(),
            selected: None,
            on_cancel: None,
            line_height,
        }
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut WindowState {
        &mut self.window
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_height(&self) -> Coord {
        self.line_height
    }

    /// Index of the selected line, `None` while the list is empty.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Height of all lines, minus the trailing separator pixel.
    pub fn content_height(&self) -> Coord {
        self.lines.len() as Coord * self.line_height - 1
    }

    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
        self.window.invalidate();
    }

    /// Drop every line and reset selection and scrolling.
    pub fn remove_lines(&mut self) {
        self.lines.clear();
        self.selected = None;
        self.window.set_scroll_position_y(0);
        self.window.invalidate();
    }

    pub fn set_cancel_handler(&mut self, on_cancel: impl FnMut() + 'static) {
        self.on_cancel = Some(Box::new(on_cancel));
    }

    /// Scroll offset that shows line `index` with the look-ahead margin
    /// above it, before clamping to the content.
    pub fn scroll_target(&self, index: usize) -> Coord {
        self.line_height * index as Coord - SCROLL_LOOKAHEAD_LINES * self.line_height
    }

    /// Select a line. Indices past the end select the last line; an empty
    /// body ignores the call.
    pub fn select(&mut self, index: usize) {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return;
        };
        let index = index.min(last);
        self.selected = Some(index);

        if self.window.inner_height() > self.window.height() {
            self.window.set_scroll_position_y(self.scroll_target(index));
        }

        debug_log::log_select(self.id(), index, self.window.scroll_position_y());
        self.window.invalidate();
    }

    /// Handle a key event. Events the body does not consume are passed to
    /// `propagate`, which stands for the parent windows' handling.
    #[cfg(feature = "hardware-keys")]
    pub fn on_event(&mut self, event: InputEvent, propagate: &mut dyn FnMut(InputEvent)) {
        debug_log::log_input("MenuBody", self.id(), &event);

        match event {
            InputEvent::Next => {
                if let Some(selected) = self.selected {
                    self.select((selected + 1) % self.lines.len());
                }
            }
            InputEvent::Previous => {
                if let Some(selected) = self.selected {
                    let previous = selected.checked_sub(1).unwrap_or(self.lines.len() - 1);
                    self.select(previous);
                }
            }
            InputEvent::Activate => {
                // The parent closes the menu first, then the line runs
                propagate(event);
                if let Some(line) = self.selected.and_then(|index| self.lines.get_mut(index)) {
                    line.press();
                }
            }
            InputEvent::Cancel => {
                if let Some(on_cancel) = self.on_cancel.as_mut() {
                    on_cancel();
                }
                propagate(event);
            }
            _ => propagate(event),
        }
    }

    /// Handle a tap at `(x, y)` in content coordinates (scroll included).
    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_end(&mut self, x: Coord, y: Coord) -> TouchOutcome {
        let outcome = match self.line_at(y) {
            Some(index) => {
                self.lines[index].press();
                TouchOutcome::Activated(index)
            }
            None => TouchOutcome::Missed,
        };
        debug_log::log_touch("MenuBody", self.id(), x, y, &outcome);
        outcome
    }

    /// Scroll by a slide gesture delta.
    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_slide(&mut self, slide_y: Coord) {
        let scroll_y = self.window.scroll_position_y();
        self.window.set_scroll_position_y(scroll_y - slide_y);
    }

    /// Line under content coordinate `y`, if any.
    pub fn line_at(&self, y: Coord) -> Option<usize> {
        if y < 0 || self.line_height <= 0 {
            return None;
        }
        let index = (y / self.line_height) as usize;
        (index < self.lines.len()).then_some(index)
    }

    /// Paint onto a surface whose origin is the top of the content.
    pub fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        surface.clear(theme.background);

        let width = self.window.width();
        let line_height = self.line_height;
        let font_height = surface.font_height(crate::surface::Font::Normal);

        for (i, line) in self.lines.iter().enumerate() {
            let y = i as Coord * line_height;
            let highlighted = self.selected == Some(i);
            let color = if highlighted {
                if theme.highlight_background != theme.background {
                    surface.fill_rect(
                        Rect::new(0, y, width, line_height),
                        theme.highlight_background,
                    );
                }
                theme.highlight_text
            } else {
                theme.text
            };

            match line.kind() {
                LineKind::Custom(draw) => draw(&mut *surface, 0, y, LineFlags { highlighted, color }),
                LineKind::Label(_) => surface.draw_text(
                    theme.text_indent,
                    y + (line_height - font_height) / 2,
                    line.display_text(),
                    TextStyle::new(color),
                ),
            }

            if i > 0 {
                surface.hline(0, y - 1, width, theme.separator);
            }
        }
    }
}
