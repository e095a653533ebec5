use crate::config::Theme;
use crate::surface::{Canvas, Font, Surface, TextStyle};
use crate::window::{Coord, FocusTracker, Rect, WindowId, WindowState};

use super::body::MenuBody;
#[cfg(feature = "hardware-touch")]
use super::body::TouchOutcome;

/// Label of the footer band.
pub const CANCEL_LABEL: &str = "Cancel";

/// Fixed-width panel around a [`MenuBody`]: title band, body, cancel band.
pub struct MenuWindow {
    window: WindowState,
    title: String,
    body: MenuBody,
}

impl MenuWindow {
    /// Create a panel centered on the display. Its height stays zero until
    /// the owning menu lays it out. The body is registered with `focus`
    /// and receives input focus.
    pub fn new(theme: &Theme, focus: &mut FocusTracker) -> Self {
        let rect = Rect::new(
            (theme.lcd_width - theme.menu_width) / 2,
            (theme.lcd_height - theme.menu_width) / 2,
            theme.menu_width,
            0,
        );
        let body = MenuBody::new(Rect::new(0, 0, rect.w, rect.h), theme.line_height);

        focus.register(body.id());
        focus.set_focus(body.id());

        Self {
            window: WindowState::new(rect),
            title: String::new(),
            body,
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

    pub fn rect(&self) -> Rect {
        self.window.rect()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.window.invalidate();
    }

    pub fn body(&self) -> &MenuBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut MenuBody {
        &mut self.body
    }

    /// Height of the title band for the current title.
    pub fn header_height(&self, theme: &Theme) -> Coord {
        if self.title.is_empty() {
            0
        } else {
            theme.header_height
        }
    }

    /// Whether the panel or its body needs repainting.
    pub fn is_dirty(&self) -> bool {
        self.window.is_dirty() || self.body.window().is_dirty()
    }

    pub fn mark_painted(&mut self) {
        self.window.take_dirty();
        self.body.window_mut().take_dirty();
    }

    /// Paint the panel onto a display-sized surface.
    pub fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        let rect = self.window.rect();
        let mut canvas = Canvas::new(surface, rect);
        let width = rect.w;
        let height = rect.h;
        let bold_height = canvas.font_height(Font::Bold);

        canvas.clear(theme.background);

        if !self.title.is_empty() {
            canvas.draw_text(
                width / 2,
                (theme.header_height - bold_height) / 2,
                &self.title,
                TextStyle::new(theme.text).bold().centered(),
            );
            canvas.hline(0, theme.header_height - 1, width, theme.separator);
        }

        if theme.footer_height > 0 {
            canvas.draw_text(
                width / 2,
                height - theme.footer_height + (theme.footer_height - bold_height) / 2,
                CANCEL_LABEL,
                TextStyle::new(theme.text).centered(),
            );
            canvas.hline(0, height - theme.footer_height, width, theme.separator);
        }

        let body_window = self.body.window();
        let mut body_canvas = Canvas::scrolled(
            &mut canvas as &mut dyn Surface,
            body_window.rect(),
            body_window.scroll_position_y(),
        );
        self.body.paint(&mut body_canvas, theme);
    }

    /// Route a tap at panel-local `(x, y)` to the body.
    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_end(&mut self, x: Coord, y: Coord) -> TouchOutcome {
        let body_rect = self.body.window().rect();
        if !body_rect.contains(x, y) {
            return TouchOutcome::Missed;
        }
        let scroll_y = self.body.window().scroll_position_y();
        self.body
            .on_touch_end(x - body_rect.x, y - body_rect.y + scroll_y)
    }

    /// Route a slide that started at panel-local `(start_x, start_y)`.
    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_slide(&mut self, start_x: Coord, start_y: Coord, slide_y: Coord) {
        if self.body.window().rect().contains(start_x, start_y) {
            self.body.on_touch_slide(slide_y);
        }
    }
}
