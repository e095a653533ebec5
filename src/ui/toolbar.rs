use txmenu::config::Theme;
use txmenu::input::InputEvent;
use txmenu::menu::Toolbar;
use txmenu::surface::{Surface, TextStyle};
use txmenu::window::{Coord, Rect};

/// Width of the toolbar strip on the display.
pub const TOOLBAR_WIDTH: Coord = 80;

/// Page selector docked to the left edge of the display. Receives the page
/// keys an open menu passes on.
#[derive(Debug)]
pub struct PageToolbar {
    pages: Vec<&'static str>,
    current: usize,
}

impl PageToolbar {
    pub fn new(pages: Vec<&'static str>) -> Self {
        Self { pages, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_name(&self) -> &str {
        self.pages.get(self.current).copied().unwrap_or("")
    }

    /// Panel rect for a menu docked next to the toolbar.
    pub fn menu_rect(theme: &Theme) -> Rect {
        Rect::new(
            TOOLBAR_WIDTH,
            0,
            theme.menu_width.min(theme.lcd_width - TOOLBAR_WIDTH),
            theme.lcd_height,
        )
    }

    pub fn paint(&self, surface: &mut dyn Surface, theme: &Theme) {
        let strip = Rect::new(0, 0, TOOLBAR_WIDTH, theme.lcd_height);
        surface.fill_rect(strip, theme.highlight_background);

        for (i, name) in self.pages.iter().enumerate() {
            let y = i as Coord * theme.line_height;
            let style = if i == self.current {
                TextStyle::new(theme.highlight_text).bold()
            } else {
                TextStyle::new(theme.highlight_text)
            };
            surface.draw_text(theme.text_indent, y + theme.line_height / 4, name, style);
        }
    }
}

impl Toolbar for PageToolbar {
    fn on_event(&mut self, event: InputEvent) {
        let total = self.pages.len();
        if total == 0 {
            return;
        }
        match event {
            InputEvent::PageDown => self.current = (self.current + 1) % total,
            InputEvent::PageUp => {
                self.current = self.current.checked_sub(1).unwrap_or(total - 1);
            }
            InputEvent::PageDownLong => self.current = total - 1,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_wrap() {
        let mut toolbar = PageToolbar::new(vec!["Model", "Radio", "Tools"]);
        toolbar.on_event(InputEvent::PageUp);
        assert_eq!(toolbar.page_name(), "Tools");
        toolbar.on_event(InputEvent::PageDown);
        assert_eq!(toolbar.current(), 0);
    }

    #[test]
    fn test_long_press_jumps_to_last_page() {
        let mut toolbar = PageToolbar::new(vec!["Model", "Radio", "Tools"]);
        toolbar.on_event(InputEvent::PageDownLong);
        assert_eq!(toolbar.current(), 2);
    }

    #[test]
    fn test_empty_toolbar_ignores_events() {
        let mut toolbar = PageToolbar::new(Vec::new());
        toolbar.on_event(InputEvent::PageDown);
        assert_eq!(toolbar.page_name(), "");
    }

    #[test]
    fn test_menu_rect_docks_right_of_strip() {
        let theme = Theme::default();
        assert_eq!(PageToolbar::menu_rect(&theme), Rect::new(80, 0, 200, 272));
    }
}
