//! Modal menu: a title, a scrollable list of selectable lines and an
//! optional cancel band.
//!
//! Input reaches the focused [`MenuBody`] first; whatever it does not
//! consume bubbles up to the [`Menu`], which forwards page navigation to a
//! registered toolbar and closes itself on cancel or activate. Closing only
//! marks the menu; the owning [`MenuHost`] tears it down between ticks.

mod body;
mod host;
mod line;
mod window;

pub use body::{MenuBody, SCROLL_LOOKAHEAD_LINES, TouchOutcome};
pub use host::{MenuHost, MenuSpawner};
pub use line::{DrawFn, EMPTY_LINE_PLACEHOLDER, Line, LineFlags, LineKind, PressFn};
pub use window::{CANCEL_LABEL, MenuWindow};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::Theme;
use crate::debug_log;
#[cfg(feature = "hardware-keys")]
use crate::input::InputEvent;
use crate::surface::Surface;
use crate::window::{Coord, FocusTracker, Rect, WindowId};

/// External navigation bar that may sit next to a menu.
pub trait Toolbar {
    /// Receive a page navigation event the menu passed on.
    #[cfg(feature = "hardware-keys")]
    fn on_event(&mut self, event: InputEvent);
}

/// Non-owning reference to a registered toolbar.
pub type ToolbarHandle = Weak<RefCell<dyn Toolbar>>;

/// Lifecycle of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Visible and accepting input.
    Open,
    /// Teardown scheduled; callbacks may still be running.
    Closing,
    /// Torn down by the host.
    Destroyed,
}

/// Why a menu closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Cancel key.
    Cancelled,
    /// Activate key on the selected line.
    Confirmed,
    /// A line was tapped.
    LineTapped(usize),
    /// A tap landed outside every line.
    TappedOutside,
}

#[derive(Debug)]
struct Lifecycle {
    id: WindowId,
    state: MenuState,
    close_reason: Option<CloseReason>,
}

impl Lifecycle {
    /// Schedule teardown. Only the first request counts.
    fn close(&mut self, reason: CloseReason) {
        if self.state != MenuState::Open {
            return;
        }
        self.state = MenuState::Closing;
        self.close_reason = Some(reason);
        debug_log::log_lifecycle(self.id, &format!("closing ({:?})", reason));
    }
}

/// A modal menu covering the display.
pub struct Menu {
    theme: Rc<Theme>,
    window: MenuWindow,
    toolbar: Option<ToolbarHandle>,
    previous_focus: Option<WindowId>,
    lifecycle: Lifecycle,
}

impl Menu {
    /// Create an empty menu. The body takes input focus; in builds without
    /// touch input the previously focused window is remembered so it can
    /// get focus back when the menu goes away.
    pub fn new(theme: Rc<Theme>, focus: &mut FocusTracker) -> Self {
        let previous_focus = if cfg!(feature = "hardware-touch") {
            None
        } else {
            focus.current()
        };
        let window = MenuWindow::new(&theme, focus);
        let id = window.id();
        debug_log::log_lifecycle(id, "open");

        let mut menu = Self {
            theme,
            window,
            toolbar: None,
            previous_focus,
            lifecycle: Lifecycle {
                id,
                state: MenuState::Open,
                close_reason: None,
            },
        };
        menu.update_position();
        menu
    }

    pub fn id(&self) -> WindowId {
        self.lifecycle.id
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn state(&self) -> MenuState {
        self.lifecycle.state
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.state == MenuState::Open
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.lifecycle.close_reason
    }

    /// Schedule teardown, as the cancel key would.
    pub fn close(&mut self) {
        self.lifecycle.close(CloseReason::Cancelled);
    }

    pub fn window(&self) -> &MenuWindow {
        &self.window
    }

    pub fn body(&self) -> &MenuBody {
        self.window.body()
    }

    pub fn rect(&self) -> Rect {
        self.window.rect()
    }

    pub fn previous_focus(&self) -> Option<WindowId> {
        self.previous_focus
    }

    pub fn title(&self) -> &str {
        self.window.title()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.window.set_title(title);
        self.update_position();
    }

    pub fn add_line(&mut self, text: impl Into<String>, on_press: impl FnMut() + 'static) {
        self.add_entry(Line::label(text, on_press));
    }

    pub fn add_custom_line(
        &mut self,
        draw: impl Fn(&mut dyn Surface, Coord, Coord, LineFlags) + 'static,
        on_press: impl FnMut() + 'static,
    ) {
        self.add_entry(Line::custom(draw, on_press));
    }

    /// Append a prepared line.
    pub fn add_entry(&mut self, line: Line) {
        self.window.body_mut().add_line(line);
        self.update_position();
    }

    pub fn remove_lines(&mut self) {
        self.window.body_mut().remove_lines();
        self.update_position();
    }

    pub fn count(&self) -> usize {
        self.body().count()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.body().selected_index()
    }

    /// Select a line; out of range indices select the last line.
    pub fn select(&mut self, index: usize) {
        self.window.body_mut().select(index);
    }

    pub fn set_cancel_handler(&mut self, on_cancel: impl FnMut() + 'static) {
        self.window.body_mut().set_cancel_handler(on_cancel);
    }

    /// Register a toolbar. The menu only keeps a weak reference; once the
    /// toolbar is dropped the menu behaves as if none was registered.
    pub fn set_toolbar<T: Toolbar + 'static>(&mut self, toolbar: &Rc<RefCell<T>>) {
        let toolbar: Rc<RefCell<dyn Toolbar>> = toolbar.clone();
        self.toolbar = Some(Rc::downgrade(&toolbar));
        self.update_position();
    }

    pub fn clear_toolbar(&mut self) {
        self.toolbar = None;
        self.update_position();
    }

    /// The registered toolbar, if it is still alive.
    pub fn toolbar(&self) -> Option<Rc<RefCell<dyn Toolbar>>> {
        self.toolbar.as_ref().and_then(Weak::upgrade)
    }

    pub fn has_toolbar(&self) -> bool {
        self.toolbar().is_some()
    }

    /// Place the panel explicitly. Used by toolbar layouts, which own the
    /// menu position; the body fills the space between header and footer.
    pub fn set_window_rect(&mut self, rect: Rect) {
        let header = self.window.header_height(&self.theme);
        let footer = self.theme.footer_height;
        self.window.window_mut().set_rect(rect);
        self.window.body_mut().window_mut().set_rect(Rect::new(
            0,
            header,
            rect.w,
            (rect.h - header - footer).max(0),
        ));
    }

    /// Recompute the layout from the current content.
    ///
    /// Without a toolbar the panel is centered on the display, its body
    /// clamped between the theme's minimum and maximum heights. The body's
    /// content height always follows the line count.
    pub fn update_position(&mut self) {
        let theme = &self.theme;
        let content_height = self.window.body().content_height();

        if !self.has_toolbar() {
            let header = self.window.header_height(theme);
            let body_height = content_height
                .max(theme.min_body_height)
                .min(theme.max_body_height);
            let total = header + body_height + theme.footer_height;
            let top = (theme.lcd_height - total) / 2 + theme.offset_top;

            let panel = self.window.window_mut();
            panel.set_top(top);
            panel.set_height(total);

            let body = self.window.body_mut().window_mut();
            body.set_top(header);
            body.set_height(body_height);
        }

        self.window
            .body_mut()
            .window_mut()
            .set_inner_height(content_height);

        let rect = self.window.rect();
        debug_log::log_layout(self.id(), rect.y, rect.h, content_height, self.count());
    }

    /// Deliver a key event to the focused body.
    #[cfg(feature = "hardware-keys")]
    pub fn on_event(&mut self, event: InputEvent) {
        if !self.is_open() {
            return;
        }

        let Self {
            window,
            toolbar,
            lifecycle,
            ..
        } = self;
        let toolbar = toolbar.as_ref().and_then(Weak::upgrade);

        window.body_mut().on_event(event, &mut |unhandled| {
            Self::route_unhandled(unhandled, toolbar.as_ref(), lifecycle);
        });
    }

    /// Menu-level handling of events the body let through.
    #[cfg(feature = "hardware-keys")]
    fn route_unhandled(
        event: InputEvent,
        toolbar: Option<&Rc<RefCell<dyn Toolbar>>>,
        lifecycle: &mut Lifecycle,
    ) {
        debug_log::log_input("Menu", lifecycle.id, &event);

        match (event, toolbar) {
            (event, Some(toolbar)) if event.is_page_navigation() => {
                // A toolbar busy in its own handler cannot take the event
                if let Ok(mut toolbar) = toolbar.try_borrow_mut() {
                    toolbar.on_event(event);
                }
            }
            (InputEvent::Cancel, _) => lifecycle.close(CloseReason::Cancelled),
            (InputEvent::Activate, _) => lifecycle.close(CloseReason::Confirmed),
            _ => {}
        }
    }

    /// Handle the end of a touch at display coordinates `(x, y)`.
    ///
    /// A tap on a line runs it and closes the menu; any other tap closes
    /// the menu as dismissed. Always reports the tap as consumed.
    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_end(&mut self, x: Coord, y: Coord) -> bool {
        if !self.is_open() {
            return true;
        }

        let rect = self.window.rect();
        let outcome = if rect.contains(x, y) {
            self.window.on_touch_end(x - rect.x, y - rect.y)
        } else {
            TouchOutcome::Missed
        };
        debug_log::log_touch("Menu", self.id(), x, y, &outcome);

        match outcome {
            TouchOutcome::Activated(index) => self.lifecycle.close(CloseReason::LineTapped(index)),
            TouchOutcome::Missed => self.lifecycle.close(CloseReason::TappedOutside),
        }
        true
    }

    /// Handle a slide gesture. Always consumed, so a slide never turns into
    /// a dismissing tap.
    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_slide(
        &mut self,
        _x: Coord,
        _y: Coord,
        start_x: Coord,
        start_y: Coord,
        _slide_x: Coord,
        slide_y: Coord,
    ) -> bool {
        if self.is_open() {
            let rect = self.window.rect();
            self.window
                .on_touch_slide(start_x - rect.x, start_y - rect.y, slide_y);
        }
        true
    }

    pub fn needs_redraw(&self) -> bool {
        self.window.is_dirty()
    }

    /// Paint onto a display-sized surface.
    pub fn paint(&mut self, surface: &mut dyn Surface) {
        self.window.paint(surface, &self.theme);
        self.window.mark_painted();
    }

    /// Finish teardown: release the body's focus registration and hand
    /// focus back to the remembered window if it still exists.
    pub(crate) fn destroy(&mut self, focus: &mut FocusTracker) {
        if self.lifecycle.state == MenuState::Destroyed {
            return;
        }
        if self.lifecycle.state == MenuState::Open {
            self.lifecycle.close(CloseReason::Cancelled);
        }
        focus.unregister(self.window.body().id());
        if let Some(previous) = self.previous_focus
            && focus.is_alive(previous)
        {
            focus.set_focus(previous);
        }
        self.lifecycle.state = MenuState::Destroyed;
        debug_log::log_lifecycle(self.id(), "destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_menu() -> (Menu, FocusTracker) {
        let mut focus = FocusTracker::new();
        let menu = Menu::new(Rc::new(Theme::default()), &mut focus);
        (menu, focus)
    }

    #[derive(Default)]
    struct PageCounter {
        #[cfg(feature = "hardware-keys")]
        events: Vec<InputEvent>,
    }

    impl Toolbar for PageCounter {
        #[cfg(feature = "hardware-keys")]
        fn on_event(&mut self, event: InputEvent) {
            self.events.push(event);
        }
    }

    #[test]
    fn test_layout_centers_panel() {
        let (mut menu, _focus) = new_menu();
        menu.add_line("A", || {});
        menu.add_line("B", || {});

        // body 79, no header, footer 40 => total 119
        let rect = menu.rect();
        assert_eq!(rect.h, 119);
        assert_eq!(rect.y, (272 - 119) / 2 + 8);
        assert_eq!(rect.x, 140);
        assert_eq!(menu.body().window().rect(), Rect::new(0, 0, 200, 79));
        assert_eq!(menu.body().window().inner_height(), 79);
    }

    #[test]
    fn test_title_adds_header_band() {
        let (mut menu, _focus) = new_menu();
        menu.add_line("A", || {});
        menu.set_title("Model");

        let rect = menu.rect();
        assert_eq!(rect.h, 40 + 39 + 40);
        assert_eq!(menu.body().window().rect().y, 40);
        assert_eq!(menu.title(), "Model");
    }

    #[test]
    fn test_body_height_is_clamped() {
        let (mut menu, _focus) = new_menu();
        assert_eq!(menu.body().window().height(), 39);

        for i in 0..10 {
            menu.add_line(format!("line {i}"), || {});
        }
        assert_eq!(menu.body().window().height(), 159);
        assert_eq!(menu.body().window().inner_height(), 399);
    }

    #[test]
    fn test_remove_then_add_behaves_like_fresh_menu() {
        let (mut menu, _focus) = new_menu();
        for i in 0..10 {
            menu.add_line(format!("old {i}"), || {});
        }
        menu.select(9);
        assert!(menu.body().window().scroll_position_y() > 0);

        menu.remove_lines();
        assert_eq!(menu.count(), 0);
        assert_eq!(menu.selected_index(), None);

        for i in 0..3 {
            menu.add_line(format!("new {i}"), || {});
        }

        let (mut fresh, _fresh_focus) = new_menu();
        for i in 0..3 {
            fresh.add_line(format!("new {i}"), || {});
        }
        assert_eq!(menu.selected_index(), fresh.selected_index());
        assert_eq!(
            menu.body().window().scroll_position_y(),
            fresh.body().window().scroll_position_y()
        );
        assert_eq!(menu.rect(), fresh.rect());
    }

    #[test]
    fn test_toolbar_disables_centering() {
        let (mut menu, _focus) = new_menu();
        let toolbar = Rc::new(RefCell::new(PageCounter::default()));
        menu.set_toolbar(&toolbar);
        assert!(menu.has_toolbar());

        menu.set_window_rect(Rect::new(100, 0, 200, 272));
        for i in 0..3 {
            menu.add_line(format!("line {i}"), || {});
        }

        assert_eq!(menu.rect(), Rect::new(100, 0, 200, 272));
        assert_eq!(menu.body().window().rect(), Rect::new(0, 0, 200, 232));
        assert_eq!(menu.body().window().inner_height(), 119);
    }

    #[test]
    fn test_dropped_toolbar_counts_as_absent() {
        let (mut menu, _focus) = new_menu();
        let toolbar = Rc::new(RefCell::new(PageCounter::default()));
        menu.set_toolbar(&toolbar);
        drop(toolbar);

        assert!(!menu.has_toolbar());
        menu.add_line("A", || {});
        assert_eq!(menu.rect().h, 39 + 40);
    }

    #[test]
    fn test_destroy_releases_focus() {
        let mut focus = FocusTracker::new();
        let root = WindowId::new();
        focus.register(root);
        focus.set_focus(root);

        let mut menu = Menu::new(Rc::new(Theme::default()), &mut focus);
        let body = menu.body().id();
        assert!(focus.has_focus(body));

        menu.destroy(&mut focus);
        assert_eq!(menu.state(), MenuState::Destroyed);
        assert!(!focus.is_alive(body));

        if cfg!(feature = "hardware-touch") {
            assert_eq!(focus.current(), None);
        } else {
            assert_eq!(focus.current(), Some(root));
        }
    }

    #[cfg(not(feature = "hardware-touch"))]
    #[test]
    fn test_destroyed_previous_focus_is_not_restored() {
        let mut focus = FocusTracker::new();
        let root = WindowId::new();
        focus.register(root);
        focus.set_focus(root);

        let mut menu = Menu::new(Rc::new(Theme::default()), &mut focus);
        focus.unregister(root);
        menu.destroy(&mut focus);

        assert_eq!(focus.current(), None);
    }

    #[cfg(feature = "hardware-keys")]
    mod keys {
        use super::*;

        #[test]
        fn test_activate_closes_then_runs_selected_line() {
            let (mut menu, _focus) = new_menu();
            let calls = Rc::new(RefCell::new(Vec::new()));
            for label in ["A", "B", "C"] {
                let calls = calls.clone();
                menu.add_line(label, move || calls.borrow_mut().push(label));
            }

            menu.on_event(InputEvent::Next);
            menu.on_event(InputEvent::Activate);

            assert_eq!(*calls.borrow(), vec!["B"]);
            assert_eq!(menu.state(), MenuState::Closing);
            assert_eq!(menu.close_reason(), Some(CloseReason::Confirmed));
        }

        #[test]
        fn test_cancel_runs_handler_and_closes() {
            let (mut menu, _focus) = new_menu();
            let cancelled = Rc::new(RefCell::new(0));
            let counter = cancelled.clone();
            menu.set_cancel_handler(move || *counter.borrow_mut() += 1);
            menu.add_line("A", || panic!("must not run"));

            menu.on_event(InputEvent::Cancel);
            assert_eq!(*cancelled.borrow(), 1);
            assert_eq!(menu.close_reason(), Some(CloseReason::Cancelled));

            // Closed menus ignore further input
            menu.on_event(InputEvent::Cancel);
            menu.on_event(InputEvent::Activate);
            assert_eq!(*cancelled.borrow(), 1);
        }

        #[test]
        fn test_page_events_go_to_toolbar() {
            let (mut menu, _focus) = new_menu();
            let toolbar = Rc::new(RefCell::new(PageCounter::default()));
            menu.set_toolbar(&toolbar);
            menu.add_line("A", || {});

            menu.on_event(InputEvent::PageDown);
            menu.on_event(InputEvent::PageDownLong);

            assert_eq!(
                toolbar.borrow().events,
                vec![InputEvent::PageDown, InputEvent::PageDownLong]
            );
            assert!(menu.is_open());
        }

        #[test]
        fn test_page_events_without_toolbar_are_ignored() {
            let (mut menu, _focus) = new_menu();
            menu.add_line("A", || {});
            menu.on_event(InputEvent::PageDown);
            menu.on_event(InputEvent::Other(3));
            assert!(menu.is_open());
        }

        #[test]
        fn test_activate_on_empty_menu_closes() {
            let (mut menu, _focus) = new_menu();
            menu.on_event(InputEvent::Activate);
            assert_eq!(menu.state(), MenuState::Closing);
        }
    }

    #[cfg(feature = "hardware-touch")]
    mod touch {
        use super::*;

        fn menu_with(labels: &[&'static str]) -> (Menu, Rc<RefCell<Vec<&'static str>>>) {
            let (mut menu, _focus) = new_menu();
            let calls = Rc::new(RefCell::new(Vec::new()));
            for label in labels {
                let calls = calls.clone();
                let label = *label;
                menu.add_line(label, move || calls.borrow_mut().push(label));
            }
            (menu, calls)
        }

        #[test]
        fn test_tap_on_line_runs_it_and_closes() {
            let (mut menu, calls) = menu_with(&["A", "B", "C"]);
            let rect = menu.rect();

            assert!(menu.on_touch_end(rect.x + 10, rect.y + 45));
            assert_eq!(*calls.borrow(), vec!["B"]);
            assert_eq!(menu.close_reason(), Some(CloseReason::LineTapped(1)));
        }

        #[test]
        fn test_tap_outside_panel_dismisses() {
            let (mut menu, calls) = menu_with(&["A"]);

            assert!(menu.on_touch_end(5, 5));
            assert!(calls.borrow().is_empty());
            assert_eq!(menu.close_reason(), Some(CloseReason::TappedOutside));
        }

        #[test]
        fn test_tap_below_last_line_dismisses_without_running() {
            let (mut menu, calls) = menu_with(&["A", "B"]);
            let rect = menu.rect();

            // Inside the panel, in the footer band under the lines
            assert!(menu.on_touch_end(rect.x + 10, rect.bottom() - 5));
            assert!(calls.borrow().is_empty());
            assert_eq!(menu.close_reason(), Some(CloseReason::TappedOutside));
        }

        #[test]
        fn test_tap_on_empty_menu_dismisses() {
            let (mut menu, _calls) = menu_with(&[]);
            let rect = menu.rect();

            assert!(menu.on_touch_end(rect.x + 10, rect.y + 10));
            assert_eq!(menu.state(), MenuState::Closing);
            assert_eq!(menu.close_reason(), Some(CloseReason::TappedOutside));
        }

        #[test]
        fn test_slide_is_consumed_and_scrolls() {
            let labels = ["0", "1", "2", "3", "4", "5", "6", "7"];
            let (mut menu, calls) = menu_with(&labels);
            let rect = menu.rect();

            assert!(menu.on_touch_slide(
                rect.x + 10,
                rect.y + 20,
                rect.x + 10,
                rect.y + 60,
                0,
                -40
            ));
            assert_eq!(menu.body().window().scroll_position_y(), 40);
            assert!(menu.is_open());
            assert!(calls.borrow().is_empty());
        }
    }
}
