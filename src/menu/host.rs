use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Theme;
use crate::debug_log;
#[cfg(feature = "hardware-keys")]
use crate::input::InputEvent;
use crate::surface::Surface;
#[cfg(feature = "hardware-touch")]
use crate::window::Coord;
use crate::window::FocusTracker;

use super::{Menu, MenuState};

/// Deferred menu construction queued from inside a callback.
pub type MenuBuilder = Box<dyn FnOnce(&mut Menu)>;

type PendingQueue = Rc<RefCell<Vec<MenuBuilder>>>;

/// Owns the open menus and the focus registry, routes input to the topmost
/// menu and tears closed menus down between ticks.
pub struct MenuHost {
    theme: Rc<Theme>,
    focus: FocusTracker,
    menus: Vec<Menu>,
    pending: PendingQueue,
}

/// Handle for opening menus from line actions, which run while the host
/// is busy dispatching.
#[derive(Clone)]
pub struct MenuSpawner {
    pending: PendingQueue,
}

impl MenuSpawner {
    /// Queue a menu; `build` fills it in once the host picks it up.
    pub fn open(&self, build: impl FnOnce(&mut Menu) + 'static) {
        self.pending.borrow_mut().push(Box::new(build));
    }
}

impl MenuHost {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: Rc::new(theme),
            focus: FocusTracker::new(),
            menus: Vec::new(),
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusTracker {
        &mut self.focus
    }

    pub fn spawner(&self) -> MenuSpawner {
        MenuSpawner {
            pending: self.pending.clone(),
        }
    }

    /// Open an empty menu on top of the others.
    pub fn open_menu(&mut self) -> &mut Menu {
        let menu = Menu::new(self.theme.clone(), &mut self.focus);
        self.menus.push(menu);
        let top = self.menus.len() - 1;
        &mut self.menus[top]
    }

    /// Menus not yet torn down, bottom first.
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn has_open_menu(&self) -> bool {
        self.menus.iter().any(Menu::is_open)
    }

    /// Topmost menu still accepting input.
    pub fn top(&self) -> Option<&Menu> {
        self.menus.iter().rev().find(|menu| menu.is_open())
    }

    pub fn top_mut(&mut self) -> Option<&mut Menu> {
        self.menus.iter_mut().rev().find(|menu| menu.is_open())
    }

    /// Deliver a key event to the topmost open menu. Returns false when no
    /// menu is open.
    #[cfg(feature = "hardware-keys")]
    pub fn on_event(&mut self, event: InputEvent) -> bool {
        match self.top_mut() {
            Some(menu) => {
                menu.on_event(event);
                true
            }
            None => false,
        }
    }

    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_end(&mut self, x: Coord, y: Coord) -> bool {
        self.top_mut().is_some_and(|menu| menu.on_touch_end(x, y))
    }

    #[cfg(feature = "hardware-touch")]
    pub fn on_touch_slide(
        &mut self,
        x: Coord,
        y: Coord,
        start_x: Coord,
        start_y: Coord,
        slide_x: Coord,
        slide_y: Coord,
    ) -> bool {
        self.top_mut()
            .is_some_and(|menu| menu.on_touch_slide(x, y, start_x, start_y, slide_x, slide_y))
    }

    pub fn needs_redraw(&self) -> bool {
        self.menus
            .iter()
            .any(|menu| menu.is_open() && menu.needs_redraw())
    }

    /// Paint every open menu, bottom first.
    pub fn paint(&mut self, surface: &mut dyn Surface) {
        for menu in self.menus.iter_mut().filter(|menu| menu.is_open()) {
            menu.paint(surface);
        }
    }

    /// Tear down menus that scheduled their own closing. Returns how many
    /// were removed.
    pub fn collect_garbage(&mut self) -> usize {
        let before = self.menus.len();
        let focus = &mut self.focus;

        for menu in self
            .menus
            .iter_mut()
            .filter(|menu| menu.state() == MenuState::Closing)
        {
            menu.destroy(focus);
        }
        self.menus.retain(|menu| menu.state() != MenuState::Destroyed);

        let removed = before - self.menus.len();
        if removed > 0 {
            debug_log::log_debug(&format!("collected {} menu(s), {} left", removed, self.menus.len()));
        }
        removed
    }

    /// Build menus queued through a [`MenuSpawner`]. Returns how many were
    /// opened.
    pub fn attach_pending(&mut self) -> usize {
        let builders = std::mem::take(&mut *self.pending.borrow_mut());
        let opened = builders.len();
        for build in builders {
            build(self.open_menu());
        }
        opened
    }

    /// Housekeeping between input events: tear down closed menus, then open
    /// queued ones. Returns whether the set of menus changed.
    pub fn tick(&mut self) -> bool {
        let removed = self.collect_garbage();
        let opened = self.attach_pending();
        removed > 0 || opened > 0
    }

    /// Close and tear down every menu.
    pub fn close_all(&mut self) {
        for menu in &mut self.menus {
            menu.close();
        }
        self.collect_garbage();
    }
}
