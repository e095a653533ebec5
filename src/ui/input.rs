// Terminal input mapped onto the transmitter's controls.
//
// Keys stand in for the rotary encoder and the hardware keys; the mouse
// stands in for the touch panel.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use txmenu::input::{InputEvent, TouchEvent};
use txmenu::window::Coord;

/// What a key press means to the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Deliver to the open menu.
    Menu(InputEvent),
    OpenMenu,
    ToggleHelp,
    Quit,
    Ignored,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignored;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('?') => KeyAction::ToggleHelp,
        KeyCode::Char('m') => KeyAction::OpenMenu,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Menu(InputEvent::Next),
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Menu(InputEvent::Previous),
        KeyCode::Enter => KeyAction::Menu(InputEvent::Activate),
        KeyCode::Esc => KeyAction::Menu(InputEvent::Cancel),
        KeyCode::PageUp => KeyAction::Menu(InputEvent::PageUp),
        KeyCode::PageDown if shift => KeyAction::Menu(InputEvent::PageDownLong),
        KeyCode::PageDown => KeyAction::Menu(InputEvent::PageDown),
        KeyCode::Char(c) => KeyAction::Menu(InputEvent::Other(c as u32)),
        _ => KeyAction::Ignored,
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    start: (Coord, Coord),
    last: (Coord, Coord),
    slid: bool,
}

/// Turns left-button mouse gestures into touch events.
///
/// A press followed by a release without movement is a tap; movement while
/// pressed reports slides and suppresses the tap.
#[derive(Debug, Default)]
pub struct PointerTracker {
    press: Option<Press>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mouse event at display pixel `(x, y)`.
    pub fn on_mouse(&mut self, kind: MouseEventKind, x: Coord, y: Coord) -> Option<TouchEvent> {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some(Press {
                    start: (x, y),
                    last: (x, y),
                    slid: false,
                });
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let press = self.press.as_mut()?;
                let (slide_x, slide_y) = (x - press.last.0, y - press.last.1);
                if slide_x == 0 && slide_y == 0 {
                    return None;
                }
                press.last = (x, y);
                press.slid = true;
                Some(TouchEvent::Slide {
                    x,
                    y,
                    start_x: press.start.0,
                    start_y: press.start.1,
                    slide_x,
                    slide_y,
                })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let press = self.press.take()?;
                (!press.slid).then_some(TouchEvent::Tap { x, y })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_navigation_keys() {
        assert_eq!(map_key(key(KeyCode::Down)), KeyAction::Menu(InputEvent::Next));
        assert_eq!(map_key(key(KeyCode::Char('k'))), KeyAction::Menu(InputEvent::Previous));
        assert_eq!(map_key(key(KeyCode::Enter)), KeyAction::Menu(InputEvent::Activate));
        assert_eq!(map_key(key(KeyCode::Esc)), KeyAction::Menu(InputEvent::Cancel));
    }

    #[test]
    fn test_map_page_keys() {
        assert_eq!(map_key(key(KeyCode::PageDown)), KeyAction::Menu(InputEvent::PageDown));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::SHIFT)),
            KeyAction::Menu(InputEvent::PageDownLong)
        );
        assert_eq!(map_key(key(KeyCode::PageUp)), KeyAction::Menu(InputEvent::PageUp));
    }

    #[test]
    fn test_map_app_keys() {
        assert_eq!(map_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(map_key(key(KeyCode::Char('?'))), KeyAction::ToggleHelp);
        assert_eq!(map_key(key(KeyCode::Char('m'))), KeyAction::OpenMenu);
        assert_eq!(map_key(key(KeyCode::Char('x'))), KeyAction::Menu(InputEvent::Other('x' as u32)));
        assert_eq!(map_key(key(KeyCode::F(5))), KeyAction::Ignored);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), KeyAction::Ignored);
    }

    #[test]
    fn test_click_is_tap() {
        let mut pointer = PointerTracker::new();
        assert_eq!(pointer.on_mouse(MouseEventKind::Down(MouseButton::Left), 10, 20), None);
        assert_eq!(
            pointer.on_mouse(MouseEventKind::Up(MouseButton::Left), 10, 20),
            Some(TouchEvent::Tap { x: 10, y: 20 })
        );
    }

    #[test]
    fn test_drag_slides_and_suppresses_tap() {
        let mut pointer = PointerTracker::new();
        pointer.on_mouse(MouseEventKind::Down(MouseButton::Left), 10, 100);

        assert_eq!(
            pointer.on_mouse(MouseEventKind::Drag(MouseButton::Left), 10, 80),
            Some(TouchEvent::Slide {
                x: 10,
                y: 80,
                start_x: 10,
                start_y: 100,
                slide_x: 0,
                slide_y: -20,
            })
        );
        assert_eq!(
            pointer.on_mouse(MouseEventKind::Drag(MouseButton::Left), 10, 80),
            None
        );
        assert_eq!(pointer.on_mouse(MouseEventKind::Up(MouseButton::Left), 10, 80), None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut pointer = PointerTracker::new();
        assert_eq!(pointer.on_mouse(MouseEventKind::Up(MouseButton::Left), 1, 1), None);
        assert_eq!(pointer.on_mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1), None);
    }
}
