//! Input event values delivered to widgets.
//!
//! Which families exist depends on the build: `hardware-keys` for rotary
//! encoder and key events, `hardware-touch` for touch panel events.

#[cfg(feature = "hardware-touch")]
use crate::window::Coord;

/// Rotary encoder and key events.
#[cfg(feature = "hardware-keys")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Rotary encoder turned right.
    Next,
    /// Rotary encoder turned left.
    Previous,
    /// Enter key released.
    Activate,
    /// Exit key released.
    Cancel,
    /// Page up key released.
    PageUp,
    /// Page down key released.
    PageDown,
    /// Page down key held.
    PageDownLong,
    /// Any other key, by raw code.
    Other(u32),
}

#[cfg(feature = "hardware-keys")]
impl InputEvent {
    /// Whether a registered toolbar should receive this event.
    pub fn is_page_navigation(self) -> bool {
        matches!(self, Self::PageUp | Self::PageDown | Self::PageDownLong)
    }
}

/// Touch panel events, in display coordinates.
#[cfg(feature = "hardware-touch")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// Finger lifted at `(x, y)` without sliding.
    Tap { x: Coord, y: Coord },
    /// Finger moved; `slide_x`/`slide_y` is the delta since the last report.
    Slide {
        x: Coord,
        y: Coord,
        start_x: Coord,
        start_y: Coord,
        slide_x: Coord,
        slide_y: Coord,
    },
}

#[cfg(all(test, feature = "hardware-keys"))]
mod tests {
    use super::*;

    #[test]
    fn test_page_navigation_events() {
        assert!(InputEvent::PageDown.is_page_navigation());
        assert!(InputEvent::PageDownLong.is_page_navigation());
        assert!(InputEvent::PageUp.is_page_navigation());
        assert!(!InputEvent::Activate.is_page_navigation());
        assert!(!InputEvent::Other(7).is_page_navigation());
    }
}
