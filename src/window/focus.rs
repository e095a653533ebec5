use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

/// Non-owning handle to a window.
///
/// Handles stay valid as values after the window is gone; whether the
/// window still exists is answered by the [`FocusTracker`] it was
/// registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(Uuid);

impl WindowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell windows apart in logs
        let full = self.0.simple().to_string();
        write!(f, "{}", &full[..8])
    }
}

/// Registry of live windows and the one holding input focus.
#[derive(Debug, Default)]
pub struct FocusTracker {
    live: HashSet<WindowId>,
    focused: Option<WindowId>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: WindowId) {
        self.live.insert(id);
    }

    /// Forget a window. Clears focus if it was focused.
    pub fn unregister(&mut self, id: WindowId) {
        self.live.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    pub fn is_alive(&self, id: WindowId) -> bool {
        self.live.contains(&id)
    }

    /// Give focus to a registered window. Unknown windows are ignored.
    pub fn set_focus(&mut self, id: WindowId) -> bool {
        if self.is_alive(id) {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    pub fn current(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn has_focus(&self, id: WindowId) -> bool {
        self.focused == Some(id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_requires_registration() {
        let mut tracker = FocusTracker::new();
        let id = WindowId::new();

        assert!(!tracker.set_focus(id));
        assert_eq!(tracker.current(), None);

        tracker.register(id);
        assert!(tracker.set_focus(id));
        assert!(tracker.has_focus(id));
    }

    #[test]
    fn test_unregister_clears_focus() {
        let mut tracker = FocusTracker::new();
        let a = WindowId::new();
        let b = WindowId::new();
        tracker.register(a);
        tracker.register(b);
        tracker.set_focus(a);

        tracker.unregister(b);
        assert!(tracker.has_focus(a));

        tracker.unregister(a);
        assert_eq!(tracker.current(), None);
        assert!(!tracker.is_alive(a));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_window_ids_are_distinct() {
        assert_ne!(WindowId::new(), WindowId::new());
        assert_eq!(WindowId::new().to_string().len(), 8);
    }
}
