//! Debug logging for window tracing.
//!
//! Disabled by default. Enable with `--debug-log`; lines are written to
//! `~/.txmenu/debug.log` unless another path is given.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;

use crate::window::{Coord, WindowId};

/// Global flag to enable/disable debug logging.
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Global log file handle.
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Initialize the debug logging system, truncating the log file.
pub fn init<P: AsRef<Path>>(log_path: P) -> std::io::Result<()> {
    let log_path = log_path.as_ref();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }
    DEBUG_ENABLED.store(true, Ordering::SeqCst);

    log_raw(&format!("=== txmenu debug log started at {} ===\n", timestamp()));

    Ok(())
}

/// Stop logging and close the file.
pub fn shutdown() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
}

/// Check if debug logging is enabled.
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Default log file path.
pub fn default_log_path() -> PathBuf {
    crate::config::txmenu_dir().join("debug.log")
}

fn timestamp() -> String {
    Utc::now().format("%H:%M:%S%.3f").to_string()
}

fn log_raw(msg: &str) {
    if !is_enabled() {
        return;
    }
    if let Ok(mut guard) = LOG_FILE.lock()
        && let Some(ref mut file) = *guard
    {
        let _ = file.write_all(msg.as_bytes());
        let _ = file.flush();
    }
}

fn log_with_category(category: &str, msg: &str) {
    if !is_enabled() {
        return;
    }
    log_raw(&format!("[{}] {} {}\n", timestamp(), category, msg));
}

/// Log an input event received by a window.
pub fn log_input(window: &str, id: WindowId, event: &dyn std::fmt::Debug) {
    if !is_enabled() {
        return;
    }
    log_with_category("INPUT", &format!("{}({}) received {:?}", window, id, event));
}

/// Log a touch event and whether something absorbed it.
pub fn log_touch(window: &str, id: WindowId, x: Coord, y: Coord, outcome: &dyn std::fmt::Debug) {
    if !is_enabled() {
        return;
    }
    log_with_category(
        "TOUCH",
        &format!("{}({}) tap ({},{}) -> {:?}", window, id, x, y, outcome),
    );
}

/// Log a selection change.
pub fn log_select(id: WindowId, index: usize, scroll_y: Coord) {
    if !is_enabled() {
        return;
    }
    log_with_category(
        "SELECT",
        &format!("body({}) index={} scroll_y={}", id, index, scroll_y),
    );
}

/// Log a layout recomputation.
pub fn log_layout(id: WindowId, top: Coord, height: Coord, inner_height: Coord, lines: usize) {
    if !is_enabled() {
        return;
    }
    log_with_category(
        "LAYOUT",
        &format!(
            "menu({}) top={} height={} inner={} lines={}",
            id, top, height, inner_height, lines
        ),
    );
}

/// Log a menu lifecycle transition.
pub fn log_lifecycle(id: WindowId, transition: &str) {
    if !is_enabled() {
        return;
    }
    log_with_category("LIFECYCLE", &format!("menu({}) {}", id, transition));
}

/// Log a custom debug message.
pub fn log_debug(msg: &str) {
    if !is_enabled() {
        return;
    }
    log_with_category("DEBUG", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_writes_categories_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("debug.log");

        init(&path).unwrap();
        assert!(is_enabled());
        log_debug("hello from test");
        log_lifecycle(WindowId::new(), "closing");
        shutdown();
        assert!(!is_enabled());

        // Disabled logging must not touch the file
        log_debug("after shutdown");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("=== txmenu debug log started"));
        assert!(contents.contains("DEBUG hello from test"));
        assert!(contents.contains("LIFECYCLE menu("));
        assert!(!contents.contains("after shutdown"));
    }
}
