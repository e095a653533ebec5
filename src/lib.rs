//! Modal menu widget for small transmitter displays.
//!
//! A [`menu::Menu`] shows a title, a scrollable list of lines and a cancel
//! band. It is driven by rotary/key events (`hardware-keys`) and touch
//! events (`hardware-touch`) and paints onto any [`surface::Surface`].

pub mod config;
pub mod debug_log;
pub mod input;
pub mod menu;
pub mod surface;
pub mod window;
