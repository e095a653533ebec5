mod app;
mod help;
mod input;
mod toolbar;

pub use app::App;
