//! Ratatui front-end: one catalogue screen, its modal dialogs, and the
//! terminal loop that drives them.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;
mod theme;

pub use app::App;
pub use terminal::run_app;
pub use theme::{Palette, ThemeKind};
