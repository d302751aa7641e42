//! Ratatui front-end: a seven-entry menu beside an output panel, with modal
//! forms and prompts collecting whatever each store operation needs.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
