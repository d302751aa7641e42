//! Binary entry point that glues the file-backed catalog to the TUI: resolve
//! configuration, start logging, load the books file, and drive the Ratatui
//! event loop until the user exits.
use anyhow::Context;
use library_manager::{logging, run_app, App, Config, Library};

/// Returning a `Result` bubbles fatal startup problems (an unreadable or
/// malformed books file, an unwritable log directory) up to the terminal.
fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let _logger = logging::init(&config)?;

    let library = Library::open(&config.books_path).with_context(|| {
        format!(
            "failed to load books from {}",
            config.books_path.display()
        )
    })?;

    let mut app = App::new(library);
    run_app(&mut app)
}
