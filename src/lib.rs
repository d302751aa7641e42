//! Core library surface for the Library Manager TUI application.
//!
//! The record store lives in [`store`]; [`ui`] is the thin interactive shell
//! driving it. `main.rs` wires configuration and logging around both.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

/// Configuration resolved from the environment.
pub use config::Config;

/// Error taxonomy shared by every store operation.
pub use error::LibraryError;

/// The catalog entry and its lending state.
pub use models::{Book, BookStatus};

/// The record store itself.
pub use store::Library;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
