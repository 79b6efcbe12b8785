//! # TUI Module
//!
//! Terminal user interface for managing medications and reminders.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Banner pane with its own focus and dismiss key
//! - 1.0.0: Initial TUI with medication list, add form and help

pub mod app;
pub mod event;
pub mod state;
pub mod ui;

pub use app::{App, Focus, InputMode, Screen};
pub use event::{Event, EventHandler};
