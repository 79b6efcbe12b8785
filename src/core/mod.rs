//! # Core Module
//!
//! Configuration, error types and the clock abstraction shared by every feature.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Added clock module so due checks can run against fixed instants
//! - 1.0.0: Initial creation with config and error modules

pub mod clock;
pub mod config;
pub mod error;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, DesktopNotifications};
pub use error::{ReminderError, ReminderResult};
